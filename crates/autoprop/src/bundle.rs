#![forbid(unsafe_code)]

//! Per-occasion override bundle.
//!
//! A [`Bundle`] is the set of values an external owner supplies for one
//! update occasion. Presence is structural: a field is externally controlled
//! exactly when its name has an entry in the bundle. Default-override values
//! (consulted only when initial state is built) live in the same bundle under
//! the default name each [`Field`](crate::Field) declares.

use ahash::AHashMap;

/// Name of an independently controllable field.
///
/// Field names are declared once, at reconciler construction, and never
/// change for the lifetime of the instance.
pub type FieldName = &'static str;

/// Host-owned field state: the single source of truth across occasions.
///
/// The reconciler reads and patches this map but never retains a copy
/// between calls.
pub type State<V> = AHashMap<FieldName, V>;

/// Override values for one update occasion, rebuilt fresh by the host.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize))]
pub struct Bundle<V> {
    values: AHashMap<FieldName, V>,
}

impl<V> Bundle<V> {
    /// Create an empty bundle (nothing is controlled).
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: AHashMap::new(),
        }
    }

    /// Add a value, builder style.
    #[must_use]
    pub fn with(mut self, name: FieldName, value: V) -> Self {
        self.values.insert(name, value);
        self
    }

    /// Add a value in place, returning any previous value under that name.
    pub fn insert(&mut self, name: FieldName, value: V) -> Option<V> {
        self.values.insert(name, value)
    }

    /// The value supplied for `name`, if any.
    #[must_use]
    pub fn get(&self, name: FieldName) -> Option<&V> {
        self.values.get(name)
    }

    /// Whether a value is present for `name`.
    #[must_use]
    pub fn contains(&self, name: FieldName) -> bool {
        self.values.contains_key(name)
    }

    /// Number of present values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bundle carries no values at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &V)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}

impl<V> Default for Bundle<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(FieldName, V)> for Bundle<V> {
    fn from_iter<I: IntoIterator<Item = (FieldName, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
