#![forbid(unsafe_code)]

//! State patches.
//!
//! A [`Patch`] is the delta a reconciler hands back to its host: a set of
//! `(name, value)` pairs to merge over the host's stored state. An empty
//! patch is a first-class "nothing changed" result, not an error.

use ahash::AHashMap;

use crate::bundle::{FieldName, State};

/// A keyed delta to merge into host state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "state-persistence", derive(serde::Serialize))]
pub struct Patch<V> {
    values: AHashMap<FieldName, V>,
}

impl<V> Patch<V> {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: AHashMap::new(),
        }
    }

    /// Add an entry, builder style.
    #[must_use]
    pub fn with(mut self, name: FieldName, value: V) -> Self {
        self.values.insert(name, value);
        self
    }

    /// Add an entry in place.
    pub fn insert(&mut self, name: FieldName, value: V) -> Option<V> {
        self.values.insert(name, value)
    }

    /// The patched value for `name`, if the patch touches it.
    #[must_use]
    pub fn get(&self, name: FieldName) -> Option<&V> {
        self.values.get(name)
    }

    /// Whether the patch touches `name`.
    #[must_use]
    pub fn contains(&self, name: FieldName) -> bool {
        self.values.contains_key(name)
    }

    /// Number of touched fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &V)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Merge `other` on top; its entries win on key conflicts.
    pub fn merge(&mut self, other: Patch<V>) {
        self.values.extend(other.values);
    }

    /// Keep only entries whose name satisfies the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(FieldName) -> bool) {
        self.values.retain(|name, _| keep(name));
    }

    /// Merge this patch into host state, consuming it.
    pub fn apply_to(self, state: &mut State<V>) {
        state.extend(self.values);
    }
}

impl<V> Default for Patch<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(FieldName, V)> for Patch<V> {
    fn from_iter<I: IntoIterator<Item = (FieldName, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_incoming_entries() {
        let mut patch = Patch::new().with("value", 1).with("active", 0);
        patch.merge(Patch::new().with("value", 2));
        assert_eq!(patch.get("value"), Some(&2));
        assert_eq!(patch.get("active"), Some(&0));
    }

    #[test]
    fn apply_overwrites_state_keys_and_keeps_the_rest() {
        let mut state = State::new();
        state.insert("value", 1);
        state.insert("description", 10);
        Patch::new().with("value", 2).apply_to(&mut state);
        assert_eq!(state.get("value"), Some(&2));
        assert_eq!(state.get("description"), Some(&10));
    }

    #[test]
    fn empty_patch_is_a_valid_no_change() {
        let patch: Patch<i32> = Patch::default();
        assert!(patch.is_empty());
        let mut state = State::new();
        state.insert("value", 1);
        patch.apply_to(&mut state);
        assert_eq!(state.get("value"), Some(&1));
    }

    #[test]
    fn retain_filters_by_name() {
        let mut patch = Patch::new().with("value", 1).with("active", 2);
        patch.retain(|name| name != "value");
        assert!(!patch.contains("value"));
        assert!(patch.contains("active"));
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn patch_serializes_for_persistence() {
        let patch = Patch::new().with("value", 5_i32);
        let json = serde_json::to_value(&patch).expect("serialize patch");
        assert_eq!(json["values"]["value"], 5);
    }
}
