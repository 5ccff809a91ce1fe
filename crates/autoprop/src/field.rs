#![forbid(unsafe_code)]

//! Field declarations and effective-value resolution.
//!
//! A [`Field`] names one controllable unit of state and declares, up front,
//! everything the reconciler may consult for it: the default-override name
//! (the pairing is explicit, never derived from the field name by string
//! transformation) and an opt-in [`Fallback`] used when no other source has
//! a value.

use crate::bundle::{Bundle, FieldName, State};

/// Last-resort value for a field nothing else supplies.
///
/// Fallbacks are an explicit, per-field table entry. Form-control hosts that
/// want "unset selection is `false`" or "unset value is empty text, or an
/// empty list when a companion multiple-flag field is set" declare exactly
/// that, rather than relying on the field's name.
#[derive(Debug, Clone, Copy)]
pub enum Fallback<V> {
    /// A fixed value.
    Value(V),
    /// Computed from the current bundle, for fallbacks that depend on a
    /// companion field.
    With(fn(&Bundle<V>) -> V),
}

/// Immutable declaration of one auto-controlled field.
#[derive(Debug, Clone)]
pub struct Field<V> {
    name: FieldName,
    default_name: Option<FieldName>,
    fallback: Option<Fallback<V>>,
}

impl<V> Field<V> {
    /// Declare a field with no default-override pairing and no fallback.
    #[must_use]
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            default_name: None,
            fallback: None,
        }
    }

    /// Pair this field with the bundle entry that seeds its initial value.
    #[must_use]
    pub fn default_name(mut self, name: FieldName) -> Self {
        self.default_name = Some(name);
        self
    }

    /// Set a fixed fallback value.
    #[must_use]
    pub fn fallback(mut self, value: V) -> Self {
        self.fallback = Some(Fallback::Value(value));
        self
    }

    /// Set a bundle-dependent fallback.
    #[must_use]
    pub fn fallback_with(mut self, f: fn(&Bundle<V>) -> V) -> Self {
        self.fallback = Some(Fallback::With(f));
        self
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> FieldName {
        self.name
    }
}

impl<V: Clone> Field<V> {
    /// Resolve the effective value for this field.
    ///
    /// Tried in order: the override value; then, only when `include_defaults`
    /// is set, the default-override value and the value already in `state`;
    /// then the declared fallback. Defaults never shadow an explicit
    /// override, and the state-derived source is gated out of update-time
    /// derivation by `include_defaults = false`.
    pub(crate) fn resolve(
        &self,
        bundle: &Bundle<V>,
        state: &State<V>,
        include_defaults: bool,
    ) -> Option<V> {
        if let Some(value) = bundle.get(self.name) {
            return Some(value.clone());
        }

        if include_defaults {
            if let Some(default_name) = self.default_name
                && let Some(value) = bundle.get(default_name)
            {
                return Some(value.clone());
            }
            if let Some(value) = state.get(self.name) {
                return Some(value.clone());
            }
        }

        match &self.fallback {
            Some(Fallback::Value(value)) => Some(value.clone()),
            Some(Fallback::With(f)) => Some(f(bundle)),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(name: FieldName, value: i32) -> State<i32> {
        let mut state = State::new();
        state.insert(name, value);
        state
    }

    #[test]
    fn override_wins_over_everything() {
        let field = Field::new("value").default_name("defaultValue").fallback(9);
        let bundle = Bundle::new().with("value", 1).with("defaultValue", 2);
        let state = state_with("value", 3);
        assert_eq!(field.resolve(&bundle, &state, true), Some(1));
        assert_eq!(field.resolve(&bundle, &state, false), Some(1));
    }

    #[test]
    fn default_override_consulted_only_with_defaults() {
        let field = Field::new("value").default_name("defaultValue");
        let bundle = Bundle::new().with("defaultValue", 2);
        let state = State::new();
        assert_eq!(field.resolve(&bundle, &state, true), Some(2));
        assert_eq!(field.resolve(&bundle, &state, false), None);
    }

    #[test]
    fn state_consulted_after_defaults_and_only_with_defaults() {
        let field = Field::new("value").default_name("defaultValue");
        let bundle: Bundle<i32> = Bundle::new();
        let state = state_with("value", 3);
        assert_eq!(field.resolve(&bundle, &state, true), Some(3));
        assert_eq!(field.resolve(&bundle, &state, false), None);
    }

    #[test]
    fn fixed_fallback_is_last_resort() {
        let field = Field::new("checked").fallback(0);
        let bundle: Bundle<i32> = Bundle::new();
        assert_eq!(field.resolve(&bundle, &State::new(), true), Some(0));
    }

    #[test]
    fn bundle_dependent_fallback_sees_companion_flag() {
        // "multiple" selections fall back to -1, single ones to 0.
        let field = Field::new("value")
            .fallback_with(|bundle| if bundle.contains("multiple") { -1 } else { 0 });
        let single: Bundle<i32> = Bundle::new();
        let multiple = Bundle::new().with("multiple", 1);
        assert_eq!(field.resolve(&single, &State::new(), true), Some(0));
        assert_eq!(field.resolve(&multiple, &State::new(), true), Some(-1));
    }

    #[test]
    fn absent_everywhere_resolves_to_none() {
        let field: Field<i32> = Field::new("value");
        assert_eq!(field.resolve(&Bundle::new(), &State::new(), true), None);
    }
}
