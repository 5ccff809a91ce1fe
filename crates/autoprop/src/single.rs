#![forbid(unsafe_code)]

//! Single-field variant.
//!
//! [`AutoControlled`] scopes the reconciliation policy to exactly one value:
//! a host-side mirror that an external owner may take control of at any
//! occasion by supplying an override. The host reads via [`AutoControlled::get`],
//! writes internally via the guarded [`AutoControlled::try_set`], and calls
//! [`AutoControlled::sync`] once per update occasion to keep the mirror
//! matched to its authoritative override.

/// One auto-controlled value.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoControlled<V> {
    value: V,
    #[cfg(feature = "tracing")]
    was_controlled: Option<bool>,
}

impl<V: Clone + PartialEq> AutoControlled<V> {
    /// Create the mirror from an internal initial value, seeded by the
    /// default-override when one is supplied. The default is consulted only
    /// here; it is irrelevant after construction.
    #[must_use]
    pub fn new(initial: V, default_override: Option<V>) -> Self {
        Self {
            value: default_override.unwrap_or(initial),
            #[cfg(feature = "tracing")]
            was_controlled: None,
        }
    }

    /// Current effective value.
    #[must_use]
    pub fn get(&self) -> &V {
        &self.value
    }

    /// Unguarded write.
    pub fn set(&mut self, value: V) {
        self.value = value;
    }

    /// Guarded write: dropped when an override is present, since the
    /// override owner — not the host — dictates the value then. Returns
    /// whether the write applied.
    pub fn try_set(&mut self, override_value: Option<&V>, value: V) -> bool {
        self.note_control(override_value.is_some());
        if override_value.is_some() {
            return false;
        }
        self.value = value;
        true
    }

    /// Equality-gated push of the override into the mirror.
    ///
    /// Writes exactly when the override is present and differs from the
    /// current value; deliberately bypasses the guard, because copying the
    /// override inward is its whole purpose. The host calls this once per
    /// update occasion. Returns whether the mirror changed.
    pub fn sync(&mut self, override_value: Option<&V>) -> bool {
        self.note_control(override_value.is_some());
        match override_value {
            Some(value) if *value != self.value => {
                self.value = value.clone();
                true
            }
            _ => false,
        }
    }

    /// Report-and-ignore diagnostic for a field switching between
    /// controlled and uncontrolled mid-life.
    #[cfg(feature = "tracing")]
    fn note_control(&mut self, controlled: bool) {
        if let Some(previous) = self.was_controlled
            && previous != controlled
        {
            tracing::warn!(
                message = "auto_controlled.control_switch",
                from = previous,
                to = controlled
            );
        }
        self.was_controlled = Some(controlled);
    }

    #[cfg(not(feature = "tracing"))]
    fn note_control(&mut self, _controlled: bool) {}
}
