#![forbid(unsafe_code)]

//! Multi-field reconciler.
//!
//! A [`Reconciler`] is configured once — the auto-controlled field set, an
//! optional state initializer, an optional secondary deriver — and is then
//! an immutable, reentrant value. It holds no occasion-scoped state: every
//! operation is a pure function of the bundle and state its host passes in,
//! so one reconciler may serve many host instances concurrently.
//!
//! The host wires three operations into its own lifecycle:
//!
//! - [`Reconciler::initial_state`], exactly once per host instance;
//! - [`Reconciler::derive_on_update`], on every update occasion, merging the
//!   returned patch into its stored state;
//! - [`Reconciler::try_set_state`] (or [`Reconciler::guarded_patch`]) in
//!   place of unguarded internal writes.

use crate::bundle::{Bundle, State};
use crate::field::Field;
use crate::patch::Patch;

type InitFn<V> = Box<dyn Fn(&Bundle<V>) -> State<V> + Send + Sync>;
type DeriveFn<V> = Box<dyn Fn(&Bundle<V>, &State<V>) -> Patch<V> + Send + Sync>;

/// Builder for [`Reconciler`].
pub struct ReconcilerBuilder<V> {
    fields: Vec<Field<V>>,
    init: Option<InitFn<V>>,
    derive: Option<DeriveFn<V>>,
}

impl<V> ReconcilerBuilder<V> {
    /// Start an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            init: None,
            derive: None,
        }
    }

    /// Declare one auto-controlled field.
    #[must_use]
    pub fn field(mut self, field: Field<V>) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare several auto-controlled fields.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field<V>>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Set the state initializer.
    ///
    /// Runs once per host instance to produce the base state; fields outside
    /// the controlled set are taken from it verbatim, controlled fields may
    /// use it as their last pre-fallback source.
    #[must_use]
    pub fn initial_state_with(
        mut self,
        f: impl Fn(&Bundle<V>) -> State<V> + Send + Sync + 'static,
    ) -> Self {
        self.init = Some(Box::new(f));
        self
    }

    /// Set the secondary deriver.
    ///
    /// Runs after the controlled-field patch on every update occasion. It
    /// receives the previous state with that patch already merged in, and
    /// its output wins on key conflicts.
    #[must_use]
    pub fn derive_with(
        mut self,
        f: impl Fn(&Bundle<V>, &State<V>) -> Patch<V> + Send + Sync + 'static,
    ) -> Self {
        self.derive = Some(Box::new(f));
        self
    }

    /// Finish configuration. The controlled-field set is fixed from here on.
    #[must_use]
    pub fn build(self) -> Reconciler<V> {
        Reconciler {
            fields: self.fields,
            init: self.init,
            derive: self.derive,
        }
    }
}

impl<V> Default for ReconcilerBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The reconciliation policy for one fixed set of auto-controlled fields.
pub struct Reconciler<V> {
    fields: Vec<Field<V>>,
    init: Option<InitFn<V>>,
    derive: Option<DeriveFn<V>>,
}

impl<V: Clone> Reconciler<V> {
    /// Names of the auto-controlled fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(Field::name)
    }

    /// Build the full initial state for a new host instance.
    ///
    /// The initializer's output is the base; every declared field is then
    /// resolved with defaults enabled (override, then default-override, then
    /// base state, then fallback) and merged over it, declared fields
    /// winning. Pure: may be called once per host instance with differing
    /// bundles.
    #[must_use]
    pub fn initial_state(&self, bundle: &Bundle<V>) -> State<V> {
        let base = match &self.init {
            Some(init) => init(bundle),
            None => State::new(),
        };

        let mut state = base.clone();
        for field in &self.fields {
            if let Some(value) = field.resolve(bundle, &base, true) {
                state.insert(field.name(), value);
            }
        }
        state
    }

    /// Build the patch to merge into `prev` for a new update occasion.
    ///
    /// A declared field enters the patch only when its override value is
    /// present in `bundle`; absent overrides leave prior state untouched,
    /// and default-overrides are never consulted here. The secondary
    /// deriver, if configured, runs against the already-updated working
    /// state and overrides the patch on conflicts.
    #[must_use]
    pub fn derive_on_update(&self, bundle: &Bundle<V>, prev: &State<V>) -> Patch<V> {
        let mut patch = Patch::new();
        for field in &self.fields {
            if let Some(value) = bundle.get(field.name()) {
                patch.insert(field.name(), value.clone());
            }
        }

        if let Some(derive) = &self.derive {
            let mut working = prev.clone();
            for (name, value) in patch.iter() {
                working.insert(name, value.clone());
            }
            patch.merge(derive(bundle, &working));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "reconciler.derive", changed = patch.len());

        patch
    }

    /// Filter a candidate write, dropping every externally controlled key.
    ///
    /// A key is dropped when `bundle` carries a value for it: the override,
    /// not internal state, is the source of truth for such a field. Returns
    /// `None` when nothing survives.
    #[must_use]
    pub fn guarded_patch(&self, bundle: &Bundle<V>, mut patch: Patch<V>) -> Option<Patch<V>> {
        #[cfg(feature = "tracing")]
        let candidate = patch.len();

        patch.retain(|name| !bundle.contains(name));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "reconciler.guarded_write",
            candidate,
            applied = patch.len()
        );

        if patch.is_empty() { None } else { Some(patch) }
    }

    /// Guarded write into host state.
    ///
    /// Applies [`Reconciler::guarded_patch`] and merges the survivors into
    /// `state`. Returns whether anything was written; a fully dropped write
    /// is a true no-op.
    pub fn try_set_state(&self, bundle: &Bundle<V>, patch: Patch<V>, state: &mut State<V>) -> bool {
        match self.guarded_patch(bundle, patch) {
            Some(patch) => {
                patch.apply_to(state);
                true
            }
            None => false,
        }
    }

    /// [`Reconciler::try_set_state`] with a completion callback.
    ///
    /// `on_applied` runs only when at least one key survived the guard;
    /// hosts hanging side effects off the callback see none on a no-op.
    pub fn try_set_state_then(
        &self,
        bundle: &Bundle<V>,
        patch: Patch<V>,
        state: &mut State<V>,
        on_applied: impl FnOnce(),
    ) -> bool {
        let applied = self.try_set_state(bundle, patch, state);
        if applied {
            on_applied();
        }
        applied
    }
}

impl<V> std::fmt::Debug for Reconciler<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("fields", &self.fields.iter().map(Field::name).collect::<Vec<_>>())
            .field("has_init", &self.init.is_some())
            .field("has_derive", &self.derive.is_some())
            .finish()
    }
}
