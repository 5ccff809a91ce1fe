#![forbid(unsafe_code)]

//! Controlled/uncontrolled field-state reconciliation for stateful hosts.
//!
//! A host (a widget, typically) owns mutable state for a set of named
//! fields. An external owner may take control of any declared field by
//! supplying an override value for it on an update occasion; the field's
//! internal state then becomes an informational mirror, and internal write
//! attempts against it are silently dropped. Fields without a present
//! override stay host-owned. A default-override can seed a field's starting
//! value without taking control.
//!
//! Two forms share one algorithm:
//!
//! - [`Reconciler`]: the multi-field form, configured once with the
//!   controlled-field set and optional deriver hooks, then attached to any
//!   number of host instances by composition.
//! - [`AutoControlled`]: the single-field form, a host-side mirror with a
//!   guarded setter and an equality-gated override push.
//!
//! # Example
//!
//! ```
//! use autoprop::{Bundle, Field, Patch, ReconcilerBuilder, State};
//!
//! let reconciler = ReconcilerBuilder::new()
//!     .field(Field::new("value").default_name("defaultValue"))
//!     .initial_state_with(|_| {
//!         let mut state = State::new();
//!         state.insert("value", 0_i64);
//!         state.insert("step", 1);
//!         state
//!     })
//!     .build();
//!
//! // The external owner controls "value", so internal writes to it drop.
//! let overrides = Bundle::new().with("value", 123);
//! let mut state = reconciler.initial_state(&overrides);
//! assert_eq!(state.get("value"), Some(&123));
//!
//! let wrote = reconciler.try_set_state(
//!     &overrides,
//!     Patch::new().with("value", 124).with("step", 2),
//!     &mut state,
//! );
//! assert!(wrote);
//! assert_eq!(state.get("value"), Some(&123));
//! assert_eq!(state.get("step"), Some(&2));
//! ```
//!
//! # Logging
//!
//! With the `tracing` feature enabled, derivations and guarded writes emit
//! `DEBUG` events, and the single-field form emits a `WARN` event when a
//! field switches between controlled and uncontrolled mid-life (the switch
//! is reported and ignored; behavior does not change).

pub mod bundle;
pub mod field;
pub mod patch;
pub mod reconciler;
pub mod single;

pub use bundle::{Bundle, FieldName, State};
pub use field::{Fallback, Field};
pub use patch::Patch;
pub use reconciler::{Reconciler, ReconcilerBuilder};
pub use single::AutoControlled;
