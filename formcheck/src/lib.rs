//! # formcheck
//!
//! Declarative form validation for Rust.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `formcheck` to get the whole toolkit, or depend on
//! individual crates for finer-grained control.
//!
//! ## Quick start
//!
//! ```
//! use formcheck::prelude::*;
//!
//! let rule = FieldRule::email("email", 4, 64).require(["@"]);
//! let results = evaluate_field(&rule, "me@example.com", None, Trigger::Submit);
//! assert!(results[0].is_valid());
//! ```

/// Error types, settings, logging, and configuration checks.
pub use formcheck_core as core;

/// Pure string checks, field rules, and per-kind composition.
pub use formcheck_rules as rules;

/// Field registry, event dispatch, submit gating, and presenters.
#[cfg(feature = "dispatch")]
pub use formcheck_dispatch as dispatch;

/// Fake collaborators and assertions for tests.
#[cfg(feature = "testing")]
pub use formcheck_test as test;

// Re-export commonly used third-party crates
pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient glob imports.
///
/// ```
/// use formcheck::prelude::*;
/// ```
pub mod prelude {
    pub use formcheck_core::{FormCheckError, FormCheckResult, Settings};
    pub use formcheck_rules::config::FormConfig;
    pub use formcheck_rules::{
        evaluate_confirm, evaluate_field, FieldKind, FieldRule, Trigger, ValidationResult,
    };

    #[cfg(feature = "dispatch")]
    pub use formcheck_dispatch::{
        attach, EventBus, EventSource, FieldEvent, FieldState, FormValidator, InputSource,
        MarkupPresenter, Presenter, SubmitDecision, SubmitReport,
    };
}
