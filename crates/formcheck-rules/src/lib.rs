//! # formcheck-rules
//!
//! Rule evaluator for formcheck. Provides the pure string checks, the
//! [`FieldRule`](rule::FieldRule) configuration type, per-kind composition of
//! checks into [`ValidationResult`](result::ValidationResult)s, declarative
//! rule sets, and configuration audits.
//!
//! Nothing in this crate touches a UI: every function takes the current value
//! of a field and returns a message fragment, empty when the value passes.

pub mod audit;
pub mod config;
pub mod evaluate;
pub mod result;
pub mod rule;
pub mod validators;

pub use evaluate::{evaluate_confirm, evaluate_field};
pub use result::{Trigger, ValidationResult};
pub use rule::{FieldKind, FieldRule};
