//! # formcheck-core
//!
//! Core types, settings, and error types for formcheck.
//! This crate has no dependency on the rule or dispatch crates and provides the
//! foundation for all of them.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Presentation and logging settings
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`checks`] - Diagnostic messages for suspicious configuration
//! - [`logging`] - Tracing-based logging integration

pub mod checks;
pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{FormCheckError, FormCheckResult};
pub use settings::Settings;
