//! Error types for formcheck.
//!
//! Only configuration problems are errors. A field that fails its rules is
//! reported as a message through the presenter, never as an `Err`.

use thiserror::Error;

/// The primary error type for formcheck.
///
/// Every variant describes something wrong with how a form was set up:
/// malformed rules, ids that do not resolve to an element, or settings that
/// could not be read.
#[derive(Error, Debug)]
pub enum FormCheckError {
    // ── Rule configuration ───────────────────────────────────────────

    /// The exclusive length bounds are not ordered.
    #[error("Invalid bounds for '{field_id}': min length {min} must be less than max length {max}")]
    InvalidBounds {
        /// The field the rule is bound to.
        field_id: String,
        /// The exclusive lower bound.
        min: usize,
        /// The exclusive upper bound.
        max: usize,
    },

    /// A password rule was declared without a confirmation field.
    #[error("Password field '{0}' requires a confirmation field")]
    MissingConfirmField(String),

    /// A non-password rule carried a confirmation field.
    #[error("Field '{0}' is not a password field and cannot have a confirmation field")]
    UnexpectedConfirmField(String),

    /// The same element id was registered more than once.
    #[error("Field '{0}' is already registered")]
    DuplicateField(String),

    /// A rule has an empty field id.
    #[error("Field id must not be empty")]
    EmptyFieldId,

    // ── Collaborator boundary ────────────────────────────────────────

    /// The input source has no element with this id.
    #[error("No element found for field '{0}'")]
    MissingElement(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormCheckError {
    /// Returns the id of the field this error concerns, if any.
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Self::InvalidBounds { field_id, .. } => Some(field_id),
            Self::MissingConfirmField(id)
            | Self::UnexpectedConfirmField(id)
            | Self::DuplicateField(id)
            | Self::MissingElement(id) => Some(id),
            Self::EmptyFieldId | Self::ConfigurationError(_) | Self::IoError(_) => None,
        }
    }
}

/// A convenience type alias for `Result<T, FormCheckError>`.
pub type FormCheckResult<T> = Result<T, FormCheckError>;
