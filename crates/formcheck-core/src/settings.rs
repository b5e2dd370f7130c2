//! Settings for formcheck.
//!
//! [`Settings`] holds the presentation vocabulary used when results are
//! applied to on-screen elements (class names, feedback node suffix, submit
//! labels) together with logging configuration. The defaults follow
//! Bootstrap 4 conventions.

use serde::{Deserialize, Serialize};

/// The complete set of formcheck settings.
///
/// # Examples
///
/// ```
/// use formcheck_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.valid_class, "is-valid");
/// assert_eq!(settings.feedback_id("email"), "email-feedback");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Presentation ─────────────────────────────────────────────────

    /// Class applied to a field whose last result was valid.
    pub valid_class: String,
    /// Class applied to a field whose last result was invalid.
    pub invalid_class: String,
    /// Class of the feedback node when it carries a message.
    pub feedback_class: String,
    /// Suffix appended to a field id to form its feedback node id.
    pub feedback_suffix: String,
    /// Markup inserted before a required field.
    pub required_marker: String,

    // ── Submit control ───────────────────────────────────────────────

    /// Label shown on the disabled submit control after a blocked submit.
    pub submit_error_label: String,
    /// Label used when the input source cannot report the original one.
    pub default_submit_label: String,

    // ── Logging ──────────────────────────────────────────────────────

    /// Log filter directive (e.g. "info", "formcheck_dispatch=debug").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,

            valid_class: "is-valid".to_string(),
            invalid_class: "is-invalid".to_string(),
            feedback_class: "invalid-feedback".to_string(),
            feedback_suffix: "-feedback".to_string(),
            required_marker: "<span class='text-danger'>*</span>".to_string(),

            submit_error_label: "Error, please check your form".to_string(),
            default_submit_label: "Submit".to_string(),

            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Returns the id of the feedback node belonging to `field_id`.
    pub fn feedback_id(&self, field_id: &str) -> String {
        format!("{field_id}{}", self.feedback_suffix)
    }
}
