//! Evaluation results and the triggers that produce them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The event that caused a field to be evaluated.
///
/// Input and focus run the live checks; blur extends them with the checks
/// that would be noisy while the user is still typing; submit runs every
/// check regardless of what the live handlers last showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// The field's value changed.
    Input,
    /// The field gained focus.
    Focus,
    /// The field lost focus.
    Blur,
    /// The form is being submitted.
    Submit,
}

impl Trigger {
    /// Returns `true` for triggers that run the full check set.
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Blur | Self::Submit)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Focus => write!(f, "focus"),
            Self::Blur => write!(f, "blur"),
            Self::Submit => write!(f, "submit"),
        }
    }
}

/// The outcome of evaluating one field.
///
/// An empty message means the field is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The evaluated element id.
    pub field_id: String,
    /// Concatenated message fragments; empty when valid.
    pub message: String,
}

impl ValidationResult {
    /// Creates a result for `field_id` carrying `message`.
    pub fn new(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            message: message.into(),
        }
    }

    /// Creates a passing result for `field_id`.
    pub fn valid(field_id: impl Into<String>) -> Self {
        Self::new(field_id, String::new())
    }

    /// Returns `true` if the message is empty.
    pub fn is_valid(&self) -> bool {
        self.message.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_derives_from_message() {
        assert!(ValidationResult::valid("a").is_valid());
        assert!(ValidationResult::new("a", "").is_valid());
        assert!(!ValidationResult::new("a", "Must contain a number. ").is_valid());
    }

    #[test]
    fn test_trigger_completeness() {
        assert!(!Trigger::Input.is_complete());
        assert!(!Trigger::Focus.is_complete());
        assert!(Trigger::Blur.is_complete());
        assert!(Trigger::Submit.is_complete());
    }

    #[test]
    fn test_trigger_serde_names() {
        let json = serde_json::to_string(&Trigger::Blur).unwrap();
        assert_eq!(json, "\"blur\"");
        assert_eq!(Trigger::Focus.to_string(), "focus");
    }
}
