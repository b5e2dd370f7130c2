//! Visual state of a registered field.

use std::fmt;

use serde::Serialize;

/// What the presenter last showed for a field.
///
/// No state is terminal: every evaluation moves a field between `Valid` and
/// `Invalid`, and blurring a valid field returns it to `Untouched` styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    /// Neither valid nor invalid styling is applied.
    #[default]
    Untouched,
    /// The last shown result had no message.
    Valid,
    /// The last shown result carried a message.
    Invalid,
}

impl FieldState {
    /// The state reached after showing `message`.
    pub fn after_result(message: &str) -> Self {
        if message.is_empty() {
            Self::Valid
        } else {
            Self::Invalid
        }
    }

    /// The state reached after dropping valid styling.
    #[must_use]
    pub const fn after_clear_valid(self) -> Self {
        match self {
            Self::Valid => Self::Untouched,
            other => other,
        }
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untouched => write!(f, "untouched"),
            Self::Valid => write!(f, "valid"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}
