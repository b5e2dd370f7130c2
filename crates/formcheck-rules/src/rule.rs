//! Field rule definitions.
//!
//! A [`FieldRule`] binds a validation policy to one form field (two for a
//! password and its confirmation). Rules are built with the constructor for
//! their kind and refined with builder methods, or deserialized from a
//! declarative rule set (see [`config`](crate::config)).

use serde::{Deserialize, Serialize};

use formcheck_core::{FormCheckError, FormCheckResult};

/// The kind of input a rule validates. Determines which checks compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A free text input.
    Text,
    /// An email address input.
    Email,
    /// A password input paired with a confirmation input.
    Password,
}

impl FieldKind {
    /// Returns the name of the helper entry point that registers this kind.
    pub const fn entry_point(self) -> &'static str {
        match self {
            Self::Text => "require_text",
            Self::Email => "require_email",
            Self::Password => "register_password",
        }
    }
}

/// Complete definition of a field rule.
///
/// # Examples
///
/// ```
/// use formcheck_rules::rule::FieldRule;
///
/// let rule = FieldRule::password("password", 7, 64, "password-confirm")
///     .forbid([" "])
///     .required(false);
/// assert!(rule.validate().is_ok());
/// assert_eq!(rule.field_ids().collect::<Vec<_>>(), ["password", "password-confirm"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Which checks apply.
    pub kind: FieldKind,
    /// The id of the validated element.
    pub field_id: String,
    /// Exclusive lower length bound.
    pub min_length: usize,
    /// Exclusive upper length bound.
    pub max_length: usize,
    /// Tokens the value must not contain.
    #[serde(default)]
    pub forbidden_tokens: Vec<String>,
    /// Tokens the value must contain.
    #[serde(default)]
    pub required_tokens: Vec<String>,
    /// The confirmation element id (password rules only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_field_id: Option<String>,
    /// Whether a blank password may be submitted (password rules only).
    #[serde(default = "default_required")]
    pub required: bool,
}

const fn default_required() -> bool {
    true
}

impl FieldRule {
    fn new(kind: FieldKind, field_id: impl Into<String>, min_length: usize, max_length: usize) -> Self {
        Self {
            kind,
            field_id: field_id.into(),
            min_length,
            max_length,
            forbidden_tokens: Vec::new(),
            required_tokens: Vec::new(),
            confirm_field_id: None,
            required: true,
        }
    }

    /// Creates a text rule with exclusive length bounds.
    pub fn text(field_id: impl Into<String>, min_length: usize, max_length: usize) -> Self {
        Self::new(FieldKind::Text, field_id, min_length, max_length)
    }

    /// Creates an email rule with exclusive length bounds.
    pub fn email(field_id: impl Into<String>, min_length: usize, max_length: usize) -> Self {
        Self::new(FieldKind::Email, field_id, min_length, max_length)
    }

    /// Creates a password rule paired with a confirmation field.
    pub fn password(
        field_id: impl Into<String>,
        min_length: usize,
        max_length: usize,
        confirm_field_id: impl Into<String>,
    ) -> Self {
        let mut rule = Self::new(FieldKind::Password, field_id, min_length, max_length);
        rule.confirm_field_id = Some(confirm_field_id.into());
        rule
    }

    /// Adds tokens the value must not contain.
    #[must_use]
    pub fn forbid<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Adds tokens the value must contain.
    #[must_use]
    pub fn require<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Sets whether a password must be filled in.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns the confirmation field id, if this is a password rule.
    pub fn confirm_field_id(&self) -> Option<&str> {
        self.confirm_field_id.as_deref()
    }

    /// Returns every element id this rule binds to, the primary field first.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.field_id.as_str()).chain(self.confirm_field_id.as_deref())
    }

    /// Returns `true` if the rule applies to `field_id` (field or confirmation).
    pub fn binds(&self, field_id: &str) -> bool {
        self.field_ids().any(|id| id == field_id)
    }

    /// Returns `true` if all checks are skipped for these values: an
    /// optional password whose field and confirmation are both blank.
    pub fn skips(&self, value: &str, confirm_value: &str) -> bool {
        self.kind == FieldKind::Password && !self.required && value.is_empty() && confirm_value.is_empty()
    }

    /// Checks the structural invariants of the rule.
    ///
    /// - the field id is non-empty;
    /// - `min_length < max_length`;
    /// - a confirmation field is present iff the rule is a password rule,
    ///   and differs from the field itself;
    /// - only password rules may be optional.
    pub fn validate(&self) -> FormCheckResult<()> {
        if self.field_id.is_empty() {
            return Err(FormCheckError::EmptyFieldId);
        }
        if self.min_length >= self.max_length {
            return Err(FormCheckError::InvalidBounds {
                field_id: self.field_id.clone(),
                min: self.min_length,
                max: self.max_length,
            });
        }
        match (self.kind, self.confirm_field_id.as_deref()) {
            (FieldKind::Password, None) => {
                return Err(FormCheckError::MissingConfirmField(self.field_id.clone()));
            }
            (FieldKind::Password, Some("")) => return Err(FormCheckError::EmptyFieldId),
            (FieldKind::Password, Some(confirm)) if confirm == self.field_id => {
                return Err(FormCheckError::DuplicateField(confirm.to_string()));
            }
            (FieldKind::Text | FieldKind::Email, Some(_)) => {
                return Err(FormCheckError::UnexpectedConfirmField(self.field_id.clone()));
            }
            _ => {}
        }
        if self.kind != FieldKind::Password && !self.required {
            return Err(FormCheckError::ConfigurationError(format!(
                "Field '{}': only password fields can be optional",
                self.field_id
            )));
        }
        Ok(())
    }
}
