//! Declarative rule sets.
//!
//! A [`FormConfig`] describes a whole form: its id and the ordered rules to
//! register. It can be written in TOML or JSON:
//!
//! ```toml
//! form_id = "signup"
//!
//! [[rules]]
//! kind = "text"
//! field_id = "username"
//! min_length = 2
//! max_length = 20
//! forbidden_tokens = [" "]
//!
//! [[rules]]
//! kind = "password"
//! field_id = "password"
//! min_length = 7
//! max_length = 64
//! confirm_field_id = "password-confirm"
//! required = false
//! ```
//!
//! Every rule is validated while loading, so a config that loads is safe to
//! register.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use formcheck_core::{FormCheckError, FormCheckResult};

use crate::rule::FieldRule;

/// A form id together with its ordered field rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// The id of the form element.
    pub form_id: String,
    /// Rules in registration order.
    #[serde(default)]
    pub rules: Vec<FieldRule>,
}

impl FormConfig {
    /// Creates an empty config for `form_id`.
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            rules: Vec::new(),
        }
    }

    /// Appends a rule.
    #[must_use]
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Parses and validates a TOML rule set.
    pub fn from_toml_str(toml_str: &str) -> FormCheckResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| {
            FormCheckError::ConfigurationError(format!("Failed to parse form TOML: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON rule set.
    pub fn from_json_str(json_str: &str) -> FormCheckResult<Self> {
        let config: Self = serde_json::from_str(json_str).map_err(|e| {
            FormCheckError::ConfigurationError(format!("Failed to parse form JSON: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a rule set from a file, picking the format from its extension
    /// (`.toml` or `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> FormCheckResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(FormCheckError::ConfigurationError(format!(
                "Unsupported form config extension {other:?} for '{}'",
                path.display()
            ))),
        }
    }

    /// Serializes the rule set to pretty TOML.
    pub fn to_toml_string(&self) -> FormCheckResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            FormCheckError::ConfigurationError(format!("Failed to serialize form TOML: {e}"))
        })
    }

    /// Validates every rule and rejects element ids bound more than once.
    pub fn validate(&self) -> FormCheckResult<()> {
        if self.form_id.is_empty() {
            return Err(FormCheckError::ConfigurationError(
                "form_id must not be empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for rule in &self.rules {
            rule.validate()?;
            for id in rule.field_ids() {
                if !seen.insert(id) {
                    return Err(FormCheckError::DuplicateField(id.to_string()));
                }
            }
        }
        Ok(())
    }
}
