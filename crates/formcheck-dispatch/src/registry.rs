//! The ordered, append-only list of rules registered on one form.

use std::collections::HashMap;

use formcheck_core::{FormCheckError, FormCheckResult};
use formcheck_rules::FieldRule;

/// Registered rules in registration order, indexed by every element id they
/// bind (including password confirmation fields).
#[derive(Debug, Clone, Default)]
pub struct Registry {
    rules: Vec<FieldRule>,
    by_field: HashMap<String, usize>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Fails if any of its element ids is already bound.
    ///
    /// The rule's own invariants are not checked here.
    pub fn push(&mut self, rule: FieldRule) -> FormCheckResult<()> {
        if let Some(id) = rule.field_ids().find(|id| self.by_field.contains_key(*id)) {
            return Err(FormCheckError::DuplicateField(id.to_string()));
        }
        let index = self.rules.len();
        for id in rule.field_ids() {
            self.by_field.insert(id.to_string(), index);
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Returns the rule bound to `field_id`, either as its field or as its
    /// confirmation field.
    pub fn rule_for(&self, field_id: &str) -> Option<&FieldRule> {
        self.by_field.get(field_id).map(|&i| &self.rules[i])
    }

    /// Returns `true` if some rule binds `field_id`.
    pub fn contains(&self, field_id: &str) -> bool {
        self.by_field.contains_key(field_id)
    }

    /// Iterates rules in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldRule> {
        self.rules.iter()
    }

    /// Iterates every bound element id in registration order.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().flat_map(|rule| rule.field_ids())
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a FieldRule;
    type IntoIter = std::slice::Iter<'a, FieldRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
