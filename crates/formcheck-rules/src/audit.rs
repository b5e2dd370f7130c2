//! Audits for rules that are structurally valid but can never pass.
//!
//! These are diagnostics, not errors: the dispatcher logs them at
//! registration and keeps the rule.

use std::collections::HashSet;

use formcheck_core::checks::{CheckMessage, CheckRegistry};

use crate::rule::{FieldKind, FieldRule};
use crate::validators::value_length;

/// Returns a registry holding the built-in rule audits.
pub fn rule_checks() -> CheckRegistry<FieldRule> {
    let mut registry = CheckRegistry::new();
    registry.register(check_contradictory_tokens, &["tokens"]);
    registry.register(check_duplicate_tokens, &["tokens"]);
    registry.register(check_required_token_length, &["length", "tokens"]);
    registry.register(check_empty_length_range, &["length"]);
    registry.register(check_password_room, &["length", "password"]);
    registry.register(check_email_tokens, &["tokens", "email"]);
    registry
}

/// Runs every built-in audit against `rule`.
pub fn audit_rule(rule: &FieldRule) -> Vec<CheckMessage> {
    rule_checks().run_checks(None, rule)
}

fn check_contradictory_tokens(rule: &FieldRule) -> Vec<CheckMessage> {
    rule.required_tokens
        .iter()
        .filter(|token| rule.forbidden_tokens.contains(*token))
        .map(|token| {
            CheckMessage::error(
                format!("Token {token:?} is both required and forbidden."),
                Some("Remove it from one of the two lists."),
                Some(rule.field_id.as_str()),
                Some("rules.E001"),
            )
        })
        .collect()
}

fn check_required_token_length(rule: &FieldRule) -> Vec<CheckMessage> {
    rule.required_tokens
        .iter()
        .filter(|token| value_length(token) >= rule.max_length)
        .map(|token| {
            CheckMessage::error(
                format!(
                    "Required token {token:?} does not fit below the exclusive max length {}.",
                    rule.max_length
                ),
                None,
                Some(rule.field_id.as_str()),
                Some("rules.E002"),
            )
        })
        .collect()
}

fn check_empty_length_range(rule: &FieldRule) -> Vec<CheckMessage> {
    if rule.min_length + 1 == rule.max_length {
        vec![CheckMessage::error(
            format!(
                "No length lies strictly between {} and {}.",
                rule.min_length, rule.max_length
            ),
            Some("Both bounds are exclusive; widen the range by at least one."),
            Some(rule.field_id.as_str()),
            Some("rules.E003"),
        )]
    } else {
        Vec::new()
    }
}

fn check_password_room(rule: &FieldRule) -> Vec<CheckMessage> {
    // A capital, a digit and a special character need three characters.
    if rule.kind == FieldKind::Password && rule.max_length <= 3 {
        vec![CheckMessage::error(
            "Password max length leaves no room for a capital, a number and a special character.",
            None,
            Some(rule.field_id.as_str()),
            Some("rules.E004"),
        )]
    } else {
        Vec::new()
    }
}

fn check_email_tokens(rule: &FieldRule) -> Vec<CheckMessage> {
    if rule.kind != FieldKind::Email {
        return Vec::new();
    }
    rule.forbidden_tokens
        .iter()
        .filter(|token| token.as_str() == "@" || token.as_str() == ".")
        .map(|token| {
            CheckMessage::error(
                format!("Email field forbids {token:?}, which every address contains."),
                None,
                Some(rule.field_id.as_str()),
                Some("rules.E005"),
            )
        })
        .collect()
}

fn check_duplicate_tokens(rule: &FieldRule) -> Vec<CheckMessage> {
    let mut messages = Vec::new();
    for (list, name) in [
        (&rule.forbidden_tokens, "forbidden"),
        (&rule.required_tokens, "required"),
    ] {
        let mut seen = HashSet::new();
        for token in list {
            if !seen.insert(token) {
                messages.push(CheckMessage::warning(
                    format!("Token {token:?} appears twice in the {name} list."),
                    Some("Duplicates are reported twice in the feedback message."),
                    Some(rule.field_id.as_str()),
                    Some("rules.W001"),
                ));
            }
        }
    }
    messages
}
