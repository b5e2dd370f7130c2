//! Composition of checks per field kind.
//!
//! | Kind     | Input / Focus    | Blur / Submit                                      |
//! |----------|------------------|----------------------------------------------------|
//! | Text     | length, illegal  | + necessary                                        |
//! | Email    | length, illegal  | + necessary, email                                 |
//! | Password | length, illegal  | + necessary, capital, number, special              |
//!
//! A password rule always yields a second result for its confirmation field
//! carrying the match check.

use crate::result::{Trigger, ValidationResult};
use crate::rule::{FieldKind, FieldRule};
use crate::validators::{
    capital_check, email_check, illegal_char_check, length_check, necessary_char_check,
    number_check, password_match_check, special_char_check,
};

/// Evaluates `rule` against the current values.
///
/// Returns one result for text and email rules. Password rules return two:
/// the password field first, then the confirmation field. `confirm_value` is
/// ignored for other kinds and treated as blank when missing.
///
/// An optional password whose field and confirmation are both blank yields
/// two valid results (see [`FieldRule::skips`]).
///
/// # Examples
///
/// ```
/// use formcheck_rules::{evaluate_field, FieldRule, Trigger};
///
/// let rule = FieldRule::email("email", 4, 40).require(["@"]);
/// let results = evaluate_field(&rule, "me@example", None, Trigger::Input);
/// assert!(results[0].is_valid());
///
/// let results = evaluate_field(&rule, "me@example", None, Trigger::Blur);
/// assert_eq!(results[0].message, "Is not a proper email");
/// ```
pub fn evaluate_field(
    rule: &FieldRule,
    value: &str,
    confirm_value: Option<&str>,
    trigger: Trigger,
) -> Vec<ValidationResult> {
    match (rule.kind, rule.confirm_field_id()) {
        (FieldKind::Password, Some(confirm_id)) => {
            let confirm_value = confirm_value.unwrap_or("");
            if rule.skips(value, confirm_value) {
                return vec![
                    ValidationResult::valid(&rule.field_id),
                    ValidationResult::valid(confirm_id),
                ];
            }
            vec![
                ValidationResult::new(&rule.field_id, field_message(rule, value, trigger)),
                ValidationResult::new(confirm_id, password_match_check(value, confirm_value)),
            ]
        }
        _ => vec![ValidationResult::new(
            &rule.field_id,
            field_message(rule, value, trigger),
        )],
    }
}

/// Evaluates only the confirmation side of a password rule.
///
/// Returns `None` when `rule` has no confirmation field.
pub fn evaluate_confirm(
    rule: &FieldRule,
    value: &str,
    confirm_value: &str,
) -> Option<ValidationResult> {
    let confirm_id = rule.confirm_field_id()?;
    let message = if rule.skips(value, confirm_value) {
        String::new()
    } else {
        password_match_check(value, confirm_value)
    };
    Some(ValidationResult::new(confirm_id, message))
}

/// Builds the message for the rule's own field.
///
/// The live part (length, illegal) always comes first; complete triggers
/// append the remaining checks in a fixed order.
pub fn field_message(rule: &FieldRule, value: &str, trigger: Trigger) -> String {
    let mut message = live_message(rule, value);
    if trigger.is_complete() {
        message.push_str(&necessary_char_check(value, &rule.required_tokens));
        match rule.kind {
            FieldKind::Text => {}
            FieldKind::Email => message.push_str(&email_check(value)),
            FieldKind::Password => {
                message.push_str(&capital_check(value));
                message.push_str(&number_check(value));
                message.push_str(&special_char_check(value));
            }
        }
    }
    message
}

fn live_message(rule: &FieldRule, value: &str) -> String {
    let mut message = length_check(value, rule.min_length, rule.max_length);
    message.push_str(&illegal_char_check(value, &rule.forbidden_tokens));
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{
        CAPITAL_MESSAGE, EMAIL_MESSAGE, NUMBER_MESSAGE, PASSWORD_MATCH_MESSAGE,
        SPECIAL_CHAR_MESSAGE,
    };

    fn username_rule() -> FieldRule {
        FieldRule::text("username", 2, 12).forbid([" ", "@"]).require(["_"])
    }

    #[test]
    fn test_text_live_skips_necessary() {
        let results = evaluate_field(&username_rule(), "bob", None, Trigger::Input);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].field_id, "username");
        assert!(results[0].is_valid());
    }

    #[test]
    fn test_text_blur_adds_necessary() {
        let results = evaluate_field(&username_rule(), "bob", None, Trigger::Blur);
        assert_eq!(results[0].message, "Must contain: _. ");
    }

    #[test]
    fn test_text_message_order() {
        let results = evaluate_field(&username_rule(), "b @", None, Trigger::Submit);
        assert_eq!(
            results[0].message,
            "Cannot use: spaces @. Must contain: _. "
        );

        let results = evaluate_field(&username_rule(), "a", None, Trigger::Submit);
        assert_eq!(
            results[0].message,
            "Must be longer than 2 characters. Must contain: _. "
        );
    }

    #[test]
    fn test_email_blur_appends_email_check() {
        let rule = FieldRule::email("email", 3, 40);
        let live = evaluate_field(&rule, "nope", None, Trigger::Focus);
        assert!(live[0].is_valid());

        let blur = evaluate_field(&rule, "nope", None, Trigger::Blur);
        assert_eq!(blur[0].message, EMAIL_MESSAGE);

        let ok = evaluate_field(&rule, "a@b.co", None, Trigger::Submit);
        assert!(ok[0].is_valid());
    }

    #[test]
    fn test_email_ignores_confirm_value() {
        let rule = FieldRule::email("email", 3, 40);
        let results = evaluate_field(&rule, "a@b.co", Some("other"), Trigger::Submit);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_password_live_and_confirm() {
        let rule = FieldRule::password("pw", 4, 30, "pw2");
        let results = evaluate_field(&rule, "secret", Some("secre"), Trigger::Input);
        assert_eq!(results.len(), 2);
        assert!(results[0].is_valid());
        assert_eq!(results[1].field_id, "pw2");
        assert_eq!(results[1].message, PASSWORD_MATCH_MESSAGE);
    }

    #[test]
    fn test_password_complete_checks_in_order() {
        let rule = FieldRule::password("pw", 4, 30, "pw2");
        let results = evaluate_field(&rule, "secret", Some("secret"), Trigger::Submit);
        assert_eq!(
            results[0].message,
            format!("{CAPITAL_MESSAGE}{NUMBER_MESSAGE}{SPECIAL_CHAR_MESSAGE}")
        );
        assert!(results[1].is_valid());

        let strong = evaluate_field(&rule, "Secret1!", Some("Secret1!"), Trigger::Blur);
        assert!(strong.iter().all(ValidationResult::is_valid));
    }

    #[test]
    fn test_password_missing_confirm_value_is_blank() {
        let rule = FieldRule::password("pw", 4, 30, "pw2");
        let results = evaluate_field(&rule, "Secret1!", None, Trigger::Submit);
        assert_eq!(results[1].message, PASSWORD_MATCH_MESSAGE);
    }

    #[test]
    fn test_optional_password_blank_is_skipped() {
        let rule = FieldRule::password("pw", 4, 30, "pw2").required(false);
        let results = evaluate_field(&rule, "", Some(""), Trigger::Submit);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(ValidationResult::is_valid));
    }

    #[test]
    fn test_optional_password_half_filled_runs_everything() {
        let rule = FieldRule::password("pw", 4, 30, "pw2").required(false);
        let results = evaluate_field(&rule, "", Some("x"), Trigger::Submit);
        assert!(results[0].message.starts_with("Must be longer than 4 characters. "));
        assert_eq!(results[1].message, PASSWORD_MATCH_MESSAGE);
    }

    #[test]
    fn test_evaluate_confirm() {
        let rule = FieldRule::password("pw", 4, 30, "pw2");
        let res = evaluate_confirm(&rule, "abc", "abd").unwrap();
        assert_eq!(res.field_id, "pw2");
        assert!(!res.is_valid());
        assert!(evaluate_confirm(&rule, "abc", "abc").unwrap().is_valid());

        assert!(evaluate_confirm(&FieldRule::text("t", 1, 5), "a", "b").is_none());
    }
}
