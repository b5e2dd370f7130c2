//! Pure string checks.
//!
//! Every check takes the current value of a field and returns a message
//! fragment. An empty string means the value passes. Fragments end with a
//! trailing space (except the email one) so they can be concatenated into a
//! single feedback message.

use once_cell::sync::Lazy;
use regex::Regex;

static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static SPECIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));
static CAPITAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Message when a value contains no digit.
pub const NUMBER_MESSAGE: &str = "Must contain a number. ";
/// Message when a value contains no special character.
pub const SPECIAL_CHAR_MESSAGE: &str = "Must contain a special character. ";
/// Message when a value contains no capital letter.
pub const CAPITAL_MESSAGE: &str = "Must contain capital letter. ";
/// Message when a value is not shaped like an email address.
pub const EMAIL_MESSAGE: &str = "Is not a proper email";
/// Message when a password and its confirmation differ.
pub const PASSWORD_MATCH_MESSAGE: &str = "Passwords do not match. ";

/// Counts the length of a value the way the bounds are expressed: in
/// characters, not bytes.
pub fn value_length(value: &str) -> usize {
    value.chars().count()
}

/// Checks a value's length against two exclusive bounds.
///
/// Both bounds are themselves invalid: with `exclusive_min = 3` a value of
/// three characters is too short.
///
/// # Examples
///
/// ```
/// use formcheck_rules::validators::length_check;
///
/// assert_eq!(length_check("abc", 3, 10), "Must be longer than 3 characters. ");
/// assert_eq!(length_check("abcd", 3, 10), "");
/// assert_eq!(length_check("abcdefghij", 3, 10), "Must be shorter than 10 characters. ");
/// ```
pub fn length_check(value: &str, exclusive_min: usize, exclusive_max: usize) -> String {
    let len = value_length(value);
    if len <= exclusive_min {
        format!("Must be longer than {exclusive_min} characters. ")
    } else if len >= exclusive_max {
        format!("Must be shorter than {exclusive_max} characters. ")
    } else {
        String::new()
    }
}

/// Reports every forbidden token the value contains, in the order given.
///
/// Whitespace-only tokens (and the empty token, which every value contains)
/// are reported as the word "spaces".
///
/// # Examples
///
/// ```
/// use formcheck_rules::validators::illegal_char_check;
///
/// let forbidden = [" ".to_string(), "@".to_string()];
/// assert_eq!(illegal_char_check("a b@c", &forbidden), "Cannot use: spaces @. ");
/// assert_eq!(illegal_char_check("abc", &forbidden), "");
/// ```
pub fn illegal_char_check<S: AsRef<str>>(value: &str, forbidden: &[S]) -> String {
    let mut violations = String::new();
    for token in forbidden {
        let token = token.as_ref();
        if value.contains(token) {
            violations.push(' ');
            if token.trim().is_empty() {
                violations.push_str("spaces");
            } else {
                violations.push_str(token);
            }
        }
    }
    if violations.is_empty() {
        String::new()
    } else {
        format!("Cannot use:{violations}. ")
    }
}

/// Reports every required token the value lacks, in the order given.
pub fn necessary_char_check<S: AsRef<str>>(value: &str, required: &[S]) -> String {
    let mut missing = String::new();
    for token in required {
        let token = token.as_ref();
        if !value.contains(token) {
            missing.push(' ');
            missing.push_str(token);
        }
    }
    if missing.is_empty() {
        String::new()
    } else {
        format!("Must contain:{missing}. ")
    }
}

/// Passes when the value contains an ASCII digit.
pub fn number_check(value: &str) -> String {
    pass_if(DIGIT_RE.is_match(value), NUMBER_MESSAGE)
}

/// Passes when the value contains a character outside `[A-Za-z0-9]`.
///
/// Underscore counts as special even though it is a word character.
pub fn special_char_check(value: &str) -> String {
    pass_if(SPECIAL_RE.is_match(value), SPECIAL_CHAR_MESSAGE)
}

/// Passes when the value contains an ASCII uppercase letter.
pub fn capital_check(value: &str) -> String {
    pass_if(CAPITAL_RE.is_match(value), CAPITAL_MESSAGE)
}

/// Passes when the value looks like `local@domain.tld` with no whitespace.
pub fn email_check(value: &str) -> String {
    pass_if(EMAIL_RE.is_match(value), EMAIL_MESSAGE)
}

/// Passes when the password and its confirmation are identical.
pub fn password_match_check(value: &str, confirm_value: &str) -> String {
    pass_if(value == confirm_value, PASSWORD_MATCH_MESSAGE)
}

fn pass_if(passes: bool, message: &str) -> String {
    if passes {
        String::new()
    } else {
        message.to_string()
    }
}
