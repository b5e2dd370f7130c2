//! Configuration check framework.
//!
//! Checks inspect a piece of configuration (settings, a field rule) and report
//! problems that do not make it structurally invalid but will surprise the
//! person filling in the form: rules that can never pass, class names that
//! collide, and so on.
//!
//! ## Examples
//!
//! ```
//! use formcheck_core::checks::{CheckLevel, CheckRegistry};
//! use formcheck_core::settings::Settings;
//!
//! let registry = CheckRegistry::<Settings>::with_settings_builtins();
//! let mut settings = Settings::default();
//! settings.invalid_class = settings.valid_class.clone();
//!
//! let messages = registry.run_checks(None, &settings);
//! assert!(messages.iter().any(|m| m.level == CheckLevel::Error));
//! ```

use std::fmt;

use crate::settings::Settings;

/// Severity level for a check message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckLevel {
    /// Informational message.
    Info = 1,
    /// A potential problem.
    Warning = 2,
    /// A definite problem: the checked configuration can never behave as intended.
    Error = 3,
}

impl fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A diagnostic message produced by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMessage {
    /// The severity level.
    pub level: CheckLevel,
    /// The human-readable message describing the issue.
    pub msg: String,
    /// An optional hint on how to fix the issue.
    pub hint: Option<String>,
    /// The object (field id, setting name) that has the issue.
    pub obj: Option<String>,
    /// A unique identifier for this check message (e.g. "rules.E001").
    pub id: Option<String>,
}

impl CheckMessage {
    /// Creates a new `CheckMessage` with the given level and details.
    pub fn new(
        level: CheckLevel,
        msg: impl Into<String>,
        hint: Option<&str>,
        obj: Option<&str>,
        id: Option<&str>,
    ) -> Self {
        Self {
            level,
            msg: msg.into(),
            hint: hint.map(String::from),
            obj: obj.map(String::from),
            id: id.map(String::from),
        }
    }

    /// Creates an info-level message.
    pub fn info(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Info, msg, hint, obj, id)
    }

    /// Creates a warning-level message.
    pub fn warning(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Warning, msg, hint, obj, id)
    }

    /// Creates an error-level message.
    pub fn error(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Error, msg, hint, obj, id)
    }

    /// Returns `true` if this is a warning or higher severity.
    pub fn is_serious(&self) -> bool {
        self.level >= CheckLevel::Warning
    }
}

impl fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref id) = self.id {
            write!(f, "({id}) ")?;
        }
        write!(f, "{}: {}", self.level, self.msg)?;
        if let Some(ref hint) = self.hint {
            write!(f, "\n\tHINT: {hint}")?;
        }
        if let Some(ref obj) = self.obj {
            write!(f, "\n\tObject: {obj}")?;
        }
        Ok(())
    }
}

/// A check function over a subject of type `T`.
pub type CheckFn<T> = fn(&T) -> Vec<CheckMessage>;

struct RegisteredCheck<T> {
    func: CheckFn<T>,
    tags: Vec<String>,
}

/// Registry for check functions over one kind of subject.
///
/// Check functions can be registered with tags, and then run all at once
/// or filtered by tag.
pub struct CheckRegistry<T> {
    checks: Vec<RegisteredCheck<T>>,
}

impl<T> CheckRegistry<T> {
    /// Creates a new empty check registry.
    pub const fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Registers a check function with the given tags.
    pub fn register(&mut self, func: CheckFn<T>, tags: &[&str]) {
        self.checks.push(RegisteredCheck {
            func,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        });
    }

    /// Runs all registered checks (or only those matching the given tags)
    /// and collects all resulting messages.
    pub fn run_checks(&self, tags: Option<&[&str]>, subject: &T) -> Vec<CheckMessage> {
        let mut messages = Vec::new();

        for check in &self.checks {
            let should_run = tags.map_or(true, |filter_tags| {
                filter_tags.iter().any(|t| check.tags.iter().any(|own| own == t))
            });

            if should_run {
                messages.extend((check.func)(subject));
            }
        }

        messages
    }

    /// Returns the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl<T> Default for CheckRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckRegistry<Settings> {
    /// Creates a settings check registry pre-loaded with the built-in checks.
    pub fn with_settings_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(check_state_classes, &["presentation"]);
        registry.register(check_feedback_suffix, &["presentation"]);
        registry.register(check_submit_labels, &["submit"]);
        registry
    }
}

// ============================================================
// Built-in settings checks
// ============================================================

fn check_state_classes(settings: &Settings) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    if settings.valid_class == settings.invalid_class {
        messages.push(CheckMessage::error(
            "valid_class and invalid_class are identical; valid and invalid fields look the same.",
            Some("Use distinct class names, e.g. \"is-valid\" and \"is-invalid\"."),
            Some("settings.valid_class"),
            Some("settings.E001"),
        ));
    }
    if settings.valid_class.trim().is_empty() || settings.invalid_class.trim().is_empty() {
        messages.push(CheckMessage::warning(
            "A field state class is empty; that state will have no styling.",
            None,
            Some("settings.invalid_class"),
            Some("settings.W001"),
        ));
    }

    messages
}

fn check_feedback_suffix(settings: &Settings) -> Vec<CheckMessage> {
    if settings.feedback_suffix.is_empty() {
        vec![CheckMessage::error(
            "feedback_suffix is empty; feedback node ids collide with field ids.",
            Some("Use a suffix such as \"-feedback\"."),
            Some("settings.feedback_suffix"),
            Some("settings.E002"),
        )]
    } else {
        Vec::new()
    }
}

fn check_submit_labels(settings: &Settings) -> Vec<CheckMessage> {
    if settings.submit_error_label.trim().is_empty() {
        vec![CheckMessage::warning(
            "submit_error_label is empty; a blocked submit gives no hint why.",
            None,
            Some("settings.submit_error_label"),
            Some("settings.W002"),
        )]
    } else {
        Vec::new()
    }
}
