//! A headless [`Presenter`] that keeps the markup state a page would show.
//!
//! Each field tracks its state classes, the rendered feedback node, and
//! whether the required marker was inserted. The submit control tracks its
//! enabled flag and label.

use std::collections::BTreeMap;

use formcheck_core::Settings;

use crate::collaborators::Presenter;

/// Markup state of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FieldView {
    classes: Vec<String>,
    feedback: Option<String>,
    required: bool,
}

impl FieldView {
    fn add_class(&mut self, class: &str) {
        if !class.is_empty() && !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}

/// In-memory presenter rendering feedback nodes as HTML fragments.
///
/// # Examples
///
/// ```
/// use formcheck_core::Settings;
/// use formcheck_dispatch::{MarkupPresenter, Presenter};
///
/// let mut presenter = MarkupPresenter::new(Settings::default(), "Send");
/// presenter.show_result("email", "Is not a proper email");
///
/// assert!(presenter.has_class("email", "is-invalid"));
/// assert_eq!(
///     presenter.feedback_html("email").unwrap(),
///     "<div id=\"email-feedback\" class=\"invalid-feedback\">Is not a proper email</div>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MarkupPresenter {
    settings: Settings,
    fields: BTreeMap<String, FieldView>,
    submit_enabled: bool,
    submit_label: String,
}

impl MarkupPresenter {
    /// Creates a presenter whose submit control starts enabled with `submit_label`.
    pub fn new(settings: Settings, submit_label: impl Into<String>) -> Self {
        Self {
            settings,
            fields: BTreeMap::new(),
            submit_enabled: true,
            submit_label: submit_label.into(),
        }
    }

    /// Returns the settings used for class names and node ids.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns `true` if the submit control is enabled.
    pub const fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Returns the submit control's current label.
    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    /// Returns the state classes applied to `field_id`, in application order.
    pub fn classes(&self, field_id: &str) -> &[String] {
        self.fields
            .get(field_id)
            .map_or(&[], |view| view.classes.as_slice())
    }

    /// Returns `true` if `class` is applied to `field_id`.
    pub fn has_class(&self, field_id: &str, class: &str) -> bool {
        self.classes(field_id).iter().any(|c| c == class)
    }

    /// Returns the feedback node currently rendered after `field_id`.
    pub fn feedback_html(&self, field_id: &str) -> Option<&str> {
        self.fields.get(field_id)?.feedback.as_deref()
    }

    /// Returns `true` if the required marker was inserted for `field_id`.
    pub fn is_required(&self, field_id: &str) -> bool {
        self.fields.get(field_id).is_some_and(|view| view.required)
    }

    /// Returns the marker markup inserted before required fields.
    pub fn required_marker(&self) -> &str {
        &self.settings.required_marker
    }

    /// Renders the feedback node for `field_id` showing `message`.
    ///
    /// The node carries the feedback class only when `message` is non-empty.
    pub fn render_feedback(&self, field_id: &str, message: &str) -> String {
        let class = if message.is_empty() {
            ""
        } else {
            self.settings.feedback_class.as_str()
        };
        format!(
            r#"<div id="{}" class="{}">{}</div>"#,
            escape_html(&self.settings.feedback_id(field_id)),
            escape_html(class),
            escape_html(message),
        )
    }

    fn view_mut(&mut self, field_id: &str) -> &mut FieldView {
        self.fields.entry(field_id.to_string()).or_default()
    }
}

impl Presenter for MarkupPresenter {
    fn show_result(&mut self, field_id: &str, message: &str) {
        let feedback = self.render_feedback(field_id, message);
        let (add, remove) = if message.is_empty() {
            (self.settings.valid_class.clone(), self.settings.invalid_class.clone())
        } else {
            (self.settings.invalid_class.clone(), self.settings.valid_class.clone())
        };
        let view = self.view_mut(field_id);
        view.remove_class(&remove);
        view.add_class(&add);
        view.feedback = Some(feedback);
    }

    fn set_submit_enabled(&mut self, enabled: bool, label: &str) {
        self.submit_enabled = enabled;
        label.clone_into(&mut self.submit_label);
    }

    fn mark_required(&mut self, field_id: &str) {
        self.view_mut(field_id).required = true;
    }

    fn clear_valid(&mut self, field_id: &str) {
        let valid = self.settings.valid_class.clone();
        if let Some(view) = self.fields.get_mut(field_id) {
            view.remove_class(&valid);
        }
    }
}

/// Escapes HTML special characters in a string.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
