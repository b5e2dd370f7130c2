//! Collaborator contracts between the dispatcher and the page.
//!
//! The dispatcher never touches markup or event loops directly. It reads
//! values through an [`InputSource`], reports through a [`Presenter`], and is
//! driven by whatever [`EventSource`] the host wires it to.

use std::sync::Arc;

use crate::events::{FieldEvent, SubmitDecision};

/// Read access to the current values of form elements.
pub trait InputSource {
    /// Returns the current value of the element with this id, or `None` if
    /// no such element exists.
    fn value(&self, field_id: &str) -> Option<String>;

    /// Returns the submit control's label as rendered on the page.
    fn submit_label(&self) -> Option<String> {
        None
    }
}

/// Applies evaluation results to on-screen elements.
pub trait Presenter {
    /// Styles the field valid (empty message) or invalid and replaces its
    /// feedback node with `message`.
    fn show_result(&mut self, field_id: &str, message: &str);

    /// Enables or disables the submit control and sets its label.
    fn set_submit_enabled(&mut self, enabled: bool, label: &str);

    /// Marks a field as required (an asterisk before the input).
    fn mark_required(&mut self, _field_id: &str) {}

    /// Drops the valid styling of a field, leaving invalid styling in place.
    fn clear_valid(&mut self, _field_id: &str) {}
}

/// Callback invoked for input, focus, and blur events on one field.
pub type FieldHandler = Arc<dyn Fn(&FieldEvent) + Send + Sync>;

/// Callback invoked when a form is submitted; decides whether it proceeds.
pub type SubmitHandler = Arc<dyn Fn(&str) -> SubmitDecision + Send + Sync>;

/// Event subscription surface of the page.
///
/// Subscriptions last for the lifetime of the source; there is no
/// unsubscribe.
pub trait EventSource {
    /// Subscribes to value changes of `field_id`.
    fn on_change(&self, field_id: &str, handler: FieldHandler);

    /// Subscribes to `field_id` gaining focus.
    fn on_focus(&self, field_id: &str, handler: FieldHandler);

    /// Subscribes to `field_id` losing focus.
    fn on_blur(&self, field_id: &str, handler: FieldHandler);

    /// Subscribes to submission of the form `form_id`.
    fn on_submit(&self, form_id: &str, handler: SubmitHandler);
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn value(&self, field_id: &str) -> Option<String> {
        (**self).value(field_id)
    }

    fn submit_label(&self) -> Option<String> {
        (**self).submit_label()
    }
}

impl<T: Presenter + ?Sized> Presenter for Box<T> {
    fn show_result(&mut self, field_id: &str, message: &str) {
        (**self).show_result(field_id, message);
    }

    fn set_submit_enabled(&mut self, enabled: bool, label: &str) {
        (**self).set_submit_enabled(enabled, label);
    }

    fn mark_required(&mut self, field_id: &str) {
        (**self).mark_required(field_id);
    }

    fn clear_valid(&mut self, field_id: &str) {
        (**self).clear_valid(field_id);
    }
}
