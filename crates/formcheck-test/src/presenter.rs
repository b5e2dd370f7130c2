//! A [`Presenter`] that records every call for later inspection.
//!
//! ## Example
//!
//! ```
//! use formcheck_dispatch::Presenter;
//! use formcheck_test::{PresenterCall, RecordingPresenter};
//!
//! let recorder = RecordingPresenter::new();
//! let mut presenter = recorder.clone();
//! presenter.show_result("name", "");
//!
//! assert_eq!(recorder.calls(), [PresenterCall::show("name", "")]);
//! assert_eq!(recorder.last_message("name").as_deref(), Some(""));
//! ```

use std::sync::{Arc, Mutex};

use formcheck_dispatch::Presenter;

/// One call received by a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    /// `show_result(field_id, message)`.
    ShowResult {
        /// The field.
        field_id: String,
        /// The message shown, empty when valid.
        message: String,
    },
    /// `set_submit_enabled(enabled, label)`.
    SetSubmitEnabled {
        /// Whether the control was enabled.
        enabled: bool,
        /// The label set.
        label: String,
    },
    /// `mark_required(field_id)`.
    MarkRequired(String),
    /// `clear_valid(field_id)`.
    ClearValid(String),
}

impl PresenterCall {
    /// Shorthand for a [`PresenterCall::ShowResult`].
    pub fn show(field_id: &str, message: &str) -> Self {
        Self::ShowResult {
            field_id: field_id.to_string(),
            message: message.to_string(),
        }
    }

    /// Shorthand for a [`PresenterCall::SetSubmitEnabled`].
    pub fn submit(enabled: bool, label: &str) -> Self {
        Self::SetSubmitEnabled {
            enabled,
            label: label.to_string(),
        }
    }
}

/// Records presenter calls in a list shared between clones.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    calls: Arc<Mutex<Vec<PresenterCall>>>,
}

impl RecordingPresenter {
    /// Creates a presenter with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: PresenterCall) {
        self.calls
            .lock()
            .expect("RecordingPresenter lock poisoned")
            .push(call);
    }

    /// Returns every recorded call in order.
    pub fn calls(&self) -> Vec<PresenterCall> {
        self.calls
            .lock()
            .expect("RecordingPresenter lock poisoned")
            .clone()
    }

    /// Returns and forgets every recorded call.
    pub fn take(&self) -> Vec<PresenterCall> {
        std::mem::take(&mut *self.calls.lock().expect("RecordingPresenter lock poisoned"))
    }

    /// Forgets every recorded call.
    pub fn clear(&self) {
        self.calls
            .lock()
            .expect("RecordingPresenter lock poisoned")
            .clear();
    }

    /// Returns the messages shown for `field_id`, oldest first.
    pub fn messages_for(&self, field_id: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PresenterCall::ShowResult { field_id: id, message } if id == field_id => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Returns the most recent message shown for `field_id`.
    pub fn last_message(&self, field_id: &str) -> Option<String> {
        self.messages_for(field_id).pop()
    }

    /// Returns the most recent submit control state as `(enabled, label)`.
    pub fn submit_state(&self) -> Option<(bool, String)> {
        self.calls().into_iter().rev().find_map(|call| match call {
            PresenterCall::SetSubmitEnabled { enabled, label } => Some((enabled, label)),
            _ => None,
        })
    }

    /// Returns the ids marked required, in order.
    pub fn required_fields(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PresenterCall::MarkRequired(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn show_result(&mut self, field_id: &str, message: &str) {
        self.record(PresenterCall::show(field_id, message));
    }

    fn set_submit_enabled(&mut self, enabled: bool, label: &str) {
        self.record(PresenterCall::submit(enabled, label));
    }

    fn mark_required(&mut self, field_id: &str) {
        self.record(PresenterCall::MarkRequired(field_id.to_string()));
    }

    fn clear_valid(&mut self, field_id: &str) {
        self.record(PresenterCall::ClearValid(field_id.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspection_helpers() {
        let recorder = RecordingPresenter::new();
        let mut p = recorder.clone();
        p.mark_required("a");
        p.show_result("a", "Must contain a number. ");
        p.set_submit_enabled(false, "Error");
        p.show_result("a", "");
        p.set_submit_enabled(true, "Go");

        assert_eq!(recorder.messages_for("a"), ["Must contain a number. ", ""]);
        assert_eq!(recorder.submit_state(), Some((true, "Go".to_string())));
        assert_eq!(recorder.required_fields(), ["a"]);
        assert_eq!(recorder.take().len(), 5);
        assert!(recorder.calls().is_empty());
        assert!(recorder.submit_state().is_none());
    }
}
