//! Field and submit events, an in-memory event source, and wiring of a
//! validator to any [`EventSource`].
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use formcheck_dispatch::{EventBus, EventSource, SubmitDecision};
//!
//! let bus = EventBus::new();
//! bus.on_submit("signup", Arc::new(|_form: &str| SubmitDecision::Block));
//! assert_eq!(bus.submit("signup"), SubmitDecision::Block);
//! assert_eq!(bus.submit("other"), SubmitDecision::Proceed);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use formcheck_rules::Trigger;

use crate::collaborators::{EventSource, FieldHandler, InputSource, Presenter, SubmitHandler};
use crate::validator::FormValidator;

/// The kind of a per-field user event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEventKind {
    /// The value changed.
    Input,
    /// The field gained focus.
    Focus,
    /// The field lost focus.
    Blur,
}

impl FieldEventKind {
    /// The evaluation trigger this event maps to.
    pub const fn trigger(self) -> Trigger {
        match self {
            Self::Input => Trigger::Input,
            Self::Focus => Trigger::Focus,
            Self::Blur => Trigger::Blur,
        }
    }
}

impl fmt::Display for FieldEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.trigger().fmt(f)
    }
}

/// A user event on one form element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEvent {
    /// What happened.
    pub kind: FieldEventKind,
    /// The element it happened to.
    pub field_id: String,
}

impl FieldEvent {
    /// Creates an event of `kind` on `field_id`.
    pub fn new(kind: FieldEventKind, field_id: impl Into<String>) -> Self {
        Self {
            kind,
            field_id: field_id.into(),
        }
    }

    /// An input event on `field_id`.
    pub fn input(field_id: impl Into<String>) -> Self {
        Self::new(FieldEventKind::Input, field_id)
    }

    /// A focus event on `field_id`.
    pub fn focus(field_id: impl Into<String>) -> Self {
        Self::new(FieldEventKind::Focus, field_id)
    }

    /// A blur event on `field_id`.
    pub fn blur(field_id: impl Into<String>) -> Self {
        Self::new(FieldEventKind::Blur, field_id)
    }
}

/// Whether a submission goes ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitDecision {
    /// The form is submitted.
    Proceed,
    /// Submission is prevented.
    Block,
}

impl SubmitDecision {
    /// Combines two decisions: any block wins.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Proceed, Self::Proceed) => Self::Proceed,
            _ => Self::Block,
        }
    }
}

/// An in-memory [`EventSource`].
///
/// Handlers are called in subscription order. Emitting an event for which
/// nothing subscribed is a no-op.
#[derive(Default)]
pub struct EventBus {
    field_handlers: RwLock<Vec<(FieldEventKind, String, FieldHandler)>>,
    submit_handlers: RwLock<Vec<(String, SubmitHandler)>>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribe(&self, kind: FieldEventKind, field_id: &str, handler: FieldHandler) {
        self.field_handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((kind, field_id.to_string(), handler));
    }

    /// Delivers `event` to every matching handler and returns how many ran.
    pub fn emit(&self, event: &FieldEvent) -> usize {
        // Handlers run outside the lock so they may subscribe or emit.
        let matching: Vec<FieldHandler> = self
            .field_handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(kind, id, _)| *kind == event.kind && *id == event.field_id)
            .map(|(_, _, handler)| Arc::clone(handler))
            .collect();
        for handler in &matching {
            handler(event);
        }
        matching.len()
    }

    /// Emits an input event on `field_id`.
    pub fn input(&self, field_id: &str) -> usize {
        self.emit(&FieldEvent::input(field_id))
    }

    /// Emits a focus event on `field_id`.
    pub fn focus(&self, field_id: &str) -> usize {
        self.emit(&FieldEvent::focus(field_id))
    }

    /// Emits a blur event on `field_id`.
    pub fn blur(&self, field_id: &str) -> usize {
        self.emit(&FieldEvent::blur(field_id))
    }

    /// Submits `form_id`. Every submit handler runs; the submission proceeds
    /// only if none of them blocks it.
    pub fn submit(&self, form_id: &str) -> SubmitDecision {
        let matching: Vec<SubmitHandler> = self
            .submit_handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(id, _)| id == form_id)
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        matching
            .iter()
            .fold(SubmitDecision::Proceed, |decision, handler| {
                decision.and(handler(form_id))
            })
    }

    /// Returns the number of field and submit handlers subscribed.
    pub fn handler_count(&self) -> usize {
        self.field_handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
            + self
                .submit_handlers
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
    }
}

impl EventSource for EventBus {
    fn on_change(&self, field_id: &str, handler: FieldHandler) {
        self.subscribe(FieldEventKind::Input, field_id, handler);
    }

    fn on_focus(&self, field_id: &str, handler: FieldHandler) {
        self.subscribe(FieldEventKind::Focus, field_id, handler);
    }

    fn on_blur(&self, field_id: &str, handler: FieldHandler) {
        self.subscribe(FieldEventKind::Blur, field_id, handler);
    }

    fn on_submit(&self, form_id: &str, handler: SubmitHandler) {
        self.submit_handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((form_id.to_string(), handler));
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

/// Subscribes a shared validator to `events`.
///
/// Every element id registered so far (fields and confirmation fields) gets
/// change, focus, and blur handlers, and the validator's form gets a submit
/// handler. Rules registered after this call are not wired.
pub fn attach<I, P, E>(validator: &Arc<Mutex<FormValidator<I, P>>>, events: &E)
where
    I: InputSource + Send + 'static,
    P: Presenter + Send + 'static,
    E: EventSource + ?Sized,
{
    let (form_id, field_ids) = {
        let guard = validator.lock().unwrap_or_else(PoisonError::into_inner);
        let ids: Vec<String> = guard.registry().field_ids().map(String::from).collect();
        (guard.form_id().to_string(), ids)
    };

    for field_id in &field_ids {
        events.on_change(field_id, field_handler(validator));
        events.on_focus(field_id, field_handler(validator));
        events.on_blur(field_id, field_handler(validator));
    }

    let shared = Arc::clone(validator);
    events.on_submit(
        &form_id,
        Arc::new(move |_form: &str| {
            shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .submit()
                .decision()
        }),
    );

    tracing::debug!(form_id = %form_id, fields = field_ids.len(), "attached validator to event source");
}

fn field_handler<I, P>(validator: &Arc<Mutex<FormValidator<I, P>>>) -> FieldHandler
where
    I: InputSource + Send + 'static,
    P: Presenter + Send + 'static,
{
    let shared = Arc::clone(validator);
    Arc::new(move |event: &FieldEvent| {
        shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handle(event);
    })
}
