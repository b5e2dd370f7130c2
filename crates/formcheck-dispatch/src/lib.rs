//! # formcheck-dispatch
//!
//! Field registry and dispatcher for formcheck. A [`FormValidator`] records
//! which rules apply to which fields, re-evaluates them when a field changes,
//! gains or loses focus, or the form is submitted, and forwards every result
//! to a [`Presenter`].
//!
//! The page itself is reached only through collaborator traits: an
//! [`InputSource`] supplies field values and an [`EventSource`] delivers user
//! events. [`EventBus`] and [`MarkupPresenter`] are in-memory implementations
//! that run the whole pipeline headless.
//!
//! ## Usage
//!
//! ```
//! use std::collections::HashMap;
//! use formcheck_dispatch::{FormValidator, InputSource, MarkupPresenter};
//! use formcheck_core::Settings;
//!
//! struct Values(HashMap<String, String>);
//!
//! impl InputSource for Values {
//!     fn value(&self, field_id: &str) -> Option<String> {
//!         self.0.get(field_id).cloned()
//!     }
//! }
//!
//! let values = Values(HashMap::from([("name".to_string(), "x".to_string())]));
//! let presenter = MarkupPresenter::new(Settings::default(), "Send");
//! let mut form = FormValidator::new("contact", values, presenter);
//! form.require_text("name", 1, 30, &[], &[]).unwrap();
//!
//! let report = form.submit();
//! assert!(report.is_blocked());
//! assert!(!form.presenter().submit_enabled());
//! ```

pub mod collaborators;
pub mod events;
pub mod markup;
pub mod registry;
pub mod state;
pub mod validator;

pub use collaborators::{EventSource, FieldHandler, InputSource, Presenter, SubmitHandler};
pub use events::{attach, EventBus, FieldEvent, FieldEventKind, SubmitDecision};
pub use markup::MarkupPresenter;
pub use registry::Registry;
pub use state::FieldState;
pub use validator::{FormValidator, SubmitReport};
