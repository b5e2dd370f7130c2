//! # formcheck-test
//!
//! Testing support for formcheck. Provides an in-memory input source whose
//! values can be changed between events, a presenter that records every call
//! it receives, and assertion helpers for validation results.
//!
//! Both fakes are cheap to clone and share their state, so a test can keep a
//! handle while the validator owns another.

pub mod assertions;
pub mod inputs;
pub mod presenter;

pub use assertions::{assert_all_valid, assert_invalid, assert_message, assert_valid};
pub use inputs::FakeInputs;
pub use presenter::{PresenterCall, RecordingPresenter};
