//! An in-memory [`InputSource`] for tests.
//!
//! ## Example
//!
//! ```
//! use formcheck_dispatch::InputSource;
//! use formcheck_test::FakeInputs;
//!
//! let inputs = FakeInputs::new().with("email", "").with_submit_label("Join");
//! let handle = inputs.clone();
//!
//! handle.set("email", "me@example.com");
//! assert_eq!(inputs.value("email").as_deref(), Some("me@example.com"));
//! assert_eq!(inputs.value("missing"), None);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use formcheck_dispatch::InputSource;

#[derive(Debug, Default)]
struct Page {
    values: HashMap<String, String>,
    submit_label: Option<String>,
}

/// Form element values shared between clones.
///
/// An element exists once a value has been set for it, even an empty one.
#[derive(Debug, Clone, Default)]
pub struct FakeInputs {
    page: Arc<RwLock<Page>>,
}

impl FakeInputs {
    /// Creates a page with no elements and no submit label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a page with one empty element per id.
    pub fn with_fields(field_ids: &[&str]) -> Self {
        let inputs = Self::new();
        for id in field_ids {
            inputs.set(id, "");
        }
        inputs
    }

    /// Adds an element with `value`.
    #[must_use]
    pub fn with(self, field_id: &str, value: &str) -> Self {
        self.set(field_id, value);
        self
    }

    /// Sets the label the submit control renders with.
    #[must_use]
    pub fn with_submit_label(self, label: &str) -> Self {
        self.page.write().expect("FakeInputs lock poisoned").submit_label = Some(label.to_string());
        self
    }

    /// Sets the value of `field_id`, creating the element if needed.
    pub fn set(&self, field_id: &str, value: &str) {
        self.page
            .write()
            .expect("FakeInputs lock poisoned")
            .values
            .insert(field_id.to_string(), value.to_string());
    }

    /// Removes the element `field_id` from the page.
    pub fn remove(&self, field_id: &str) {
        self.page
            .write()
            .expect("FakeInputs lock poisoned")
            .values
            .remove(field_id);
    }
}

impl InputSource for FakeInputs {
    fn value(&self, field_id: &str) -> Option<String> {
        self.page
            .read()
            .expect("FakeInputs lock poisoned")
            .values
            .get(field_id)
            .cloned()
    }

    fn submit_label(&self) -> Option<String> {
        self.page
            .read()
            .expect("FakeInputs lock poisoned")
            .submit_label
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_fields_creates_blank_elements() {
        let inputs = FakeInputs::with_fields(&["a", "b"]);
        assert_eq!(inputs.value("a").as_deref(), Some(""));
        assert_eq!(inputs.value("b").as_deref(), Some(""));
        assert!(inputs.submit_label().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let inputs = FakeInputs::new().with("x", "1");
        let other = inputs.clone();
        other.set("x", "2");
        other.remove("y");
        assert_eq!(inputs.value("x").as_deref(), Some("2"));

        other.remove("x");
        assert!(inputs.value("x").is_none());
    }
}
