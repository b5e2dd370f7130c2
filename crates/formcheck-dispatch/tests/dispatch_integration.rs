//! Integration tests for the event -> dispatcher -> presenter pipeline.
//!
//! Covers:
//! 1. Submit gating
//! 2. Live events through an `EventBus`
//! 3. Optional passwords
//! 4. Headless markup

use std::sync::{Arc, Mutex};

use formcheck_core::Settings;
use formcheck_dispatch::{
    attach, EventBus, FieldState, FormValidator, MarkupPresenter, SubmitDecision,
};
use formcheck_rules::config::FormConfig;
use formcheck_rules::FieldRule;
use formcheck_test::{
    assert_all_valid, assert_invalid, assert_message, assert_valid, FakeInputs, PresenterCall,
    RecordingPresenter,
};

const ERROR_LABEL: &str = "Error, please check your form";

// ═════════════════════════════════════════════════════════════════════
// Shared helpers
// ═════════════════════════════════════════════════════════════════════

/// A signup page with username, email, and password + confirmation.
fn signup_page() -> FakeInputs {
    FakeInputs::with_fields(&["username", "email", "password", "password2"])
        .with_submit_label("Create account")
}

fn signup_form(
    inputs: &FakeInputs,
    presenter: &RecordingPresenter,
) -> FormValidator<FakeInputs, RecordingPresenter> {
    let mut form = FormValidator::new("signup", inputs.clone(), presenter.clone());
    form.require_text("username", 2, 16, &[" ", "@"], &[]).unwrap();
    form.require_email("email", 5, 64, &[" "], &["@", "."]).unwrap();
    form.register_password("password", 7, 32, &[" "], &[], "password2")
        .unwrap();
    presenter.clear();
    form
}

fn shared_signup(
    inputs: &FakeInputs,
    presenter: &RecordingPresenter,
) -> (Arc<Mutex<FormValidator<FakeInputs, RecordingPresenter>>>, EventBus) {
    let form = Arc::new(Mutex::new(signup_form(inputs, presenter)));
    let bus = EventBus::new();
    attach(&form, &bus);
    (form, bus)
}

// ═════════════════════════════════════════════════════════════════════
// 1. Submit gating
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_invalid_text_and_valid_email_blocks_submit() {
    let inputs = FakeInputs::with_fields(&["name", "email"]);
    let presenter = RecordingPresenter::new();
    let mut form = FormValidator::new("contact", inputs.clone(), presenter.clone());
    form.require_text("name", 2, 20, &[], &[]).unwrap();
    form.require_email("email", 3, 40, &[], &["@"]).unwrap();

    inputs.set("name", "x");
    inputs.set("email", "a@b.com");

    let results = form.evaluate_all();
    assert_invalid(&results, "name");
    assert_valid(&results, "email");

    let report = form.submit();
    assert!(report.is_blocked());
    assert_eq!(presenter.submit_state(), Some((false, ERROR_LABEL.to_string())));
    // Only the failing field is redrawn.
    assert!(presenter.messages_for("email").is_empty());
    assert_eq!(
        presenter.last_message("name").as_deref(),
        Some("Must be longer than 2 characters. ")
    );
}

#[test]
fn test_complete_signup_proceeds() {
    let inputs = signup_page();
    let presenter = RecordingPresenter::new();
    let mut form = signup_form(&inputs, &presenter);

    inputs.set("username", "alice");
    inputs.set("email", "alice@example.com");
    inputs.set("password", "Tr0ub4dor&3");
    inputs.set("password2", "Tr0ub4dor&3");

    let report = form.submit();
    assert!(!report.is_blocked());
    assert_all_valid(report.results());
    assert_eq!(presenter.calls(), [PresenterCall::submit(true, "Create account")]);
}

#[test]
fn test_submit_reports_every_failing_check() {
    let inputs = signup_page();
    let presenter = RecordingPresenter::new();
    let mut form = signup_form(&inputs, &presenter);

    inputs.set("username", "bob smith");
    inputs.set("email", "bob");
    inputs.set("password", "password");
    inputs.set("password2", "passw0rd");

    let report = form.submit();
    let results = report.results();
    assert_message(results, "username", "Cannot use: spaces. ");
    assert_message(
        results,
        "email",
        "Must be longer than 5 characters. Must contain: @ .. Is not a proper email",
    );
    assert_message(
        results,
        "password",
        "Must contain capital letter. Must contain a number. Must contain a special character. ",
    );
    assert_message(results, "password2", "Passwords do not match. ");
    assert_eq!(report.invalid().count(), 4);
}

#[test]
fn test_submit_through_bus_decides() {
    let inputs = signup_page();
    let presenter = RecordingPresenter::new();
    let (form, bus) = shared_signup(&inputs, &presenter);

    assert_eq!(bus.submit("signup"), SubmitDecision::Block);
    assert_eq!(
        form.lock().unwrap().state("username"),
        Some(FieldState::Invalid)
    );

    inputs.set("username", "alice");
    inputs.set("email", "alice@example.com");
    inputs.set("password", "Secr3t!pass");
    inputs.set("password2", "Secr3t!pass");
    assert_eq!(bus.submit("signup"), SubmitDecision::Proceed);
    assert_eq!(
        presenter.submit_state(),
        Some((true, "Create account".to_string()))
    );
}

// ═════════════════════════════════════════════════════════════════════
// 2. Live events through an EventBus
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_attach_subscribes_every_element() {
    let inputs = signup_page();
    let presenter = RecordingPresenter::new();
    let (_form, bus) = shared_signup(&inputs, &presenter);

    // Three events for each of four elements plus one submit handler.
    assert_eq!(bus.handler_count(), 13);
    assert_eq!(bus.input("unknown"), 0);
}

#[test]
fn test_input_after_blocked_submit_reenables_control() {
    let inputs = signup_page();
    let presenter = RecordingPresenter::new();
    let (_form, bus) = shared_signup(&inputs, &presenter);

    bus.submit("signup");
    assert_eq!(presenter.submit_state(), Some((false, ERROR_LABEL.to_string())));

    inputs.set("username", "al");
    assert_eq!(bus.input("username"), 1);
    assert_eq!(
        presenter.submit_state(),
        Some((true, "Create account".to_string()))
    );
    assert_eq!(
        presenter.last_message("username").as_deref(),
        Some("Must be longer than 2 characters. ")
    );
}

#[test]
fn test_live_then_blur_sequence() {
    let inputs = signup_page();
    let presenter = RecordingPresenter::new();
    let (form, bus) = shared_signup(&inputs, &presenter);

    inputs.set("email", "carol@example");
    bus.focus("email");
    bus.input("email");
    assert_eq!(form.lock().unwrap().state("email"), Some(FieldState::Valid));

    bus.blur("email");
    assert_eq!(
        presenter.last_message("email").as_deref(),
        Some("Must contain: .. Is not a proper email")
    );
    assert_eq!(form.lock().unwrap().state("email"), Some(FieldState::Invalid));

    inputs.set("email", "carol@example.org");
    bus.blur("email");
    assert_eq!(
        presenter.calls().last(),
        Some(&PresenterCall::ClearValid("email".to_string()))
    );
    assert_eq!(form.lock().unwrap().state("email"), Some(FieldState::Untouched));
}

#[test]
fn test_password_typing_updates_confirmation() {
    let inputs = signup_page();
    let presenter = RecordingPresenter::new();
    let (_form, bus) = shared_signup(&inputs, &presenter);

    inputs.set("password2", "Secr3t!pass");
    bus.input("password2");
    assert_eq!(
        presenter.last_message("password2").as_deref(),
        Some("Passwords do not match. ")
    );

    inputs.set("password", "Secr3t!pass");
    bus.input("password");
    assert_eq!(presenter.last_message("password").as_deref(), Some(""));
    assert_eq!(presenter.last_message("password2").as_deref(), Some(""));
}

#[test]
fn test_confirm_blur_only_clears_valid() {
    let inputs = signup_page();
    let presenter = RecordingPresenter::new();
    let (_form, bus) = shared_signup(&inputs, &presenter);

    bus.blur("password2");
    assert_eq!(
        presenter.calls(),
        [PresenterCall::ClearValid("password2".to_string())]
    );
}

// ═════════════════════════════════════════════════════════════════════
// 3. Optional passwords
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_optional_password_left_blank() {
    let inputs = FakeInputs::with_fields(&["pw", "pw2"]);
    let presenter = RecordingPresenter::new();
    let mut form = FormValidator::new("profile", inputs.clone(), presenter.clone());
    form.register(FieldRule::password("pw", 7, 32, "pw2").required(false))
        .unwrap();

    assert!(presenter.required_fields().is_empty());
    assert!(!form.submit().is_blocked());

    inputs.set("pw2", "x");
    let report = form.submit();
    assert!(report.is_blocked());
    assert_invalid(report.results(), "pw");
    assert_message(report.results(), "pw2", "Passwords do not match. ");
}

// ═════════════════════════════════════════════════════════════════════
// 4. Headless markup
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_markup_presenter_end_to_end() {
    let toml = r#"
        form_id = "newsletter"

        [[rules]]
        kind = "email"
        field_id = "email"
        min_length = 5
        max_length = 64
        required_tokens = ["@"]
    "#;
    let config = FormConfig::from_toml_str(toml).unwrap();
    let inputs = FakeInputs::with_fields(&["email"]).with_submit_label("Subscribe");
    let presenter = MarkupPresenter::new(Settings::default(), "Subscribe");
    let mut form =
        FormValidator::from_config(config, inputs.clone(), presenter, Settings::default()).unwrap();

    assert!(form.presenter().is_required("email"));

    inputs.set("email", "<b>@xyz");
    assert!(form.submit().is_blocked());
    let markup = form.presenter();
    assert!(!markup.submit_enabled());
    assert_eq!(markup.submit_label(), ERROR_LABEL);
    assert!(markup.has_class("email", "is-invalid"));
    assert_eq!(
        markup.feedback_html("email").unwrap(),
        "<div id=\"email-feedback\" class=\"invalid-feedback\">Is not a proper email</div>"
    );

    inputs.set("email", "dee@example.com");
    form.handle(&formcheck_dispatch::FieldEvent::input("email"));
    let markup = form.presenter();
    assert!(markup.submit_enabled());
    assert_eq!(markup.submit_label(), "Subscribe");
    assert!(markup.has_class("email", "is-valid"));
}
