//! The per-form dispatcher.
//!
//! [`FormValidator`] owns the registry of rules for one form, reads values
//! through an [`InputSource`], and forwards every evaluation to a
//! [`Presenter`]. Live events evaluate only the rule bound to the event's
//! field; [`FormValidator::submit`] re-reads and re-evaluates every rule.

use std::collections::HashMap;

use formcheck_core::checks::{CheckLevel, CheckRegistry};
use formcheck_core::logging::form_span;
use formcheck_core::{FormCheckError, FormCheckResult, Settings};
use formcheck_rules::audit::audit_rule;
use formcheck_rules::config::FormConfig;
use formcheck_rules::{evaluate_confirm, evaluate_field, FieldKind, FieldRule, Trigger, ValidationResult};

use crate::collaborators::{InputSource, Presenter};
use crate::events::{FieldEvent, FieldEventKind, SubmitDecision};
use crate::registry::Registry;
use crate::state::FieldState;

/// Outcome of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    results: Vec<ValidationResult>,
    blocked: bool,
}

impl SubmitReport {
    fn new(results: Vec<ValidationResult>) -> Self {
        let blocked = results.iter().any(|result| !result.is_valid());
        Self { results, blocked }
    }

    /// Every result evaluated, in registration order.
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// Iterates the results that carry a message.
    pub fn invalid(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|result| !result.is_valid())
    }

    /// Returns `true` if the submission was prevented.
    pub const fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// The decision handed back to the event source.
    pub const fn decision(&self) -> SubmitDecision {
        if self.blocked {
            SubmitDecision::Block
        } else {
            SubmitDecision::Proceed
        }
    }
}

/// Field registry and dispatcher for one form.
pub struct FormValidator<I, P> {
    form_id: String,
    input: I,
    presenter: P,
    settings: Settings,
    registry: Registry,
    states: HashMap<String, FieldState>,
    submit_label: String,
    span: tracing::Span,
}

impl<I: InputSource, P: Presenter> FormValidator<I, P> {
    /// Creates a validator with default settings.
    pub fn new(form_id: impl Into<String>, input: I, presenter: P) -> Self {
        Self::with_settings(form_id, input, presenter, Settings::default())
    }

    /// Creates a validator with `settings`.
    ///
    /// The original submit label is taken from the input source when it
    /// reports one, and from `settings.default_submit_label` otherwise.
    pub fn with_settings(form_id: impl Into<String>, input: I, presenter: P, settings: Settings) -> Self {
        let form_id = form_id.into();
        let span = form_span(&form_id);
        let submit_label = input
            .submit_label()
            .unwrap_or_else(|| settings.default_submit_label.clone());

        for message in CheckRegistry::with_settings_builtins().run_checks(None, &settings) {
            tracing::warn!(parent: &span, check = ?message.id, "{message}");
        }

        Self {
            form_id,
            input,
            presenter,
            settings,
            registry: Registry::new(),
            states: HashMap::new(),
            submit_label,
            span,
        }
    }

    /// Creates a validator for `config.form_id` and registers every rule of
    /// `config` in order.
    pub fn from_config(config: FormConfig, input: I, presenter: P, settings: Settings) -> FormCheckResult<Self> {
        config.validate()?;
        let mut validator = Self::with_settings(config.form_id, input, presenter, settings);
        for rule in config.rules {
            validator.register(rule)?;
        }
        Ok(validator)
    }

    /// Registers `rule`.
    ///
    /// Fails without side effects if the rule is malformed, binds an id that
    /// is already registered, or names an element the input source does not
    /// have. Audit findings are logged and do not fail registration.
    pub fn register(&mut self, rule: FieldRule) -> FormCheckResult<()> {
        let _guard = self.span.enter();
        rule.validate()?;

        if let Some(id) = rule.field_ids().find(|id| self.registry.contains(id)) {
            return Err(FormCheckError::DuplicateField(id.to_string()));
        }
        if let Some(id) = rule.field_ids().find(|id| self.input.value(id).is_none()) {
            tracing::error!(field_id = id, "form element not found");
            return Err(FormCheckError::MissingElement(id.to_string()));
        }

        for message in audit_rule(&rule) {
            if message.level >= CheckLevel::Error {
                tracing::warn!(field_id = %rule.field_id, check = ?message.id, "rule can never pass: {message}");
            } else {
                tracing::warn!(field_id = %rule.field_id, check = ?message.id, "{message}");
            }
        }

        let marked = rule.kind != FieldKind::Password || rule.required;
        for id in rule.field_ids() {
            if marked {
                self.presenter.mark_required(id);
            }
            self.states.insert(id.to_string(), FieldState::Untouched);
        }

        tracing::debug!(
            field_id = %rule.field_id,
            kind = rule.kind.entry_point(),
            min = rule.min_length,
            max = rule.max_length,
            "registered field"
        );
        self.registry.push(rule)
    }

    /// Registers a required text field.
    pub fn require_text(
        &mut self,
        field_id: &str,
        min_length: usize,
        max_length: usize,
        forbidden: &[&str],
        required: &[&str],
    ) -> FormCheckResult<()> {
        self.register(
            FieldRule::text(field_id, min_length, max_length)
                .forbid(forbidden.iter().copied())
                .require(required.iter().copied()),
        )
    }

    /// Registers a required email field.
    pub fn require_email(
        &mut self,
        field_id: &str,
        min_length: usize,
        max_length: usize,
        forbidden: &[&str],
        required: &[&str],
    ) -> FormCheckResult<()> {
        self.register(
            FieldRule::email(field_id, min_length, max_length)
                .forbid(forbidden.iter().copied())
                .require(required.iter().copied()),
        )
    }

    /// Registers a required password field paired with `confirm_field_id`.
    ///
    /// Optional passwords are registered with
    /// [`register`](Self::register) and [`FieldRule::required`].
    pub fn register_password(
        &mut self,
        field_id: &str,
        min_length: usize,
        max_length: usize,
        forbidden: &[&str],
        required: &[&str],
        confirm_field_id: &str,
    ) -> FormCheckResult<()> {
        self.register(
            FieldRule::password(field_id, min_length, max_length, confirm_field_id)
                .forbid(forbidden.iter().copied())
                .require(required.iter().copied()),
        )
    }

    /// Evaluates `rule` against the current values for `trigger`.
    ///
    /// Missing elements read as blank.
    pub fn evaluate(&self, rule: &FieldRule, trigger: Trigger) -> Vec<ValidationResult> {
        let value = self.read(&rule.field_id);
        let confirm = rule.confirm_field_id().map(|id| self.read(id));
        evaluate_field(rule, &value, confirm.as_deref(), trigger)
    }

    /// Evaluates every registered rule for submission, in registration order.
    pub fn evaluate_all(&self) -> Vec<ValidationResult> {
        self.registry
            .iter()
            .flat_map(|rule| self.evaluate(rule, Trigger::Submit))
            .collect()
    }

    /// Handles a live event on one element.
    ///
    /// Events on ids no rule binds are ignored.
    pub fn handle(&mut self, event: &FieldEvent) {
        let span = self.span.clone();
        let _guard = span.enter();

        let Some(rule) = self.registry.rule_for(&event.field_id).cloned() else {
            tracing::debug!(field_id = %event.field_id, event = %event.kind, "ignoring event on unregistered field");
            return;
        };
        tracing::trace!(field_id = %event.field_id, event = %event.kind, "handling field event");

        if event.kind == FieldEventKind::Input {
            self.presenter.set_submit_enabled(true, &self.submit_label);
        }

        let value = self.read(&rule.field_id);
        let confirm = rule.confirm_field_id().map(|id| self.read(id));

        if rule.skips(&value, confirm.as_deref().unwrap_or("")) {
            for id in rule.field_ids() {
                self.reset(id);
            }
            return;
        }

        if event.field_id == rule.field_id {
            self.handle_field(&rule, &value, confirm.as_deref(), event.kind);
        } else {
            self.handle_confirm(&rule, &value, confirm.as_deref().unwrap_or(""), event.kind);
        }
    }

    fn handle_field(&mut self, rule: &FieldRule, value: &str, confirm: Option<&str>, kind: FieldEventKind) {
        let results = evaluate_field(rule, value, confirm, kind.trigger());
        match kind {
            FieldEventKind::Input | FieldEventKind::Focus => {
                for result in &results {
                    self.show(result);
                }
            }
            FieldEventKind::Blur => {
                // The confirmation result is not re-shown on blur.
                if let Some(result) = results.first() {
                    self.show(result);
                }
                for id in rule.field_ids() {
                    self.clear_valid(id);
                }
            }
        }
    }

    fn handle_confirm(&mut self, rule: &FieldRule, value: &str, confirm: &str, kind: FieldEventKind) {
        match kind {
            FieldEventKind::Input | FieldEventKind::Focus => {
                if let Some(result) = evaluate_confirm(rule, value, confirm) {
                    self.show(&result);
                }
            }
            FieldEventKind::Blur => {
                if let Some(id) = rule.confirm_field_id() {
                    self.clear_valid(id);
                }
            }
        }
    }

    /// Runs every rule and gates submission on the results.
    ///
    /// Invalid results are shown. Any invalid result blocks the submission
    /// and disables the submit control with the error label; otherwise the
    /// control is enabled with its original label.
    pub fn submit(&mut self) -> SubmitReport {
        let span = self.span.clone();
        let _guard = span.enter();

        let report = SubmitReport::new(self.evaluate_all());
        for result in report.invalid() {
            self.show(result);
        }

        if report.is_blocked() {
            self.presenter
                .set_submit_enabled(false, &self.settings.submit_error_label);
            tracing::info!(invalid = report.invalid().count(), "submission blocked");
        } else {
            self.presenter.set_submit_enabled(true, &self.submit_label);
            tracing::info!(fields = report.results().len(), "submission allowed");
        }
        report
    }

    /// Returns the visual state of `field_id`, or `None` if it is not registered.
    pub fn state(&self, field_id: &str) -> Option<FieldState> {
        self.states.get(field_id).copied()
    }

    /// Returns the id of the form this validator gates.
    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Returns the original label of the submit control.
    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    /// Returns the registered rules.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the input source.
    pub const fn input(&self) -> &I {
        &self.input
    }

    /// Returns the input source mutably.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Returns the presenter.
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Returns the presenter mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn read(&self, field_id: &str) -> String {
        self.input.value(field_id).unwrap_or_default()
    }

    fn show(&mut self, result: &ValidationResult) {
        self.presenter.show_result(&result.field_id, &result.message);
        self.states
            .insert(result.field_id.clone(), FieldState::after_result(&result.message));
    }

    fn clear_valid(&mut self, field_id: &str) {
        self.presenter.clear_valid(field_id);
        if let Some(state) = self.states.get_mut(field_id) {
            *state = state.after_clear_valid();
        }
    }

    fn reset(&mut self, field_id: &str) {
        self.show(&ValidationResult::valid(field_id));
        self.clear_valid(field_id);
    }
}

impl<I, P> std::fmt::Debug for FormValidator<I, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("form_id", &self.form_id)
            .field("registry", &self.registry)
            .field("states", &self.states)
            .field("submit_label", &self.submit_label)
            .finish_non_exhaustive()
    }
}
