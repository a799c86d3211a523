// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The form: a value bag, an error map, and the checks that connect them.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use futures::future::{self, LocalBoxFuture};
use understory_props::{ClassPrefix, Controlled};

use crate::{CheckResult, FormError, FormValue, RuleError, SchemaModel};

/// When descendant fields check themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CheckTrigger {
    /// After each change, delayed by [`FormProps::check_delay`].
    #[default]
    Change,
    /// When the field loses focus.
    Blur,
    /// Only through explicit checks.
    None,
}

/// Label and control arrangement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Layout {
    /// Labels beside controls.
    Horizontal,
    /// Labels above controls.
    #[default]
    Vertical,
    /// Fields on one line.
    Inline,
}

impl Layout {
    /// The class-name token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Inline => "inline",
        }
    }
}

/// Form configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct FormProps<V = serde_json::Value, M = String> {
    /// Arrangement of fields.
    pub layout: Layout,
    /// Stretch fields to the container width (vertical layout only).
    pub fluid: bool,
    /// When fields check themselves.
    pub check_trigger: CheckTrigger,
    /// Delay before a change-triggered check, in milliseconds.
    pub check_delay: u64,
    /// Whether fields display their error from the form.
    pub error_from_context: bool,
    /// Fields show values but accept no edits.
    pub read_only: bool,
    /// Fields render as plain text.
    pub plaintext: bool,
    /// Component class prefix, under the `rs` namespace.
    pub class_prefix: String,
    /// Initial values when uncontrolled.
    pub form_default_value: FormValue<V>,
    /// Host-controlled values.
    pub form_value: Option<FormValue<V>>,
    /// Host-controlled errors; also the initial errors.
    pub form_error: Option<FormError<M>>,
}

impl<V, M> Default for FormProps<V, M> {
    fn default() -> Self {
        Self {
            layout: Layout::Vertical,
            fluid: false,
            check_trigger: CheckTrigger::Change,
            check_delay: 500,
            error_from_context: true,
            read_only: false,
            plaintext: false,
            class_prefix: String::from("form"),
            form_default_value: FormValue::new(),
            form_value: None,
            form_error: None,
        }
    }
}

/// A native submit event.
pub trait SubmitEvent {
    /// Suppress the host's default submission.
    fn prevent_default(&mut self);
    /// Stop the event reaching enclosing forms.
    fn stop_propagation(&mut self);
}

/// Callbacks fired by a [`Form`].
pub struct FormCallbacks<V = serde_json::Value, M = String, E = ()> {
    /// A field changed; receives the whole next value bag and the field's event.
    pub on_change: Option<Box<dyn FnMut(&FormValue<V>, &E)>>,
    /// A check found at least one failed field.
    pub on_error: Option<Box<dyn FnMut(&FormError<M>)>>,
    /// A check completed.
    pub on_check: Option<Box<dyn FnMut(&FormError<M>)>>,
    /// The form was submitted; receives whether it passed.
    pub on_submit: Option<Box<dyn FnMut(bool, &mut dyn SubmitEvent)>>,
}

impl<V, M, E> Default for FormCallbacks<V, M, E> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_error: None,
            on_check: None,
            on_submit: None,
        }
    }
}

impl<V, M, E> fmt::Debug for FormCallbacks<V, M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormCallbacks")
            .field("on_change", &self.on_change.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_check", &self.on_check.is_some())
            .field("on_submit", &self.on_submit.is_some())
            .finish()
    }
}

/// Outcome of [`Form::check_async`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsyncCheckResult<M = String> {
    /// Whether any field failed.
    pub has_error: bool,
    /// Failed fields and their messages.
    pub form_error: FormError<M>,
}

/// Every field's settled result, produced by [`Form::begin_check_async`].
#[derive(Debug)]
pub struct SettledChecks<M = String> {
    results: Vec<(String, Result<CheckResult<M>, RuleError>)>,
}

/// One field's settled result, produced by [`Form::begin_check_for_field_async`].
#[derive(Debug)]
pub struct SettledField<M = String> {
    field: String,
    result: Result<CheckResult<M>, RuleError>,
}

/// Form state.
///
/// Values change only through [`Form::handle_field_change`]; errors change only
/// through checks and the error methods. Either may be controlled by the host,
/// in which case reads return the host's copy and writes land in the internal
/// copy only.
pub struct Form<V = serde_json::Value, M = String, E = ()> {
    props: FormProps<V, M>,
    model: SchemaModel<V, M>,
    callbacks: FormCallbacks<V, M, E>,
    form_value: Controlled<FormValue<V>>,
    form_error: Controlled<FormError<M>>,
    classes: ClassPrefix,
}

impl<V: fmt::Debug, M: fmt::Debug, E> fmt::Debug for Form<V, M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("props", &self.props)
            .field("model", &self.model)
            .field("callbacks", &self.callbacks)
            .field("form_value", &self.form_value)
            .field("form_error", &self.form_error)
            .field("classes", &self.classes)
            .finish()
    }
}

impl<V: Clone, M: Clone + Default + From<String>, E> Form<V, M, E> {
    /// Create a form checking values against `model`.
    pub fn new(
        props: FormProps<V, M>,
        model: SchemaModel<V, M>,
        callbacks: FormCallbacks<V, M, E>,
    ) -> Self {
        let form_value =
            Controlled::new(props.form_value.clone(), props.form_default_value.clone());
        let form_error = Controlled::new(
            props.form_error.clone(),
            props.form_error.clone().unwrap_or_default(),
        );
        let classes = ClassPrefix::new(&props.class_prefix);
        Self {
            props,
            model,
            callbacks,
            form_value,
            form_error,
            classes,
        }
    }

    /// The configuration.
    pub fn props(&self) -> &FormProps<V, M> {
        &self.props
    }

    /// The schema.
    pub fn model(&self) -> &SchemaModel<V, M> {
        &self.model
    }

    /// Replace the schema.
    pub fn set_model(&mut self, model: SchemaModel<V, M>) {
        self.model = model;
    }

    /// Supply or remove the host-controlled values.
    pub fn set_form_value_prop(&mut self, value: Option<FormValue<V>>) {
        self.props.form_value.clone_from(&value);
        self.form_value.set_prop(value);
    }

    /// Supply or remove the host-controlled errors.
    pub fn set_form_error_prop(&mut self, error: Option<FormError<M>>) {
        self.props.form_error.clone_from(&error);
        self.form_error.set_prop(error);
    }

    /// The effective values: the host's when controlled.
    pub fn get_form_value(&self) -> &FormValue<V> {
        self.form_value.get()
    }

    /// The effective errors: the host's when controlled.
    pub fn get_form_error(&self) -> &FormError<M> {
        self.form_error.get()
    }

    /// The error a field should display, if fields read errors from the form.
    pub fn field_error(&self, field: &str) -> Option<&M> {
        if !self.props.error_from_context {
            return None;
        }
        self.get_form_error().message(field)
    }

    /// Check every schema field. Returns whether all passed.
    ///
    /// The new error map holds only failed fields. `on_check` sees it first, then
    /// `on_error` when anything failed.
    pub fn check(&mut self) -> bool {
        self.check_with(|_| {})
    }

    /// [`Form::check`], handing the new error map to `callback` after `on_check`
    /// and before `on_error`.
    pub fn check_with(&mut self, callback: impl FnOnce(&FormError<M>)) -> bool {
        let value = self.get_form_value();
        let mut form_error = FormError::new();
        let mut error_count = 0_usize;
        for (field, result) in self.model.check(value) {
            if result.has_error {
                error_count += 1;
                form_error.insert(field, Some(result.error_message.unwrap_or_default()));
            }
        }
        log::debug!("form check: {error_count} failed field(s)");

        self.form_error.set(form_error.clone());
        if let Some(on_check) = &mut self.callbacks.on_check {
            on_check(&form_error);
        }
        callback(&form_error);
        if error_count > 0 {
            if let Some(on_error) = &mut self.callbacks.on_error {
                on_error(&form_error);
            }
        }
        error_count == 0
    }

    /// Check one field and merge its result into the error map. Returns whether it
    /// passed.
    ///
    /// Other fields' entries are untouched. A pass records the field as checked.
    pub fn check_for_field(&mut self, field: &str) -> bool {
        self.check_for_field_with(field, |_| {})
    }

    /// [`Form::check_for_field`], handing the field's result to `callback` last.
    pub fn check_for_field_with(
        &mut self,
        field: &str,
        callback: impl FnOnce(&CheckResult<M>),
    ) -> bool {
        let value = self.get_form_value();
        let result = self.model.check_for_field(field, value.get(field), value);
        self.merge_field_result(field, &result);
        callback(&result);
        !result.has_error
    }

    fn merge_field_result(&mut self, field: &str, result: &CheckResult<M>) {
        let mut form_error = self.get_form_error().clone();
        let message = if result.has_error {
            Some(result.error_message.clone().unwrap_or_default())
        } else {
            None
        };
        form_error.insert(field, message);
        log::debug!("field `{field}` checked: has_error = {}", result.has_error);

        if let Some(on_check) = &mut self.callbacks.on_check {
            on_check(&form_error);
        }
        if result.has_error {
            if let Some(on_error) = &mut self.callbacks.on_error {
                on_error(&form_error);
            }
        }
        self.form_error.set(form_error);
    }

    /// Remove every error entry.
    pub fn clean_errors(&mut self) {
        self.clean_errors_with(|_| {});
    }

    /// [`Form::clean_errors`], then hand the effective errors to `callback`.
    pub fn clean_errors_with(&mut self, callback: impl FnOnce(&FormError<M>)) {
        self.form_error.set(FormError::new());
        callback(self.get_form_error());
    }

    /// Delete `field`'s entry from the internal error map.
    ///
    /// The entry is removed, not marked as passed. The spelling is kept for
    /// existing callers; see [`Form::clean_error_for_field`].
    pub fn clean_error_for_filed(&mut self, field: &str) {
        self.clean_error_for_field_with(field, |_| {});
    }

    /// Delete `field`'s entry from the internal error map.
    pub fn clean_error_for_field(&mut self, field: &str) {
        self.clean_error_for_field_with(field, |_| {});
    }

    /// [`Form::clean_error_for_field`], then hand the effective errors to `callback`.
    pub fn clean_error_for_field_with(
        &mut self,
        field: &str,
        callback: impl FnOnce(&FormError<M>),
    ) {
        self.form_error.update(|errors| {
            errors.remove(field);
        });
        callback(self.get_form_error());
    }

    /// Replace the error map, for example with server-side results.
    pub fn reset_errors(&mut self, form_error: FormError<M>) {
        self.reset_errors_with(form_error, |_| {});
    }

    /// [`Form::reset_errors`], then hand the effective errors to `callback`.
    pub fn reset_errors_with(
        &mut self,
        form_error: FormError<M>,
        callback: impl FnOnce(&FormError<M>),
    ) {
        self.form_error.set(form_error);
        callback(self.get_form_error());
    }

    /// Write one field's value and report the next value bag through `on_change`.
    pub fn handle_field_change(&mut self, field: &str, value: V, event: &E) {
        let mut next = self.get_form_value().clone();
        next.insert(field.to_string(), value);
        self.form_value.set(next.clone());
        if let Some(on_change) = &mut self.callbacks.on_change {
            on_change(&next, event);
        }
    }

    /// Record a failure reported by a field.
    pub fn handle_field_error(&mut self, field: &str, message: M) {
        let mut form_error = self.get_form_error().clone();
        form_error.insert(field, Some(message));
        if let Some(on_error) = &mut self.callbacks.on_error {
            on_error(&form_error);
        }
        if let Some(on_check) = &mut self.callbacks.on_check {
            on_check(&form_error);
        }
        self.form_error.set(form_error);
    }

    /// Clear a field's entry after it reported success.
    pub fn handle_field_success(&mut self, field: &str) {
        let mut form_error = self.get_form_error().clone();
        form_error.remove(field);
        if let Some(on_check) = &mut self.callbacks.on_check {
            on_check(&form_error);
        }
        self.form_error.set(form_error);
    }

    /// Intercept a submission: suppress the event, [`check`](Form::check), and
    /// report the outcome through `on_submit`.
    ///
    /// Async rules are not awaited here.
    pub fn handle_submit(&mut self, event: &mut dyn SubmitEvent) -> bool {
        event.prevent_default();
        event.stop_propagation();
        let passed = self.check();
        if let Some(on_submit) = &mut self.callbacks.on_submit {
            on_submit(passed, event);
        }
        passed
    }

    /// Class names: base, layout, and `fluid` or `fixed-width`.
    pub fn class_names(&self) -> Vec<String> {
        let width = if self.props.fluid && self.props.layout == Layout::Vertical {
            "fluid"
        } else {
            "fixed-width"
        };
        let mut classes = self.classes.with_modifiers(&[
            (self.props.layout.as_str(), true),
            (width, true),
        ]);
        if self.props.read_only {
            classes.push(self.classes.prefix("read-only"));
        }
        if self.props.plaintext {
            classes.push(self.classes.prefix("plaintext"));
        }
        classes
    }
}

impl<V, M, E> Form<V, M, E>
where
    V: Clone + 'static,
    M: Clone + Default + From<String> + 'static,
{
    /// Start every schema field's check. The future owns its inputs and does not
    /// borrow the form.
    ///
    /// Fields settle independently; the join waits for all of them, and a
    /// rejected rule does not cut the others short. Pass the output to
    /// [`Form::settle_check_async`].
    pub fn begin_check_async(&self) -> LocalBoxFuture<'static, SettledChecks<M>> {
        let value = self.get_form_value();
        let (fields, pending): (Vec<_>, Vec<_>) = self
            .model
            .keys()
            .map(|field| {
                let check = self.model.check_for_field_async(field, value.get(field), value);
                (String::from(field), check)
            })
            .unzip();
        Box::pin(async move {
            let settled = future::join_all(pending).await;
            SettledChecks {
                results: fields.into_iter().zip(settled).collect(),
            }
        })
    }

    /// Apply a full async check's results.
    ///
    /// A rejected rule counts as a failed field whose message is the rejection
    /// text. `on_check` fires first, then `on_error` when anything failed, then the
    /// error map is stored.
    pub fn settle_check_async(&mut self, settled: SettledChecks<M>) -> AsyncCheckResult<M> {
        let mut form_error = FormError::new();
        for (field, result) in settled.results {
            match result {
                Ok(result) if result.has_error => {
                    form_error.insert(field, Some(result.error_message.unwrap_or_default()));
                }
                Ok(_) => {}
                Err(err) => {
                    log::warn!("rule for field `{field}` did not settle: {err}");
                    form_error.insert(field, Some(M::from(err.to_string())));
                }
            }
        }
        let has_error = form_error.error_count() > 0;
        log::debug!("async form check settled: has_error = {has_error}");

        if let Some(on_check) = &mut self.callbacks.on_check {
            on_check(&form_error);
        }
        if has_error {
            if let Some(on_error) = &mut self.callbacks.on_error {
                on_error(&form_error);
            }
        }
        self.form_error.set(form_error.clone());
        AsyncCheckResult {
            has_error,
            form_error,
        }
    }

    /// Check every schema field, awaiting async rules.
    ///
    /// This holds `&mut self` while rules are pending. Use a
    /// [`FormHandle`](crate::FormHandle) to let other work reach the form meanwhile.
    pub async fn check_async(&mut self) -> AsyncCheckResult<M> {
        let settled = self.begin_check_async().await;
        self.settle_check_async(settled)
    }

    /// Start one field's check; see [`Form::begin_check_async`].
    pub fn begin_check_for_field_async(
        &self,
        field: &str,
    ) -> LocalBoxFuture<'static, SettledField<M>> {
        let value = self.get_form_value();
        let check = self.model.check_for_field_async(field, value.get(field), value);
        let field = String::from(field);
        Box::pin(async move {
            SettledField {
                field,
                result: check.await,
            }
        })
    }

    /// Merge one field's async result into the error map, as
    /// [`Form::check_for_field`] does.
    ///
    /// A rejection leaves the error map untouched and is returned as is.
    pub fn settle_check_for_field_async(
        &mut self,
        settled: SettledField<M>,
    ) -> Result<CheckResult<M>, RuleError> {
        let result = settled.result?;
        self.merge_field_result(&settled.field, &result);
        Ok(result)
    }

    /// Check one field, awaiting async rules.
    pub async fn check_for_field_async(
        &mut self,
        field: &str,
    ) -> Result<CheckResult<M>, RuleError> {
        let settled = self.begin_check_for_field_async(field).await;
        self.settle_check_for_field_async(settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NumberType, StringType, rule_fn};
    use alloc::{format, rc::Rc, vec};
    use core::cell::RefCell;
    use serde_json::{Value, json};

    fn values(entries: &[(&str, Value)]) -> FormValue {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn model() -> SchemaModel {
        SchemaModel::new()
            .with("name", StringType::new(None).is_required(Some("name required")))
            .with("age", NumberType::new(Some("age must be a number")))
    }

    fn form_with(value: FormValue) -> Form {
        Form::new(
            FormProps {
                form_default_value: value,
                ..FormProps::default()
            },
            model(),
            FormCallbacks::default(),
        )
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn logging_callbacks(log: &Log) -> FormCallbacks {
        let on_check = Rc::clone(log);
        let on_error = Rc::clone(log);
        FormCallbacks {
            on_check: Some(Box::new(move |e: &FormError| {
                on_check.borrow_mut().push(format!("check:{}", e.error_count()));
            })),
            on_error: Some(Box::new(move |e: &FormError| {
                on_error.borrow_mut().push(format!("error:{}", e.error_count()));
            })),
            ..FormCallbacks::default()
        }
    }

    #[test]
    fn check_is_idempotent() {
        let mut form = form_with(values(&[("age", json!("abc"))]));
        assert!(!form.check());
        let first = form.get_form_error().clone();
        assert!(!form.check());
        assert_eq!(&first, form.get_form_error());
    }

    #[test]
    fn check_keys_are_schema_fields() {
        let mut form = form_with(values(&[("age", json!("x")), ("extra", json!(1))]));
        form.check();
        for (field, _) in form.get_form_error() {
            assert!(form.model().keys().any(|k| k == field), "{field} not in schema");
        }
        assert_eq!(form.get_form_error().len(), 2);
    }

    #[test]
    fn check_callbacks_in_order() {
        let log: Log = Rc::default();
        let mut form = Form::new(FormProps::default(), model(), logging_callbacks(&log));
        let seen = Rc::clone(&log);
        assert!(!form.check_with(|e| seen.borrow_mut().push(format!("callback:{}", e.len()))));
        assert_eq!(*log.borrow(), ["check:1", "callback:1", "error:1"]);

        log.borrow_mut().clear();
        form.handle_field_change("name", json!("Ada"), &());
        assert!(form.check());
        assert_eq!(*log.borrow(), ["check:0"]);
    }

    #[test]
    fn field_check_leaves_other_fields_alone() {
        let mut form = form_with(values(&[("name", json!("Ada"))]));
        form.reset_errors([("age", "server says no".to_string())].into_iter().collect());
        assert!(form.check_for_field("name"));
        let errors = form.get_form_error();
        assert_eq!(errors.message("age").map(String::as_str), Some("server says no"));
        assert!(errors.contains_key("name"));
        assert!(!errors.has_error("name"));
    }

    #[test]
    fn field_check_notifies_before_callback() {
        let log: Log = Rc::default();
        let mut form = Form::new(FormProps::default(), model(), logging_callbacks(&log));
        let seen = Rc::clone(&log);
        let passed = form.check_for_field_with("name", |r| {
            seen.borrow_mut().push(format!("callback:{}", r.has_error));
        });
        assert!(!passed);
        assert_eq!(*log.borrow(), ["check:1", "error:1", "callback:true"]);
    }

    #[test]
    fn clean_error_deletes_the_key() {
        let mut form = form_with(FormValue::new());
        form.check();
        assert!(form.get_form_error().contains_key("name"));
        form.clean_error_for_filed("name");
        assert!(!form.get_form_error().contains_key("name"));

        form.check_for_field("age");
        form.clean_error_for_field("age");
        assert!(form.get_form_error().is_empty());

        form.check();
        form.clean_errors();
        assert!(form.get_form_error().is_empty());
    }

    #[test]
    fn error_callbacks_see_the_updated_map() {
        let mut form = form_with(FormValue::new());
        let seen: Log = Rc::default();

        let sink = Rc::clone(&seen);
        form.reset_errors_with(
            [("age", "server says no".to_string())].into_iter().collect(),
            |e| sink.borrow_mut().push(format!("reset:{}", e.error_count())),
        );
        form.check_for_field("name");
        assert_eq!(form.get_form_error().error_count(), 2);

        let sink = Rc::clone(&seen);
        form.clean_error_for_field_with("name", |e| {
            sink.borrow_mut().push(format!("field:{}:{}", e.contains_key("name"), e.len()));
        });
        let sink = Rc::clone(&seen);
        form.clean_errors_with(|e| sink.borrow_mut().push(format!("all:{}", e.len())));

        assert_eq!(*seen.borrow(), ["reset:1", "field:false:1", "all:0"]);
        assert!(form.get_form_error().is_empty());
    }

    #[test]
    fn controlled_value_wins() {
        let mut form = form_with(values(&[("name", json!("internal"))]));
        form.set_form_value_prop(Some(values(&[("name", json!("host"))])));
        form.handle_field_change("name", json!("typed"), &());
        assert_eq!(form.get_form_value()["name"], json!("host"));

        form.set_form_value_prop(Some(values(&[("name", json!("host 2"))])));
        assert_eq!(form.get_form_value()["name"], json!("host 2"));

        form.set_form_value_prop(None);
        assert_eq!(form.get_form_value()["name"], json!("typed"));
    }

    #[test]
    fn field_change_reports_next_value() {
        let seen: Rc<RefCell<Option<FormValue>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let mut form: Form<Value, String, u32> = Form::new(
            FormProps::default(),
            model(),
            FormCallbacks {
                on_change: Some(Box::new(move |v: &FormValue, event: &u32| {
                    assert_eq!(*event, 7, "event is passed through");
                    *sink.borrow_mut() = Some(v.clone());
                })),
                ..FormCallbacks::default()
            },
        );
        form.handle_field_change("age", json!(3), &7);
        assert_eq!(*seen.borrow(), Some(values(&[("age", json!(3))])));
    }

    #[test]
    fn field_error_and_success() {
        let log: Log = Rc::default();
        let mut form = Form::new(FormProps::default(), model(), logging_callbacks(&log));
        form.handle_field_error("name", "taken".into());
        assert!(form.get_form_error().has_error("name"));
        form.handle_field_success("name");
        assert!(!form.get_form_error().contains_key("name"));
        assert_eq!(*log.borrow(), ["error:1", "check:1", "check:0"]);
    }

    #[test]
    fn field_error_respects_error_from_context() {
        let mut form = form_with(FormValue::new());
        form.check();
        assert_eq!(form.field_error("name").map(String::as_str), Some("name required"));
        form.props.error_from_context = false;
        assert_eq!(form.field_error("name"), None);
    }

    struct NativeSubmit {
        prevented: bool,
        stopped: bool,
    }

    impl SubmitEvent for NativeSubmit {
        fn prevent_default(&mut self) {
            self.prevented = true;
        }

        fn stop_propagation(&mut self) {
            self.stopped = true;
        }
    }

    #[test]
    fn submit_checks_and_reports() {
        let outcome: Rc<RefCell<Option<bool>>> = Rc::default();
        let sink = Rc::clone(&outcome);
        let mut form: Form = Form::new(
            FormProps::default(),
            model(),
            FormCallbacks {
                on_submit: Some(Box::new(move |passed: bool, _: &mut dyn SubmitEvent| {
                    *sink.borrow_mut() = Some(passed);
                })),
                ..FormCallbacks::default()
            },
        );
        let mut event = NativeSubmit {
            prevented: false,
            stopped: false,
        };
        assert!(!form.handle_submit(&mut event));
        assert!(event.prevented && event.stopped);
        assert_eq!(*outcome.borrow(), Some(false));
    }

    #[test]
    fn class_names_follow_layout() {
        let form = form_with(FormValue::new());
        assert_eq!(form.class_names(), ["rs-form", "rs-form-vertical", "rs-form-fixed-width"]);

        let form: Form = Form::new(
            FormProps {
                fluid: true,
                plaintext: true,
                ..FormProps::default()
            },
            SchemaModel::new(),
            FormCallbacks::default(),
        );
        assert_eq!(
            form.class_names(),
            ["rs-form", "rs-form-vertical", "rs-form-fluid", "rs-form-plaintext"]
        );

        let form: Form = Form::new(
            FormProps {
                fluid: true,
                layout: Layout::Inline,
                ..FormProps::default()
            },
            SchemaModel::new(),
            FormCallbacks::default(),
        );
        assert_eq!(form.class_names(), ["rs-form", "rs-form-inline", "rs-form-fixed-width"]);
    }

    #[test]
    fn async_check_counts_rejections_as_failures() {
        let model: SchemaModel = SchemaModel::new()
            .with(
                "ok",
                rule_fn(|_: Option<&Value>, _: &FormValue| -> CheckResult { CheckResult::ok() }),
            )
            .with(
                "remote",
                crate::async_rule_fn(|_: Option<&Value>, _: &FormValue| -> crate::RuleFuture {
                    Box::pin(future::ready(Err(RuleError::Rejected("offline".into()))))
                }),
            );
        let log: Log = Rc::default();
        let mut form = Form::new(FormProps::default(), model, logging_callbacks(&log));
        let result = futures::executor::block_on(form.check_async());
        assert!(result.has_error);
        assert_eq!(result.form_error.message("remote").map(String::as_str), Some("offline"));
        assert!(!result.form_error.contains_key("ok"));
        assert_eq!(&result.form_error, form.get_form_error());
        assert_eq!(*log.borrow(), ["check:1", "error:1"]);
    }

    #[test]
    fn async_field_rejection_leaves_errors() {
        let model: SchemaModel = SchemaModel::new().with(
            "remote",
            crate::async_rule_fn(|_: Option<&Value>, _: &FormValue| -> crate::RuleFuture {
                Box::pin(future::ready(Err(RuleError::Cancelled)))
            }),
        );
        let mut form: Form = Form::new(FormProps::default(), model, FormCallbacks::default());
        form.reset_errors(vec![("remote", "stale".to_string())].into_iter().collect());
        let result = futures::executor::block_on(form.check_for_field_async("remote"));
        assert_eq!(result, Err(RuleError::Cancelled));
        assert!(form.get_form_error().has_error("remote"));
    }
}
