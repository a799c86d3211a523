// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field-side logic: one named field reading from and writing to its form.

use alloc::string::String;

use crate::{CheckTrigger, Form, FormValue};

#[derive(Clone, Debug, PartialEq)]
struct PendingCheck<V> {
    due: u64,
    value: V,
}

/// A field bound to one name in a [`Form`].
///
/// The form is passed to every call; the control keeps only its own pending
/// check. Changes go through [`Form::handle_field_change`], and check results
/// through [`Form::handle_field_error`] and [`Form::handle_field_success`].
#[derive(Clone, Debug, PartialEq)]
pub struct FormControl<V = serde_json::Value> {
    name: String,
    check_trigger: Option<CheckTrigger>,
    pending: Option<PendingCheck<V>>,
}

impl<V: Clone> FormControl<V> {
    /// A control for field `name`, using the form's check trigger.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            check_trigger: None,
            pending: None,
        }
    }

    /// Override the form's check trigger for this field.
    #[must_use]
    pub fn with_check_trigger(mut self, trigger: CheckTrigger) -> Self {
        self.check_trigger = Some(trigger);
        self
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This field's check trigger within `form`.
    pub fn check_trigger<M, E>(&self, form: &Form<V, M, E>) -> CheckTrigger
    where
        M: Clone + Default + From<String>,
    {
        self.check_trigger.unwrap_or(form.props().check_trigger)
    }

    /// The field's current value.
    pub fn value<'a, M, E>(&self, form: &'a Form<V, M, E>) -> Option<&'a V>
    where
        M: Clone + Default + From<String>,
    {
        form.get_form_value()
            .get(&self.name)
            .or_else(|| form.props().form_default_value.get(&self.name))
    }

    /// The error the field should display.
    pub fn error_message<'a, M, E>(&self, form: &'a Form<V, M, E>) -> Option<&'a M>
    where
        M: Clone + Default + From<String>,
    {
        form.field_error(&self.name)
    }

    /// Whether the field accepts edits.
    pub fn is_editable<M, E>(&self, form: &Form<V, M, E>) -> bool
    where
        M: Clone + Default + From<String>,
    {
        let props = form.props();
        !props.read_only && !props.plaintext
    }

    /// Time the pending check fires, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// The user edited the field at `now`. Returns whether the edit was accepted.
    ///
    /// A change-triggered check is scheduled `check_delay` later, replacing any
    /// earlier one; with no delay it runs before this returns.
    pub fn on_change<M, E>(
        &mut self,
        form: &mut Form<V, M, E>,
        value: V,
        event: &E,
        now: u64,
    ) -> bool
    where
        M: Clone + Default + From<String>,
    {
        if !self.is_editable(form) {
            log::trace!("field `{}` is read-only; change ignored", self.name);
            return false;
        }
        form.handle_field_change(&self.name, value.clone(), event);
        if self.check_trigger(form) == CheckTrigger::Change {
            self.pending = Some(PendingCheck {
                due: now.saturating_add(form.props().check_delay),
                value,
            });
            self.poll(form, now);
        }
        true
    }

    /// The field lost focus. Runs a blur-triggered check immediately and returns
    /// whether it passed.
    pub fn on_blur<M, E>(&mut self, form: &mut Form<V, M, E>) -> Option<bool>
    where
        M: Clone + Default + From<String>,
    {
        if self.check_trigger(form) != CheckTrigger::Blur {
            return None;
        }
        let value = self.value(form).cloned();
        Some(self.check(form, value))
    }

    /// Fire the pending check if it is due. Returns whether it passed.
    pub fn poll<M, E>(&mut self, form: &mut Form<V, M, E>, now: u64) -> Option<bool>
    where
        M: Clone + Default + From<String>,
    {
        if self.pending.as_ref().is_none_or(|p| p.due > now) {
            return None;
        }
        let pending = self.pending.take()?;
        Some(self.check(form, Some(pending.value)))
    }

    fn check<M, E>(&self, form: &mut Form<V, M, E>, value: Option<V>) -> bool
    where
        M: Clone + Default + From<String>,
    {
        let mut next: FormValue<V> = form.get_form_value().clone();
        if let Some(value) = &value {
            next.insert(self.name.clone(), value.clone());
        }
        let result = form
            .model()
            .check_for_field(&self.name, value.as_ref(), &next);
        if result.has_error {
            form.handle_field_error(&self.name, result.error_message.unwrap_or_default());
            false
        } else {
            form.handle_field_success(&self.name);
            true
        }
    }
}
