// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rules and the schema model that maps fields to them.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use futures::future::{self, LocalBoxFuture};

use crate::RuleError;

/// A form's values, keyed by field name.
pub type FormValue<V = serde_json::Value> = BTreeMap<String, V>;

/// Outcome of checking one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckResult<M = String> {
    /// Whether the field failed.
    pub has_error: bool,
    /// Failure message, if the rule produced one.
    pub error_message: Option<M>,
}

impl<M> CheckResult<M> {
    /// A passing result.
    pub const fn ok() -> Self {
        Self {
            has_error: false,
            error_message: None,
        }
    }

    /// A failing result with `message`.
    pub fn error(message: impl Into<M>) -> Self {
        Self {
            has_error: true,
            error_message: Some(message.into()),
        }
    }
}

/// Future returned by [`Rule::check_async`].
pub type RuleFuture<M = String> = LocalBoxFuture<'static, Result<CheckResult<M>, RuleError>>;

/// A validation rule for one field.
///
/// `value` is `None` when the form has no entry for the field.
pub trait Rule<V, M = String> {
    /// Check synchronously.
    ///
    /// Rules with only deferred parts pass here.
    fn check(&self, value: Option<&V>, form: &FormValue<V>) -> CheckResult<M>;

    /// Check, allowing the result to settle later.
    ///
    /// The returned future owns everything it needs. The default settles
    /// immediately with [`Rule::check`].
    fn check_async(&self, value: Option<&V>, form: &FormValue<V>) -> RuleFuture<M>
    where
        M: 'static,
    {
        Box::pin(future::ready(Ok(self.check(value, form))))
    }
}

/// A [`Rule`] backed by a closure; see [`rule_fn`].
pub struct FnRule<F> {
    f: F,
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").finish_non_exhaustive()
    }
}

/// Adapt a synchronous closure into a [`Rule`].
pub fn rule_fn<V, M, F>(f: F) -> FnRule<F>
where
    F: Fn(Option<&V>, &FormValue<V>) -> CheckResult<M>,
{
    FnRule { f }
}

impl<V, M, F> Rule<V, M> for FnRule<F>
where
    F: Fn(Option<&V>, &FormValue<V>) -> CheckResult<M>,
{
    fn check(&self, value: Option<&V>, form: &FormValue<V>) -> CheckResult<M> {
        (self.f)(value, form)
    }
}

/// A deferred [`Rule`] backed by a closure; see [`async_rule_fn`].
pub struct AsyncFnRule<F> {
    f: F,
}

impl<F> fmt::Debug for AsyncFnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFnRule").finish_non_exhaustive()
    }
}

/// Adapt a closure returning a [`RuleFuture`] into a [`Rule`].
///
/// The synchronous [`Rule::check`] of the result always passes.
pub fn async_rule_fn<V, M, F>(f: F) -> AsyncFnRule<F>
where
    F: Fn(Option<&V>, &FormValue<V>) -> RuleFuture<M>,
{
    AsyncFnRule { f }
}

impl<V, M, F> Rule<V, M> for AsyncFnRule<F>
where
    F: Fn(Option<&V>, &FormValue<V>) -> RuleFuture<M>,
{
    fn check(&self, _value: Option<&V>, _form: &FormValue<V>) -> CheckResult<M> {
        CheckResult::ok()
    }

    fn check_async(&self, value: Option<&V>, form: &FormValue<V>) -> RuleFuture<M>
    where
        M: 'static,
    {
        (self.f)(value, form)
    }
}

/// An ordered map from field names to rules.
///
/// Fields the model does not name always pass.
pub struct SchemaModel<V = serde_json::Value, M = String> {
    fields: Vec<(String, Rc<dyn Rule<V, M>>)>,
    _marker: PhantomData<fn(V) -> M>,
}

impl<V, M> Clone for SchemaModel<V, M> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            _marker: PhantomData,
        }
    }
}

impl<V, M> Default for SchemaModel<V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, M> fmt::Debug for SchemaModel<V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaModel")
            .field("fields", &self.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<V, M> SchemaModel<V, M> {
    /// An empty model.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Add a field, builder style.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, rule: impl Rule<V, M> + 'static) -> Self {
        self.add(field, rule);
        self
    }

    /// Add a field or replace its rule. New fields go last.
    pub fn add(&mut self, field: impl Into<String>, rule: impl Rule<V, M> + 'static) {
        let field = field.into();
        let rule: Rc<dyn Rule<V, M>> = Rc::new(rule);
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = rule,
            None => self.fields.push((field, rule)),
        }
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// The rule for `field`.
    pub fn rule(&self, field: &str) -> Option<&dyn Rule<V, M>> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| &**rule)
    }

    /// Check one field against `value`, with `form` as context.
    pub fn check_for_field(
        &self,
        field: &str,
        value: Option<&V>,
        form: &FormValue<V>,
    ) -> CheckResult<M> {
        match self.rule(field) {
            Some(rule) => rule.check(value, form),
            None => {
                log::warn!("checked field `{field}` is not in the schema");
                CheckResult::ok()
            }
        }
    }

    /// Check one field, allowing the rule to settle later.
    pub fn check_for_field_async(
        &self,
        field: &str,
        value: Option<&V>,
        form: &FormValue<V>,
    ) -> RuleFuture<M>
    where
        M: 'static,
    {
        match self.rule(field) {
            Some(rule) => rule.check_async(value, form),
            None => {
                log::warn!("checked field `{field}` is not in the schema");
                Box::pin(future::ready(Ok(CheckResult::ok())))
            }
        }
    }

    /// Check every field of the model against `form`.
    pub fn check(&self, form: &FormValue<V>) -> BTreeMap<String, CheckResult<M>> {
        self.fields
            .iter()
            .map(|(name, rule)| (name.clone(), rule.check(form.get(name), form)))
            .collect()
    }
}
