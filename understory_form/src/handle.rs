// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A shared form handle for overlapping async checks.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use futures::future::LocalBoxFuture;

use crate::{AsyncCheckResult, CheckResult, Form, RuleError};

/// A shared reference to a [`Form`].
///
/// Async checks started through the handle borrow the form only to start and to
/// settle, never while rules are pending. Checks may therefore overlap. Nothing
/// cancels an earlier check: whichever settles last writes the error map.
pub struct FormHandle<V = serde_json::Value, M = String, E = ()> {
    form: Rc<RefCell<Form<V, M, E>>>,
}

impl<V, M, E> Clone for FormHandle<V, M, E> {
    fn clone(&self) -> Self {
        Self {
            form: Rc::clone(&self.form),
        }
    }
}

impl<V: fmt::Debug, M: fmt::Debug, E> fmt::Debug for FormHandle<V, M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FormHandle").field(&self.form).finish()
    }
}

impl<V, M, E> From<Form<V, M, E>> for FormHandle<V, M, E> {
    fn from(form: Form<V, M, E>) -> Self {
        Self {
            form: Rc::new(RefCell::new(form)),
        }
    }
}

impl<V, M, E> FormHandle<V, M, E> {
    /// Borrow the form.
    ///
    /// # Panics
    ///
    /// If the form is mutably borrowed, for example from inside one of its callbacks.
    pub fn borrow(&self) -> Ref<'_, Form<V, M, E>> {
        self.form.borrow()
    }

    /// Mutably borrow the form.
    ///
    /// # Panics
    ///
    /// If the form is already borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Form<V, M, E>> {
        self.form.borrow_mut()
    }
}

impl<V, M, E> FormHandle<V, M, E>
where
    V: Clone + 'static,
    M: Clone + Default + From<String> + 'static,
    E: 'static,
{
    /// Check every schema field, awaiting async rules without holding a borrow.
    pub fn check_async(&self) -> LocalBoxFuture<'static, AsyncCheckResult<M>> {
        let pending = self.form.borrow().begin_check_async();
        let form = Rc::clone(&self.form);
        Box::pin(async move {
            let settled = pending.await;
            form.borrow_mut().settle_check_async(settled)
        })
    }

    /// Check one field, awaiting async rules without holding a borrow.
    pub fn check_for_field_async(
        &self,
        field: &str,
    ) -> LocalBoxFuture<'static, Result<CheckResult<M>, RuleError>> {
        let pending = self.form.borrow().begin_check_for_field_async(field);
        let form = Rc::clone(&self.form);
        Box::pin(async move {
            let settled = pending.await;
            form.borrow_mut().settle_check_for_field_async(settled)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormCallbacks, FormProps, FormValue, RuleFuture, SchemaModel, async_rule_fn};
    use alloc::vec::Vec;
    use futures::FutureExt;
    use futures::channel::oneshot;
    use serde_json::Value;

    /// A rule whose successive checks settle through the returned senders.
    fn remote_rule() -> (
        impl crate::Rule<Value> + 'static,
        Rc<RefCell<Vec<oneshot::Sender<CheckResult>>>>,
    ) {
        let senders: Rc<RefCell<Vec<oneshot::Sender<CheckResult>>>> = Rc::default();
        let sink = Rc::clone(&senders);
        let rule = async_rule_fn(move |_: Option<&Value>, _: &FormValue| -> RuleFuture {
            let (tx, rx) = oneshot::channel();
            sink.borrow_mut().push(tx);
            rx.map(|settled| settled.map_err(|_| RuleError::Cancelled))
                .boxed_local()
        });
        (rule, senders)
    }

    #[test]
    fn last_check_to_settle_wins() {
        let (rule, senders) = remote_rule();
        let handle: FormHandle = Form::new(
            FormProps::default(),
            SchemaModel::new().with("name", rule),
            FormCallbacks::default(),
        )
        .into();

        let mut first = handle.check_async();
        let mut second = handle.check_async();
        assert!(first.as_mut().now_or_never().is_none());
        assert!(second.as_mut().now_or_never().is_none());

        // The second check settles first with an error, then the first passes.
        let mut senders = senders.borrow_mut().drain(..).collect::<Vec<_>>();
        let first_tx = senders.remove(0);
        let second_tx = senders.remove(0);
        second_tx
            .send(CheckResult::error("taken"))
            .expect("second check is waiting");
        let second = futures::executor::block_on(second);
        assert!(second.has_error);
        assert!(handle.borrow().get_form_error().has_error("name"));

        first_tx.send(CheckResult::ok()).expect("first check is waiting");
        let first = futures::executor::block_on(first);
        assert!(!first.has_error);
        assert!(handle.borrow().get_form_error().is_empty());
    }

    #[test]
    fn form_is_usable_while_a_check_is_pending() {
        let (rule, senders) = remote_rule();
        let handle: FormHandle = Form::new(
            FormProps::default(),
            SchemaModel::new().with("name", rule),
            FormCallbacks::default(),
        )
        .into();

        let pending = handle.check_for_field_async("name");
        handle
            .borrow_mut()
            .handle_field_change("name", Value::from("Ada"), &());
        let tx = senders.borrow_mut().pop().expect("one check started");
        tx.send(CheckResult::ok()).expect("check is waiting");
        assert_eq!(futures::executor::block_on(pending), Ok(CheckResult::ok()));
        assert!(handle.borrow().get_form_error().contains_key("name"));
    }

    #[test]
    fn dropped_rule_is_cancelled() {
        let (rule, senders) = remote_rule();
        let handle: FormHandle = Form::new(
            FormProps::default(),
            SchemaModel::new().with("name", rule),
            FormCallbacks::default(),
        )
        .into();
        let pending = handle.check_async();
        senders.borrow_mut().clear();
        let result = futures::executor::block_on(pending);
        assert!(result.has_error);
        assert_eq!(
            result.form_error.message("name").map(String::as_str),
            Some("validation was cancelled before it settled")
        );
    }
}
