// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_form --heading-base-level=0

//! Understory Form: headless form values, field checks, and error maps.
//!
//! A [`Form`] owns two things: a value bag ([`FormValue`], field name to value) and an
//! error map ([`FormError`], field name to message). A [`SchemaModel`] connects them
//! by mapping field names to [`Rule`]s.
//!
//! - Values change only through [`Form::handle_field_change`], normally called by a
//!   [`FormControl`] bound to one field.
//! - Errors change through checks ([`Form::check`], [`Form::check_for_field`], and
//!   their async forms) and through the explicit error methods
//!   ([`Form::clean_errors`], [`Form::clean_error_for_filed`], [`Form::reset_errors`]).
//! - Either can be controlled by the host. Reads then return the host's copy.
//!
//! Error map keys distinguish "never checked" (absent) from "checked, passed" (`None`)
//! and "failed" (`Some(message)`).
//!
//! ## Minimal example
//!
//! ```rust
//! use serde_json::json;
//! use understory_form::{Form, FormCallbacks, FormProps, NumberType, SchemaModel};
//!
//! let model = SchemaModel::new().with("age", NumberType::new(Some("Age must be a number")));
//! let mut form: Form = Form::new(
//!     FormProps {
//!         form_default_value: [("age".to_string(), json!("abc"))].into_iter().collect(),
//!         ..FormProps::default()
//!     },
//!     model,
//!     FormCallbacks::default(),
//! );
//!
//! assert!(!form.check());
//! assert_eq!(
//!     form.get_form_error().message("age").map(String::as_str),
//!     Some("Age must be a number")
//! );
//!
//! form.handle_field_change("age", json!("42"), &());
//! assert!(form.check());
//! assert!(form.get_form_error().is_empty());
//! ```
//!
//! ## Async checks
//!
//! Rules may settle later through [`Rule::check_async`]. [`Form::check_async`] waits for
//! every field, and a rule that fails to settle ([`RuleError`]) is recorded as a failed
//! field rather than cutting the others short. A [`FormHandle`] runs async checks
//! without holding the form borrowed, so checks can overlap; the last to settle
//! writes the error map.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`CheckTrigger`], [`Layout`], and [`FormError`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod control;
mod error;
mod form;
mod handle;
mod schema;
mod types;

pub use control::FormControl;
pub use error::{FormError, RuleError};
pub use form::{
    AsyncCheckResult, CheckTrigger, Form, FormCallbacks, FormProps, Layout, SettledChecks,
    SettledField, SubmitEvent,
};
pub use handle::FormHandle;
pub use schema::{
    AsyncFnRule, CheckResult, FnRule, FormValue, Rule, RuleFuture, SchemaModel, async_rule_fn,
    rule_fn,
};
pub use types::{ArrayType, BooleanType, NumberType, REQUIRED_MESSAGE, StringType};
