// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed rule builders over [`serde_json::Value`].
//!
//! Every builder checks in the same order:
//!
//! 1. Empty values (missing, `null`, `""`, `[]`) fail with the required message when
//!    [`is_required`](StringType::is_required) was set, and pass otherwise without
//!    running any further rule.
//! 2. Values of the wrong type fail with the type message.
//! 3. Added rules run in the order they were added; the first failure wins.
//! 4. [`Rule::check_async`] then awaits the async rules in order.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use futures::future::{self, LocalBoxFuture};
use serde_json::Value;

use crate::{CheckResult, FormValue, Rule, RuleError, RuleFuture};

type Predicate = Box<dyn Fn(&Value, &FormValue) -> bool>;
type BoolFuture = LocalBoxFuture<'static, Result<bool, RuleError>>;
type AsyncPredicate = Box<dyn Fn(&Value, &FormValue) -> BoolFuture>;

/// Message used by [`StringType::is_required`] and friends when given `None`.
pub const REQUIRED_MESSAGE: &str = "This field is required";

struct Checks {
    type_message: String,
    required: Option<String>,
    rules: Vec<(Predicate, String)>,
    async_rules: Vec<(AsyncPredicate, String)>,
}

impl fmt::Debug for Checks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checks")
            .field("type_message", &self.type_message)
            .field("required", &self.required)
            .field("rules", &self.rules.len())
            .field("async_rules", &self.async_rules.len())
            .finish()
    }
}

impl Checks {
    fn new(type_message: Option<&str>, default: &str) -> Self {
        Self {
            type_message: String::from(type_message.unwrap_or(default)),
            required: None,
            rules: Vec::new(),
            async_rules: Vec::new(),
        }
    }

    fn run<'v>(
        &self,
        value: Option<&'v Value>,
        form: &FormValue,
        is_type: impl Fn(&Value) -> bool,
    ) -> Result<Option<&'v Value>, CheckResult> {
        let Some(value) = value.filter(|v| !is_empty(v)) else {
            return match &self.required {
                Some(message) => Err(CheckResult::error(message.clone())),
                None => Ok(None),
            };
        };
        if !is_type(value) {
            return Err(CheckResult::error(self.type_message.clone()));
        }
        for (rule, message) in &self.rules {
            if !rule(value, form) {
                return Err(CheckResult::error(message.clone()));
            }
        }
        Ok(Some(value))
    }

    fn check(
        &self,
        value: Option<&Value>,
        form: &FormValue,
        is_type: impl Fn(&Value) -> bool,
    ) -> CheckResult {
        match self.run(value, form, is_type) {
            Ok(_) => CheckResult::ok(),
            Err(failed) => failed,
        }
    }

    fn check_async(
        &self,
        value: Option<&Value>,
        form: &FormValue,
        is_type: impl Fn(&Value) -> bool,
    ) -> RuleFuture {
        let value = match self.run(value, form, is_type) {
            Ok(Some(value)) => value,
            Ok(None) => return Box::pin(future::ready(Ok(CheckResult::ok()))),
            Err(failed) => return Box::pin(future::ready(Ok(failed))),
        };
        let pending: Vec<_> = self
            .async_rules
            .iter()
            .map(|(rule, message)| (rule(value, form), message.clone()))
            .collect();
        Box::pin(async move {
            for (settled, message) in pending {
                if !settled.await? {
                    return Ok(CheckResult::error(message));
                }
            }
            Ok(CheckResult::ok())
        })
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Parse `-?\d*(\.\d+)?` the way numeric strings are accepted in form inputs.
fn parse_number(s: &str) -> Option<f64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) if !frac.is_empty() => (int, frac),
        Some(_) => return None,
        None => (digits, ""),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (int.is_empty() && frac.is_empty()) || !all_digits(int) || !all_digits(frac) {
        return None;
    }
    s.parse().ok()
}

macro_rules! common_builders {
    ($ty:ident) => {
        impl $ty {
            /// Fail empty values with `message`, or [`REQUIRED_MESSAGE`].
            #[must_use]
            pub fn is_required(mut self, message: Option<&str>) -> Self {
                self.checks.required = Some(String::from(message.unwrap_or(REQUIRED_MESSAGE)));
                self
            }

            /// Add a predicate; values it rejects fail with `message`.
            #[must_use]
            pub fn add_rule(
                mut self,
                rule: impl Fn(&Value, &FormValue) -> bool + 'static,
                message: impl Into<String>,
            ) -> Self {
                self.checks.rules.push((Box::new(rule), message.into()));
                self
            }

            /// Add a deferred predicate, run only by [`Rule::check_async`].
            #[must_use]
            pub fn add_async_rule(
                mut self,
                rule: impl Fn(&Value, &FormValue) -> BoolFuture + 'static,
                message: impl Into<String>,
            ) -> Self {
                self.checks.async_rules.push((Box::new(rule), message.into()));
                self
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new(None)
            }
        }

        impl Rule<Value> for $ty {
            fn check(&self, value: Option<&Value>, form: &FormValue) -> CheckResult {
                self.checks.check(value, form, Self::is_type)
            }

            fn check_async(&self, value: Option<&Value>, form: &FormValue) -> RuleFuture {
                self.checks.check_async(value, form, Self::is_type)
            }
        }
    };
}

/// Rules for string values.
#[derive(Debug)]
pub struct StringType {
    checks: Checks,
}

impl StringType {
    /// A string rule; non-strings fail with `type_message`.
    pub fn new(type_message: Option<&str>) -> Self {
        Self {
            checks: Checks::new(type_message, "Please enter a valid string"),
        }
    }

    fn is_type(value: &Value) -> bool {
        value.is_string()
    }

    /// Require at least `min` characters.
    #[must_use]
    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.add_rule(
            move |v, _| v.as_str().is_some_and(|s| s.chars().count() >= min),
            message,
        )
    }

    /// Allow at most `max` characters.
    #[must_use]
    pub fn max_length(self, max: usize, message: impl Into<String>) -> Self {
        self.add_rule(
            move |v, _| v.as_str().is_some_and(|s| s.chars().count() <= max),
            message,
        )
    }
}

common_builders!(StringType);

/// Rules for numbers, also accepting numeric strings such as `"42"` or `"-.5"`.
#[derive(Debug)]
pub struct NumberType {
    checks: Checks,
}

impl NumberType {
    /// A number rule; non-numbers fail with `type_message`.
    pub fn new(type_message: Option<&str>) -> Self {
        Self {
            checks: Checks::new(type_message, "Please enter a valid number"),
        }
    }

    fn is_type(value: &Value) -> bool {
        as_number(value).is_some()
    }

    /// Require a whole number.
    #[must_use]
    pub fn is_integer(self, message: impl Into<String>) -> Self {
        self.add_rule(
            |v, _| as_number(v).is_some_and(|n| n % 1.0 == 0.0),
            message,
        )
    }

    /// Require `min <= n <= max`.
    #[must_use]
    pub fn range(self, min: f64, max: f64, message: impl Into<String>) -> Self {
        self.add_rule(
            move |v, _| as_number(v).is_some_and(|n| (min..=max).contains(&n)),
            message,
        )
    }
}

common_builders!(NumberType);

/// Rules for booleans.
#[derive(Debug)]
pub struct BooleanType {
    checks: Checks,
}

impl BooleanType {
    /// A boolean rule; non-booleans fail with `type_message`.
    pub fn new(type_message: Option<&str>) -> Self {
        Self {
            checks: Checks::new(type_message, "Please enter a valid boolean"),
        }
    }

    fn is_type(value: &Value) -> bool {
        value.is_boolean()
    }
}

common_builders!(BooleanType);

/// Rules for arrays.
#[derive(Debug)]
pub struct ArrayType {
    checks: Checks,
}

impl ArrayType {
    /// An array rule; non-arrays fail with `type_message`.
    pub fn new(type_message: Option<&str>) -> Self {
        Self {
            checks: Checks::new(type_message, "Please enter a valid array"),
        }
    }

    fn is_type(value: &Value) -> bool {
        value.is_array()
    }

    /// Require at least `min` elements.
    #[must_use]
    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.add_rule(
            move |v, _| v.as_array().is_some_and(|a| a.len() >= min),
            message,
        )
    }

    /// Allow at most `max` elements.
    #[must_use]
    pub fn max_length(self, max: usize, message: impl Into<String>) -> Self {
        self.add_rule(
            move |v, _| v.as_array().is_some_and(|a| a.len() <= max),
            message,
        )
    }
}

common_builders!(ArrayType);
