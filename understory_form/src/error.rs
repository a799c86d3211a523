// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field error maps and rule failures.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;

/// An async rule that failed to produce a [`CheckResult`](crate::CheckResult).
///
/// This is not a validation failure. Form-wide checks still record the field as
/// failed, with the error's text as its message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The rule rejected with a reason.
    #[error("{0}")]
    Rejected(String),
    /// The rule's future was dropped before it settled.
    #[error("validation was cancelled before it settled")]
    Cancelled,
}

/// Per-field error messages.
///
/// Keys have three states:
///
/// - absent: never checked, or cleared;
/// - `None`: checked and passed;
/// - `Some(message)`: checked and failed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FormError<M = String> {
    fields: BTreeMap<String, Option<M>>,
}

impl<M> Default for FormError<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> FormError<M> {
    /// An empty map.
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Whether `field` is recorded as failed.
    pub fn has_error(&self, field: &str) -> bool {
        matches!(self.fields.get(field), Some(Some(_)))
    }

    /// The failure message for `field`.
    pub fn message(&self, field: &str) -> Option<&M> {
        self.fields.get(field).and_then(Option::as_ref)
    }

    /// Whether `field` has an entry at all, failed or passed.
    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of failed fields.
    pub fn error_count(&self) -> usize {
        self.fields.values().filter(|m| m.is_some()).count()
    }

    /// Number of entries, including passed fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Record a result for `field`. `None` marks it as passed.
    pub fn insert(&mut self, field: impl Into<String>, message: Option<M>) {
        self.fields.insert(field.into(), message);
    }

    /// Delete the entry for `field`.
    pub fn remove(&mut self, field: &str) -> Option<Option<M>> {
        self.fields.remove(field)
    }

    /// Iterate entries in field-name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Option<M>> {
        self.fields.iter()
    }

    /// Iterate failed fields and their messages.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &M)> + '_ {
        self.fields
            .iter()
            .filter_map(|(k, m)| m.as_ref().map(|m| (k.as_str(), m)))
    }
}

impl<M> From<BTreeMap<String, Option<M>>> for FormError<M> {
    fn from(fields: BTreeMap<String, Option<M>>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, M> FromIterator<(K, M)> for FormError<M> {
    /// Collect failed fields.
    fn from_iter<T: IntoIterator<Item = (K, M)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, m)| (k.into(), Some(m))).collect(),
        }
    }
}

impl<'a, M> IntoIterator for &'a FormError<M> {
    type Item = (&'a String, &'a Option<M>);
    type IntoIter = btree_map::Iter<'a, String, Option<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn passed_and_absent_are_distinct() {
        let mut errors: FormError = FormError::new();
        errors.insert("a", None);
        assert!(errors.contains_key("a"));
        assert!(!errors.has_error("a"));
        assert!(!errors.contains_key("b"));
        assert_eq!(errors.error_count(), 0);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn collects_failures() {
        let errors: FormError = [("b", "bad".to_string()), ("a", "worse".to_string())]
            .into_iter()
            .collect();
        assert_eq!(errors.error_count(), 2);
        assert_eq!(errors.message("b").map(String::as_str), Some("bad"));
        let names: Vec<_> = errors.errors().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn rule_error_text() {
        assert_eq!(RuleError::Rejected("offline".into()).to_string(), "offline");
    }
}
