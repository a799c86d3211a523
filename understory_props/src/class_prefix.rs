// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class-name prefixing for headless components.

use alloc::string::String;
use alloc::vec::Vec;

/// Namespace prepended to every component class prefix.
pub const DEFAULT_NAMESPACE: &str = "rs";

/// A component's class-name prefix, such as `rs-dropdown`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassPrefix {
    base: String,
}

impl ClassPrefix {
    /// Prefix for `component` under [`DEFAULT_NAMESPACE`].
    pub fn new(component: &str) -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE, component)
    }

    /// Prefix for `component` under a custom namespace.
    ///
    /// An empty namespace yields the bare component name.
    pub fn with_namespace(namespace: &str, component: &str) -> Self {
        let mut base = String::with_capacity(namespace.len() + component.len() + 1);
        if !namespace.is_empty() {
            base.push_str(namespace);
            base.push('-');
        }
        base.push_str(component);
        Self { base }
    }

    /// Use `prefix` verbatim, for callers overriding the whole class prefix.
    pub fn raw(prefix: &str) -> Self {
        Self {
            base: String::from(prefix),
        }
    }

    /// The prefix itself (`rs-dropdown`).
    pub fn base(&self) -> &str {
        &self.base
    }

    /// A prefixed part (`rs-dropdown-toggle`).
    pub fn prefix(&self, part: &str) -> String {
        if part.is_empty() {
            return self.base.clone();
        }
        let mut out = String::with_capacity(self.base.len() + part.len() + 1);
        out.push_str(&self.base);
        out.push('-');
        out.push_str(part);
        out
    }

    /// The base class followed by one prefixed class per enabled modifier.
    pub fn with_modifiers(&self, modifiers: &[(&str, bool)]) -> Vec<String> {
        let mut out = Vec::with_capacity(modifiers.len() + 1);
        out.push(self.base.clone());
        out.extend(
            modifiers
                .iter()
                .filter(|(_, enabled)| *enabled)
                .map(|(name, _)| self.prefix(name)),
        );
        out
    }

    /// Join class names with spaces, skipping empty entries.
    pub fn merge<I, S>(classes: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for class in classes {
            let class = class.as_ref().trim();
            if class.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(class);
        }
        out
    }
}

/// Convert a camel-case token (`topStart`) to kebab case (`top-start`).
pub fn kebab_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len() + 4);
    for (i, ch) in token.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn prefixes_parts_under_namespace() {
        let p = ClassPrefix::new("dropdown");
        assert_eq!(p.base(), "rs-dropdown");
        assert_eq!(p.prefix("toggle"), "rs-dropdown-toggle");
        assert_eq!(p.prefix(""), "rs-dropdown");
        assert_eq!(ClassPrefix::raw("custom-prefix").prefix("menu"), "custom-prefix-menu");
        assert_eq!(ClassPrefix::with_namespace("", "form").base(), "form");
    }

    #[test]
    fn modifiers_only_include_enabled_entries() {
        let p = ClassPrefix::new("dropdown");
        let classes = p.with_modifiers(&[("open", true), ("disabled", false), ("no-caret", true)]);
        assert_eq!(
            classes,
            vec!["rs-dropdown", "rs-dropdown-open", "rs-dropdown-no-caret"]
        );
    }

    #[test]
    fn merge_skips_empty_classes() {
        assert_eq!(ClassPrefix::merge(["a", "", " b ", "c"]), "a b c");
    }

    #[test]
    fn kebab_case_splits_on_capitals() {
        assert_eq!(kebab_case("topStart"), "top-start");
        assert_eq!(kebab_case("autoVerticalEnd"), "auto-vertical-end");
        assert_eq!(kebab_case("left"), "left");
    }
}
