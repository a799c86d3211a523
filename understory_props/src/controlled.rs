// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controlled/uncontrolled value resolution.

/// A value that is either owned by the component or supplied by its parent.
///
/// Components keep an internal value at all times. When the parent supplies a
/// prop, [`Controlled::get`] returns the prop instead and internal writes are
/// only observable again once the prop is removed. This mirrors the usual
/// "prop defined wins over internal state" rule for controlled components.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Controlled<T> {
    prop: Option<T>,
    value: T,
}

impl<T> Controlled<T> {
    /// Create a controlled value from an optional parent prop and a default.
    ///
    /// The default seeds the internal value, so a component that starts out
    /// controlled and later becomes uncontrolled falls back to it.
    pub fn new(prop: Option<T>, default: T) -> Self {
        Self {
            prop,
            value: default,
        }
    }

    /// Create an uncontrolled value.
    pub fn uncontrolled(default: T) -> Self {
        Self::new(None, default)
    }

    /// The effective value: the prop when present, otherwise the internal value.
    pub fn get(&self) -> &T {
        self.prop.as_ref().unwrap_or(&self.value)
    }

    /// The internally owned value, regardless of any prop.
    pub fn internal(&self) -> &T {
        &self.value
    }

    /// The parent prop, if any.
    pub fn prop(&self) -> Option<&T> {
        self.prop.as_ref()
    }

    /// Whether a parent prop currently controls the value.
    pub fn is_controlled(&self) -> bool {
        self.prop.is_some()
    }

    /// Replace (or remove) the controlling prop.
    pub fn set_prop(&mut self, prop: Option<T>) {
        self.prop = prop;
    }

    /// Write the internal value.
    ///
    /// The write always lands, but it only becomes the effective value while
    /// the component is uncontrolled.
    pub fn set(&mut self, next: T) {
        self.value = next;
    }

    /// Mutate the internal value in place.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
    }

    /// Consume the wrapper and return the effective value.
    pub fn into_inner(self) -> T {
        match self.prop {
            Some(prop) => prop,
            None => self.value,
        }
    }
}

impl<T: PartialEq> Controlled<T> {
    /// Write the internal value and report whether the effective value changed.
    pub fn set_if_changed(&mut self, next: T) -> bool {
        let changed = !self.is_controlled() && self.value != next;
        self.value = next;
        changed
    }
}
