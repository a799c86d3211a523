// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Equality strategies for opaque event keys.
//!
//! Menus, navs, and sidenavs match an `activeKey` or a list of `openKeys`
//! against the `eventKey` of each child. Keys are opaque to the components,
//! so the comparison is a parameter rather than something inferred from the
//! key's runtime shape:
//!
//! - [`Structural`] compares plain data with [`PartialEq`].
//! - [`Identity`] compares shared handles by address (see [`IdentityKey`]).
//! - [`KeyFn`] adapts any comparison closure.

use alloc::rc::Rc;
use alloc::sync::Arc;

/// A comparator for event keys.
pub trait KeyEq<K: ?Sized> {
    /// Whether `a` and `b` identify the same item.
    fn key_eq(&self, a: &K, b: &K) -> bool;
}

/// Structural comparison through [`PartialEq`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Structural;

impl<K: PartialEq + ?Sized> KeyEq<K> for Structural {
    fn key_eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Keys that carry a stable address for identity comparison.
pub trait IdentityKey {
    /// Address identifying the referenced allocation.
    fn identity(&self) -> *const ();
}

impl<T: ?Sized> IdentityKey for Rc<T> {
    fn identity(&self) -> *const () {
        Rc::as_ptr(self).cast::<()>()
    }
}

impl<T: ?Sized> IdentityKey for Arc<T> {
    fn identity(&self) -> *const () {
        Arc::as_ptr(self).cast::<()>()
    }
}

impl<T: ?Sized> IdentityKey for &T {
    fn identity(&self) -> *const () {
        let ptr: *const T = *self;
        ptr.cast::<()>()
    }
}

/// Identity comparison: two keys match only when they share an allocation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl<K: IdentityKey> KeyEq<K> for Identity {
    fn key_eq(&self, a: &K, b: &K) -> bool {
        core::ptr::eq(a.identity(), b.identity())
    }
}

/// Adapter turning a closure into a [`KeyEq`].
#[derive(Copy, Clone, Debug)]
pub struct KeyFn<F>(pub F);

impl<K: ?Sized, F: Fn(&K, &K) -> bool> KeyEq<K> for KeyFn<F> {
    fn key_eq(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

/// Whether `keys` contains `key` under the comparator `eq`.
pub fn contains_key<K, C: KeyEq<K> + ?Sized>(eq: &C, keys: &[K], key: &K) -> bool {
    position_of_key(eq, keys, key).is_some()
}

/// Position of the first key in `keys` matching `key` under `eq`.
pub fn position_of_key<K, C: KeyEq<K> + ?Sized>(eq: &C, keys: &[K], key: &K) -> Option<usize> {
    keys.iter().position(|candidate| eq.key_eq(candidate, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn structural_matches_equal_data() {
        let a = vec![1_u8, 2];
        let b = vec![1_u8, 2];
        assert!(Structural.key_eq(&a, &b));
        assert!(!Structural.key_eq(&a, &vec![2_u8]));
    }

    #[test]
    fn identity_requires_same_allocation() {
        let a = Rc::new(String::from("settings"));
        let same = Rc::clone(&a);
        let equal_but_distinct = Rc::new(String::from("settings"));

        assert!(Identity.key_eq(&a, &same));
        assert!(!Identity.key_eq(&a, &equal_but_distinct));
        // Structural comparison sees through the handle.
        assert!(Structural.key_eq(&a, &equal_but_distinct));
    }

    #[test]
    fn closure_comparator_and_helpers() {
        let case_insensitive = KeyFn(|a: &&str, b: &&str| a.eq_ignore_ascii_case(b));
        let keys = ["Files", "Edit"];
        assert!(contains_key(&case_insensitive, &keys, &"edit"));
        assert_eq!(position_of_key(&case_insensitive, &keys, &"FILES"), Some(0));
        assert_eq!(position_of_key(&Structural, &keys, &"View"), None);
    }
}
