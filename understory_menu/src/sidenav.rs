// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sidenav open-key bookkeeping.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use understory_props::{ClassPrefix, Controlled, KeyEq, Structural, contains_key, position_of_key};

/// A sidenav shared with the dropdowns nested in it.
///
/// Dropdowns receive this handle explicitly when they are attached. Callbacks run while
/// the sidenav is mutably borrowed, so they must not borrow the handle again.
pub type SidenavHandle<K, C = Structural> = Rc<RefCell<Sidenav<K, C>>>;

/// Visual style of a sidenav.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Appearance {
    /// The default style.
    #[default]
    Default,
    /// Inverted colors.
    Inverse,
    /// No background.
    Subtle,
}

impl Appearance {
    fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Inverse => "inverse",
            Self::Subtle => "subtle",
        }
    }
}

/// Sidenav configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidenavProps<K> {
    /// Whether the sidenav is expanded. Dropdowns in an expanded sidenav fold open inline.
    pub expanded: bool,
    /// Visual style.
    pub appearance: Appearance,
    /// Initially open keys for an uncontrolled sidenav.
    pub default_open_keys: Vec<K>,
    /// The selected item's key.
    pub active_key: Option<K>,
    /// Component class prefix, under the `rs` namespace.
    pub class_prefix: String,
}

impl<K> Default for SidenavProps<K> {
    fn default() -> Self {
        Self {
            expanded: true,
            appearance: Appearance::Default,
            default_open_keys: Vec::new(),
            active_key: None,
            class_prefix: String::from("sidenav"),
        }
    }
}

/// Callbacks fired by a [`Sidenav`].
pub struct SidenavCallbacks<K> {
    /// The set of open keys changed; receives the new set.
    pub on_open_change: Option<Box<dyn FnMut(&[K])>>,
    /// An item was selected.
    pub on_select: Option<Box<dyn FnMut(&K)>>,
}

impl<K> Default for SidenavCallbacks<K> {
    fn default() -> Self {
        Self {
            on_open_change: None,
            on_select: None,
        }
    }
}

impl<K> fmt::Debug for SidenavCallbacks<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidenavCallbacks")
            .field("on_open_change", &self.on_open_change.is_some())
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

/// Open keys, expansion, and selection for a side navigation.
pub struct Sidenav<K, C = Structural> {
    expanded: bool,
    appearance: Appearance,
    active_key: Option<K>,
    open_keys: Controlled<Vec<K>>,
    comparator: C,
    classes: ClassPrefix,
    callbacks: SidenavCallbacks<K>,
}

impl<K: Clone> Sidenav<K, Structural>
where
    Structural: KeyEq<K>,
{
    /// A sidenav comparing keys structurally.
    pub fn new(props: SidenavProps<K>, callbacks: SidenavCallbacks<K>) -> Self {
        Self::with_comparator(props, callbacks, Structural)
    }
}

impl<K: Clone, C: KeyEq<K>> Sidenav<K, C> {
    /// A sidenav comparing keys with `comparator`.
    pub fn with_comparator(
        props: SidenavProps<K>,
        callbacks: SidenavCallbacks<K>,
        comparator: C,
    ) -> Self {
        Self {
            expanded: props.expanded,
            appearance: props.appearance,
            active_key: props.active_key,
            open_keys: Controlled::uncontrolled(props.default_open_keys),
            comparator,
            classes: ClassPrefix::new(&props.class_prefix),
            callbacks,
        }
    }

    /// Wrap in a shareable handle.
    pub fn into_handle(self) -> SidenavHandle<K, C> {
        Rc::new(RefCell::new(self))
    }

    /// The comparator used for keys.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Whether the sidenav is expanded.
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Expand or collapse.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// The currently open keys.
    pub fn open_keys(&self) -> &[K] {
        self.open_keys.get()
    }

    /// Supply or remove the host-controlled open keys.
    pub fn set_open_keys_prop(&mut self, open_keys: Option<Vec<K>>) {
        self.open_keys.set_prop(open_keys);
    }

    /// Whether `key` is open.
    pub fn is_open(&self, key: &K) -> bool {
        contains_key(&self.comparator, self.open_keys(), key)
    }

    /// The selected item's key.
    pub fn active_key(&self) -> Option<&K> {
        self.active_key.as_ref()
    }

    /// Change the selected item's key.
    pub fn set_active_key(&mut self, key: Option<K>) {
        self.active_key = key;
    }

    /// Whether `key` is the selected item.
    pub fn is_active(&self, key: &K) -> bool {
        self.active_key
            .as_ref()
            .is_some_and(|active| self.comparator.key_eq(active, key))
    }

    /// Toggle `key` in the open set and report the new set.
    pub fn handle_open_change(&mut self, key: &K) {
        let mut next = self.open_keys().to_vec();
        match position_of_key(&self.comparator, &next, key) {
            Some(at) => {
                next.remove(at);
            }
            None => next.push(key.clone()),
        }
        log::debug!("sidenav open keys now has {} entries", next.len());
        if let Some(on_open_change) = self.callbacks.on_open_change.as_mut() {
            on_open_change(&next);
        }
        self.open_keys.set(next);
    }

    /// Report a selection.
    pub fn handle_select(&mut self, key: &K) {
        if let Some(on_select) = self.callbacks.on_select.as_mut() {
            on_select(key);
        }
    }

    /// Class names for the sidenav container.
    pub fn class_names(&self) -> Vec<String> {
        let mut classes = self.classes.with_modifiers(&[(self.appearance.as_str(), true)]);
        classes.push(self.classes.prefix(if self.expanded {
            "collapse-in"
        } else {
            "collapse-out"
        }));
        classes
    }
}

impl<K: fmt::Debug, C: fmt::Debug> fmt::Debug for Sidenav<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sidenav")
            .field("expanded", &self.expanded)
            .field("appearance", &self.appearance)
            .field("active_key", &self.active_key)
            .field("open_keys", &self.open_keys)
            .field("comparator", &self.comparator)
            .field("classes", &self.classes)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn open_change_toggles_membership() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut nav = Sidenav::new(
            SidenavProps {
                default_open_keys: vec!["a"],
                ..SidenavProps::default()
            },
            SidenavCallbacks {
                on_open_change: Some(Box::new(move |keys: &[&'static str]| {
                    sink.borrow_mut().push(keys.to_vec());
                })),
                ..SidenavCallbacks::default()
            },
        );
        nav.handle_open_change(&"b");
        assert!(nav.is_open(&"b"));
        nav.handle_open_change(&"a");
        assert!(!nav.is_open(&"a"));
        assert_eq!(*seen.borrow(), vec![vec!["a", "b"], vec!["b"]]);
    }

    #[test]
    fn controlled_open_keys_win() {
        let mut nav: Sidenav<u8> =
            Sidenav::new(SidenavProps::default(), SidenavCallbacks::default());
        nav.set_open_keys_prop(Some(vec![1]));
        nav.handle_open_change(&2);
        assert_eq!(nav.open_keys(), &[1]);
        nav.set_open_keys_prop(None);
        assert_eq!(nav.open_keys(), &[2]);
    }

    #[test]
    fn class_names_follow_expansion() {
        let mut nav: Sidenav<u8> =
            Sidenav::new(SidenavProps::default(), SidenavCallbacks::default());
        assert_eq!(
            nav.class_names(),
            ["rs-sidenav", "rs-sidenav-default", "rs-sidenav-collapse-in"]
        );
        nav.set_expanded(false);
        assert!(nav.class_names().contains(&String::from("rs-sidenav-collapse-out")));
    }
}
