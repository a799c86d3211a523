// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu registry and its active-item pointer.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::focus::{FocusPolicy, Focusable, LinearPolicy, Navigation};

/// Per-item properties supplied when an item registers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItemProps<K = ()> {
    /// Disabled items never become active.
    pub disabled: bool,
    /// Key reported to `on_select` when the item is activated.
    pub event_key: Option<K>,
    /// The item opens a nested menu instead of selecting.
    pub submenu: bool,
}

impl<K> Default for MenuItemProps<K> {
    fn default() -> Self {
        Self {
            disabled: false,
            event_key: None,
            submenu: false,
        }
    }
}

impl<K> MenuItemProps<K> {
    /// Props for an enabled item with the given key.
    pub fn keyed(event_key: K) -> Self {
        Self {
            event_key: Some(event_key),
            ..Self::default()
        }
    }
}

/// A registered menu item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem<I, K = ()> {
    /// Host identifier of the item (its element id).
    pub id: I,
    /// The item's properties.
    pub props: MenuItemProps<K>,
}

impl<I, K> Focusable for MenuItem<I, K> {
    fn is_focusable(&self) -> bool {
        !self.props.disabled
    }
}

/// Where [`MenuState::move_focus`] should put the active pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveFocus<I> {
    /// The first enabled item.
    First,
    /// The last enabled item.
    Last,
    /// The next enabled item.
    Next,
    /// The previous enabled item.
    Prev,
    /// A specific item, typically the one under the pointer.
    Specific(I),
    /// Clear the pointer.
    None,
}

/// Registered items and the active-item pointer of one menu.
///
/// Items are kept in registration order. The active pointer, when set, always refers to
/// an enabled item; it is what a renderer exposes through `aria-activedescendant`.
#[derive(Clone, Debug)]
pub struct MenuState<I, K = (), P = LinearPolicy> {
    items: Vec<MenuItem<I, K>>,
    active: Option<usize>,
    policy: P,
}

impl<I, K, P: Default> Default for MenuState<I, K, P> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            active: None,
            policy: P::default(),
        }
    }
}

impl<I: PartialEq + Debug, K> MenuState<I, K, LinearPolicy> {
    /// An empty, non-wrapping menu.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: PartialEq + Debug, K, P: FocusPolicy> MenuState<I, K, P> {
    /// An empty menu traversed with `policy`.
    pub fn with_policy(policy: P) -> Self {
        Self {
            items: Vec::new(),
            active: None,
            policy,
        }
    }

    /// Register an item at the end of the menu.
    ///
    /// Registering an id that is already present replaces that item's props in place.
    pub fn register_item(&mut self, id: I, props: MenuItemProps<K>) {
        if let Some(at) = self.index_of(&id) {
            log::warn!("menu item {id:?} registered twice; keeping the later props");
            self.items[at].props = props;
            if self.active == Some(at) && self.items[at].props.disabled {
                self.active = None;
            }
            return;
        }
        log::trace!("menu item {id:?} registered");
        self.items.push(MenuItem { id, props });
    }

    /// Remove an item. Removing the active item clears the pointer.
    pub fn unregister_item(&mut self, id: &I) -> Option<MenuItem<I, K>> {
        let at = self.index_of(id)?;
        self.active = match self.active {
            Some(active) if active == at => None,
            Some(active) if active > at => Some(active - 1),
            other => other,
        };
        Some(self.items.remove(at))
    }

    /// Move the active pointer. Returns whether it changed.
    ///
    /// Moves that have nowhere to go (past either end without wrapping, an empty menu,
    /// a disabled or unknown specific item) leave the pointer unchanged.
    pub fn move_focus(&mut self, to: MoveFocus<I>) -> bool {
        let next = match to {
            MoveFocus::First => self.policy.next(self.active, Navigation::First, &self.items),
            MoveFocus::Last => self.policy.next(self.active, Navigation::Last, &self.items),
            MoveFocus::Next => self.policy.next(self.active, Navigation::Next, &self.items),
            MoveFocus::Prev => self.policy.next(self.active, Navigation::Prev, &self.items),
            MoveFocus::Specific(id) => self
                .index_of(&id)
                .filter(|&at| self.items[at].is_focusable()),
            MoveFocus::None => {
                let changed = self.active.is_some();
                self.active = None;
                return changed;
            }
        };
        match next {
            Some(at) if self.active != Some(at) => {
                log::trace!("menu focus moved to {:?}", self.items[at].id);
                self.active = Some(at);
                true
            }
            _ => false,
        }
    }

    /// The active item.
    pub fn active_item(&self) -> Option<&MenuItem<I, K>> {
        self.active.map(|at| &self.items[at])
    }

    /// Index of the active item.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Id of the active item, for `aria-activedescendant`.
    pub fn active_descendant(&self) -> Option<&I> {
        self.active_item().map(|item| &item.id)
    }

    /// Whether `id` is the active item.
    pub fn is_active(&self, id: &I) -> bool {
        self.active_descendant() == Some(id)
    }

    /// Registered items in order.
    pub fn items(&self) -> &[MenuItem<I, K>] {
        &self.items
    }

    /// Look up an item by id.
    pub fn item(&self, id: &I) -> Option<&MenuItem<I, K>> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Position of an item by id.
    pub fn index_of(&self, id: &I) -> Option<usize> {
        self.items.iter().position(|item| item.id == *id)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
