// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A text input with a filtered suggestion menu.
//!
//! The suggestion list shows every item whose label contains the input text,
//! ignoring case; blank input shows nothing. Keyboard focus in the list never wraps.
//!
//! Blurring the input closes the menu [`BLUR_CLOSE_DELAY_MS`] later so that a click on
//! a suggestion, which blurs the input first, still lands. That close is not tied to
//! any later state: focusing the input again before it fires does not cancel it.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;
use understory_overlay::Placement;
use understory_props::{ClassPrefix, Controlled, Key};

/// Delay between blur and the deferred close.
pub const BLUR_CLOSE_DELAY_MS: u64 = 300;

/// One suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemData {
    /// Value written into the input when selected.
    pub value: String,
    /// Text shown and matched against the input.
    pub label: String,
}

impl ItemData {
    /// A suggestion whose label is its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    /// A suggestion with a separate label.
    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    fn matches(&self, keyword: &str) -> bool {
        self.label.to_lowercase().contains(keyword)
    }
}

/// Autocomplete configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutocompleteProps {
    /// All suggestions.
    pub data: Vec<ItemData>,
    /// Ignore input.
    pub disabled: bool,
    /// Initial value when uncontrolled.
    pub default_value: String,
    /// Host-controlled value.
    pub value: Option<String>,
    /// Host-controlled menu visibility.
    pub open: Option<bool>,
    /// Menu placement.
    pub placement: Placement,
    /// Whether `Enter` selects the focused suggestion.
    pub select_on_enter: bool,
    /// Component class prefix, under the `rs` namespace.
    pub class_prefix: String,
}

impl Default for AutocompleteProps {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            disabled: false,
            default_value: String::new(),
            value: None,
            open: None,
            placement: Placement::BottomStart,
            select_on_enter: true,
            class_prefix: String::from("auto-complete"),
        }
    }
}

/// Callbacks fired by an [`Autocomplete`].
#[derive(Default)]
pub struct AutocompleteCallbacks {
    /// The value changed, by typing or by selection.
    pub on_change: Option<Box<dyn FnMut(&str)>>,
    /// A suggestion was selected.
    pub on_select: Option<Box<dyn FnMut(&ItemData)>>,
    /// Keyboard focus moved to the suggestion with this value.
    pub on_menu_focus: Option<Box<dyn FnMut(&str)>>,
    /// The input gained focus and the menu may show.
    pub on_open: Option<Box<dyn FnMut()>>,
    /// The menu closed.
    pub on_close: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for AutocompleteCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteCallbacks")
            .field("on_change", &self.on_change.is_some())
            .field("on_select", &self.on_select.is_some())
            .field("on_menu_focus", &self.on_menu_focus.is_some())
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Autocomplete state machine.
pub struct Autocomplete {
    props: AutocompleteProps,
    callbacks: AutocompleteCallbacks,
    value: Controlled<String>,
    focused: bool,
    focus_item_value: Option<String>,
    pending_closes: SmallVec<[u64; 2]>,
    classes: ClassPrefix,
}

impl Autocomplete {
    /// Create an autocomplete.
    pub fn new(props: AutocompleteProps, callbacks: AutocompleteCallbacks) -> Self {
        let value = Controlled::new(props.value.clone(), props.default_value.clone());
        let focus_item_value = Some(props.default_value.clone()).filter(|v| !v.is_empty());
        let classes = ClassPrefix::new(&props.class_prefix);
        Self {
            props,
            callbacks,
            value,
            focused: false,
            focus_item_value,
            pending_closes: SmallVec::new(),
            classes,
        }
    }

    /// The configuration.
    pub fn props(&self) -> &AutocompleteProps {
        &self.props
    }

    /// Replace the suggestions.
    pub fn set_data(&mut self, data: Vec<ItemData>) {
        self.props.data = data;
    }

    /// Supply or remove the host-controlled value.
    pub fn set_value_prop(&mut self, value: Option<String>) {
        self.props.value.clone_from(&value);
        self.value.set_prop(value);
    }

    /// Supply or remove the host-controlled menu visibility.
    pub fn set_open_prop(&mut self, open: Option<bool>) {
        self.props.open = open;
    }

    /// The input value.
    pub fn value(&self) -> &str {
        self.value.get()
    }

    /// Value of the keyboard-focused suggestion.
    pub fn focus_item_value(&self) -> Option<&str> {
        self.focus_item_value.as_deref()
    }

    /// Suggestions matching the current input.
    pub fn visible_items(&self) -> Vec<&ItemData> {
        let value = self.value();
        if value.trim().is_empty() {
            return Vec::new();
        }
        let keyword = value.to_lowercase();
        self.props
            .data
            .iter()
            .filter(|item| item.matches(&keyword))
            .collect()
    }

    /// Whether the suggestion menu is shown.
    ///
    /// An `open` prop of `Some(true)` forces it; otherwise the input must be focused
    /// and at least one suggestion must match.
    pub fn is_open(&self) -> bool {
        self.props.open == Some(true) || (self.focused && !self.visible_items().is_empty())
    }

    /// Whether the suggestion with `value` has keyboard focus.
    pub fn is_item_focused(&self, value: &str) -> bool {
        self.focus_item_value.as_deref() == Some(value)
    }

    /// The input text changed.
    pub fn handle_change(&mut self, value: &str) {
        if self.props.disabled {
            return;
        }
        self.focused = true;
        self.focus_item_value = None;
        self.value.set(String::from(value));
        if let Some(on_change) = self.callbacks.on_change.as_mut() {
            on_change(value);
        }
    }

    /// The input gained focus.
    pub fn handle_focus(&mut self) {
        if self.props.disabled {
            return;
        }
        self.focused = true;
        if let Some(on_open) = self.callbacks.on_open.as_mut() {
            on_open();
        }
    }

    /// The input lost focus; schedules a close at `now + BLUR_CLOSE_DELAY_MS`.
    pub fn handle_blur(&mut self, now: u64) {
        self.pending_closes
            .push(now.saturating_add(BLUR_CLOSE_DELAY_MS));
    }

    /// Fire every deferred close due at `now`. Returns how many fired.
    pub fn poll(&mut self, now: u64) -> usize {
        let before = self.pending_closes.len();
        self.pending_closes.retain(|due| *due > now);
        let fired = before - self.pending_closes.len();
        for _ in 0..fired {
            self.close();
        }
        fired
    }

    /// Timestamp of the earliest deferred close, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending_closes.iter().copied().min()
    }

    /// Key pressed in the input. Returns whether the key was handled.
    ///
    /// Keys are only handled while the menu is shown.
    pub fn handle_keydown(&mut self, key: Key) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            Key::ArrowDown => self.focus_step(true),
            Key::ArrowUp => self.focus_step(false),
            Key::Enter if self.props.select_on_enter => self.select_focused(),
            Key::Escape => self.close(),
            _ => return false,
        }
        true
    }

    /// A suggestion was clicked.
    pub fn handle_item_select(&mut self, value: &str) {
        let Some(item) = self.props.data.iter().find(|item| item.value == value).cloned() else {
            log::warn!("autocomplete selection of unknown value {value:?}");
            return;
        };
        self.commit(&item);
    }

    /// Class names for the container.
    pub fn class_names(&self) -> Vec<String> {
        self.classes
            .with_modifiers(&[("disabled", self.props.disabled)])
    }

    /// Class of the suggestion menu.
    pub fn menu_class(&self) -> String {
        self.classes.prefix("menu")
    }

    fn close(&mut self) {
        self.focused = false;
        log::debug!("autocomplete menu closed");
        if let Some(on_close) = self.callbacks.on_close.as_mut() {
            on_close();
        }
    }

    fn focus_step(&mut self, forward: bool) {
        let items = self.visible_items();
        let current = self
            .focus_item_value
            .as_deref()
            .and_then(|focused| items.iter().position(|item| item.value == focused));
        let target = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => None,
            (Some(at), true) => Some(at + 1),
            (Some(at), false) => at.checked_sub(1),
        };
        let Some(value) = target.and_then(|at| items.get(at)).map(|item| item.value.clone())
        else {
            return;
        };
        if let Some(on_menu_focus) = self.callbacks.on_menu_focus.as_mut() {
            on_menu_focus(&value);
        }
        self.focus_item_value = Some(value);
    }

    fn select_focused(&mut self) {
        let Some(focused) = self.focus_item_value.as_deref() else {
            return;
        };
        let item = self.props.data.iter().find(|item| item.value == focused).cloned();
        match item {
            Some(item) => self.commit(&item),
            None => self.close(),
        }
    }

    fn commit(&mut self, item: &ItemData) {
        let changed = self.value() != item.value;
        self.value.set(item.value.clone());
        self.focus_item_value = Some(item.value.clone());
        if let Some(on_select) = self.callbacks.on_select.as_mut() {
            on_select(item);
        }
        if changed {
            if let Some(on_change) = self.callbacks.on_change.as_mut() {
                on_change(&item.value);
            }
        }
        self.close();
    }
}

impl fmt::Debug for Autocomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autocomplete")
            .field("props", &self.props)
            .field("callbacks", &self.callbacks)
            .field("value", &self.value)
            .field("focused", &self.focused)
            .field("focus_item_value", &self.focus_item_value)
            .field("pending_closes", &self.pending_closes)
            .field("classes", &self.classes)
            .finish()
    }
}
