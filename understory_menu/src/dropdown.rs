// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dropdown shell: open state, trigger binding, keyboard routing, and submenus.
//!
//! A [`Dropdown`] owns the root [`MenuState`] of its menu plus one [`MenuState`] per
//! submenu, keyed by the id of the item that owns the submenu. Open submenus form a path
//! from the root menu down to the deepest open submenu; keyboard focus movement always
//! applies to the deepest one.
//!
//! Every close, whatever caused it, queues [`FrameRequest::FocusTrigger`]. The trigger
//! usually lost focus to the menu while it was open, so hosts drain
//! [`Dropdown::take_frame_requests`] on their next frame and focus the trigger element.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Debug};
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;
use understory_overlay::{Placement, RootClose, Triggers};
use understory_props::{ClassPrefix, Controlled, Key, KeyEq, Structural};

use crate::menu::{MenuItemProps, MenuState, MoveFocus};
use crate::sidenav::SidenavHandle;

/// Dropdown configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownProps<K> {
    /// Events on the toggle that open and close the menu. Only `CLICK`, `HOVER`, and
    /// `CONTEXT_MENU` have an effect.
    pub trigger: Triggers,
    /// Menu placement relative to the toggle.
    pub placement: Placement,
    /// Ignore trigger and keyboard events.
    pub disabled: bool,
    /// Host-controlled open state.
    pub open: Option<bool>,
    /// Initial open state when uncontrolled.
    pub default_open: bool,
    /// This dropdown's own key, used when it is nested in a sidenav.
    pub event_key: Option<K>,
    /// Key of the selected item.
    pub active_key: Option<K>,
    /// Render the title as a menu header.
    pub show_header: bool,
    /// Hide the caret on the toggle.
    pub no_caret: bool,
    /// Component class prefix, under the `rs` namespace.
    pub class_prefix: String,
    /// Suffix for the toggle and menu element ids. The host keeps it unique
    /// among dropdowns with the same class prefix.
    pub id: String,
}

impl<K> Default for DropdownProps<K> {
    fn default() -> Self {
        Self {
            trigger: Triggers::CLICK,
            placement: Placement::BottomStart,
            disabled: false,
            open: None,
            default_open: false,
            event_key: None,
            active_key: None,
            show_header: false,
            no_caret: false,
            class_prefix: String::from("dropdown"),
            id: String::new(),
        }
    }
}

/// Callbacks fired by a [`Dropdown`].
pub struct DropdownCallbacks<K> {
    /// The menu is about to open.
    pub on_open: Option<Box<dyn FnMut()>>,
    /// The menu is about to close.
    pub on_close: Option<Box<dyn FnMut()>>,
    /// The open state was set; receives the new state.
    pub on_toggle: Option<Box<dyn FnMut(bool)>>,
    /// An item with an event key was activated.
    pub on_select: Option<Box<dyn FnMut(&K)>>,
}

impl<K> Default for DropdownCallbacks<K> {
    fn default() -> Self {
        Self {
            on_open: None,
            on_close: None,
            on_toggle: None,
            on_select: None,
        }
    }
}

impl<K> Debug for DropdownCallbacks<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownCallbacks")
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_toggle", &self.on_toggle.is_some())
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

/// Work the host performs on its next frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameRequest {
    /// Move document focus back to the toggle button.
    FocusTrigger,
}

/// ARIA attributes for the toggle button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonAria {
    /// Element id.
    pub id: String,
    /// `role`.
    pub role: &'static str,
    /// `aria-haspopup`.
    pub has_popup: &'static str,
    /// `aria-expanded`; omitted (`None`) while the menu is hidden.
    pub expanded: Option<bool>,
    /// `aria-controls`.
    pub controls: String,
}

/// ARIA attributes for the menu element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuAria<'a, I> {
    /// Element id.
    pub id: String,
    /// `role`.
    pub role: &'static str,
    /// `aria-labelledby`.
    pub labelled_by: String,
    /// `aria-activedescendant`.
    pub active_descendant: Option<&'a I>,
    /// `hidden`.
    pub hidden: bool,
}

/// Dropdown state machine.
///
/// `I` identifies menu items, `K` is the opaque event key reported on selection, and `C`
/// compares event keys.
pub struct Dropdown<I, K, C = Structural> {
    props: DropdownProps<K>,
    callbacks: DropdownCallbacks<K>,
    comparator: C,
    open: Controlled<bool>,
    menu: MenuState<I, K>,
    submenus: HashMap<I, MenuState<I, K>>,
    open_path: SmallVec<[I; 4]>,
    sidenav: Option<SidenavHandle<K, C>>,
    root_close: RootClose,
    classes: ClassPrefix,
    focus_first_on_open: bool,
    frame_requests: Vec<FrameRequest>,
}

impl<I, K> Dropdown<I, K, Structural>
where
    I: Clone + Eq + Hash + Debug,
    K: Clone,
    Structural: KeyEq<K>,
{
    /// A dropdown comparing event keys structurally.
    pub fn new(props: DropdownProps<K>, callbacks: DropdownCallbacks<K>) -> Self {
        Self::with_comparator(props, callbacks, Structural)
    }
}

impl<I, K, C> Dropdown<I, K, C>
where
    I: Clone + Eq + Hash + Debug,
    K: Clone,
    C: KeyEq<K>,
{
    /// A dropdown comparing event keys with `comparator`.
    pub fn with_comparator(
        props: DropdownProps<K>,
        callbacks: DropdownCallbacks<K>,
        comparator: C,
    ) -> Self {
        let open = Controlled::new(props.open, props.default_open);
        let classes = ClassPrefix::new(&props.class_prefix);
        Self {
            props,
            callbacks,
            comparator,
            open,
            menu: MenuState::new(),
            submenus: HashMap::new(),
            open_path: SmallVec::new(),
            sidenav: None,
            root_close: RootClose::without_escape(),
            classes,
            focus_first_on_open: false,
            frame_requests: Vec::new(),
        }
    }

    /// The configuration.
    pub fn props(&self) -> &DropdownProps<K> {
        &self.props
    }

    /// Enable or disable the dropdown.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.props.disabled = disabled;
    }

    /// Change the selected item's key.
    pub fn set_active_key(&mut self, key: Option<K>) {
        self.props.active_key = key;
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        *self.open.get()
    }

    /// Supply or remove the host-controlled open state.
    ///
    /// A keyboard open the host deferred focuses the first item once the menu opens.
    pub fn set_open_prop(&mut self, open: Option<bool>) {
        self.props.open = open;
        self.open.set_prop(open);
        if self.is_open() && core::mem::take(&mut self.focus_first_on_open) {
            self.menu.move_focus(MoveFocus::First);
        }
    }

    /// Nest this dropdown in a sidenav.
    pub fn attach_sidenav(&mut self, sidenav: SidenavHandle<K, C>) {
        self.sidenav = Some(sidenav);
    }

    /// Detach from the sidenav, if attached.
    pub fn detach_sidenav(&mut self) -> Option<SidenavHandle<K, C>> {
        self.sidenav.take()
    }

    /// Whether the dropdown sits in an expanded sidenav, where the menu folds open inline
    /// and trigger events are not bound.
    pub fn is_collapsible(&self) -> bool {
        self.sidenav
            .as_ref()
            .is_some_and(|nav| nav.borrow().expanded())
    }

    /// Whether the sidenav lists this dropdown's key as open.
    pub fn menu_expanded(&self) -> bool {
        match (&self.sidenav, &self.props.event_key) {
            (Some(nav), Some(key)) => nav.borrow().is_open(key),
            _ => false,
        }
    }

    /// The root menu.
    pub fn menu(&self) -> &MenuState<I, K> {
        &self.menu
    }

    /// The submenu owned by item `owner`.
    pub fn submenu(&self, owner: &I) -> Option<&MenuState<I, K>> {
        self.submenus.get(owner)
    }

    /// Owners of the open submenus, outermost first.
    pub fn open_submenus(&self) -> &[I] {
        &self.open_path
    }

    /// Whether the submenu owned by `owner` is shown.
    pub fn is_submenu_open(&self, owner: &I) -> bool {
        if self.is_collapsible() {
            let key = self
                .locate(owner)
                .and_then(|parent| self.menu_ref(parent.as_ref()))
                .and_then(|menu| menu.item(owner))
                .and_then(|item| item.props.event_key.as_ref());
            return match (key, &self.sidenav) {
                (Some(key), Some(nav)) => nav.borrow().is_open(key),
                _ => false,
            };
        }
        self.open_path.contains(owner)
    }

    /// Register an item in the root menu.
    pub fn register_item(&mut self, id: I, props: MenuItemProps<K>) {
        self.menu.register_item(id, props);
    }

    /// Remove an item from the root menu, along with any submenu it owned.
    pub fn unregister_item(&mut self, id: &I) {
        self.forget_submenu(id);
        self.menu.unregister_item(id);
    }

    /// Register an item in the submenu owned by `owner`.
    pub fn register_submenu_item(&mut self, owner: I, id: I, props: MenuItemProps<K>) {
        self.submenus
            .entry(owner)
            .or_default()
            .register_item(id, props);
    }

    /// Remove an item from the submenu owned by `owner`.
    pub fn unregister_submenu_item(&mut self, owner: &I, id: &I) {
        self.forget_submenu(id);
        if let Some(menu) = self.submenus.get_mut(owner) {
            menu.unregister_item(id);
        }
    }

    /// Open, close, or (with `None`) flip the menu.
    ///
    /// Fires `on_open` or `on_close`, updates the open state, then fires `on_toggle`.
    /// Closing clears every active pointer and queues [`FrameRequest::FocusTrigger`].
    pub fn toggle(&mut self, next: Option<bool>) {
        let next = next.unwrap_or(!self.is_open());
        self.focus_first_on_open = false;
        let notify = if next {
            self.callbacks.on_open.as_mut()
        } else {
            self.callbacks.on_close.as_mut()
        };
        if let Some(notify) = notify {
            notify();
        }
        self.open.set(next);
        log::debug!(
            "dropdown {:?} {}",
            self.props.id,
            if next { "opened" } else { "closed" }
        );
        if let Some(on_toggle) = self.callbacks.on_toggle.as_mut() {
            on_toggle(next);
        }
        if !next {
            self.close_submenus_from(0);
            self.menu.move_focus(MoveFocus::None);
            self.frame_requests.push(FrameRequest::FocusTrigger);
        }
    }

    /// Click on the toggle.
    ///
    /// In a sidenav this also toggles the dropdown's key among the sidenav's open keys.
    pub fn handle_click(&mut self) {
        if self.props.disabled {
            return;
        }
        if self.binds(Triggers::CLICK) {
            self.toggle(None);
        }
        if let (Some(nav), Some(key)) = (&self.sidenav, &self.props.event_key) {
            nav.borrow_mut().handle_open_change(key);
        }
    }

    /// Context-menu gesture on the toggle.
    pub fn handle_context_menu(&mut self) {
        if !self.props.disabled && self.binds(Triggers::CONTEXT_MENU) {
            self.toggle(None);
        }
    }

    /// Pointer entered the dropdown.
    pub fn handle_mouse_enter(&mut self) {
        if !self.props.disabled && self.binds(Triggers::HOVER) {
            self.toggle(Some(true));
        }
    }

    /// Pointer left the dropdown.
    pub fn handle_mouse_leave(&mut self) {
        if !self.props.disabled && self.binds(Triggers::HOVER) {
            self.toggle(Some(false));
        }
    }

    /// Key pressed on the toggle button. Returns whether the key was handled, in which
    /// case the host should prevent its default action and stop propagation.
    pub fn handle_button_keydown(&mut self, key: Key) -> bool {
        if self.props.disabled {
            return false;
        }
        match key {
            Key::Enter | Key::Space if self.is_open() => {
                self.toggle(Some(false));
                true
            }
            Key::Enter | Key::Space | Key::ArrowDown if !self.is_open() => {
                self.toggle(Some(true));
                if self.is_open() {
                    self.menu.move_focus(MoveFocus::First);
                } else {
                    self.focus_first_on_open = true;
                }
                true
            }
            _ => false,
        }
    }

    /// Key pressed inside the open menu. Returns whether the key was handled.
    pub fn handle_menu_keydown(&mut self, key: Key) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            Key::ArrowDown => self.move_in_deepest(MoveFocus::Next),
            Key::ArrowUp => self.move_in_deepest(MoveFocus::Prev),
            Key::Home => self.move_in_deepest(MoveFocus::First),
            Key::End => self.move_in_deepest(MoveFocus::Last),
            Key::ArrowRight => {
                self.open_active_submenu();
            }
            Key::ArrowLeft => {
                if let Some(depth) = self.open_path.len().checked_sub(1) {
                    self.close_submenus_from(depth);
                }
            }
            Key::Enter | Key::Space => {
                self.activate_current();
            }
            Key::Escape => self.toggle(Some(false)),
            _ => return false,
        }
        true
    }

    /// Route a key to the menu while open, otherwise to the toggle button.
    pub fn handle_keydown(&mut self, key: Key) -> bool {
        if self.is_open() {
            self.handle_menu_keydown(key)
        } else {
            self.handle_button_keydown(key)
        }
    }

    /// Activate the active item of the deepest open menu.
    ///
    /// Submenu owners open their submenu and focus its first item; other items report
    /// their key through `on_select` and close the dropdown. Returns `false` when no item
    /// is active.
    pub fn activate_current(&mut self) -> bool {
        let parent = self.open_path.last().cloned();
        let Some(item) = self
            .menu_ref(parent.as_ref())
            .and_then(MenuState::active_item)
        else {
            return false;
        };
        if item.props.submenu {
            let owner = item.id.clone();
            self.open_submenu(parent.as_ref(), owner);
            return true;
        }
        let key = item.props.event_key.clone();
        self.select(key.as_ref());
        true
    }

    /// Click on a menu item, in the root menu or any submenu.
    pub fn handle_item_click(&mut self, id: &I) {
        let Some(parent) = self.locate(id) else {
            log::warn!("click on unregistered menu item {id:?}");
            return;
        };
        let Some(item) = self
            .menu_ref(parent.as_ref())
            .and_then(|menu| menu.item(id))
        else {
            return;
        };
        if item.props.disabled {
            return;
        }
        let key = item.props.event_key.clone();
        if item.props.submenu {
            if self.is_collapsible() {
                if let (Some(nav), Some(key)) = (&self.sidenav, &key) {
                    nav.borrow_mut().handle_open_change(key);
                }
            } else if let Some(at) = self.open_path.iter().position(|owner| owner == id) {
                self.close_submenus_from(at);
            } else {
                self.open_submenu(parent.as_ref(), id.clone());
            }
            return;
        }
        self.select(key.as_ref());
    }

    /// Pointer entered a menu item.
    pub fn handle_item_mouse_enter(&mut self, id: &I) {
        let Some(parent) = self.locate(id) else {
            return;
        };
        if let Some(menu) = self.menu_mut(parent.as_ref()) {
            menu.move_focus(MoveFocus::Specific(id.clone()));
        }
    }

    /// Pointer left a menu item.
    pub fn handle_item_mouse_leave(&mut self, id: &I) {
        let Some(parent) = self.locate(id) else {
            return;
        };
        if let Some(menu) = self.menu_mut(parent.as_ref()) {
            menu.move_focus(MoveFocus::None);
        }
    }

    /// Pointer-down somewhere in the document while the menu may be open.
    ///
    /// Returns whether it closed the menu. `Escape` is not a root close here; the menu
    /// handles it in [`Dropdown::handle_menu_keydown`].
    pub fn handle_root_close(&mut self, inside_trigger: bool, inside_menu: bool) -> bool {
        if !self.is_open() || !self.root_close.on_pointer_down(inside_trigger, inside_menu) {
            return false;
        }
        self.toggle(None);
        true
    }

    /// Drain the work queued for the host's next frame.
    pub fn take_frame_requests(&mut self) -> Vec<FrameRequest> {
        core::mem::take(&mut self.frame_requests)
    }

    fn element_id(&self, part: &str) -> String {
        if self.props.id.is_empty() {
            self.classes.prefix(part)
        } else {
            self.classes.prefix(&format!("{part}-{}", self.props.id))
        }
    }

    /// Element id of the toggle button.
    pub fn button_id(&self) -> String {
        self.element_id("button")
    }

    /// Element id of the menu.
    pub fn menu_id(&self) -> String {
        self.element_id("menu")
    }

    /// ARIA attributes for the toggle button.
    pub fn button_aria(&self) -> ButtonAria {
        ButtonAria {
            id: self.button_id(),
            role: "button",
            has_popup: "menu",
            expanded: self.is_open().then_some(true),
            controls: self.menu_id(),
        }
    }

    /// ARIA attributes for the root menu.
    pub fn menu_aria(&self) -> MenuAria<'_, I> {
        MenuAria {
            id: self.menu_id(),
            role: "menu",
            labelled_by: self.button_id(),
            active_descendant: self.menu.active_descendant(),
            hidden: !self.is_open(),
        }
    }

    /// Class of the menu header, when `show_header` is set.
    pub fn header_class(&self) -> Option<String> {
        self.props.show_header.then(|| self.classes.prefix("header"))
    }

    /// Class names for the dropdown container.
    pub fn class_names(&self) -> Vec<String> {
        let placement = format!("placement-{}", self.props.placement.kebab());
        let in_sidenav = self.sidenav.is_some();
        let expanded = self.menu_expanded();
        self.classes.with_modifiers(&[
            (placement.as_str(), true),
            ("expand", in_sidenav && expanded),
            ("collapse", in_sidenav && !expanded),
            ("disabled", self.props.disabled),
            ("open", self.is_open()),
            ("no-caret", self.props.no_caret),
        ])
    }

    /// Whether `key` is the dropdown's selected key.
    pub fn is_item_active(&self, key: &K) -> bool {
        self.props
            .active_key
            .as_ref()
            .is_some_and(|active| self.comparator.key_eq(active, key))
    }

    fn binds(&self, kind: Triggers) -> bool {
        !self.is_collapsible() && self.props.trigger.contains(kind)
    }

    fn select(&mut self, key: Option<&K>) {
        if let Some(key) = key {
            if let Some(on_select) = self.callbacks.on_select.as_mut() {
                on_select(key);
            }
            if let Some(nav) = &self.sidenav {
                nav.borrow_mut().handle_select(key);
            }
        }
        self.toggle(Some(false));
    }

    fn move_in_deepest(&mut self, to: MoveFocus<I>) {
        let menu = match self.open_path.last() {
            Some(owner) => self.submenus.get_mut(owner),
            None => Some(&mut self.menu),
        };
        if let Some(menu) = menu {
            menu.move_focus(to);
        }
    }

    fn open_active_submenu(&mut self) {
        let parent = self.open_path.last().cloned();
        let owner = self
            .menu_ref(parent.as_ref())
            .and_then(MenuState::active_item)
            .filter(|item| item.props.submenu)
            .map(|item| item.id.clone());
        if let Some(owner) = owner {
            self.open_submenu(parent.as_ref(), owner);
        }
    }

    /// Open the submenu of `owner`, an item of the menu owned by `parent` (`None` for the
    /// root). Deeper submenus of `parent` close first.
    fn open_submenu(&mut self, parent: Option<&I>, owner: I) {
        let keep = match parent {
            None => 0,
            Some(parent) => match self.open_path.iter().position(|o| o == parent) {
                Some(at) => at + 1,
                None => return,
            },
        };
        self.close_submenus_from(keep);
        log::trace!("submenu {owner:?} opened");
        self.submenus
            .entry(owner.clone())
            .or_default()
            .move_focus(MoveFocus::First);
        self.open_path.push(owner);
    }

    fn close_submenus_from(&mut self, depth: usize) {
        if depth >= self.open_path.len() {
            return;
        }
        for owner in self.open_path.drain(depth..) {
            if let Some(menu) = self.submenus.get_mut(&owner) {
                menu.move_focus(MoveFocus::None);
            }
        }
    }

    fn forget_submenu(&mut self, owner: &I) {
        if let Some(at) = self.open_path.iter().position(|o| o == owner) {
            self.close_submenus_from(at);
        }
        self.submenus.remove(owner);
    }

    /// Which menu holds `id`: `Some(None)` for the root, `Some(Some(owner))` for a submenu.
    fn locate(&self, id: &I) -> Option<Option<I>> {
        if self.menu.index_of(id).is_some() {
            return Some(None);
        }
        self.submenus
            .iter()
            .find(|(_, menu)| menu.index_of(id).is_some())
            .map(|(owner, _)| Some(owner.clone()))
    }

    fn menu_ref(&self, owner: Option<&I>) -> Option<&MenuState<I, K>> {
        match owner {
            None => Some(&self.menu),
            Some(owner) => self.submenus.get(owner),
        }
    }

    fn menu_mut(&mut self, owner: Option<&I>) -> Option<&mut MenuState<I, K>> {
        match owner {
            None => Some(&mut self.menu),
            Some(owner) => self.submenus.get_mut(owner),
        }
    }
}

impl<I: Debug, K: Debug, C> Debug for Dropdown<I, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("props", &self.props)
            .field("open", &self.open)
            .field("menu", &self.menu)
            .field("submenus", &self.submenus)
            .field("open_path", &self.open_path)
            .field("focus_first_on_open", &self.focus_first_on_open)
            .field("frame_requests", &self.frame_requests)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidenav::{Sidenav, SidenavCallbacks, SidenavProps};
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    fn logging_callbacks(log: &Log) -> DropdownCallbacks<&'static str> {
        let (a, b, c, d) = (
            Rc::clone(log),
            Rc::clone(log),
            Rc::clone(log),
            Rc::clone(log),
        );
        DropdownCallbacks {
            on_open: Some(Box::new(move || a.borrow_mut().push("open".into()))),
            on_close: Some(Box::new(move || b.borrow_mut().push("close".into()))),
            on_toggle: Some(Box::new(move |open: bool| {
                c.borrow_mut().push(format!("toggle:{open}"));
            })),
            on_select: Some(Box::new(move |key: &&'static str| {
                d.borrow_mut().push(format!("select:{key}"));
            })),
        }
    }

    fn three_items(dd: &mut Dropdown<u32, &'static str>) {
        dd.register_item(1, MenuItemProps::keyed("new"));
        dd.register_item(2, MenuItemProps::keyed("open"));
        dd.register_item(3, MenuItemProps::keyed("save"));
    }

    #[test]
    fn click_toggles_with_callbacks_in_order() {
        let log = Log::default();
        let mut dd: Dropdown<u32, &str> =
            Dropdown::new(DropdownProps::default(), logging_callbacks(&log));
        dd.handle_click();
        assert!(dd.is_open());
        dd.handle_click();
        assert!(!dd.is_open());
        assert_eq!(
            *log.borrow(),
            ["open", "toggle:true", "close", "toggle:false"]
        );
        assert_eq!(dd.take_frame_requests(), vec![FrameRequest::FocusTrigger]);
        assert!(dd.take_frame_requests().is_empty());
    }

    #[test]
    fn disabled_ignores_triggers_and_keys() {
        let log = Log::default();
        let mut dd: Dropdown<u32, &str> = Dropdown::new(
            DropdownProps {
                disabled: true,
                trigger: Triggers::all(),
                ..DropdownProps::default()
            },
            logging_callbacks(&log),
        );
        dd.handle_click();
        dd.handle_context_menu();
        dd.handle_mouse_enter();
        assert!(!dd.handle_button_keydown(Key::Enter));
        assert!(!dd.is_open());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn hover_trigger_opens_and_closes() {
        let mut dd: Dropdown<u32, &str> = Dropdown::new(
            DropdownProps {
                trigger: Triggers::HOVER,
                ..DropdownProps::default()
            },
            DropdownCallbacks::default(),
        );
        dd.handle_click();
        assert!(!dd.is_open());
        dd.handle_mouse_enter();
        assert!(dd.is_open());
        dd.handle_mouse_leave();
        assert!(!dd.is_open());
    }

    #[test]
    fn button_keys_open_and_focus_first_item() {
        let mut dd = Dropdown::new(DropdownProps::default(), DropdownCallbacks::default());
        three_items(&mut dd);
        assert!(dd.handle_keydown(Key::Space));
        assert!(dd.is_open());
        assert_eq!(dd.menu().active_descendant(), Some(&1));
        assert_eq!(dd.menu_aria().active_descendant, Some(&1));
        assert!(dd.handle_button_keydown(Key::Enter));
        assert!(!dd.is_open());
        assert_eq!(dd.menu().active_index(), None);
    }

    #[test]
    fn enter_selects_active_item_and_closes() {
        let log = Log::default();
        let mut dd = Dropdown::new(DropdownProps::default(), logging_callbacks(&log));
        three_items(&mut dd);
        dd.handle_keydown(Key::ArrowDown);
        dd.handle_keydown(Key::ArrowDown);
        dd.handle_keydown(Key::End);
        log.borrow_mut().clear();
        assert!(dd.handle_keydown(Key::Enter));
        assert!(!dd.is_open());
        assert_eq!(*log.borrow(), ["select:save", "close", "toggle:false"]);
    }

    #[test]
    fn enter_without_active_item_is_a_noop() {
        let mut dd = Dropdown::new(DropdownProps::default(), DropdownCallbacks::default());
        three_items(&mut dd);
        dd.handle_click();
        assert!(dd.handle_menu_keydown(Key::Enter));
        assert!(dd.is_open());
        assert!(!dd.activate_current());
    }

    #[test]
    fn item_click_skips_disabled_and_selects() {
        let log = Log::default();
        let mut dd = Dropdown::new(DropdownProps::default(), logging_callbacks(&log));
        dd.register_item(
            1,
            MenuItemProps {
                disabled: true,
                event_key: Some("cut"),
                submenu: false,
            },
        );
        dd.register_item(2, MenuItemProps::keyed("copy"));
        dd.handle_click();
        log.borrow_mut().clear();

        dd.handle_item_click(&1);
        assert!(dd.is_open());
        assert!(log.borrow().is_empty());

        dd.handle_item_mouse_enter(&2);
        assert!(dd.menu().is_active(&2));
        dd.handle_item_mouse_leave(&2);
        assert_eq!(dd.menu().active_index(), None);

        dd.handle_item_click(&2);
        assert!(!dd.is_open());
        assert_eq!(log.borrow()[0], "select:copy");
    }

    #[test]
    fn submenus_open_with_arrow_right_and_close_with_arrow_left() {
        let mut dd = Dropdown::new(DropdownProps::default(), DropdownCallbacks::default());
        dd.register_item(1, MenuItemProps::keyed("file"));
        dd.register_item(
            2,
            MenuItemProps {
                submenu: true,
                ..MenuItemProps::default()
            },
        );
        dd.register_submenu_item(2, 20, MenuItemProps::keyed("recent-a"));
        dd.register_submenu_item(2, 21, MenuItemProps::keyed("recent-b"));

        dd.handle_keydown(Key::ArrowDown);
        dd.handle_keydown(Key::ArrowDown);
        assert!(dd.menu().is_active(&2));

        dd.handle_keydown(Key::ArrowRight);
        assert_eq!(dd.open_submenus(), &[2]);
        assert!(dd.is_submenu_open(&2));
        assert_eq!(dd.submenu(&2).and_then(MenuState::active_descendant), Some(&20));

        // Focus moves within the deepest open menu only.
        dd.handle_keydown(Key::ArrowDown);
        assert_eq!(dd.submenu(&2).and_then(MenuState::active_descendant), Some(&21));
        assert!(dd.menu().is_active(&2));

        dd.handle_keydown(Key::ArrowLeft);
        assert!(dd.open_submenus().is_empty());
        assert_eq!(dd.submenu(&2).and_then(MenuState::active_index), None);
        assert!(dd.is_open());
    }

    #[test]
    fn enter_on_submenu_owner_opens_it() {
        let log = Log::default();
        let mut dd = Dropdown::new(DropdownProps::default(), logging_callbacks(&log));
        dd.register_item(
            1,
            MenuItemProps {
                submenu: true,
                ..MenuItemProps::default()
            },
        );
        dd.register_submenu_item(1, 10, MenuItemProps::keyed("nested"));
        dd.handle_keydown(Key::Enter);
        dd.handle_keydown(Key::Enter);
        assert_eq!(dd.open_submenus(), &[1]);
        dd.handle_keydown(Key::Enter);
        assert!(!dd.is_open());
        assert!(dd.open_submenus().is_empty());
        assert!(log.borrow().iter().any(|entry| entry == "select:nested"));
    }

    #[test]
    fn escape_closes_everything_and_requests_trigger_focus() {
        let mut dd = Dropdown::new(DropdownProps::default(), DropdownCallbacks::default());
        three_items(&mut dd);
        dd.handle_keydown(Key::Enter);
        dd.take_frame_requests();
        assert!(dd.handle_keydown(Key::Escape));
        assert!(!dd.is_open());
        assert_eq!(dd.take_frame_requests(), vec![FrameRequest::FocusTrigger]);
    }

    #[test]
    fn root_close_ignores_inside_clicks() {
        let mut dd: Dropdown<u32, &str> =
            Dropdown::new(DropdownProps::default(), DropdownCallbacks::default());
        assert!(!dd.handle_root_close(false, false));
        dd.handle_click();
        assert!(!dd.handle_root_close(true, false));
        assert!(!dd.handle_root_close(false, true));
        assert!(dd.handle_root_close(false, false));
        assert!(!dd.is_open());
    }

    #[test]
    fn controlled_open_reports_but_keeps_prop() {
        let log = Log::default();
        let mut dd: Dropdown<u32, &str> = Dropdown::new(
            DropdownProps {
                open: Some(false),
                ..DropdownProps::default()
            },
            logging_callbacks(&log),
        );
        dd.handle_click();
        assert!(!dd.is_open());
        assert_eq!(*log.borrow(), ["open", "toggle:true"]);
        dd.set_open_prop(Some(true));
        assert!(dd.is_open());
    }

    #[test]
    fn controlled_keyboard_open_focuses_once_shown() {
        let log = Log::default();
        let mut dd: Dropdown<u32, &str> = Dropdown::new(
            DropdownProps {
                open: Some(false),
                ..DropdownProps::default()
            },
            logging_callbacks(&log),
        );
        three_items(&mut dd);
        assert!(dd.handle_button_keydown(Key::ArrowDown));
        assert!(!dd.is_open());
        assert_eq!(dd.menu().active_descendant(), None);
        assert_eq!(*log.borrow(), ["open", "toggle:true"]);

        dd.set_open_prop(Some(true));
        assert_eq!(dd.menu().active_descendant(), Some(&1));
    }

    #[test]
    fn ids_without_suffix_use_the_prefix() {
        let dd: Dropdown<u32, &str> = Dropdown::new(
            DropdownProps {
                class_prefix: String::from("picker"),
                ..DropdownProps::default()
            },
            DropdownCallbacks::default(),
        );
        assert_eq!(dd.button_id(), "rs-picker-button");
        assert_eq!(dd.menu_aria().labelled_by, "rs-picker-button");
        assert_eq!(dd.menu_id(), "rs-picker-menu");
    }

    #[test]
    fn aria_and_classes() {
        let mut dd: Dropdown<u32, &str> = Dropdown::new(
            DropdownProps {
                no_caret: true,
                placement: Placement::TopEnd,
                active_key: Some("b"),
                id: String::from("file"),
                ..DropdownProps::default()
            },
            DropdownCallbacks::default(),
        );
        let button = dd.button_aria();
        assert_eq!(button.expanded, None);
        assert_eq!(button.id, "rs-dropdown-button-file");
        assert_eq!(button.controls, "rs-dropdown-menu-file");
        assert!(dd.menu_aria().hidden);

        dd.toggle(Some(true));
        assert_eq!(dd.button_aria().expanded, Some(true));
        assert_eq!(dd.menu_aria().labelled_by, dd.button_id());
        assert_eq!(
            dd.class_names(),
            [
                "rs-dropdown",
                "rs-dropdown-placement-top-end",
                "rs-dropdown-open",
                "rs-dropdown-no-caret"
            ]
        );
        assert!(dd.is_item_active(&"b"));
        assert!(!dd.is_item_active(&"a"));
        assert_eq!(dd.header_class(), None);
    }

    #[test]
    fn expanded_sidenav_replaces_trigger_with_open_keys() {
        let nav = Sidenav::new(SidenavProps::default(), SidenavCallbacks::default()).into_handle();
        let mut dd: Dropdown<u32, &str> = Dropdown::new(
            DropdownProps {
                event_key: Some("settings"),
                ..DropdownProps::default()
            },
            DropdownCallbacks::default(),
        );
        dd.attach_sidenav(Rc::clone(&nav));
        assert!(dd.is_collapsible());

        dd.handle_click();
        assert!(!dd.is_open());
        assert!(dd.menu_expanded());
        assert!(dd.class_names().contains(&String::from("rs-dropdown-expand")));

        dd.handle_click();
        assert!(!dd.menu_expanded());

        // A collapsed sidenav binds triggers again, and still tracks the key.
        nav.borrow_mut().set_expanded(false);
        dd.handle_click();
        assert!(dd.is_open());
        assert!(dd.menu_expanded());
    }

    #[test]
    fn unregistering_submenu_owner_drops_its_menu() {
        let mut dd: Dropdown<u32, &str> =
            Dropdown::new(DropdownProps::default(), DropdownCallbacks::default());
        dd.register_item(
            1,
            MenuItemProps {
                submenu: true,
                ..MenuItemProps::default()
            },
        );
        dd.register_submenu_item(1, 10, MenuItemProps::default());
        dd.handle_click();
        dd.handle_item_click(&1);
        assert_eq!(dd.open_submenus(), &[1]);
        dd.unregister_item(&1);
        assert!(dd.open_submenus().is_empty());
        assert!(dd.submenu(&1).is_none());
        assert!(dd.menu().is_empty());
    }
}
