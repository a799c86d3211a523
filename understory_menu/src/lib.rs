// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: headless menu interaction state machines.
//!
//! This crate turns keyboard and pointer events into menu state without rendering
//! anything:
//!
//! - [`MenuState`]: the registered items of one menu and the "active item" pointer that
//!   a renderer exposes through `aria-activedescendant`. Movement goes through a pluggable
//!   [`FocusPolicy`]; the default [`LinearPolicy`] skips disabled items and does not wrap.
//! - [`Dropdown`]: a menu button. It owns the open state (controlled or uncontrolled),
//!   binds click, hover, and context-menu triggers, routes keys between the button and
//!   the open menu, and tracks nested submenus.
//! - [`Sidenav`]: open keys for dropdowns nested in a side navigation. It is handed to
//!   dropdowns explicitly as a [`SidenavHandle`].
//! - [`Autocomplete`]: an input with a filtered suggestion menu and a deferred close on
//!   blur.
//!
//! Items are identified by a host id `I` (typically the element id) and report an opaque
//! event key `K` on selection. Keys are compared with an explicit [`KeyEq`] strategy.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_menu::{Dropdown, DropdownCallbacks, DropdownProps, FrameRequest, MenuItemProps};
//! use understory_props::Key;
//!
//! let mut dropdown: Dropdown<&str, u32> =
//!     Dropdown::new(DropdownProps::default(), DropdownCallbacks::default());
//! dropdown.register_item("copy", MenuItemProps::keyed(1));
//! dropdown.register_item("paste", MenuItemProps { disabled: true, ..MenuItemProps::keyed(2) });
//! dropdown.register_item("delete", MenuItemProps::keyed(3));
//!
//! // Enter on the button opens the menu and focuses the first item.
//! assert!(dropdown.handle_keydown(Key::Enter));
//! assert_eq!(dropdown.menu().active_descendant(), Some(&"copy"));
//!
//! // Arrow keys skip the disabled item.
//! dropdown.handle_keydown(Key::ArrowDown);
//! assert_eq!(dropdown.menu().active_descendant(), Some(&"delete"));
//!
//! // Escape closes, and the host refocuses the button on its next frame.
//! dropdown.handle_keydown(Key::Escape);
//! assert!(!dropdown.is_open());
//! assert_eq!(dropdown.take_frame_requests(), [FrameRequest::FocusTrigger]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `understory_overlay`.
//! - `libm`: `no_std` + `alloc` builds relying on `libm` through `understory_overlay`.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`KeyEq`]: understory_props::KeyEq

#![no_std]

extern crate alloc;

mod autocomplete;
mod dropdown;
pub mod focus;
mod menu;
mod sidenav;

pub use autocomplete::{
    Autocomplete, AutocompleteCallbacks, AutocompleteProps, BLUR_CLOSE_DELAY_MS, ItemData,
};
pub use dropdown::{
    ButtonAria, Dropdown, DropdownCallbacks, DropdownProps, FrameRequest, MenuAria,
};
pub use focus::{FocusPolicy, Focusable, LinearPolicy, Navigation, WrapMode};
pub use menu::{MenuItem, MenuItemProps, MenuState, MoveFocus};
pub use sidenav::{
    Appearance, Sidenav, SidenavCallbacks, SidenavHandle, SidenavProps,
};
