// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_props --heading-base-level=0

//! Understory Props: the small shared layer under headless components.
//!
//! Component state machines such as menus, dropdowns, and forms all need the same few
//! helpers, and this crate keeps them in one place:
//!
//! - [`Controlled`]: controlled/uncontrolled value resolution. A value supplied by the
//!   parent (the "prop") always wins over the internally owned value.
//! - [`KeyEq`]: pluggable equality for opaque event keys, with [`Structural`] and
//!   [`Identity`] strategies, used wherever an `activeKey` or `eventKey` is matched.
//! - [`Chain`]: an ordered list of observers for one change, with early stop.
//! - [`ClassPrefix`]: `rs-dropdown-toggle` style class-name prefixing.
//! - [`Key`]: keyboard `key` values relevant to composite widgets.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_props::{Controlled, Key};
//!
//! // Uncontrolled: the internal value is used.
//! let mut open = Controlled::new(None, false);
//! open.set(true);
//! assert!(*open.get());
//!
//! // Controlled: the parent prop wins no matter what was set internally.
//! open.set_prop(Some(false));
//! open.set(true);
//! assert!(!*open.get());
//!
//! assert_eq!(Key::from_key_value(" "), Key::Space);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod chain;
mod class_prefix;
mod controlled;
mod key_eq;
mod keys;

pub use chain::{Chain, Outcome};
pub use class_prefix::{ClassPrefix, DEFAULT_NAMESPACE, kebab_case};
pub use controlled::Controlled;
pub use key_eq::{Identity, IdentityKey, KeyEq, KeyFn, Structural, contains_key, position_of_key};
pub use keys::Key;
