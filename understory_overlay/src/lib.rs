// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: headless primitives for tooltips, popovers, and menus.
//!
//! An overlay is a floating surface anchored to a trigger element. This crate covers the
//! parts of overlays that are behavior rather than rendering:
//!
//! - [`Placement`]: the twelve named placements plus automatic ones, including the legacy
//!   `bottomLeft`-style spellings and right-to-left mirroring.
//! - [`compute_position`]: where the overlay goes, given the trigger rectangle, the overlay
//!   size, and the container it must stay inside.
//! - [`OverlayTrigger`]: which pointer and focus events open or close an overlay, with
//!   optional open/close delays.
//! - [`Whisper`]: an [`OverlayTrigger`] bundled with a placement and open/close callbacks.
//! - [`RootClose`]: whether a pointer-down elsewhere in the document, or `Escape`, should
//!   close an open overlay.
//! - [`Portal`]: which container overlay content mounts into.
//!
//! Geometry is expressed with [`kurbo`] types. All time-dependent operations take a
//! millisecond timestamp supplied by the host; the crate owns no timers. Hosts call
//! [`OverlayTrigger::poll`] from their frame or timer loop to fire delayed transitions.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_overlay::{compute_position, OverlayTrigger, Placement, Transition, Triggers, TriggerConfig};
//!
//! let mut trigger = OverlayTrigger::new(TriggerConfig {
//!     trigger: Triggers::HOVER,
//!     delay_open: Some(200),
//!     ..TriggerConfig::default()
//! });
//!
//! // Hovering schedules an open 200ms later.
//! assert_eq!(trigger.on_mouse_enter(1_000), None);
//! assert_eq!(trigger.poll(1_100), None);
//! assert_eq!(trigger.poll(1_200), Some(Transition::Open));
//!
//! // Position a 100×40 tooltip under a button.
//! let button = Rect::new(50.0, 50.0, 150.0, 80.0);
//! let pos = compute_position(
//!     button,
//!     Size::new(100.0, 40.0),
//!     Rect::new(0.0, 0.0, 800.0, 600.0),
//!     Placement::BottomStart,
//!     false,
//! );
//! assert_eq!(pos.origin.x, 50.0);
//! assert_eq!(pos.origin.y, 80.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`Placement`], [`Side`], and [`Align`]
//!   so hosts can load them from settings.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod placement;
mod portal;
mod position;
mod root_close;
pub mod trigger;
mod whisper;

pub use placement::{Align, ParsePlacementError, Placement, Side};
pub use portal::Portal;
pub use position::{OverlayPosition, compute_position};
pub use root_close::RootClose;
pub use trigger::{OverlayTrigger, Pending, Transition, TriggerConfig, TriggerEvent, Triggers};
pub use whisper::{Whisper, WhisperCallbacks, WhisperProps};
