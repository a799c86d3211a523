// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Close-on-outside-interaction detection.

use kurbo::{Point, Rect};
use understory_props::Key;

/// Decides whether document-level input should close an open overlay.
///
/// A pointer-down closes the overlay unless it lands on the trigger or inside the overlay
/// itself. `Escape` closes it when [`RootClose::listen_escape`] is set; menus that handle
/// `Escape` on their own turn it off.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RootClose {
    /// Whether `Escape` counts as a root close.
    pub listen_escape: bool,
    /// Ignore all input.
    pub disabled: bool,
}

impl Default for RootClose {
    fn default() -> Self {
        Self {
            listen_escape: true,
            disabled: false,
        }
    }
}

impl RootClose {
    /// A detector that ignores `Escape`.
    pub fn without_escape() -> Self {
        Self {
            listen_escape: false,
            ..Self::default()
        }
    }

    /// A pointer-down somewhere in the document.
    pub fn on_pointer_down(&self, inside_trigger: bool, inside_overlay: bool) -> bool {
        !self.disabled && !inside_trigger && !inside_overlay
    }

    /// A key-down somewhere in the document.
    pub fn on_key_down(&self, key: Key) -> bool {
        !self.disabled && self.listen_escape && key == Key::Escape
    }

    /// Whether `point` lies outside every rectangle in `regions`.
    pub fn is_outside(point: Point, regions: &[Rect]) -> bool {
        !regions.iter().any(|r| r.contains(point))
    }
}
