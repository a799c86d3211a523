// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard key values relevant to composite widgets.

/// A keyboard key, as reported by a DOM `KeyboardEvent.key` value.
///
/// Only keys with a meaning for menus, pickers, and forms get a variant;
/// everything else is [`Key::Other`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `Enter`.
    Enter,
    /// The space bar (`" "`, or `"Spacebar"` in older engines).
    Space,
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// `Escape` (or `Esc`).
    Escape,
    /// `Home`.
    Home,
    /// `End`.
    End,
    /// `Tab`.
    Tab,
    /// Any other key.
    Other,
}

impl Key {
    /// Parse a DOM `key` value. Unknown values map to [`Key::Other`].
    pub fn from_key_value(value: &str) -> Self {
        match value {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Escape" | "Esc" => Self::Escape,
            "Home" => Self::Home,
            "End" => Self::End,
            "Tab" => Self::Tab,
            _ => Self::Other,
        }
    }

    /// Whether this key activates the focused control (`Enter` or space).
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}
