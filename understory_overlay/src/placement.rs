// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay placements.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use understory_props::kebab_case;

/// Where an overlay sits relative to its trigger.
///
/// The first twelve variants are the named placements: a [`Side`] of the trigger
/// plus an [`Align`]ment along that side. The `Auto*` variants let
/// [`compute_position`](crate::compute_position) pick the side with the most room.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Placement {
    /// Above, centered.
    Top,
    /// Below, centered.
    Bottom,
    /// Left, centered.
    Left,
    /// Right, centered.
    Right,
    /// Above, aligned to the trigger's start edge.
    TopStart,
    /// Above, aligned to the trigger's end edge.
    TopEnd,
    /// Below, aligned to the trigger's start edge.
    BottomStart,
    /// Below, aligned to the trigger's end edge.
    BottomEnd,
    /// Left, aligned to the trigger's top edge.
    LeftStart,
    /// Left, aligned to the trigger's bottom edge.
    LeftEnd,
    /// Right, aligned to the trigger's top edge.
    RightStart,
    /// Right, aligned to the trigger's bottom edge.
    RightEnd,
    /// Whichever side has the most room.
    Auto,
    /// Top or bottom, centered.
    AutoVertical,
    /// Top or bottom, start-aligned.
    AutoVerticalStart,
    /// Top or bottom, end-aligned.
    AutoVerticalEnd,
    /// Left or right, centered.
    AutoHorizontal,
    /// Left or right, start-aligned.
    AutoHorizontalStart,
    /// Left or right, end-aligned.
    AutoHorizontalEnd,
}

/// The side of the trigger an overlay is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Side {
    /// Above the trigger.
    Top,
    /// Below the trigger.
    Bottom,
    /// Left of the trigger.
    Left,
    /// Right of the trigger.
    Right,
}

impl Side {
    /// The opposite side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the overlay stacks vertically (above or below) relative to the trigger.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of an overlay along the trigger side it is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Align {
    /// Centered on the trigger.
    Center,
    /// Flush with the trigger's start (left or top) edge.
    Start,
    /// Flush with the trigger's end (right or bottom) edge.
    End,
}

/// Error returned when a string names no known placement.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown placement `{0}`")]
pub struct ParsePlacementError(pub String);

impl Placement {
    /// The four centered placements.
    pub const PLACEMENT_4: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The eight edge-aligned placements accepted by dropdown menus.
    pub const PLACEMENT_8: [Self; 8] = [
        Self::BottomStart,
        Self::BottomEnd,
        Self::TopStart,
        Self::TopEnd,
        Self::LeftStart,
        Self::RightStart,
        Self::LeftEnd,
        Self::RightEnd,
    ];

    const ALL: [Self; 19] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopStart,
        Self::TopEnd,
        Self::BottomStart,
        Self::BottomEnd,
        Self::LeftStart,
        Self::LeftEnd,
        Self::RightStart,
        Self::RightEnd,
        Self::Auto,
        Self::AutoVertical,
        Self::AutoVerticalStart,
        Self::AutoVerticalEnd,
        Self::AutoHorizontal,
        Self::AutoHorizontalStart,
        Self::AutoHorizontalEnd,
    ];

    /// Build a named placement from a side and an alignment.
    pub fn from_parts(side: Side, align: Align) -> Self {
        match (side, align) {
            (Side::Top, Align::Center) => Self::Top,
            (Side::Top, Align::Start) => Self::TopStart,
            (Side::Top, Align::End) => Self::TopEnd,
            (Side::Bottom, Align::Center) => Self::Bottom,
            (Side::Bottom, Align::Start) => Self::BottomStart,
            (Side::Bottom, Align::End) => Self::BottomEnd,
            (Side::Left, Align::Center) => Self::Left,
            (Side::Left, Align::Start) => Self::LeftStart,
            (Side::Left, Align::End) => Self::LeftEnd,
            (Side::Right, Align::Center) => Self::Right,
            (Side::Right, Align::Start) => Self::RightStart,
            (Side::Right, Align::End) => Self::RightEnd,
        }
    }

    /// The side of a named placement, or `None` for automatic placements.
    pub fn side(self) -> Option<Side> {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Some(Side::Top),
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Some(Side::Bottom),
            Self::Left | Self::LeftStart | Self::LeftEnd => Some(Side::Left),
            Self::Right | Self::RightStart | Self::RightEnd => Some(Side::Right),
            _ => None,
        }
    }

    /// The alignment along the side. Automatic placements report their requested alignment.
    pub fn align(self) -> Align {
        match self {
            Self::TopStart
            | Self::BottomStart
            | Self::LeftStart
            | Self::RightStart
            | Self::AutoVerticalStart
            | Self::AutoHorizontalStart => Align::Start,
            Self::TopEnd
            | Self::BottomEnd
            | Self::LeftEnd
            | Self::RightEnd
            | Self::AutoVerticalEnd
            | Self::AutoHorizontalEnd => Align::End,
            _ => Align::Center,
        }
    }

    /// Whether the side is chosen at positioning time.
    pub fn is_auto(self) -> bool {
        self.side().is_none()
    }

    /// Whether this is one of [`Placement::PLACEMENT_8`].
    pub fn is_placement8(self) -> bool {
        Self::PLACEMENT_8.contains(&self)
    }

    /// Mirror left and right sides for right-to-left layouts.
    ///
    /// Only the side is mirrored; start/end alignment is left as is.
    pub fn polyfill(self, rtl: bool) -> Self {
        if !rtl {
            return self;
        }
        match self.side() {
            Some(side @ (Side::Left | Side::Right)) => {
                Self::from_parts(side.opposite(), self.align())
            }
            _ => self,
        }
    }

    /// The camel-case name (`bottomStart`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopStart => "topStart",
            Self::TopEnd => "topEnd",
            Self::BottomStart => "bottomStart",
            Self::BottomEnd => "bottomEnd",
            Self::LeftStart => "leftStart",
            Self::LeftEnd => "leftEnd",
            Self::RightStart => "rightStart",
            Self::RightEnd => "rightEnd",
            Self::Auto => "auto",
            Self::AutoVertical => "autoVertical",
            Self::AutoVerticalStart => "autoVerticalStart",
            Self::AutoVerticalEnd => "autoVerticalEnd",
            Self::AutoHorizontal => "autoHorizontal",
            Self::AutoHorizontalStart => "autoHorizontalStart",
            Self::AutoHorizontalEnd => "autoHorizontalEnd",
        }
    }

    /// The kebab-case class token (`bottom-start`).
    pub fn kebab(self) -> String {
        kebab_case(self.as_str())
    }

    fn from_exact(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == s)
    }
}

/// Rewrite legacy suffixes: the first `Left`/`Top` becomes `Start`, then the first
/// `Right`/`Bottom` becomes `End` (`bottomLeft` → `bottomStart`).
fn legacy_to_logical(s: &str) -> String {
    let once = replace_first_of(s, &["Left", "Top"], "Start");
    replace_first_of(&once, &["Right", "Bottom"], "End")
}

fn replace_first_of(s: &str, needles: &[&str], with: &str) -> String {
    let hit = needles
        .iter()
        .filter_map(|needle| s.find(needle).map(|at| (at, needle.len())))
        .min_by_key(|(at, _)| *at);
    match hit {
        Some((at, len)) => {
            let mut out = String::with_capacity(s.len());
            out.push_str(&s[..at]);
            out.push_str(with);
            out.push_str(&s[at + len..]);
            out
        }
        None => String::from(s),
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_exact(s)
            .or_else(|| Self::from_exact(&legacy_to_logical(s)))
            .ok_or_else(|| ParsePlacementError(String::from(s)))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
