// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus traversal policies for menus.
//!
//! A menu's "active item" pointer moves through a linear list of items, skipping any
//! that cannot take focus. How it moves is a [`FocusPolicy`], so hosts that want
//! ARIA-style wrap-around can opt into it without changing the menu state machine:
//!
//! ```
//! use understory_menu::focus::{FocusPolicy, Focusable, LinearPolicy, Navigation, WrapMode};
//!
//! struct Item(bool);
//! impl Focusable for Item {
//!     fn is_focusable(&self) -> bool {
//!         self.0
//!     }
//! }
//!
//! let items = [Item(true), Item(false), Item(true)];
//!
//! let stop = LinearPolicy::default();
//! assert_eq!(stop.next(None, Navigation::Next, &items), Some(0));
//! assert_eq!(stop.next(Some(0), Navigation::Next, &items), Some(2));
//! assert_eq!(stop.next(Some(2), Navigation::Next, &items), None);
//!
//! let wrap = LinearPolicy { wrap: WrapMode::Wrap };
//! assert_eq!(wrap.next(Some(2), Navigation::Next, &items), Some(0));
//! ```

/// A candidate that may or may not accept focus.
pub trait Focusable {
    /// Whether focus may land here.
    fn is_focusable(&self) -> bool;
}

/// Direction of a focus move within a menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// The first focusable item (`Home`).
    First,
    /// The last focusable item (`End`).
    Last,
    /// The next focusable item after the origin (`ArrowDown`).
    Next,
    /// The previous focusable item before the origin (`ArrowUp`).
    Prev,
}

/// What happens when traversal runs off either end of the list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Stop at the ends; there is no next candidate.
    #[default]
    Never,
    /// Continue from the opposite end.
    Wrap,
}

/// Chooses the next active index for a navigation intent.
pub trait FocusPolicy {
    /// The index focus should move to, or `None` to leave it where it is.
    ///
    /// `origin` is the currently active index, if any.
    fn next<T: Focusable>(
        &self,
        origin: Option<usize>,
        direction: Navigation,
        items: &[T],
    ) -> Option<usize>;
}

/// Registration-order traversal.
///
/// Moving forward from no active item lands on the first focusable item, and moving
/// backward lands on the last one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearPolicy {
    /// Wrap behavior at the ends of the list.
    pub wrap: WrapMode,
}

impl FocusPolicy for LinearPolicy {
    fn next<T: Focusable>(
        &self,
        origin: Option<usize>,
        direction: Navigation,
        items: &[T],
    ) -> Option<usize> {
        let first = || items.iter().position(Focusable::is_focusable);
        let last = || items.iter().rposition(Focusable::is_focusable);
        match (direction, origin) {
            (Navigation::First, _) | (Navigation::Next, None) => first(),
            (Navigation::Last, _) | (Navigation::Prev, None) => last(),
            (Navigation::Next, Some(at)) => items
                .iter()
                .enumerate()
                .skip(at + 1)
                .find_map(|(i, item)| item.is_focusable().then_some(i))
                .or_else(|| (self.wrap == WrapMode::Wrap).then(first).flatten()),
            (Navigation::Prev, Some(at)) => items[..at.min(items.len())]
                .iter()
                .rposition(Focusable::is_focusable)
                .or_else(|| (self.wrap == WrapMode::Wrap).then(last).flatten()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Focusable for bool {
        fn is_focusable(&self) -> bool {
            *self
        }
    }

    #[test]
    fn first_and_last_skip_disabled() {
        let items = [false, true, true, false];
        let p = LinearPolicy::default();
        assert_eq!(p.next(Some(2), Navigation::First, &items), Some(1));
        assert_eq!(p.next(None, Navigation::Last, &items), Some(2));
    }

    #[test]
    fn prev_from_none_goes_to_last() {
        let items = [true, true, false];
        let p = LinearPolicy::default();
        assert_eq!(p.next(None, Navigation::Prev, &items), Some(1));
        assert_eq!(p.next(Some(0), Navigation::Prev, &items), None);
    }

    #[test]
    fn wrap_mode_continues_from_other_end() {
        let items = [true, false, true];
        let p = LinearPolicy {
            wrap: WrapMode::Wrap,
        };
        assert_eq!(p.next(Some(0), Navigation::Prev, &items), Some(2));
        assert_eq!(p.next(Some(2), Navigation::Next, &items), Some(0));
    }

    #[test]
    fn nothing_focusable_yields_none() {
        let items = [false, false];
        let p = LinearPolicy {
            wrap: WrapMode::Wrap,
        };
        assert_eq!(p.next(None, Navigation::Next, &items), None);
        assert_eq!(p.next(Some(1), Navigation::Prev, &items), None);
        let empty: [bool; 0] = [];
        assert_eq!(p.next(None, Navigation::First, &empty), None);
    }
}
