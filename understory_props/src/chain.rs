// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observer lists for overlay callbacks.
//!
//! An overlay often has two callbacks that answer the same change: `on_open`
//! and `on_entered` both fire when a whisper shows, and the host may supply
//! either, both or neither. [`Chain`] collects whichever are present and calls
//! them in the order they were pushed. A handler returns [`Outcome::Stop`] to
//! keep the rest of the list from running; [`Chain::push_observer`] wraps one
//! that always lets the list continue.
//!
//! ```
//! use understory_props::{Chain, Outcome};
//!
//! let mut shown: Chain<Vec<&str>> = Chain::new();
//! shown.push_observer(|log| log.push("open"));
//! shown.push(|log| {
//!     log.push("entered");
//!     Outcome::Stop
//! });
//! shown.push_observer(|log| log.push("never"));
//!
//! let mut log = Vec::new();
//! assert_eq!(shown.call(&mut log), Some(1));
//! assert_eq!(log, ["open", "entered"]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Whether a [`Chain`] keeps going after a handler.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Call the next handler.
    #[default]
    Continue,
    /// Skip the remaining handlers.
    Stop,
}

/// An owned, ordered list of handlers for one event type.
pub struct Chain<E: ?Sized> {
    handlers: Vec<Box<dyn FnMut(&mut E) -> Outcome>>,
}

impl<E: ?Sized> Chain<E> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Append a handler.
    pub fn push(&mut self, handler: impl FnMut(&mut E) -> Outcome + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Append a handler that never stops the chain.
    pub fn push_observer(&mut self, mut observer: impl FnMut(&mut E) + 'static) {
        self.push(move |event| {
            observer(event);
            Outcome::Continue
        });
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the chain has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Call the handlers in order.
    ///
    /// Returns the index of the handler that stopped, or `None` when all of them ran.
    pub fn call(&mut self, event: &mut E) -> Option<usize> {
        for (index, handler) in self.handlers.iter_mut().enumerate() {
            if handler(event) == Outcome::Stop {
                return Some(index);
            }
        }
        None
    }
}

impl<E: ?Sized> Default for Chain<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> fmt::Debug for Chain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn observers_run_in_push_order() {
        let mut chain = Chain::<Vec<u8>>::new();
        assert!(chain.is_empty());
        chain.push_observer(|v| v.push(1));
        chain.push_observer(|v| v.push(2));

        let mut seen = Vec::new();
        assert_eq!(chain.call(&mut seen), None);
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn stop_reports_index_and_skips_the_rest() {
        let mut chain = Chain::<Vec<u8>>::new();
        chain.push_observer(|v| v.push(1));
        chain.push(|v| {
            v.push(2);
            Outcome::Stop
        });
        chain.push_observer(|v| v.push(3));

        let mut seen = Vec::new();
        assert_eq!(chain.call(&mut seen), Some(1));
        assert_eq!(seen, vec![1, 2]);

        // The chain is reusable after a stop.
        seen.clear();
        assert_eq!(chain.call(&mut seen), Some(1));
        assert_eq!(seen, vec![1, 2]);
    }
}
