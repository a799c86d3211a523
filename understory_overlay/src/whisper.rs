// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip/popover wrapper around [`OverlayTrigger`].

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Rect, Size};
use understory_props::Chain;

use crate::placement::Placement;
use crate::position::{OverlayPosition, compute_position};
use crate::trigger::{OverlayTrigger, Transition, TriggerConfig, TriggerEvent};

/// Configuration for a [`Whisper`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhisperProps {
    /// Requested placement; mirrored for right-to-left layouts. Defaults to [`Placement::Right`].
    pub placement: Placement,
    /// Keep the overlay inside its container.
    pub prevent_overflow: bool,
    /// Right-to-left layout.
    pub rtl: bool,
    /// Trigger configuration.
    pub trigger: TriggerConfig,
}

impl Default for WhisperProps {
    fn default() -> Self {
        Self {
            placement: Placement::Right,
            prevent_overflow: false,
            rtl: false,
            trigger: TriggerConfig::default(),
        }
    }
}

/// Optional observers for a [`Whisper`].
///
/// `on_open` runs before `on_entered`, and `on_close` before `on_exited`.
#[derive(Default)]
pub struct WhisperCallbacks {
    /// The overlay opened.
    pub on_open: Option<Box<dyn FnMut()>>,
    /// The overlay closed.
    pub on_close: Option<Box<dyn FnMut()>>,
    /// The overlay finished entering.
    pub on_entered: Option<Box<dyn FnMut()>>,
    /// The overlay finished exiting.
    pub on_exited: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for WhisperCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhisperCallbacks")
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_entered", &self.on_entered.is_some())
            .field("on_exited", &self.on_exited.is_some())
            .finish()
    }
}

/// An overlay trigger bundled with a placement and open/close observers.
///
/// There is no animation here, so "entered" and "exited" fire as soon as the effective
/// open state changes.
pub struct Whisper {
    props: WhisperProps,
    trigger: OverlayTrigger,
    entered: Chain<()>,
    exited: Chain<()>,
}

fn observer_chain(first: Option<Box<dyn FnMut()>>, second: Option<Box<dyn FnMut()>>) -> Chain<()> {
    let mut chain = Chain::new();
    for mut f in first.into_iter().chain(second) {
        chain.push_observer(move |_: &mut ()| f());
    }
    chain
}

impl Whisper {
    /// Create a whisper.
    pub fn new(props: WhisperProps, callbacks: WhisperCallbacks) -> Self {
        let trigger = OverlayTrigger::new(props.trigger.clone());
        Self {
            props,
            trigger,
            entered: observer_chain(callbacks.on_open, callbacks.on_entered),
            exited: observer_chain(callbacks.on_close, callbacks.on_exited),
        }
    }

    /// The configuration.
    pub fn props(&self) -> &WhisperProps {
        &self.props
    }

    /// The placement after right-to-left mirroring.
    pub fn placement(&self) -> Placement {
        self.props.placement.polyfill(self.props.rtl)
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.trigger.is_open()
    }

    /// The underlying trigger.
    pub fn trigger(&self) -> &OverlayTrigger {
        &self.trigger
    }

    /// Deliver a trigger event.
    pub fn handle(&mut self, event: TriggerEvent, now: u64) -> Option<Transition> {
        let was_open = self.is_open();
        let transition = self.trigger.handle(event, now);
        self.notify(was_open);
        transition
    }

    /// Fire a due delayed transition.
    pub fn poll(&mut self, now: u64) -> Option<Transition> {
        let was_open = self.is_open();
        let transition = self.trigger.poll(now);
        self.notify(was_open);
        transition
    }

    /// Open immediately.
    pub fn open(&mut self) {
        let was_open = self.is_open();
        self.trigger.open();
        self.notify(was_open);
    }

    /// Close immediately.
    pub fn close(&mut self) {
        let was_open = self.is_open();
        self.trigger.close();
        self.notify(was_open);
    }

    /// Supply or remove the host-controlled `open` prop.
    pub fn set_open_prop(&mut self, open: Option<bool>) {
        let was_open = self.is_open();
        self.trigger.set_open_prop(open);
        self.notify(was_open);
    }

    /// Position the overlay for the current placement.
    pub fn position(&self, trigger: Rect, size: Size, container: Rect) -> OverlayPosition {
        compute_position(
            trigger,
            size,
            container,
            self.placement(),
            self.props.prevent_overflow,
        )
    }

    fn notify(&mut self, was_open: bool) {
        match (was_open, self.is_open()) {
            (false, true) => {
                self.entered.call(&mut ());
            }
            (true, false) => {
                self.exited.call(&mut ());
            }
            _ => {}
        }
    }
}

impl fmt::Debug for Whisper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Whisper")
            .field("props", &self.props)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::Triggers;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn recorder(
        log: &Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
    ) -> Option<Box<dyn FnMut()>> {
        let log = Rc::clone(log);
        Some(Box::new(move || log.borrow_mut().push(name)))
    }

    #[test]
    fn defaults_to_right_and_mirrors_in_rtl() {
        let w = Whisper::new(WhisperProps::default(), WhisperCallbacks::default());
        assert_eq!(w.placement(), Placement::Right);

        let w = Whisper::new(
            WhisperProps {
                rtl: true,
                ..WhisperProps::default()
            },
            WhisperCallbacks::default(),
        );
        assert_eq!(w.placement(), Placement::Left);
    }

    #[test]
    fn open_callbacks_run_before_entered() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut w = Whisper::new(
            WhisperProps {
                trigger: TriggerConfig {
                    trigger: Triggers::CLICK,
                    ..TriggerConfig::default()
                },
                ..WhisperProps::default()
            },
            WhisperCallbacks {
                on_open: recorder(&log, "open"),
                on_close: recorder(&log, "close"),
                on_entered: recorder(&log, "entered"),
                on_exited: recorder(&log, "exited"),
            },
        );
        assert_eq!(w.handle(TriggerEvent::Click, 0), Some(Transition::Open));
        assert_eq!(w.handle(TriggerEvent::RootClose, 1), Some(Transition::Close));
        assert_eq!(*log.borrow(), ["open", "entered", "close", "exited"]);
    }

    #[test]
    fn controlled_whisper_notifies_on_prop_changes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut w = Whisper::new(
            WhisperProps::default(),
            WhisperCallbacks {
                on_open: recorder(&log, "open"),
                ..WhisperCallbacks::default()
            },
        );
        w.set_open_prop(Some(false));
        assert_eq!(w.handle(TriggerEvent::Focus, 0), Some(Transition::Open));
        assert!(log.borrow().is_empty());
        w.set_open_prop(Some(true));
        assert_eq!(*log.borrow(), ["open"]);
    }
}
