// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger timing for overlays.
//!
//! [`OverlayTrigger`] turns pointer and focus events on a trigger element into open and
//! close [`Transition`]s. Which events count is configured with [`Triggers`]:
//!
//! - `CLICK` and `CONTEXT_MENU` toggle the overlay. A root close (pointer-down outside, or
//!   `Escape`) closes it.
//! - `HOVER` opens on mouse-enter and closes on mouse-leave. With
//!   [`TriggerConfig::enterable`], the pointer may travel from the trigger into the overlay
//!   without the overlay closing.
//! - `FOCUS` opens on focus and closes on blur.
//! - An empty set means the host drives the overlay through [`OverlayTrigger::set_open_prop`].
//!
//! ## Delays
//!
//! Opening waits [`TriggerConfig::delay_open`] (falling back to [`TriggerConfig::delay`]),
//! closing waits [`TriggerConfig::delay_close`] (with the same fallback). A delayed transition
//! is held as a single [`Pending`] entry; any later event replaces it, so a quick
//! enter/leave never opens anything. The host calls [`OverlayTrigger::poll`] with the
//! current time to fire due transitions.
//!
//! ```
//! use understory_overlay::trigger::{OverlayTrigger, Transition, TriggerConfig, Triggers};
//!
//! let mut t = OverlayTrigger::new(TriggerConfig {
//!     trigger: Triggers::HOVER,
//!     delay_close: Some(100),
//!     ..TriggerConfig::default()
//! });
//!
//! assert_eq!(t.on_mouse_enter(0), Some(Transition::Open));
//! assert_eq!(t.on_mouse_leave(10), None);
//! // Coming back before the close fires cancels it.
//! assert_eq!(t.on_mouse_enter(50), None);
//! assert_eq!(t.poll(500), None);
//! assert!(t.is_open());
//! ```
//!
//! ## Controlled overlays
//!
//! When the host supplies an `open` prop through [`OverlayTrigger::set_open_prop`], the
//! trigger still reports the transitions it *would* make, but [`OverlayTrigger::is_open`]
//! follows the prop. The host decides whether to honor a transition by updating the prop.

use bitflags::bitflags;
use understory_props::Controlled;

bitflags! {
    /// Events that open or close an overlay.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Triggers: u8 {
        /// Toggle on click.
        const CLICK = 1 << 0;
        /// Open on mouse-enter, close on mouse-leave.
        const HOVER = 1 << 1;
        /// Open on focus, close on blur.
        const FOCUS = 1 << 2;
        /// Toggle on the context-menu gesture.
        const CONTEXT_MENU = 1 << 3;
    }
}

impl Default for Triggers {
    fn default() -> Self {
        Self::HOVER | Self::FOCUS
    }
}

/// Close delay used for enterable hover overlays when no close delay is configured.
///
/// Without it the overlay would close before the pointer could reach it.
pub const ENTERABLE_CLOSE_DELAY: u64 = 200;

/// Trigger configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerConfig {
    /// Which events open and close the overlay.
    pub trigger: Triggers,
    /// Delay in milliseconds for both opening and closing.
    pub delay: Option<u64>,
    /// Delay in milliseconds before opening; overrides `delay`.
    pub delay_open: Option<u64>,
    /// Delay in milliseconds before closing; overrides `delay`.
    pub delay_close: Option<u64>,
    /// Whether the pointer may move into a hover overlay without closing it.
    pub enterable: bool,
    /// Ignore every event.
    pub disabled: bool,
    /// Initial open state for uncontrolled overlays.
    pub default_open: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            trigger: Triggers::default(),
            delay: None,
            delay_open: None,
            delay_close: None,
            enterable: false,
            disabled: false,
            default_open: false,
        }
    }
}

/// A change of the overlay's open state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The overlay opens.
    Open,
    /// The overlay closes.
    Close,
}

impl Transition {
    fn target(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A delayed transition waiting for its due time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pending {
    /// What happens when the delay elapses.
    pub transition: Transition,
    /// Timestamp (milliseconds) at or after which the transition fires.
    pub due: u64,
}

/// An event delivered to [`OverlayTrigger::handle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    /// Primary click on the trigger.
    Click,
    /// Context-menu gesture on the trigger.
    ContextMenu,
    /// Pointer entered the trigger.
    MouseEnter,
    /// Pointer left the trigger.
    MouseLeave,
    /// Pointer entered the overlay.
    OverlayMouseEnter,
    /// Pointer left the overlay.
    OverlayMouseLeave,
    /// The trigger gained focus.
    Focus,
    /// The trigger lost focus.
    Blur,
    /// A pointer-down outside, or `Escape`, as reported by [`RootClose`](crate::RootClose).
    RootClose,
}

/// Open/close state machine for one overlay trigger.
#[derive(Clone, Debug)]
pub struct OverlayTrigger {
    config: TriggerConfig,
    open: Controlled<bool>,
    pending: Option<Pending>,
    over_trigger: bool,
    over_overlay: bool,
}

impl OverlayTrigger {
    /// Create a trigger with the given configuration.
    pub fn new(config: TriggerConfig) -> Self {
        let open = Controlled::uncontrolled(config.default_open);
        Self {
            config,
            open,
            pending: None,
            over_trigger: false,
            over_overlay: false,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// Replace the configuration. A pending transition is kept.
    pub fn set_config(&mut self, config: TriggerConfig) {
        self.config = config;
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        *self.open.get()
    }

    /// Supply or remove the host-controlled `open` prop.
    pub fn set_open_prop(&mut self, open: Option<bool>) {
        self.open.set_prop(open);
    }

    /// The transition waiting for its delay, if any.
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Dispatch an event by kind.
    pub fn handle(&mut self, event: TriggerEvent, now: u64) -> Option<Transition> {
        match event {
            TriggerEvent::Click => self.on_click(now),
            TriggerEvent::ContextMenu => self.on_context_menu(now),
            TriggerEvent::MouseEnter => self.on_mouse_enter(now),
            TriggerEvent::MouseLeave => self.on_mouse_leave(now),
            TriggerEvent::OverlayMouseEnter => self.on_overlay_mouse_enter(now),
            TriggerEvent::OverlayMouseLeave => self.on_overlay_mouse_leave(now),
            TriggerEvent::Focus => self.on_focus(now),
            TriggerEvent::Blur => self.on_blur(now),
            TriggerEvent::RootClose => self.on_root_close(now),
        }
    }

    /// Primary click on the trigger.
    pub fn on_click(&mut self, now: u64) -> Option<Transition> {
        self.toggle_if(Triggers::CLICK, now)
    }

    /// Context-menu gesture on the trigger.
    pub fn on_context_menu(&mut self, now: u64) -> Option<Transition> {
        self.toggle_if(Triggers::CONTEXT_MENU, now)
    }

    /// Pointer entered the trigger.
    pub fn on_mouse_enter(&mut self, now: u64) -> Option<Transition> {
        self.over_trigger = true;
        if !self.accepts(Triggers::HOVER) {
            return None;
        }
        self.request(Transition::Open, now)
    }

    /// Pointer left the trigger.
    pub fn on_mouse_leave(&mut self, now: u64) -> Option<Transition> {
        self.over_trigger = false;
        if !self.accepts(Triggers::HOVER) {
            return None;
        }
        self.request_hover_close(now)
    }

    /// Pointer entered the overlay. Cancels a pending hover close on enterable overlays.
    pub fn on_overlay_mouse_enter(&mut self, _now: u64) -> Option<Transition> {
        self.over_overlay = true;
        if self.accepts(Triggers::HOVER)
            && self.config.enterable
            && matches!(self.pending, Some(p) if p.transition == Transition::Close)
        {
            self.pending = None;
        }
        None
    }

    /// Pointer left the overlay.
    pub fn on_overlay_mouse_leave(&mut self, now: u64) -> Option<Transition> {
        self.over_overlay = false;
        if !self.accepts(Triggers::HOVER) || !self.config.enterable || self.over_trigger {
            return None;
        }
        self.request_hover_close(now)
    }

    /// The trigger gained focus.
    pub fn on_focus(&mut self, now: u64) -> Option<Transition> {
        if !self.accepts(Triggers::FOCUS) {
            return None;
        }
        self.request(Transition::Open, now)
    }

    /// The trigger lost focus.
    pub fn on_blur(&mut self, now: u64) -> Option<Transition> {
        if !self.accepts(Triggers::FOCUS) {
            return None;
        }
        self.request(Transition::Close, now)
    }

    /// A root close. Only click and context-menu overlays close this way; hover and focus
    /// overlays have their own close events.
    pub fn on_root_close(&mut self, _now: u64) -> Option<Transition> {
        if self.config.disabled
            || !self
                .config
                .trigger
                .intersects(Triggers::CLICK | Triggers::CONTEXT_MENU)
        {
            return None;
        }
        self.pending = None;
        self.apply(Transition::Close)
    }

    /// Open immediately, ignoring triggers and delays.
    pub fn open(&mut self) -> Option<Transition> {
        self.pending = None;
        self.apply(Transition::Open)
    }

    /// Close immediately, ignoring triggers and delays.
    pub fn close(&mut self) -> Option<Transition> {
        self.pending = None;
        self.apply(Transition::Close)
    }

    /// Fire the pending transition if it is due at `now`.
    pub fn poll(&mut self, now: u64) -> Option<Transition> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.pending = None;
        self.apply(pending.transition)
    }

    fn accepts(&self, kind: Triggers) -> bool {
        !self.config.disabled && self.config.trigger.contains(kind)
    }

    fn toggle_if(&mut self, kind: Triggers, now: u64) -> Option<Transition> {
        if !self.accepts(kind) {
            return None;
        }
        let transition = if self.is_open() {
            Transition::Close
        } else {
            Transition::Open
        };
        self.request(transition, now)
    }

    fn request_hover_close(&mut self, now: u64) -> Option<Transition> {
        let delay = self.close_delay();
        let delay = if self.config.enterable && delay == 0 {
            ENTERABLE_CLOSE_DELAY
        } else {
            delay
        };
        self.schedule(Transition::Close, delay, now)
    }

    fn open_delay(&self) -> u64 {
        self.config.delay_open.or(self.config.delay).unwrap_or(0)
    }

    fn close_delay(&self) -> u64 {
        self.config.delay_close.or(self.config.delay).unwrap_or(0)
    }

    fn request(&mut self, transition: Transition, now: u64) -> Option<Transition> {
        let delay = match transition {
            Transition::Open => self.open_delay(),
            Transition::Close => self.close_delay(),
        };
        self.schedule(transition, delay, now)
    }

    fn schedule(&mut self, transition: Transition, delay: u64, now: u64) -> Option<Transition> {
        if delay == 0 {
            self.pending = None;
            return self.apply(transition);
        }
        if self.is_open() == transition.target() {
            // Already there; a later event supersedes whatever was pending.
            self.pending = None;
            return None;
        }
        let due = now.saturating_add(delay);
        log::trace!("overlay {transition:?} scheduled for {due}");
        self.pending = Some(Pending { transition, due });
        None
    }

    fn apply(&mut self, transition: Transition) -> Option<Transition> {
        let target = transition.target();
        if self.is_open() == target {
            return None;
        }
        self.open.set(target);
        Some(transition)
    }
}
