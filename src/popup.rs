// SPDX-License-Identifier: GPL-3.0-only

//! Popup visibility bookkeeping, detached from any widget.
//!
//! The popup follows a few rules that are easy to get wrong inline in event
//! handlers: a button press toggles it, a focus-out hides it shortly after
//! (unless the keep-open setting is on), showing it again cancels a pending
//! hide, and a show while already open is a no-op so a press-and-update
//! sequence cannot open it twice. This module keeps that state machine
//! pure; the caller maps [`PopupAction`]s onto actual windowing calls.

use crate::app_settings;
use std::time::{Duration, Instant};

/// Delay between a focus-out and the scheduled hide.
pub const HIDE_DELAY: Duration = Duration::from_millis(app_settings::FOCUS_OUT_HIDE_DELAY_MS);

/// What the caller should do to the real popup, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    /// Create/present the popup and toggle the button on.
    Show,
    /// Hide the popup, untoggle the button, clear the entry.
    Hide,
    /// Popup is already open; raise it.
    Raise,
    /// Nothing to do.
    None,
}

/// Pure popup visibility state.
#[derive(Debug, Clone, Default)]
pub struct PopupState {
    alive: bool,
    pending_hide: Option<Instant>,
}

impl PopupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.alive
    }

    /// When the next deferred hide is due, if one is scheduled.
    pub fn pending_hide_at(&self) -> Option<Instant> {
        self.pending_hide
    }

    /// Left-click on the panel button: hide when open, show when not.
    pub fn on_button_press(&mut self, keep_open: bool) -> PopupAction {
        if self.alive {
            self.hide()
        } else {
            self.show(keep_open)
        }
    }

    /// Request the popup. Showing while open only raises; showing while a
    /// deferred hide is pending cancels that hide.
    pub fn show(&mut self, keep_open: bool) -> PopupAction {
        if !self.alive {
            self.alive = true;
            self.pending_hide = None;
            return PopupAction::Show;
        }
        if self.pending_hide.take().is_some() {
            return PopupAction::Raise;
        }
        if keep_open {
            return PopupAction::Raise;
        }
        // Double-invocation guard.
        PopupAction::None
    }

    /// Hide immediately and drop any scheduled hide.
    pub fn hide(&mut self) -> PopupAction {
        self.alive = false;
        self.pending_hide = None;
        PopupAction::Hide
    }

    /// Escape closes the popup outright.
    pub fn on_escape(&mut self) -> PopupAction {
        self.hide()
    }

    /// Focus left the popup: schedule a deferred hide unless the keep-open
    /// setting is on or one is already pending.
    pub fn on_focus_out(&mut self, now: Instant, keep_open: bool) {
        if keep_open || !self.alive {
            return;
        }
        if self.pending_hide.is_none() {
            self.pending_hide = Some(now + HIDE_DELAY);
        }
    }

    /// Drive scheduled hides; returns `Hide` once the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> PopupAction {
        match self.pending_hide {
            Some(deadline) if now >= deadline => self.hide(),
            _ => PopupAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: button press toggles the popup open and closed.
    #[test]
    fn test_button_press_toggles() {
        let mut state = PopupState::new();
        assert_eq!(state.on_button_press(false), PopupAction::Show);
        assert!(state.is_open());
        assert_eq!(state.on_button_press(false), PopupAction::Hide);
        assert!(!state.is_open());
    }

    /// Test: a second show while open is a no-op (double-invocation guard).
    #[test]
    fn test_show_while_open_is_noop() {
        let mut state = PopupState::new();
        assert_eq!(state.show(false), PopupAction::Show);
        assert_eq!(state.show(false), PopupAction::None);
        assert!(state.is_open());
    }

    /// Test: with keep-open on, a repeated show raises instead.
    #[test]
    fn test_show_while_open_raises_when_kept_open() {
        let mut state = PopupState::new();
        assert_eq!(state.show(true), PopupAction::Show);
        assert_eq!(state.show(true), PopupAction::Raise);
    }

    /// Test: focus-out schedules a hide that fires after the delay.
    #[test]
    fn test_focus_out_schedules_hide() {
        let mut state = PopupState::new();
        let now = Instant::now();
        state.show(false);
        state.on_focus_out(now, false);
        assert!(state.pending_hide_at().is_some());

        assert_eq!(state.poll(now), PopupAction::None, "before the deadline");
        assert_eq!(state.poll(now + HIDE_DELAY), PopupAction::Hide);
        assert!(!state.is_open());
        assert_eq!(state.pending_hide_at(), None);
    }

    /// Test: keep-open suppresses the focus-out hide entirely.
    #[test]
    fn test_keep_open_suppresses_focus_out() {
        let mut state = PopupState::new();
        let now = Instant::now();
        state.show(true);
        state.on_focus_out(now, true);
        assert_eq!(state.pending_hide_at(), None);
        assert_eq!(state.poll(now + HIDE_DELAY), PopupAction::None);
        assert!(state.is_open());
    }

    /// Test: showing again while a hide is pending cancels it and raises.
    #[test]
    fn test_show_cancels_pending_hide() {
        let mut state = PopupState::new();
        let now = Instant::now();
        state.show(false);
        state.on_focus_out(now, false);
        assert_eq!(state.show(false), PopupAction::Raise);
        assert_eq!(state.pending_hide_at(), None);
        assert_eq!(state.poll(now + HIDE_DELAY), PopupAction::None);
        assert!(state.is_open());
    }

    /// Test: a repeated focus-out does not push the deadline back.
    #[test]
    fn test_focus_out_keeps_first_deadline() {
        let mut state = PopupState::new();
        let now = Instant::now();
        state.show(false);
        state.on_focus_out(now, false);
        let first = state.pending_hide_at();
        state.on_focus_out(now + Duration::from_millis(20), false);
        assert_eq!(state.pending_hide_at(), first);
    }

    /// Test: escape hides immediately, pending or not.
    #[test]
    fn test_escape_hides() {
        let mut state = PopupState::new();
        state.show(false);
        state.on_focus_out(Instant::now(), false);
        assert_eq!(state.on_escape(), PopupAction::Hide);
        assert!(!state.is_open());
        assert_eq!(state.pending_hide_at(), None);
    }

    /// Test: focus-out while closed schedules nothing.
    #[test]
    fn test_focus_out_while_closed_is_ignored() {
        let mut state = PopupState::new();
        state.on_focus_out(Instant::now(), false);
        assert_eq!(state.pending_hide_at(), None);
    }
}
