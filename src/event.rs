// Copyright 2019-2021 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Decoding of the messages the Shell sends back to a toast's window.

#![cfg_attr(not(windows), allow(dead_code))]

use crate::util;

const WM_USER: u32 = 0x0400;

/// Callback message id registered with the tray icon.
pub(crate) const WM_TRAY_CALLBACK: u32 = WM_USER + 20;
/// Timer id used to remove the toast once its timeout elapsed.
pub(crate) const DISMISS_TIMER_ID: usize = 1;

const NIN_BALLOONSHOW: u32 = WM_USER + 2;
const NIN_BALLOONHIDE: u32 = WM_USER + 3;
const NIN_BALLOONTIMEOUT: u32 = WM_USER + 4;
const NIN_BALLOONUSERCLICK: u32 = WM_USER + 5;

/// How a toast went away.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dismissal {
    /// The user clicked the balloon.
    Clicked,
    /// The timeout elapsed or the shell hid the balloon.
    Expired,
}

/// A notification the Shell delivered through [`WM_TRAY_CALLBACK`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum TrayEvent {
    BalloonShown,
    BalloonHidden,
    BalloonTimedOut,
    BalloonClicked,
    Other(u16),
}

impl TrayEvent {
    /// Decodes the `lParam` of a tray callback message, only its low word is meaningful.
    pub fn from_lparam(lparam: isize) -> TrayEvent {
        match util::loword(lparam as u32) as u32 {
            NIN_BALLOONSHOW => TrayEvent::BalloonShown,
            NIN_BALLOONHIDE => TrayEvent::BalloonHidden,
            NIN_BALLOONTIMEOUT => TrayEvent::BalloonTimedOut,
            NIN_BALLOONUSERCLICK => TrayEvent::BalloonClicked,
            other => TrayEvent::Other(other as u16),
        }
    }

    /// The dismissal this event causes, if any.
    pub fn dismissal(self) -> Option<Dismissal> {
        match self {
            TrayEvent::BalloonClicked => Some(Dismissal::Clicked),
            TrayEvent::BalloonHidden | TrayEvent::BalloonTimedOut => Some(Dismissal::Expired),
            TrayEvent::BalloonShown | TrayEvent::Other(_) => None,
        }
    }
}

/// Remembers the first dismissal of a toast and ignores the rest.
#[derive(Debug, Default)]
pub(crate) struct DismissLatch {
    outcome: Option<Dismissal>,
}

impl DismissLatch {
    /// Returns `true` only for the call that actually dismissed the toast.
    pub fn dismiss(&mut self, dismissal: Dismissal) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(dismissal);
        true
    }

    pub fn outcome(&self) -> Option<Dismissal> {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_shell_balloon_codes() {
        assert_eq!(TrayEvent::from_lparam(1029), TrayEvent::BalloonClicked);
        assert_eq!(TrayEvent::from_lparam(1028), TrayEvent::BalloonTimedOut);
        assert_eq!(TrayEvent::from_lparam(1027), TrayEvent::BalloonHidden);
        assert_eq!(TrayEvent::from_lparam(1026), TrayEvent::BalloonShown);
    }

    #[test]
    fn ignores_the_high_word() {
        // NOTIFYICON_VERSION_4 packs the icon id into the high word
        let lparam = (7 << 16) | 1029;
        assert_eq!(TrayEvent::from_lparam(lparam), TrayEvent::BalloonClicked);
    }

    #[test]
    fn mouse_messages_do_not_dismiss() {
        // WM_MOUSEMOVE
        let event = TrayEvent::from_lparam(0x0200);
        assert_eq!(event, TrayEvent::Other(0x0200));
        assert_eq!(event.dismissal(), None);
        assert_eq!(TrayEvent::BalloonShown.dismissal(), None);
    }

    #[test]
    fn click_and_timeout_map_to_dismissals() {
        assert_eq!(TrayEvent::BalloonClicked.dismissal(), Some(Dismissal::Clicked));
        assert_eq!(TrayEvent::BalloonTimedOut.dismissal(), Some(Dismissal::Expired));
        assert_eq!(TrayEvent::BalloonHidden.dismissal(), Some(Dismissal::Expired));
    }

    #[test]
    fn first_dismissal_wins() {
        let mut latch = DismissLatch::default();
        assert_eq!(latch.outcome(), None);
        assert!(latch.dismiss(Dismissal::Expired));
        assert!(!latch.dismiss(Dismissal::Clicked));
        assert_eq!(latch.outcome(), Some(Dismissal::Expired));
    }
}
