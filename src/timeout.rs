// Copyright 2019-2021 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::time::Duration;

/// Describes how long a toast stays up before it removes itself
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Timeout {
    /// Remove the toast after 5 seconds.
    Default,

    /// Never remove the toast on our own.
    ///
    /// It still goes away when clicked or when the shell hides the balloon.
    Never,

    /// Remove the toast after n milliseconds.
    ///
    /// `Milliseconds(0)` arms no timer and behaves like [`Timeout::Never`].
    Milliseconds(u32),
}

impl Timeout {
    /// Time until the toast removes itself, `None` for [`Timeout::Never`].
    pub fn as_duration(self) -> Option<Duration> {
        match u64::from(self) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl From<Timeout> for u64 {
    fn from(timeout: Timeout) -> Self {
        match timeout {
            Timeout::Default => 5000,
            Timeout::Never => 0,
            Timeout::Milliseconds(ms) => ms as _,
        }
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        // saturate, u32::MAX ms is ~49 days
        let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        Timeout::Milliseconds(ms)
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout::Default
    }
}
