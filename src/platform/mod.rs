// Copyright 2019-2021 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use crate::{error::Result, event::Dismissal, toast::Toast};

#[cfg(windows)]
mod shell;
#[cfg(not(windows))]
mod unsupported;

#[cfg(windows)]
pub(crate) use self::shell::ShellPresenter as NativePresenter;
#[cfg(not(windows))]
pub(crate) use self::unsupported::UnsupportedPresenter as NativePresenter;

/// Puts toasts on screen.
///
/// [`ToastNotifier`](crate::ToastNotifier) uses the Shell tray icon backend by
/// default. Implement this to route toasts somewhere else.
pub trait Presenter: Send + Sync {
    /// Shows `toast` and blocks until it goes away.
    ///
    /// The click callback has already been taken out of `toast`, the caller
    /// runs it when this returns [`Dismissal::Clicked`].
    fn present(&self, toast: &Toast) -> Result<Dismissal>;
}
