// Copyright 2019-2021 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Show Windows balloon "toast" notifications from a temporary tray icon.
//!
//! Every toast gets its own hidden window and tray icon. The thread presenting
//! the toast pumps window messages until the user clicks the balloon or the
//! timeout dismisses it, then everything is torn down again.
//!
//! # Note:
//!
//! Only Windows can actually present a toast. On other targets
//! [`ToastNotifier::show`] logs [`Error::Unsupported`] and returns.
//!
//! # Examples
//!
//! # Example 1: Blocking toast
//!
//! ```no_run
//! # use toast_notifier::*;
//! let notifier = ToastNotifier::new();
//! notifier.show(
//!     Toast::new()
//!         .title("Build finished")
//!         .message("All 42 tests passed.")
//!         .timeout(Timeout::Default), // 5000 milliseconds
//!     Mode::Blocking,
//! );
//! ```
//!
//! # Example 2: Background toast with a click callback
//!
//! ```no_run
//! # use toast_notifier::*;
//! let notifier = ToastNotifier::new();
//! let accepted = notifier.show(
//!     Toast::new()
//!         .title("New release")
//!         .message("Click to open the changelog.")
//!         .on_click_with("https://example.com/changelog", |url| {
//!             println!("opening {}", url);
//!         }),
//!     Mode::Background,
//! );
//! assert!(accepted);
//! // a second toast is refused while the first one is still up
//! assert!(!notifier.show(Toast::new(), Mode::Background));
//! notifier.wait();
//! ```
//!

mod error;
mod event;
mod notifier;
mod platform;
mod timeout;
mod toast;
mod util;

pub use crate::{
    error::{Error, Result},
    event::Dismissal,
    notifier::{Mode, ToastNotifier},
    platform::Presenter,
    timeout::Timeout,
    toast::{BalloonIcon, Toast},
};
