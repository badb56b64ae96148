// Copyright 2019-2021 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::{
    fmt,
    path::{Path, PathBuf},
};

use once_cell::sync::Lazy;

use crate::{timeout::Timeout, util};

static DEFAULT_TOOLTIP: Lazy<String> =
    Lazy::new(|| util::current_exe_name().unwrap_or_else(|| "Notification".to_owned()));

pub(crate) type ClickCallback = Box<dyn FnOnce() + Send + 'static>;

/// The stock icon drawn inside the balloon next to its title.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BalloonIcon {
    None,
    Info,
    Warning,
    Error,
    /// The toast's own tray icon.
    User,
}

impl Default for BalloonIcon {
    fn default() -> Self {
        BalloonIcon::None
    }
}

/// Describes a toast
#[non_exhaustive]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub icon_path: Option<PathBuf>,
    pub timeout: Timeout,
    pub balloon_icon: BalloonIcon,
    pub sound: bool,
    pub tooltip: String,
    on_click: Option<ClickCallback>,
}

impl Default for Toast {
    fn default() -> Toast {
        Toast {
            title: "Notification".to_owned(),
            message: "Here comes the message".to_owned(),
            icon_path: None,
            timeout: Timeout::Default,
            balloon_icon: BalloonIcon::None,
            sound: true,
            tooltip: DEFAULT_TOOLTIP.clone(),
            on_click: None,
        }
    }
}

impl fmt::Debug for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toast")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("icon_path", &self.icon_path)
            .field("timeout", &self.timeout)
            .field("balloon_icon", &self.balloon_icon)
            .field("sound", &self.sound)
            .field("tooltip", &self.tooltip)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl Toast {
    /// Constructs a new Toast.
    ///
    /// The title and message start with placeholder text, the tooltip is the
    /// name of the current executable.
    pub fn new() -> Toast {
        Toast::default()
    }

    /// Set the `title` shown in bold at the top of the balloon.
    pub fn title(mut self, title: &str) -> Toast {
        self.title = title.to_owned();
        self
    }

    /// Set the `message`, the body of the balloon.
    pub fn message(mut self, message: &str) -> Toast {
        self.message = message.to_owned();
        self
    }

    /// Set the `.ico` file used for the tray icon.
    ///
    /// When the file can't be loaded the system application icon is used instead.
    pub fn icon_path(mut self, path: impl AsRef<Path>) -> Toast {
        self.icon_path = Some(path.as_ref().to_owned());
        self
    }

    /// Set the `timeout` field.
    pub fn timeout(mut self, timeout: impl Into<Timeout>) -> Toast {
        self.timeout = timeout.into();
        self
    }

    /// Set the stock icon drawn inside the balloon.
    pub fn balloon_icon(mut self, icon: BalloonIcon) -> Toast {
        self.balloon_icon = icon;
        self
    }

    /// Whether the system notification sound plays when the balloon shows up.
    pub fn sound(mut self, sound: bool) -> Toast {
        self.sound = sound;
        self
    }

    /// Set the text shown when hovering the tray icon.
    pub fn tooltip(mut self, tooltip: &str) -> Toast {
        self.tooltip = tooltip.to_owned();
        self
    }

    /// Run `callback` when the user clicks the balloon.
    ///
    /// It runs at most once, on the thread presenting the toast, and never
    /// when the toast times out.
    pub fn on_click<F>(mut self, callback: F) -> Toast
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_click = Some(Box::new(callback));
        self
    }

    /// Like [`Toast::on_click`], handing `args` to `callback` on click.
    pub fn on_click_with<A, F>(self, args: A, callback: F) -> Toast
    where
        A: Send + 'static,
        F: FnOnce(A) + Send + 'static,
    {
        self.on_click(move || callback(args))
    }

    pub fn has_on_click(&self) -> bool {
        self.on_click.is_some()
    }

    pub(crate) fn take_on_click(&mut self) -> Option<ClickCallback> {
        self.on_click.take()
    }
}
