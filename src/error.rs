// Copyright 2019-2021 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while putting a toast on screen.
///
/// Win32 failures carry the value of `GetLastError` at the time of the call.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create the toast window (win32 error {0})")]
    CreateWindow(u32),

    #[error("failed to add the tray icon (win32 error {0})")]
    AddIcon(u32),

    #[error("failed to show the balloon (win32 error {0})")]
    ShowBalloon(u32),

    #[error("failed to spawn the toast thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("toast notifications are only supported on Windows")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, Error>;
