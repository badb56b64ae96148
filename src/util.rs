// Copyright 2019-2021 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::{ffi::OsStr, iter::once};

pub fn current_exe_name() -> Option<String> {
    std::env::current_exe()
        .ok()?
        .file_stem()?
        .to_str()
        .map(ToOwned::to_owned)
}

/// Implementation of the `LOWORD` macro.
pub fn loword(dword: u32) -> u16 {
    (dword & 0xFFFF) as u16
}

/// Encodes `s` as a NUL terminated UTF-16 string.
#[cfg_attr(not(windows), allow(dead_code))]
pub fn encode_wide(s: impl AsRef<OsStr>) -> Vec<u16> {
    #[cfg(windows)]
    let units: Vec<u16> = {
        use std::os::windows::ffi::OsStrExt;
        s.as_ref().encode_wide().collect()
    };
    #[cfg(not(windows))]
    let units: Vec<u16> = s.as_ref().to_string_lossy().encode_utf16().collect();

    units.into_iter().chain(once(0)).collect()
}

/// Copies `s` into a fixed size UTF-16 buffer, truncating it so the buffer
/// always stays NUL terminated.
#[cfg_attr(not(windows), allow(dead_code))]
pub fn copy_wide<const N: usize>(dst: &mut [u16; N], s: &str) {
    let mut len = 0;
    for (slot, unit) in dst.iter_mut().take(N.saturating_sub(1)).zip(s.encode_utf16()) {
        *slot = unit;
        len += 1;
    }
    // don't leave half of a surrogate pair behind
    if len > 0 && (0xD800..0xDC00).contains(&dst[len - 1]) && s.encode_utf16().count() > len {
        len -= 1;
    }
    for slot in dst.iter_mut().skip(len) {
        *slot = 0;
    }
}

#[cfg(all(windows, target_pointer_width = "32"))]
pub unsafe fn get_window_long_ptr(
    window: windows_sys::Win32::Foundation::HWND,
    index: windows_sys::Win32::UI::WindowsAndMessaging::WINDOW_LONG_PTR_INDEX,
) -> isize {
    windows_sys::Win32::UI::WindowsAndMessaging::GetWindowLongW(window, index) as _
}

#[cfg(all(windows, target_pointer_width = "64"))]
pub unsafe fn get_window_long_ptr(
    window: windows_sys::Win32::Foundation::HWND,
    index: windows_sys::Win32::UI::WindowsAndMessaging::WINDOW_LONG_PTR_INDEX,
) -> isize {
    windows_sys::Win32::UI::WindowsAndMessaging::GetWindowLongPtrW(window, index)
}

#[cfg(all(windows, target_pointer_width = "32"))]
pub unsafe fn set_window_long_ptr(
    window: windows_sys::Win32::Foundation::HWND,
    index: windows_sys::Win32::UI::WindowsAndMessaging::WINDOW_LONG_PTR_INDEX,
    value: isize,
) -> isize {
    windows_sys::Win32::UI::WindowsAndMessaging::SetWindowLongW(window, index, value as _) as _
}

#[cfg(all(windows, target_pointer_width = "64"))]
pub unsafe fn set_window_long_ptr(
    window: windows_sys::Win32::Foundation::HWND,
    index: windows_sys::Win32::UI::WindowsAndMessaging::WINDOW_LONG_PTR_INDEX,
    value: isize,
) -> isize {
    windows_sys::Win32::UI::WindowsAndMessaging::SetWindowLongPtrW(window, index, value)
}
