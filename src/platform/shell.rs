// Copyright 2020-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::{
    mem,
    path::{Path, PathBuf},
    process, ptr,
    sync::atomic::{AtomicUsize, Ordering},
};

use tracing::{debug, error, warn};
use windows_sys::Win32::{
    Foundation::{GetLastError, HWND, LPARAM, LRESULT, WPARAM},
    Graphics::Gdi::UpdateWindow,
    System::LibraryLoader::GetModuleHandleW,
    UI::{
        Shell::{
            Shell_NotifyIconW, NIF_ICON, NIF_INFO, NIF_MESSAGE, NIF_TIP, NIIF_ERROR, NIIF_INFO,
            NIIF_NONE, NIIF_NOSOUND, NIIF_USER, NIIF_WARNING, NIM_ADD, NIM_DELETE, NIM_MODIFY,
            NOTIFYICONDATAW, NOTIFYICONDATAW_0, NOTIFY_ICON_INFOTIP_FLAGS,
        },
        WindowsAndMessaging::{
            self as w32wm, CreateWindowExW, DefWindowProcW, DestroyIcon, DestroyWindow,
            DispatchMessageW, GetMessageW, KillTimer, LoadIconW, LoadImageW, PostQuitMessage,
            RegisterClassExW, SetTimer, TranslateMessage, UnregisterClassW, CREATESTRUCTW,
            CW_USEDEFAULT, GWLP_USERDATA, HICON, IDI_APPLICATION, IMAGE_ICON, LR_DEFAULTSIZE,
            LR_LOADFROMFILE, MSG, WNDCLASSEXW, WS_OVERLAPPED, WS_SYSMENU,
        },
    },
};

use super::Presenter;
use crate::{
    error::{Error, Result},
    event::{DismissLatch, Dismissal, TrayEvent, DISMISS_TIMER_ID, WM_TRAY_CALLBACK},
    timeout::Timeout,
    toast::{BalloonIcon, Toast},
    util,
};

/// id of the one icon every toast window owns
const TRAY_ICON_ID: u32 = 1;

static CLASS_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Presents toasts as Shell balloon notifications from a temporary tray icon.
#[derive(Debug, Default)]
pub struct ShellPresenter;

impl Presenter for ShellPresenter {
    fn present(&self, toast: &Toast) -> Result<Dismissal> {
        unsafe {
            let hinstance = GetModuleHandleW(ptr::null());
            let class_name = util::encode_wide(unique_class_name());

            let wnd_class = WNDCLASSEXW {
                cbSize: mem::size_of::<WNDCLASSEXW>() as u32,
                style: 0,
                lpfnWndProc: Some(window_proc),
                cbClsExtra: 0,
                cbWndExtra: 0,
                hInstance: hinstance,
                hIcon: 0,
                hCursor: 0,
                hbrBackground: 0,
                lpszMenuName: ptr::null(),
                lpszClassName: class_name.as_ptr(),
                hIconSm: 0,
            };
            if RegisterClassExW(&wnd_class) == 0 {
                error!(code = GetLastError(), "failed to register the toast window class");
            }

            let state = Box::into_raw(Box::new(WindowState::default()));
            let hwnd = CreateWindowExW(
                0,
                class_name.as_ptr(),
                util::encode_wide("Taskbar").as_ptr(),
                WS_OVERLAPPED | WS_SYSMENU,
                0,
                0,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                0,
                0,
                hinstance,
                state as _,
            );

            if hwnd == 0 {
                let code = GetLastError();
                drop(Box::from_raw(state));
                UnregisterClassW(class_name.as_ptr(), hinstance);
                return Err(Error::CreateWindow(code));
            }
            UpdateWindow(hwnd);

            let icon = TrayIcon::load(toast.icon_path.as_deref());
            let shown = add_balloon(hwnd, &icon, toast);
            if shown.is_ok() {
                if let Some(ms) = timer_millis(toast.timeout) {
                    SetTimer(hwnd, DISMISS_TIMER_ID, ms, None);
                }
                debug!(title = %toast.title, "toast shown");
                pump_messages();
            }

            let state = Box::from_raw(state);
            if state.latch.outcome().is_none() {
                // the loop ended without a dismissal, the icon may still be there
                delete_tray_icon(hwnd);
            }
            DestroyWindow(hwnd);
            UnregisterClassW(class_name.as_ptr(), hinstance);
            drop(icon);

            shown.map(|()| state.latch.outcome().unwrap_or(Dismissal::Expired))
        }
    }
}

fn unique_class_name() -> String {
    format!(
        "ToastNotifier{}_{}",
        process::id(),
        CLASS_COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

fn timer_millis(timeout: Timeout) -> Option<u32> {
    match timeout {
        Timeout::Never | Timeout::Milliseconds(0) => None,
        t => Some(u64::from(t).min(u32::MAX as u64) as u32),
    }
}

fn info_flags(toast: &Toast) -> NOTIFY_ICON_INFOTIP_FLAGS {
    let icon = match toast.balloon_icon {
        BalloonIcon::None => NIIF_NONE,
        BalloonIcon::Info => NIIF_INFO,
        BalloonIcon::Warning => NIIF_WARNING,
        BalloonIcon::Error => NIIF_ERROR,
        BalloonIcon::User => NIIF_USER,
    };
    if toast.sound {
        icon
    } else {
        icon | NIIF_NOSOUND
    }
}

/// The icon shown in the tray, destroyed on drop when it was loaded from a file.
struct TrayIcon {
    handle: HICON,
    owned: bool,
}

impl TrayIcon {
    unsafe fn load(path: Option<&Path>) -> TrayIcon {
        if let Some(path) = path {
            let path = absolute(path);
            let wide = util::encode_wide(&path);
            let handle = LoadImageW(
                0,
                wide.as_ptr(),
                IMAGE_ICON,
                0,
                0,
                LR_LOADFROMFILE | LR_DEFAULTSIZE,
            );
            if handle != 0 {
                return TrayIcon {
                    handle,
                    owned: true,
                };
            }
            error!(
                path = %path.display(),
                code = GetLastError(),
                "failed to load the toast icon, falling back to the application icon"
            );
        }

        TrayIcon {
            handle: LoadIconW(0, IDI_APPLICATION),
            owned: false,
        }
    }
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        if self.owned {
            unsafe { DestroyIcon(self.handle) };
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_owned();
    }
    match std::env::current_dir() {
        Ok(dir) => dir.join(path),
        Err(e) => {
            warn!(error = %e, "can't resolve the icon path against the working directory");
            path.to_owned()
        }
    }
}

unsafe fn icon_data(hwnd: HWND) -> NOTIFYICONDATAW {
    let mut nid: NOTIFYICONDATAW = mem::zeroed();
    nid.cbSize = mem::size_of::<NOTIFYICONDATAW>() as u32;
    nid.hWnd = hwnd;
    nid.uID = TRAY_ICON_ID;
    nid
}

unsafe fn add_balloon(hwnd: HWND, icon: &TrayIcon, toast: &Toast) -> Result<()> {
    let mut nid = icon_data(hwnd);
    nid.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
    nid.uCallbackMessage = WM_TRAY_CALLBACK;
    nid.hIcon = icon.handle;
    // the struct is packed on 32-bit targets, so fill the buffers out of place
    let mut tip = [0u16; 128];
    util::copy_wide(&mut tip, &toast.tooltip);
    nid.szTip = tip;
    if Shell_NotifyIconW(NIM_ADD, &nid) == 0 {
        return Err(Error::AddIcon(GetLastError()));
    }

    let mut info = [0u16; 256];
    util::copy_wide(&mut info, &toast.message);
    let mut info_title = [0u16; 64];
    util::copy_wide(&mut info_title, &toast.title);
    nid.uFlags = NIF_INFO;
    nid.szInfo = info;
    nid.szInfoTitle = info_title;
    nid.dwInfoFlags = info_flags(toast);
    nid.Anonymous = NOTIFYICONDATAW_0 {
        uTimeout: timer_millis(toast.timeout).unwrap_or(0),
    };
    if Shell_NotifyIconW(NIM_MODIFY, &nid) == 0 {
        let code = GetLastError();
        delete_tray_icon(hwnd);
        return Err(Error::ShowBalloon(code));
    }

    Ok(())
}

unsafe fn delete_tray_icon(hwnd: HWND) {
    let nid = icon_data(hwnd);
    Shell_NotifyIconW(NIM_DELETE, &nid);
}

/// Runs the message loop of the current thread until `WM_QUIT`.
unsafe fn pump_messages() {
    let mut msg: MSG = mem::zeroed();
    loop {
        match GetMessageW(&mut msg, 0, 0, 0) {
            0 => break,
            -1 => {
                error!(code = GetLastError(), "toast message loop failed");
                break;
            }
            _ => {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }
}

#[derive(Default)]
struct WindowState {
    latch: DismissLatch,
}

unsafe fn dismiss(hwnd: HWND, state: &mut WindowState, dismissal: Dismissal) {
    if !state.latch.dismiss(dismissal) {
        return;
    }
    debug!(?dismissal, "toast dismissed");
    KillTimer(hwnd, DISMISS_TIMER_ID);
    delete_tray_icon(hwnd);
    PostQuitMessage(0);
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let mut userdata = util::get_window_long_ptr(hwnd, GWLP_USERDATA);

    match msg {
        w32wm::WM_NCCREATE => {
            if userdata == 0 {
                let createstruct = &*(lparam as *const CREATESTRUCTW);
                userdata = createstruct.lpCreateParams as isize;
                util::set_window_long_ptr(hwnd, GWLP_USERDATA, userdata);
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        WM_TRAY_CALLBACK if userdata != 0 => {
            if let Some(dismissal) = TrayEvent::from_lparam(lparam).dismissal() {
                dismiss(hwnd, &mut *(userdata as *mut WindowState), dismissal);
            }
            0
        }

        w32wm::WM_TIMER if wparam == DISMISS_TIMER_ID && userdata != 0 => {
            dismiss(
                hwnd,
                &mut *(userdata as *mut WindowState),
                Dismissal::Expired,
            );
            0
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
