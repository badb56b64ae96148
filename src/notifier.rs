// Copyright 2020-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
    thread::{self, JoinHandle},
};

use tracing::{debug, error, warn};

use crate::{
    error::{Error, Result},
    event::Dismissal,
    platform::{NativePresenter, Presenter},
    toast::Toast,
};

/// Where a toast is presented.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// On the calling thread, [`ToastNotifier::show`] returns once the toast is gone.
    Blocking,
    /// On a worker thread. Only one background toast per notifier is up at a time.
    Background,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Blocking
    }
}

/// Shows toasts, at most one background toast at a time.
pub struct ToastNotifier {
    presenter: Arc<dyn Presenter>,
    active: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Default for ToastNotifier {
    fn default() -> Self {
        ToastNotifier::new()
    }
}

impl fmt::Debug for ToastNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastNotifier")
            .field("active", &self.notification_active())
            .finish()
    }
}

impl ToastNotifier {
    /// A notifier presenting toasts through the Windows Shell.
    pub fn new() -> ToastNotifier {
        ToastNotifier::with_presenter(Arc::new(NativePresenter::default()))
    }

    /// A notifier presenting toasts through `presenter`.
    pub fn with_presenter(presenter: Arc<dyn Presenter>) -> ToastNotifier {
        ToastNotifier {
            presenter,
            active: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    /// Shows the Toast.
    ///
    /// Returns `false` only when `mode` is [`Mode::Background`] and an earlier
    /// background toast is still up (or its thread couldn't be spawned).
    /// Presentation errors are logged, never returned.
    pub fn show(&self, toast: Toast, mode: Mode) -> bool {
        match mode {
            Mode::Blocking => {
                if let Err(e) = self.show_and_wait(toast) {
                    error!(error = %e, "failed to show toast");
                }
                true
            }
            Mode::Background => self.spawn(toast),
        }
    }

    /// Shows the Toast on the calling thread and reports how it went away.
    ///
    /// The click callback, if any, has run by the time this returns.
    pub fn show_and_wait(&self, toast: Toast) -> Result<Dismissal> {
        present_and_dispatch(self.presenter.as_ref(), toast)
    }

    /// Whether a background toast launched by this notifier is still up.
    pub fn notification_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Blocks until the current background toast, if any, is gone.
    ///
    /// Returns immediately when called from the toast's own click callback.
    pub fn wait(&self) {
        let handle = {
            let mut worker = self.lock_worker();
            match worker.take() {
                Some(handle) if handle.thread().id() == thread::current().id() => {
                    // a thread can't join itself
                    *worker = Some(handle);
                    return;
                }
                handle => handle,
            }
        };
        if let Some(handle) = handle {
            join_worker(handle);
        }
    }

    fn spawn(&self, toast: Toast) -> bool {
        let mut worker = self.lock_worker();
        if self.active.load(Ordering::Acquire) {
            warn!(title = %toast.title, "a toast is still active, dropping this one");
            return false;
        }
        if let Some(finished) = worker.take() {
            join_worker(finished);
        }

        self.active.store(true, Ordering::Release);
        let guard = ActiveGuard(Arc::clone(&self.active));
        let presenter = Arc::clone(&self.presenter);
        let spawned = thread::Builder::new()
            .name("toast-notifier".into())
            .spawn(move || {
                let _guard = guard;
                if let Err(e) = present_and_dispatch(presenter.as_ref(), toast) {
                    error!(error = %e, "failed to show toast");
                }
            });

        match spawned {
            Ok(handle) => {
                *worker = Some(handle);
                true
            }
            Err(e) => {
                // the closure and its guard are dropped with the error
                error!(error = %Error::Spawn(e), "toast not shown");
                false
            }
        }
    }

    fn lock_worker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.worker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clears the active flag when the worker ends, panics included.
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn join_worker(handle: JoinHandle<()>) {
    if handle.join().is_err() {
        error!("toast thread panicked");
    }
}

fn present_and_dispatch(presenter: &dyn Presenter, mut toast: Toast) -> Result<Dismissal> {
    let on_click = toast.take_on_click();
    let dismissal = presenter.present(&toast)?;
    debug!(title = %toast.title, ?dismissal, "toast gone");

    if dismissal == Dismissal::Clicked {
        if let Some(callback) = on_click {
            callback();
        }
    }
    Ok(dismissal)
}
