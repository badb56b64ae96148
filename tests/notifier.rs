use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::{self, Receiver, Sender},
        Arc, Mutex,
    },
    time::Duration,
};

use toast_notifier::{Dismissal, Error, Mode, Presenter, Result, Timeout, Toast, ToastNotifier};

const WAIT: Duration = Duration::from_secs(5);

/// Holds every toast on screen until the test says how it goes away.
struct Scripted {
    shown: Mutex<Sender<String>>,
    outcome: Mutex<Receiver<Result<Dismissal>>>,
}

struct Script {
    shown: Receiver<String>,
    outcome: Sender<Result<Dismissal>>,
}

impl Script {
    /// Waits until a toast is on screen and returns its title.
    fn next_shown(&self) -> String {
        self.shown.recv_timeout(WAIT).expect("no toast was shown")
    }

    fn finish(&self, outcome: Result<Dismissal>) {
        self.outcome.send(outcome).unwrap();
    }
}

fn scripted() -> (ToastNotifier, Script) {
    let (shown_tx, shown_rx) = mpsc::channel();
    let (outcome_tx, outcome_rx) = mpsc::channel();
    let presenter = Scripted {
        shown: Mutex::new(shown_tx),
        outcome: Mutex::new(outcome_rx),
    };
    (
        ToastNotifier::with_presenter(Arc::new(presenter)),
        Script {
            shown: shown_rx,
            outcome: outcome_tx,
        },
    )
}

impl Presenter for Scripted {
    fn present(&self, toast: &Toast) -> Result<Dismissal> {
        self.shown.lock().unwrap().send(toast.title.clone()).unwrap();
        self.outcome.lock().unwrap().recv().unwrap()
    }
}

fn recording(args: &'static str) -> (Arc<Mutex<Vec<&'static str>>>, Toast) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let toast = Toast::new()
        .title("with callback")
        .on_click_with((Arc::clone(&calls), args), |(calls, args)| {
            calls.lock().unwrap().push(args);
        });
    (calls, toast)
}

#[test]
fn second_background_toast_is_refused_while_first_is_active() {
    let (notifier, script) = scripted();

    assert!(notifier.show(Toast::new().title("first"), Mode::Background));
    assert_eq!(script.next_shown(), "first");
    assert!(notifier.notification_active());

    assert!(!notifier.show(Toast::new().title("second"), Mode::Background));
    assert!(notifier.notification_active());

    script.finish(Ok(Dismissal::Expired));
    notifier.wait();
    assert!(!notifier.notification_active());

    // the refused toast was never presented
    assert!(script.shown.try_recv().is_err());
}

#[test]
fn background_toast_accepted_again_after_previous_finished() {
    let (notifier, script) = scripted();

    assert!(notifier.show(Toast::new().title("one"), Mode::Background));
    assert_eq!(script.next_shown(), "one");
    script.finish(Ok(Dismissal::Expired));
    notifier.wait();

    assert!(notifier.show(Toast::new().title("two"), Mode::Background));
    assert_eq!(script.next_shown(), "two");
    script.finish(Ok(Dismissal::Clicked));
    notifier.wait();
    assert!(!notifier.notification_active());
}

#[test]
fn blocking_show_returns_true_once_toast_is_gone() {
    let (notifier, script) = scripted();
    script.finish(Ok(Dismissal::Expired));

    assert!(notifier.show(Toast::new().title("blocking"), Mode::Blocking));
    assert_eq!(script.next_shown(), "blocking");
    assert!(!notifier.notification_active());
}

/// Keeps only the toast titled "bg" on screen until the gate opens.
struct Gated {
    shown: Mutex<Sender<String>>,
    gate: Mutex<Receiver<()>>,
}

impl Presenter for Gated {
    fn present(&self, toast: &Toast) -> Result<Dismissal> {
        self.shown.lock().unwrap().send(toast.title.clone()).unwrap();
        if toast.title == "bg" {
            self.gate.lock().unwrap().recv().unwrap();
        }
        Ok(Dismissal::Expired)
    }
}

#[test]
fn blocking_show_is_not_limited_by_an_active_background_toast() {
    let (shown_tx, shown) = mpsc::channel();
    let (open, gate) = mpsc::channel();
    let notifier = ToastNotifier::with_presenter(Arc::new(Gated {
        shown: Mutex::new(shown_tx),
        gate: Mutex::new(gate),
    }));

    assert!(notifier.show(Toast::new().title("bg"), Mode::Background));
    assert_eq!(shown.recv_timeout(WAIT).unwrap(), "bg");

    assert!(notifier.show(Toast::new().title("fg"), Mode::Blocking));
    assert_eq!(shown.recv_timeout(WAIT).unwrap(), "fg");
    assert!(notifier.notification_active());
    assert!(!notifier.show(Toast::new().title("bg2"), Mode::Background));

    open.send(()).unwrap();
    notifier.wait();
    assert!(!notifier.notification_active());
    assert!(shown.try_recv().is_err());
}

#[test]
fn click_runs_callback_with_args_exactly_once() {
    let (notifier, script) = scripted();
    let (calls, toast) = recording("https://example.com");

    assert!(notifier.show(toast, Mode::Background));
    script.next_shown();
    script.finish(Ok(Dismissal::Clicked));
    notifier.wait();

    assert_eq!(*calls.lock().unwrap(), vec!["https://example.com"]);
}

#[test]
fn timeout_removes_toast_without_callback() {
    let (notifier, script) = scripted();
    let (calls, toast) = recording("unused");

    script.finish(Ok(Dismissal::Expired));
    let dismissal = notifier.show_and_wait(toast.timeout(Timeout::Milliseconds(10)));

    assert_eq!(dismissal.unwrap(), Dismissal::Expired);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn presentation_error_is_reported_by_show_and_wait_only() {
    let (notifier, script) = scripted();
    let hits = Arc::new(AtomicUsize::new(0));

    script.finish(Err(Error::CreateWindow(1400)));
    let h = Arc::clone(&hits);
    let result = notifier.show_and_wait(Toast::new().on_click(move || {
        h.fetch_add(1, Ordering::SeqCst);
    }));
    assert!(matches!(result, Err(Error::CreateWindow(1400))));

    script.finish(Err(Error::ShowBalloon(5)));
    assert!(notifier.show(Toast::new(), Mode::Blocking));

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn panicking_callback_clears_active_flag() {
    let (notifier, script) = scripted();

    assert!(notifier.show(
        Toast::new().on_click(|| panic!("callback failed")),
        Mode::Background
    ));
    script.next_shown();
    script.finish(Ok(Dismissal::Clicked));
    notifier.wait();

    assert!(!notifier.notification_active());
    assert!(notifier.show(Toast::new(), Mode::Background));
    script.next_shown();
    script.finish(Ok(Dismissal::Expired));
    notifier.wait();
}
