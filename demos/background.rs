use std::{thread, time::Duration};

use toast_notifier::{Mode, Toast, ToastNotifier};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let notifier = ToastNotifier::new();
    for i in 1..4 {
        let accepted = notifier.show(
            Toast::new()
                .title("Background toast")
                .message(format!("This is toast number {}.", i).as_str()),
            Mode::Background,
        );
        println!("toast {} accepted: {}", i, accepted);
        thread::sleep(Duration::from_secs(1));
    }

    while notifier.notification_active() {
        thread::sleep(Duration::from_millis(100));
    }
}
