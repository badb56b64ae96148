use toast_notifier::{BalloonIcon, Mode, Timeout, Toast, ToastNotifier};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let notifier = ToastNotifier::new();
    notifier.show(
        Toast::new()
            .title("Click me")
            .message("Clicking this toast prints a line in the console.")
            .balloon_icon(BalloonIcon::Info)
            .timeout(Timeout::Milliseconds(8000))
            .on_click_with("https://github.com", |url| {
                println!("clicked, would open {}", url);
            }),
        Mode::Blocking,
    );
}
