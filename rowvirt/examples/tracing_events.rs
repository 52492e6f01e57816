// Example: diagnostic logging through `tracing` (run with `--features tracing`).
use rowvirt::{RowWindow, WindowOptions};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rowvirt=trace")),
        )
        .init();

    let mut w = RowWindow::new(
        WindowOptions::variable(100, |i| if i == 3 { 0 } else { 20 }).with_viewport_height(100),
    );
    w.on_scroll(400);
    w.measure(2, 35);
    w.on_count_changed(10);
    let _ = w.scroll_to_bottom();
}
