// Example: per-row heights with post-mount measurement feedback.
use rowvirt::{RowWindow, WindowOptions};

fn main() {
    // Estimated heights: wrapped rows are taller.
    let mut w = RowWindow::new(
        WindowOptions::variable(10_000, |i| if i % 7 == 0 { 48 } else { 24 })
            .with_viewport_height(600)
            .with_overscan(2),
    );
    w.on_scroll(12_000);
    println!("estimated range={:?}", w.visible_range());

    // The host mounts the rows and reports real heights. Rows above the scroll offset shift the
    // offset so the content under the viewport stays put.
    let range = w.visible_range().expect("non-empty dataset");
    let mut shift = 0i64;
    for index in range.indices() {
        shift += w.measure(index, 30);
    }
    shift += w.measure(3, 90);
    println!(
        "measured={} shift={shift} scroll_top={} range={:?}",
        w.size().measured_count(),
        w.scroll_top(),
        w.visible_range()
    );
    println!("cached_rows={} total_height={}", w.size().cached_rows(), w.total_height());
}
