// Example: fixed-height rows, scrolling, and scroll-to-index.
use rowvirt::{Align, RowWindow, WindowOptions};

fn main() {
    let mut w = RowWindow::new(
        WindowOptions::fixed(1_000_000, 24)
            .with_viewport_height(480)
            .with_overscan(3),
    );
    w.on_scroll(123_456);

    println!("total_height={}", w.total_height());
    println!("visible_range={:?}", w.visible_range());

    let off = w.scroll_to_aligned(999_999, Align::End);
    println!("after scroll_to: offset={off:?} range={:?}", w.visible_range());
}
