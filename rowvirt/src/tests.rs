use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

fn expected_offsets(heights: &[u32]) -> Vec<u64> {
    let mut out = Vec::with_capacity(heights.len() + 1);
    let mut off = 0u64;
    out.push(off);
    for &h in heights {
        off += h.max(1) as u64;
        out.push(off);
    }
    out
}

fn window(count: usize, row_height: u32, viewport_height: u32, overscan: usize) -> RowWindow {
    RowWindow::new(
        WindowOptions::fixed(count, row_height)
            .with_viewport_height(viewport_height)
            .with_overscan(overscan),
    )
}

#[test]
fn fixed_size_range_and_total() {
    let w = window(1_000, 40, 400, 2);
    assert_eq!(w.total_height(), 40_000);
    for i in [0usize, 1, 17, 999] {
        assert_eq!(w.size().offset_of(i), i as u64 * 40);
    }
    // 10 visible rows (0..=9) + 2 overscan at the trailing edge.
    assert_eq!(w.visible_range(), Some(VisibleRange::new(0, 11)));
}

#[test]
fn overscan_applies_to_both_edges() {
    let mut w = window(100, 1, 10, 1);
    w.on_scroll(50);
    assert_eq!(w.visible_range(), Some(VisibleRange::new(49, 60)));
}

#[test]
fn variable_heights_range() {
    let heights = [20u32, 40, 60, 20, 100];
    let mut w = RowWindow::new(
        WindowOptions::variable(heights.len(), move |i| heights[i])
            .with_viewport_height(50)
            .with_overscan(0),
    );
    assert_eq!(w.size().index_at_offset(125), Some(3));
    w.on_scroll(100);
    assert_eq!(w.visible_range(), Some(VisibleRange::new(2, 4)));
    w.on_scroll(0);
    assert_eq!(w.visible_range(), Some(VisibleRange::new(0, 1)));
}

#[test]
fn empty_dataset_has_no_range_and_scroll_to_is_noop() {
    let mut w = window(0, 10, 100, 5);
    assert_eq!(w.visible_range(), None);
    assert_eq!(w.scroll_to(3), None);
    assert_eq!(w.scroll_to_top(), None);
    assert_eq!(w.scroll_to_bottom(), None);
    assert_eq!(w.scroll_top(), 0);
    assert_eq!(w.total_height(), 0);
}

#[test]
fn zero_viewport_still_mounts_the_row_at_scroll_top() {
    let mut w = window(100, 10, 0, 0);
    w.on_scroll(55);
    assert_eq!(w.visible_range(), Some(VisibleRange::new(5, 5)));
}

#[test]
fn shrinking_dataset_reclamps_range() {
    let mut w = window(100, 10, 50, 5);
    w.on_scroll(900);
    assert_eq!(w.visible_range(), Some(VisibleRange::new(85, 99)));

    w.on_count_changed(20);
    // max scroll is 150, so rows 15..=19 are visible.
    assert_eq!(w.visible_range(), Some(VisibleRange::new(10, 19)));

    w.on_count_changed(0);
    assert_eq!(w.visible_range(), None);
}

#[test]
fn scroll_to_clamps_index_and_offset() {
    let mut w = window(100, 10, 50, 0);
    assert_eq!(w.scroll_to(10_000), Some(950));
    assert_eq!(w.visible_range(), Some(VisibleRange::new(95, 99)));

    assert_eq!(w.scroll_to_top(), Some(0));
    assert_eq!(w.visible_range(), Some(VisibleRange::new(0, 4)));

    assert_eq!(w.scroll_to_bottom(), Some(950));
    assert_eq!(w.scroll_direction(), Some(ScrollDirection::Forward));
}

#[test]
fn scroll_to_alignment() {
    let mut w = window(100, 10, 50, 0);
    assert_eq!(w.scroll_to_offset(10, Align::Start), Some(100));
    assert_eq!(w.scroll_to_offset(10, Align::End), Some(60));
    assert_eq!(w.scroll_to_offset(10, Align::Center), Some(80));

    w.on_scroll(90);
    // Row 10 spans 100..110 which is inside 90..140.
    assert_eq!(w.scroll_to_offset(10, Align::Auto), Some(90));
    // Row 2 is above the viewport.
    assert_eq!(w.scroll_to_offset(2, Align::Auto), Some(20));
    // Row 20 is below the viewport.
    assert_eq!(w.scroll_to_offset(20, Align::Auto), Some(160));
}

#[test]
fn range_change_notifications_are_deduplicated_and_batched() {
    let calls = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(Mutex::new(None));
    let opts = WindowOptions::fixed(1_000, 10)
        .with_viewport_height(100)
        .with_overscan(0)
        .with_on_range_change(Some({
            let calls = Arc::clone(&calls);
            let last = Arc::clone(&last);
            move |r: Option<VisibleRange>| {
                calls.fetch_add(1, Ordering::SeqCst);
                *last.lock().unwrap() = r;
            }
        }));
    let mut w = RowWindow::new(opts);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // Still rows 0..=9.
    w.on_scroll(0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    w.on_scroll(5);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(*last.lock().unwrap(), Some(VisibleRange::new(0, 10)));

    w.batch_update(|w| {
        w.on_resize(200);
        w.on_scroll(300);
        w.set_overscan(2);
    });
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(*last.lock().unwrap(), Some(VisibleRange::new(28, 51)));
}

#[test]
fn measure_above_viewport_shifts_scroll_top() {
    let mut w = window(100, 10, 50, 0);
    w.on_scroll(500);
    assert_eq!(w.measure(10, 30), 20);
    assert_eq!(w.scroll_top(), 520);
    assert_eq!(w.total_height(), 1_020);
    assert_eq!(w.visible_range(), Some(VisibleRange::new(50, 54)));

    // Row 60 starts below the scroll offset: no adjustment.
    assert_eq!(w.measure(60, 30), 0);
    assert_eq!(w.scroll_top(), 520);
    assert_eq!(w.total_height(), 1_040);

    // Shrinking a row above the viewport shifts back.
    assert_eq!(w.measure(10, 5), -25);
    assert_eq!(w.scroll_top(), 495);
}

#[test]
fn measure_many_sums_adjustments() {
    let mut w = window(100, 10, 50, 0);
    w.on_scroll(500);
    let applied = w.measure_many([(1, 20), (2, 20), (80, 20), (1_000, 20)]);
    assert_eq!(applied, 20);
    assert_eq!(w.scroll_top(), 520);
    assert_eq!(w.size().measured_count(), 3);

    w.clear_measurements();
    assert_eq!(w.total_height(), 1_000);
}

#[test]
fn set_row_height_rebuilds_offsets() {
    let mut w = window(10, 10, 30, 0);
    w.measure(3, 50);
    w.set_row_height(RowHeight::variable(|i| if i % 2 == 0 { 10 } else { 20 }));
    assert_eq!(w.size().measured_count(), 0);
    assert_eq!(w.total_height(), 150);
    assert_eq!(w.size().offset_of(3), 40);
}

#[test]
fn state_snapshot_restores_and_clamps() {
    let mut w = window(100, 10, 50, 0);
    w.on_scroll(420);
    let snap = w.state();
    assert_eq!(
        snap,
        WindowState {
            scroll_top: 420,
            viewport_height: 50
        }
    );

    let mut other = window(100, 10, 0, 0);
    other.restore(snap);
    assert_eq!(other.scroll_top(), 420);
    assert_eq!(other.visible_range(), w.visible_range());

    let mut short = window(10, 10, 0, 0);
    short.restore(snap);
    assert_eq!(short.scroll_top(), 50);
    assert_eq!(short.visible_range(), Some(VisibleRange::new(5, 9)));
}

#[test]
fn property_random_layout_invariants() {
    let mut rng = Lcg::new(0x5eed_1234);
    for _case in 0..200 {
        let count = rng.gen_range_usize(0, 120);
        let mut heights: Vec<u32> = (0..count).map(|_| rng.gen_range_u32(0, 40)).collect();
        let base = heights.clone();
        let mut w = RowWindow::new(
            WindowOptions::variable(count, move |i| base[i])
                .with_overscan(rng.gen_range_usize(0, 4)),
        );

        // Random post-mount measurements.
        for _ in 0..rng.gen_range_usize(0, 8) {
            if count == 0 {
                break;
            }
            let i = rng.gen_range_usize(0, count);
            let h = rng.gen_range_u32(1, 60);
            w.measure(i, h);
            heights[i] = h;
        }

        let offsets = expected_offsets(&heights);
        let size = w.size();
        assert_eq!(size.total_height(), offsets[count]);
        for i in 0..count {
            assert_eq!(size.offset_of(i), offsets[i]);
            assert_eq!(size.height_of(i) as u64, offsets[i + 1] - offsets[i]);
            assert_eq!(size.index_at_offset(size.offset_of(i)), Some(i));
        }

        for _ in 0..20 {
            let total = offsets[count];
            let scroll_top = rng.gen_range_u64(0, total + 200);
            let viewport_height = rng.gen_range_u32(1, 300);
            let overscan = w.overscan();
            let range = visible_range(w.size(), scroll_top, viewport_height, overscan);

            let Some(range) = range else {
                assert_eq!(count, 0);
                continue;
            };
            assert!(range.start <= range.end);
            assert!(range.end < count);

            let view_end = scroll_top + viewport_height as u64;
            for i in 0..count {
                let intersects = offsets[i] < view_end && offsets[i + 1] > scroll_top;
                if intersects {
                    assert!(
                        range.contains(i),
                        "row {i} intersects [{scroll_top}, {view_end}) but range is {range:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn property_scroll_to_brings_index_into_range() {
    let mut rng = Lcg::new(42);
    for _case in 0..50 {
        let count = rng.gen_range_usize(1, 500);
        let heights: Vec<u32> = (0..count).map(|_| rng.gen_range_u32(1, 80)).collect();
        let mut w = RowWindow::new(
            WindowOptions::variable(count, move |i| heights[i])
                .with_viewport_height(rng.gen_range_u32(1, 400))
                .with_overscan(rng.gen_range_usize(0, 3)),
        );
        for _ in 0..20 {
            let index = rng.gen_range_usize(0, count);
            let align = match rng.gen_range_usize(0, 4) {
                0 => Align::Start,
                1 => Align::Center,
                2 => Align::End,
                _ => Align::Auto,
            };
            let offset = w.scroll_to_aligned(index, align);
            assert!(offset.is_some());
            let range = w.visible_range().unwrap();
            assert!(range.contains(index), "index {index} not in {range:?}");
        }
    }
}

#[test]
fn example_basic_smoke() {
    let mut w = RowWindow::new(WindowOptions::fixed(1_000_000, 24).with_viewport_height(480));
    w.on_scroll(123_456);
    let range = w.visible_range().unwrap();
    assert!(range.contains(123_456 / 24));
    assert_eq!(w.total_height(), 24_000_000);

    let off = w.scroll_to_aligned(999_999, Align::End).unwrap();
    assert_eq!(off, w.max_scroll_top());
    assert_eq!(w.visible_range().unwrap().end, 999_999);
}
