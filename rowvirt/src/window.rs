use alloc::sync::Arc;
use core::cell::Cell;
use core::cmp;
use core::fmt;

use crate::{
    Align, OnRangeChange, RowHeight, ScrollDirection, SizeModel, VisibleRange, WindowOptions,
    WindowState, max_scroll_top, visible_range,
};

/// The virtualization state of one scroll container.
///
/// `RowWindow` owns the [`SizeModel`], the current scroll offset and viewport height, and the
/// last computed [`VisibleRange`]. It is driven by discrete event methods (`on_scroll`,
/// `on_resize`, `on_count_changed`, `measure`, ...); each one recomputes the range
/// synchronously against the current row count, so a range is never computed from a stale
/// dataset.
///
/// It holds no UI objects. Scroll-to methods return the offset the host must apply to its real
/// scroll container.
#[derive(Clone)]
pub struct RowWindow {
    size: SizeModel,
    scroll_top: u64,
    viewport_height: u32,
    overscan: usize,
    scroll_direction: Option<ScrollDirection>,
    is_scrolling: bool,
    range: Option<VisibleRange>,
    on_range_change: Option<OnRangeChange>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl RowWindow {
    pub fn new(options: WindowOptions) -> Self {
        vdebug!(
            count = options.count,
            overscan = options.overscan,
            viewport_height = options.viewport_height,
            "RowWindow::new"
        );
        let size = SizeModel::new(options.count, options.row_height);
        let range = visible_range(
            &size,
            options.initial_scroll_top,
            options.viewport_height,
            options.overscan,
        );
        Self {
            size,
            scroll_top: options.initial_scroll_top,
            viewport_height: options.viewport_height,
            overscan: options.overscan,
            scroll_direction: None,
            is_scrolling: false,
            range,
            on_range_change: options.on_range_change,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn size(&self) -> &SizeModel {
        &self.size
    }

    pub fn count(&self) -> usize {
        self.size.count()
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// The scroll offset last reported by the host or applied by a scroll-to call.
    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Returns the last computed range. This is a snapshot; it is not recomputed on demand.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.range
    }

    pub fn total_height(&self) -> u64 {
        self.size.total_height()
    }

    pub fn max_scroll_top(&self) -> u64 {
        max_scroll_top(&self.size, self.viewport_height)
    }

    pub fn clamp_scroll_top(&self, scroll_top: u64) -> u64 {
        scroll_top.min(self.max_scroll_top())
    }

    pub fn set_on_range_change(
        &mut self,
        on_range_change: Option<impl Fn(Option<VisibleRange>) + Send + Sync + 'static>,
    ) {
        self.on_range_change = on_range_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.on_range_change {
            cb(self.range);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches several updates into a single `on_range_change` notification.
    ///
    /// Typical use: a resize that arrives together with a scroll event.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    fn recompute(&mut self) {
        let next = visible_range(
            &self.size,
            self.scroll_top,
            self.viewport_height,
            self.overscan,
        );
        if next == self.range {
            return;
        }
        vtrace!(
            scroll_top = self.scroll_top,
            viewport_height = self.viewport_height,
            start = next.map(|r| r.start),
            end = next.map(|r| r.end),
            "RowWindow::recompute"
        );
        self.range = next;
        self.notify();
    }

    /// Applies a scroll offset reported by the host.
    pub fn on_scroll(&mut self, scroll_top: u64) {
        self.scroll_direction = match scroll_top.cmp(&self.scroll_top) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.scroll_top = scroll_top;
        self.recompute();
    }

    /// Applies a viewport height reported by the host.
    pub fn on_resize(&mut self, viewport_height: u32) {
        if self.viewport_height == viewport_height {
            return;
        }
        self.viewport_height = viewport_height;
        self.recompute();
    }

    /// Applies a new row count. The offset cache is rebuilt from scratch.
    pub fn on_count_changed(&mut self, count: usize) {
        self.size.set_count(count);
        self.recompute();
    }

    /// Replaces the height source. The offset cache and all measurements are discarded.
    pub fn set_row_height(&mut self, row_height: RowHeight) {
        self.size.set_row_height(row_height);
        self.recompute();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
        self.recompute();
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
        }
    }

    /// Drops every measured height and recomputes against the height source.
    pub fn clear_measurements(&mut self) {
        self.size.clear_measurements();
        self.recompute();
    }

    /// Feeds back the measured height of a mounted row.
    ///
    /// When the row starts above the current scroll offset, the scroll offset is shifted by the
    /// height change so the content under the viewport does not jump. Returns that shift (zero
    /// when no adjustment was made); a non-zero value must be applied to the host container.
    pub fn measure(&mut self, index: usize, height: u32) -> i64 {
        if index >= self.size.count() {
            return 0;
        }
        let top = self.size.offset_of(index);
        let delta = self.size.measure(index, height);
        let applied = if delta != 0 && top < self.scroll_top {
            self.scroll_top = if delta > 0 {
                self.scroll_top.saturating_add(delta as u64)
            } else {
                self.scroll_top.saturating_sub(delta.unsigned_abs())
            };
            delta
        } else {
            0
        };
        self.recompute();
        applied
    }

    /// Applies several measurements with a single notification. Returns the total scroll shift.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> i64 {
        let mut applied = 0i64;
        self.batch_update(|w| {
            for (index, height) in measurements {
                applied += w.measure(index, height);
            }
        });
        applied
    }

    /// Computes the scroll offset that brings row `index` into view with the given alignment.
    ///
    /// The index is clamped to `[0, count - 1]` and the offset to `[0, max_scroll_top]`.
    /// Returns `None` for an empty dataset.
    pub fn scroll_to_offset(&self, index: usize, align: Align) -> Option<u64> {
        let count = self.size.count();
        if count == 0 {
            return None;
        }
        let index = index.min(count - 1);
        let start = self.size.offset_of(index);
        let height = self.size.height_of(index) as u64;
        let end = start.saturating_add(height);
        let view = self.viewport_height as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => start.saturating_add(height / 2).saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.clamp_scroll_top(self.scroll_top);
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };
        Some(self.clamp_scroll_top(target))
    }

    /// Scrolls so that row `index` is at the top of the viewport (or as close as the content
    /// allows). Returns the applied offset, or `None` (no-op) for an empty dataset.
    pub fn scroll_to(&mut self, index: usize) -> Option<u64> {
        self.scroll_to_aligned(index, Align::Start)
    }

    pub fn scroll_to_aligned(&mut self, index: usize, align: Align) -> Option<u64> {
        let offset = self.scroll_to_offset(index, align)?;
        vtrace!(index, offset, "RowWindow::scroll_to");
        self.on_scroll(offset);
        Some(offset)
    }

    pub fn scroll_to_top(&mut self) -> Option<u64> {
        self.scroll_to(0)
    }

    pub fn scroll_to_bottom(&mut self) -> Option<u64> {
        let last = self.size.count().checked_sub(1)?;
        self.scroll_to(last)
    }

    /// Returns a snapshot of the scroll position and viewport height.
    pub fn state(&self) -> WindowState {
        WindowState {
            scroll_top: self.scroll_top,
            viewport_height: self.viewport_height,
        }
    }

    /// Restores a previously captured snapshot. The scroll offset is clamped against the
    /// current content.
    pub fn restore(&mut self, state: WindowState) {
        self.batch_update(|w| {
            w.on_resize(state.viewport_height);
            let clamped = w.clamp_scroll_top(state.scroll_top);
            w.on_scroll(clamped);
        });
    }
}

impl fmt::Debug for RowWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowWindow")
            .field("size", &self.size)
            .field("scroll_top", &self.scroll_top)
            .field("viewport_height", &self.viewport_height)
            .field("overscan", &self.overscan)
            .field("scroll_direction", &self.scroll_direction)
            .field("is_scrolling", &self.is_scrolling)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}
