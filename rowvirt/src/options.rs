use alloc::sync::Arc;

use crate::{DEFAULT_OVERSCAN, RowHeight, VisibleRange};

/// A callback fired when the computed visible range changes.
///
/// `None` means the dataset is empty.
pub type OnRangeChange = Arc<dyn Fn(Option<VisibleRange>) + Send + Sync>;

/// Configuration for [`crate::RowWindow`].
///
/// This type is cheap to clone: closures are stored in `Arc`s.
#[derive(Clone)]
pub struct WindowOptions {
    pub count: usize,
    pub row_height: RowHeight,
    /// Rows mounted beyond each edge of the viewport.
    pub overscan: usize,
    /// The initial viewport height in pixels.
    pub viewport_height: u32,
    /// The initial scroll offset in pixels.
    pub initial_scroll_top: u64,
    /// Optional callback fired when the visible range changes.
    pub on_range_change: Option<OnRangeChange>,
}

impl WindowOptions {
    /// Creates options for `count` rows that are all `row_height` pixels tall.
    pub fn fixed(count: usize, row_height: u32) -> Self {
        Self::new(count, RowHeight::Fixed(row_height))
    }

    /// Creates options where `height_of(i)` returns the height of row `i`.
    pub fn variable(count: usize, height_of: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self::new(count, RowHeight::variable(height_of))
    }

    pub fn new(count: usize, row_height: RowHeight) -> Self {
        Self {
            count,
            row_height,
            overscan: DEFAULT_OVERSCAN,
            viewport_height: 0,
            initial_scroll_top: 0,
            on_range_change: None,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_viewport_height(mut self, viewport_height: u32) -> Self {
        self.viewport_height = viewport_height;
        self
    }

    pub fn with_initial_scroll_top(mut self, scroll_top: u64) -> Self {
        self.initial_scroll_top = scroll_top;
        self
    }

    pub fn with_on_range_change(
        mut self,
        on_range_change: Option<impl Fn(Option<VisibleRange>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_range_change = on_range_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for WindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("count", &self.count)
            .field("row_height", &self.row_height)
            .field("overscan", &self.overscan)
            .field("viewport_height", &self.viewport_height)
            .field("initial_scroll_top", &self.initial_scroll_top)
            .finish_non_exhaustive()
    }
}
