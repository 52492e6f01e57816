use crate::{SizeModel, VisibleRange};

/// Default number of extra rows mounted on each side of the viewport.
pub const DEFAULT_OVERSCAN: usize = 5;

/// The largest scroll offset at which the viewport is still filled by content.
pub fn max_scroll_top(size: &SizeModel, viewport_height: u32) -> u64 {
    size.total_height().saturating_sub(viewport_height as u64)
}

/// Returns the rows that geometrically intersect the viewport, without overscan.
///
/// A row intersects the viewport when it overlaps `[scroll_top, scroll_top + viewport_height)`
/// by at least one pixel. Offsets past the end of the content are clamped first, so a dataset
/// that shrank underneath the current scroll position never yields out-of-bounds rows.
pub fn geometric_range(
    size: &SizeModel,
    scroll_top: u64,
    viewport_height: u32,
) -> Option<VisibleRange> {
    if size.count() == 0 {
        return None;
    }
    let top = scroll_top.min(max_scroll_top(size, viewport_height));
    let bottom = top.saturating_add((viewport_height as u64).saturating_sub(1));

    let first = size.index_at_offset(top)?;
    let last = size.index_at_offset(bottom)?;
    Some(VisibleRange::new(first, last.max(first)))
}

/// Computes the range of rows to mount for a scroll position: the geometrically visible rows
/// plus `overscan` rows on each side, clamped to the dataset bounds.
///
/// Returns `None` iff the model has no rows.
pub fn visible_range(
    size: &SizeModel,
    scroll_top: u64,
    viewport_height: u32,
    overscan: usize,
) -> Option<VisibleRange> {
    let visible = geometric_range(size, scroll_top, viewport_height)?;
    let last = size.count() - 1;
    Some(VisibleRange::new(
        visible.start.saturating_sub(overscan),
        visible.end.saturating_add(overscan).min(last),
    ))
}
