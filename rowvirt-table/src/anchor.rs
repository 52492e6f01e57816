use rowvirt::{RowWindow, geometric_range};

use crate::RowId;

/// Remembers which row sits at the top of the viewport, so the same row can be kept in place
/// when the items are replaced (e.g. after a sort or a refresh).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollAnchor<ID> {
    pub id: ID,
    /// Index of the row when it was captured.
    pub index: usize,
    /// How far the viewport top is past the row's top edge.
    pub offset_in_row: u64,
}

impl<ID: RowId> ScrollAnchor<ID> {
    /// Captures the first geometrically visible row. Returns `None` for an empty window or
    /// when `items` does not cover that row.
    pub fn capture<T>(
        window: &RowWindow,
        items: &[T],
        get_item_id: &(dyn Fn(&T, usize) -> ID + Send + Sync),
    ) -> Option<Self> {
        let scroll_top = window.clamp_scroll_top(window.scroll_top());
        let visible = geometric_range(window.size(), scroll_top, window.viewport_height())?;
        let index = visible.start;
        let item = items.get(index)?;
        Some(Self {
            id: get_item_id(item, index),
            index,
            offset_in_row: scroll_top.saturating_sub(window.size().offset_of(index)),
        })
    }

    /// Finds the anchored row in `items` and returns the scroll offset that puts it back at
    /// the same viewport position, clamped to the window's content. `None` if the row is gone.
    pub fn resolve<T>(
        &self,
        window: &RowWindow,
        items: &[T],
        get_item_id: &(dyn Fn(&T, usize) -> ID + Send + Sync),
    ) -> Option<u64> {
        // Check the old position first; a refresh that keeps the order resolves in O(1).
        let found = items
            .get(self.index)
            .filter(|item| get_item_id(item, self.index) == self.id)
            .map(|_| self.index)
            .or_else(|| {
                items
                    .iter()
                    .enumerate()
                    .position(|(i, item)| get_item_id(item, i) == self.id)
            })?;

        let height = window.size().height_of(found) as u64;
        let offset = window.size().offset_of(found) + self.offset_in_row.min(height.saturating_sub(1));
        Some(window.clamp_scroll_top(offset))
    }
}
