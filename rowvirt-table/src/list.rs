use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use rowvirt::{Align, RowHeight, RowWindow, VisibleRange, WindowOptions, WindowState, geometric_range};

use crate::{
    ColumnKey, ColumnLayout, ColumnSet, ConfigError, Frame, GetItemId, HeaderCell, ListCallbacks,
    RenderError, RenderedRow, RowCompositor, RowId, ScrollAnchor, SelectionController,
    SelectionMode, SelectionSet, SortCoordinator, SortDirection, SortState, VirtualListOptions,
};

/// A virtualized table over an items snapshot.
///
/// `VirtualList` ties a [`RowWindow`] to the items it measures, the column layout, the selection
/// and the sort state. The host forwards its events (`on_scroll`, `on_resize`, clicks, header
/// clicks, new items) and paints whatever [`VirtualList::frame`] returns. Every event is
/// processed synchronously, so a frame is always composed against the current items.
///
/// Items are never reordered or filtered here: sort and filter requests are forwarded to the
/// host through [`ListCallbacks`], and the host answers with [`VirtualList::set_items`].
pub struct VirtualList<T, ID> {
    items: Vec<T>,
    window: RowWindow,
    columns: ColumnSet<T>,
    layout: ColumnLayout,
    selection: SelectionController<ID>,
    sort: SortCoordinator,
    get_item_id: GetItemId<T, ID>,
    empty_state: Option<String>,
    callbacks: ListCallbacks<T, ID>,
}

impl<T, ID: RowId> VirtualList<T, ID> {
    /// Builds a list over `items`. Fails only when the column definitions are invalid.
    pub fn new(items: Vec<T>, options: VirtualListOptions<T, ID>) -> Result<Self, ConfigError> {
        let VirtualListOptions {
            row_height,
            viewport_height,
            overscan,
            initial_scroll_top,
            get_item_id,
            columns,
            selection_mode,
            selection_column_width,
            empty_state,
            sort,
            callbacks,
        } = options;

        let columns = ColumnSet::new(columns)?;
        let layout = columns.layout(selection_column_width);

        let on_range_change = callbacks.on_items_rendered.clone().map(|cb| {
            move |range: Option<VisibleRange>| {
                if let Some(range) = range {
                    cb(range.start, range.end);
                }
            }
        });
        let window = RowWindow::new(
            WindowOptions::new(items.len(), row_height)
                .with_viewport_height(viewport_height)
                .with_overscan(overscan)
                .with_initial_scroll_top(initial_scroll_top)
                .with_on_range_change(on_range_change),
        );
        vdebug!(
            items = items.len(),
            columns = columns.len(),
            content_width = layout.content_width,
            "VirtualList::new"
        );

        let list = Self {
            items,
            window,
            columns,
            layout,
            selection: SelectionController::new(selection_mode),
            sort: SortCoordinator::with_state(sort),
            get_item_id,
            empty_state,
            callbacks,
        };
        // The window only reports changes; announce the initial mount here.
        if let (Some(cb), Some(range)) = (&list.callbacks.on_items_rendered, list.window.visible_range()) {
            cb(range.start, range.end);
        }
        Ok(list)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn window(&self) -> &RowWindow {
        &self.window
    }

    pub fn columns(&self) -> &ColumnSet<T> {
        &self.columns
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn selection(&self) -> &SelectionController<ID> {
        &self.selection
    }

    pub fn selected(&self) -> &SelectionSet<ID> {
        self.selection.selected()
    }

    pub fn sort_state(&self) -> &SortState {
        self.sort.state()
    }

    pub fn item_id(&self, index: usize) -> Option<ID> {
        self.items.get(index).map(|item| (self.get_item_id)(item, index))
    }

    fn item_ids(&self) -> Vec<ID> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (self.get_item_id)(item, i))
            .collect()
    }

    // Scroll and viewport events.

    pub fn on_scroll(&mut self, scroll_top: u64) {
        self.window.on_scroll(scroll_top);
    }

    pub fn on_resize(&mut self, viewport_height: u32) {
        self.window.on_resize(viewport_height);
    }

    /// Applies a scroll offset and viewport height that arrived together, with a single
    /// items-rendered notification.
    pub fn on_viewport_change(&mut self, scroll_top: u64, viewport_height: u32) {
        self.window.batch_update(|w| {
            w.on_resize(viewport_height);
            w.on_scroll(scroll_top);
        });
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        self.window.set_is_scrolling(is_scrolling);
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.window.set_overscan(overscan);
    }

    /// Replaces the height source; measured heights are discarded.
    pub fn set_row_height(&mut self, row_height: RowHeight) {
        self.window.set_row_height(row_height);
    }

    // Dataset events.

    /// Replaces the items snapshot.
    ///
    /// The row count is re-derived and measured heights are dropped before the range is
    /// recomputed. The scroll offset is kept and re-clamped. The selection is left as it is;
    /// see [`VirtualList::reconcile_selection`].
    pub fn set_items(&mut self, items: Vec<T>) {
        self.replace_items(items, None);
    }

    /// Replaces the items snapshot, keeping the row that was at the top of the viewport at the
    /// same position if it is still present. Returns the new scroll offset when the row was
    /// found; it is also sent through `on_scroll_request` when it differs from the old one.
    pub fn set_items_anchored(&mut self, items: Vec<T>) -> Option<u64> {
        let anchor = ScrollAnchor::capture(&self.window, &self.items, &*self.get_item_id);
        self.replace_items(items, anchor)
    }

    fn replace_items(&mut self, items: Vec<T>, anchor: Option<ScrollAnchor<ID>>) -> Option<u64> {
        vdebug!(old = self.items.len(), new = items.len(), "set_items");
        let previous = self.window.scroll_top();
        self.items = items;

        let count = self.items.len();
        let items = &self.items;
        let get_item_id = &*self.get_item_id;
        let mut restored = None;
        self.window.batch_update(|w| {
            w.clear_measurements();
            w.on_count_changed(count);
            if let Some(offset) = anchor.as_ref().and_then(|a| a.resolve(w, items, get_item_id)) {
                w.on_scroll(offset);
                restored = Some(offset);
            }
        });

        if let Some(offset) = restored.filter(|&offset| offset != previous) {
            self.emit_scroll_request(offset);
        }
        restored
    }

    /// Feeds back the measured height of a mounted row. Returns the scroll shift applied to
    /// keep the content under the viewport still; a non-zero shift is also sent through
    /// `on_scroll_request`.
    pub fn measure_row(&mut self, index: usize, height: u32) -> i64 {
        if index >= self.items.len() {
            vwarn!(index, len = self.items.len(), "measure_row: index out of range");
            return 0;
        }
        let delta = self.window.measure(index, height);
        if delta != 0 {
            self.emit_scroll_request(self.window.scroll_top());
        }
        delta
    }

    /// Applies several measurements with a single items-rendered notification.
    pub fn measure_rows(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> i64 {
        let delta = self.window.measure_many(measurements);
        if delta != 0 {
            self.emit_scroll_request(self.window.scroll_top());
        }
        delta
    }

    // Row interaction.

    /// Reports a click on row `index`. Returns `false` when no such row exists.
    pub fn click_row(&self, index: usize) -> bool {
        let Some(item) = self.items.get(index) else {
            vwarn!(index, "click_row: index out of range");
            return false;
        };
        if let Some(cb) = &self.callbacks.on_row_click {
            cb(item, index);
        }
        true
    }

    pub fn double_click_row(&self, index: usize) -> bool {
        let Some(item) = self.items.get(index) else {
            vwarn!(index, "double_click_row: index out of range");
            return false;
        };
        if let Some(cb) = &self.callbacks.on_row_double_click {
            cb(item, index);
        }
        true
    }

    // Header interaction.

    /// Handles a click on the header of column `key`; see [`SortCoordinator::request_sort`].
    /// A resulting request is forwarded through `on_sort`.
    pub fn request_sort(&mut self, key: &str) -> Option<(ColumnKey, SortDirection)> {
        let (field, direction) = self.sort.request_sort(&self.columns, key)?;
        if let Some(cb) = &self.callbacks.on_sort {
            cb(&field, direction);
        }
        Some((field, direction))
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
    }

    /// Forwards a filter value for column `key` through `on_filter`. Requests for unknown or
    /// non-filterable columns are dropped and `false` is returned.
    pub fn request_filter(&self, key: &str, value: &str) -> bool {
        let Some(column) = self.columns.get(key) else {
            vwarn!(key, "request_filter: unknown column");
            return false;
        };
        if !column.filterable {
            vwarn!(key, "request_filter: column is not filterable");
            return false;
        }
        vdebug!(key, value, "request_filter");
        if let Some(cb) = &self.callbacks.on_filter {
            cb(&column.key, value);
        }
        true
    }

    // Selection.

    fn emit_selection_change(&self) {
        vtrace!(selected = self.selection.len(), "selection changed");
        if let Some(cb) = &self.callbacks.on_selection_change {
            cb(self.selection.selected());
        }
    }

    fn selection_changed(&self, changed: bool) -> bool {
        if changed {
            self.emit_selection_change();
        }
        changed
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) -> bool {
        let changed = self.selection.set_mode(mode);
        self.selection_changed(changed)
    }

    /// Selects or deselects the row with `id`, whether or not it is mounted.
    pub fn select_row(&mut self, id: ID, selected: bool) -> bool {
        let changed = self.selection.select_row(id, selected);
        self.selection_changed(changed)
    }

    /// Flips the selection of the row at `index`, as a checkbox click does.
    pub fn toggle_row(&mut self, index: usize) -> bool {
        let Some(id) = self.item_id(index) else {
            vwarn!(index, "toggle_row: index out of range");
            return false;
        };
        let changed = self.selection.toggle(id);
        self.selection_changed(changed)
    }

    /// With `true`, selects every loaded item (not just the mounted ones). With `false`,
    /// clears the selection.
    pub fn select_all(&mut self, selected: bool) -> bool {
        let get_item_id = &self.get_item_id;
        let ids = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| get_item_id(item, i));
        let changed = self.selection.select_all(ids, selected);
        self.selection_changed(changed)
    }

    /// Selects the rows between the last selected row and `target`, in current item order.
    pub fn select_range(&mut self, target: &ID) -> bool {
        let ordered = self.item_ids();
        let changed = self.selection.select_range(&ordered, target);
        self.selection_changed(changed)
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        self.selection_changed(changed)
    }

    /// Drops selected ids that no longer belong to any loaded item. Returns how many were
    /// removed.
    pub fn reconcile_selection(&mut self) -> usize {
        let live: SelectionSet<ID> = self.item_ids().into_iter().collect();
        let removed = self.selection.retain(|id| live.contains(id));
        if removed > 0 {
            vdebug!(removed, "reconcile_selection");
            self.emit_selection_change();
        }
        removed
    }

    // Imperative scrolling.

    fn emit_scroll_request(&self, offset: u64) {
        if let Some(cb) = &self.callbacks.on_scroll_request {
            cb(offset);
        }
    }

    /// Scrolls row `index` to the top of the viewport. Out-of-range indices are clamped; an
    /// empty list is a no-op. Returns the offset, which is also sent through
    /// `on_scroll_request`.
    pub fn scroll_to(&mut self, index: usize) -> Option<u64> {
        self.scroll_to_aligned(index, Align::Start)
    }

    pub fn scroll_to_aligned(&mut self, index: usize, align: Align) -> Option<u64> {
        if index >= self.items.len() && !self.items.is_empty() {
            vwarn!(index, len = self.items.len(), "scroll_to: index clamped");
        }
        let offset = self.window.scroll_to_aligned(index, align)?;
        self.emit_scroll_request(offset);
        Some(offset)
    }

    pub fn scroll_to_top(&mut self) -> Option<u64> {
        self.scroll_to(0)
    }

    pub fn scroll_to_bottom(&mut self) -> Option<u64> {
        let last = self.items.len().checked_sub(1)?;
        self.scroll_to(last)
    }

    /// The last computed mounted range as inclusive `(start, end)`; `None` when empty.
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        self.window.visible_range().map(|r| r.bounds())
    }

    /// Whether row `index` intersects the viewport (overscan excluded).
    pub fn is_row_visible(&self, index: usize) -> bool {
        geometric_range(
            self.window.size(),
            self.window.scroll_top(),
            self.window.viewport_height(),
        )
        .is_some_and(|r| r.contains(index))
    }

    pub fn total_height(&self) -> u64 {
        self.window.total_height()
    }

    pub fn state(&self) -> WindowState {
        self.window.state()
    }

    pub fn restore(&mut self, state: WindowState) {
        self.window.restore(state);
    }

    // Composition.

    pub fn compositor(&self) -> RowCompositor<'_, T, ID> {
        RowCompositor {
            items: &self.items,
            size: self.window.size(),
            columns: &self.columns,
            layout: &self.layout,
            selection: self.selection.selected(),
            get_item_id: &*self.get_item_id,
        }
    }

    fn report_render_error(&self, error: &RenderError) {
        if let Some(cb) = &self.callbacks.on_render_error {
            cb(error);
        }
    }

    pub fn header(&self) -> Vec<HeaderCell> {
        self.compositor().header(self.sort.state())
    }

    /// Composes the mounted rows one at a time. Renderer failures go to `on_render_error`.
    pub fn for_each_row(&self, f: impl FnMut(RenderedRow<ID>)) {
        self.compositor().for_each_row(self.window.visible_range(), f, |err| {
            self.report_render_error(&err)
        });
    }

    /// Composes the current frame. Renderer failures are reported to `on_render_error` and
    /// also collected in [`Frame::errors`].
    pub fn frame(&self) -> Frame<ID> {
        let frame = self
            .compositor()
            .frame(self.window.visible_range(), self.empty_state.as_deref());
        for error in &frame.errors {
            self.report_render_error(error);
        }
        frame
    }
}

impl<T, ID: fmt::Debug> fmt::Debug for VirtualList<T, ID> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualList")
            .field("items", &self.items.len())
            .field("window", &self.window)
            .field("columns", &self.columns)
            .field("layout", &self.layout)
            .field("selection", &self.selection)
            .field("sort", &self.sort)
            .field("empty_state", &self.empty_state)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
