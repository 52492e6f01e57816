use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use rowvirt::{DEFAULT_OVERSCAN, RowHeight};

use crate::{Column, RenderError, SelectionMode, SelectionSet, SortDirection, SortState};

/// Derives a stable identifier from an item and its index.
pub type GetItemId<T, ID> = Arc<dyn Fn(&T, usize) -> ID + Send + Sync>;
/// Row click and double-click: `(item, index)`.
pub type OnRowEvent<T> = Arc<dyn Fn(&T, usize) + Send + Sync>;
/// Sort request: `(column key, direction)`.
pub type OnSort = Arc<dyn Fn(&str, SortDirection) + Send + Sync>;
/// Filter change: `(column key, value)`.
pub type OnFilter = Arc<dyn Fn(&str, &str) + Send + Sync>;
pub type OnSelectionChange<ID> = Arc<dyn Fn(&SelectionSet<ID>) + Send + Sync>;
/// Mounted rows changed: `(start, end)`, inclusive.
pub type OnItemsRendered = Arc<dyn Fn(usize, usize) + Send + Sync>;
/// The host must move its scroll container to this offset.
pub type OnScrollRequest = Arc<dyn Fn(u64) + Send + Sync>;
pub type OnRenderError = Arc<dyn Fn(&RenderError) + Send + Sync>;

/// Events a [`crate::VirtualList`] reports to its host. Every callback is optional.
pub struct ListCallbacks<T, ID> {
    pub on_row_click: Option<OnRowEvent<T>>,
    pub on_row_double_click: Option<OnRowEvent<T>>,
    pub on_sort: Option<OnSort>,
    pub on_filter: Option<OnFilter>,
    pub on_selection_change: Option<OnSelectionChange<ID>>,
    pub on_items_rendered: Option<OnItemsRendered>,
    pub on_scroll_request: Option<OnScrollRequest>,
    pub on_render_error: Option<OnRenderError>,
}

impl<T, ID> ListCallbacks<T, ID> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_row_click(mut self, f: impl Fn(&T, usize) + Send + Sync + 'static) -> Self {
        self.on_row_click = Some(Arc::new(f));
        self
    }

    pub fn with_on_row_double_click(
        mut self,
        f: impl Fn(&T, usize) + Send + Sync + 'static,
    ) -> Self {
        self.on_row_double_click = Some(Arc::new(f));
        self
    }

    pub fn with_on_sort(mut self, f: impl Fn(&str, SortDirection) + Send + Sync + 'static) -> Self {
        self.on_sort = Some(Arc::new(f));
        self
    }

    pub fn with_on_filter(mut self, f: impl Fn(&str, &str) + Send + Sync + 'static) -> Self {
        self.on_filter = Some(Arc::new(f));
        self
    }

    pub fn with_on_selection_change(
        mut self,
        f: impl Fn(&SelectionSet<ID>) + Send + Sync + 'static,
    ) -> Self {
        self.on_selection_change = Some(Arc::new(f));
        self
    }

    pub fn with_on_items_rendered(mut self, f: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_items_rendered = Some(Arc::new(f));
        self
    }

    pub fn with_on_scroll_request(mut self, f: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.on_scroll_request = Some(Arc::new(f));
        self
    }

    pub fn with_on_render_error(mut self, f: impl Fn(&RenderError) + Send + Sync + 'static) -> Self {
        self.on_render_error = Some(Arc::new(f));
        self
    }
}

impl<T, ID> Default for ListCallbacks<T, ID> {
    fn default() -> Self {
        Self {
            on_row_click: None,
            on_row_double_click: None,
            on_sort: None,
            on_filter: None,
            on_selection_change: None,
            on_items_rendered: None,
            on_scroll_request: None,
            on_render_error: None,
        }
    }
}

impl<T, ID> Clone for ListCallbacks<T, ID> {
    fn clone(&self) -> Self {
        Self {
            on_row_click: self.on_row_click.clone(),
            on_row_double_click: self.on_row_double_click.clone(),
            on_sort: self.on_sort.clone(),
            on_filter: self.on_filter.clone(),
            on_selection_change: self.on_selection_change.clone(),
            on_items_rendered: self.on_items_rendered.clone(),
            on_scroll_request: self.on_scroll_request.clone(),
            on_render_error: self.on_render_error.clone(),
        }
    }
}

impl<T, ID> fmt::Debug for ListCallbacks<T, ID> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCallbacks")
            .field("on_row_click", &self.on_row_click.is_some())
            .field("on_row_double_click", &self.on_row_double_click.is_some())
            .field("on_sort", &self.on_sort.is_some())
            .field("on_filter", &self.on_filter.is_some())
            .field("on_selection_change", &self.on_selection_change.is_some())
            .field("on_items_rendered", &self.on_items_rendered.is_some())
            .field("on_scroll_request", &self.on_scroll_request.is_some())
            .field("on_render_error", &self.on_render_error.is_some())
            .finish()
    }
}

/// Configuration for [`crate::VirtualList`].
pub struct VirtualListOptions<T, ID> {
    pub row_height: RowHeight,
    pub viewport_height: u32,
    pub overscan: usize,
    pub initial_scroll_top: u64,
    pub get_item_id: GetItemId<T, ID>,
    pub columns: Vec<Column<T>>,
    pub selection_mode: SelectionMode,
    /// Width of the checkbox column. `None` hides it.
    pub selection_column_width: Option<u32>,
    /// Shown in place of rows when there are no items.
    pub empty_state: Option<String>,
    pub sort: SortState,
    pub callbacks: ListCallbacks<T, ID>,
}

impl<T, ID> VirtualListOptions<T, ID> {
    pub fn new(
        row_height: RowHeight,
        get_item_id: impl Fn(&T, usize) -> ID + Send + Sync + 'static,
    ) -> Self {
        Self {
            row_height,
            viewport_height: 0,
            overscan: DEFAULT_OVERSCAN,
            initial_scroll_top: 0,
            get_item_id: Arc::new(get_item_id),
            columns: Vec::new(),
            selection_mode: SelectionMode::default(),
            selection_column_width: None,
            empty_state: None,
            sort: SortState::default(),
            callbacks: ListCallbacks::default(),
        }
    }

    /// Options for rows that are all `row_height` pixels tall.
    pub fn fixed(
        row_height: u32,
        get_item_id: impl Fn(&T, usize) -> ID + Send + Sync + 'static,
    ) -> Self {
        Self::new(RowHeight::Fixed(row_height), get_item_id)
    }

    pub fn with_viewport_height(mut self, viewport_height: u32) -> Self {
        self.viewport_height = viewport_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_scroll_top(mut self, scroll_top: u64) -> Self {
        self.initial_scroll_top = scroll_top;
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column<T>>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_selection_column(mut self, width: u32) -> Self {
        self.selection_column_width = Some(width);
        self
    }

    pub fn with_empty_state(mut self, empty_state: impl Into<String>) -> Self {
        self.empty_state = Some(empty_state.into());
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_callbacks(mut self, callbacks: ListCallbacks<T, ID>) -> Self {
        self.callbacks = callbacks;
        self
    }
}

impl<T, ID> Clone for VirtualListOptions<T, ID> {
    fn clone(&self) -> Self {
        Self {
            row_height: self.row_height.clone(),
            viewport_height: self.viewport_height,
            overscan: self.overscan,
            initial_scroll_top: self.initial_scroll_top,
            get_item_id: Arc::clone(&self.get_item_id),
            columns: self.columns.clone(),
            selection_mode: self.selection_mode,
            selection_column_width: self.selection_column_width,
            empty_state: self.empty_state.clone(),
            sort: self.sort.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<T, ID> fmt::Debug for VirtualListOptions<T, ID> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("row_height", &self.row_height)
            .field("viewport_height", &self.viewport_height)
            .field("overscan", &self.overscan)
            .field("initial_scroll_top", &self.initial_scroll_top)
            .field("columns", &self.columns)
            .field("selection_mode", &self.selection_mode)
            .field("selection_column_width", &self.selection_column_width)
            .field("empty_state", &self.empty_state)
            .field("sort", &self.sort)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
