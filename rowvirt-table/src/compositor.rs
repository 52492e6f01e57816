use alloc::string::{String, ToString};
use alloc::vec::Vec;

use rowvirt::{SizeModel, VisibleRange};

use crate::{
    CellAlign, ColumnLayout, ColumnSet, RenderError, RowId, SelectionSet, SlotKind, SortDirection,
    SortState, Sticky,
};

/// What a rendered cell displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// The selection checkbox, with its checked state.
    Checkbox(bool),
    /// A data cell of the column at this index in the [`ColumnSet`].
    Column(usize),
}

/// One positioned cell. Coordinates come from the row's [`ColumnLayout`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCell {
    pub kind: CellKind,
    pub x: u32,
    pub width: u32,
    pub sticky: Option<Sticky>,
    pub pin: Option<u32>,
    pub align: CellAlign,
    /// Rendered text. Empty for checkbox cells.
    pub content: String,
}

/// One mounted row, absolutely positioned at `top` within the full content height.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedRow<ID> {
    pub index: usize,
    pub id: ID,
    pub top: u64,
    pub height: u32,
    pub selected: bool,
    pub cells: Vec<RenderedCell>,
}

/// One header cell. The selection slot's checkbox is checked when every item is selected.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderCell {
    pub kind: CellKind,
    pub x: u32,
    pub width: u32,
    pub sticky: Option<Sticky>,
    pub pin: Option<u32>,
    pub align: CellAlign,
    pub title: String,
    pub sortable: bool,
    /// Sort indicator, set on the active sort column only.
    pub sort: Option<SortDirection>,
}

/// Everything a host needs to paint the list for the current scroll position.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<ID> {
    pub range: Option<VisibleRange>,
    /// Height of the scrollable content, for scrollbar proportions.
    pub total_height: u64,
    pub content_width: u32,
    pub rows: Vec<RenderedRow<ID>>,
    /// The caller-supplied placeholder, set iff the dataset is empty.
    pub empty_state: Option<String>,
    /// Renderer failures encountered while composing this frame.
    pub errors: Vec<RenderError>,
}

impl<ID> Frame<ID> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Turns a visible range into positioned rows.
///
/// The compositor borrows everything it reads and never mutates selection or layout; it is
/// rebuilt cheaply for every frame.
pub struct RowCompositor<'a, T, ID> {
    pub items: &'a [T],
    pub size: &'a SizeModel,
    pub columns: &'a ColumnSet<T>,
    pub layout: &'a ColumnLayout,
    pub selection: &'a SelectionSet<ID>,
    pub get_item_id: &'a (dyn Fn(&T, usize) -> ID + Send + Sync),
}

impl<T, ID: RowId> RowCompositor<'_, T, ID> {
    /// Composes row `index`. Returns `None` when the index has no item.
    ///
    /// A failing cell renderer does not abort the row: the cell shows the raw value and the
    /// failure is passed to `on_error`.
    pub fn compose_row(
        &self,
        index: usize,
        on_error: &mut dyn FnMut(RenderError),
    ) -> Option<RenderedRow<ID>> {
        let item = self.items.get(index)?;
        let id = (self.get_item_id)(item, index);
        let selected = self.selection.contains(&id);

        let mut cells = Vec::with_capacity(self.layout.slots.len());
        for slot in &self.layout.slots {
            let (kind, content) = match slot.kind {
                SlotKind::Selection => (CellKind::Checkbox(selected), String::new()),
                SlotKind::Column(ci) => {
                    let Some(column) = self.columns.by_index(ci) else {
                        continue;
                    };
                    let value = column.value(item);
                    let content = match column.renderer() {
                        Some(render) => match render(&value, item, index) {
                            Ok(content) => content,
                            Err(source) => {
                                vwarn!(column = %column.key, index, error = %source, "cell renderer failed");
                                on_error(RenderError {
                                    column: column.key.clone(),
                                    index,
                                    source,
                                });
                                value.to_string()
                            }
                        },
                        None => value.to_string(),
                    };
                    (CellKind::Column(ci), content)
                }
            };
            cells.push(RenderedCell {
                kind,
                x: slot.x,
                width: slot.width,
                sticky: slot.sticky,
                pin: slot.pin,
                align: slot.align,
                content,
            });
        }

        Some(RenderedRow {
            index,
            id,
            top: self.size.offset_of(index),
            height: self.size.height_of(index),
            selected,
            cells,
        })
    }

    /// Composes every row of `range` in index order, without collecting them.
    pub fn for_each_row(
        &self,
        range: Option<VisibleRange>,
        mut f: impl FnMut(RenderedRow<ID>),
        mut on_error: impl FnMut(RenderError),
    ) {
        let Some(range) = range else {
            return;
        };
        for index in range.indices() {
            match self.compose_row(index, &mut on_error) {
                Some(row) => f(row),
                None => {
                    // The size model and the items snapshot disagree; never read past the end.
                    vwarn!(index, items = self.items.len(), "row index past end of items");
                    break;
                }
            }
        }
    }

    /// Composes the header row, laid out with the same slots as the body rows.
    ///
    /// The select-all checkbox state costs one id lookup per item.
    pub fn header(&self, sort: &SortState) -> Vec<HeaderCell> {
        let all_selected = !self.items.is_empty()
            && self
                .items
                .iter()
                .enumerate()
                .all(|(i, item)| self.selection.contains(&(self.get_item_id)(item, i)));

        self.layout
            .slots
            .iter()
            .filter_map(|slot| {
                let (kind, title, sortable, direction) = match slot.kind {
                    SlotKind::Selection => (CellKind::Checkbox(all_selected), String::new(), false, None),
                    SlotKind::Column(ci) => {
                        let column = self.columns.by_index(ci)?;
                        let direction = match &sort.field {
                            Some(field) if *field == column.key => Some(sort.direction),
                            _ => None,
                        };
                        (CellKind::Column(ci), column.title.clone(), column.sortable, direction)
                    }
                };
                Some(HeaderCell {
                    kind,
                    x: slot.x,
                    width: slot.width,
                    sticky: slot.sticky,
                    pin: slot.pin,
                    align: slot.align,
                    title,
                    sortable,
                    sort: direction,
                })
            })
            .collect()
    }

    /// Composes a full [`Frame`] for `range`.
    pub fn frame(&self, range: Option<VisibleRange>, empty_state: Option<&str>) -> Frame<ID> {
        let mut rows = Vec::with_capacity(range.map_or(0, |r| r.len()));
        let mut errors = Vec::new();
        self.for_each_row(range, |row| rows.push(row), |err| errors.push(err));

        Frame {
            range,
            total_height: self.size.total_height(),
            content_width: self.layout.content_width,
            rows,
            empty_state: if self.items.is_empty() {
                Some(empty_state.unwrap_or_default().to_string())
            } else {
                None
            },
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellError, CellValue, Column};
    use alloc::vec;
    use rowvirt::RowHeight;

    struct Host {
        name: &'static str,
        up: bool,
    }

    fn columns() -> ColumnSet<Host> {
        ColumnSet::new(vec![
            Column::new("name", "Name", 120, |h: &Host| h.name.into()).sticky(Sticky::Left),
            Column::new("up", "Up", 40, |h: &Host| h.up.into()).render(|v, _, _| match v {
                CellValue::Bool(true) => Ok("yes".to_string()),
                _ => Err(CellError::new("down")),
            }),
        ])
        .unwrap()
    }

    #[test]
    fn composes_positioned_rows_with_fallback_on_render_error() {
        let items = vec![
            Host { name: "a", up: true },
            Host { name: "b", up: false },
            Host { name: "c", up: true },
        ];
        let size = SizeModel::new(items.len(), RowHeight::Fixed(20));
        let cols = columns();
        let layout = cols.layout(Some(24));
        let mut selected = SelectionSet::new();
        selected.insert(1usize);
        let get_id = |_: &Host, i: usize| i;

        let compositor = RowCompositor {
            items: &items,
            size: &size,
            columns: &cols,
            layout: &layout,
            selection: &selected,
            get_item_id: &get_id,
        };
        let frame = compositor.frame(Some(VisibleRange::new(0, 2)), Some("nothing"));

        assert_eq!(frame.rows.len(), 3);
        assert_eq!(frame.total_height, 60);
        assert_eq!(frame.content_width, 24 + 120 + 40);
        assert_eq!(frame.empty_state, None);

        let row = &frame.rows[1];
        assert_eq!((row.index, row.top, row.height), (1, 20, 20));
        assert!(row.selected);
        assert_eq!(row.cells[0].kind, CellKind::Checkbox(true));
        assert_eq!(row.cells[1].content, "b");
        // Renderer failed: raw value shown, error reported.
        assert_eq!(row.cells[2].content, "false");
        assert_eq!(frame.rows[0].cells[2].content, "yes");

        assert_eq!(frame.errors.len(), 1);
        assert_eq!(frame.errors[0].column, "up");
        assert_eq!(frame.errors[0].index, 1);
        assert_eq!(frame.errors[0].source.message(), "down");
    }

    #[test]
    fn header_reflects_sort_and_select_all() {
        let items = vec![Host { name: "a", up: true }, Host { name: "b", up: true }];
        let size = SizeModel::new(items.len(), RowHeight::Fixed(20));
        let cols = columns();
        let layout = cols.layout(Some(24));
        let mut selected = SelectionSet::new();
        selected.insert(0usize);
        let get_id = |_: &Host, i: usize| i;
        let sort = SortState {
            field: Some("up".to_string()),
            direction: SortDirection::Desc,
        };

        let mut compositor = RowCompositor {
            items: &items,
            size: &size,
            columns: &cols,
            layout: &layout,
            selection: &selected,
            get_item_id: &get_id,
        };
        let header = compositor.header(&sort);
        assert_eq!(header.len(), 3);
        assert_eq!(header[0].kind, CellKind::Checkbox(false));
        assert_eq!(header[1].title, "Name");
        assert_eq!(header[1].sort, None);
        assert_eq!(header[2].sort, Some(SortDirection::Desc));

        let mut all = SelectionSet::new();
        all.insert(0usize);
        all.insert(1usize);
        compositor.selection = &all;
        assert_eq!(compositor.header(&sort)[0].kind, CellKind::Checkbox(true));
    }

    #[test]
    fn range_past_items_stops_without_panicking() {
        let items = vec![Host { name: "a", up: true }];
        let size = SizeModel::new(5, RowHeight::Fixed(10));
        let cols = columns();
        let layout = cols.layout(None);
        let selected = SelectionSet::new();
        let get_id = |_: &Host, i: usize| i;
        let compositor = RowCompositor {
            items: &items,
            size: &size,
            columns: &cols,
            layout: &layout,
            selection: &selected,
            get_item_id: &get_id,
        };
        let frame = compositor.frame(Some(VisibleRange::new(0, 4)), None);
        assert_eq!(frame.rows.len(), 1);
    }

    #[test]
    fn empty_items_yield_empty_state() {
        let items: Vec<Host> = Vec::new();
        let size = SizeModel::new(0, RowHeight::Fixed(10));
        let cols = columns();
        let layout = cols.layout(None);
        let selected = SelectionSet::<usize>::new();
        let get_id = |_: &Host, i: usize| i;
        let compositor = RowCompositor {
            items: &items,
            size: &size,
            columns: &cols,
            layout: &layout,
            selection: &selected,
            get_item_id: &get_id,
        };
        let frame = compositor.frame(None, Some("No hosts"));
        assert!(frame.is_empty());
        assert_eq!(frame.empty_state.as_deref(), Some("No hosts"));
        assert_eq!(frame.total_height, 0);
    }
}
