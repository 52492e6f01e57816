//! Virtualized tables on top of `rowvirt`.
//!
//! This crate adds what a data table needs around the row window:
//! - [`Column`] definitions with a static horizontal layout (sticky columns, a selection
//!   checkbox column)
//! - a [`SelectionController`] keyed by item identity, independent of what is mounted
//! - a [`SortCoordinator`] that tracks the header sort state and forwards sort requests
//! - a [`RowCompositor`] that turns the visible range into absolutely positioned rows
//! - [`VirtualList`], which wires all of the above to a [`rowvirt::RowWindow`] and reports
//!   events through [`ListCallbacks`]
//!
//! Nothing here paints: the host renders [`Frame`]s however it likes and forwards scroll,
//! resize and click events back.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod column;
mod compositor;
mod error;
mod key;
mod list;
mod options;
mod selection;
mod sort;


pub use anchor::ScrollAnchor;
pub use column::{
    CellAlign, CellRenderer, CellValue, Column, ColumnKey, ColumnLayout, ColumnSet, ColumnSlot,
    SlotKind, Sticky, ValueFn,
};
pub use compositor::{CellKind, Frame, HeaderCell, RenderedCell, RenderedRow, RowCompositor};
pub use error::{CellError, ConfigError, RenderError};
pub use key::{RowId, SelectionSet};
pub use list::VirtualList;
pub use options::{
    GetItemId, ListCallbacks, OnFilter, OnItemsRendered, OnRenderError, OnRowEvent,
    OnScrollRequest, OnSelectionChange, OnSort, VirtualListOptions,
};
pub use selection::{SelectionController, SelectionMode};
pub use sort::{SortCoordinator, SortDirection, SortState};

pub use rowvirt::{Align, RowHeight, VisibleRange, WindowState};
