//! Windowed row virtualization for large tables and lists.
//!
//! For the table layer (columns, selection, sorting, row composition), see the
//! `rowvirt-table` crate.
//!
//! This crate owns the math needed to mount only the rows that intersect a scroll viewport:
//! a per-row size model with a lazily built cumulative offset cache, offset → index lookup by
//! binary search, overscanned visible ranges, and scroll-to-index.
//!
//! It is UI-agnostic. The host layer is expected to provide:
//! - the viewport height
//! - the scroll offset (`scroll_top`)
//! - a fixed row height or a per-index height function, and optionally measured heights
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod options;
mod size;
mod state;
mod types;
mod viewport;
mod window;

#[cfg(test)]
mod tests;

pub use options::{OnRangeChange, WindowOptions};
pub use size::{HeightFn, RowHeight, SizeModel};
pub use state::WindowState;
pub use types::{Align, ScrollDirection, VisibleRange};
pub use viewport::{DEFAULT_OVERSCAN, geometric_range, max_scroll_top, visible_range};
pub use window::RowWindow;
