//! Header sort state. The coordinator only tracks which column is active and in which
//! direction; reordering the items is left to the host, which feeds the sorted snapshot back
//! through `set_items`.

use crate::{ColumnKey, ColumnSet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The active sort column and direction. `field == None` means unsorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortState {
    pub field: Option<ColumnKey>,
    pub direction: SortDirection,
}

#[derive(Clone, Debug, Default)]
pub struct SortCoordinator {
    state: SortState,
}

impl SortCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a previously captured state, e.g. the order the host loaded its data in.
    pub fn with_state(state: SortState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &SortState {
        &self.state
    }

    pub fn set_state(&mut self, state: SortState) {
        self.state = state;
    }

    pub fn clear(&mut self) {
        self.state = SortState::default();
    }

    /// The direction shown in the header of `key`, if it is the active sort column.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        match &self.state.field {
            Some(field) if field == key => Some(self.state.direction),
            _ => None,
        }
    }

    /// Handles a header click on `key`.
    ///
    /// Clicking the active ascending column flips it to descending; any other click sorts
    /// ascending. Returns the request to forward to the host, or `None` when the column is
    /// unknown or not sortable (the state is left unchanged).
    pub fn request_sort<T>(
        &mut self,
        columns: &ColumnSet<T>,
        key: &str,
    ) -> Option<(ColumnKey, SortDirection)> {
        let Some(column) = columns.get(key) else {
            vwarn!(key, "request_sort: unknown column");
            return None;
        };
        if !column.sortable {
            vtrace!(key, "request_sort: column is not sortable");
            return None;
        }

        let direction = match self.direction_for(key) {
            Some(SortDirection::Asc) => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.state = SortState {
            field: Some(column.key.clone()),
            direction,
        };
        vdebug!(key, ?direction, "request_sort");
        Some((column.key.clone(), direction))
    }
}
