//! Row selection state, keyed by item identity.
//!
//! Selection is independent of virtualization: rows that are not mounted can be selected
//! through `select_all` or by id. Identifiers are not pruned when the dataset changes; call
//! [`SelectionController::retain`] to reconcile explicitly.

use crate::{RowId, SelectionSet};

/// Selection mode for a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    /// Selection requests are ignored.
    None,
    /// At most one row is selected.
    Single,
    /// Any number of rows can be selected.
    #[default]
    Multiple,
}

/// Owns the set of selected row identifiers.
///
/// Mutating methods return `true` when the set actually changed, which is when callers should
/// emit a selection-change event.
#[derive(Debug, Clone)]
pub struct SelectionController<ID> {
    mode: SelectionMode,
    selected: SelectionSet<ID>,
    /// Starting point for range selection.
    anchor: Option<ID>,
}

impl<ID> Default for SelectionController<ID> {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            selected: SelectionSet::new(),
            anchor: None,
        }
    }
}

impl<ID: RowId> SelectionController<ID> {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Changes the mode, dropping selections the new mode cannot hold.
    pub fn set_mode(&mut self, mode: SelectionMode) -> bool {
        self.mode = mode;
        match mode {
            SelectionMode::None => self.clear(),
            SelectionMode::Single if self.selected.len() > 1 => self.clear(),
            _ => false,
        }
    }

    pub fn selected(&self) -> &SelectionSet<ID> {
        &self.selected
    }

    pub fn is_selected(&self, id: &ID) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ID> {
        self.selected.iter()
    }

    pub fn anchor(&self) -> Option<&ID> {
        self.anchor.as_ref()
    }

    /// Adds or removes one id. Repeating a call has no further effect.
    pub fn select_row(&mut self, id: ID, selected: bool) -> bool {
        match (self.mode, selected) {
            (SelectionMode::None, _) => false,
            (_, false) => self.selected.remove(&id),
            (SelectionMode::Single, true) => {
                if self.selected.len() == 1 && self.selected.contains(&id) {
                    return false;
                }
                self.selected.clear();
                self.selected.insert(id.clone());
                self.anchor = Some(id);
                true
            }
            (SelectionMode::Multiple, true) => {
                self.anchor = Some(id.clone());
                self.selected.insert(id)
            }
        }
    }

    /// Flips the selection state of one id.
    pub fn toggle(&mut self, id: ID) -> bool {
        let selected = !self.selected.contains(&id);
        self.select_row(id, selected)
    }

    /// With `selected == true`, makes the selection exactly `ids` (every loaded item, whether
    /// mounted or not). With `false`, clears the selection.
    ///
    /// Only honored in [`SelectionMode::Multiple`], except that clearing always works.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = ID>, selected: bool) -> bool {
        if !selected {
            return self.clear();
        }
        if self.mode != SelectionMode::Multiple {
            return false;
        }
        let next: SelectionSet<ID> = ids.into_iter().collect();
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    /// Selects every id between the anchor and `target` in `ordered` (inclusive), replacing the
    /// current selection. Falls back to selecting `target` alone when either end is missing.
    pub fn select_range(&mut self, ordered: &[ID], target: &ID) -> bool {
        if self.mode != SelectionMode::Multiple {
            return self.select_row(target.clone(), true);
        }
        let anchor_pos = self
            .anchor
            .as_ref()
            .and_then(|a| ordered.iter().position(|id| id == a));
        let target_pos = ordered.iter().position(|id| id == target);
        let (Some(a), Some(t)) = (anchor_pos, target_pos) else {
            return self.select_row(target.clone(), true);
        };
        let (start, end) = if a <= t { (a, t) } else { (t, a) };

        let next: SelectionSet<ID> = ordered[start..=end].iter().cloned().collect();
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    pub fn clear(&mut self) -> bool {
        self.anchor = None;
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    /// Keeps only the ids for which `keep` returns `true`. Returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&ID) -> bool) -> usize {
        let before = self.selected.len();
        self.selected.retain(|id| keep(id));
        if self.anchor.as_ref().is_some_and(|a| !keep(a)) {
            self.anchor = None;
        }
        before - self.selected.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn select_row_is_idempotent() {
        let mut s = SelectionController::new(SelectionMode::Multiple);
        assert!(s.select_row(7u32, true));
        assert!(!s.select_row(7, true));
        assert_eq!(s.len(), 1);
        assert!(s.select_row(7, false));
        assert!(!s.select_row(7, false));
        assert!(s.is_empty());
    }

    #[test]
    fn select_all_round_trip() {
        let mut s = SelectionController::new(SelectionMode::Multiple);
        s.select_row(99u32, true);
        assert!(s.select_all(0..5u32, true));
        assert_eq!(s.len(), 5);
        assert!(!s.is_selected(&99));
        assert!(!s.select_all(0..5u32, true));
        assert!(s.select_all(core::iter::empty(), false));
        assert!(s.is_empty());
        assert!(!s.select_all(core::iter::empty(), false));
    }

    #[test]
    fn single_mode_replaces() {
        let mut s = SelectionController::new(SelectionMode::Single);
        assert!(s.select_row("a", true));
        assert!(s.select_row("b", true));
        assert!(!s.select_row("b", true));
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec!["b"]);
        assert!(!s.select_all(["a", "b"], true));
    }

    #[test]
    fn none_mode_ignores_selection() {
        let mut s = SelectionController::new(SelectionMode::None);
        assert!(!s.select_row(1u8, true));
        assert!(!s.toggle(1));
        assert!(s.is_empty());
    }

    #[test]
    fn switching_to_single_drops_multi_selection() {
        let mut s = SelectionController::new(SelectionMode::Multiple);
        s.select_all(0..3u8, true);
        assert!(s.set_mode(SelectionMode::Single));
        assert!(s.is_empty());
    }

    #[test]
    fn range_selection_from_anchor() {
        let ids: Vec<u32> = (10..20).collect();
        let mut s = SelectionController::new(SelectionMode::Multiple);
        s.select_row(12, true);
        assert!(s.select_range(&ids, &15));
        let mut got: Vec<u32> = s.iter().copied().collect();
        got.sort_unstable();
        assert_eq!(got, vec![12, 13, 14, 15]);

        // Backwards from the same anchor replaces the previous range.
        assert!(s.select_range(&ids, &11));
        let mut got: Vec<u32> = s.iter().copied().collect();
        got.sort_unstable();
        assert_eq!(got, vec![11, 12]);

        // Without an anchor, falls back to a plain select.
        let mut fresh = SelectionController::new(SelectionMode::Multiple);
        assert!(fresh.select_range(&ids, &17));
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh.anchor(), Some(&17));
    }

    #[test]
    fn retain_prunes_and_reports() {
        let mut s = SelectionController::new(SelectionMode::Multiple);
        s.select_all(0..10u32, true);
        assert_eq!(s.retain(|id| id % 2 == 0), 5);
        assert_eq!(s.len(), 5);
        assert_eq!(s.retain(|_| true), 0);
    }
}
