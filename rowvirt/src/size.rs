use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::num::NonZeroU32;

/// A per-index row height function.
pub type HeightFn = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// How row heights are resolved before any measurement is applied.
#[derive(Clone)]
pub enum RowHeight {
    /// Every row has the same height.
    Fixed(u32),
    /// `f(index)` returns the height of row `index`.
    Variable(HeightFn),
}

impl RowHeight {
    pub fn fixed(height: u32) -> Self {
        Self::Fixed(height)
    }

    pub fn variable(f: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self::Variable(Arc::new(f))
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

impl Default for RowHeight {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl fmt::Debug for RowHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(h) => f.debug_tuple("Fixed").field(h).finish(),
            Self::Variable(_) => f.write_str("Variable(..)"),
        }
    }
}

fn clamp_height(height: u32, index: usize) -> u32 {
    if height == 0 {
        vwarn!(index, "SizeModel: non-positive row height clamped to 1");
        return 1;
    }
    height
}

/// Resolves row heights and converts between row indexes and pixel offsets.
///
/// In fixed mode (a [`RowHeight::Fixed`] height with no measurements) every query is O(1)
/// arithmetic. Otherwise the model keeps a cumulative offset cache where `offsets[i]` is the
/// top of row `i` and `offsets[count]` is the total content height. The cache is built lazily:
/// queries extend it from the current frontier only as far as they need, and binary search it
/// for offset → index lookups.
///
/// Heights are always at least 1, so the cache is strictly increasing.
#[derive(Clone)]
pub struct SizeModel {
    count: usize,
    row_height: RowHeight,
    // Index-keyed measured heights. Empty until the first measurement.
    measured: Vec<Option<NonZeroU32>>,
    measured_len: usize,
    offsets: RefCell<Vec<u64>>,
}

impl SizeModel {
    pub fn new(count: usize, row_height: RowHeight) -> Self {
        let row_height = Self::normalize(row_height);
        vdebug!(count, fixed = row_height.is_fixed(), "SizeModel::new");
        Self {
            count,
            row_height,
            measured: Vec::new(),
            measured_len: 0,
            offsets: RefCell::new(Vec::new()),
        }
    }

    fn normalize(row_height: RowHeight) -> RowHeight {
        match row_height {
            RowHeight::Fixed(h) => RowHeight::Fixed(clamp_height(h, 0)),
            variable => variable,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn row_height(&self) -> &RowHeight {
        &self.row_height
    }

    /// Returns the uniform row height when the model is in fixed mode.
    pub fn fixed_height(&self) -> Option<u32> {
        match self.row_height {
            RowHeight::Fixed(h) if self.measured_len == 0 => Some(h),
            _ => None,
        }
    }

    /// Changes the number of rows. Discards the offset cache and any measurements past the new
    /// count.
    pub fn set_count(&mut self, count: usize) {
        if self.count == count {
            return;
        }
        self.count = count;
        if self.measured.len() > count {
            self.measured.truncate(count);
            self.measured_len = self.measured.iter().filter(|m| m.is_some()).count();
        }
        self.invalidate();
        vdebug!(count, "SizeModel::set_count");
    }

    /// Replaces the height source. Discards the offset cache and all measurements.
    pub fn set_row_height(&mut self, row_height: RowHeight) {
        self.row_height = Self::normalize(row_height);
        self.measured.clear();
        self.measured_len = 0;
        self.invalidate();
        vdebug!(fixed = self.row_height.is_fixed(), "SizeModel::set_row_height");
    }

    /// Records the measured height of a mounted row.
    ///
    /// Only offsets after `index` are invalidated; they are rebuilt on the next query that
    /// reaches them. Returns the signed change of the row's height (and therefore of every
    /// following offset and the total height).
    pub fn measure(&mut self, index: usize, height: u32) -> i64 {
        if index >= self.count {
            vwarn!(index, count = self.count, "SizeModel::measure: index out of range");
            return 0;
        }
        let height = clamp_height(height, index);
        let prev = self.height_of(index);

        if self.measured.len() < self.count {
            self.measured.resize(self.count, None);
        }
        let slot = &mut self.measured[index];
        if slot.is_none() {
            self.measured_len += 1;
        }
        *slot = NonZeroU32::new(height);

        if prev == height {
            return 0;
        }
        self.offsets.get_mut().truncate(index + 1);
        vtrace!(index, prev, height, "SizeModel::measure");
        height as i64 - prev as i64
    }

    pub fn is_measured(&self, index: usize) -> bool {
        matches!(self.measured.get(index), Some(Some(_)))
    }

    pub fn measured_count(&self) -> usize {
        self.measured_len
    }

    pub fn clear_measurements(&mut self) {
        if self.measured_len == 0 && self.measured.is_empty() {
            return;
        }
        self.measured.clear();
        self.measured_len = 0;
        self.invalidate();
    }

    /// Number of rows whose top offset is currently cached.
    pub fn cached_rows(&self) -> usize {
        self.offsets.borrow().len().saturating_sub(1)
    }

    fn invalidate(&mut self) {
        self.offsets.get_mut().clear();
    }

    pub fn height_of(&self, index: usize) -> u32 {
        if let Some(Some(h)) = self.measured.get(index) {
            return h.get();
        }
        match &self.row_height {
            RowHeight::Fixed(h) => *h,
            RowHeight::Variable(f) => clamp_height(f(index), index),
        }
    }

    /// Returns the top of row `index`. `offset_of(count)` is the total height; larger indexes
    /// are clamped to `count`.
    pub fn offset_of(&self, index: usize) -> u64 {
        let index = index.min(self.count);
        if let Some(h) = self.fixed_height() {
            return index as u64 * h as u64;
        }
        self.extend_to_index(index);
        self.offsets.borrow()[index]
    }

    /// Returns the index of the row containing pixel `y`, clamped to `[0, count - 1]`.
    ///
    /// Returns `None` when the model has no rows.
    pub fn index_at_offset(&self, y: u64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let last = self.count - 1;
        if let Some(h) = self.fixed_height() {
            return Some((y / h as u64).min(last as u64) as usize);
        }

        self.extend_to_offset(y);
        let offsets = self.offsets.borrow();
        let tops = &offsets[..offsets.len().min(self.count)];
        let consumed = tops.partition_point(|&top| top <= y);
        Some(consumed.saturating_sub(1).min(last))
    }

    pub fn total_height(&self) -> u64 {
        self.offset_of(self.count)
    }

    fn extend_to_index(&self, index: usize) {
        let mut offsets = self.offsets.borrow_mut();
        if offsets.is_empty() {
            offsets.push(0);
        }
        while offsets.len() <= index {
            let row = offsets.len() - 1;
            let next = offsets[row].saturating_add(self.height_of(row) as u64);
            offsets.push(next);
        }
    }

    // Extends until the cache covers `y` or reaches the end of the rows.
    fn extend_to_offset(&self, y: u64) {
        let mut offsets = self.offsets.borrow_mut();
        if offsets.is_empty() {
            offsets.push(0);
        }
        loop {
            let row = offsets.len() - 1;
            if row >= self.count || offsets[row] > y {
                break;
            }
            let next = offsets[row].saturating_add(self.height_of(row) as u64);
            offsets.push(next);
        }
    }
}

impl fmt::Debug for SizeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeModel")
            .field("count", &self.count)
            .field("row_height", &self.row_height)
            .field("measured", &self.measured_len)
            .field("cached_rows", &self.cached_rows())
            .finish()
    }
}
