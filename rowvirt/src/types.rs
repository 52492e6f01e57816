use core::ops::RangeInclusive;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// An inclusive `[start, end]` interval of row indexes that must be mounted.
///
/// Ranges are never empty: APIs that may have nothing to show (an empty dataset) return
/// `Option<VisibleRange>` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize, // inclusive
}

#[allow(clippy::len_without_is_empty)]
impl VisibleRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "VisibleRange: start > end ({start} > {end})");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Returns `(start, end)`, the shape hosts usually want for "items rendered" events.
    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}
