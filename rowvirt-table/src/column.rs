use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::{CellError, ConfigError};

/// Identifies a column within one table.
pub type ColumnKey = String;

/// Extracts the raw value of a column from an item.
pub type ValueFn<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Renders a cell from `(value, item, index)`.
pub type CellRenderer<T> = Arc<dyn Fn(&CellValue, &T, usize) -> Result<String, CellError> + Send + Sync>;

/// The raw value of a cell, before rendering.
///
/// Its `Display` form is the default cell content and the fallback when a renderer fails.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map_or(Self::Empty, Into::into)
    }
}

/// Horizontal alignment of cell content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Pins a column to one edge of the viewport during horizontal scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sticky {
    Left,
    Right,
}

/// A table column: header metadata, layout constraints, and how its cells are produced.
///
/// ```ignore
/// let columns = vec![
///     Column::new("name", "Customer", 200, |c: &Customer| c.name.as_str().into()).sortable(),
///     Column::new("plan", "Plan", 120, |c: &Customer| c.plan.as_str().into()).filterable(),
///     Column::new("mrr", "MRR", 90, |c: &Customer| c.mrr.into()).align(CellAlign::Right),
/// ];
/// ```
pub struct Column<T> {
    pub key: ColumnKey,
    pub title: String,
    pub width: u32,
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
    pub sortable: bool,
    pub filterable: bool,
    pub hidden: bool,
    pub sticky: Option<Sticky>,
    pub align: CellAlign,
    value: ValueFn<T>,
    render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    pub fn new(
        key: impl Into<ColumnKey>,
        title: impl Into<String>,
        width: u32,
        value: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            width,
            min_width: None,
            max_width: None,
            sortable: false,
            filterable: false,
            hidden: false,
            sticky: None,
            align: CellAlign::Left,
            value: Arc::new(value),
            render: None,
        }
    }

    /// Makes header clicks on this column produce sort requests.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Allows filter requests against this column.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn sticky(mut self, sticky: Sticky) -> Self {
        self.sticky = Some(sticky);
        self
    }

    pub fn align(mut self, align: CellAlign) -> Self {
        self.align = align;
        self
    }

    pub fn min_width(mut self, min_width: u32) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn max_width(mut self, max_width: u32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Sets a custom cell renderer. Without one, cells show the value's `Display` form.
    pub fn render(
        mut self,
        render: impl Fn(&CellValue, &T, usize) -> Result<String, CellError> + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn value(&self, item: &T) -> CellValue {
        (self.value)(item)
    }

    pub fn renderer(&self) -> Option<&CellRenderer<T>> {
        self.render.as_ref()
    }

    /// The declared width clamped to `[min_width, max_width]`.
    pub fn effective_width(&self) -> u32 {
        let mut width = self.width;
        if let Some(min) = self.min_width {
            width = width.max(min);
        }
        if let Some(max) = self.max_width {
            width = width.min(max);
        }
        width
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroColumnWidth {
                key: self.key.clone(),
            });
        }
        if let (Some(min), Some(max)) = (self.min_width, self.max_width) {
            if min > max {
                return Err(ConfigError::InvertedWidthBounds {
                    key: self.key.clone(),
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            width: self.width,
            min_width: self.min_width,
            max_width: self.max_width,
            sortable: self.sortable,
            filterable: self.filterable,
            hidden: self.hidden,
            sticky: self.sticky,
            align: self.align,
            value: Arc::clone(&self.value),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("max_width", &self.max_width)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("hidden", &self.hidden)
            .field("sticky", &self.sticky)
            .field("align", &self.align)
            .field("render", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

/// A validated, ordered set of columns with unique keys.
pub struct ColumnSet<T> {
    columns: Vec<Column<T>>,
}

impl<T> ColumnSet<T> {
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, ConfigError> {
        let mut seen = BTreeSet::new();
        for column in &columns {
            column.validate()?;
            if !seen.insert(column.key.as_str()) {
                return Err(ConfigError::DuplicateColumnKey {
                    key: column.key.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    pub fn by_index(&self, index: usize) -> Option<&Column<T>> {
        self.columns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter()
    }

    /// Computes the horizontal layout of a row.
    ///
    /// Slot order: the selection checkbox (when `selection_width` is set), left-sticky columns,
    /// scrolling columns, then right-sticky columns. Hidden columns get no slot.
    pub fn layout(&self, selection_width: Option<u32>) -> ColumnLayout {
        let mut slots = Vec::with_capacity(self.columns.len() + 1);
        let mut x = 0u32;
        let mut pin_left = 0u32;

        if let Some(width) = selection_width.filter(|&w| w > 0) {
            slots.push(ColumnSlot {
                kind: SlotKind::Selection,
                x,
                width,
                sticky: Some(Sticky::Left),
                pin: Some(0),
                align: CellAlign::Center,
            });
            x = x.saturating_add(width);
            pin_left = pin_left.saturating_add(width);
        }

        let visible = || self.columns.iter().enumerate().filter(|(_, c)| !c.hidden);

        for (i, column) in visible().filter(|(_, c)| c.sticky == Some(Sticky::Left)) {
            let width = column.effective_width();
            slots.push(ColumnSlot {
                kind: SlotKind::Column(i),
                x,
                width,
                sticky: Some(Sticky::Left),
                pin: Some(pin_left),
                align: column.align,
            });
            x = x.saturating_add(width);
            pin_left = pin_left.saturating_add(width);
        }

        for (i, column) in visible().filter(|(_, c)| c.sticky.is_none()) {
            let width = column.effective_width();
            slots.push(ColumnSlot {
                kind: SlotKind::Column(i),
                x,
                width,
                sticky: None,
                pin: None,
                align: column.align,
            });
            x = x.saturating_add(width);
        }

        let right_start = slots.len();
        for (i, column) in visible().filter(|(_, c)| c.sticky == Some(Sticky::Right)) {
            let width = column.effective_width();
            slots.push(ColumnSlot {
                kind: SlotKind::Column(i),
                x,
                width,
                sticky: Some(Sticky::Right),
                pin: None,
                align: column.align,
            });
            x = x.saturating_add(width);
        }

        // Right pins are measured from the right edge, so accumulate in reverse.
        let mut pin_right = 0u32;
        for slot in slots[right_start..].iter_mut().rev() {
            slot.pin = Some(pin_right);
            pin_right = pin_right.saturating_add(slot.width);
        }

        ColumnLayout {
            slots,
            content_width: x,
        }
    }
}

impl<T> Clone for ColumnSet<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

/// What occupies a horizontal slot of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// The multi-select checkbox column.
    Selection,
    /// The column at this index in the [`ColumnSet`].
    Column(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSlot {
    pub kind: SlotKind,
    /// Left edge in content coordinates.
    pub x: u32,
    pub width: u32,
    pub sticky: Option<Sticky>,
    /// For sticky slots: distance from the pinned viewport edge.
    pub pin: Option<u32>,
    pub align: CellAlign,
}

/// The static horizontal layout shared by every row of a table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    pub slots: Vec<ColumnSlot>,
    pub content_width: u32,
}

impl ColumnLayout {
    /// Returns the slot under content coordinate `x`.
    pub fn slot_at(&self, x: u32) -> Option<&ColumnSlot> {
        self.slots
            .iter()
            .find(|s| x >= s.x && x < s.x.saturating_add(s.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    struct Row {
        name: &'static str,
    }

    fn text(key: &str, width: u32) -> Column<Row> {
        Column::new(key, key, width, |r: &Row| r.name.into())
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = ColumnSet::new(vec![text("a", 10), text("b", 10), text("a", 5)]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateColumnKey { key: "a".into() });
    }

    #[test]
    fn zero_width_and_inverted_bounds_are_rejected() {
        let err = ColumnSet::new(vec![text("a", 0)]).unwrap_err();
        assert_eq!(err, ConfigError::ZeroColumnWidth { key: "a".into() });

        let err = ColumnSet::new(vec![text("a", 10).min_width(20).max_width(5)]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvertedWidthBounds {
                key: "a".into(),
                min: 20,
                max: 5
            }
        );
    }

    #[test]
    fn effective_width_respects_bounds() {
        assert_eq!(text("a", 10).min_width(30).effective_width(), 30);
        assert_eq!(text("a", 100).max_width(60).effective_width(), 60);
        assert_eq!(text("a", 40).min_width(10).max_width(60).effective_width(), 40);
    }

    #[test]
    fn layout_orders_selection_then_sticky_then_scrolling() {
        let set = ColumnSet::new(vec![
            text("status", 50),
            text("actions", 40).sticky(Sticky::Right),
            text("name", 100).sticky(Sticky::Left),
            text("notes", 80).hidden(),
            text("region", 60),
            text("menu", 20).sticky(Sticky::Right),
        ])
        .unwrap();
        let layout = set.layout(Some(32));

        let kinds: Vec<SlotKind> = layout.slots.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SlotKind::Selection,
                SlotKind::Column(2),
                SlotKind::Column(0),
                SlotKind::Column(4),
                SlotKind::Column(1),
                SlotKind::Column(5),
            ]
        );
        let xs: Vec<u32> = layout.slots.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![0, 32, 132, 182, 242, 282]);
        let pins: Vec<Option<u32>> = layout.slots.iter().map(|s| s.pin).collect();
        assert_eq!(pins, vec![Some(0), Some(32), None, None, Some(20), Some(0)]);
        assert_eq!(layout.content_width, 302);

        assert_eq!(layout.slot_at(140).map(|s| s.kind), Some(SlotKind::Column(0)));
        assert_eq!(layout.slot_at(302), None);
    }

    #[test]
    fn cell_value_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::from(42).to_string(), "42");
        assert_eq!(CellValue::from(Some("up")).to_string(), "up");
        assert_eq!(CellValue::from(None::<i64>), CellValue::Empty);
        assert_eq!(CellValue::from(true).to_string(), "true");
    }
}
