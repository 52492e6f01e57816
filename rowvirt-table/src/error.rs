use alloc::string::String;

use crate::ColumnKey;

/// A column definition that cannot be laid out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Two columns share the same key.
    #[error("duplicate column key '{key}'")]
    DuplicateColumnKey { key: ColumnKey },

    /// A column was declared with a width of zero.
    #[error("column '{key}' must have a positive width")]
    ZeroColumnWidth { key: ColumnKey },

    /// `min_width` is larger than `max_width`.
    #[error("column '{key}' has min_width {min} greater than max_width {max}")]
    InvertedWidthBounds { key: ColumnKey, min: u32, max: u32 },
}

/// The failure a cell renderer returns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CellError {
    message: String,
}

impl CellError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for CellError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for CellError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// A cell renderer failed while composing a row.
///
/// The affected cell falls back to its raw value; this error is reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("renderer for column '{column}' failed at row {index}: {source}")]
pub struct RenderError {
    pub column: ColumnKey,
    pub index: usize,
    pub source: CellError,
}
