#![forbid(unsafe_code)]

//! The table model and its options.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tessera_style::{Align, BorderChars};

use crate::column::Column;
use crate::error::{LayoutError, SpecError};
use crate::row::Row;
use crate::spec::json_text;

/// Padding used when neither the column nor the table sets one.
pub const DEFAULT_PADDING: usize = 1;

/// A setting given once for every column or once per column.
///
/// Per-column lists shorter than the table fall back to the default for the
/// remaining columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PerColumn {
    Uniform(usize),
    Each(Vec<usize>),
}

impl PerColumn {
    /// Value for `column`, if one is configured.
    #[must_use]
    pub fn get(&self, column: usize) -> Option<usize> {
        match self {
            Self::Uniform(value) => Some(*value),
            Self::Each(values) => values.get(column).copied(),
        }
    }
}

impl From<usize> for PerColumn {
    fn from(value: usize) -> Self {
        Self::Uniform(value)
    }
}

impl From<Vec<usize>> for PerColumn {
    fn from(values: Vec<usize>) -> Self {
        Self::Each(values)
    }
}

impl<const N: usize> From<[usize; N]> for PerColumn {
    fn from(values: [usize; N]) -> Self {
        Self::Each(values.to_vec())
    }
}

/// Table-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Spaces in front of every emitted line.
    pub indent: usize,
    /// Default border flag for every row.
    pub border: bool,
    pub min_col_width: PerColumn,
    /// `usize::MAX` leaves a column unbounded.
    pub max_col_width: PerColumn,
    pub padding: PerColumn,
    pub align: Align,
    pub chars: BorderChars,
    pub columns: Vec<Column>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            indent: 0,
            border: false,
            min_col_width: PerColumn::Uniform(0),
            max_col_width: PerColumn::Uniform(usize::MAX),
            padding: PerColumn::Uniform(DEFAULT_PADDING),
            align: Align::Left,
            chars: BorderChars::default(),
            columns: Vec::new(),
        }
    }
}

impl TableOptions {
    /// Override for `column`, if any.
    #[must_use]
    pub fn column(&self, column: usize) -> Option<&Column> {
        self.columns.get(column)
    }

    /// Minimum width: column override, then table setting, then 0.
    #[must_use]
    pub fn min_width(&self, column: usize) -> usize {
        self.column(column)
            .and_then(|c| c.min_width)
            .or_else(|| self.min_col_width.get(column))
            .unwrap_or(0)
    }

    /// Maximum width: column override, then table setting, then unbounded.
    #[must_use]
    pub fn max_width(&self, column: usize) -> usize {
        self.column(column)
            .and_then(|c| c.max_width)
            .or_else(|| self.max_col_width.get(column))
            .unwrap_or(usize::MAX)
    }

    /// Padding: column override, then table setting, then [`DEFAULT_PADDING`].
    #[must_use]
    pub fn padding(&self, column: usize) -> usize {
        self.column(column)
            .and_then(|c| c.padding)
            .or_else(|| self.padding.get(column))
            .unwrap_or(DEFAULT_PADDING)
    }
}

/// A text table: an optional header row, body rows and options.
///
/// # Example
/// ```
/// use tessera_table::{Row, Table};
///
/// let table = Table::new([["a", "bb"], ["ccc", "d"]]).border(true);
/// assert_eq!(
///     table.render().unwrap(),
///     "┌─────┬────┐\n\
///      │ a   │ bb │\n\
///      ├─────┼────┤\n\
///      │ ccc │ d  │\n\
///      └─────┴────┘"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    header: Option<Row>,
    rows: Vec<Row>,
    options: TableOptions,
}

impl Table {
    /// Create a table from body rows.
    pub fn new(rows: impl IntoIterator<Item = impl Into<Row>>) -> Self {
        Self {
            header: None,
            rows: rows.into_iter().map(Into::into).collect(),
            options: TableOptions::default(),
        }
    }

    /// Build a table from JSON objects.
    ///
    /// The header is the union of the object keys, taken record by record.
    /// Within a record keys follow `serde_json` map order (sorted), and keys
    /// first seen in a later record are appended. Each record becomes a row
    /// with its values under the matching key (empty when a record lacks the
    /// key).
    pub fn from_records(records: &[Value]) -> Result<Self, SpecError> {
        let mut keys: Vec<&str> = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let object = record
                .as_object()
                .ok_or(SpecError::NotAnObject { index })?;
            for key in object.keys() {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }

        let rows = records.iter().filter_map(Value::as_object).map(|object| {
            keys.iter()
                .map(|key| object.get(*key).map(json_text).unwrap_or_default())
                .collect::<Vec<_>>()
        });

        let mut table = Self::new(rows);
        if !keys.is_empty() {
            table = table.header(keys);
        }
        Ok(table)
    }

    /// Set the header row.
    #[must_use]
    pub fn header(mut self, header: impl Into<Row>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Replace the body rows.
    #[must_use]
    pub fn body(mut self, rows: impl IntoIterator<Item = impl Into<Row>>) -> Self {
        self.rows = rows.into_iter().map(Into::into).collect();
        self
    }

    /// Append a body row.
    pub fn push(&mut self, row: impl Into<Row>) {
        self.rows.push(row.into());
    }

    #[must_use]
    pub fn border(mut self, border: bool) -> Self {
        self.options.border = border;
        self
    }

    #[must_use]
    pub fn indent(mut self, indent: usize) -> Self {
        self.options.indent = indent;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: impl Into<PerColumn>) -> Self {
        self.options.padding = padding.into();
        self
    }

    #[must_use]
    pub fn min_col_width(mut self, width: impl Into<PerColumn>) -> Self {
        self.options.min_col_width = width.into();
        self
    }

    #[must_use]
    pub fn max_col_width(mut self, width: impl Into<PerColumn>) -> Self {
        self.options.max_col_width = width.into();
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.options.align = align;
        self
    }

    /// Set the border glyphs.
    #[must_use]
    pub fn chars(mut self, chars: BorderChars) -> Self {
        self.options.chars = chars;
        self
    }

    /// Replace all column overrides.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.options.columns = columns.into_iter().collect();
        self
    }

    /// Set the override for one column.
    #[must_use]
    pub fn column(mut self, index: usize, column: Column) -> Self {
        if self.options.columns.len() <= index {
            self.options.columns.resize(index + 1, Column::default());
        }
        self.options.columns[index] = column;
        self
    }

    /// Replace every option at once.
    #[must_use]
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &TableOptions {
        &self.options
    }

    #[must_use]
    pub fn header_row(&self) -> Option<&Row> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Render the table to a string.
    ///
    /// Rendering never mutates the table, so the same table may be rendered
    /// repeatedly or from several threads.
    pub fn render(&self) -> Result<String, LayoutError> {
        crate::layout::render(self)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.render().map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
