#![forbid(unsafe_code)]

//! JSON table descriptions.
//!
//! ```
//! use tessera_table::TableSpec;
//!
//! let spec = TableSpec::from_json(r#"{
//!     "header": ["name", {"content": "score", "align": "right"}],
//!     "rows": [["ada", 36], [{"content": "total", "col_span": 2}]],
//!     "border": true
//! }"#).unwrap();
//! let rendered = spec.into_table().render().unwrap();
//! assert!(rendered.contains("│ total"));
//! ```

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tessera_style::{Align, BorderChars};

use crate::cell::Cell;
use crate::column::Column;
use crate::error::SpecError;
use crate::row::Row;
use crate::table::{PerColumn, Table};

/// Text shown for a JSON scalar: strings verbatim, `null` empty, anything else
/// in its JSON form.
pub(crate) fn json_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A whole table as read from JSON.
///
/// Every field is optional; unset options keep the [`Table`] defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableSpec {
    pub header: Option<Vec<CellSpec>>,
    pub rows: Vec<Vec<CellSpec>>,
    pub border: Option<bool>,
    pub indent: Option<usize>,
    pub padding: Option<PerColumn>,
    #[serde(alias = "minColWidth")]
    pub min_col_width: Option<PerColumn>,
    #[serde(alias = "maxColWidth")]
    pub max_col_width: Option<PerColumn>,
    pub align: Option<Align>,
    pub chars: Option<BorderChars>,
    pub columns: Vec<Column>,
}

impl TableSpec {
    /// Parse a spec from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the described table.
    #[must_use]
    pub fn into_table(self) -> Table {
        let mut table = Table::new(self.rows.into_iter().map(row_from_specs));
        if let Some(header) = self.header {
            table = table.header(row_from_specs(header));
        }
        if let Some(border) = self.border {
            table = table.border(border);
        }
        if let Some(indent) = self.indent {
            table = table.indent(indent);
        }
        if let Some(padding) = self.padding {
            table = table.padding(padding);
        }
        if let Some(width) = self.min_col_width {
            table = table.min_col_width(width);
        }
        if let Some(width) = self.max_col_width {
            table = table.max_col_width(width);
        }
        if let Some(align) = self.align {
            table = table.align(align);
        }
        if let Some(chars) = self.chars {
            table = table.chars(chars);
        }
        table.columns(self.columns)
    }
}

impl From<TableSpec> for Table {
    fn from(spec: TableSpec) -> Self {
        spec.into_table()
    }
}

fn row_from_specs(cells: Vec<CellSpec>) -> Row {
    cells.into_iter().map(CellSpec::into_cell).collect()
}

/// One cell of a [`TableSpec`]: a bare scalar or an object with options.
#[derive(Debug, Clone, PartialEq)]
pub enum CellSpec {
    Text(String),
    Detailed(CellOptions),
}

/// The object form of a [`CellSpec`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CellOptions {
    pub content: Value,
    #[serde(alias = "colSpan")]
    pub col_span: Option<usize>,
    #[serde(alias = "rowSpan")]
    pub row_span: Option<usize>,
    pub border: Option<bool>,
    pub align: Option<Align>,
}

impl CellSpec {
    #[must_use]
    pub fn into_cell(self) -> Cell {
        match self {
            Self::Text(text) => Cell::new(text),
            Self::Detailed(options) => {
                let mut cell = Cell::new(json_text(&options.content));
                if let Some(span) = options.col_span {
                    cell = cell.col_span(span);
                }
                if let Some(span) = options.row_span {
                    cell = cell.row_span(span);
                }
                if let Some(border) = options.border {
                    cell = cell.border(border);
                }
                if let Some(align) = options.align {
                    cell = cell.align(align);
                }
                cell
            }
        }
    }
}

impl<'de> Deserialize<'de> for CellSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(_) => Err(de::Error::custom("a table cell cannot be an array")),
            object @ Value::Object(_) => serde_json::from_value(object)
                .map(Self::Detailed)
                .map_err(de::Error::custom),
            scalar => Ok(Self::Text(json_text(&scalar))),
        }
    }
}
