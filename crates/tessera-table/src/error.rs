#![forbid(unsafe_code)]

//! Error types.

use std::fmt;

/// Failure while rendering a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A row-spanning cell crosses a border that has no row below it.
    ///
    /// Span expansion always creates the rows a span needs, so this signals a
    /// bookkeeping bug rather than bad input.
    InvalidLayout { row: usize, column: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLayout { row, column } => {
                write!(f, "invalid layout: row span at row {row}, column {column} has no next row")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Failure while building a table from JSON.
#[derive(Debug)]
pub enum SpecError {
    /// Malformed JSON or a value of the wrong shape.
    Json(serde_json::Error),
    /// A record passed to [`Table::from_records`](crate::Table::from_records)
    /// is not a JSON object.
    NotAnObject { index: usize },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid table spec: {err}"),
            Self::NotAnObject { index } => write!(f, "record {index} is not a JSON object"),
        }
    }
}

impl std::error::Error for SpecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NotAnObject { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SpecError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
