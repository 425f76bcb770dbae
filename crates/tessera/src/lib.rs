#![forbid(unsafe_code)]

//! Tessera public facade crate.
//!
//! Re-exports the table model, border glyph sets and text measurement from
//! the internal crates, and offers a prelude plus [`render_json`] for
//! rendering a JSON table description in one call.
//!
//! ```
//! let out = tessera::render_json(r#"{"rows": [["a", "b"]], "border": true}"#).unwrap();
//! assert_eq!(out, "┌───┬───┐\n│ a │ b │\n└───┴───┘");
//! ```

use std::fmt;

use tracing::debug;

// --- Style re-exports ------------------------------------------------------

pub use tessera_style::{Align, BorderChars, BorderRole, ParseAlignError};

// --- Table re-exports ------------------------------------------------------

pub use tessera_table::{
    Cell, CellOptions, CellSpec, Column, ColumnMetrics, Grid, LayoutError, PerColumn, Row,
    SpecError, Table, TableOptions, TableSpec,
};

// --- Text re-exports -------------------------------------------------------

pub use tessera_text::{strip_ansi, visible_width};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Tessera.
#[derive(Debug)]
pub enum Error {
    /// The table could not be laid out.
    Layout(LayoutError),
    /// The JSON table description was rejected.
    Spec(SpecError),
    /// I/O failure reading input or writing output.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "{err}"),
            Self::Spec(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Spec(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<SpecError> for Error {
    fn from(err: SpecError) -> Self {
        Self::Spec(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Spec(SpecError::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for Tessera APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a JSON table description and render it.
pub fn render_json(json: &str) -> Result<String> {
    let spec = TableSpec::from_json(json)?;
    render_spec(spec)
}

/// Render an already parsed table description.
pub fn render_spec(spec: TableSpec) -> Result<String> {
    let table = spec.into_table();
    debug!(
        header = table.header_row().is_some(),
        rows = table.rows().len(),
        "rendering table spec"
    );
    Ok(table.render()?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Align, BorderChars, Cell, Column, Error, Result, Row, Table, TableSpec, render_json,
    };

    pub use crate::{style, table, text};
}

pub use tessera_style as style;
pub use tessera_table as table;
pub use tessera_text as text;
