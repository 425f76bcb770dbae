#![forbid(unsafe_code)]

//! Table cells.

use tessera_style::Align;
use tracing::warn;

/// One logical entry of the table grid.
///
/// Border and alignment left unset fall back to the column, row and table
/// defaults when the table is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) content: String,
    pub(crate) col_span: usize,
    pub(crate) row_span: usize,
    pub(crate) border: Option<bool>,
    pub(crate) align: Option<Align>,
}

impl Cell {
    /// Create a cell spanning one row and one column.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            col_span: 1,
            row_span: 1,
            border: None,
            align: None,
        }
    }

    /// Span `span` columns. Zero is treated as one.
    #[must_use]
    pub fn col_span(mut self, span: usize) -> Self {
        self.col_span = clamp_span(span, "col_span");
        self
    }

    /// Span `span` rows. Zero is treated as one.
    #[must_use]
    pub fn row_span(mut self, span: usize) -> Self {
        self.row_span = clamp_span(span, "row_span");
        self
    }

    /// Draw (or suppress) the border around this cell.
    #[must_use]
    pub fn border(mut self, border: bool) -> Self {
        self.border = Some(border);
        self
    }

    /// Set the content alignment.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Raw content, escape sequences included.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// `(columns, rows)` covered by this cell.
    #[must_use]
    pub fn spans(&self) -> (usize, usize) {
        (self.col_span, self.row_span)
    }

    /// Whether the cell covers more than one slot.
    #[must_use]
    pub fn is_spanning(&self) -> bool {
        self.col_span > 1 || self.row_span > 1
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(String::new())
    }
}

fn clamp_span(span: usize, which: &'static str) -> usize {
    if span == 0 {
        warn!(kind = which, "zero span clamped to 1");
        1
    } else {
        span
    }
}

impl From<&str> for Cell {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for Cell {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

impl From<&String> for Cell {
    fn from(content: &String) -> Self {
        Self::new(content.as_str())
    }
}

macro_rules! cell_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Cell {
                fn from(value: $ty) -> Self {
                    Self::new(value.to_string())
                }
            }
        )*
    };
}

cell_from_display!(i32, i64, u32, u64, usize, f64, bool, char);
