#![forbid(unsafe_code)]

//! Table rows.

use tessera_style::Align;

use crate::cell::Cell;

/// An ordered sequence of cells.
///
/// The row border and alignment apply to member cells that do not set their
/// own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub(crate) cells: Vec<Cell>,
    pub(crate) border: Option<bool>,
    pub(crate) align: Option<Align>,
}

impl Row {
    /// Create a row from an iterator of cell contents.
    pub fn new(cells: impl IntoIterator<Item = impl Into<Cell>>) -> Self {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            border: None,
            align: None,
        }
    }

    /// Default border for cells of this row.
    #[must_use]
    pub fn border(mut self, border: bool) -> Self {
        self.border = Some(border);
        self
    }

    /// Default alignment for cells of this row.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Append a cell.
    pub fn push(&mut self, cell: impl Into<Cell>) {
        self.cells.push(cell.into());
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<C: Into<Cell>> From<Vec<C>> for Row {
    fn from(cells: Vec<C>) -> Self {
        Self::new(cells)
    }
}

impl<C: Into<Cell>, const N: usize> From<[C; N]> for Row {
    fn from(cells: [C; N]) -> Self {
        Self::new(cells)
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::new(iter)
    }
}
