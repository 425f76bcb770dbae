#![forbid(unsafe_code)]

//! Span expansion.
//!
//! Turns the declared rows of a [`Table`] into a dense grid where every slot
//! names the cell that occupies it. A cell spanning several columns or rows
//! owns its top-left slot ([`Slot::Origin`]) and every other covered slot
//! refers back to it ([`Slot::Continuation`]).
//!
//! ```text
//! declared             expanded
//! [A(cs=2), B]         [A,  A', B ]
//! [C(rs=2)]            [C,  e,  e ]
//! [D, E]               [C', D,  E ]
//! ```
//!
//! (`'` marks continuations, `e` synthesized empty cells.)
//!
//! Cells are resolved while expanding: border and alignment fall back from
//! cell to column (body rows only) to row to table.
//!
//! A slot still covered by a row span from above keeps that cell. A column
//! span running into it is cut short there, so every cell covers a
//! rectangle.

use tessera_style::Align;
use tracing::warn;

use crate::cell::Cell;
use crate::row::Row;
use crate::table::Table;

/// Index of a resolved cell in [`Grid::cells`].
pub type CellId = usize;

/// Occupant of one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Top-left position of the cell.
    Origin(CellId),
    /// Position covered by a span of the cell.
    Continuation(CellId),
}

impl Slot {
    #[inline]
    #[must_use]
    pub const fn id(self) -> CellId {
        match self {
            Self::Origin(id) | Self::Continuation(id) => id,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_origin(self) -> bool {
        matches!(self, Self::Origin(_))
    }
}

/// A cell with every inherited attribute filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCell<'a> {
    pub content: &'a str,
    pub col_span: usize,
    pub row_span: usize,
    pub border: bool,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GridRow {
    slots: Vec<Slot>,
    /// Row-level border after falling back to the table default.
    border: bool,
}

/// Dense, span-expanded view of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<'a> {
    cells: Vec<ResolvedCell<'a>>,
    rows: Vec<GridRow>,
    columns: usize,
    has_header: bool,
}

/// Row defaults after falling back to the table options.
#[derive(Clone, Copy)]
struct RowDefaults {
    border: bool,
    align: Align,
    is_header: bool,
}

impl<'a> Grid<'a> {
    /// Expand the header (if any) and body rows of `table`.
    #[must_use]
    pub fn expand(table: &'a Table) -> Self {
        let options = table.settings();
        let has_header = table.header_row().is_some();
        let declared: Vec<&'a Row> = table.header_row().into_iter().chain(table.rows()).collect();

        let mut grid = Self {
            cells: Vec::new(),
            rows: Vec::new(),
            columns: 0,
            has_header,
        };

        // Rows still covered at each column, counting the current one.
        let mut row_span: Vec<usize> = Vec::new();
        let mut row_index = 0;
        while row_index < declared.len() || row_span.iter().any(|&span| span > 1) {
            let source = declared.get(row_index).copied();
            let defaults = RowDefaults {
                border: source.and_then(|row| row.border).unwrap_or(options.border),
                align: source.and_then(|row| row.align).unwrap_or(options.align),
                is_header: has_header && row_index == 0,
            };
            let mut pending = source.map_or(&[][..], |row| row.cells()).iter();

            let mut row = GridRow {
                slots: Vec::new(),
                border: defaults.border,
            };
            let mut col_span = 1;
            // Id and column of the last cell started in this row.
            let mut origin = (0, 0);
            let mut col = 0;
            loop {
                if pending.as_slice().is_empty() && col == row_span.len() && col_span == 1 {
                    break;
                }

                let above = row_span
                    .get(col)
                    .filter(|&&span| span > 1)
                    .and_then(|_| grid.rows.last())
                    .and_then(|prev| prev.slots.get(col))
                    .copied();

                if let Some(above) = above {
                    if col_span > 1 {
                        // The row span claimed this slot first.
                        let (id, start) = origin;
                        grid.cells[id].col_span = col - start;
                        col_span = 1;
                        warn!(
                            row = row_index,
                            column = col,
                            "column span cut short by a row span"
                        );
                    }
                    row_span[col] -= 1;
                    row.slots.push(Slot::Continuation(above.id()));
                } else if col_span > 1 {
                    col_span -= 1;
                    let left = row.slots[col - 1].id();
                    let carried = row_span[col - 1];
                    set_span(&mut row_span, col, carried);
                    row.slots.push(Slot::Continuation(left));
                } else {
                    let id = grid.push_cell(pending.next(), col, defaults, table);
                    col_span = grid.cells[id].col_span;
                    set_span(&mut row_span, col, grid.cells[id].row_span);
                    row.slots.push(Slot::Origin(id));
                    origin = (id, col);
                }
                col += 1;
            }

            grid.columns = grid.columns.max(row.slots.len());
            grid.rows.push(row);
            row_index += 1;
        }

        // Pad short rows with empty cells.
        let columns = grid.columns;
        for row_index in 0..grid.rows.len() {
            let defaults = RowDefaults {
                border: grid.rows[row_index].border,
                align: declared
                    .get(row_index)
                    .and_then(|row| row.align)
                    .unwrap_or(options.align),
                is_header: has_header && row_index == 0,
            };
            for col in grid.rows[row_index].slots.len()..columns {
                let id = grid.push_cell(None, col, defaults, table);
                grid.rows[row_index].slots.push(Slot::Origin(id));
            }
        }

        grid
    }

    fn push_cell(
        &mut self,
        cell: Option<&'a Cell>,
        col: usize,
        defaults: RowDefaults,
        table: &Table,
    ) -> CellId {
        let column = if defaults.is_header {
            None
        } else {
            table.settings().column(col)
        };
        let border = cell
            .and_then(|c| c.border)
            .or_else(|| column.and_then(|c| c.border))
            .unwrap_or(defaults.border);
        let align = cell
            .and_then(|c| c.align)
            .or_else(|| column.and_then(|c| c.align))
            .unwrap_or(defaults.align);
        let (col_span, row_span) = cell.map_or((1, 1), Cell::spans);

        self.cells.push(ResolvedCell {
            content: cell.map_or("", Cell::content),
            col_span,
            row_span,
            border,
            align,
        });
        self.cells.len() - 1
    }

    /// Number of columns; every row has exactly this many slots.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows, header included.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Slot at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    #[must_use]
    pub fn slot(&self, row: usize, col: usize) -> Slot {
        self.rows[row].slots[col]
    }

    /// Every slot of `row`, left to right.
    pub fn row_slots(&self, row: usize) -> impl Iterator<Item = Slot> + '_ {
        (0..self.columns).map(move |col| self.slot(row, col))
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> &ResolvedCell<'a> {
        &self.cells[id]
    }

    /// Cell occupying `(row, col)`.
    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> &ResolvedCell<'a> {
        &self.cells[self.rows[row].slots[col].id()]
    }

    /// All resolved cells, indexed by [`CellId`].
    #[must_use]
    pub fn cells(&self) -> &[ResolvedCell<'a>] {
        &self.cells
    }

    /// Whether `row` draws a border: its own default or any cell in it.
    #[must_use]
    pub fn row_has_border(&self, row: usize) -> bool {
        let grid_row = &self.rows[row];
        grid_row.border || grid_row.slots.iter().any(|slot| self.cells[slot.id()].border)
    }
}

fn set_span(row_span: &mut Vec<usize>, col: usize, span: usize) {
    if col < row_span.len() {
        row_span[col] = span;
    } else {
        row_span.resize(col, 1);
        row_span.push(span);
    }
}
