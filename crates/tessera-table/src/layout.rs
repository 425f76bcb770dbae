#![forbid(unsafe_code)]

//! Layout driver.
//!
//! Rendering walks the expanded grid row by row:
//!
//! 1. the top border, above the first row when that row has a border;
//! 2. one content line per row, plus continuation lines while a cell ending
//!    in that row still has content left (borders are not repeated and row
//!    spans do not advance on continuation lines);
//! 3. the header separator, a body separator, or the bottom border.
//!
//! A row-spanning cell keeps rendering its content on the separator lines it
//! crosses. What remains of each cell's content, and the escape sequences to
//! re-open on its next line, live in a [`CellCursor`] per cell, so the table
//! itself is never touched.

use tessera_style::BorderRole;
use tessera_text::{align_to_width, fit_line};
use tracing::field::Empty;
use tracing::{debug, debug_span};

use crate::error::LayoutError;
use crate::grid::{CellId, Grid};
use crate::junction::{Intersection, Junction, Neighbor, closing_junction, fill, junction};
use crate::sizing::ColumnMetrics;
use crate::table::{Table, TableOptions};

/// Derived settings for one render.
#[derive(Debug, Clone)]
pub(crate) struct RenderSettings<'a> {
    pub grid: Grid<'a>,
    pub metrics: ColumnMetrics,
    pub has_border: bool,
    pub has_header_border: bool,
    pub has_body_border: bool,
}

impl<'a> RenderSettings<'a> {
    pub fn new(table: &'a Table) -> Self {
        let grid = Grid::expand(table);
        let body_start = usize::from(grid.has_header());
        let has_header_border = grid.has_header() && grid.row_count() > 0 && grid.row_has_border(0);
        let has_body_border = (body_start..grid.row_count()).any(|row| grid.row_has_border(row));
        let has_border = has_header_border || has_body_border;
        let metrics = ColumnMetrics::compute(&grid, table.settings(), has_border);
        Self {
            grid,
            metrics,
            has_border,
            has_header_border,
            has_body_border,
        }
    }
}

/// Unrendered content of one cell.
#[derive(Debug, Clone)]
struct CellCursor<'a> {
    rest: &'a str,
    carry: String,
}

struct Renderer<'t, 'a> {
    options: &'t TableOptions,
    settings: &'t RenderSettings<'a>,
    cursors: Vec<CellCursor<'a>>,
    indent: String,
}

/// Render `table` to a string.
pub(crate) fn render(table: &Table) -> Result<String, LayoutError> {
    let span = debug_span!("table_render", rows = Empty, columns = Empty).entered();
    let settings = RenderSettings::new(table);
    span.record("rows", settings.grid.row_count());
    span.record("columns", settings.grid.columns());

    if settings.grid.row_count() == 0 {
        return Ok(String::new());
    }

    let options = table.settings();
    let mut renderer = Renderer {
        options,
        settings: &settings,
        cursors: settings
            .grid
            .cells()
            .iter()
            .map(|cell| CellCursor {
                rest: cell.content,
                carry: String::new(),
            })
            .collect(),
        indent: " ".repeat(options.indent),
    };

    let mut out = String::new();
    let mut row_span = vec![1; settings.grid.columns()];
    for row in 0..settings.grid.row_count() {
        renderer.render_row(&mut out, &mut row_span, row)?;
    }
    if out.ends_with('\n') {
        out.pop();
    }

    debug!(
        has_border = settings.has_border,
        bytes = out.len(),
        "table rendered"
    );
    Ok(out)
}

impl<'a> Renderer<'_, 'a> {
    fn grid(&self) -> &Grid<'a> {
        &self.settings.grid
    }

    fn columns(&self) -> usize {
        self.settings.grid.columns()
    }

    /// Render row `row` and the border below it.
    ///
    /// `row_span[col]` holds how many rows, counting the current one, the cell
    /// at `col` still covers.
    fn render_row(
        &mut self,
        out: &mut String,
        row_span: &mut [usize],
        row: usize,
    ) -> Result<(), LayoutError> {
        let rows = self.grid().row_count();
        let columns = self.columns();
        let mut continuation = false;

        loop {
            if !continuation && row == 0 && self.grid().row_has_border(0) {
                self.render_border_row(out, None, Some(0), row_span, row)?;
            }

            out.push_str(&self.indent);
            let mut unfinished = false;
            let mut col_span = 1;
            for col in 0..columns {
                if col_span > 1 {
                    col_span -= 1;
                    row_span[col] = row_span[col - 1];
                    continue;
                }

                self.render_cell(out, row, col, true);

                let id = self.grid().slot(row, col).id();
                let cell = self.grid().cell(id);
                if row_span[col] > 1 {
                    if !continuation {
                        row_span[col] -= 1;
                    }
                } else if row == 0 || self.grid().slot(row - 1, col).id() != id {
                    row_span[col] = cell.row_span;
                }
                col_span = cell.col_span;

                if row_span[col] == 1 && !self.cursors[id].rest.is_empty() {
                    unfinished = true;
                }
            }

            if columns > 0 {
                if self.grid().cell_at(row, columns - 1).border {
                    out.push_str(&self.options.chars.right);
                } else if self.settings.has_border {
                    out.push(' ');
                }
            }
            out.push('\n');

            if unfinished {
                continuation = true;
                continue;
            }

            let separator = (row == 0 && self.settings.has_header_border)
                || (row + 1 < rows && self.settings.has_body_border);
            if rows > 1 && separator {
                self.render_border_row(out, Some(row), Some(row + 1), row_span, row)?;
            }

            if row + 1 == rows && self.grid().row_has_border(row) {
                self.render_border_row(out, Some(row), None, row_span, row)?;
            }
            return Ok(());
        }
    }

    /// Render the next line of the cell at `(row, col)`: left separator (when
    /// `with_border`), padding, aligned content and the right padding of the
    /// last column the cell covers.
    fn render_cell(&mut self, out: &mut String, row: usize, col: usize, with_border: bool) {
        let settings = self.settings;
        let options = self.options;
        let grid = &settings.grid;
        let columns = grid.columns();
        let id = grid.slot(row, col).id();
        let cell = grid.cell(id);

        if with_border {
            let draws = if col == 0 {
                cell.border
            } else {
                cell.border || grid.cell_at(row, col - 1).border
            };
            let glyph = if col == 0 {
                &options.chars.left
            } else {
                &options.chars.middle
            };
            if draws {
                out.push_str(glyph);
            } else if settings.has_border {
                out.push(' ');
            }
        }

        let width = settings
            .metrics
            .span_width(col, cell.col_span, settings.has_border);
        let cursor = &mut self.cursors[id];
        let step = fit_line(cursor.rest, &cursor.carry, width);
        cursor.rest = step.rest;
        cursor.carry = step.carry;

        let end = settings.metrics.span_end(col, cell.col_span);
        if settings.has_border {
            push_spaces(out, settings.metrics.padding[col]);
        }
        out.push_str(&align_to_width(&step.line, width, cell.align));
        if settings.has_border || end + 1 < columns {
            push_spaces(out, settings.metrics.padding[end]);
        }
    }

    /// Render the separator between `prev` and `next` (either may be absent
    /// for the outer edges).
    fn render_border_row(
        &mut self,
        out: &mut String,
        prev: Option<usize>,
        next: Option<usize>,
        row_span: &[usize],
        row: usize,
    ) -> Result<(), LayoutError> {
        let mut line = String::new();
        let mut col_span = 1;
        for col in 0..self.columns() {
            if row_span[col] > 1 {
                if next.is_none() {
                    return Err(LayoutError::InvalidLayout { row, column: col });
                }
                if col_span > 1 {
                    col_span -= 1;
                    continue;
                }
            }
            self.render_border_cell(&mut line, col, prev, next, row_span);
            // Only the leftmost slot of a cell restarts the count.
            col_span = match next {
                Some(next) if self.starts_cell(next, col) => {
                    self.grid().cell_at(next, col).col_span
                }
                Some(_) => col_span.saturating_sub(1).max(1),
                None => 1,
            };
        }

        if !line.is_empty() {
            out.push_str(&self.indent);
            out.push_str(&line);
            out.push('\n');
        }
        Ok(())
    }

    fn starts_cell(&self, row: usize, col: usize) -> bool {
        col == 0 || self.grid().slot(row, col - 1).id() != self.grid().slot(row, col).id()
    }

    fn neighbor(&self, row: Option<usize>, col: Option<usize>) -> Option<Neighbor> {
        let (row, col) = (row?, col?);
        let id: CellId = self.grid().slot(row, col).id();
        let cell = self.grid().cell(id);
        Some(Neighbor {
            id,
            border: cell.border,
            col_span: cell.col_span,
            row_span: cell.row_span,
        })
    }

    /// Junction left of `col` plus the segment above/below the cell at `col`.
    fn render_border_cell(
        &mut self,
        line: &mut String,
        col: usize,
        prev: Option<usize>,
        next: Option<usize>,
        row_span: &[usize],
    ) {
        let settings = self.settings;
        let options = self.options;
        let chars = &options.chars;
        let columns = self.columns();
        let spanning_down = row_span[col] > 1;
        let x = Intersection {
            a1: self.neighbor(prev, col.checked_sub(1)),
            b1: self.neighbor(prev, Some(col)),
            a2: self.neighbor(next, col.checked_sub(1)),
            b2: self.neighbor(next, Some(col)),
            spanning_down,
        };
        junction(&x, col == 0).push_to(line, chars);

        match next {
            Some(next) if spanning_down => {
                self.render_cell(line, next, col, false);
                // A span reaching the right edge closes the line itself.
                let grid = &settings.grid;
                if grid.slot(next, col).id() == grid.slot(next, columns - 1).id() {
                    let closing = if x.b1.is_some_and(|c| c.border) {
                        Junction::Glyph(BorderRole::Right)
                    } else {
                        Junction::Space
                    };
                    closing.push_to(line, chars);
                    return;
                }
            }
            _ => {
                let length = 2 * settings.metrics.padding[col] + settings.metrics.width[col];
                fill(&x).push_repeated(line, chars, length);
            }
        }

        if col + 1 == columns {
            closing_junction(x.b1.as_ref(), x.b2.as_ref()).push_to(line, chars);
        }
    }
}

fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(' ', count));
}
