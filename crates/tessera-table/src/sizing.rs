#![forbid(unsafe_code)]

//! Column sizing.
//!
//! A column is as wide as its longest line among cells that span only that
//! column, clamped to the configured minimum and maximum.
//!
//! Cells spanning several columns do not size any column directly. When one
//! of them needs more room than the columns it covers provide, the columns
//! grow one cell at a time, round-robin, until the cell fits or every covered
//! column is at its maximum.

use tessera_text::{WidthCache, widest_grapheme};
use tracing::debug;

use crate::grid::Grid;
use crate::table::TableOptions;

/// Resolved width and padding of every column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnMetrics {
    /// Content width, padding excluded.
    pub width: Vec<usize>,
    /// Padding on each side of the content.
    pub padding: Vec<usize>,
}

impl ColumnMetrics {
    /// Size every column of `grid`.
    ///
    /// `has_border` accounts for the padding and separator that a span
    /// absorbs at each inner column boundary.
    #[must_use]
    pub fn compute(grid: &Grid<'_>, options: &TableOptions, has_border: bool) -> Self {
        let columns = grid.columns();
        let mut cache = WidthCache::default();
        let mut metrics = Self {
            width: Vec::with_capacity(columns),
            padding: Vec::with_capacity(columns),
        };

        for col in 0..columns {
            let min = options.min_width(col);
            let max = options.max_width(col);

            let mut longest = 0;
            let mut floor = 0;
            for row in 0..grid.row_count() {
                let cell = grid.cell_at(row, col);
                if cell.col_span > 1 {
                    continue;
                }
                for line in cell.content.split('\n') {
                    longest = longest.max(cache.get_or_compute(line));
                    floor = floor.max(widest_grapheme(line));
                }
            }

            // A column must hold its widest grapheme or wrapping stalls.
            metrics.width.push(max.min(min.max(longest)).max(floor));
            metrics.padding.push(options.padding(col));
        }

        metrics.backfill_spans(grid, options, has_border, &mut cache);

        debug!(
            widths = ?metrics.width,
            padding = ?metrics.padding,
            cache_hits = cache.stats().hits,
            "resolved column widths"
        );
        metrics
    }

    /// Content width available to a cell at `col` spanning `span` columns.
    ///
    /// Each extra column contributes its width and the right padding of the
    /// column before it, plus the separator glyph and its own left padding
    /// when the table has borders.
    #[must_use]
    pub fn span_width(&self, col: usize, span: usize, has_border: bool) -> usize {
        let end = (col + span).min(self.width.len());
        let mut width = self.width.get(col).copied().unwrap_or(0);
        for inner in col + 1..end {
            width += self.width[inner] + self.padding[inner - 1];
            if has_border {
                width += 1 + self.padding[inner];
            }
        }
        width
    }

    /// Last column covered by a cell at `col` spanning `span` columns.
    #[must_use]
    pub fn span_end(&self, col: usize, span: usize) -> usize {
        (col + span.max(1) - 1).min(self.width.len().saturating_sub(1))
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.width.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width.is_empty()
    }

    fn backfill_spans(
        &mut self,
        grid: &Grid<'_>,
        options: &TableOptions,
        has_border: bool,
        cache: &mut WidthCache,
    ) {
        for row in 0..grid.row_count() {
            for (col, slot) in grid.row_slots(row).enumerate() {
                let cell = grid.cell(slot.id());
                if !slot.is_origin() || cell.col_span < 2 {
                    continue;
                }
                let span = cell.col_span.min(self.len() - col);
                let needed = cell
                    .content
                    .split('\n')
                    .map(|line| cache.get_or_compute(line))
                    .max()
                    .unwrap_or(0);
                let capacity = self.span_width(col, span, has_border);
                if needed <= capacity {
                    continue;
                }

                let deficit = needed - capacity;
                let left = self.grow_round_robin(col..col + span, deficit, options);
                debug!(
                    row,
                    column = col,
                    span,
                    deficit,
                    unmet = left,
                    "widened columns for span"
                );
            }
        }
    }

    /// Grow the columns in `range` by up to `deficit` cells in total; returns
    /// what could not be placed.
    fn grow_round_robin(
        &mut self,
        range: std::ops::Range<usize>,
        mut deficit: usize,
        options: &TableOptions,
    ) -> usize {
        while deficit > 0 {
            let mut grew = false;
            for col in range.clone() {
                if deficit == 0 {
                    break;
                }
                if self.width[col] < options.max_width(col) {
                    self.width[col] += 1;
                    deficit -= 1;
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }
        deficit
    }
}
