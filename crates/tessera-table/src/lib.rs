#![forbid(unsafe_code)]

//! Span-aware text tables.
//!
//! A [`Table`] holds an optional header and body [`Row`]s of [`Cell`]s.
//! Cells may span several columns and rows, carry their own border and
//! alignment, and contain ANSI-styled text. [`Table::render`] lays the table
//! out and draws it with the configured [`BorderChars`](tessera_style::BorderChars).
//!
//! # Pipeline
//!
//! - [`grid`] expands spans into a dense grid of [`Slot`]s
//! - [`sizing`] resolves column widths and padding
//! - [`junction`] picks the glyph at every border intersection
//! - `layout` renders rows, wrapping cell content line by line
//!
//! # Example
//! ```
//! use tessera_table::{Cell, Row, Table};
//!
//! let table = Table::new([
//!     Row::new([Cell::new("merged").col_span(2)]),
//!     Row::new(["left", "right"]),
//! ])
//! .border(true);
//!
//! assert_eq!(
//!     table.render().unwrap(),
//!     "┌──────────────┐\n\
//!      │ merged       │\n\
//!      ├──────┬───────┤\n\
//!      │ left │ right │\n\
//!      └──────┴───────┘"
//! );
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod grid;
pub mod junction;
mod layout;
pub mod row;
pub mod sizing;
pub mod spec;
pub mod table;

pub use cell::Cell;
pub use column::Column;
pub use error::{LayoutError, SpecError};
pub use grid::{CellId, Grid, ResolvedCell, Slot};
pub use junction::{Intersection, Junction, Neighbor, NeighborBorders, closing_junction, junction};
pub use row::Row;
pub use sizing::ColumnMetrics;
pub use spec::{CellOptions, CellSpec, TableSpec};
pub use table::{DEFAULT_PADDING, PerColumn, Table, TableOptions};
