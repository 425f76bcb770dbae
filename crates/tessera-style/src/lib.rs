#![forbid(unsafe_code)]

//! Style primitives for Tessera tables.
//!
//! - [`Align`] - horizontal alignment of cell content
//! - [`BorderRole`] - the named line and junction positions of a table grid
//! - [`BorderChars`] - a glyph for every [`BorderRole`], with presets
//!
//! # Example
//! ```
//! use tessera_style::{Align, BorderChars, BorderRole};
//!
//! let align: Align = "center".parse().unwrap();
//! assert_eq!(align, Align::Center);
//!
//! let chars = BorderChars::ROUNDED;
//! assert_eq!(chars.glyph(BorderRole::TopLeft), "╭");
//! ```

pub mod align;
pub mod border;

pub use align::{Align, ParseAlignError};
pub use border::{BorderChars, BorderRole};
