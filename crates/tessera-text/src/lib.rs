#![forbid(unsafe_code)]

//! Text handling for Tessera tables.
//!
//! - [`visible_width`] - cell width of text with escape sequences excluded
//! - [`ansi`] - escape sequence scanning and SGR state tracking
//! - [`wrap`] - word/character consumption and per-line fitting
//! - [`WidthCache`] - LRU cache for width measurements
//!
//! # Example
//! ```
//! use tessera_text::{fit_line, visible_width, align_to_width};
//! use tessera_style::Align;
//!
//! assert_eq!(visible_width("\x1b[32mok\x1b[0m"), 2);
//!
//! let step = fit_line("status: all good", "", 8);
//! assert_eq!(step.line, "status:");
//! assert_eq!(step.rest, "all good");
//!
//! assert_eq!(align_to_width("ok", 6, Align::Center), "  ok  ");
//! ```

pub mod ansi;
pub mod width;
pub mod width_cache;
pub mod wrap;

pub use ansi::{AnsiPiece, AnsiPieces, SgrState, has_ansi, strip_ansi};
pub use width::{
    ascii_width, display_width, grapheme_width, has_wide_chars, visible_width, widest_grapheme,
};
pub use width_cache::{CacheStats, DEFAULT_CACHE_CAPACITY, WidthCache};
pub use wrap::{
    FittedLine, WORD_BOUNDARY, align_to_width, consume_chars, consume_words, consume_words_by,
    fit_line, wrap_text,
};
