#![forbid(unsafe_code)]

//! Visible width measurement.
//!
//! Widths are counted in terminal cells: escape sequences and control
//! characters take no space, CJK and most emoji take two cells, and grapheme
//! clusters (ZWJ sequences, combining marks) are measured as a unit.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::ansi::{AnsiPiece, AnsiPieces, has_ansi};

/// Width of a single grapheme cluster in cells.
#[inline]
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.chars().all(char::is_control) {
        0
    } else {
        grapheme.width()
    }
}

/// Width of text that contains no escape sequences.
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.is_ascii() {
        return ascii_width(text);
    }
    text.graphemes(true).map(grapheme_width).sum()
}

/// Width of ASCII text: printable bytes count one cell each.
#[inline]
#[must_use]
pub fn ascii_width(text: &str) -> usize {
    text.bytes().filter(|b| !b.is_ascii_control()).count()
}

/// Width of text once escape sequences are excluded.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    if !has_ansi(text) {
        return display_width(text);
    }
    AnsiPieces::new(text)
        .map(|piece| match piece {
            AnsiPiece::Text(run) => display_width(run),
            AnsiPiece::Escape(_) => 0,
        })
        .sum()
}

/// Widest grapheme cluster in the visible text (0 for empty text).
#[must_use]
pub fn widest_grapheme(text: &str) -> usize {
    AnsiPieces::new(text)
        .filter_map(|piece| match piece {
            AnsiPiece::Text(run) => run.graphemes(true).map(grapheme_width).max(),
            AnsiPiece::Escape(_) => None,
        })
        .max()
        .unwrap_or(0)
}

/// Check if the visible text contains any wide (2-cell) grapheme.
#[must_use]
pub fn has_wide_chars(text: &str) -> bool {
    widest_grapheme(text) > 1
}
