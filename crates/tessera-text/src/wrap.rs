#![forbid(unsafe_code)]

//! Line fitting for table cells.
//!
//! A cell is rendered one physical line at a time. Each step takes the
//! longest prefix of the remaining content that fits the column: whole words
//! when possible ([`consume_words`]), a hard grapheme break when a single word
//! is wider than the column ([`consume_chars`]).
//!
//! Widths are visible widths: escape sequences are kept in the output but cost
//! nothing. When a line is cut while an SGR style is active, [`fit_line`]
//! closes the style at the end of the line and hands back a `carry` that
//! re-opens it on the next one.
//!
//! # Example
//! ```
//! use tessera_text::wrap::{fit_line, wrap_text};
//!
//! let step = fit_line("hello world", "", 7);
//! assert_eq!(step.line, "hello");
//! assert_eq!(step.rest, "world");
//!
//! assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
//! ```

use tessera_style::Align;
use unicode_segmentation::UnicodeSegmentation;

use crate::ansi::{AnsiPiece, AnsiPieces, SgrState};
use crate::width::{display_width, grapheme_width, visible_width};

/// Default word boundary.
pub const WORD_BOUNDARY: char = ' ';

/// Text up to (excluding) the first newline.
#[inline]
fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}

/// Longest prefix of the first line made of whole space-separated words that
/// fits `budget` cells.
///
/// The first non-empty word is always taken, even when it alone is wider than
/// the budget; callers detect that case by measuring the result.
#[must_use]
pub fn consume_words(budget: usize, text: &str) -> &str {
    consume_words_by(budget, text, WORD_BOUNDARY)
}

/// [`consume_words`] with a custom word boundary.
#[must_use]
pub fn consume_words_by(budget: usize, text: &str, boundary: char) -> &str {
    let line = first_line(text);
    let mut buf = [0u8; 4];
    let boundary_width = display_width(boundary.encode_utf8(&mut buf));

    let mut end = 0;
    let mut consumed_width = 0;
    for (index, word) in line.split(boundary).enumerate() {
        let word_width = visible_width(word);
        // The joining boundary makes `consumed + word == budget` overflow.
        if end > 0 && consumed_width + word_width >= budget {
            break;
        }
        if index > 0 {
            end += boundary.len_utf8();
            consumed_width += boundary_width;
        }
        end += word.len();
        consumed_width += word_width;
    }
    &line[..end]
}

/// Prefix of the first line holding at most `budget` visible cells, cut at any
/// grapheme boundary.
///
/// Escape sequences are free and stay attached to the prefix. A non-empty line
/// always yields at least one grapheme so repeated consumption terminates.
#[must_use]
pub fn consume_chars(budget: usize, text: &str) -> &str {
    let line = first_line(text);
    let mut end = 0;
    let mut width = 0;
    let mut taken = false;
    for piece in AnsiPieces::new(line) {
        match piece {
            AnsiPiece::Escape(escape) => end += escape.len(),
            AnsiPiece::Text(run) => {
                for grapheme in run.graphemes(true) {
                    let grapheme_width = grapheme_width(grapheme);
                    if taken && width + grapheme_width > budget {
                        return &line[..end];
                    }
                    end += grapheme.len();
                    width += grapheme_width;
                    taken = true;
                }
            }
        }
    }
    line
}

/// One fitted physical line of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedLine<'a> {
    /// Content of this line, styles closed, without alignment padding.
    pub line: String,
    /// Content left for the following lines.
    pub rest: &'a str,
    /// Escape sequences to put in front of `rest` on the next line.
    pub carry: String,
}

impl FittedLine<'_> {
    /// Nothing is left to render.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.rest.is_empty()
    }
}

/// Fit the head of `text` into `budget` cells.
///
/// `carry` is the value returned by the previous step for the same content
/// (empty on the first line).
#[must_use]
pub fn fit_line<'a>(text: &'a str, carry: &str, budget: usize) -> FittedLine<'a> {
    let len = budget.min(visible_width(text));
    let mut words = consume_words(len, text);

    let break_word = visible_width(words) > len;
    if break_word {
        words = consume_chars(len, words);
    }

    // A word break also swallows the separating space or newline.
    let skip = usize::from(!break_word);
    let rest = text.get(words.len() + skip..).unwrap_or("");

    let mut line = String::with_capacity(carry.len() + words.len());
    line.push_str(carry);
    line.push_str(words);

    let mut state = SgrState::new();
    state.feed_text(&line);
    line.push_str(&state.closing_sequence());

    let carry = if rest.is_empty() {
        String::new()
    } else {
        state.opening_sequence()
    };

    FittedLine { line, rest, carry }
}

/// Wrap text into lines of at most `width` cells.
///
/// Convenience over repeated [`fit_line`] calls; always returns at least one
/// line.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    let mut carry = String::new();
    loop {
        let step = fit_line(rest, &carry, width);
        lines.push(step.line);
        if step.rest.is_empty() {
            break;
        }
        rest = step.rest;
        carry = step.carry;
    }
    lines
}

/// Pad `line` with spaces to `width` cells according to `align`.
///
/// Centered content puts the odd space on the right. Lines already at or over
/// `width` are returned unchanged.
#[must_use]
pub fn align_to_width(line: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(visible_width(line));
    if fill == 0 {
        return line.to_string();
    }
    let (left, right) = match align {
        Align::Left => (0, fill),
        Align::Right => (fill, 0),
        Align::Center => (fill / 2, fill - fill / 2),
    };
    let mut out = String::with_capacity(line.len() + fill);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(line);
    out.extend(std::iter::repeat_n(' ', right));
    out
}
