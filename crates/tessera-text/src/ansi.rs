#![forbid(unsafe_code)]

//! ANSI escape sequence scanning.
//!
//! Cell content may carry styling escapes. They occupy no columns, so every
//! width computation walks the text through [`AnsiPieces`], which splits it
//! into escape sequences and plain text runs.
//!
//! [`SgrState`] follows SGR (Select Graphic Rendition) sequences so a line
//! that is cut while a style is still active can be closed with the matching
//! "off" codes and the style re-opened on the following line.
//!
//! ```
//! use tessera_text::ansi::{strip_ansi, SgrState};
//!
//! assert_eq!(strip_ansi("\x1b[1mbold\x1b[22m text"), "bold text");
//!
//! let mut state = SgrState::new();
//! state.feed_text("\x1b[1;31mred bold");
//! assert_eq!(state.closing_sequence(), "\x1b[39;22m");
//! assert_eq!(state.opening_sequence(), "\x1b[1m\x1b[31m");
//! ```

use std::borrow::Cow;

use memchr::memchr;
use smallvec::SmallVec;

const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;

/// A piece of ANSI-styled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiPiece<'a> {
    /// A complete (or truncated, at end of input) escape sequence.
    Escape(&'a str),
    /// A run of text without escape sequences.
    Text(&'a str),
}

/// Iterator splitting text into escape sequences and text runs.
#[derive(Debug, Clone)]
pub struct AnsiPieces<'a> {
    rest: &'a str,
}

impl<'a> AnsiPieces<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for AnsiPieces<'a> {
    type Item = AnsiPiece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let bytes = self.rest.as_bytes();
        if bytes[0] == ESC {
            let (escape, tail) = self.rest.split_at(escape_len(bytes));
            self.rest = tail;
            return Some(AnsiPiece::Escape(escape));
        }
        let end = memchr(ESC, bytes).unwrap_or(bytes.len());
        let (text, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(AnsiPiece::Text(text))
    }
}

/// Byte length of the escape sequence at the start of `bytes`.
///
/// Every sequence ends on an ASCII byte (or at end of input), so the
/// returned length is always a char boundary.
fn escape_len(bytes: &[u8]) -> usize {
    debug_assert_eq!(bytes.first(), Some(&ESC));
    match bytes.get(1) {
        None => 1,
        // CSI: parameters and intermediates up to a final byte in 0x40..=0x7E
        Some(b'[') => bytes[2..]
            .iter()
            .position(|b| (0x40..=0x7E).contains(b))
            .map_or(bytes.len(), |pos| pos + 3),
        // OSC / DCS / APC / PM: string terminated by BEL or ST (ESC \)
        Some(b']' | b'P' | b'_' | b'^') => {
            let mut i = 2;
            while i < bytes.len() {
                if bytes[i] == BEL {
                    return i + 1;
                }
                if bytes[i] == ESC && bytes.get(i + 1) == Some(&b'\\') {
                    return i + 2;
                }
                i += 1;
            }
            bytes.len()
        }
        Some(b) if b.is_ascii() => 2,
        Some(_) => 1,
    }
}

/// Check whether text contains any escape byte.
#[inline]
#[must_use]
pub fn has_ansi(text: &str) -> bool {
    memchr(ESC, text.as_bytes()).is_some()
}

/// Remove all escape sequences, keeping the visible text.
///
/// Returns the input borrowed when it contains no escapes.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !has_ansi(text) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for piece in AnsiPieces::new(text) {
        if let AnsiPiece::Text(run) = piece {
            out.push_str(run);
        }
    }
    Cow::Owned(out)
}

/// Attribute group of an SGR code; codes in one group share an "off" code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SgrSlot {
    Intensity,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,
    Strike,
    Foreground,
    Background,
}

impl SgrSlot {
    const fn off(self) -> u8 {
        match self {
            Self::Intensity => 22,
            Self::Italic => 23,
            Self::Underline => 24,
            Self::Blink => 25,
            Self::Reverse => 27,
            Self::Hidden => 28,
            Self::Strike => 29,
            Self::Foreground => 39,
            Self::Background => 49,
        }
    }

    /// Colors replace each other; other attributes accumulate.
    const fn exclusive(self) -> bool {
        matches!(self, Self::Foreground | Self::Background)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SgrRun {
    slot: SgrSlot,
    params: String,
}

/// Currently active SGR attributes, in the order they were opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SgrState {
    open: SmallVec<[SgrRun; 4]>,
}

impl SgrState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No attribute is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Apply every SGR sequence found in `text`.
    pub fn feed_text(&mut self, text: &str) {
        if !has_ansi(text) {
            return;
        }
        for piece in AnsiPieces::new(text) {
            if let AnsiPiece::Escape(escape) = piece {
                self.feed(escape);
            }
        }
    }

    /// Apply a single escape sequence. Non-SGR sequences are ignored.
    pub fn feed(&mut self, escape: &str) {
        let Some(params) = escape
            .strip_prefix("\x1b[")
            .and_then(|rest| rest.strip_suffix('m'))
        else {
            return;
        };
        if params.is_empty() {
            self.open.clear();
            return;
        }

        let codes: SmallVec<[&str; 8]> = params.split(';').collect();
        let mut i = 0;
        while i < codes.len() {
            let code = codes[i].parse::<u16>().unwrap_or(0);
            i += 1;
            match code {
                0 => self.open.clear(),
                1 | 2 => self.open_run(SgrSlot::Intensity, code.to_string()),
                3 => self.open_run(SgrSlot::Italic, code.to_string()),
                4 | 21 => self.open_run(SgrSlot::Underline, code.to_string()),
                5 | 6 => self.open_run(SgrSlot::Blink, code.to_string()),
                7 => self.open_run(SgrSlot::Reverse, code.to_string()),
                8 => self.open_run(SgrSlot::Hidden, code.to_string()),
                9 => self.open_run(SgrSlot::Strike, code.to_string()),
                22 => self.close(SgrSlot::Intensity),
                23 => self.close(SgrSlot::Italic),
                24 => self.close(SgrSlot::Underline),
                25 => self.close(SgrSlot::Blink),
                27 => self.close(SgrSlot::Reverse),
                28 => self.close(SgrSlot::Hidden),
                29 => self.close(SgrSlot::Strike),
                39 => self.close(SgrSlot::Foreground),
                49 => self.close(SgrSlot::Background),
                30..=37 | 90..=97 => self.open_run(SgrSlot::Foreground, code.to_string()),
                40..=47 | 100..=107 => self.open_run(SgrSlot::Background, code.to_string()),
                38 | 48 => {
                    // 38;5;n or 38;2;r;g;b
                    let extra = match codes.get(i).copied() {
                        Some("5") => 2,
                        Some("2") => 4,
                        _ => 0,
                    };
                    let end = (i + extra).min(codes.len());
                    let mut params = code.to_string();
                    for part in &codes[i..end] {
                        params.push(';');
                        params.push_str(part);
                    }
                    i = end;
                    let slot = if code == 38 {
                        SgrSlot::Foreground
                    } else {
                        SgrSlot::Background
                    };
                    self.open_run(slot, params);
                }
                _ => {}
            }
        }
    }

    fn open_run(&mut self, slot: SgrSlot, params: String) {
        if slot.exclusive() {
            self.close(slot);
        } else if self
            .open
            .iter()
            .any(|run| run.slot == slot && run.params == params)
        {
            return;
        }
        self.open.push(SgrRun { slot, params });
    }

    fn close(&mut self, slot: SgrSlot) {
        self.open.retain(|run| run.slot != slot);
    }

    /// Sequence that turns every active attribute off, most recent first.
    ///
    /// Empty when nothing is active.
    #[must_use]
    pub fn closing_sequence(&self) -> String {
        let mut offs: SmallVec<[u8; 8]> = SmallVec::new();
        for run in self.open.iter().rev() {
            let off = run.slot.off();
            if !offs.contains(&off) {
                offs.push(off);
            }
        }
        if offs.is_empty() {
            return String::new();
        }
        let codes: Vec<String> = offs.iter().map(u8::to_string).collect();
        format!("\x1b[{}m", codes.join(";"))
    }

    /// Sequence that re-activates every active attribute, oldest first.
    #[must_use]
    pub fn opening_sequence(&self) -> String {
        let mut out = String::new();
        for run in &self.open {
            out.push_str("\x1b[");
            out.push_str(&run.params);
            out.push('m');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(text: &str) -> Vec<AnsiPiece<'_>> {
        AnsiPieces::new(text).collect()
    }

    #[test]
    fn plain_text_is_one_piece() {
        assert_eq!(pieces("hello"), vec![AnsiPiece::Text("hello")]);
    }

    #[test]
    fn empty_text_has_no_pieces() {
        assert!(pieces("").is_empty());
    }

    #[test]
    fn csi_sequences_are_split_out() {
        assert_eq!(
            pieces("a\x1b[31mb\x1b[0m"),
            vec![
                AnsiPiece::Text("a"),
                AnsiPiece::Escape("\x1b[31m"),
                AnsiPiece::Text("b"),
                AnsiPiece::Escape("\x1b[0m"),
            ]
        );
    }

    #[test]
    fn osc_hyperlink_is_one_escape() {
        let text = "\x1b]8;;https://example.com\x1b\\link\x1b]8;;\x07";
        assert_eq!(
            pieces(text),
            vec![
                AnsiPiece::Escape("\x1b]8;;https://example.com\x1b\\"),
                AnsiPiece::Text("link"),
                AnsiPiece::Escape("\x1b]8;;\x07"),
            ]
        );
    }

    #[test]
    fn truncated_csi_runs_to_end() {
        assert_eq!(
            pieces("x\x1b[31"),
            vec![AnsiPiece::Text("x"), AnsiPiece::Escape("\x1b[31")]
        );
    }

    #[test]
    fn lone_escape_before_multibyte_char() {
        assert_eq!(
            pieces("\x1bé"),
            vec![AnsiPiece::Escape("\x1b"), AnsiPiece::Text("é")]
        );
    }

    #[test]
    fn strip_borrows_plain_text() {
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn strip_removes_styles() {
        assert_eq!(strip_ansi("\x1b[1;4mhi\x1b[0m there"), "hi there");
    }

    #[test]
    fn sgr_reset_clears_state() {
        let mut state = SgrState::new();
        state.feed_text("\x1b[1m\x1b[31mx\x1b[0m");
        assert!(state.is_empty());
        assert_eq!(state.closing_sequence(), "");
    }

    #[test]
    fn empty_sgr_is_reset() {
        let mut state = SgrState::new();
        state.feed("\x1b[4m");
        state.feed("\x1b[m");
        assert!(state.is_empty());
    }

    #[test]
    fn off_code_closes_only_its_group() {
        let mut state = SgrState::new();
        state.feed_text("\x1b[1m\x1b[32mx\x1b[22m");
        assert_eq!(state.opening_sequence(), "\x1b[32m");
        assert_eq!(state.closing_sequence(), "\x1b[39m");
    }

    #[test]
    fn new_color_replaces_old() {
        let mut state = SgrState::new();
        state.feed_text("\x1b[31m\x1b[34m");
        assert_eq!(state.opening_sequence(), "\x1b[34m");
    }

    #[test]
    fn bold_and_dim_share_off_code() {
        let mut state = SgrState::new();
        state.feed_text("\x1b[1m\x1b[2m");
        assert_eq!(state.closing_sequence(), "\x1b[22m");
        assert_eq!(state.opening_sequence(), "\x1b[1m\x1b[2m");
    }

    #[test]
    fn extended_colors_keep_their_parameters() {
        let mut state = SgrState::new();
        state.feed("\x1b[38;5;208;48;2;1;2;3m");
        assert_eq!(state.opening_sequence(), "\x1b[38;5;208m\x1b[48;2;1;2;3m");
        assert_eq!(state.closing_sequence(), "\x1b[49;39m");
    }

    #[test]
    fn non_sgr_sequences_are_ignored() {
        let mut state = SgrState::new();
        state.feed("\x1b[2K");
        state.feed("\x1b]0;title\x07");
        assert!(state.is_empty());
    }

    #[test]
    fn repeated_attribute_is_not_duplicated() {
        let mut state = SgrState::new();
        state.feed_text("\x1b[1m\x1b[1m");
        assert_eq!(state.opening_sequence(), "\x1b[1m");
    }
}
