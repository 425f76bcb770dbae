#![forbid(unsafe_code)]

//! Horizontal alignment.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Horizontal alignment of content inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Align {
    /// Content first, padding after.
    #[default]
    Left,
    /// Padding split around the content, the extra space going right.
    Center,
    /// Padding first, content after.
    Right,
}

impl Align {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Error returned when an alignment name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlignError {
    value: String,
}

impl ParseAlignError {
    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseAlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown alignment `{}` (expected left, center or right)",
            self.value
        )
    }
}

impl std::error::Error for ParseAlignError {}

impl FromStr for Align {
    type Err = ParseAlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(ParseAlignError {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Align {
    type Error = ParseAlignError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("left".parse::<Align>(), Ok(Align::Left));
        assert_eq!("center".parse::<Align>(), Ok(Align::Center));
        assert_eq!("right".parse::<Align>(), Ok(Align::Right));
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "middle".parse::<Align>().unwrap_err();
        assert_eq!(err.value(), "middle");
        assert!(err.to_string().contains("middle"));
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Left".parse::<Align>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for align in [Align::Left, Align::Center, Align::Right] {
            assert_eq!(align.to_string().parse::<Align>(), Ok(align));
        }
    }

    #[test]
    fn default_is_left() {
        assert_eq!(Align::default(), Align::Left);
    }

    #[test]
    fn deserialize_rejects_unknown() {
        let ok: Align = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(ok, Align::Right);
        let err = serde_json::from_str::<Align>("\"justify\"").unwrap_err();
        assert!(err.to_string().contains("justify"));
    }
}
