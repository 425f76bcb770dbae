#![forbid(unsafe_code)]

//! Border glyph sets.
//!
//! A table border is drawn from fifteen named roles. Each role maps to a
//! glyph string; an empty string suppresses that class of border line.
//!
//! ```text
//! ┌──────┬──────┐   TopLeft  Top  TopMid  TopRight
//! │ cell │ cell │   Left  Middle  Right
//! ├──────┼──────┤   LeftMid  Mid  MidMid  RightMid
//! │ cell │ cell │
//! └──────┴──────┘   BottomLeft  Bottom  BottomMid  BottomRight
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};

/// Named position of a border glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderRole {
    Top,
    TopMid,
    TopLeft,
    TopRight,
    Bottom,
    BottomMid,
    BottomLeft,
    BottomRight,
    Left,
    LeftMid,
    Mid,
    MidMid,
    Right,
    RightMid,
    /// Vertical line between two cells of a content line.
    Middle,
}

impl BorderRole {
    /// Every role, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Top,
        Self::TopMid,
        Self::TopLeft,
        Self::TopRight,
        Self::Bottom,
        Self::BottomMid,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Left,
        Self::LeftMid,
        Self::Mid,
        Self::MidMid,
        Self::Right,
        Self::RightMid,
        Self::Middle,
    ];

    /// Configuration key of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopMid => "top_mid",
            Self::TopLeft => "top_left",
            Self::TopRight => "top_right",
            Self::Bottom => "bottom",
            Self::BottomMid => "bottom_mid",
            Self::BottomLeft => "bottom_left",
            Self::BottomRight => "bottom_right",
            Self::Left => "left",
            Self::LeftMid => "left_mid",
            Self::Mid => "mid",
            Self::MidMid => "mid_mid",
            Self::Right => "right",
            Self::RightMid => "right_mid",
            Self::Middle => "middle",
        }
    }
}

/// Glyphs for every [`BorderRole`].
///
/// Deserializes from a map of role keys (`top_left` or `topLeft`) to strings.
/// Missing keys keep the [`BorderChars::SINGLE`] glyph, values that are not
/// strings become the empty glyph, and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BorderChars {
    #[serde(deserialize_with = "lenient_glyph")]
    pub top: Cow<'static, str>,
    #[serde(alias = "topMid", deserialize_with = "lenient_glyph")]
    pub top_mid: Cow<'static, str>,
    #[serde(alias = "topLeft", deserialize_with = "lenient_glyph")]
    pub top_left: Cow<'static, str>,
    #[serde(alias = "topRight", deserialize_with = "lenient_glyph")]
    pub top_right: Cow<'static, str>,
    #[serde(deserialize_with = "lenient_glyph")]
    pub bottom: Cow<'static, str>,
    #[serde(alias = "bottomMid", deserialize_with = "lenient_glyph")]
    pub bottom_mid: Cow<'static, str>,
    #[serde(alias = "bottomLeft", deserialize_with = "lenient_glyph")]
    pub bottom_left: Cow<'static, str>,
    #[serde(alias = "bottomRight", deserialize_with = "lenient_glyph")]
    pub bottom_right: Cow<'static, str>,
    #[serde(deserialize_with = "lenient_glyph")]
    pub left: Cow<'static, str>,
    #[serde(alias = "leftMid", deserialize_with = "lenient_glyph")]
    pub left_mid: Cow<'static, str>,
    #[serde(deserialize_with = "lenient_glyph")]
    pub mid: Cow<'static, str>,
    #[serde(alias = "midMid", deserialize_with = "lenient_glyph")]
    pub mid_mid: Cow<'static, str>,
    #[serde(deserialize_with = "lenient_glyph")]
    pub right: Cow<'static, str>,
    #[serde(alias = "rightMid", deserialize_with = "lenient_glyph")]
    pub right_mid: Cow<'static, str>,
    #[serde(deserialize_with = "lenient_glyph")]
    pub middle: Cow<'static, str>,
}

macro_rules! border_set {
    (
        $top:literal $top_mid:literal $top_left:literal $top_right:literal
        $bottom:literal $bottom_mid:literal $bottom_left:literal $bottom_right:literal
        $left:literal $left_mid:literal $mid:literal $mid_mid:literal
        $right:literal $right_mid:literal $middle:literal
    ) => {
        BorderChars {
            top: Cow::Borrowed($top),
            top_mid: Cow::Borrowed($top_mid),
            top_left: Cow::Borrowed($top_left),
            top_right: Cow::Borrowed($top_right),
            bottom: Cow::Borrowed($bottom),
            bottom_mid: Cow::Borrowed($bottom_mid),
            bottom_left: Cow::Borrowed($bottom_left),
            bottom_right: Cow::Borrowed($bottom_right),
            left: Cow::Borrowed($left),
            left_mid: Cow::Borrowed($left_mid),
            mid: Cow::Borrowed($mid),
            mid_mid: Cow::Borrowed($mid_mid),
            right: Cow::Borrowed($right),
            right_mid: Cow::Borrowed($right_mid),
            middle: Cow::Borrowed($middle),
        }
    };
}

impl BorderChars {
    /// Single-line box drawing (U+250x). The default.
    pub const SINGLE: Self = border_set!(
        "─" "┬" "┌" "┐"
        "─" "┴" "└" "┘"
        "│" "├" "─" "┼"
        "│" "┤" "│"
    );

    /// Single lines with rounded outer corners.
    pub const ROUNDED: Self = border_set!(
        "─" "┬" "╭" "╮"
        "─" "┴" "╰" "╯"
        "│" "├" "─" "┼"
        "│" "┤" "│"
    );

    /// Double-line border.
    pub const DOUBLE: Self = border_set!(
        "═" "╦" "╔" "╗"
        "═" "╩" "╚" "╝"
        "║" "╠" "═" "╬"
        "║" "╣" "║"
    );

    /// Heavy (thick) border.
    pub const HEAVY: Self = border_set!(
        "━" "┳" "┏" "┓"
        "━" "┻" "┗" "┛"
        "┃" "┣" "━" "╋"
        "┃" "┫" "┃"
    );

    /// ASCII-only border.
    pub const ASCII: Self = border_set!(
        "-" "+" "+" "+"
        "-" "+" "+" "+"
        "|" "+" "-" "+"
        "|" "+" "|"
    );

    /// Every glyph empty: borders contribute no characters at all.
    pub const NONE: Self = border_set!(
        "" "" "" ""
        "" "" "" ""
        "" "" "" ""
        "" "" ""
    );

    /// Look up a preset by name (`single`, `rounded`, `double`, `heavy`,
    /// `ascii`, `none`).
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "single" | "default" => Some(Self::SINGLE),
            "rounded" => Some(Self::ROUNDED),
            "double" => Some(Self::DOUBLE),
            "heavy" => Some(Self::HEAVY),
            "ascii" => Some(Self::ASCII),
            "none" => Some(Self::NONE),
            _ => None,
        }
    }

    /// Glyph for a role.
    #[must_use]
    pub fn glyph(&self, role: BorderRole) -> &str {
        match role {
            BorderRole::Top => &self.top,
            BorderRole::TopMid => &self.top_mid,
            BorderRole::TopLeft => &self.top_left,
            BorderRole::TopRight => &self.top_right,
            BorderRole::Bottom => &self.bottom,
            BorderRole::BottomMid => &self.bottom_mid,
            BorderRole::BottomLeft => &self.bottom_left,
            BorderRole::BottomRight => &self.bottom_right,
            BorderRole::Left => &self.left,
            BorderRole::LeftMid => &self.left_mid,
            BorderRole::Mid => &self.mid,
            BorderRole::MidMid => &self.mid_mid,
            BorderRole::Right => &self.right,
            BorderRole::RightMid => &self.right_mid,
            BorderRole::Middle => &self.middle,
        }
    }

    /// Replace the glyph of a single role.
    #[must_use]
    pub fn with(mut self, role: BorderRole, glyph: impl Into<Cow<'static, str>>) -> Self {
        let glyph = glyph.into();
        match role {
            BorderRole::Top => self.top = glyph,
            BorderRole::TopMid => self.top_mid = glyph,
            BorderRole::TopLeft => self.top_left = glyph,
            BorderRole::TopRight => self.top_right = glyph,
            BorderRole::Bottom => self.bottom = glyph,
            BorderRole::BottomMid => self.bottom_mid = glyph,
            BorderRole::BottomLeft => self.bottom_left = glyph,
            BorderRole::BottomRight => self.bottom_right = glyph,
            BorderRole::Left => self.left = glyph,
            BorderRole::LeftMid => self.left_mid = glyph,
            BorderRole::Mid => self.mid = glyph,
            BorderRole::MidMid => self.mid_mid = glyph,
            BorderRole::Right => self.right = glyph,
            BorderRole::RightMid => self.right_mid = glyph,
            BorderRole::Middle => self.middle = glyph,
        }
        self
    }
}

impl Default for BorderChars {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Accept any JSON value for a glyph slot; anything but a string suppresses
/// the glyph.
fn lenient_glyph<'de, D>(deserializer: D) -> Result<Cow<'static, str>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Glyph {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Glyph::deserialize(deserializer)? {
        Glyph::Text(text) => Cow::Owned(text),
        Glyph::Other(_) => Cow::Borrowed(""),
    })
}
