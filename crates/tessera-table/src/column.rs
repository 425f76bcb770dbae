#![forbid(unsafe_code)]

//! Per-column overrides.

use serde::Deserialize;
use tessera_style::Align;

/// Overrides for one column. Unset fields fall back to the table options.
///
/// `border` and `align` only apply to body rows; the header row keeps its
/// own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Column {
    #[serde(alias = "minWidth")]
    pub min_width: Option<usize>,
    #[serde(alias = "maxWidth")]
    pub max_width: Option<usize>,
    pub padding: Option<usize>,
    pub border: Option<bool>,
    pub align: Option<Align>,
}

impl Column {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = Some(width);
        self
    }

    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = Some(padding);
        self
    }

    #[must_use]
    pub fn border(mut self, border: bool) -> Self {
        self.border = Some(border);
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }
}
