#![forbid(unsafe_code)]

//! Border junction selection.
//!
//! A separator line is drawn between two grid rows. At every column boundary
//! it crosses, the glyph depends on the four cells around that point:
//!
//! ```text
//!  a1 | b1
//! ----+----
//!  a2 | b2
//! ```
//!
//! Which of them draw borders decides between corners, tees and crosses;
//! whether two of them are the same spanning cell decides whether a line
//! would cut through a merged region and must be left out.

use bitflags::bitflags;
use tessera_style::{BorderChars, BorderRole};

use crate::grid::CellId;

bitflags! {
    /// Which neighbours of an intersection draw a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NeighborBorders: u8 {
        /// `a1`
        const UPPER_LEFT = 1 << 0;
        /// `b1`
        const UPPER_RIGHT = 1 << 1;
        /// `a2`
        const LOWER_LEFT = 1 << 2;
        /// `b2`
        const LOWER_RIGHT = 1 << 3;
    }
}

/// A cell next to an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub id: CellId,
    pub border: bool,
    pub col_span: usize,
    pub row_span: usize,
}

impl Neighbor {
    #[inline]
    fn spans_cols(self) -> bool {
        self.col_span > 1
    }

    #[inline]
    fn spans_rows(self) -> bool {
        self.row_span > 1
    }
}

/// The neighbourhood of one point on a separator line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intersection {
    pub a1: Option<Neighbor>,
    pub b1: Option<Neighbor>,
    pub a2: Option<Neighbor>,
    pub b2: Option<Neighbor>,
    /// A row span continues through the separator in the column to the right.
    pub spanning_down: bool,
}

impl Intersection {
    /// Border flags of the four neighbours.
    #[must_use]
    pub fn borders(&self) -> NeighborBorders {
        let mut flags = NeighborBorders::empty();
        flags.set(NeighborBorders::UPPER_LEFT, has_border(self.a1));
        flags.set(NeighborBorders::UPPER_RIGHT, has_border(self.b1));
        flags.set(NeighborBorders::LOWER_LEFT, has_border(self.a2));
        flags.set(NeighborBorders::LOWER_RIGHT, has_border(self.b2));
        flags
    }
}

/// Glyph choice for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Junction {
    Glyph(BorderRole),
    Space,
}

impl Junction {
    /// Append the glyph (or a space) to `out`.
    pub fn push_to(self, out: &mut String, chars: &BorderChars) {
        match self {
            Self::Glyph(role) => out.push_str(chars.glyph(role)),
            Self::Space => out.push(' '),
        }
    }

    /// Append the glyph (or spaces) `count` times.
    pub fn push_repeated(self, out: &mut String, chars: &BorderChars, count: usize) {
        match self {
            Self::Glyph(role) => {
                let glyph = chars.glyph(role);
                out.reserve(glyph.len() * count);
                for _ in 0..count {
                    out.push_str(glyph);
                }
            }
            Self::Space => out.extend(std::iter::repeat_n(' ', count)),
        }
    }
}

#[inline]
fn has_border(cell: Option<Neighbor>) -> bool {
    cell.is_some_and(|c| c.border)
}

#[inline]
fn spans_cols(cell: Option<Neighbor>) -> bool {
    cell.is_some_and(Neighbor::spans_cols)
}

#[inline]
fn spans_rows(cell: Option<Neighbor>) -> bool {
    cell.is_some_and(Neighbor::spans_rows)
}

/// Both sides are the same cell.
#[inline]
fn same(a: Option<Neighbor>, b: Option<Neighbor>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a.id == b.id)
}

/// Glyph at the left end of a separator segment.
///
/// `first_column` selects the outer left edge, where only `b1` and `b2`
/// exist.
#[must_use]
pub fn junction(x: &Intersection, first_column: bool) -> Junction {
    use BorderRole::*;
    use NeighborBorders as B;

    let borders = x.borders();
    let a1 = borders.contains(B::UPPER_LEFT);
    let b1 = borders.contains(B::UPPER_RIGHT);
    let a2 = borders.contains(B::LOWER_LEFT);
    let b2 = borders.contains(B::LOWER_RIGHT);

    if first_column {
        let role = if x.spanning_down {
            if b1 { Some(Left) } else { None }
        } else if b1 && b2 {
            Some(LeftMid)
        } else if b1 {
            Some(BottomLeft)
        } else if b2 {
            Some(TopLeft)
        } else {
            None
        };
        return role.map_or(Junction::Space, Junction::Glyph);
    }

    let role = if (a1 && b2) || (b1 && a2) {
        let all_borders = borders.is_all();
        let all_row_spans =
            spans_rows(x.a1) && spans_rows(x.b1) && spans_rows(x.a2) && spans_rows(x.b2);
        let all_col_spans =
            spans_cols(x.a1) && spans_cols(x.b1) && spans_cols(x.a2) && spans_cols(x.b2);

        if all_row_spans && all_borders {
            Middle
        } else if all_col_spans && all_borders && same(x.a1, x.b1) && same(x.a2, x.b2) {
            Mid
        } else if spans_cols(x.a1) && spans_cols(x.b1) && same(x.a1, x.b1) {
            TopMid
        } else if spans_cols(x.a2) && spans_cols(x.b2) && same(x.a2, x.b2) {
            BottomMid
        } else if spans_rows(x.a1) && spans_rows(x.a2) && same(x.a1, x.a2) {
            LeftMid
        } else if spans_rows(x.b1) && spans_rows(x.b2) && same(x.b1, x.b2) {
            RightMid
        } else {
            MidMid
        }
    } else if a1 && b1 {
        if spans_cols(x.a1) && spans_cols(x.b1) && same(x.a1, x.b1) {
            Bottom
        } else {
            BottomMid
        }
    } else if b1 && b2 {
        if x.spanning_down { Left } else { LeftMid }
    } else if b2 && a2 {
        if spans_cols(x.a2) && spans_cols(x.b2) && same(x.a2, x.b2) {
            Top
        } else {
            TopMid
        }
    } else if a1 && a2 {
        if spans_rows(x.a1) && same(x.a1, x.a2) {
            Right
        } else {
            RightMid
        }
    } else if a1 {
        BottomRight
    } else if b1 {
        BottomLeft
    } else if a2 {
        TopRight
    } else if b2 {
        TopLeft
    } else {
        return Junction::Space;
    };
    Junction::Glyph(role)
}

/// Horizontal line drawn across the segment right of an intersection.
#[must_use]
pub fn fill(x: &Intersection) -> Junction {
    match (has_border(x.b1), has_border(x.b2)) {
        (true, true) => Junction::Glyph(BorderRole::Mid),
        (true, false) => Junction::Glyph(BorderRole::Bottom),
        (false, true) => Junction::Glyph(BorderRole::Top),
        (false, false) => Junction::Space,
    }
}

/// Glyph closing a separator line on the right edge of the table.
#[must_use]
pub fn closing_junction(b1: Option<&Neighbor>, b2: Option<&Neighbor>) -> Junction {
    let upper = b1.is_some_and(|c| c.border);
    let lower = b2.is_some_and(|c| c.border);
    match (upper, lower) {
        (true, true) => Junction::Glyph(BorderRole::RightMid),
        (true, false) => Junction::Glyph(BorderRole::BottomRight),
        (false, true) => Junction::Glyph(BorderRole::TopRight),
        (false, false) => Junction::Space,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(id: CellId) -> Option<Neighbor> {
        Some(Neighbor {
            id,
            border: true,
            col_span: 1,
            row_span: 1,
        })
    }

    fn spanning(id: CellId, col_span: usize, row_span: usize) -> Option<Neighbor> {
        Some(Neighbor {
            id,
            border: true,
            col_span,
            row_span,
        })
    }

    fn plain(id: CellId) -> Option<Neighbor> {
        Some(Neighbor {
            id,
            border: false,
            col_span: 1,
            row_span: 1,
        })
    }

    fn at(
        a1: Option<Neighbor>,
        b1: Option<Neighbor>,
        a2: Option<Neighbor>,
        b2: Option<Neighbor>,
    ) -> Intersection {
        Intersection {
            a1,
            b1,
            a2,
            b2,
            spanning_down: false,
        }
    }

    fn role(j: Junction) -> Option<BorderRole> {
        match j {
            Junction::Glyph(role) => Some(role),
            Junction::Space => None,
        }
    }

    #[test]
    fn interior_cross() {
        let x = at(cell(0), cell(1), cell(2), cell(3));
        assert_eq!(role(junction(&x, false)), Some(BorderRole::MidMid));
        assert_eq!(x.borders(), NeighborBorders::all());
    }

    #[test]
    fn top_edge() {
        let x = at(None, None, cell(0), cell(1));
        assert_eq!(role(junction(&x, false)), Some(BorderRole::TopMid));
        assert_eq!(role(junction(&x, true)), Some(BorderRole::TopLeft));
        assert_eq!(role(fill(&x)), Some(BorderRole::Top));
    }

    #[test]
    fn bottom_edge() {
        let x = at(cell(0), cell(1), None, None);
        assert_eq!(role(junction(&x, false)), Some(BorderRole::BottomMid));
        assert_eq!(role(junction(&x, true)), Some(BorderRole::BottomLeft));
        assert_eq!(role(fill(&x)), Some(BorderRole::Bottom));
    }

    #[test]
    fn left_edge_between_rows() {
        let x = at(None, cell(0), None, cell(1));
        assert_eq!(role(junction(&x, true)), Some(BorderRole::LeftMid));
        assert_eq!(role(fill(&x)), Some(BorderRole::Mid));
    }

    #[test]
    fn col_span_above_suppresses_upward_line() {
        let wide = spanning(0, 2, 1);
        let x = at(wide, wide, cell(1), cell(2));
        assert_eq!(role(junction(&x, false)), Some(BorderRole::TopMid));
    }

    #[test]
    fn col_span_below_suppresses_downward_line() {
        let wide = spanning(5, 2, 1);
        let x = at(cell(1), cell(2), wide, wide);
        assert_eq!(role(junction(&x, false)), Some(BorderRole::BottomMid));
    }

    #[test]
    fn col_span_on_both_sides_is_straight() {
        let above = spanning(0, 2, 1);
        let below = spanning(1, 2, 1);
        let x = at(above, above, below, below);
        assert_eq!(role(junction(&x, false)), Some(BorderRole::Mid));
    }

    #[test]
    fn row_span_on_the_left() {
        let tall = spanning(0, 1, 2);
        let x = at(tall, cell(1), tall, cell(2));
        assert_eq!(role(junction(&x, false)), Some(BorderRole::LeftMid));
    }

    #[test]
    fn row_span_on_the_right() {
        let tall = spanning(3, 1, 2);
        let x = at(cell(1), tall, cell(2), tall);
        assert_eq!(role(junction(&x, false)), Some(BorderRole::RightMid));
    }

    #[test]
    fn row_spans_everywhere_is_vertical() {
        let left = spanning(0, 1, 3);
        let right = spanning(1, 1, 3);
        let x = at(left, right, left, right);
        assert_eq!(role(junction(&x, false)), Some(BorderRole::Middle));
    }

    #[test]
    fn spanning_down_on_first_column() {
        let mut x = at(None, cell(0), None, cell(0));
        x.spanning_down = true;
        assert_eq!(role(junction(&x, true)), Some(BorderRole::Left));
        let mut x = at(None, plain(0), None, plain(0));
        x.spanning_down = true;
        assert_eq!(junction(&x, true), Junction::Space);
    }

    #[test]
    fn corners() {
        let corner = |x: Intersection| role(junction(&x, false));
        assert_eq!(
            corner(at(cell(0), plain(1), plain(2), plain(3))),
            Some(BorderRole::BottomRight)
        );
        assert_eq!(
            corner(at(plain(0), cell(1), plain(2), plain(3))),
            Some(BorderRole::BottomLeft)
        );
        assert_eq!(
            corner(at(plain(0), plain(1), cell(2), plain(3))),
            Some(BorderRole::TopRight)
        );
        assert_eq!(
            corner(at(plain(0), plain(1), plain(2), cell(3))),
            Some(BorderRole::TopLeft)
        );
    }

    #[test]
    fn right_side_tee() {
        let x = at(cell(0), plain(1), cell(2), plain(3));
        assert_eq!(role(junction(&x, false)), Some(BorderRole::RightMid));
        let tall = spanning(0, 1, 2);
        let x = at(tall, plain(1), tall, plain(3));
        assert_eq!(role(junction(&x, false)), Some(BorderRole::Right));
    }

    #[test]
    fn borderless_is_space() {
        let x = at(plain(0), plain(1), plain(2), plain(3));
        assert_eq!(junction(&x, false), Junction::Space);
        assert_eq!(junction(&x, true), Junction::Space);
        assert_eq!(fill(&x), Junction::Space);
        assert_eq!(closing_junction(x.b1.as_ref(), x.b2.as_ref()), Junction::Space);
        assert_eq!(junction(&Intersection::default(), false), Junction::Space);
    }

    #[test]
    fn closing_glyphs() {
        let c = cell(0);
        assert_eq!(role(closing_junction(c.as_ref(), c.as_ref())), Some(BorderRole::RightMid));
        assert_eq!(role(closing_junction(c.as_ref(), None)), Some(BorderRole::BottomRight));
        assert_eq!(role(closing_junction(None, c.as_ref())), Some(BorderRole::TopRight));
    }

    #[test]
    fn selection_is_deterministic() {
        let x = at(cell(0), cell(1), plain(2), cell(3));
        assert_eq!(junction(&x, false), junction(&x, false));
    }

    #[test]
    fn push_helpers() {
        let chars = BorderChars::ASCII;
        let mut out = String::new();
        Junction::Glyph(BorderRole::TopLeft).push_to(&mut out, &chars);
        Junction::Glyph(BorderRole::Top).push_repeated(&mut out, &chars, 3);
        Junction::Space.push_repeated(&mut out, &chars, 2);
        assert_eq!(out, format!("{}{}  ", chars.top_left, chars.top.repeat(3)));
    }
}
