//! Zero-based grid coordinates shared by the parser, the evaluator and the
//! workbook layer.
//!
//! Formulas spell coordinates as `R<row>C<col>` with both indices counted from
//! zero, and the grid stores cells row-major under the same indices.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute cell position `(row, col)`, both zero-based.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    #[inline(always)]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// True when the coordinate lies inside a `rows` x `cols` rectangle.
    #[inline(always)]
    pub fn within(self, rows: u32, cols: u32) -> bool {
        self.row < rows && self.col < cols
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((row, col): (u32, u32)) -> Self {
        Self::new(row, col)
    }
}

impl From<CellCoord> for (u32, u32) {
    fn from(coord: CellCoord) -> Self {
        (coord.row, coord.col)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_exclusive() {
        assert!(CellCoord::new(1, 1).within(2, 2));
        assert!(!CellCoord::new(2, 0).within(2, 2));
        assert!(!CellCoord::new(0, 2).within(2, 2));
        assert!(!CellCoord::new(0, 0).within(0, 0));
    }

    #[test]
    fn renders_in_formula_notation() {
        assert_eq!(CellCoord::new(3, 12).to_string(), "R3C12");
        let pair: (u32, u32) = CellCoord::from((4, 5)).into();
        assert_eq!(pair, (4, 5));
    }
}
