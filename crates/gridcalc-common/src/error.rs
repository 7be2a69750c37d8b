//! Cell-level failure codes.
//!
//! These are the values a formula cell *shows* when it cannot produce a
//! number. They are not Rust errors that abort anything; the evaluator
//! recovers locally and the code becomes the rendered result.

use std::fmt;

/// All recognised cell error codes.
///
/// **Note:** `Display` renders the text the grid prints in place of a value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellErrorKind {
    /// Division by zero or integer overflow.
    Arith,
    /// The formula is part of a reference cycle, or nests too deeply.
    Circ,
}

impl fmt::Display for CellErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl CellErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Arith => "ERROR",
            Self::Circ => "#CIRC!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_render_as_shown_in_the_grid() {
        assert_eq!(CellErrorKind::Arith.to_string(), "ERROR");
        assert_eq!(CellErrorKind::Circ.to_string(), "#CIRC!");
    }
}
