use std::error::Error;
use std::fmt::{self, Display};

/// Why a token could not become a cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token matches none of the accepted value or formula shapes.
    Rejected { token: String },
    /// The formula is well-shaped but its operator cannot be evaluated
    /// (e.g. `=`, `!`, `<>`).
    InvalidOperator { op: String },
    /// A coordinate digit run does not fit a `u32`.
    CoordinateOverflow { digits: String },
    /// A literal digit run did not parse as a number.
    InvalidNumber { text: String },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Rejected { token } => write!(f, "unrecognised cell data {token:?}"),
            ParseError::InvalidOperator { op } => write!(f, "invalid operator {op:?}"),
            ParseError::CoordinateOverflow { digits } => {
                write!(f, "coordinate {digits} is out of range")
            }
            ParseError::InvalidNumber { text } => write!(f, "invalid number {text:?}"),
        }
    }
}

impl Error for ParseError {}
