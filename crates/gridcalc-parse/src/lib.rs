pub mod build;
pub mod error;
pub mod extract;
pub mod literal;
pub mod recognizer;

pub use build::classify_and_build;
pub use error::ParseError;
pub use extract::extract;
pub use literal::{is_double_token, is_integer_token, parse_double, parse_integer};
pub use recognizer::{
    FormulaShape, OperandSpan, Recognized, Span, classify, recognize, strip_spaces,
};

// Re-export common types
pub use gridcalc_common::{CellValue, FormulaExpr, Operator};
