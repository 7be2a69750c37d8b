//! Operand extraction: turns the spans of a [`Recognized`] formula into a
//! typed [`FormulaExpr`].

use gridcalc_common::{FormulaExpr, Operator};

use crate::ParseError;
use crate::recognizer::{FormulaShape, OperandSpan, Recognized, Span, recognize};

/// Recognize and extract in one step. Strings that match no shape are
/// [`ParseError::Rejected`].
pub fn extract(raw: &str) -> Result<FormulaExpr, ParseError> {
    recognize(raw)
        .ok_or_else(|| ParseError::Rejected {
            token: raw.to_string(),
        })?
        .extract()
}

impl Recognized {
    pub fn extract(&self) -> Result<FormulaExpr, ParseError> {
        let src = self.source();
        let op = Operator::from_symbol(self.op_text()).ok_or_else(|| ParseError::InvalidOperator {
            op: self.op_text().to_string(),
        })?;

        match (self.shape, self.left, self.right) {
            (
                FormulaShape::CoordCoord,
                OperandSpan::Coord { row: r1, col: c1 },
                OperandSpan::Coord { row: r2, col: c2 },
            ) => Ok(FormulaExpr::CoordCoord {
                row1: coordinate(src, r1)?,
                col1: coordinate(src, c1)?,
                row2: coordinate(src, r2)?,
                col2: coordinate(src, c2)?,
                op,
            }),
            (FormulaShape::LitLit, OperandSpan::Number(a), OperandSpan::Number(b)) => {
                Ok(FormulaExpr::LitLit {
                    a: literal(src, a)?,
                    b: literal(src, b)?,
                    op,
                })
            }
            (FormulaShape::LitCoord, OperandSpan::Number(lit), OperandSpan::Coord { row, col }) => {
                Ok(FormulaExpr::LitCoord {
                    lit: literal(src, lit)?,
                    row: coordinate(src, row)?,
                    col: coordinate(src, col)?,
                    op,
                    lit_is_left: true,
                })
            }
            (FormulaShape::LitCoord, OperandSpan::Coord { row, col }, OperandSpan::Number(lit)) => {
                Ok(FormulaExpr::LitCoord {
                    lit: literal(src, lit)?,
                    row: coordinate(src, row)?,
                    col: coordinate(src, col)?,
                    op,
                    lit_is_left: false,
                })
            }
            // The recognizer only pairs shapes with their own operand layout.
            _ => Err(ParseError::Rejected {
                token: src.to_string(),
            }),
        }
    }
}

fn coordinate(src: &str, span: Span) -> Result<u32, ParseError> {
    let digits = span.slice(src);
    digits
        .parse::<u32>()
        .map_err(|_| ParseError::CoordinateOverflow {
            digits: digits.to_string(),
        })
}

fn literal(src: &str, span: Span) -> Result<f64, ParseError> {
    let text = span.slice(src);
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            text: text.to_string(),
        })
}
