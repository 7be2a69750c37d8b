//! Grammar recognizer for the three formula shapes.
//!
//! ```text
//! coord    := 'R' digits 'C' digits
//! number   := digits ('.' digits)?
//! op       := '+' | '-' | '*' | '/' | cmp cmp?
//! cmp      := '<' | '>' | '=' | '!'
//!
//! CoordCoord := '=' coord op coord
//! LitCoord   := '=' number op coord | '=' coord op number
//! LitLit     := '=' number op number
//! ```
//!
//! Spaces are removed before scanning and every shape must consume the whole
//! remaining string. Shapes are tried in the order above; the first full match
//! wins. While matching, the scanner records the span of each token so the
//! extractor never has to scan again.

use std::fmt::{self, Display};

const ARITHMETIC: &str = "+-*/";
const COMPARING: &str = "<>=!";

const fn build_table(chars: &str) -> [bool; 256] {
    let mut tbl = [false; 256];
    let bytes = chars.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        tbl[bytes[i] as usize] = true;
        i += 1;
    }
    tbl
}
static ARITHMETIC_TABLE: [bool; 256] = build_table(ARITHMETIC);
static COMPARING_TABLE: [bool; 256] = build_table(COMPARING);

#[inline(always)]
fn is_arithmetic(c: u8) -> bool {
    ARITHMETIC_TABLE[c as usize]
}

#[inline(always)]
fn is_comparing(c: u8) -> bool {
    COMPARING_TABLE[c as usize]
}

/// The accepted formula shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaShape {
    CoordCoord,
    LitCoord,
    LitLit,
}

impl Display for FormulaShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Byte range into the space-stripped formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// One side of the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandSpan {
    Coord { row: Span, col: Span },
    Number(Span),
}

/// A formula that matched one shape, with the spans of its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    pub(crate) stripped: String,
    pub shape: FormulaShape,
    pub left: OperandSpan,
    pub op: Span,
    pub right: OperandSpan,
}

impl Recognized {
    /// The formula with all spaces removed; spans index into this.
    pub fn source(&self) -> &str {
        &self.stripped
    }

    pub fn op_text(&self) -> &str {
        self.op.slice(&self.stripped)
    }
}

/// Remove every space character.
pub fn strip_spaces(raw: &str) -> String {
    raw.chars().filter(|c| *c != ' ').collect()
}

/// Classify `raw` into a shape, or `None` when it is not a formula.
pub fn classify(raw: &str) -> Option<FormulaShape> {
    recognize(raw).map(|r| r.shape)
}

/// Match `raw` against the grammar, keeping token spans.
pub fn recognize(raw: &str) -> Option<Recognized> {
    let stripped = strip_spaces(raw);
    if !stripped.starts_with('=') {
        return None;
    }

    let matched = Scanner::new(&stripped)
        .coord_coord()
        .map(|(l, op, r)| (FormulaShape::CoordCoord, l, op, r))
        .or_else(|| {
            Scanner::new(&stripped)
                .lit_coord()
                .map(|(l, op, r)| (FormulaShape::LitCoord, l, op, r))
        })
        .or_else(|| {
            Scanner::new(&stripped)
                .lit_lit()
                .map(|(l, op, r)| (FormulaShape::LitLit, l, op, r))
        });

    matched.map(|(shape, left, op, right)| Recognized {
        stripped,
        shape,
        left,
        op,
        right,
    })
}

type Matched = (OperandSpan, Span, OperandSpan);

/// Single-pass cursor over the stripped formula bytes.
struct Scanner<'a> {
    src: &'a [u8],
    offset: usize,
}

impl<'a> Scanner<'a> {
    /// Positions the cursor just past the leading `=`.
    fn new(stripped: &'a str) -> Self {
        Scanner {
            src: stripped.as_bytes(),
            offset: 1,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.src.get(self.offset).copied()
    }

    fn eat(&mut self, expected: u8) -> Option<()> {
        if self.peek()? == expected {
            self.offset += 1;
            Some(())
        } else {
            None
        }
    }

    /// Greedy run of one or more ASCII digits.
    fn digits(&mut self) -> Option<Span> {
        let start = self.offset;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.offset += 1;
        }
        (self.offset > start).then_some(Span {
            start,
            end: self.offset,
        })
    }

    fn number(&mut self) -> Option<Span> {
        let int = self.digits()?;
        if self.peek() == Some(b'.') {
            self.offset += 1;
            let frac = self.digits()?;
            return Some(Span {
                start: int.start,
                end: frac.end,
            });
        }
        Some(int)
    }

    fn coord(&mut self) -> Option<OperandSpan> {
        self.eat(b'R')?;
        let row = self.digits()?;
        self.eat(b'C')?;
        let col = self.digits()?;
        Some(OperandSpan::Coord { row, col })
    }

    fn operator(&mut self) -> Option<Span> {
        let start = self.offset;
        let first = self.peek()?;
        if is_arithmetic(first) {
            self.offset += 1;
        } else if is_comparing(first) {
            self.offset += 1;
            if self.peek().is_some_and(is_comparing) {
                self.offset += 1;
            }
        } else {
            return None;
        }
        Some(Span {
            start,
            end: self.offset,
        })
    }

    fn finish(&self) -> Option<()> {
        (self.offset == self.src.len()).then_some(())
    }

    fn coord_coord(mut self) -> Option<Matched> {
        let left = self.coord()?;
        let op = self.operator()?;
        let right = self.coord()?;
        self.finish()?;
        Some((left, op, right))
    }

    fn lit_coord(mut self) -> Option<Matched> {
        let (left, op, right) = if self.peek()? == b'R' {
            let left = self.coord()?;
            let op = self.operator()?;
            (left, op, OperandSpan::Number(self.number()?))
        } else {
            let left = OperandSpan::Number(self.number()?);
            let op = self.operator()?;
            (left, op, self.coord()?)
        };
        self.finish()?;
        Some((left, op, right))
    }

    fn lit_lit(mut self) -> Option<Matched> {
        let left = OperandSpan::Number(self.number()?);
        let op = self.operator()?;
        let right = OperandSpan::Number(self.number()?);
        self.finish()?;
        Some((left, op, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_each_shape() {
        assert_eq!(classify("=R1C1+R2C2"), Some(FormulaShape::CoordCoord));
        assert_eq!(classify("=3+4"), Some(FormulaShape::LitLit));
        assert_eq!(classify("=3+R1C1"), Some(FormulaShape::LitCoord));
        assert_eq!(classify("=R1C1+3"), Some(FormulaShape::LitCoord));
    }

    #[test]
    fn rejects_non_formulas() {
        for raw in ["not a formula", "", "=RC", "=", "R1C1+R2C2", "=R1C+R2C2", "=R1C1+R2"] {
            assert_eq!(classify(raw), None, "{raw:?} should be rejected");
        }
    }

    #[test]
    fn spaces_are_ignored() {
        assert_eq!(classify(" = R1 C1 <= R2 C2 "), Some(FormulaShape::CoordCoord));
        assert_eq!(classify("=10 / 0"), Some(FormulaShape::LitLit));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert_eq!(classify("=R1C1+R2C2x"), None);
        assert_eq!(classify("=1+2+3"), None);
        assert_eq!(classify("=R1C1+3R"), None);
    }

    #[test]
    fn comparison_operators_take_one_or_two_chars() {
        for op in ["<", ">", "<=", ">=", "==", "!=", "=", "!", "<>", "=<"] {
            let raw = format!("=R0C0{op}R0C1");
            assert_eq!(classify(&raw), Some(FormulaShape::CoordCoord), "{raw}");
        }
        assert_eq!(classify("=R0C0<<=R0C1"), None);
        assert_eq!(classify("=R0C0+-R0C1"), None);
    }

    #[test]
    fn literals_allow_a_fraction_but_no_sign() {
        assert_eq!(classify("=1.5*2.25"), Some(FormulaShape::LitLit));
        assert_eq!(classify("=R0C0-0.5"), Some(FormulaShape::LitCoord));
        assert_eq!(classify("=-1+2"), None);
        assert_eq!(classify("=1.+2"), None);
        assert_eq!(classify("=.5+2"), None);
    }

    #[test]
    fn spans_point_into_stripped_source() {
        let r = recognize("= R12C3 >= 7.5").unwrap();
        assert_eq!(r.source(), "=R12C3>=7.5");
        assert_eq!(r.op_text(), ">=");
        match r.left {
            OperandSpan::Coord { row, col } => {
                assert_eq!(row.slice(r.source()), "12");
                assert_eq!(col.slice(r.source()), "3");
            }
            other => panic!("unexpected left operand {other:?}"),
        }
        assert_eq!(r.right, OperandSpan::Number(Span { start: 8, end: 11 }));
    }
}
