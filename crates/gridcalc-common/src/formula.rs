use std::fmt::{self, Display};

use crate::{CellCoord, value::format_double_storage};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Binary operator of a formula. Every formula carries exactly one.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Lt,
        Operator::Gt,
        Operator::Le,
        Operator::Ge,
        Operator::Eq,
        Operator::Ne,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            "<" => Some(Operator::Lt),
            ">" => Some(Operator::Gt),
            "<=" => Some(Operator::Le),
            ">=" => Some(Operator::Ge),
            "==" => Some(Operator::Eq),
            "!=" => Some(Operator::Ne),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
        }
    }

    pub const fn is_comparison(self) -> bool {
        !matches!(
            self,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div
        )
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed formula. Operands refer to other cells by coordinate only; the
/// referenced cells are looked up in the grid when the formula is evaluated.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// `=R<row1>C<col1> op R<row2>C<col2>`
    CoordCoord {
        row1: u32,
        col1: u32,
        row2: u32,
        col2: u32,
        op: Operator,
    },
    /// `=<a> op <b>`
    LitLit { a: f64, b: f64, op: Operator },
    /// `=<lit> op R<row>C<col>` when `lit_is_left`, else `=R<row>C<col> op <lit>`.
    LitCoord {
        lit: f64,
        row: u32,
        col: u32,
        op: Operator,
        lit_is_left: bool,
    },
}

impl FormulaExpr {
    pub fn op(&self) -> Operator {
        match self {
            FormulaExpr::CoordCoord { op, .. }
            | FormulaExpr::LitLit { op, .. }
            | FormulaExpr::LitCoord { op, .. } => *op,
        }
    }

    /// Cells this formula reads, in textual order.
    pub fn references(&self) -> Vec<CellCoord> {
        match *self {
            FormulaExpr::CoordCoord {
                row1,
                col1,
                row2,
                col2,
                ..
            } => vec![CellCoord::new(row1, col1), CellCoord::new(row2, col2)],
            FormulaExpr::LitLit { .. } => Vec::new(),
            FormulaExpr::LitCoord { row, col, .. } => vec![CellCoord::new(row, col)],
        }
    }

    /// Canonical, re-parseable text. Rebuilt from the operand fields, so the
    /// user's original spacing is not preserved.
    pub fn to_storage(&self) -> String {
        self.to_string()
    }
}

impl Display for FormulaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FormulaExpr::CoordCoord {
                row1,
                col1,
                row2,
                col2,
                op,
            } => write!(f, "=R{row1}C{col1} {op} R{row2}C{col2}"),
            FormulaExpr::LitLit { a, b, op } => write!(
                f,
                "={} {op} {}",
                format_double_storage(a),
                format_double_storage(b)
            ),
            FormulaExpr::LitCoord {
                lit,
                row,
                col,
                op,
                lit_is_left: true,
            } => write!(f, "={} {op} R{row}C{col}", format_double_storage(lit)),
            FormulaExpr::LitCoord {
                lit,
                row,
                col,
                op,
                lit_is_left: false,
            } => write!(f, "=R{row}C{col} {op} {}", format_double_storage(lit)),
        }
    }
}
