//! Formula evaluation against a [`CellSource`].
//!
//! Operands resolve to integers or floats. Two integers combine with checked
//! integer arithmetic; anything else is promoted to `f64`. Comparisons yield
//! a boolean that renders as `0` / `1`. Division by zero and integer
//! overflow yield [`CellErrorKind::Arith`], which renders as `ERROR`.
//!
//! A referenced formula cell is evaluated recursively. The evaluator keeps
//! the stack of formula cells it is currently inside; re-entering one of
//! them is a [`EvalError::CyclicReference`], and nesting beyond
//! [`EvalConfig::max_depth`] is a [`EvalError::DepthLimitExceeded`].

use gridcalc_common::{CellCoord, CellErrorKind, CellValue, FormulaExpr, Operator};
use gridcalc_parse::{parse_double, parse_integer};
use smallvec::SmallVec;
use thiserror::Error;

use crate::grid::CellSource;

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Deepest chain of nested formula cells one evaluation may walk.
    pub max_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EvalConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("reference cycle through R{row}C{col}")]
    CyclicReference { row: u32, col: u32 },
    #[error("formula nesting exceeds {limit} levels")]
    DepthLimitExceeded { limit: usize },
}

impl EvalError {
    /// The code a cell shows when its evaluation fails this way.
    pub fn cell_kind(&self) -> CellErrorKind {
        CellErrorKind::Circ
    }
}

/// Typed result of one formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluated {
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Error(CellErrorKind),
}

impl Evaluated {
    pub fn render(&self) -> String {
        match self {
            Evaluated::Integer(i) => i.to_string(),
            Evaluated::Double(n) => gridcalc_common::format_double_display(*n),
            Evaluated::Boolean(b) => u8::from(*b).to_string(),
            Evaluated::Error(kind) => kind.code().to_string(),
        }
    }

    /// How the result reads when another formula references it.
    fn as_operand(self) -> Number {
        match self {
            Evaluated::Integer(i) => Number::Int(i),
            Evaluated::Double(n) => Number::Float(n),
            Evaluated::Boolean(b) => Number::Int(i64::from(b)),
            Evaluated::Error(_) => Number::Int(0),
        }
    }
}

impl std::fmt::Display for Evaluated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(n) => n,
        }
    }

    /// Numeric reading of a text cell: float, then integer, else zero.
    fn from_text(s: &str) -> Self {
        parse_double(s)
            .map(Number::Float)
            .or_else(|| parse_integer(s).map(Number::Int))
            .unwrap_or(Number::Int(0))
    }
}

pub struct Evaluator<'a, S: CellSource + ?Sized> {
    source: &'a S,
    config: EvalConfig,
    stack: SmallVec<[CellCoord; 8]>,
}

impl<'a, S: CellSource + ?Sized> Evaluator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, EvalConfig::default())
    }

    pub fn with_config(source: &'a S, config: EvalConfig) -> Self {
        Self {
            source,
            config,
            stack: SmallVec::new(),
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn evaluate(&mut self, expr: &FormulaExpr) -> Result<String, EvalError> {
        self.evaluate_value(expr).map(|v| v.render())
    }

    pub fn evaluate_value(&mut self, expr: &FormulaExpr) -> Result<Evaluated, EvalError> {
        let (left, right) = match *expr {
            FormulaExpr::CoordCoord {
                row1,
                col1,
                row2,
                col2,
                ..
            } => (self.operand(row1, col1)?, self.operand(row2, col2)?),
            FormulaExpr::LitLit { a, b, .. } => (Number::Float(a), Number::Float(b)),
            FormulaExpr::LitCoord {
                lit,
                row,
                col,
                lit_is_left,
                ..
            } => {
                let cell = self.operand(row, col)?;
                if lit_is_left {
                    (Number::Float(lit), cell)
                } else {
                    (cell, Number::Float(lit))
                }
            }
        };
        Ok(apply(expr.op(), left, right))
    }

    /// Evaluate the formula stored at `coord`, treating that cell as the
    /// outermost frame. Returns `Ok(None)` when the cell holds no formula.
    pub fn evaluate_cell(&mut self, coord: CellCoord) -> Result<Option<Evaluated>, EvalError> {
        let source = self.source;
        if !source.contains(coord) {
            return Ok(None);
        }
        match source.cell_at(coord.row, coord.col) {
            Some(CellValue::Formula(expr)) => self.enter(coord, expr).map(Some),
            _ => Ok(None),
        }
    }

    fn operand(&mut self, row: u32, col: u32) -> Result<Number, EvalError> {
        let source = self.source;
        let coord = CellCoord::new(row, col);
        if !source.contains(coord) {
            return Ok(Number::Int(0));
        }
        Ok(match source.cell_at(row, col) {
            None => Number::Int(0),
            Some(CellValue::Integer(i)) => Number::Int(*i),
            Some(CellValue::Double(n)) => Number::Float(*n),
            Some(CellValue::Text(s)) => Number::from_text(s),
            Some(CellValue::Formula(expr)) => self.enter(coord, expr)?.as_operand(),
        })
    }

    fn enter(&mut self, coord: CellCoord, expr: &FormulaExpr) -> Result<Evaluated, EvalError> {
        if self.stack.contains(&coord) {
            #[cfg(feature = "tracing")]
            tracing::warn!(cell = %coord, depth = self.stack.len(), "reference cycle");
            return Err(EvalError::CyclicReference {
                row: coord.row,
                col: coord.col,
            });
        }
        if self.stack.len() >= self.config.max_depth {
            #[cfg(feature = "tracing")]
            tracing::warn!(cell = %coord, limit = self.config.max_depth, "formula nesting too deep");
            return Err(EvalError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        self.stack.push(coord);
        let result = self.evaluate_value(expr);
        self.stack.pop();
        result
    }
}

fn apply(op: Operator, left: Number, right: Number) -> Evaluated {
    match (left, right) {
        (Number::Int(a), Number::Int(b)) => apply_int(op, a, b),
        _ => apply_float(op, left.as_f64(), right.as_f64()),
    }
}

fn apply_int(op: Operator, a: i64, b: i64) -> Evaluated {
    let checked = match op {
        Operator::Add => a.checked_add(b),
        Operator::Sub => a.checked_sub(b),
        Operator::Mul => a.checked_mul(b),
        // truncates toward zero; `None` on zero divisor and MIN / -1
        Operator::Div => a.checked_div(b),
        Operator::Lt => return Evaluated::Boolean(a < b),
        Operator::Gt => return Evaluated::Boolean(a > b),
        Operator::Le => return Evaluated::Boolean(a <= b),
        Operator::Ge => return Evaluated::Boolean(a >= b),
        Operator::Eq => return Evaluated::Boolean(a == b),
        Operator::Ne => return Evaluated::Boolean(a != b),
    };
    checked.map_or(Evaluated::Error(CellErrorKind::Arith), Evaluated::Integer)
}

fn apply_float(op: Operator, a: f64, b: f64) -> Evaluated {
    let n = match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div if b == 0.0 => return Evaluated::Error(CellErrorKind::Arith),
        Operator::Div => a / b,
        Operator::Lt => return Evaluated::Boolean(a < b),
        Operator::Gt => return Evaluated::Boolean(a > b),
        Operator::Le => return Evaluated::Boolean(a <= b),
        Operator::Ge => return Evaluated::Boolean(a >= b),
        Operator::Eq => return Evaluated::Boolean(a == b),
        Operator::Ne => return Evaluated::Boolean(a != b),
    };
    if n.is_finite() {
        Evaluated::Double(n)
    } else {
        Evaluated::Error(CellErrorKind::Arith)
    }
}

/// Evaluate `expr` against `source` with the default configuration and
/// render the result.
pub fn evaluate<S: CellSource + ?Sized>(
    expr: &FormulaExpr,
    source: &S,
) -> Result<String, EvalError> {
    Evaluator::new(source).evaluate(expr)
}

pub fn evaluate_value<S: CellSource + ?Sized>(
    expr: &FormulaExpr,
    source: &S,
) -> Result<Evaluated, EvalError> {
    Evaluator::new(source).evaluate_value(expr)
}
