use std::fmt::{self, Display};

use crate::{FormulaExpr, text::quote_text};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Storage form of a double: the shortest text that parses back to the same
/// value, always with a decimal point so it is not mistaken for an integer.
pub fn format_double_storage(n: f64) -> String {
    let mut s = n.to_string();
    if n.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}

/// Display form of a double: fixed six decimals (`3.140000`).
pub fn format_double_display(n: f64) -> String {
    format!("{n:.6}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Integer,
    Double,
    Text,
    Formula,
}

impl Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CellKind::Integer => "integer",
            CellKind::Double => "double",
            CellKind::Text => "text",
            CellKind::Formula => "formula",
        })
    }
}

/// The value held by one grid cell.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Double(f64),
    Text(String),
    Formula(FormulaExpr),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::empty()
    }
}

impl CellValue {
    /// Empty text; what padding and rejected tokens become.
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Integer(_) => CellKind::Integer,
            CellValue::Double(_) => CellKind::Double,
            CellValue::Text(_) => CellKind::Text,
            CellValue::Formula(_) => CellKind::Formula,
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula(_))
    }

    pub fn as_formula(&self) -> Option<&FormulaExpr> {
        match self {
            CellValue::Formula(expr) => Some(expr),
            _ => None,
        }
    }

    /// Display text for every kind that does not need the grid. Formulas
    /// return `None`; their display is the evaluated result.
    pub fn literal_display(&self) -> Option<String> {
        match self {
            CellValue::Integer(i) => Some(i.to_string()),
            CellValue::Double(n) => Some(format_double_display(*n)),
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Formula(_) => None,
        }
    }

    /// Re-parseable representation written to the file.
    pub fn to_storage(&self) -> String {
        match self {
            CellValue::Integer(i) => i.to_string(),
            CellValue::Double(n) => format_double_storage(*n),
            CellValue::Text(s) => quote_text(s),
            CellValue::Formula(expr) => expr.to_storage(),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Double(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<FormulaExpr> for CellValue {
    fn from(value: FormulaExpr) -> Self {
        CellValue::Formula(value)
    }
}
