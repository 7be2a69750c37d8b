//! Meta crate that re-exports the gridcalc building blocks: the value model,
//! the formula recognizer, the evaluator and the file session. It also hosts
//! the interactive menu used by the `gridcalc` binary.

pub use gridcalc_common as common;
pub use gridcalc_eval as eval;
pub use gridcalc_parse as parse;
pub use gridcalc_workbook as workbook;

pub use gridcalc_common::{CellCoord, CellErrorKind, CellValue, FormulaExpr, Operator};
pub use gridcalc_eval::{
    CellSource, EvalConfig, EvalError, Evaluated, Evaluator, Grid, GridError, SharedGrid, evaluate,
    evaluate_value, render_table,
};
pub use gridcalc_parse::{FormulaShape, ParseError, classify, classify_and_build, extract};
pub use gridcalc_workbook::{
    ExtensionPolicy, OpenOutcome, Session, WorkbookConfig, WorkbookError, read_path, read_str,
};

pub mod doc_examples;
pub mod menu;

pub use menu::Menu;
