//! Display rendering of cells and whole grids.

use std::fmt;

use gridcalc_common::{CellCoord, CellValue};

use crate::evaluator::{EvalConfig, Evaluator};
use crate::grid::CellSource;

/// What a cell shows: literals as themselves, formulas as their computed
/// result. A formula whose evaluation fails shows its cell error code.
pub fn display<S: CellSource + ?Sized>(
    value: &CellValue,
    at: CellCoord,
    source: &S,
    config: EvalConfig,
) -> String {
    if let Some(text) = value.literal_display() {
        return text;
    }
    match Evaluator::with_config(source, config).evaluate_cell(at) {
        Ok(Some(result)) => result.render(),
        // `value` is a formula that does not live at `at`; evaluate it
        // detached from the grid position
        Ok(None) => match value.as_formula() {
            Some(expr) => match Evaluator::with_config(source, config).evaluate_value(expr) {
                Ok(result) => result.render(),
                Err(err) => err.cell_kind().code().to_string(),
            },
            None => String::new(),
        },
        Err(err) => err.cell_kind().code().to_string(),
    }
}

/// Display text of the cell at `(row, col)`, or `None` outside the grid.
pub fn display_cell<S: CellSource + ?Sized>(
    source: &S,
    row: u32,
    col: u32,
    config: EvalConfig,
) -> Option<String> {
    let at = CellCoord::new(row, col);
    if !source.contains(at) {
        return None;
    }
    let value = source.cell_at(row, col)?;
    Some(display(value, at, source, config))
}

/// Every cell's display text, with the width of each column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub rows: Vec<Vec<String>>,
    pub widths: Vec<usize>,
}

impl Rendered {
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Table layout: each cell as `|value` padded to its column's width, each
/// row closed with `|`, and a blank line after the last row.
impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for (text, width) in row.iter().zip(&self.widths) {
                write!(f, "|{text:<width$}")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f)
    }
}

pub fn render_grid<S: CellSource + ?Sized>(source: &S, config: EvalConfig) -> Rendered {
    let (rows, cols) = source.bounds();
    let rows: Vec<Vec<String>> = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| display_cell(source, r, c, config).unwrap_or_default())
                .collect()
        })
        .collect();
    let mut widths = vec![0usize; cols as usize];
    for row in &rows {
        for (w, text) in widths.iter_mut().zip(row) {
            *w = (*w).max(text.chars().count());
        }
    }
    Rendered { rows, widths }
}

pub fn render_table<S: CellSource + ?Sized>(source: &S, config: EvalConfig) -> String {
    render_grid(source, config).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;
    use gridcalc_common::{FormulaExpr, Operator};

    fn sum(row1: u32, col1: u32, row2: u32, col2: u32) -> CellValue {
        FormulaExpr::CoordCoord {
            row1,
            col1,
            row2,
            col2,
            op: Operator::Add,
        }
        .into()
    }

    #[test]
    fn literal_display_forms() {
        let grid = Grid::from_rows(vec![vec![
            CellValue::Integer(-4),
            CellValue::Double(2.5),
            CellValue::Text("plain".into()),
        ]]);
        let cfg = EvalConfig::default();
        assert_eq!(display_cell(&grid, 0, 0, cfg).as_deref(), Some("-4"));
        assert_eq!(display_cell(&grid, 0, 1, cfg).as_deref(), Some("2.500000"));
        assert_eq!(display_cell(&grid, 0, 2, cfg).as_deref(), Some("plain"));
        assert_eq!(display_cell(&grid, 0, 3, cfg), None);
    }

    #[test]
    fn formula_shows_result_and_cycles_show_circ() {
        let grid = Grid::from_rows(vec![vec![
            CellValue::Integer(3),
            CellValue::Integer(4),
            sum(0, 0, 0, 1),
            sum(0, 3, 0, 0),
        ]]);
        let cfg = EvalConfig::default();
        assert_eq!(display_cell(&grid, 0, 2, cfg).as_deref(), Some("7"));
        assert_eq!(display_cell(&grid, 0, 3, cfg).as_deref(), Some("#CIRC!"));
    }

    #[test]
    fn detached_formula_is_evaluated_in_place() {
        let grid = Grid::from_rows(vec![vec![CellValue::Integer(3), CellValue::Integer(4)]]);
        let value = sum(0, 0, 0, 1);
        assert_eq!(
            display(&value, CellCoord::new(0, 0), &grid, EvalConfig::default()),
            "7"
        );
    }

    #[test]
    fn table_pads_columns_to_widest() {
        let grid = Grid::from_rows(vec![
            vec![CellValue::Integer(1), CellValue::Text("abc".into())],
            vec![CellValue::Integer(100), CellValue::empty()],
        ]);
        let rendered = render_grid(&grid, EvalConfig::default());
        assert_eq!(rendered.widths, vec![3, 3]);
        assert_eq!(rendered.cell(1, 0), Some("100"));
        assert_eq!(rendered.to_string(), "|1  |abc|\n|100|   |\n\n");
    }

    #[test]
    fn empty_grid_prints_blank_line() {
        assert_eq!(render_table(&Grid::default(), EvalConfig::default()), "\n");
    }
}
