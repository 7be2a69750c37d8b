use crate::{EvalConfig, Grid, classify_and_build, evaluate, extract, read_str};

/// Load `table` from its file encoding, evaluate `formula` against it and
/// return the displayed result.
///
/// This helper is intended for documentation examples to avoid repetitive setup.
///
/// # Example
///
/// ```rust
/// # use gridcalc::doc_examples::eval_against;
/// let value = eval_against("3,4\n", "=R0C0+R0C1")?;
/// assert_eq!(value, "7");
/// # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
/// ```
pub fn eval_against(
    table: &str,
    formula: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let grid = read_str(table)?.grid;
    Ok(evaluate(&extract(formula)?, &grid)?)
}

/// Build a one-row grid from raw tokens and render it as a table.
///
/// # Example
///
/// ```rust
/// # use gridcalc::doc_examples::table_of;
/// let table = table_of(&["2", "\"x\"", "=R0C0*3"])?;
/// assert_eq!(table, "|2|x|6.000000|\n\n");
/// # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
/// ```
pub fn table_of(tokens: &[&str]) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let row = tokens
        .iter()
        .map(|t| classify_and_build(t))
        .collect::<Result<Vec<_>, _>>()?;
    let grid = Grid::from_rows(vec![row]);
    Ok(crate::render_table(&grid, EvalConfig::default()))
}
