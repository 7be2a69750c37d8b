pub mod evaluator;
pub mod grid;
pub mod render;
pub mod shared;

pub use evaluator::{
    DEFAULT_MAX_DEPTH, EvalConfig, EvalError, Evaluated, Evaluator, evaluate, evaluate_value,
};
pub use grid::{CellSource, Grid, GridError};
pub use render::{Rendered, display, display_cell, render_grid, render_table};
pub use shared::SharedGrid;
