//! A grid shared between threads.
//!
//! Every operation takes the lock for its whole duration, so an edit never
//! interleaves with a recursive evaluation or a render pass.

use std::sync::Arc;

use gridcalc_common::{CellCoord, CellValue};
use parking_lot::Mutex;

use crate::evaluator::{EvalConfig, EvalError, Evaluated, Evaluator};
use crate::grid::{Grid, GridError};
use crate::render::{Rendered, display_cell, render_grid};

#[derive(Debug, Clone, Default)]
pub struct SharedGrid {
    inner: Arc<Mutex<Grid>>,
    config: EvalConfig,
}

impl SharedGrid {
    pub fn new(grid: Grid) -> Self {
        Self::with_config(grid, EvalConfig::default())
    }

    pub fn with_config(grid: Grid, config: EvalConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(grid)),
            config,
        }
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    pub fn bounds(&self) -> (u32, u32) {
        self.inner.lock().bounds()
    }

    pub fn get(&self, row: u32, col: u32) -> Option<CellValue> {
        self.inner.lock().cell_at(row, col).cloned()
    }

    pub fn set(&self, row: u32, col: u32, value: CellValue) -> Result<CellValue, GridError> {
        self.inner.lock().set(row, col, value)
    }

    pub fn evaluate_cell(&self, row: u32, col: u32) -> Result<Option<Evaluated>, EvalError> {
        let guard = self.inner.lock();
        Evaluator::with_config(&*guard, self.config).evaluate_cell(CellCoord::new(row, col))
    }

    pub fn display_cell(&self, row: u32, col: u32) -> Option<String> {
        let guard = self.inner.lock();
        display_cell(&*guard, row, col, self.config)
    }

    pub fn render(&self) -> Rendered {
        let guard = self.inner.lock();
        render_grid(&*guard, self.config)
    }

    /// Run `f` with exclusive access to the grid.
    pub fn with_grid<R>(&self, f: impl FnOnce(&mut Grid) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    pub fn snapshot(&self) -> Grid {
        self.inner.lock().clone()
    }
}

impl From<Grid> for SharedGrid {
    fn from(grid: Grid) -> Self {
        SharedGrid::new(grid)
    }
}
