//! Rectangular cell storage and the read seam the evaluator consumes.

use gridcalc_common::{CellCoord, CellValue};
use thiserror::Error;

/// Read-only view of a grid. The evaluator only ever sees cells through this
/// trait, so anything that can answer bounds and cell lookups can be
/// evaluated against.
pub trait CellSource {
    /// `(rows, cols)`; coordinates at or beyond either bound are out of range.
    fn bounds(&self) -> (u32, u32);

    fn cell_at(&self, row: u32, col: u32) -> Option<&CellValue>;

    fn contains(&self, coord: CellCoord) -> bool {
        let (rows, cols) = self.bounds();
        coord.within(rows, cols)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds { coord: CellCoord, rows: u32, cols: u32 },
}

/// Row-major rectangle of cells. Every row has exactly `cols` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    cells: Vec<Vec<CellValue>>,
    cols: u32,
}

impl Grid {
    /// A `rows` x `cols` grid of empty text cells.
    pub fn new(rows: u32, cols: u32) -> Self {
        let cells = (0..rows)
            .map(|_| vec![CellValue::empty(); cols as usize])
            .collect();
        Self { cells, cols }
    }

    /// Build from ragged rows, padding each to the widest with empty text.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<CellValue>>,
    {
        let mut cells: Vec<Vec<CellValue>> = rows.into_iter().collect();
        let width = cells.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut cells {
            row.resize(width, CellValue::empty());
        }
        Self {
            cells,
            cols: width as u32,
        }
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.cells.len() as u32, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() || self.cols == 0
    }

    pub fn cell_at(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(row as usize)?.get(col as usize)
    }

    /// Replace one cell, returning the previous value. Out-of-bounds writes
    /// leave the grid untouched.
    pub fn set(&mut self, row: u32, col: u32, value: CellValue) -> Result<CellValue, GridError> {
        let (rows, cols) = self.bounds();
        match self
            .cells
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(GridError::OutOfBounds {
                coord: CellCoord::new(row, col),
                rows,
                cols,
            }),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Every cell with its coordinate, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &CellValue)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, v)| (CellCoord::new(r as u32, c as u32), v))
        })
    }

    pub fn formula_count(&self) -> usize {
        self.iter().filter(|(_, v)| v.is_formula()).count()
    }
}

impl CellSource for Grid {
    fn bounds(&self) -> (u32, u32) {
        Grid::bounds(self)
    }

    fn cell_at(&self, row: u32, col: u32) -> Option<&CellValue> {
        Grid::cell_at(self, row, col)
    }
}
