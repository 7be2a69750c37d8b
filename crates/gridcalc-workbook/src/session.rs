//! An editing session over one grid file.
//!
//! The session owns the grid and remembers the path it was loaded from or
//! last saved to. Opening is a no-op once a table is loaded. Edits replace
//! one cell immediately; an edit whose value does not parse, or whose
//! coordinate lies outside the grid, leaves the grid unchanged.

use std::io::Write;
use std::path::{Path, PathBuf};

use gridcalc_common::CellValue;
use gridcalc_eval::{Grid, Rendered, render_grid};
use gridcalc_parse::classify_and_build;

use crate::backends::csv::{self, RejectedToken, SaveDestination};
use crate::config::WorkbookConfig;
use crate::error::{Result, WorkbookError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened {
        rows: u32,
        cols: u32,
        rejected: Vec<RejectedToken>,
    },
    AlreadyOpen,
}

#[derive(Debug, Default)]
pub struct Session {
    grid: Grid,
    path: Option<PathBuf>,
    config: WorkbookConfig,
    loaded: bool,
    dirty: bool,
}

impl Session {
    pub fn new(config: WorkbookConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// A session over an in-memory grid with no backing file yet.
    pub fn from_grid(grid: Grid, config: WorkbookConfig) -> Self {
        Self {
            grid,
            path: None,
            config,
            loaded: true,
            dirty: false,
        }
    }

    pub fn config(&self) -> &WorkbookConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.loaded
    }

    /// True when there are edits not yet written to a file.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<OpenOutcome> {
        if self.loaded {
            return Ok(OpenOutcome::AlreadyOpen);
        }
        let path = path.as_ref();
        self.config.extension_policy.check(path)?;
        let load = csv::read_path(path)?;
        let (rows, cols) = load.grid.bounds();
        self.grid = load.grid;
        self.path = Some(path.to_path_buf());
        self.loaded = true;
        self.dirty = false;
        Ok(OpenOutcome::Opened {
            rows,
            cols,
            rejected: load.rejected,
        })
    }

    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(WorkbookError::NoPath)?;
        csv::write_grid_to(&self.grid, SaveDestination::Path(&path))?;
        self.dirty = false;
        Ok(())
    }

    /// Save to `path` and make it the session's file.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.config.extension_policy.check(path)?;
        csv::write_grid_to(&self.grid, SaveDestination::Path(path))?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Parse `input` and store it at `(row, col)`, returning the replaced
    /// value.
    pub fn edit_cell(&mut self, row: u32, col: u32, input: &str) -> Result<CellValue> {
        let token = input.trim();
        let value = classify_and_build(token)
            .map_err(|source| WorkbookError::InvalidCellEdit { row, col, source })?;
        let previous = self.grid.set(row, col, value)?;
        self.dirty = true;
        #[cfg(feature = "tracing")]
        tracing::debug!(row, col, token, "cell edited");
        Ok(previous)
    }

    pub fn render(&self) -> Rendered {
        render_grid(&self.grid, self.config.eval)
    }

    pub fn print<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}", self.render())?;
        Ok(())
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_eval::GridError;
    use gridcalc_parse::ParseError;

    fn session() -> Session {
        Session::from_grid(
            Grid::from_rows(vec![vec![CellValue::Integer(3), CellValue::Integer(4)]]),
            WorkbookConfig::default(),
        )
    }

    #[test]
    fn edit_replaces_and_marks_dirty() {
        let mut s = session();
        let prev = s.edit_cell(0, 1, "  =R0C0*2 ").unwrap();
        assert_eq!(prev, CellValue::Integer(4));
        assert!(s.is_dirty());
        assert_eq!(s.render().cell(0, 1), Some("6.000000"));
    }

    #[test]
    fn invalid_edit_leaves_grid_unchanged() {
        let mut s = session();
        let before = s.grid().clone();
        let err = s.edit_cell(0, 0, "hello").unwrap_err();
        assert!(matches!(
            err,
            WorkbookError::InvalidCellEdit {
                row: 0,
                col: 0,
                source: ParseError::Rejected { .. }
            }
        ));
        assert_eq!(s.grid(), &before);
        assert!(!s.is_dirty());
    }

    #[test]
    fn out_of_bounds_edit_is_reported() {
        let mut s = session();
        let before = s.grid().clone();
        let err = s.edit_cell(5, 0, "1").unwrap_err();
        assert!(matches!(
            err,
            WorkbookError::OutOfBounds(GridError::OutOfBounds { .. })
        ));
        assert_eq!(s.grid(), &before);
    }

    #[test]
    fn save_without_path() {
        let mut s = session();
        assert!(matches!(s.save(), Err(WorkbookError::NoPath)));
    }

    #[test]
    fn print_writes_table() {
        let s = session();
        let mut out = Vec::new();
        s.print(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "|3|4|\n\n");
    }

    #[test]
    fn new_session_is_empty() {
        let mut s = Session::new(WorkbookConfig::default());
        assert!(!s.is_open());
        assert_eq!(s.grid().bounds(), (0, 0));
        assert!(s.edit_cell(0, 0, "1").is_err());
    }
}
