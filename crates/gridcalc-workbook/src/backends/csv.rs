//! Comma-separated grid files.
//!
//! One line is one grid row. Fields are split on `,` outside quoted text; a
//! `"` opens or closes quoted text unless it follows a `\`. Spaces and tabs
//! outside quoted text are dropped. Each raw field, quotes and escapes
//! intact, goes to [`classify_and_build`]; fields it rejects load as empty
//! text and are reported in [`CsvLoad::rejected`].
//!
//! Saving writes each cell's storage form, so a saved grid loads back to the
//! same cells.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::Path;

use gridcalc_common::{CellCoord, CellValue};
use gridcalc_eval::Grid;
use gridcalc_parse::{ParseError, classify_and_build};

use crate::error::{Result, WorkbookError};

const DELIMITER: char = ',';
const QUOTE: char = '"';
const ESCAPE: char = '\\';

/// A field that could not be turned into a cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedToken {
    pub coord: CellCoord,
    pub token: String,
    pub error: ParseError,
}

/// A loaded grid together with the fields that were replaced by empty text.
#[derive(Debug, Clone, Default)]
pub struct CsvLoad {
    pub grid: Grid,
    pub rejected: Vec<RejectedToken>,
}

/// Where [`write_grid_to`] sends the encoded grid.
pub enum SaveDestination<'a> {
    Path(&'a Path),
    Writer(&'a mut dyn Write),
    Bytes,
}

/// Split one line into raw field tokens.
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_text = false;
    let mut escaped = false;

    for ch in line.chars() {
        if in_text {
            field.push(ch);
            if escaped {
                escaped = false;
            } else if ch == ESCAPE {
                escaped = true;
            } else if ch == QUOTE {
                in_text = false;
            }
            continue;
        }
        match ch {
            DELIMITER => fields.push(std::mem::take(&mut field)),
            ' ' | '\t' => {}
            QUOTE => {
                in_text = true;
                field.push(ch);
            }
            _ => field.push(ch),
        }
    }
    fields.push(field);
    fields
}

/// Join storage forms into one line, without the newline.
pub fn join_record<'a, I>(cells: I) -> String
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let mut line = String::new();
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            line.push(DELIMITER);
        }
        line.push_str(&cell.to_storage());
    }
    line
}

pub fn read_grid<R: BufRead>(reader: R) -> Result<CsvLoad> {
    let mut rows = Vec::new();
    let mut rejected = Vec::new();

    for (r, line) in reader.lines().enumerate() {
        let line = line?;
        let row: Vec<CellValue> = split_record(&line)
            .into_iter()
            .enumerate()
            .map(|(c, token)| match classify_and_build(&token) {
                Ok(value) => value,
                Err(error) => {
                    let coord = CellCoord::new(r as u32, c as u32);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(cell = %coord, token = %token, %error, "rejected token");
                    rejected.push(RejectedToken {
                        coord,
                        token,
                        error,
                    });
                    CellValue::empty()
                }
            })
            .collect();
        rows.push(row);
    }

    let grid = Grid::from_rows(rows);
    #[cfg(feature = "tracing")]
    {
        let (rows, cols) = grid.bounds();
        tracing::info!(
            rows,
            cols,
            formulas = grid.formula_count(),
            rejected = rejected.len(),
            "grid loaded"
        );
    }
    Ok(CsvLoad { grid, rejected })
}

pub fn read_path<P: AsRef<Path>>(path: P) -> Result<CsvLoad> {
    let path = path.as_ref();
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("csv_read", path = %path.display()).entered();
    let file = File::open(path).map_err(|source| WorkbookError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_grid(BufReader::new(file))
}

pub fn read_bytes(bytes: &[u8]) -> Result<CsvLoad> {
    read_grid(Cursor::new(bytes))
}

pub fn read_str(text: &str) -> Result<CsvLoad> {
    read_bytes(text.as_bytes())
}

/// Write every row as its storage forms joined by `,`, each line ending in a
/// newline.
pub fn write_grid<W: Write + ?Sized>(grid: &Grid, writer: &mut W) -> Result<()> {
    for row in grid.rows() {
        writeln!(writer, "{}", join_record(row))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_grid_to(grid: &Grid, dest: SaveDestination<'_>) -> Result<Option<Vec<u8>>> {
    match dest {
        SaveDestination::Path(path) => {
            let file = File::create(path).map_err(|source| WorkbookError::Create {
                path: path.to_path_buf(),
                source,
            })?;
            let mut out = BufWriter::new(file);
            write_grid(grid, &mut out)?;
            #[cfg(feature = "tracing")]
            tracing::info!(path = %path.display(), "grid saved");
            Ok(None)
        }
        SaveDestination::Writer(writer) => {
            write_grid(grid, writer)?;
            Ok(None)
        }
        SaveDestination::Bytes => {
            let mut buf = Vec::new();
            write_grid(grid, &mut buf)?;
            Ok(Some(buf))
        }
    }
}

pub fn to_text(grid: &Grid) -> Result<String> {
    let bytes = write_grid_to(grid, SaveDestination::Bytes)?.unwrap_or_default();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
