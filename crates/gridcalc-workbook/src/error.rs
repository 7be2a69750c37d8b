use std::io;
use std::path::PathBuf;

use gridcalc_eval::GridError;
use gridcalc_parse::ParseError;
use thiserror::Error;

use crate::config::ExtensionPolicy;

pub type Result<T> = std::result::Result<T, WorkbookError>;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("wrong file extension for {} ({policy} policy expects .txt)", path.display())]
    InvalidExtension {
        path: PathBuf,
        policy: ExtensionPolicy,
    },

    #[error("invalid value for R{row}C{col}: {source}")]
    InvalidCellEdit {
        row: u32,
        col: u32,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    OutOfBounds(#[from] GridError),

    #[error("no file path is associated with the table")]
    NoPath,
}
