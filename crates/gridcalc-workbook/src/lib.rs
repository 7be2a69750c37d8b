pub mod backends;
pub mod config;
pub mod error;
pub mod session;

pub use backends::csv::{read_path, read_str, to_text, write_grid};
pub use backends::{CsvLoad, RejectedToken, SaveDestination};
pub use config::{ExtensionPolicy, WorkbookConfig};
pub use error::{Result, WorkbookError};
pub use session::{OpenOutcome, Session};

// Re-export for convenience
pub use gridcalc_common::CellValue;
pub use gridcalc_eval::{EvalConfig, Grid};
