pub mod csv;

pub use csv::{CsvLoad, RejectedToken, SaveDestination};
