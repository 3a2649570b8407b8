//! Load cash flow sequences from CSV
//!
//! Expected layout, one row per period starting at 0:
//!
//! ```text
//! period,cash_flow
//! 0,-1000
//! 1,300
//! ```

use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a cash flow file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open cash flow file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed cash flow CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Expected period {expected} but found period {found}")]
    PeriodGap { expected: u32, found: u32 },

    #[error("Cash flow file contains no rows")]
    Empty,
}

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    period: u32,
    cash_flow: f64,
}

/// Load cash flows from a CSV file
pub fn load_cash_flows<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, LoadError> {
    let file = File::open(path.as_ref())?;
    let flows = load_cash_flows_from_reader(file)?;
    debug!("Loaded {} cash flows from {}", flows.len(), path.as_ref().display());
    Ok(flows)
}

/// Load cash flows from any reader producing CSV text
pub fn load_cash_flows_from_reader<R: Read>(reader: R) -> Result<Vec<f64>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut flows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let expected = flows.len() as u32;
        if row.period != expected {
            return Err(LoadError::PeriodGap {
                expected,
                found: row.period,
            });
        }
        flows.push(row.cash_flow);
    }

    if flows.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(flows)
}
