//! FILENAME: decoder/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Input is empty")]
    EmptyInput,

    #[error("No header row after skipping {0} rows")]
    MissingHeader(usize),

    #[error("Workbook contains no sheets")]
    NoWorksheet,

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
}
