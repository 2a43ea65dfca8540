//! FILENAME: decoder/src/lib.rs
//! Enrollment Record Decoder
//!
//! Turns an uploaded byte blob plus a declared format into a `Dataset`.
//! Decoding never fails past this boundary: `decode` reports problems as
//! `DecodeOutcome::Failed` and callers fall back to an empty dataset.

mod csv_reader;
mod error;
mod header;
mod spreadsheet_reader;

pub use csv_reader::{decode_text, load_csv};
pub use error::DecodeError;
pub use header::{build_header, normalize_column_name};
pub use spreadsheet_reader::load_spreadsheet;

use std::path::Path;

use dataset::{log_info, log_warn, DashboardConfig, Dataset};

// ============================================================================
// FORMAT
// ============================================================================

/// Declared format of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Comma-delimited text.
    Csv,
    /// Spreadsheet binary (xlsx, xls, xlsb, ods).
    Spreadsheet,
}

impl DataFormat {
    /// Infers the format from an upload's file name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.contains("csv") {
            Some(DataFormat::Csv)
        } else if lower.contains("xls") || lower.ends_with(".ods") {
            Some(DataFormat::Spreadsheet)
        } else {
            None
        }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of a decode that never raises.
#[derive(Debug, Clone)]
pub enum DecodeOutcome {
    Decoded(Dataset),
    Failed { message: String },
}

impl DecodeOutcome {
    fn failed(error: DecodeError) -> Self {
        DecodeOutcome::Failed {
            message: error.to_string(),
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, DecodeOutcome::Decoded(_))
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            DecodeOutcome::Decoded(ds) => Some(ds),
            DecodeOutcome::Failed { .. } => None,
        }
    }

    /// Failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            DecodeOutcome::Decoded(_) => None,
            DecodeOutcome::Failed { message } => Some(message),
        }
    }

    /// The decoded dataset, or an empty one on failure.
    pub fn into_dataset(self) -> Dataset {
        match self {
            DecodeOutcome::Decoded(ds) => ds,
            DecodeOutcome::Failed { .. } => Dataset::empty(),
        }
    }
}

impl From<Result<Dataset, DecodeError>> for DecodeOutcome {
    fn from(result: Result<Dataset, DecodeError>) -> Self {
        match result {
            Ok(ds) => DecodeOutcome::Decoded(ds),
            Err(e) => DecodeOutcome::failed(e),
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Decodes bytes in the given format, propagating the underlying error.
pub fn try_decode(
    bytes: &[u8],
    format: DataFormat,
    config: &DashboardConfig,
) -> Result<Dataset, DecodeError> {
    match format {
        DataFormat::Csv => load_csv(bytes, config),
        DataFormat::Spreadsheet => load_spreadsheet(bytes, config),
    }
}

/// Decodes with the default configuration.
pub fn decode(bytes: &[u8], format: DataFormat) -> DecodeOutcome {
    decode_with(bytes, format, &DashboardConfig::default())
}

pub fn decode_with(bytes: &[u8], format: DataFormat, config: &DashboardConfig) -> DecodeOutcome {
    let outcome = DecodeOutcome::from(try_decode(bytes, format, config));
    match &outcome {
        DecodeOutcome::Decoded(ds) => {
            log_info!(
                "DECODE",
                "decoded {:?} upload: rows={} columns={}",
                format,
                ds.len(),
                ds.columns().len()
            );
        }
        DecodeOutcome::Failed { message } => {
            log_warn!("DECODE", "failed to decode {:?} upload: {}", format, message);
        }
    }
    outcome
}

/// Decodes an upload whose format is inferred from its file name.
pub fn decode_file_upload(bytes: &[u8], file_name: &str, config: &DashboardConfig) -> DecodeOutcome {
    match DataFormat::from_file_name(file_name) {
        Some(format) => decode_with(bytes, format, config),
        None => {
            log_warn!("DECODE", "unsupported upload: {}", file_name);
            DecodeOutcome::failed(DecodeError::UnsupportedFormat(file_name.to_string()))
        }
    }
}

/// Reads and decodes a file from disk.
pub fn decode_path(path: &Path, config: &DashboardConfig) -> DecodeOutcome {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match std::fs::read(path) {
        Ok(bytes) => decode_file_upload(&bytes, &file_name, config),
        Err(e) => {
            log_warn!("DECODE", "cannot read {}: {}", path.display(), e);
            DecodeOutcome::failed(DecodeError::Io(e))
        }
    }
}
