//! FILENAME: dataset/src/config.rs
//! PURPOSE: Tunables shared by the decoder and the dashboard engine.
//! CONTEXT: Defaults match the layout of the enrollment exports (four banner
//! rows above the header, "Not Applicable" for blank cells). Every field is
//! optional in JSON so a config file only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SKIP_ROWS: usize = 4;
pub const NOT_APPLICABLE: &str = "Not Applicable";
pub const DEFAULT_IDENTITY_COLUMN: &str = "BEIS School ID";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Leading rows skipped before the header row.
    pub skip_rows: usize,

    /// Literal written into cells that were blank in the upload.
    pub not_applicable: String,

    /// Column holding the unique school identifier.
    pub identity_column: String,

    /// Field delimiter for delimited text uploads.
    pub delimiter: char,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            skip_rows: DEFAULT_SKIP_ROWS,
            not_applicable: NOT_APPLICABLE.to_string(),
            identity_column: DEFAULT_IDENTITY_COLUMN.to_string(),
            delimiter: ',',
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The delimiter as a single byte; non-ASCII delimiters fall back to a comma.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}
