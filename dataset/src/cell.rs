//! FILENAME: dataset/src/cell.rs
//! PURPOSE: Defines the value held by a single cell of an enrollment record.
//! CONTEXT: Uploaded files mix text labels (regions, school types) with
//! numeric counts. A cell keeps whichever one was decoded; measure columns
//! are coerced to numbers lazily by `as_measure`.

use serde::{Deserialize, Serialize};

/// Represents the raw data within a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// The cell was never supplied (record built without this column).
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the label used by filters and option lists.
    /// `None` for missing values.
    pub fn label(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(format_label_number(*n)),
            CellValue::Text(s) => Some(s.clone()),
        }
    }

    /// Coerces the value to a count. Sentinels, blanks and anything that does
    /// not parse as a finite number count as zero.
    pub fn as_measure(&self) -> f64 {
        match self {
            CellValue::Empty => 0.0,
            CellValue::Number(n) if n.is_finite() => *n,
            CellValue::Number(_) => 0.0,
            CellValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// Format without unnecessary decimal places (school ids, district numbers).
fn format_label_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}
