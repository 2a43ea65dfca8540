//! FILENAME: dataset/src/lib.rs
//! PURPOSE: Main library entry point for the enrollment dataset model.
//! CONTEXT: Re-exports the table types, the fixed column vocabulary and the
//! shared configuration used by the decoder and the dashboard engine.

pub mod cell;
pub mod config;
pub mod logging;
pub mod number_format;
pub mod table;
pub mod vocabulary;

// Macros reference the facade through this path.
pub use log;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use config::{ConfigError, DashboardConfig, DEFAULT_IDENTITY_COLUMN, NOT_APPLICABLE};
pub use number_format::{format_count, format_percent, safe_percent, share_caption};
pub use table::{ColumnIndex, Dataset, Record, Subset};
pub use vocabulary::{
    is_measure_column, ColumnPair, Dimension, EducationLevel, Gender, GradeLevel, MeasureAxis,
    MeasureColumn, MeasureGroup, SeniorGrade, Track, MEASURE_COLUMNS,
};
