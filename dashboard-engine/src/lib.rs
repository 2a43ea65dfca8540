//! FILENAME: dashboard-engine/src/lib.rs
//! Enrollment dashboard engine.
//!
//! Everything between a decoded upload and the tables a dashboard renders.
//! It depends on `dataset` for the shared types and vocabulary and on
//! `decoder` only for the session's upload path.
//!
//! Layers:
//! - `selection` / `filter`: What the user chose and which rows survive it
//! - `cascade`: Legal options per dimension
//! - `measures`: Column-group sums against one dataset header
//! - `aggregate` / `compare`: Dashboard metrics and year-over-year figures
//! - `view`: Renderable chart tables and metric cards
//! - `session`: Two loaded periods plus the active selection

pub mod aggregate;
pub mod cascade;
pub mod compare;
pub mod filter;
pub mod measures;
pub mod selection;
pub mod session;
pub mod view;

pub use aggregate::{
    aggregate, aggregate_subset, aggregate_with, AggregateResult, Baseline, DataStatus,
    GenderBreakdown, Shares, Totals,
};
pub use cascade::{resolve_options, OptionsMap};
pub use compare::{
    compare, compare_subsets, Comparison, ComparisonResult, LevelComparison, PeriodPair, Trend,
};
pub use filter::apply_selection;
pub use selection::FilterSelection;
pub use session::{DashboardSession, LoadStatus, Period};
pub use view::{ChartRow, ChartTable, ComparisonCharts, DashboardCharts, MetricCard, SummaryCards};

pub use dataset::{DashboardConfig, Dataset, Dimension};
pub use decoder::{decode, decode_with, DataFormat, DecodeOutcome};
