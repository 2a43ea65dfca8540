//! FILENAME: dashboard-engine/src/session.rs
//! PURPOSE: State a presentation shell keeps between interactions.
//! CONTEXT: Holds the two uploaded periods and the active selection. The
//! shell owns one session per user; nothing here is global.

use dataset::{log_info, log_warn, DashboardConfig, Dataset};
use decoder::{decode_file_upload, DecodeOutcome};
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_with, AggregateResult};
use crate::cascade::{resolve_options, OptionsMap};
use crate::compare::{compare, ComparisonResult};
use crate::selection::FilterSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Present,
    Previous,
}

impl Period {
    pub fn label(self) -> &'static str {
        match self {
            Period::Present => "present year",
            Period::Previous => "previous year",
        }
    }
}

/// Which periods have been loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    Both,
    PresentOnly,
    PreviousOnly,
    Nothing,
}

impl LoadStatus {
    pub fn message(self) -> &'static str {
        match self {
            LoadStatus::Both => "Present & Previous Year Data Loaded",
            LoadStatus::PresentOnly => "Present Year Data Loaded",
            LoadStatus::PreviousOnly => "Previous Year Data Loaded",
            LoadStatus::Nothing => "No Data Loaded",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    config: DashboardConfig,
    present: Option<Dataset>,
    previous: Option<Dataset>,
    pub selection: FilterSelection,
}

impl DashboardSession {
    pub fn new(config: DashboardConfig) -> Self {
        DashboardSession {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Decodes an upload into `period`, returning the message to show the user.
    /// A failed decode, or one without data rows, leaves the period's
    /// previous dataset in place.
    pub fn load(&mut self, period: Period, bytes: &[u8], file_name: &str) -> String {
        match decode_file_upload(bytes, file_name, &self.config) {
            DecodeOutcome::Decoded(dataset) if !dataset.is_empty() => {
                self.set_dataset(period, dataset);
                format!("{} uploaded as {}", file_name, period.label())
            }
            DecodeOutcome::Decoded(_) => {
                log_warn!("SESSION", "{} has no data rows", file_name);
                format!("Error reading {}", file_name)
            }
            DecodeOutcome::Failed { .. } => format!("Error reading {}", file_name),
        }
    }

    pub fn set_dataset(&mut self, period: Period, dataset: Dataset) {
        log_info!(
            "SESSION",
            "{} dataset set: rows={}",
            period.label(),
            dataset.len()
        );
        match period {
            Period::Present => self.present = Some(dataset),
            Period::Previous => self.previous = Some(dataset),
        }
    }

    pub fn dataset(&self, period: Period) -> Option<&Dataset> {
        match period {
            Period::Present => self.present.as_ref(),
            Period::Previous => self.previous.as_ref(),
        }
    }

    pub fn status(&self) -> LoadStatus {
        match (&self.present, &self.previous) {
            (Some(_), Some(_)) => LoadStatus::Both,
            (Some(_), None) => LoadStatus::PresentOnly,
            (None, Some(_)) => LoadStatus::PreviousOnly,
            (None, None) => LoadStatus::Nothing,
        }
    }

    /// The dataset the dashboard page shows: present, else previous.
    pub fn active_dataset(&self) -> Option<&Dataset> {
        self.present.as_ref().or(self.previous.as_ref())
    }

    pub fn options(&self) -> OptionsMap {
        match self.active_dataset() {
            Some(ds) => resolve_options(ds, &self.selection),
            None => OptionsMap::default(),
        }
    }

    /// Aggregates the active dataset; an empty dataset when nothing is loaded.
    pub fn aggregate(&self) -> AggregateResult {
        let empty = Dataset::empty();
        let dataset = self.active_dataset().unwrap_or(&empty);
        aggregate_with(dataset, &self.selection, &self.config)
    }

    pub fn compare(&self) -> ComparisonResult {
        match (&self.present, &self.previous) {
            (Some(present), Some(previous)) => compare(present, previous, &self.selection),
            _ => ComparisonResult::MissingPeriod,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_all();
    }

    /// Drops both periods and the selection. The configuration stays.
    pub fn clear(&mut self) {
        self.present = None;
        self.previous = None;
        self.selection.clear_all();
    }
}
