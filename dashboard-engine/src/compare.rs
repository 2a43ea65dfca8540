//! FILENAME: dashboard-engine/src/compare.rs
//! PURPOSE: Year-over-year comparison of two independently filtered periods.
//! CONTEXT: Both datasets are filtered by the same selection. Level, track
//! and grade groups are the vocabulary groups used by aggregation, so level
//! figures always add up to the period total.

use dataset::{
    format_count, format_percent, log_debug, safe_percent, Dataset, EducationLevel, GradeLevel,
    MeasureGroup, Subset, Track,
};
use serde::{Deserialize, Serialize};

use crate::filter::apply_selection;
use crate::measures::{total_enrollment, BoundGroup};
use crate::selection::FilterSelection;

// ============================================================================
// RESULT TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Growth,
    Decline,
    NoChange,
}

impl Trend {
    pub fn from_difference(difference: f64) -> Self {
        if difference > 0.0 {
            Trend::Growth
        } else if difference < 0.0 {
            Trend::Decline
        } else {
            Trend::NoChange
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            Trend::Growth => "↑",
            Trend::Decline => "↓",
            Trend::NoChange => "→",
        }
    }
}

/// One category with its figure in each period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPair {
    pub label: String,
    pub previous: f64,
    pub present: f64,
}

impl PeriodPair {
    pub fn difference(&self) -> f64 {
        self.present - self.previous
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelComparison {
    pub label: String,
    pub previous: f64,
    pub present: f64,
    /// Net decline, never negative. Students who left and were replaced by
    /// transferees do not show up here.
    pub dropout: f64,
    pub dropout_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub total_present: f64,
    pub total_previous: f64,
    pub difference: f64,
    pub percent_change: f64,
    pub trend: Trend,
    /// Elementary, JHS, SHS.
    pub levels: Vec<LevelComparison>,
    /// Canonical track order.
    pub tracks: Vec<PeriodPair>,
    /// K..G6, Elem NG, G7..G10, JHS NG.
    pub grades: Vec<PeriodPair>,
}

impl Comparison {
    /// Growth card text, e.g. `"↑ 1,204 (12.5%)"`.
    pub fn headline(&self) -> String {
        format!(
            "{} {} ({})",
            self.trend.indicator(),
            format_count(self.difference.abs()),
            format_percent(self.percent_change)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ComparisonResult {
    Compared(Comparison),
    /// At least one period has no rows under the selection.
    #[serde(rename_all = "camelCase")]
    NoData {
        present_empty: bool,
        previous_empty: bool,
    },
    /// One of the two periods was never loaded.
    MissingPeriod,
}

impl ComparisonResult {
    pub fn comparison(&self) -> Option<&Comparison> {
        match self {
            ComparisonResult::Compared(c) => Some(c),
            _ => None,
        }
    }

    /// Message shown in place of the growth card when nothing was compared.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ComparisonResult::Compared(_) => None,
            ComparisonResult::NoData { .. } => Some("No data available for the selected filters"),
            ComparisonResult::MissingPeriod => {
                Some("Upload both present and previous year data to see growth comparison")
            }
        }
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Filters both periods by `selection` and compares them.
pub fn compare(
    present: &Dataset,
    previous: &Dataset,
    selection: &FilterSelection,
) -> ComparisonResult {
    let present = apply_selection(present, selection);
    let previous = apply_selection(previous, selection);
    compare_subsets(&present, &previous)
}

/// Compares two already-filtered subsets.
pub fn compare_subsets(present: &Subset<'_>, previous: &Subset<'_>) -> ComparisonResult {
    if present.is_empty() || previous.is_empty() {
        log_debug!(
            "COMPARE",
            "no data: present_rows={} previous_rows={}",
            present.len(),
            previous.len()
        );
        return ComparisonResult::NoData {
            present_empty: present.is_empty(),
            previous_empty: previous.is_empty(),
        };
    }

    let total_present = total_enrollment(present);
    let total_previous = total_enrollment(previous);
    let difference = total_present - total_previous;

    let pair = |label: &str, group: &MeasureGroup| PeriodPair {
        label: label.to_string(),
        previous: group_total(previous, group),
        present: group_total(present, group),
    };

    let levels = EducationLevel::ALL
        .iter()
        .map(|level| {
            let figures = pair(level.short_label(), level.group());
            let dropout = (figures.previous - figures.present).max(0.0);
            LevelComparison {
                label: figures.label,
                previous: figures.previous,
                present: figures.present,
                dropout,
                dropout_rate: safe_percent(dropout, figures.previous),
            }
        })
        .collect();

    let tracks = Track::ALL
        .iter()
        .map(|track| pair(track.label(), track.group()))
        .collect();

    let grades = GradeLevel::ALL
        .iter()
        .map(|grade| pair(grade.column_prefix(), grade.group()))
        .collect();

    ComparisonResult::Compared(Comparison {
        total_present,
        total_previous,
        difference,
        percent_change: safe_percent(difference, total_previous),
        trend: Trend::from_difference(difference),
        levels,
        tracks,
        grades,
    })
}

fn group_total(subset: &Subset<'_>, group: &MeasureGroup) -> f64 {
    BoundGroup::bind(subset.dataset(), group).sum(subset).total()
}
