//! FILENAME: dashboard-engine/src/aggregate.rs
//! Aggregation Engine - turns a filtered subset into dashboard metrics.
//!
//! Algorithm:
//! 1. Baseline totals over the whole dataset (selection-invariant)
//! 2. Apply the selection as a conjunctive row filter
//! 3. Gender totals and distinct school count over the filtered rows
//! 4. Per-axis group sums: education level, elementary grade, junior grade, track
//! 5. Per-grade and per-track averages
//! 6. Guarded percentage shares

use dataset::{
    log_enter, log_exit, safe_percent, DashboardConfig, Dataset, EducationLevel, GradeLevel,
    MeasureGroup, Subset, Track,
};
use serde::{Deserialize, Serialize};

use crate::filter::apply_selection;
use crate::measures::{distinct_count, total_enrollment, BoundGroup, GenderSums};
use crate::selection::FilterSelection;

// ============================================================================
// RESULT TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataStatus {
    Available,
    /// The selection matched no rows; every figure is zero.
    NoData,
}

/// Unfiltered figures used as "% of Nationwide" denominators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    pub total_enrollees: f64,
    pub schools: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub male: f64,
    pub female: f64,
    pub enrollees: f64,
    pub schools: usize,
}

/// Percentages shown under the metric cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shares {
    /// Male share of filtered enrollees.
    pub male: f64,
    pub female: f64,
    /// Filtered enrollees as a share of the baseline total.
    pub enrollees_of_baseline: f64,
    pub schools_of_baseline: f64,
}

/// Male/female figures for one category of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderBreakdown {
    pub label: String,
    pub male: f64,
    pub female: f64,
    pub total: f64,
}

impl GenderBreakdown {
    pub fn new(label: impl Into<String>, sums: GenderSums) -> Self {
        GenderBreakdown {
            label: label.into(),
            male: sums.male,
            female: sums.female,
            total: sums.total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub status: DataStatus,
    pub baseline: Baseline,
    pub totals: Totals,
    pub shares: Shares,
    /// Elementary, Junior HS, Senior HS.
    pub education_levels: Vec<GenderBreakdown>,
    /// K, G1..G6, NG.
    pub elementary_grades: Vec<GenderBreakdown>,
    /// G7..G10, NG.
    pub junior_grades: Vec<GenderBreakdown>,
    /// Tracks ranked by total, largest first.
    pub tracks: Vec<GenderBreakdown>,
    pub grade_averages: Vec<GenderBreakdown>,
    /// Tracks ranked by average total, largest first.
    pub track_averages: Vec<GenderBreakdown>,
}

impl AggregateResult {
    pub fn has_data(&self) -> bool {
        self.status == DataStatus::Available
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Aggregates with the default configuration.
pub fn aggregate(dataset: &Dataset, selection: &FilterSelection) -> AggregateResult {
    aggregate_with(dataset, selection, &DashboardConfig::default())
}

pub fn aggregate_with(
    dataset: &Dataset,
    selection: &FilterSelection,
    config: &DashboardConfig,
) -> AggregateResult {
    log_enter!("AGGREGATE", "aggregate", "rows={}", dataset.len());

    let everything = dataset.all();
    let baseline = Baseline {
        total_enrollees: total_enrollment(&everything),
        schools: distinct_count(&everything, &config.identity_column),
    };

    let filtered = apply_selection(dataset, selection);
    let result = aggregate_subset(&filtered, baseline, &config.identity_column);

    log_exit!(
        "AGGREGATE",
        "aggregate",
        "matched={} enrollees={}",
        filtered.len(),
        result.totals.enrollees
    );
    result
}

/// Aggregates an already-filtered subset against a known baseline.
pub fn aggregate_subset(
    filtered: &Subset<'_>,
    baseline: Baseline,
    identity_column: &str,
) -> AggregateResult {
    let dataset = filtered.dataset();

    let all = BoundGroup::all_measures(dataset).sum(filtered);
    let totals = Totals {
        male: all.male,
        female: all.female,
        enrollees: all.total(),
        schools: distinct_count(filtered, identity_column),
    };

    let shares = Shares {
        male: safe_percent(totals.male, totals.enrollees),
        female: safe_percent(totals.female, totals.enrollees),
        enrollees_of_baseline: safe_percent(totals.enrollees, baseline.total_enrollees),
        schools_of_baseline: safe_percent(totals.schools as f64, baseline.schools as f64),
    };

    let group_sum = |group: &MeasureGroup| BoundGroup::bind(dataset, group).sum(filtered);

    let education_levels = EducationLevel::ALL
        .iter()
        .map(|level| GenderBreakdown::new(level.label(), group_sum(level.group())))
        .collect();

    let grade_breakdown = |grades: &[GradeLevel]| -> Vec<GenderBreakdown> {
        grades
            .iter()
            .map(|grade| GenderBreakdown::new(grade.chart_label(), group_sum(grade.group())))
            .collect()
    };
    let elementary_grades = grade_breakdown(&GradeLevel::ELEMENTARY);
    let junior_grades = grade_breakdown(&GradeLevel::JUNIOR_HIGH);

    let mut tracks: Vec<GenderBreakdown> = Track::ALL
        .iter()
        .map(|track| GenderBreakdown::new(track.label(), group_sum(track.group())))
        .collect();
    rank_by_total(&mut tracks);

    let rows = filtered.len();
    let grade_averages = GradeLevel::AVERAGE_ORDER
        .iter()
        .map(|grade| {
            let means = group_sum(grade.group()).rounded_means(rows);
            GenderBreakdown::new(grade.average_label(), means)
        })
        .collect();

    let mut track_averages: Vec<GenderBreakdown> = Track::ALL
        .iter()
        .map(|track| {
            let means = group_sum(track.group()).halved().rounded_means(rows);
            GenderBreakdown::new(track.label(), means)
        })
        .collect();
    rank_by_total(&mut track_averages);

    AggregateResult {
        status: if filtered.is_empty() {
            DataStatus::NoData
        } else {
            DataStatus::Available
        },
        baseline,
        totals,
        shares,
        education_levels,
        elementary_grades,
        junior_grades,
        tracks,
        grade_averages,
        track_averages,
    }
}

/// Largest total first; ties keep their canonical order.
fn rank_by_total(rows: &mut [GenderBreakdown]) {
    rows.sort_by(|a, b| b.total.total_cmp(&a.total));
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::{CellValue, Dimension, Gender, SeniorGrade};

    fn school(id: f64, region: &str, cells: &[(&'static str, f64)]) -> Vec<(String, CellValue)> {
        let mut row = vec![
            ("BEIS School ID".to_string(), CellValue::Number(id)),
            ("Region".to_string(), CellValue::text(region)),
        ];
        row.extend(cells.iter().map(|(n, v)| (n.to_string(), CellValue::Number(*v))));
        row
    }

    fn sample() -> Dataset {
        let mut ds = Dataset::new(Vec::new());
        ds.push_named(school(1.0, "NCR", &[("K Male", 3.0), ("G7 Female", 4.0)]));
        ds.push_named(school(
            2.0,
            "CAR",
            &[
                ("K Male", 2.0),
                ("G11 TVL Male", 6.0),
                ("G12 TVL Female", 2.0),
                ("G11 ACAD STEM Female", 8.0),
            ],
        ));
        ds
    }

    #[test]
    fn test_totals_and_levels() {
        let result = aggregate(&sample(), &FilterSelection::new());
        assert_eq!(result.status, DataStatus::Available);
        assert_eq!(result.totals.male, 11.0);
        assert_eq!(result.totals.female, 14.0);
        assert_eq!(result.totals.enrollees, 25.0);
        assert_eq!(result.totals.schools, 2);

        let levels: Vec<(&str, f64)> = result
            .education_levels
            .iter()
            .map(|b| (b.label.as_str(), b.total))
            .collect();
        assert_eq!(levels, vec![("Elementary", 5.0), ("Junior HS", 4.0), ("Senior HS", 16.0)]);
    }

    #[test]
    fn test_tracks_ranked_with_stable_ties() {
        let result = aggregate(&sample(), &FilterSelection::new());
        let labels: Vec<&str> = result.tracks.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(&labels[..3], &["STEM", "TVL", "ABM"]);
        assert_eq!(&labels[3..], &["HUMSS", "GAS", "PBM", "SPORTS", "ARTS"]);
    }

    #[test]
    fn test_averages() {
        let result = aggregate(&sample(), &FilterSelection::new());
        // K male: (3 + 2) / 2 = 2.5, ties to even.
        let k = &result.grade_averages[0];
        assert_eq!((k.label.as_str(), k.male, k.total), ("K", 2.0, 2.0));
        assert_eq!(result.grade_averages.last().map(|b| b.label.as_str()), Some("J-NG"));

        // TVL male: ((6 + 0) / 2) per school, averaged over 2 schools = 1.5 -> 2.
        let tvl = result.track_averages.iter().find(|b| b.label == "TVL").unwrap();
        assert_eq!((tvl.male, tvl.female), (2.0, 0.0));
        assert_eq!(result.track_averages[0].label, "STEM");
    }

    #[test]
    fn test_selection_and_shares() {
        let ds = sample();
        let selection = FilterSelection::new().with(Dimension::Region, ["NCR"]);
        let result = aggregate(&ds, &selection);
        assert_eq!(result.baseline.total_enrollees, 25.0);
        assert_eq!(result.baseline.schools, 2);
        assert_eq!(result.totals.enrollees, 7.0);
        assert_eq!(result.shares.schools_of_baseline, 50.0);
        assert!((result.shares.enrollees_of_baseline - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_match_keeps_groups() {
        let ds = sample();
        let selection = FilterSelection::new().with(Dimension::Region, ["BARMM"]);
        let result = aggregate(&ds, &selection);
        assert_eq!(result.status, DataStatus::NoData);
        assert_eq!(result.totals, Totals::default());
        assert_eq!(result.shares, Shares::default());
        assert_eq!(result.tracks.len(), 8);
        assert!(result.grade_averages.iter().all(|b| b.total == 0.0));
    }

    #[test]
    fn test_configured_identity_column() {
        let mut ds = Dataset::new(Vec::new());
        ds.push_named([
            ("School ID", CellValue::text("A")),
            (Track::Arts.column(SeniorGrade::G12, Gender::Male), CellValue::Number(1.0)),
        ]);
        ds.push_named([("School ID", CellValue::text("A"))]);
        let config = DashboardConfig {
            identity_column: "School ID".to_string(),
            ..DashboardConfig::default()
        };
        let result = aggregate_with(&ds, &FilterSelection::new(), &config);
        assert_eq!(result.totals.schools, 1);
        assert_eq!(result.baseline.schools, 1);
    }
}
