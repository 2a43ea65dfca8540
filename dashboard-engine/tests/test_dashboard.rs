//! FILENAME: tests/test_dashboard.rs
//! Integration tests: decode, cascade, aggregate and compare end to end.

mod common;

use common::{dataset_of, present_year, previous_year, to_csv, SchoolRow};
use dashboard_engine::{
    aggregate, compare, decode, resolve_options, ComparisonResult, DashboardSession, DataFormat,
    DataStatus, Dataset, Dimension, FilterSelection, Period, Trend,
};

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_duplicate_school_ids_count_once() {
    let ds = dataset_of(vec![
        SchoolRow::new(1.0).dim(Dimension::Region, "NCR").count("K Male", 10.0),
        SchoolRow::new(1.0).dim(Dimension::Region, "NCR").count("K Female", 5.0),
    ]);
    let result = aggregate(&ds, &FilterSelection::new());
    assert_eq!(result.totals.male, 10.0);
    assert_eq!(result.totals.female, 5.0);
    assert_eq!(result.totals.enrollees, 15.0);
    assert_eq!(result.totals.schools, 1);
    assert_eq!(result.baseline.schools, 1);
}

#[test]
fn test_empty_dataset_reports_no_data() {
    let result = aggregate(&Dataset::empty(), &FilterSelection::new());
    assert_eq!(result.status, DataStatus::NoData);
    assert_eq!(result.totals.enrollees, 0.0);
    assert_eq!(result.baseline.total_enrollees, 0.0);
    assert_eq!(result.shares.male, 0.0);
    assert_eq!(result.shares.schools_of_baseline, 0.0);
    assert!(result.charts().education.no_data);
}

#[test]
fn test_growth_from_empty_previous_total() {
    let present = dataset_of(vec![SchoolRow::new(1.0)
        .dim(Dimension::Region, "NCR")
        .count("G3 Male", 50.0)]);
    let previous = dataset_of(vec![SchoolRow::new(1.0).dim(Dimension::Region, "NCR")]);
    let result = compare(&present, &previous, &FilterSelection::new());
    let c = result.comparison().expect("both periods have rows");
    assert_eq!(c.total_previous, 0.0);
    assert_eq!(c.difference, 50.0);
    assert_eq!(c.percent_change, 0.0);
    assert_eq!(c.trend, Trend::Growth);
}

#[test]
fn test_region_only_in_present_short_circuits() {
    let selection = FilterSelection::new().with(Dimension::Region, ["NCR"]);
    let result = compare(&present_year(), &previous_year(), &selection);
    assert_eq!(
        result,
        ComparisonResult::NoData {
            present_empty: false,
            previous_empty: true,
        }
    );
    assert!(result.charts().levels.no_data);
}

// ============================================================================
// CASCADE
// ============================================================================

#[test]
fn test_cascade_narrows_downstream_only() {
    let ds = present_year();
    let selection = FilterSelection::new().with(Dimension::Region, ["NCR"]);
    let options = resolve_options(&ds, &selection);
    assert_eq!(options.get(Dimension::Region), &["CAR", "NCR"]);
    assert_eq!(options.get(Dimension::Province), &["Manila", "Not Applicable"]);
    // Division is absent from the fixture, so nothing below it has options.
    assert!(options.get(Dimension::Division).is_empty());
    assert!(options.get(Dimension::Sector).is_empty());
}

#[test]
fn test_sentinel_option_filters_rows() {
    let ds = present_year();
    let selection = FilterSelection::new().with(Dimension::Province, ["Not Applicable"]);
    let result = aggregate(&ds, &selection);
    assert_eq!(result.totals.schools, 1);
    assert_eq!(result.totals.enrollees, 27.0);
}

// ============================================================================
// AGGREGATION
// ============================================================================

#[test]
fn test_sector_filter_and_groups() {
    let ds = present_year();
    let selection = FilterSelection::new().with(Dimension::Sector, ["Public"]);
    let result = aggregate(&ds, &selection);
    assert_eq!(result.status, DataStatus::Available);
    assert_eq!(result.totals.schools, 2);
    assert_eq!(result.totals.male, 62.0);
    assert_eq!(result.totals.female, 72.0);
    assert_eq!(result.baseline.total_enrollees, 161.0);

    let level_total: f64 = result.education_levels.iter().map(|b| b.total).sum();
    assert_eq!(level_total, result.totals.enrollees);
    assert_eq!(result.tracks[0].label, "STEM");
    assert_eq!(result.elementary_grades.last().map(|b| b.male), Some(2.0));
}

// ============================================================================
// DECODE TO DASHBOARD
// ============================================================================

#[test]
fn test_csv_upload_matches_in_memory_dataset() {
    let bytes = to_csv(&present_year());
    let decoded = decode(&bytes, DataFormat::Csv).into_dataset();
    assert_eq!(decoded.len(), 3);

    let from_upload = aggregate(&decoded, &FilterSelection::new());
    let in_memory = aggregate(&present_year(), &FilterSelection::new());
    assert_eq!(from_upload.totals, in_memory.totals);
    assert_eq!(from_upload.tracks, in_memory.tracks);
}

#[test]
fn test_session_round_trip() {
    let mut session = DashboardSession::default();
    let present = to_csv(&present_year());
    let previous = to_csv(&previous_year());

    assert_eq!(
        session.load(Period::Present, &present, "present.csv"),
        "present.csv uploaded as present year"
    );
    assert_eq!(session.compare(), ComparisonResult::MissingPeriod);
    session.load(Period::Previous, &previous, "previous.csv");

    session.selection.add(Dimension::Region, "CAR");
    let c = session.compare().comparison().cloned().expect("CAR exists in both");
    assert_eq!(c.total_previous, 25.0);
    assert_eq!(c.total_present, 27.0);
    assert_eq!(c.trend, Trend::Growth);
    assert_eq!(c.levels[0].dropout, 3.0);
    assert_eq!(c.levels[0].dropout_rate, 60.0);
    assert_eq!(c.levels[1].dropout, 0.0);
}
