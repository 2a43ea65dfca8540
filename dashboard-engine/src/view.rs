//! FILENAME: dashboard-engine/src/view.rs
//! Dashboard View - Renderable output for the presentation shell.
//!
//! This module reshapes aggregation and comparison results into long-format
//! tables (one row per category and series) that a chart widget can plot
//! directly. It includes metadata for:
//! - Chart title and axis captions
//! - The category total carried on every row for tooltips
//! - A no-data flag so the shell can render a placeholder

use dataset::{format_count, share_caption};
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateResult, GenderBreakdown};
use crate::compare::{Comparison, ComparisonResult, PeriodPair};

pub const NO_DATA_TITLE: &str = "No data available";

pub const SERIES_MALE: &str = "Male";
pub const SERIES_FEMALE: &str = "Female";
pub const SERIES_PREVIOUS: &str = "Previous Year";
pub const SERIES_PRESENT: &str = "Present Year";

// ============================================================================
// CHART TABLE
// ============================================================================

/// One bar segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub category: String,
    pub series: String,
    pub value: f64,
    /// Total of the category across all series.
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartTable {
    pub title: String,
    pub category_axis: String,
    pub value_axis: String,
    pub rows: Vec<ChartRow>,
    pub no_data: bool,
}

impl ChartTable {
    fn new(title: &str, category_axis: &str, value_axis: &str, no_data: bool) -> Self {
        ChartTable {
            title: if no_data { NO_DATA_TITLE } else { title }.to_string(),
            category_axis: category_axis.to_string(),
            value_axis: value_axis.to_string(),
            rows: Vec::new(),
            no_data,
        }
    }

    /// Male and female rows per category, in the breakdown's order.
    pub fn by_gender(
        title: &str,
        category_axis: &str,
        value_axis: &str,
        breakdowns: &[GenderBreakdown],
        no_data: bool,
    ) -> Self {
        let mut table = Self::new(title, category_axis, value_axis, no_data);
        for b in breakdowns {
            table.push(&b.label, SERIES_MALE, b.male, b.total);
            table.push(&b.label, SERIES_FEMALE, b.female, b.total);
        }
        table
    }

    /// Previous and present rows per category.
    pub fn by_period(title: &str, category_axis: &str, pairs: &[PeriodPair]) -> Self {
        let mut table = Self::new(title, category_axis, "Number of Students", false);
        for p in pairs {
            let total = p.previous + p.present;
            table.push(&p.label, SERIES_PREVIOUS, p.previous, total);
            table.push(&p.label, SERIES_PRESENT, p.present, total);
        }
        table
    }

    fn push(&mut self, category: &str, series: &str, value: f64, total: f64) {
        self.rows.push(ChartRow {
            category: category.to_string(),
            series: series.to_string(),
            value,
            total,
        });
    }

    /// Distinct categories in row order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.category.as_str()) {
                seen.push(&row.category);
            }
        }
        seen
    }
}

// ============================================================================
// DASHBOARD CHARTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub education: ChartTable,
    pub elementary: ChartTable,
    pub junior: ChartTable,
    pub senior: ChartTable,
    pub grade_averages: ChartTable,
    pub track_averages: ChartTable,
}

impl AggregateResult {
    pub fn charts(&self) -> DashboardCharts {
        let no_data = !self.has_data();
        DashboardCharts {
            education: ChartTable::by_gender(
                "Educational Level Comparison",
                "Education Level",
                "Enrollment",
                &self.education_levels,
                no_data,
            ),
            elementary: ChartTable::by_gender(
                "Elementary Level",
                "Grade Level",
                "Enrollment",
                &self.elementary_grades,
                no_data,
            ),
            junior: ChartTable::by_gender(
                "Junior High School",
                "Grade Level",
                "Enrollment",
                &self.junior_grades,
                no_data,
            ),
            senior: ChartTable::by_gender(
                "Senior High School",
                "Track",
                "Enrollment",
                &self.tracks,
                no_data,
            ),
            grade_averages: ChartTable::by_gender(
                "Average Student Count per Grade Level",
                "Grade Level",
                "Average Enrollees",
                &self.grade_averages,
                no_data,
            ),
            track_averages: ChartTable::by_gender(
                "Average Student Count per Track",
                "Track",
                "Average Enrollees",
                &self.track_averages,
                no_data,
            ),
        }
    }

    pub fn summary_cards(&self) -> SummaryCards {
        SummaryCards::from_result(self)
    }
}

// ============================================================================
// COMPARISON CHARTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonCharts {
    pub levels: ChartTable,
    pub strands: ChartTable,
    pub grades: ChartTable,
}

impl ComparisonCharts {
    /// Placeholder tables for when nothing could be compared.
    pub fn empty() -> Self {
        let placeholder = |axis: &str| ChartTable::new("", axis, "Number of Students", true);
        ComparisonCharts {
            levels: placeholder("Level"),
            strands: placeholder("Strand"),
            grades: placeholder("Grade Level"),
        }
    }
}

impl Comparison {
    pub fn charts(&self) -> ComparisonCharts {
        let levels: Vec<PeriodPair> = self
            .levels
            .iter()
            .map(|l| PeriodPair {
                label: l.label.clone(),
                previous: l.previous,
                present: l.present,
            })
            .collect();
        ComparisonCharts {
            levels: ChartTable::by_period("Enrollment Growth", "Level", &levels),
            strands: ChartTable::by_period("SHS Strand Comparison", "Strand", &self.tracks),
            grades: ChartTable::by_period("Kinder to Grade 10 Comparison", "Grade Level", &self.grades),
        }
    }
}

impl ComparisonResult {
    pub fn charts(&self) -> ComparisonCharts {
        match self {
            ComparisonResult::Compared(c) => c.charts(),
            _ => ComparisonCharts::empty(),
        }
    }
}

// ============================================================================
// METRIC CARDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCards {
    pub male: MetricCard,
    pub female: MetricCard,
    pub enrollees: MetricCard,
    pub schools: MetricCard,
}

impl SummaryCards {
    pub fn from_result(result: &AggregateResult) -> Self {
        let totals = &result.totals;
        let baseline = &result.baseline;
        let card = |title: &str, value: f64, caption: String| MetricCard {
            title: title.to_string(),
            value: format_count(value),
            caption,
        };
        SummaryCards {
            male: card(
                "Male",
                totals.male,
                share_caption(totals.male, totals.enrollees, "Total"),
            ),
            female: card(
                "Female",
                totals.female,
                share_caption(totals.female, totals.enrollees, "Total"),
            ),
            enrollees: card(
                "Enrollees",
                totals.enrollees,
                share_caption(totals.enrollees, baseline.total_enrollees, "Nationwide"),
            ),
            schools: card(
                "Schools",
                totals.schools as f64,
                share_caption(totals.schools as f64, baseline.schools as f64, "Nationwide"),
            ),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricCard> {
        [&self.male, &self.female, &self.enrollees, &self.schools].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::compare::compare;
    use crate::selection::FilterSelection;
    use dataset::{CellValue, Dataset, Dimension};

    fn sample() -> Dataset {
        let mut ds = Dataset::new(Vec::new());
        ds.push_named([
            ("BEIS School ID", CellValue::Number(7.0)),
            ("Region", CellValue::text("NCR")),
            ("K Male", CellValue::Number(1200.0)),
            ("K Female", CellValue::Number(600.0)),
        ]);
        ds
    }

    #[test]
    fn test_dashboard_tables() {
        let charts = aggregate(&sample(), &FilterSelection::new()).charts();
        assert_eq!(charts.education.title, "Educational Level Comparison");
        assert_eq!(charts.education.categories(), vec!["Elementary", "Junior HS", "Senior HS"]);
        assert_eq!(charts.education.rows[0].series, "Male");
        assert_eq!(charts.education.rows[0].total, 1800.0);
        assert_eq!(charts.elementary.categories().last(), Some(&"NG"));
        assert_eq!(charts.senior.rows.len(), 16);
    }

    #[test]
    fn test_no_data_title() {
        let selection = FilterSelection::new().with(Dimension::Region, ["CAR"]);
        let charts = aggregate(&sample(), &selection).charts();
        assert!(charts.junior.no_data);
        assert_eq!(charts.junior.title, NO_DATA_TITLE);
        assert!(charts.junior.rows.iter().all(|r| r.value == 0.0));
    }

    #[test]
    fn test_summary_cards() {
        let cards = aggregate(&sample(), &FilterSelection::new()).summary_cards();
        assert_eq!(cards.male.value, "1,200");
        assert_eq!(cards.male.caption, "66.7% of Total");
        assert_eq!(cards.enrollees.caption, "100.0% of Nationwide");
        assert_eq!(cards.schools.value, "1");
        assert_eq!(cards.iter().count(), 4);

        let empty = aggregate(&Dataset::empty(), &FilterSelection::new()).summary_cards();
        assert_eq!(empty.schools.caption, "0%");
    }

    #[test]
    fn test_comparison_tables() {
        let result = compare(&sample(), &sample(), &FilterSelection::new());
        let charts = result.charts();
        assert_eq!(charts.levels.categories(), vec!["Elementary", "JHS", "SHS"]);
        assert_eq!(charts.levels.rows[0].series, SERIES_PREVIOUS);
        assert_eq!(charts.levels.rows[1].value, 1800.0);
        assert_eq!(charts.grades.rows.len(), 26);

        let missing = ComparisonResult::MissingPeriod.charts();
        assert!(missing.strands.no_data);
        assert_eq!(missing.strands.title, NO_DATA_TITLE);
    }
}
