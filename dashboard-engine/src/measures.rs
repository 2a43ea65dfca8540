//! FILENAME: dashboard-engine/src/measures.rs
//! PURPOSE: Numeric sums over measure column groups.
//! CONTEXT: Measure groups name columns from the fixed vocabulary. Before
//! summing, a group is bound to the column positions of one particular
//! dataset; columns the upload does not carry are simply left out, so they
//! contribute zero.

use dataset::{ColumnIndex, Dataset, Gender, MeasureGroup, Record, Subset, MEASURE_COLUMNS};
use rustc_hash::FxHashSet;

// ============================================================================
// BOUND GROUPS
// ============================================================================

/// A measure group resolved against a dataset header.
#[derive(Debug, Clone, Default)]
pub struct BoundGroup {
    male: Vec<ColumnIndex>,
    female: Vec<ColumnIndex>,
}

impl BoundGroup {
    pub fn bind(dataset: &Dataset, group: &MeasureGroup) -> Self {
        let resolve = |gender: Gender| -> Vec<ColumnIndex> {
            group
                .columns(gender)
                .filter_map(|name| dataset.column_index(name))
                .collect()
        };
        BoundGroup {
            male: resolve(Gender::Male),
            female: resolve(Gender::Female),
        }
    }

    /// Every measure column of the vocabulary.
    pub fn all_measures(dataset: &Dataset) -> Self {
        let mut bound = BoundGroup::default();
        for column in MEASURE_COLUMNS.iter() {
            if let Some(idx) = dataset.column_index(&column.name) {
                match column.gender {
                    Gender::Male => bound.male.push(idx),
                    Gender::Female => bound.female.push(idx),
                }
            }
        }
        bound
    }

    fn columns(&self, gender: Gender) -> &[ColumnIndex] {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    /// Sum of this group's `gender` columns within one record.
    pub fn record_sum(&self, record: &Record, gender: Gender) -> f64 {
        self.columns(gender)
            .iter()
            .map(|&idx| record.get(idx).as_measure())
            .sum()
    }

    /// Male and female sums over every row of a subset.
    pub fn sum(&self, subset: &Subset<'_>) -> GenderSums {
        let mut sums = GenderSums::default();
        for record in subset.records() {
            sums.male += self.record_sum(record, Gender::Male);
            sums.female += self.record_sum(record, Gender::Female);
        }
        sums
    }
}

// ============================================================================
// SUMS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenderSums {
    pub male: f64,
    pub female: f64,
}

impl GenderSums {
    pub fn total(&self) -> f64 {
        self.male + self.female
    }

    /// Per-row mean of each gender, rounded half to even. Zero rows gives zero.
    pub fn rounded_means(&self, rows: usize) -> GenderSums {
        if rows == 0 {
            return GenderSums::default();
        }
        let n = rows as f64;
        GenderSums {
            male: (self.male / n).round_ties_even(),
            female: (self.female / n).round_ties_even(),
        }
    }

    /// Halves both sums (the two senior-high grades share one track average).
    pub fn halved(&self) -> GenderSums {
        GenderSums {
            male: self.male / 2.0,
            female: self.female / 2.0,
        }
    }
}

/// Sum of every vocabulary measure column over a subset.
pub fn total_enrollment(subset: &Subset<'_>) -> f64 {
    BoundGroup::all_measures(subset.dataset()).sum(subset).total()
}

/// Number of distinct identity values among the subset's rows.
/// Missing cells are not counted; an absent column counts zero schools.
pub fn distinct_count(subset: &Subset<'_>, column: &str) -> usize {
    let Some(idx) = subset.dataset().column_index(column) else {
        return 0;
    };
    subset
        .records()
        .filter_map(|record| record.get(idx).label())
        .collect::<FxHashSet<String>>()
        .len()
}
