//! FILENAME: dashboard-engine/src/filter.rs
//! PURPOSE: Applies a filter selection to a dataset.
//! CONTEXT: Conjunction across dimensions, disjunction within one. Column
//! indices are resolved once per call; a constrained dimension whose column
//! is missing from the upload matches no rows.

use dataset::{ColumnIndex, Dataset, Dimension, Record, Subset};

use crate::selection::FilterSelection;

/// Returns the rows of `dataset` that satisfy every constraint in `selection`.
pub fn apply_selection<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Subset<'a> {
    let mut subset = dataset.all();
    for (dimension, chosen) in selection.constraints() {
        subset = narrow(&subset, dimension, chosen);
        if subset.is_empty() {
            break;
        }
    }
    subset
}

/// Keeps the rows whose `dimension` label is one of `chosen`.
/// An empty `chosen` is no constraint.
pub fn narrow<'a>(subset: &Subset<'a>, dimension: Dimension, chosen: &[String]) -> Subset<'a> {
    if chosen.is_empty() {
        return subset.clone();
    }
    match subset.dataset().column_index(dimension.column_name()) {
        Some(column) => subset.retain(|record| label_in(record, column, chosen)),
        None => subset.retain(|_| false),
    }
}

fn label_in(record: &Record, column: ColumnIndex, chosen: &[String]) -> bool {
    match record.get(column).label() {
        Some(label) => chosen.iter().any(|c| *c == label),
        None => false,
    }
}
