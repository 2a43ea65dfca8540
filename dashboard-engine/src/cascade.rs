//! FILENAME: dashboard-engine/src/cascade.rs
//! PURPOSE: Legal option lists for the cascading dimension filters.
//! CONTEXT: Dimension k only ever sees rows that survive the selections on
//! dimensions 1..k-1. Selections on later dimensions never feed back into
//! earlier option lists, and stale selections are reported, not cleared.

use std::collections::{BTreeMap, BTreeSet};

use dataset::{log_debug, Dataset, Dimension};
use serde::{Deserialize, Serialize};

use crate::filter::narrow;
use crate::selection::FilterSelection;

/// Sorted legal labels for every dimension, keyed in hierarchy order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionsMap {
    options: BTreeMap<Dimension, Vec<String>>,
}

impl OptionsMap {
    /// Options for a dimension; empty when none are legal.
    pub fn get(&self, dimension: Dimension) -> &[String] {
        self.options.get(&dimension).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, dimension: Dimension, label: &str) -> bool {
        self.get(dimension)
            .binary_search_by(|v| v.as_str().cmp(label))
            .is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &[String])> {
        self.options.iter().map(|(d, v)| (*d, v.as_slice()))
    }
}

/// Computes the option list of every dimension under `selection`.
pub fn resolve_options(dataset: &Dataset, selection: &FilterSelection) -> OptionsMap {
    let mut options = BTreeMap::new();
    let mut eligible = dataset.all();
    let mut upstream_missing = false;

    for dimension in Dimension::ALL {
        let column = if upstream_missing {
            None
        } else {
            dataset.column_index(dimension.column_name())
        };

        let Some(column) = column else {
            if !upstream_missing && !dataset.columns().is_empty() {
                log_debug!("CASCADE", "column '{}' missing; no options downstream", dimension);
            }
            upstream_missing = true;
            options.insert(dimension, Vec::new());
            continue;
        };

        let labels: BTreeSet<String> = eligible
            .records()
            .filter_map(|record| record.get(column).label())
            .collect();
        options.insert(dimension, labels.into_iter().collect());

        let chosen = selection.values(dimension);
        if !chosen.is_empty() {
            eligible = narrow(&eligible, dimension, chosen);
        }
    }

    OptionsMap { options }
}
