//! FILENAME: dashboard-engine/src/selection.rs
//! PURPOSE: The user's current filter choices.
//! CONTEXT: One set of chosen labels per dimension. An empty set means the
//! dimension is unconstrained, so only non-empty sets are stored. Keys are
//! kept in hierarchy order (the `Ord` of `Dimension`).

use std::collections::BTreeMap;

use dataset::Dimension;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cascade::OptionsMap;

/// Chosen labels for one dimension, sorted and de-duplicated.
/// Most selections hold one or two values.
pub type SelectedValues = SmallVec<[String; 2]>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Dimension, Vec<String>>",
    into = "BTreeMap<Dimension, SelectedValues>"
)]
pub struct FilterSelection {
    values: BTreeMap<Dimension, SelectedValues>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `set`.
    pub fn with<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(dimension, values);
        self
    }

    /// Replaces the chosen labels of a dimension. An empty list clears it.
    pub fn set<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chosen: SelectedValues = values.into_iter().map(Into::into).collect();
        chosen.sort();
        chosen.dedup();
        if chosen.is_empty() {
            self.values.remove(&dimension);
        } else {
            self.values.insert(dimension, chosen);
        }
    }

    /// Adds one label to a dimension's set.
    pub fn add(&mut self, dimension: Dimension, value: impl Into<String>) {
        let value = value.into();
        let chosen = self.values.entry(dimension).or_default();
        if let Err(pos) = chosen.binary_search(&value) {
            chosen.insert(pos, value);
        }
    }

    pub fn clear(&mut self, dimension: Dimension) {
        self.values.remove(&dimension);
    }

    pub fn clear_all(&mut self) {
        self.values.clear();
    }

    /// Chosen labels of a dimension; empty when unconstrained.
    pub fn values(&self, dimension: Dimension) -> &[String] {
        self.values.get(&dimension).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// True when no dimension is constrained.
    pub fn is_unconstrained(&self) -> bool {
        self.values.is_empty()
    }

    /// Constrained dimensions in hierarchy order.
    pub fn constraints(&self) -> impl Iterator<Item = (Dimension, &[String])> {
        self.values.iter().map(|(dim, v)| (*dim, v.as_slice()))
    }

    /// Whether `label` passes this selection's constraint on `dimension`.
    pub fn accepts(&self, dimension: Dimension, label: &str) -> bool {
        match self.values.get(&dimension) {
            Some(chosen) => chosen.binary_search_by(|v| v.as_str().cmp(label)).is_ok(),
            None => true,
        }
    }

    /// Selected labels that are no longer among the legal options, per
    /// dimension. The selection itself is left untouched.
    pub fn illegal_values(&self, options: &OptionsMap) -> BTreeMap<Dimension, Vec<String>> {
        let mut illegal = BTreeMap::new();
        for (dimension, chosen) in &self.values {
            let stale: Vec<String> = chosen
                .iter()
                .filter(|label| !options.contains(*dimension, label))
                .cloned()
                .collect();
            if !stale.is_empty() {
                illegal.insert(*dimension, stale);
            }
        }
        illegal
    }
}

impl From<BTreeMap<Dimension, Vec<String>>> for FilterSelection {
    fn from(raw: BTreeMap<Dimension, Vec<String>>) -> Self {
        let mut selection = FilterSelection::new();
        for (dimension, values) in raw {
            selection.set(dimension, values);
        }
        selection
    }
}

impl From<FilterSelection> for BTreeMap<Dimension, SelectedValues> {
    fn from(selection: FilterSelection) -> Self {
        selection.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_sorts_and_dedupes() {
        let selection = FilterSelection::new().with(Dimension::Region, ["NCR", "CAR", "NCR"]);
        assert_eq!(selection.values(Dimension::Region), &["CAR", "NCR"]);
        assert!(selection.accepts(Dimension::Region, "CAR"));
        assert!(!selection.accepts(Dimension::Region, "BARMM"));
        assert!(selection.accepts(Dimension::Province, "anything"));
    }

    #[test]
    fn test_empty_set_is_unconstrained() {
        let mut selection = FilterSelection::new().with(Dimension::Sector, ["Public"]);
        selection.set(Dimension::Sector, Vec::<String>::new());
        assert!(selection.is_unconstrained());
        assert!(selection.values(Dimension::Sector).is_empty());
    }

    #[test]
    fn test_constraints_follow_hierarchy() {
        let mut selection = FilterSelection::new();
        selection.add(Dimension::SchoolType, "School with no Annexes");
        selection.add(Dimension::Region, "NCR");
        selection.add(Dimension::Region, "CAR");
        let dims: Vec<Dimension> = selection.constraints().map(|(d, _)| d).collect();
        assert_eq!(dims, vec![Dimension::Region, Dimension::SchoolType]);
        assert_eq!(selection.values(Dimension::Region), &["CAR", "NCR"]);
    }

    #[test]
    fn test_serializes_by_column_name() {
        let selection = FilterSelection::new().with(Dimension::SchoolType, ["Annex"]);
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"School Type":["Annex"]}"#);
        let back: FilterSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selection);
    }

    #[test]
    fn test_deserialized_sets_are_normalized() {
        let selection: FilterSelection =
            serde_json::from_str(r#"{"Region":["NCR","CAR","BARMM","NCR"],"Sector":[]}"#).unwrap();
        assert_eq!(selection.values(Dimension::Region), &["BARMM", "CAR", "NCR"]);
        assert!(["NCR", "CAR", "BARMM"]
            .iter()
            .all(|label| selection.accepts(Dimension::Region, label)));
        assert_eq!(selection.constraints().count(), 1);

        let empty: FilterSelection = serde_json::from_str(r#"{"Region":[]}"#).unwrap();
        assert!(empty.is_unconstrained());
        assert_eq!(empty, FilterSelection::default());
    }
}
