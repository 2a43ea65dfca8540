//! FILENAME: dataset/src/table.rs
//! PURPOSE: The decoded enrollment table and its row-index views.
//! CONTEXT: A `Dataset` is immutable once built. Filtering never copies
//! records; it produces a `Subset` holding row indices into the dataset,
//! so a present/previous comparison can borrow two datasets side by side.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Index of a column within the dataset header.
pub type ColumnIndex = usize;

static EMPTY: CellValue = CellValue::Empty;

/// One school row, values aligned with the dataset header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub values: Vec<CellValue>,
}

impl Record {
    pub fn new(values: Vec<CellValue>) -> Self {
        Record { values }
    }

    /// Value at a column; `Empty` for columns past the end of a short row.
    pub fn get(&self, column: ColumnIndex) -> &CellValue {
        self.values.get(column).unwrap_or(&EMPTY)
    }
}

/// An ordered sequence of records under a fixed header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "DatasetParts", into = "DatasetParts")]
pub struct Dataset {
    columns: Vec<String>,
    column_lookup: FxHashMap<String, ColumnIndex>,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset with the given header and no rows.
    pub fn new(columns: Vec<String>) -> Self {
        let column_lookup = build_lookup(&columns);
        Dataset {
            columns,
            column_lookup,
            records: Vec::new(),
        }
    }

    /// A dataset with no header and no rows (the result of a failed decode).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_records(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut dataset = Self::new(columns);
        dataset.records = records;
        dataset
    }

    /// Appends a row. Rows shorter than the header read as `Empty` past their end.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Builds a record from `(column, value)` pairs, adding unknown columns
    /// to the header. Convenient for fixtures and programmatic callers.
    pub fn push_named<K, V, I>(&mut self, cells: I)
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut values = vec![CellValue::Empty; self.columns.len()];
        for (name, value) in cells {
            let name = name.into();
            let idx = match self.column_lookup.get(&name) {
                Some(&idx) => idx,
                None => {
                    let idx = self.columns.len();
                    self.column_lookup.insert(name.clone(), idx);
                    self.columns.push(name);
                    values.push(CellValue::Empty);
                    idx
                }
            };
            values[idx] = value.into();
        }
        self.records.push(Record::new(values));
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<ColumnIndex> {
        self.column_lookup.get(name).copied()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value of a named column in a row; `Empty` when the column is absent.
    pub fn value(&self, row: usize, column: &str) -> &CellValue {
        match (self.records.get(row), self.column_index(column)) {
            (Some(record), Some(idx)) => record.get(idx),
            _ => &EMPTY,
        }
    }

    /// A view over every row.
    pub fn all(&self) -> Subset<'_> {
        Subset {
            dataset: self,
            rows: (0..self.records.len()).collect(),
        }
    }
}

fn build_lookup(columns: &[String]) -> FxHashMap<String, ColumnIndex> {
    let mut lookup = FxHashMap::default();
    for (idx, name) in columns.iter().enumerate() {
        // First occurrence wins, matching how headers are de-duplicated on decode.
        lookup.entry(name.clone()).or_insert(idx);
    }
    lookup
}

/// Serialized shape of a dataset: header plus rows. The lookup is rebuilt.
#[derive(Serialize, Deserialize)]
struct DatasetParts {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl From<DatasetParts> for Dataset {
    fn from(parts: DatasetParts) -> Self {
        Dataset::with_records(parts.columns, parts.records)
    }
}

impl From<Dataset> for DatasetParts {
    fn from(dataset: Dataset) -> Self {
        DatasetParts {
            columns: dataset.columns,
            records: dataset.records,
        }
    }
}

// ============================================================================
// SUBSET
// ============================================================================

/// A borrowed selection of rows from a dataset.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> Subset<'a> {
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.rows.iter().filter_map(move |&row| dataset.record(row))
    }

    /// Keeps the rows for which `keep` returns true.
    pub fn retain<F>(&self, mut keep: F) -> Subset<'a>
    where
        F: FnMut(&Record) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&row| self.dataset.record(row).map_or(false, &mut keep))
            .collect();
        Subset {
            dataset: self.dataset,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut ds = Dataset::new(vec!["Region".to_string(), "K Male".to_string()]);
        ds.push(Record::new(vec![CellValue::text("NCR"), CellValue::Number(3.0)]));
        ds.push(Record::new(vec![CellValue::text("CAR")]));
        ds
    }

    #[test]
    fn test_short_rows_read_empty() {
        let ds = sample();
        assert_eq!(ds.value(1, "K Male"), &CellValue::Empty);
        assert_eq!(ds.value(0, "K Male"), &CellValue::Number(3.0));
        assert_eq!(ds.value(0, "Province"), &CellValue::Empty);
    }

    #[test]
    fn test_push_named_extends_header() {
        let mut ds = sample();
        ds.push_named([("Region", CellValue::text("NCR")), ("Province", CellValue::text("Manila"))]);
        assert_eq!(ds.columns().len(), 3);
        assert_eq!(ds.value(2, "Province"), &CellValue::text("Manila"));
        assert_eq!(ds.value(0, "Province"), &CellValue::Empty);
    }

    #[test]
    fn test_subset_retain() {
        let ds = sample();
        let region = ds.column_index("Region").unwrap();
        let ncr = ds.all().retain(|r| r.get(region) == &CellValue::text("NCR"));
        assert_eq!(ncr.rows(), &[0]);
        assert_eq!(ncr.records().count(), 1);
    }

    #[test]
    fn test_serde_round_trip_rebuilds_lookup() {
        let ds = sample();
        let json = serde_json::to_string(&ds).unwrap();
        let back: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back.column_index("K Male"), Some(1));
        assert_eq!(back.len(), 2);
    }
}
