//! FILENAME: tests/common/mod.rs
//! Fixtures for dashboard engine integration tests.

#![allow(dead_code)]

use dataset::{CellValue, Dataset, Dimension};

/// One school row under construction.
#[derive(Debug, Clone)]
pub struct SchoolRow {
    cells: Vec<(String, CellValue)>,
}

impl SchoolRow {
    pub fn new(id: f64) -> Self {
        SchoolRow {
            cells: vec![("BEIS School ID".to_string(), CellValue::Number(id))],
        }
    }

    pub fn dim(mut self, dimension: Dimension, label: &str) -> Self {
        self.cells
            .push((dimension.column_name().to_string(), CellValue::text(label)));
        self
    }

    pub fn count(mut self, column: &str, value: f64) -> Self {
        self.cells.push((column.to_string(), CellValue::Number(value)));
        self
    }

    pub fn sentinel(mut self, column: &str) -> Self {
        self.cells
            .push((column.to_string(), CellValue::text("Not Applicable")));
        self
    }
}

pub fn dataset_of(rows: Vec<SchoolRow>) -> Dataset {
    let mut ds = Dataset::new(Vec::new());
    for row in rows {
        ds.push_named(row.cells);
    }
    ds
}

/// Present-year sample: three schools across two regions.
pub fn present_year() -> Dataset {
    dataset_of(vec![
        SchoolRow::new(305001.0)
            .dim(Dimension::Region, "NCR")
            .dim(Dimension::Province, "Manila")
            .dim(Dimension::Sector, "Public")
            .count("K Male", 40.0)
            .count("K Female", 35.0)
            .count("G7 Male", 20.0)
            .count("G11 ACAD STEM Female", 12.0),
        SchoolRow::new(305002.0)
            .dim(Dimension::Region, "NCR")
            .dim(Dimension::Province, "Not Applicable")
            .dim(Dimension::Sector, "Private")
            .count("G1 Female", 18.0)
            .count("G12 TVL Male", 9.0)
            .sentinel("G2 Male"),
        SchoolRow::new(305003.0)
            .dim(Dimension::Region, "CAR")
            .dim(Dimension::Province, "Benguet")
            .dim(Dimension::Sector, "Public")
            .count("Elem NG Male", 2.0)
            .count("G10 Female", 25.0),
    ])
}

/// Previous-year sample: CAR only.
pub fn previous_year() -> Dataset {
    dataset_of(vec![SchoolRow::new(305003.0)
        .dim(Dimension::Region, "CAR")
        .dim(Dimension::Province, "Benguet")
        .dim(Dimension::Sector, "Public")
        .count("Elem NG Male", 5.0)
        .count("G10 Female", 20.0)])
}

/// Renders a dataset as an upload: four banner lines, then header and rows.
pub fn to_csv(ds: &Dataset) -> Vec<u8> {
    let mut out = String::from("Learner Information System\nEnrollment\nSY 2024-2025\n\n");
    out.push_str(&ds.columns().join(","));
    out.push('\n');
    for row in 0..ds.len() {
        let fields: Vec<String> = ds
            .columns()
            .iter()
            .map(|c| ds.value(row, c).label().unwrap_or_default())
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out.into_bytes()
}
