//! FILENAME: decoder/src/header.rs
//! PURPOSE: Header normalization and row assembly shared by both readers.

use dataset::{CellValue, Record};

/// Removes hyphens, collapses whitespace runs to one space and trims.
/// `"Elem  NG - Male"` becomes `"Elem NG Male"`.
pub fn normalize_column_name(raw: &str) -> String {
    raw.replace('-', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a raw header row. Blank names become `Unnamed: <index>` and
/// repeated names get `.1`, `.2`, ... suffixes so every column stays addressable.
pub fn build_header<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut header: Vec<String> = Vec::new();
    for (idx, name) in raw.into_iter().enumerate() {
        let mut name = normalize_column_name(name.as_ref());
        if name.is_empty() {
            name = format!("Unnamed: {}", idx);
        }
        if header.contains(&name) {
            let mut n = 1;
            while header.contains(&format!("{}.{}", name, n)) {
                n += 1;
            }
            name = format!("{}.{}", name, n);
        }
        header.push(name);
    }
    header
}

/// Turns decoded cells into a record of exactly `width` values.
/// Missing cells become the sentinel text; extra cells are dropped.
/// Returns `None` for a row with no values at all.
pub fn finish_row(cells: Vec<Option<CellValue>>, width: usize, sentinel: &str) -> Option<Record> {
    if cells.iter().all(Option::is_none) {
        return None;
    }
    let mut values: Vec<CellValue> = cells
        .into_iter()
        .take(width)
        .map(|cell| cell.unwrap_or_else(|| CellValue::text(sentinel)))
        .collect();
    while values.len() < width {
        values.push(CellValue::text(sentinel));
    }
    Some(Record::new(values))
}

/// Spellings of a missing value that export tools write into cells.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True for blank text and the usual missing-value markers.
pub fn is_missing_text(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed)
}

/// Interprets a delimited-text field: blank or a missing marker is missing,
/// finite numbers are numeric, anything else stays text verbatim.
pub fn parse_text_field(field: &str) -> Option<CellValue> {
    if is_missing_text(field) {
        return None;
    }
    let trimmed = field.trim();
    let looks_numeric = trimmed.bytes().any(|b| b.is_ascii_digit())
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
    if looks_numeric {
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return Some(CellValue::Number(n));
            }
        }
    }
    Some(CellValue::Text(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("G11 ACAD - ABM  Male"), "G11 ACAD ABM Male");
        assert_eq!(normalize_column_name("  Legislative\tDistrict "), "Legislative District");
        assert_eq!(normalize_column_name("Sub-classification"), "Subclassification");
    }

    #[test]
    fn test_build_header_dedupes_and_names_blanks() {
        let header = build_header(["Region", "", "K Male", "K  Male", "K Male"]);
        assert_eq!(header, vec!["Region", "Unnamed: 1", "K Male", "K Male.1", "K Male.2"]);
    }

    #[test]
    fn test_finish_row_pads_with_sentinel() {
        let row = finish_row(vec![Some(CellValue::text("NCR")), None], 3, "Not Applicable").unwrap();
        assert_eq!(
            row.values,
            vec![
                CellValue::text("NCR"),
                CellValue::text("Not Applicable"),
                CellValue::text("Not Applicable"),
            ]
        );
        assert!(finish_row(vec![None, None], 2, "Not Applicable").is_none());
    }

    #[test]
    fn test_parse_text_field() {
        assert_eq!(parse_text_field("42"), Some(CellValue::Number(42.0)));
        assert_eq!(parse_text_field(" 3.5 "), Some(CellValue::Number(3.5)));
        assert_eq!(parse_text_field("NaN"), None);
        assert_eq!(parse_text_field("#N/A"), None);
        assert_eq!(parse_text_field(" n/a "), None);
        assert_eq!(parse_text_field("Nam"), Some(CellValue::text("Nam")));
        assert_eq!(parse_text_field("inf"), Some(CellValue::text("inf")));
        assert_eq!(parse_text_field("Region I"), Some(CellValue::text("Region I")));
        assert_eq!(parse_text_field("   "), None);
    }
}
