//! FILENAME: decoder/src/spreadsheet_reader.rs
//! PURPOSE: Spreadsheet uploads (xlsx, xls, xlsb, ods) through calamine.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use dataset::{CellValue, DashboardConfig, Dataset};

use crate::header::{build_header, finish_row, is_missing_text};
use crate::DecodeError;

/// Reads the first worksheet of an xlsx/xls/xlsb/ods blob.
pub fn load_spreadsheet(bytes: &[u8], config: &DashboardConfig) -> Result<Dataset, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(DecodeError::NoWorksheet),
    };

    // The range starts at the first used cell, so leading blank rows are
    // already gone; only skip what remains of the banner.
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let skip = config.skip_rows.saturating_sub(first_row);

    let mut rows = range.rows().skip(skip);

    let header = match rows.next() {
        Some(row) => build_header(row.iter().map(header_text)),
        None => return Err(DecodeError::MissingHeader(config.skip_rows)),
    };
    let width = header.len();

    let mut dataset = Dataset::new(header);
    for row in rows {
        let cells = row.iter().map(convert_cell).collect();
        if let Some(record) = finish_row(cells, width, &config.not_applicable) {
            dataset.push(record);
        }
    }

    Ok(dataset)
}

fn header_text(cell: &Data) -> String {
    if let Data::String(s) = cell {
        return s.clone();
    }
    match convert_cell(cell) {
        Some(value) => value.label().unwrap_or_default(),
        None => String::new(),
    }
}

fn convert_cell(cell: &Data) -> Option<CellValue> {
    let value = match cell {
        Data::Empty => return None,
        Data::String(s) if is_missing_text(s) => return None,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::text(if *b { "TRUE" } else { "FALSE" }),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    };
    Some(value)
}
