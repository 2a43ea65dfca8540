//! FILENAME: decoder/src/csv_reader.rs
//! PURPOSE: Delimited-text uploads.

use std::borrow::Cow;

use dataset::{DashboardConfig, Dataset};
use encoding_rs::mem::decode_latin1;

use crate::header::{build_header, finish_row, parse_text_field};
use crate::DecodeError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decodes the whole blob as UTF-8, falling back to Latin-1 when it is not
/// valid UTF-8. A leading BOM is dropped.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            dataset::log_debug!("DECODE", "input is not UTF-8, decoding as Latin-1");
            decode_latin1(bytes)
        }
    }
}

/// Returns the text after the first `count` rows. Blank lines count as rows;
/// a line break inside a quoted field does not end one.
fn skip_rows(text: &str, count: usize) -> Option<&str> {
    if count == 0 {
        return Some(text);
    }
    let mut in_quotes = false;
    let mut skipped = 0;
    for (idx, byte) in text.bytes().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                skipped += 1;
                if skipped == count {
                    return Some(&text[idx + 1..]);
                }
            }
            _ => {}
        }
    }
    None
}

pub fn load_csv(bytes: &[u8], config: &DashboardConfig) -> Result<Dataset, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let text = decode_text(bytes);
    let body = skip_rows(&text, config.skip_rows)
        .ok_or(DecodeError::MissingHeader(config.skip_rows))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte())
        // The header row is handled here so it can be normalized.
        .has_headers(false)
        // Exports pad or truncate trailing empty cells inconsistently.
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(row) => build_header(row?.iter()),
        None => return Err(DecodeError::MissingHeader(config.skip_rows)),
    };
    let width = header.len();

    let mut dataset = Dataset::new(header);
    for row in records {
        let row = row?;
        let cells = row.iter().map(parse_text_field).collect();
        if let Some(record) = finish_row(cells, width, &config.not_applicable) {
            dataset.push(record);
        }
    }

    Ok(dataset)
}
