//! FILENAME: tests/common/mod.rs
//! Upload fixtures for decoder integration tests.

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;

pub const BANNER: [&str; 4] = [
    "Learner Information System",
    "Enrollment per School",
    "SY 2024-2025",
    "",
];

pub const HEADER: [&str; 6] = [
    "Region",
    "Province",
    "BEIS School ID",
    "K - Male",
    "K - Female",
    "G11 ACAD -  STEM Female",
];

/// Data rows; an empty string is a blank cell.
pub const ROWS: [[&str; 6]; 3] = [
    ["NCR", "Manila", "305001", "40", "35", "12"],
    ["NCR", "", "305002", "7", "", ""],
    ["CAR", "Benguet", "305003", "", "9", "3"],
];

pub fn csv_upload() -> Vec<u8> {
    let mut out = BANNER.join("\n");
    out.push('\n');
    out.push_str(&HEADER.join(","));
    out.push('\n');
    for row in ROWS {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

/// The same upload as an xlsx workbook; numeric fields are written as numbers.
pub fn xlsx_upload() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, line) in BANNER.iter().enumerate() {
        if !line.is_empty() {
            sheet.write_string(r as u32, 0, *line).unwrap();
        }
    }
    let header_row = BANNER.len() as u32;
    for (c, name) in HEADER.iter().enumerate() {
        sheet.write_string(header_row, c as u16, *name).unwrap();
    }
    for (r, row) in ROWS.iter().enumerate() {
        let r = header_row + 1 + r as u32;
        for (c, field) in row.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            match field.parse::<f64>() {
                Ok(n) => sheet.write_number(r, c as u16, n).unwrap(),
                Err(_) => sheet.write_string(r, c as u16, *field).unwrap(),
            };
        }
    }
    workbook.save_to_buffer().unwrap()
}
