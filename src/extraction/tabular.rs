//! Spreadsheet and CSV extraction
//!
//! Both paths produce the same canonical CSV text: comma-delimited, header
//! row first, no index column. Excel workbooks are read via calamine (first
//! sheet only), CSV input is reparsed and reserialized so delimiters and
//! quoting come out normalized.

use calamine::Reader;
use std::io::Cursor;

use crate::error::{Error, Result};

/// Extract tabular data as canonical CSV text
pub fn extract_tabular(data: &[u8], extension: &str) -> Result<String> {
    if data.is_empty() {
        return Err(Error::decode(extension, "empty input"));
    }

    match extension {
        "xlsx" | "xls" => workbook_to_csv(data),
        "csv" => csv_to_canonical(data),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}

fn workbook_to_csv(data: &[u8]) -> Result<String> {
    let cursor = Cursor::new(data);
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| Error::decode("workbook", e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| Error::decode("workbook", "workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(|e| Error::decode("workbook", e.to_string()))?;
    if range.is_empty() {
        return Err(Error::decode("workbook", "first sheet is empty"));
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in range.rows() {
        let record: Vec<String> = row.iter().map(cell_to_string).collect();
        writer
            .write_record(&record)
            .map_err(|e| Error::decode("workbook", e.to_string()))?;
    }

    finish(writer)
}

fn cell_to_string(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::Empty => String::new(),
        calamine::Data::String(s) => s.clone(),
        calamine::Data::Float(f) => f.to_string(),
        calamine::Data::Int(i) => i.to_string(),
        calamine::Data::Bool(b) => b.to_string(),
        calamine::Data::DateTime(dt) => dt.to_string(),
        _ => String::new(),
    }
}

fn csv_to_canonical(data: &[u8]) -> Result<String> {
    let mut reader = csv::Reader::from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| Error::decode("csv", e.to_string()))?
        .clone();
    if headers.is_empty() {
        return Err(Error::decode("csv", "no header row"));
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&headers)
        .map_err(|e| Error::decode("csv", e.to_string()))?;

    for record in reader.records() {
        let record = record.map_err(|e| Error::decode("csv", e.to_string()))?;
        writer
            .write_record(&record)
            .map_err(|e| Error::decode("csv", e.to_string()))?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let buf = writer
        .into_inner()
        .map_err(|e| Error::decode("csv", e.to_string()))?;
    String::from_utf8(buf).map_err(|e| Error::decode("csv", e.to_string()))
}
