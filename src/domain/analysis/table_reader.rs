//! Table Reader - Turns an uploaded byte payload into a `RawTable`.
//!
//! The first row of either format is the header. Header names are made
//! unique (`Price`, `Price.1`) and never reuse the appended result column
//! names. Cells are trimmed; blank cells become `RawCell::Empty`. Numeric coercion is left to the validator
//! so that every offending column can be reported at once.

use std::collections::HashSet;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::{RawCell, RawTable, RANK_COLUMN, SCORE_COLUMN};
use crate::domain::foundation::{TableKind, ValidationError};

/// Parses a table payload of the declared kind.
///
/// # Errors
/// - `UnsupportedFormat` if the kind is neither delimited nor spreadsheet
/// - `EmptyData` if there is no data row below the header
/// - `ParseError` on malformed syntax (ragged rows, bad UTF-8, broken workbook)
pub fn parse_table(raw_bytes: &[u8], declared_kind: &TableKind) -> Result<RawTable, ValidationError> {
    let table = match declared_kind {
        TableKind::Delimited => read_delimited(raw_bytes)?,
        TableKind::Spreadsheet => read_spreadsheet(raw_bytes)?,
        TableKind::Unsupported(kind) => return Err(ValidationError::unsupported_format(kind.clone())),
    };

    if table.rows.is_empty() {
        return Err(ValidationError::EmptyData);
    }

    Ok(table)
}

fn read_delimited(raw_bytes: &[u8]) -> Result<RawTable, ValidationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(raw_bytes);

    let headers = unique_headers(
        reader
            .headers()
            .map_err(ValidationError::parse)?
            .iter()
            .enumerate()
            .map(|(index, name)| header_name(name, index)),
    );

    if headers.is_empty() {
        return Err(ValidationError::EmptyData);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(ValidationError::parse)?;
        rows.push(record.iter().map(RawCell::from_text).collect());
    }

    Ok(RawTable::new(headers, rows))
}

fn read_spreadsheet(raw_bytes: &[u8]) -> Result<RawTable, ValidationError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(raw_bytes.to_vec())).map_err(ValidationError::parse)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ValidationError::EmptyData)?
        .map_err(ValidationError::parse)?;

    let mut sheet_rows = range.rows();
    let headers = match sheet_rows.next() {
        Some(row) => unique_headers(
            row.iter()
                .enumerate()
                .map(|(index, cell)| header_name(&cell.to_string(), index)),
        ),
        None => return Err(ValidationError::EmptyData),
    };

    let rows = sheet_rows
        .map(|row| row.iter().map(spreadsheet_cell).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(RawCell::is_empty))
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn spreadsheet_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::String(s) => RawCell::from_text(s.trim()),
        other => RawCell::from_text(other.to_string().trim()),
    }
}

/// Blank headers get a positional placeholder name.
fn header_name(raw: &str, index: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("Unnamed: {}", index)
    } else {
        trimmed.to_string()
    }
}

/// Suffixes repeated names with `.1`, `.2`, ... in column order.
///
/// The result columns count as taken, so a criterion called `Rank` becomes
/// `Rank.1` rather than shadowing the appended rank.
fn unique_headers(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut taken: HashSet<String> = [SCORE_COLUMN, RANK_COLUMN]
        .iter()
        .map(|s| s.to_string())
        .collect();

    names
        .map(|name| {
            let mut candidate = name.clone();
            let mut suffix = 1;
            while taken.contains(&candidate) {
                candidate = format!("{}.{}", name, suffix);
                suffix += 1;
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}
