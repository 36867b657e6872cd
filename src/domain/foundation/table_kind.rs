//! Declared kind of an uploaded table payload.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How the caller says a table payload is encoded.
///
/// The kind is declared, not sniffed: callers derive it from the upload's
/// file name. Anything that is not a delimited or spreadsheet payload is kept
/// as `Unsupported` so the parser can reject it with a precise error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Comma-separated text with a header row.
    Delimited,
    /// Excel workbook (`.xlsx`, `.xls`); the first worksheet is read.
    Spreadsheet,
    /// Any other declared kind, carrying what was declared.
    Unsupported(String),
}

impl TableKind {
    /// Derives the kind from a file extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => TableKind::Delimited,
            "xlsx" | "xls" => TableKind::Spreadsheet,
            other => TableKind::Unsupported(other.to_string()),
        }
    }

    /// Derives the kind from a file name such as `data.CSV`.
    pub fn from_file_name(file_name: &str) -> Self {
        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => Self::from_extension(ext),
            None => TableKind::Unsupported(file_name.to_string()),
        }
    }

    /// Returns true if the parser can read this kind.
    pub fn is_supported(&self) -> bool {
        !matches!(self, TableKind::Unsupported(_))
    }
}

impl FromStr for TableKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "delimited" | "csv" => TableKind::Delimited,
            "spreadsheet" | "xlsx" | "xls" => TableKind::Spreadsheet,
            other => TableKind::Unsupported(other.to_string()),
        })
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Delimited => write!(f, "delimited"),
            TableKind::Spreadsheet => write!(f, "spreadsheet"),
            TableKind::Unsupported(kind) => write!(f, "{}", kind),
        }
    }
}
