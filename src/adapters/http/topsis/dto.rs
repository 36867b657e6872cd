//! HTTP DTOs (Data Transfer Objects) for TOPSIS endpoints.
//!
//! These types define the multipart request fields and JSON response bodies
//! for the ranking API. They serve as the boundary between HTTP and the
//! application layer.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::analysis::ScoredTable;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

/// Returns true if the address looks like `user@example.com`.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// How the caller wants the ranked result delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOption {
    /// Email the result CSV.
    Email,
    /// Return the result as JSON.
    Display,
}

impl FromStr for ResultOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "email" => Ok(ResultOption::Email),
            "display" => Ok(ResultOption::Display),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ResultOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultOption::Email => write!(f, "email"),
            ResultOption::Display => write!(f, "display"),
        }
    }
}

/// The uploaded file part of a submission.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    /// Client-side file name; empty when the browser sent no file.
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Fields collected from a `/submit` multipart body.
///
/// Every field is optional here so missing ones can be reported together.
#[derive(Debug, Clone, Default)]
pub struct SubmitForm {
    pub file: Option<UploadedFile>,
    pub weights: Option<String>,
    pub impacts: Option<String>,
    pub result_option: Option<String>,
    pub email: Option<String>,
}

impl SubmitForm {
    /// Names of required fields that were not sent, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.weights.is_none() {
            missing.push("weights");
        }
        if self.impacts.is_none() {
            missing.push("impacts");
        }
        if self.result_option.is_none() {
            missing.push("result_option");
        }
        if self.file.is_none() {
            missing.push("file");
        }
        missing
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for `result_option=display`.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayResultResponse {
    pub status: &'static str,
    pub message: String,
    /// Column names in output order.
    pub columns: Vec<String>,
    /// One object per row, keyed by column name.
    pub result: Vec<Map<String, Value>>,
}

impl From<&ScoredTable> for DisplayResultResponse {
    fn from(scored: &ScoredTable) -> Self {
        let columns = scored.headers();

        let result = scored
            .rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                let cells = std::iter::once(serde_json::to_value(&row.identifier).unwrap_or(Value::Null))
                    .chain(row.values.iter().map(|v| Value::from(*v)))
                    .chain([Value::from(row.score), Value::from(row.rank)]);
                for (column, value) in columns.iter().zip(cells) {
                    record.insert(column.clone(), value);
                }
                record
            })
            .collect();

        Self {
            status: "success",
            message: "TOPSIS calculation completed successfully!".to_string(),
            columns,
            result,
        }
    }
}

/// Plain success response (email delivery).
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response DTO
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status: &'static str,
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error",
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response with details.
    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(error_code, message)
        }
    }
}
