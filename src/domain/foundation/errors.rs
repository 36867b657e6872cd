//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Which raw parameter string an input-format error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Weights,
    Impacts,
}

impl InputField {
    /// Singular noun used in messages ("weight", "impact").
    pub fn noun(&self) -> &'static str {
        match self {
            InputField::Weights => "weight",
            InputField::Impacts => "impact",
        }
    }

    /// A well-formed example value for this field.
    pub fn example(&self) -> &'static str {
        match self {
            InputField::Weights => "1,2,3",
            InputField::Impacts => "+,-,+",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::Weights => write!(f, "Weights"),
            InputField::Impacts => write!(f, "Impacts"),
        }
    }
}

/// A criterion column that holds at least one value that is not a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonNumericColumn {
    /// Header name of the column.
    pub name: String,
    /// 1-based position of the column in the table (identifier column is 1).
    pub position: usize,
}

impl NonNumericColumn {
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

impl fmt::Display for NonNumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column '{}' (column {}) contains non-numeric values",
            self.name, self.position
        )
    }
}

fn describe_columns(columns: &[NonNumericColumn]) -> String {
    columns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while turning raw request input into a decision matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} are required")]
    EmptyInput(InputField),

    #[error("{} must be comma-separated (e.g., {})", .0, .0.example())]
    FormatError(InputField),

    #[error("Empty {} value found. Ensure no consecutive commas", .0.noun())]
    EmptyToken(InputField),

    #[error("'{0}' is not a valid number in weights")]
    NotANumber(String),

    #[error("All weights must be positive numbers. Got {0}")]
    NonPositiveWeight(f64),

    #[error("Each impact must be '+' or '-'. Got '{0}'")]
    InvalidImpactSymbol(String),

    #[error("File must be CSV or Excel (.csv, .xlsx, .xls), got '{0}'")]
    UnsupportedFormat(String),

    #[error("File is empty. Please upload a file with data")]
    EmptyData,

    #[error("File parsing error: {0}. Ensure file is properly formatted")]
    ParseError(String),

    #[error("File must contain at least 3 columns (1 name + at least 2 criteria). Found {0} columns")]
    TooFewColumns(usize),

    #[error("Non-numeric values found: {}", describe_columns(.0))]
    NonNumericColumns(Vec<NonNumericColumn>),

    #[error("Mismatch: File has {expected} criteria columns but {actual} weights provided. They must match")]
    WeightCountMismatch { expected: usize, actual: usize },

    #[error("Mismatch: File has {expected} criteria columns but {actual} impacts provided. They must match")]
    ImpactCountMismatch { expected: usize, actual: usize },

    #[error("Mismatch: {weights} weights but {impacts} impacts. They must be equal")]
    WeightImpactCountMismatch { weights: usize, impacts: usize },
}

impl ValidationError {
    /// Creates a parse error from any displayable cause.
    pub fn parse(detail: impl fmt::Display) -> Self {
        ValidationError::ParseError(detail.to_string())
    }

    /// Creates an unsupported format error.
    pub fn unsupported_format(kind: impl Into<String>) -> Self {
        ValidationError::UnsupportedFormat(kind.into())
    }

    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyInput(_) => ErrorCode::EmptyInput,
            ValidationError::FormatError(_) => ErrorCode::InvalidFormat,
            ValidationError::EmptyToken(_) => ErrorCode::EmptyToken,
            ValidationError::NotANumber(_) => ErrorCode::NotANumber,
            ValidationError::NonPositiveWeight(_) | ValidationError::InvalidImpactSymbol(_) => {
                ErrorCode::OutOfRange
            }
            ValidationError::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            ValidationError::EmptyData => ErrorCode::EmptyData,
            ValidationError::ParseError(_) => ErrorCode::ParseError,
            ValidationError::TooFewColumns(_) => ErrorCode::TooFewColumns,
            ValidationError::NonNumericColumns(_) => ErrorCode::NonNumericColumn,
            ValidationError::WeightCountMismatch { .. }
            | ValidationError::ImpactCountMismatch { .. }
            | ValidationError::WeightImpactCountMismatch { .. } => ErrorCode::DimensionMismatch,
        }
    }
}

/// Errors raised by the TOPSIS computation itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputationError {
    #[error("Number of criteria ({criteria}) does not match number of weights ({weights}) and impacts ({impacts})")]
    CriteriaCountMismatch {
        criteria: usize,
        weights: usize,
        impacts: usize,
    },

    #[error("Decision table has no alternatives to rank")]
    NoAlternatives,

    #[error("Column '{column}' is too large to normalize")]
    NumericOverflow { column: String },
}

impl ComputationError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ComputationError::CriteriaCountMismatch { .. } => ErrorCode::DimensionMismatch,
            ComputationError::NoAlternatives => ErrorCode::EmptyData,
            ComputationError::NumericOverflow { .. } => ErrorCode::NumericOverflow,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input format errors
    EmptyInput,
    InvalidFormat,
    EmptyToken,
    NotANumber,
    OutOfRange,

    // Table errors
    UnsupportedFormat,
    EmptyData,
    ParseError,
    TooFewColumns,
    NonNumericColumn,

    // Dimension errors
    DimensionMismatch,

    // Arithmetic errors
    NumericOverflow,

    // Delivery errors
    StorageError,
    MailError,
    MailNotConfigured,

    // Request errors
    MissingParameters,
    InvalidRequest,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::EmptyInput => "EMPTY_INPUT",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::EmptyToken => "EMPTY_TOKEN",
            ErrorCode::NotANumber => "NOT_A_NUMBER",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorCode::EmptyData => "EMPTY_DATA",
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::TooFewColumns => "TOO_FEW_COLUMNS",
            ErrorCode::NonNumericColumn => "NON_NUMERIC_COLUMN",
            ErrorCode::DimensionMismatch => "DIMENSION_MISMATCH",
            ErrorCode::NumericOverflow => "NUMERIC_OVERFLOW",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::MailError => "MAIL_ERROR",
            ErrorCode::MailNotConfigured => "MAIL_NOT_CONFIGURED",
            ErrorCode::MissingParameters => "MISSING_PARAMETERS",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
