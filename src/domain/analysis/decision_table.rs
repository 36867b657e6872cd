//! Decision Table - Core data structures for TOPSIS ranking.
//!
//! A `RawTable` is what comes off the wire: header names and loosely typed
//! cells. A `DecisionTable` is the validated form: one identifier per row plus
//! the same number (at least two) of numeric criterion values on every row.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Impact, ValidationError};

/// Minimum number of criterion columns a decision table must carry.
pub const MIN_CRITERIA: usize = 2;

/// A loosely typed cell as read from a delimited file or spreadsheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawCell {
    /// Builds a cell from already-trimmed text; blank text becomes `Empty`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(text)
        }
    }

    /// Coerces the cell to a finite number, if it holds one.
    ///
    /// Text is trimmed before parsing. Booleans, blanks and non-finite values
    /// (`NaN`, `inf`) are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawCell::Number(n) => *n,
            RawCell::Text(s) => s.trim().parse::<f64>().ok()?,
            RawCell::Empty | RawCell::Bool(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Returns true for a blank cell.
    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Empty => Ok(()),
            RawCell::Bool(b) => write!(f, "{}", b),
            RawCell::Number(n) => write!(f, "{}", n),
            RawCell::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::from_text(s)
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        RawCell::from_text(s)
    }
}

impl From<f64> for RawCell {
    fn from(n: f64) -> Self {
        RawCell::Number(n)
    }
}

/// An unvalidated table: header names plus rows of raw cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Creates a raw table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawCell>>) -> Self {
        Self { headers, rows }
    }

    /// Total number of columns, identifier included.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (the header row is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the cell at (row, column); cells past a short row read as empty.
    pub fn cell(&self, row: usize, column: usize) -> &RawCell {
        const EMPTY: &RawCell = &RawCell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(EMPTY)
    }

    /// Writes the table as comma-separated text with a header row.
    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

/// One row of the decision table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    /// Identifier cell, kept verbatim and never used numerically.
    pub identifier: RawCell,
    /// Criterion values in column order.
    pub values: Vec<f64>,
}

impl Alternative {
    pub fn new(identifier: impl Into<RawCell>, values: Vec<f64>) -> Self {
        Self {
            identifier: identifier.into(),
            values,
        }
    }
}

/// A validated decision matrix.
///
/// Every alternative carries exactly `criterion_count()` values and there
/// are at least [`MIN_CRITERIA`] criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionTable {
    identifier_header: String,
    criteria: Vec<String>,
    alternatives: Vec<Alternative>,
}

impl DecisionTable {
    /// Creates a table, checking the shape invariants.
    pub fn try_new(
        identifier_header: impl Into<String>,
        criteria: Vec<String>,
        alternatives: Vec<Alternative>,
    ) -> Result<Self, ValidationError> {
        if criteria.len() < MIN_CRITERIA {
            return Err(ValidationError::TooFewColumns(criteria.len() + 1));
        }

        if let Some((index, alt)) = alternatives
            .iter()
            .enumerate()
            .find(|(_, alt)| alt.values.len() != criteria.len())
        {
            return Err(ValidationError::ParseError(format!(
                "row {} has {} criterion values, expected {}",
                index + 1,
                alt.values.len(),
                criteria.len()
            )));
        }

        Ok(Self {
            identifier_header: identifier_header.into(),
            criteria,
            alternatives,
        })
    }

    /// Creates a builder for constructing a decision table.
    pub fn builder() -> DecisionTableBuilder {
        DecisionTableBuilder::new()
    }

    /// Header of the identifier column.
    pub fn identifier_header(&self) -> &str {
        &self.identifier_header
    }

    /// Criterion column headers, in column order.
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Rows of the table, in original order.
    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Returns true if the table has no alternatives.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Returns the number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Returns the number of criteria (N).
    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Iterates over the values of one criterion column.
    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.alternatives
            .iter()
            .filter_map(move |alt| alt.values.get(index).copied())
    }

    /// All column headers, identifier first.
    pub fn headers(&self) -> Vec<String> {
        std::iter::once(self.identifier_header.clone())
            .chain(self.criteria.iter().cloned())
            .collect()
    }
}

/// Builder for constructing DecisionTable instances.
#[derive(Debug, Default)]
pub struct DecisionTableBuilder {
    identifier_header: Option<String>,
    criteria: Vec<String>,
    alternatives: Vec<Alternative>,
}

impl DecisionTableBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier column header (defaults to "Name").
    pub fn identifier(mut self, header: impl Into<String>) -> Self {
        self.identifier_header = Some(header.into());
        self
    }

    /// Sets the criterion headers.
    pub fn criteria(mut self, headers: Vec<impl Into<String>>) -> Self {
        self.criteria = headers.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Adds a row.
    pub fn alternative(mut self, identifier: impl Into<RawCell>, values: Vec<f64>) -> Self {
        self.alternatives.push(Alternative::new(identifier, values));
        self
    }

    /// Builds the decision table.
    pub fn build(self) -> Result<DecisionTable, ValidationError> {
        DecisionTable::try_new(
            self.identifier_header.unwrap_or_else(|| "Name".to_string()),
            self.criteria,
            self.alternatives,
        )
    }
}

/// Positive weights, one per criterion, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Creates a weight vector; every weight must be finite and > 0.
    pub fn try_new(weights: Vec<f64>) -> Result<Self, ValidationError> {
        if let Some(&bad) = weights.iter().find(|w| !w.is_finite()) {
            return Err(ValidationError::NotANumber(bad.to_string()));
        }
        if let Some(&bad) = weights.iter().find(|&&w| w <= 0.0) {
            return Err(ValidationError::NonPositiveWeight(bad));
        }
        Ok(Self(weights))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<f64>> for WeightVector {
    type Error = ValidationError;

    fn try_from(weights: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_new(weights)
    }
}

impl From<WeightVector> for Vec<f64> {
    fn from(weights: WeightVector) -> Self {
        weights.0
    }
}

/// Criterion polarities, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImpactVector(Vec<Impact>);

impl ImpactVector {
    pub fn new(impacts: Vec<Impact>) -> Self {
        Self(impacts)
    }

    pub fn as_slice(&self) -> &[Impact] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Impact>> for ImpactVector {
    fn from(impacts: Vec<Impact>) -> Self {
        Self(impacts)
    }
}
