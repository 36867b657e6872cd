//! Input Validator - Parses raw weights, impacts and tables into typed input.

use super::{parse_table, Alternative, DecisionTable, ImpactVector, RawTable, WeightVector};
use crate::domain::foundation::{
    Impact, InputField, NonNumericColumn, TableKind, ValidationError,
};

/// Validation functions for raw, untrusted request input.
///
/// Every function is pure: inputs are only read, and the first error
/// encountered in a raw string is reported. Column-level problems in a
/// table are aggregated instead.
pub struct InputValidator;

impl InputValidator {
    /// Parses a comma-separated list of positive weights.
    ///
    /// # Edge Cases
    /// - Blank input: `EmptyInput`
    /// - No comma (a single value or free text): `FormatError`
    /// - Consecutive or trailing commas: `EmptyToken`
    /// - `NaN`/`inf`: `NotANumber`, they are not usable weights
    pub fn parse_weights(raw: &str) -> Result<WeightVector, ValidationError> {
        let tokens = Self::split_tokens(raw, InputField::Weights)?;

        let mut weights = Vec::with_capacity(tokens.len());
        for token in tokens {
            let weight = token
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite())
                .ok_or_else(|| ValidationError::NotANumber(token.to_string()))?;

            if weight <= 0.0 {
                return Err(ValidationError::NonPositiveWeight(weight));
            }
            weights.push(weight);
        }

        WeightVector::try_new(weights)
    }

    /// Parses a comma-separated list of `+`/`-` impacts.
    pub fn parse_impacts(raw: &str) -> Result<ImpactVector, ValidationError> {
        let impacts = Self::split_tokens(raw, InputField::Impacts)?
            .into_iter()
            .map(str::parse::<Impact>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ImpactVector::new(impacts))
    }

    /// Parses a table payload of the declared kind.
    pub fn parse_table(raw_bytes: &[u8], declared_kind: &TableKind) -> Result<RawTable, ValidationError> {
        parse_table(raw_bytes, declared_kind)
    }

    /// Checks column count and coerces every criterion cell to a number.
    ///
    /// The first column is the identifier and is never coerced. All
    /// criterion columns holding a non-numeric cell are reported together.
    pub fn validate_structure(raw: &RawTable) -> Result<DecisionTable, ValidationError> {
        let column_count = raw.column_count();
        if column_count < 3 {
            return Err(ValidationError::TooFewColumns(column_count));
        }
        if raw.row_count() == 0 {
            return Err(ValidationError::EmptyData);
        }

        let non_numeric: Vec<NonNumericColumn> = (1..column_count)
            .filter(|&column| {
                (0..raw.row_count()).any(|row| raw.cell(row, column).as_number().is_none())
            })
            .map(|column| NonNumericColumn::new(raw.headers[column].clone(), column + 1))
            .collect();

        if !non_numeric.is_empty() {
            return Err(ValidationError::NonNumericColumns(non_numeric));
        }

        let alternatives = (0..raw.row_count())
            .map(|row| {
                let values = (1..column_count)
                    .filter_map(|column| raw.cell(row, column).as_number())
                    .collect();
                Alternative::new(raw.cell(row, 0).clone(), values)
            })
            .collect();

        DecisionTable::try_new(
            raw.headers[0].clone(),
            raw.headers[1..].to_vec(),
            alternatives,
        )
    }

    /// Checks that weights, impacts and criterion columns agree in count.
    ///
    /// A vector that disagrees with the table alone is reported against the
    /// table. When both disagree with the table and with each other, the
    /// weights/impacts mismatch is reported.
    pub fn check_dimensions(
        table: &DecisionTable,
        weights: &WeightVector,
        impacts: &ImpactVector,
    ) -> Result<(), ValidationError> {
        let criteria = table.criterion_count();
        match (weights.len() == criteria, impacts.len() == criteria) {
            (true, true) => Ok(()),
            (false, true) => Err(ValidationError::WeightCountMismatch {
                expected: criteria,
                actual: weights.len(),
            }),
            (true, false) => Err(ValidationError::ImpactCountMismatch {
                expected: criteria,
                actual: impacts.len(),
            }),
            (false, false) => {
                Self::check_weight_impact_counts(weights, impacts)?;
                Err(ValidationError::WeightCountMismatch {
                    expected: criteria,
                    actual: weights.len(),
                })
            }
        }
    }

    /// Checks that there is one impact per weight.
    pub fn check_weight_impact_counts(
        weights: &WeightVector,
        impacts: &ImpactVector,
    ) -> Result<(), ValidationError> {
        if weights.len() != impacts.len() {
            return Err(ValidationError::WeightImpactCountMismatch {
                weights: weights.len(),
                impacts: impacts.len(),
            });
        }
        Ok(())
    }

    /// Runs the full validation pipeline for one request.
    ///
    /// Order: weights, impacts, weights vs impacts, table syntax, table
    /// structure, table vs weights/impacts.
    pub fn validate(
        raw_weights: &str,
        raw_impacts: &str,
        raw_table: &[u8],
        table_kind: &TableKind,
    ) -> Result<(DecisionTable, WeightVector, ImpactVector), ValidationError> {
        let weights = Self::parse_weights(raw_weights)?;
        let impacts = Self::parse_impacts(raw_impacts)?;
        Self::check_weight_impact_counts(&weights, &impacts)?;

        let raw = Self::parse_table(raw_table, table_kind)?;
        let table = Self::validate_structure(&raw)?;
        Self::check_dimensions(&table, &weights, &impacts)?;

        Ok((table, weights, impacts))
    }

    fn split_tokens(raw: &str, field: InputField) -> Result<Vec<&str>, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyInput(field));
        }
        if !trimmed.contains(',') {
            return Err(ValidationError::FormatError(field));
        }

        trimmed
            .split(',')
            .map(str::trim)
            .map(|token| {
                if token.is_empty() {
                    Err(ValidationError::EmptyToken(field))
                } else {
                    Ok(token)
                }
            })
            .collect()
    }
}
