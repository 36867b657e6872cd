//! Impact value object: the polarity of a criterion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Whether higher raw values of a criterion are better or worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    /// Higher is better (`+`).
    #[serde(rename = "+")]
    Benefit,
    /// Lower is better (`-`).
    #[serde(rename = "-")]
    Cost,
}

impl Impact {
    /// Returns the symbol used in raw impact strings.
    pub fn symbol(&self) -> char {
        match self {
            Impact::Benefit => '+',
            Impact::Cost => '-',
        }
    }

    /// Picks the (best, worst) pair out of a column's (max, min).
    pub fn ideal_pair(&self, max: f64, min: f64) -> (f64, f64) {
        match self {
            Impact::Benefit => (max, min),
            Impact::Cost => (min, max),
        }
    }
}

impl FromStr for Impact {
    type Err = ValidationError;

    /// Accepts exactly `+` or `-`; surrounding whitespace is the caller's concern.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Impact::Benefit),
            "-" => Ok(Impact::Cost),
            other => Err(ValidationError::InvalidImpactSymbol(other.to_string())),
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
