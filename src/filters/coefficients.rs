use super::error::{FilterError, FilterResult};
use serde::{Deserialize, Serialize};

/// Number of values in one flat SOS row: `[b0, b1, b2, a0, a1, a2]`.
pub const SOS_ROW_LEN: usize = 6;

/// Coefficients of one second-order section, already normalised so that
/// `a0 == 1`.
///
/// On disk (and across the FFI boundary) a section is the standard flat SOS
/// row `[b0, b1, b2, a0, a1, a2]` as produced by filter-design routines. The
/// `a0` slot is carried for compatibility only and is never read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 6]")]
pub struct SosCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl SosCoefficients {
    pub fn new(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64) -> Self {
        SosCoefficients { b0, b1, b2, a1, a2 }
    }

    /// Reads a flat SOS row. Index 3 (`a0`) is skipped.
    pub fn from_slice(s: &[f64]) -> FilterResult<Self> {
        if s.len() != SOS_ROW_LEN {
            return Err(FilterError::InvalidCoefficients {
                section: None,
                len: s.len(),
            });
        }

        Ok(SosCoefficients {
            b0: s[0],
            b1: s[1],
            b2: s[2],
            a1: s[4],
            a2: s[5],
        })
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.b0, self.b1, self.b2, 1.0, self.a1, self.a2]
    }
}

impl TryFrom<Vec<f64>> for SosCoefficients {
    type Error = FilterError;

    fn try_from(row: Vec<f64>) -> FilterResult<Self> {
        Self::from_slice(&row)
    }
}

impl From<SosCoefficients> for [f64; 6] {
    fn from(coeffs: SosCoefficients) -> Self {
        coeffs.to_array()
    }
}
