//! Defines the error type for the chowliu library, along with the log-domain
//! numeric helpers shared by the estimators and inference engines.

use std::error::Error;
use std::f64;
use std::fmt;
use std::result;

pub type Result<T> = result::Result<T, CltError>;

#[derive(Clone, Debug, PartialEq)]
pub enum CltError {

    /// The additive-smoothing constant must be strictly positive
    InvalidAlpha(f64),

    /// The requested root index is outside the variable range
    InvalidRoot { root: usize, dimension: usize },

    /// A dataset entry was not a binary value
    InvalidDatum { row: usize, column: usize, value: u8 },

    /// A query, matrix or name list did not match the expected number of variables
    DimensionMismatch { expected: usize, actual: usize },

    /// The dataset holds no samples or no variables
    EmptyDataset,

    /// Exhaustive enumeration over this many missing entries cannot be represented
    TooManyMissing { count: usize },

    /// A general error with the given description
    General(String)

}

impl fmt::Display for CltError {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CltError::InvalidAlpha(alpha) => {
                write!(f, "Smoothing constant must be strictly positive, got {}", alpha)
            },
            CltError::InvalidRoot { root, dimension } => {
                write!(f, "Root index {} is outside the variable range [0, {})", root, dimension)
            },
            CltError::InvalidDatum { row, column, value } => {
                write!(f, "Dataset entry at ({}, {}) is {}; entries must be 0 or 1", row, column, value)
            },
            CltError::DimensionMismatch { expected, actual } => {
                write!(f, "Expected {} variables, got {}", expected, actual)
            },
            CltError::EmptyDataset => {
                write!(f, "The dataset must hold at least one sample of at least one variable")
            },
            CltError::TooManyMissing { count } => {
                write!(f, "Cannot enumerate completions of {} missing entries", count)
            },
            CltError::General(ref err) => write!(f, "{}", err)
        }
    }

}

impl Error for CltError {}


/// Log of a sum of exponentials, computed without leaving the log domain.
///
/// The running maximum is subtracted before exponentiating so that neither
/// overflow nor underflow can occur for finite inputs. An empty or all
/// negative-infinity input yields negative infinity (the log of zero mass)
/// rather than NaN.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }

    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}
