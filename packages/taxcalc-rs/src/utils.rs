// src/utils.rs

use ndarray::ArrayView1;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxcalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Invalid weight {value} in row {row}")]
    InvalidWeight { row: usize, value: f64 },

    #[error("Missing value in column '{column}', row {row}")]
    MissingValue { column: String, row: usize },

    #[error("Could not read packaged file '{name}': {reason}")]
    Resource { name: String, reason: String },

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TaxcalcError>;

/// Reject NaN, infinite and negative weights.
#[inline]
pub fn checked_weight(row: usize, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TaxcalcError::InvalidWeight { row, value })
    }
}

/// True when every pair of values agrees within `tol` (NaN equals NaN).
pub fn all_close(a: ArrayView1<f64>, b: ArrayView1<f64>, tol: f64) -> bool {
    a.len() == b.len()
        && a.iter().zip(b.iter()).all(|(&x, &y)| {
            (x.is_nan() && y.is_nan()) || (x - y).abs() <= tol
        })
}
