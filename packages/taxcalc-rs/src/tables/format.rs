// src/tables/format.rs

use serde::{Deserialize, Serialize};

use super::catalog::ValueKind;

/// Rendering options for delimited table output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFormat {
    /// Field separator, must be ASCII.
    pub delimiter: char,
    /// Digits after the decimal point.
    pub decimals: usize,
    /// Token written for NaN values.
    pub missing: String,
    /// Multiplier applied to count columns.
    pub count_scale: f64,
    /// Multiplier applied to currency columns.
    pub currency_scale: f64,
    /// Write display labels instead of column names in the header.
    pub use_labels: bool,
}

impl Default for TableFormat {
    fn default() -> Self {
        TableFormat {
            delimiter: ',',
            decimals: 2,
            missing: "nan".to_string(),
            count_scale: 1.0,
            currency_scale: 1.0,
            use_labels: false,
        }
    }
}

impl TableFormat {
    /// Counts in millions and money in billions, with labelled headers.
    pub fn display() -> Self {
        TableFormat {
            count_scale: 1e-6,
            currency_scale: 1e-9,
            use_labels: true,
            ..TableFormat::default()
        }
    }

    pub fn scale_for(&self, kind: ValueKind) -> f64 {
        match kind {
            ValueKind::Count => self.count_scale,
            ValueKind::Currency => self.currency_scale,
            ValueKind::Percent => 1.0,
        }
    }

    pub fn render(&self, value: f64, kind: ValueKind) -> String {
        if value.is_nan() {
            self.missing.clone()
        } else {
            format!("{:.*}", self.decimals, value * self.scale_for(kind))
        }
    }
}
