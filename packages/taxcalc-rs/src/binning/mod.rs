// src/binning/mod.rs
//! Assignment of records to table rows: fixed income bins or weighted quantiles.

pub mod income;
pub mod quantile;

use std::fmt;

use serde::Serialize;

use crate::aggregation::Partition;
use crate::records::RecordSet;
use crate::utils::Result;

pub use income::{
    add_income_table_row_variable, SOI_AGI_BINS, STANDARD_INCOME_BINS, STANDARD_ROW_NAMES,
};
pub use quantile::{add_quantile_table_row_variable, DECILE_ROW_NAMES};

/// Label of one bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BinLabel {
    /// Income interval `(lo, hi]`.
    Interval { lo: f64, hi: f64 },
    /// 1-based quantile number.
    Quantile(usize),
}

impl fmt::Display for BinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinLabel::Interval { lo, hi } => write!(f, "({}, {}]", lo, hi),
            BinLabel::Quantile(k) => write!(f, "{}", k),
        }
    }
}

/// Bins in ascending order plus the bin index of every record.
#[derive(Debug, Clone)]
pub struct BinAssignment {
    bins: Vec<BinLabel>,
    names: Vec<String>,
    row_bins: Vec<usize>,
}

impl BinAssignment {
    pub(crate) fn new(bins: Vec<BinLabel>, row_bins: Vec<usize>) -> Self {
        let names = bins.iter().map(BinLabel::to_string).collect();
        BinAssignment { bins, names, row_bins }
    }

    /// Replace the default display names; ignored unless one name per bin is given.
    pub(crate) fn with_names(mut self, names: &[&str]) -> Self {
        if names.len() == self.bins.len() {
            self.names = names.iter().map(|s| s.to_string()).collect();
        }
        self
    }

    pub fn bins(&self) -> &[BinLabel] {
        &self.bins
    }

    /// Table-row names, one per bin.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_bins(&self) -> usize {
        self.bins.len()
    }

    /// Bin index (0-based) of every record.
    pub fn row_bins(&self) -> &[usize] {
        &self.row_bins
    }

    pub fn label_of(&self, row: usize) -> Option<&BinLabel> {
        self.row_bins.get(row).map(|&b| &self.bins[b])
    }

    /// Number of records in each bin.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.bins.len()];
        for &b in &self.row_bins {
            counts[b] += 1;
        }
        counts
    }

    pub fn partition(&self) -> Result<Partition<usize>> {
        Partition::from_bins(&self.row_bins, self.bins.len())
    }
}

/// How records are grouped into table rows.
#[derive(Debug, Clone, PartialEq)]
pub enum BinScheme {
    /// Weighted deciles with the bottom and top deciles split further.
    WeightedDeciles,
    StandardIncomeBins,
    SoiAgiBins,
    /// Custom ascending edges.
    Edges(Vec<f64>),
    Quantiles { num_quantiles: usize, weight_by_income_measure: bool },
}

impl BinScheme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weighted_deciles" => Some(BinScheme::WeightedDeciles),
            "standard_income_bins" => Some(BinScheme::StandardIncomeBins),
            "soi_agi_bins" => Some(BinScheme::SoiAgiBins),
            _ => None,
        }
    }

    /// Bin every record of `records` on `income_measure`.
    pub fn assign(&self, records: &RecordSet, income_measure: &str) -> Result<BinAssignment> {
        match self {
            BinScheme::WeightedDeciles => {
                add_quantile_table_row_variable(records, income_measure, 10, true, false)
            }
            BinScheme::StandardIncomeBins => {
                add_income_table_row_variable(records, income_measure, &STANDARD_INCOME_BINS)
                    .map(|a| a.with_names(&STANDARD_ROW_NAMES))
            }
            BinScheme::SoiAgiBins => {
                add_income_table_row_variable(records, income_measure, &SOI_AGI_BINS)
            }
            BinScheme::Edges(edges) => add_income_table_row_variable(records, income_measure, edges),
            BinScheme::Quantiles { num_quantiles, weight_by_income_measure } => {
                add_quantile_table_row_variable(
                    records,
                    income_measure,
                    *num_quantiles,
                    false,
                    *weight_by_income_measure,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::weighted_count;
    use ndarray::array;

    #[test]
    fn test_bin_scheme_from_str() {
        assert_eq!(BinScheme::from_str("weighted_deciles"), Some(BinScheme::WeightedDeciles));
        assert_eq!(BinScheme::from_str("Standard_Income_Bins"), Some(BinScheme::StandardIncomeBins));
        assert_eq!(BinScheme::from_str("soi_agi_bins"), Some(BinScheme::SoiAgiBins));
        assert_eq!(BinScheme::from_str("webapp_income_bins"), None);
    }

    #[test]
    fn test_label_display() {
        let lab = BinLabel::Interval { lo: f64::NEG_INFINITY, hi: 1.0 };
        assert_eq!(lab.to_string(), "(-inf, 1]");
        assert_eq!(BinLabel::Quantile(7).to_string(), "7");
    }

    #[test]
    fn test_standard_scheme_uses_row_names() {
        let recs = RecordSet::new(vec![
            ("expanded_income", array![-5.0, 0.0, 15e3, 2e6]),
            ("weight", array![1.0, 2.0, 3.0, 4.0]),
        ])
        .unwrap();
        let asg = BinScheme::StandardIncomeBins.assign(&recs, "expanded_income").unwrap();
        assert_eq!(asg.n_bins(), 13);
        assert_eq!(asg.names()[0], "<$0K");
        assert_eq!(asg.row_bins(), &[0, 1, 3, 12]);

        let wc = asg.partition().unwrap().apply(&recs, weighted_count).unwrap();
        assert_eq!(wc.iter().map(|(_, w)| w).sum::<f64>(), 10.0);
        assert_eq!(wc[12], (12, 4.0));
    }

    #[test]
    fn test_partition_covers_every_bin() {
        let recs = RecordSet::new(vec![
            ("expanded_income", array![10.0, 20.0, 30.0, 40.0]),
            ("weight", array![1.0, 1.0, 1.0, 1.0]),
        ])
        .unwrap();
        let scheme = BinScheme::Quantiles { num_quantiles: 2, weight_by_income_measure: false };
        let asg = scheme.assign(&recs, "expanded_income").unwrap();
        let part = asg.partition().unwrap();
        assert_eq!(part.n_groups(), 2);
        assert_eq!(asg.counts(), vec![2, 2]);
        assert_eq!(asg.label_of(3), Some(&BinLabel::Quantile(2)));
        assert_eq!(asg.label_of(9), None);
    }
}
