// src/binning/income.rs
//! Fixed-edge income bins.

use crate::records::RecordSet;
use crate::utils::{Result, TaxcalcError};

use super::{BinAssignment, BinLabel};

/// Edges of the standard income bins; the two edges around zero isolate
/// negative and zero incomes.
pub const STANDARD_INCOME_BINS: [f64; 14] = [
    f64::NEG_INFINITY, -1e-9, 1e-9, 10e3, 20e3, 30e3, 40e3, 50e3,
    75e3, 100e3, 200e3, 500e3, 1e6, f64::INFINITY,
];

pub const STANDARD_ROW_NAMES: [&str; 13] = [
    "<$0K", "=$0K", "$0-10K", "$10-20K", "$20-30K", "$30-40K", "$40-50K",
    "$50-75K", "$75-100K", "$100-200K", "$200-500K", "$500-1000K", ">$1000K",
];

/// Edges of the IRS Statistics of Income AGI bins.
pub const SOI_AGI_BINS: [f64; 20] = [
    f64::NEG_INFINITY, 1.0, 5e3, 10e3, 15e3, 20e3, 25e3, 30e3, 40e3, 50e3,
    75e3, 100e3, 200e3, 500e3, 1e6, 1.5e6, 2e6, 5e6, 10e6, f64::INFINITY,
];

/// Assign every record to the income bin containing `measure_col`.
///
/// Bins are the intervals `(edges[i-1], edges[i]]`, so a value equal to an
/// edge falls in the lower bin; the first bin also holds a value equal to
/// `edges[0]`.
///
/// # Arguments
/// * `records` - Filer records
/// * `measure_col` - Income column to bin on
/// * `bin_edges` - Strictly ascending edges, at least two
pub fn add_income_table_row_variable(
    records: &RecordSet,
    measure_col: &str,
    bin_edges: &[f64],
) -> Result<BinAssignment> {
    validate_edges(bin_edges)?;
    let measure = records.column(measure_col)?;

    let first = bin_edges[0];
    let last = bin_edges[bin_edges.len() - 1];
    let row_bins = measure
        .iter()
        .enumerate()
        .map(|(row, &v)| {
            if v.is_nan() || v < first || v > last {
                return Err(TaxcalcError::InvalidInput(format!(
                    "{} value {} in row {} is outside bin edges [{}, {}]",
                    measure_col, v, row, first, last
                )));
            }
            let idx = bin_edges.partition_point(|&e| e < v);
            Ok(idx.saturating_sub(1))
        })
        .collect::<Result<Vec<usize>>>()?;

    let bins = bin_edges
        .windows(2)
        .map(|w| BinLabel::Interval { lo: w[0], hi: w[1] })
        .collect();

    log::debug!(
        "binned {} records on '{}' into {} income bins",
        row_bins.len(),
        measure_col,
        bin_edges.len() - 1
    );
    Ok(BinAssignment::new(bins, row_bins))
}

fn validate_edges(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(TaxcalcError::InvalidInput(format!(
            "at least two bin edges are required, got {}",
            edges.len()
        )));
    }
    if edges.iter().any(|e| e.is_nan()) {
        return Err(TaxcalcError::InvalidInput("bin edges contain NaN".into()));
    }
    if edges.windows(2).any(|w| w[0] >= w[1]) {
        return Err(TaxcalcError::InvalidInput("bin edges must be strictly ascending".into()));
    }
    Ok(())
}
