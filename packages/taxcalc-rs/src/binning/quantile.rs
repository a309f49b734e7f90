// src/binning/quantile.rs
//! Weighted quantile bins over cumulative weight (or weighted income).

use crate::records::RecordSet;
use crate::utils::{Result, TaxcalcError};

use super::{BinAssignment, BinLabel};

/// Row names of the detailed decile layout, one per bin.
pub const DECILE_ROW_NAMES: [&str; 14] = [
    "0-10n", "0-10z", "0-10p", "10-20", "20-30", "30-40", "40-50",
    "50-60", "60-70", "70-80", "80-90", "90-95", "95-99", "Top 1%",
];

/// Income magnitude below which the bottom decile treats a value as zero.
const ZERO_INCOME_BAND: f64 = 1e-9;

/// Running sums within this fraction of the total span of a cut point sit
/// on it; absorbs rounding in the accumulated weights.
const CUT_TOLERANCE: f64 = 1e-9;

/// Assign every record to one of `num_quantiles` weighted quantiles of
/// `measure_col`.
///
/// Records are sorted by the measure and the running sum of `weight` (or
/// of `weight * measure` when `weight_by_income_measure` is set) is split
/// into `num_quantiles` equal-width ranges. A record whose running sum lies
/// on a cut point belongs to the lower quantile, as with fixed income bins.
///
/// With `decile_details` the bottom decile is split into negative, zero and
/// positive incomes and the top decile into 90-95, 95-99 and the top 1%,
/// giving 14 bins named by [`DECILE_ROW_NAMES`]. Only valid for deciles.
///
/// # Arguments
/// * `records` - Filer records
/// * `measure_col` - Income column that orders the records
/// * `num_quantiles` - Number of quantiles (10 for deciles)
/// * `decile_details` - Split the bottom and top deciles
/// * `weight_by_income_measure` - Accumulate `weight * measure` instead of `weight`
pub fn add_quantile_table_row_variable(
    records: &RecordSet,
    measure_col: &str,
    num_quantiles: usize,
    decile_details: bool,
    weight_by_income_measure: bool,
) -> Result<BinAssignment> {
    if decile_details && num_quantiles != 10 {
        return Err(TaxcalcError::InvalidInput(format!(
            "decile_details is true when num_quantiles is {}",
            num_quantiles
        )));
    }
    if num_quantiles == 0 {
        return Err(TaxcalcError::InvalidInput("num_quantiles must be positive".into()));
    }

    let measure = records.column(measure_col)?;
    let weights = records.weights();
    let n = measure.len();
    if let Some(row) = measure.iter().position(|v| v.is_nan()) {
        return Err(TaxcalcError::InvalidInput(format!(
            "{} is NaN in row {}",
            measure_col, row
        )));
    }

    // Stable sort keeps tied records in their original order
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| measure[a].total_cmp(&measure[b]));

    let mut cumsum = vec![0.0; n];
    let mut acc = 0.0;
    for &i in &order {
        acc += if weight_by_income_measure { weights[i] * measure[i] } else { weights[i] };
        cumsum[i] = acc;
    }
    let min_cumsum = match order.first() {
        Some(&i) if weight_by_income_measure => cumsum[i],
        _ => 0.0,
    };
    let bin_width = (acc - min_cumsum) / num_quantiles as f64;
    let inner_edges: Vec<f64> = (1..num_quantiles)
        .map(|k| min_cumsum + k as f64 * bin_width)
        .collect();

    log::debug!(
        "quantile cut points on '{}': n={} q={} width={}",
        measure_col, n, num_quantiles, bin_width
    );

    // 0-based quantile of a running sum, right-closed like fixed income bins
    let tol = CUT_TOLERANCE * (acc - min_cumsum).abs();
    let quantile_of = |c: f64| inner_edges.partition_point(|&e| c - e > tol);

    if !decile_details {
        let row_bins = cumsum.iter().map(|&c| quantile_of(c)).collect();
        let bins = (1..=num_quantiles).map(BinLabel::Quantile).collect();
        return Ok(BinAssignment::new(bins, row_bins));
    }

    let top_90_95 = min_cumsum + 9.5 * bin_width;
    let top_95_99 = min_cumsum + 9.9 * bin_width;
    let row_bins = (0..n)
        .map(|i| match quantile_of(cumsum[i]) {
            0 if measure[i] < -ZERO_INCOME_BAND => 0,
            0 if measure[i] <= ZERO_INCOME_BAND => 1,
            0 => 2,
            9 if cumsum[i] <= top_90_95 + tol => 11,
            9 if cumsum[i] <= top_95_99 + tol => 12,
            9 => 13,
            d => d + 2,
        })
        .collect();
    let bins = (1..=DECILE_ROW_NAMES.len()).map(BinLabel::Quantile).collect();
    Ok(BinAssignment::new(bins, row_bins).with_names(&DECILE_ROW_NAMES))
}
