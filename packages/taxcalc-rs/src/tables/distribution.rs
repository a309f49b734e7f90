// src/tables/distribution.rs
//! Distribution table: weighted totals of tax-calculation results per bin.

use ndarray::{Array1, Array2};
use rayon::prelude::*;

use super::catalog::{dist_table_specs, DistStat, DIST_TABLE_COLUMNS, DIST_VARIABLES};
use super::table::{Table, ALL_ROW};
use crate::aggregation::{weighted_count, weighted_count_where, weighted_sum, Group, Partition};
use crate::binning::BinScheme;
use crate::records::RecordSet;
use crate::utils::{Result, TaxcalcError};

/// Build the distribution table of `records` binned on `income_measure`.
///
/// # Arguments
/// * `records` - Calculated filer records holding every `DIST_VARIABLES` column
/// * `bin_scheme` - Weighted deciles, fixed income bins or custom quantiles
/// * `income_measure` - Column used to assign bins
///
/// # Returns
/// One row per bin in ascending order followed by the `ALL` row, whose
/// values are the column sums over the bins.
pub fn create_distribution_table(
    records: &RecordSet,
    bin_scheme: &BinScheme,
    income_measure: &str,
) -> Result<Table> {
    if let Some(missing) = DIST_VARIABLES.iter().find(|v| !records.has_column(v)) {
        return Err(TaxcalcError::MissingColumn(missing.to_string()));
    }

    let assignment = bin_scheme.assign(records, income_measure)?;
    let partition = assignment.partition()?;
    warn_empty_bins(&partition, assignment.names());

    // Each catalog column is independent
    let per_bin: Vec<Array1<f64>> = DIST_TABLE_COLUMNS[..]
        .par_iter()
        .map(|col| bin_values(records, &partition, col.stat))
        .collect::<Result<Vec<_>>>()?;

    let n_bins = assignment.n_bins();
    let mut values = Array2::zeros((n_bins + 1, DIST_TABLE_COLUMNS.len()));
    for (j, col) in per_bin.iter().enumerate() {
        let mut out = values.column_mut(j);
        for (i, &v) in col.iter().enumerate() {
            out[i] = v;
        }
        out[n_bins] = col.sum();
    }

    let mut index = assignment.names().to_vec();
    index.push(ALL_ROW.to_string());
    log::debug!("distribution table: {} rows x {} columns", index.len(), DIST_TABLE_COLUMNS.len());
    Table::new(index, dist_table_specs(), values)
}

fn bin_values(records: &RecordSet, partition: &Partition<usize>, stat: DistStat) -> Result<Array1<f64>> {
    let pairs = partition.apply(records, |g| dist_stat(g, stat))?;
    Ok(pairs.into_iter().map(|(_, v)| v).collect())
}

fn dist_stat(group: &Group<'_>, stat: DistStat) -> Result<f64> {
    match stat {
        DistStat::Returns => weighted_count(group),
        DistStat::WeightedSum(col) => weighted_sum(group, col),
        DistStat::FilersWithPositive(col) => weighted_count_where(group, col, |v| v > 0.0),
    }
}

pub(crate) fn warn_empty_bins(partition: &Partition<usize>, names: &[String]) {
    for (g, name) in names.iter().enumerate().take(partition.n_groups()) {
        if partition.rows(g).is_empty() {
            log::warn!("table row '{}' has no records", name);
        }
    }
}
