// src/tables/difference.rs
//! Difference table: how a reform changes a tax column, bin by bin.

use std::ops::Add;

use ndarray::Array2;

use super::catalog::{diff_table_specs, DiffStat, AFTERTAX_MEASURE, DIFF_TABLE_COLUMNS, INCOME_MEASURE};
use super::distribution::warn_empty_bins;
use super::table::{Table, ALL_ROW};
use crate::aggregation::{weighted_count, weighted_count_gt_zero, weighted_count_lt_zero, weighted_sum, Group};
use crate::binning::BinScheme;
use crate::records::RecordSet;
use crate::utils::{all_close, Result, TaxcalcError};

const TAX_DIFF: &str = "tax_diff";
const ATINC1: &str = "atinc1";
const ATINC2: &str = "atinc2";

/// Additive per-bin sums; the derived columns are computed from these.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DiffSums {
    count: f64,
    tax_cut: f64,
    tax_inc: f64,
    tot_change: f64,
    atinc1: f64,
    atinc2: f64,
}

impl Add for DiffSums {
    type Output = DiffSums;

    fn add(self, o: DiffSums) -> DiffSums {
        DiffSums {
            count: self.count + o.count,
            tax_cut: self.tax_cut + o.tax_cut,
            tax_inc: self.tax_inc + o.tax_inc,
            tot_change: self.tot_change + o.tot_change,
            atinc1: self.atinc1 + o.atinc1,
            atinc2: self.atinc2 + o.atinc2,
        }
    }
}

impl DiffSums {
    fn of_group(g: &Group<'_>) -> Result<Self> {
        Ok(DiffSums {
            count: weighted_count(g)?,
            tax_cut: weighted_count_lt_zero(g, TAX_DIFF)?,
            tax_inc: weighted_count_gt_zero(g, TAX_DIFF)?,
            tot_change: weighted_sum(g, TAX_DIFF)?,
            atinc1: weighted_sum(g, ATINC1)?,
            atinc2: weighted_sum(g, ATINC2)?,
        })
    }

    fn per_unit(&self, x: f64, scale: f64) -> f64 {
        if self.count > 0.0 {
            scale * x / self.count
        } else {
            0.0
        }
    }

    fn stat(&self, stat: DiffStat, grand_change: f64) -> f64 {
        match stat {
            DiffStat::Count => self.count,
            DiffStat::TaxCut => self.tax_cut,
            DiffStat::PercCut => self.per_unit(self.tax_cut, 100.0),
            DiffStat::TaxInc => self.tax_inc,
            DiffStat::PercInc => self.per_unit(self.tax_inc, 100.0),
            DiffStat::Mean => self.per_unit(self.tot_change, 1.0),
            DiffStat::TotChange => self.tot_change,
            DiffStat::ShareOfChange => {
                if grand_change != 0.0 {
                    100.0 * self.tot_change / grand_change
                } else {
                    0.0
                }
            }
            DiffStat::PcAftertaxinc => {
                if self.atinc1 == 0.0 {
                    f64::NAN
                } else {
                    100.0 * (self.atinc2 / self.atinc1 - 1.0)
                }
            }
        }
    }
}

/// Build the table of differences in `compared_col` between a baseline
/// and a reform calculation of the same filers.
///
/// Records are binned on the baseline `expanded_income`. The tax change of
/// a record is `reform[compared_col] - baseline[compared_col]`; changes
/// within `COUNT_TOLERANCE` of zero count as neither a cut nor an increase.
///
/// # Arguments
/// * `baseline` - Baseline records
/// * `reform` - Reform records, row-aligned with `baseline`
/// * `bin_scheme` - Row grouping
/// * `compared_col` - Tax column to compare, e.g. `iitax` or `combined`
pub fn create_difference_table(
    baseline: &RecordSet,
    reform: &RecordSet,
    bin_scheme: &BinScheme,
    compared_col: &str,
) -> Result<Table> {
    if baseline.len() != reform.len() {
        return Err(TaxcalcError::DimensionMismatch { expected: baseline.len(), got: reform.len() });
    }
    if !all_close(baseline.weights(), reform.weights(), 1e-9) {
        log::warn!("baseline and reform weights differ; using baseline weights");
    }

    let tax_diff = &reform.column(compared_col)? - &baseline.column(compared_col)?;
    let work = baseline
        .select(&[INCOME_MEASURE])?
        .with_column(TAX_DIFF, tax_diff)?
        .with_column(ATINC1, baseline.column(AFTERTAX_MEASURE)?.to_owned())?
        .with_column(ATINC2, reform.column(AFTERTAX_MEASURE)?.to_owned())?;

    let assignment = bin_scheme.assign(&work, INCOME_MEASURE)?;
    let partition = assignment.partition()?;
    warn_empty_bins(&partition, assignment.names());

    let sums: Vec<DiffSums> = partition
        .apply(&work, DiffSums::of_group)?
        .into_iter()
        .map(|(_, s)| s)
        .collect();
    let total = sums.iter().fold(DiffSums::default(), |acc, s| acc + *s);

    let n_bins = assignment.n_bins();
    let mut values = Array2::zeros((n_bins + 1, DIFF_TABLE_COLUMNS.len()));
    for (i, s) in sums.iter().chain(std::iter::once(&total)).enumerate() {
        for (j, col) in DIFF_TABLE_COLUMNS.iter().enumerate() {
            values[[i, j]] = s.stat(col.stat, total.tot_change);
        }
    }

    let mut index = assignment.names().to_vec();
    index.push(ALL_ROW.to_string());
    log::debug!(
        "difference table on '{}': {} rows, total change {}",
        compared_col,
        index.len(),
        total.tot_change
    );
    Table::new(index, diff_table_specs(), values)
}
