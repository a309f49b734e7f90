// src/aggregation/weighted.rs
//! Weighted counts and sums over one group of records.
//!
//! Each function walks the rows of a [`Group`] and fails on the first
//! NaN, infinite or negative weight instead of skipping the row.

use super::partition::Group;
use crate::utils::{checked_weight, Result};

/// Values within this distance of zero count as neither a cut nor an increase.
pub const COUNT_TOLERANCE: f64 = 0.001;

/// Weighted count of rows where `col` is below zero.
pub fn weighted_count_lt_zero(group: &Group<'_>, col: &str) -> Result<f64> {
    weighted_count_lt_zero_with_tolerance(group, col, COUNT_TOLERANCE)
}

pub fn weighted_count_lt_zero_with_tolerance(group: &Group<'_>, col: &str, tolerance: f64) -> Result<f64> {
    weighted_count_where(group, col, |v| v < -tolerance)
}

/// Weighted count of rows where `col` is above zero.
pub fn weighted_count_gt_zero(group: &Group<'_>, col: &str) -> Result<f64> {
    weighted_count_gt_zero_with_tolerance(group, col, COUNT_TOLERANCE)
}

pub fn weighted_count_gt_zero_with_tolerance(group: &Group<'_>, col: &str, tolerance: f64) -> Result<f64> {
    weighted_count_where(group, col, |v| v > tolerance)
}

/// Sum of weights of the rows whose `col` value satisfies `pred`.
pub fn weighted_count_where<P>(group: &Group<'_>, col: &str, pred: P) -> Result<f64>
where
    P: Fn(f64) -> bool,
{
    let values = group.column(col)?;
    let weights = group.weights();
    let mut total = 0.0;
    for &i in group.rows() {
        let w = checked_weight(i, weights[i])?;
        if pred(values[i]) {
            total += w;
        }
    }
    Ok(total)
}

/// Sum of weights in the group.
pub fn weighted_count(group: &Group<'_>) -> Result<f64> {
    let weights = group.weights();
    group
        .rows()
        .iter()
        .try_fold(0.0, |acc, &i| -> Result<f64> { Ok(acc + checked_weight(i, weights[i])?) })
}

/// Sum of `weight * col` over the group.
pub fn weighted_sum(group: &Group<'_>, col: &str) -> Result<f64> {
    let values = group.column(col)?;
    let weights = group.weights();
    group
        .rows()
        .iter()
        .try_fold(0.0, |acc, &i| -> Result<f64> { Ok(acc + checked_weight(i, weights[i])? * values[i]) })
}

/// Plain sum of `col` over the group.
pub fn unweighted_sum(group: &Group<'_>, col: &str) -> Result<f64> {
    let values = group.column(col)?;
    Ok(group.rows().iter().map(|&i| values[i]).sum())
}
