// src/lib.rs
//! Post-processing utilities for tax microsimulation output.
//!
//! Filer records ([`RecordSet`]) are grouped into income bins or weighted
//! quantiles ([`BinScheme`]) and summarised as distribution or
//! difference [`Table`]s. The crate also estimates bootstrap standard
//! errors of weighted statistics and compares text output with numeric
//! tolerance.

pub mod aggregation;
pub mod binning;
pub mod compare;
pub mod data;
pub mod estimation;
pub mod records;
pub mod response;
pub mod tables;
pub mod utils;

pub use aggregation::{
    weighted_count, weighted_count_gt_zero, weighted_count_lt_zero, weighted_sum, Group, Partition,
};
pub use binning::{add_income_table_row_variable, add_quantile_table_row_variable, BinAssignment, BinLabel, BinScheme};
pub use compare::{nonsmall_diffs, DEFAULT_SMALL};
pub use data::{read_packaged_csv, read_packaged_json, RecordVariables};
pub use estimation::{bootstrap_se_ci, bootstrap_se_ci_with_rng, BootstrapResult, Mt19937};
pub use records::{RecordSet, WEIGHT};
pub use response::quantity_response;
pub use tables::{create_difference_table, create_distribution_table, Table, TableFormat};
pub use utils::{Result, TaxcalcError};
