// src/tables/catalog.rs
//! Column catalogs of the distribution and difference tables.
//!
//! Each entry pairs the column name with its display label, so the two
//! can never drift apart in length or order.

use serde::Serialize;

/// Income measure difference tables are binned on (baseline values).
pub const INCOME_MEASURE: &str = "expanded_income";

/// After-tax income used for the percent-change column.
pub const AFTERTAX_MEASURE: &str = "aftertax_income";

/// How a column's values are scaled and read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueKind {
    /// Weighted number of filing units.
    Count,
    /// Weighted money amount.
    Currency,
    /// Percentage, never rescaled.
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ValueKind,
}

/// Per-bin statistic behind a distribution-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistStat {
    /// Sum of weights.
    Returns,
    /// Sum of `weight * variable`.
    WeightedSum(&'static str),
    /// Sum of weights of filers with a positive value of the variable.
    FilersWithPositive(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct DistColumn {
    pub spec: ColumnSpec,
    pub stat: DistStat,
}

/// Per-bin statistic behind a difference-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStat {
    Count,
    TaxCut,
    PercCut,
    TaxInc,
    PercInc,
    Mean,
    TotChange,
    ShareOfChange,
    PcAftertaxinc,
}

#[derive(Debug, Clone, Copy)]
pub struct DiffColumn {
    pub spec: ColumnSpec,
    pub stat: DiffStat,
}

const fn dist(name: &'static str, label: &'static str, kind: ValueKind, stat: DistStat) -> DistColumn {
    DistColumn { spec: ColumnSpec { name, label, kind }, stat }
}

const fn diff(name: &'static str, label: &'static str, kind: ValueKind, stat: DiffStat) -> DiffColumn {
    DiffColumn { spec: ColumnSpec { name, label, kind }, stat }
}

use DistStat::{FilersWithPositive, Returns, WeightedSum};
use ValueKind::{Count, Currency, Percent};

pub const DIST_TABLE_COLUMNS: [DistColumn; 21] = [
    dist("weight", "Returns", Count, Returns),
    dist("c00100", "AGI", Currency, WeightedSum("c00100")),
    dist("num_returns_StandardDed", "Standard Deduction Filers", Count, FilersWithPositive("standard")),
    dist("standard", "Standard Deduction", Currency, WeightedSum("standard")),
    dist("num_returns_ItemDed", "Itemizers", Count, FilersWithPositive("c04470")),
    dist("c04470", "Itemized Deduction", Currency, WeightedSum("c04470")),
    dist("c04600", "Personal Exemption", Currency, WeightedSum("c04600")),
    dist("c04800", "Taxable Income", Currency, WeightedSum("c04800")),
    dist("taxbc", "Regular Tax", Currency, WeightedSum("taxbc")),
    dist("c62100", "AMTI", Currency, WeightedSum("c62100")),
    dist("num_returns_AMT", "AMT Filers", Count, FilersWithPositive("c09600")),
    dist("c09600", "AMT", Currency, WeightedSum("c09600")),
    dist("c05800", "Tax before Credits", Currency, WeightedSum("c05800")),
    dist("c07100", "Non-refundable Credits", Currency, WeightedSum("c07100")),
    dist("othertaxes", "Other Taxes", Currency, WeightedSum("othertaxes")),
    dist("refund", "Refundable Credits", Currency, WeightedSum("refund")),
    dist("iitax", "Individual Income Tax Liabilities", Currency, WeightedSum("iitax")),
    dist("payrolltax", "Payroll Tax Liabilities", Currency, WeightedSum("payrolltax")),
    dist("combined", "Combined Payroll and Individual Income Tax Liabilities", Currency, WeightedSum("combined")),
    dist("expanded_income", "Expanded Income", Currency, WeightedSum("expanded_income")),
    dist("aftertax_income", "After-Tax Expanded Income", Currency, WeightedSum("aftertax_income")),
];

/// Record variables a distribution table reads.
pub const DIST_VARIABLES: [&str; 18] = [
    "weight", "c00100", "standard", "c04470", "c04600", "c04800", "taxbc",
    "c62100", "c09600", "c05800", "c07100", "othertaxes", "refund", "iitax",
    "payrolltax", "combined", "expanded_income", "aftertax_income",
];

pub const DIFF_TABLE_COLUMNS: [DiffColumn; 9] = [
    diff("count", "All Tax Units", Count, DiffStat::Count),
    diff("tax_cut", "Tax Units with Tax Cut", Count, DiffStat::TaxCut),
    diff("perc_cut", "Percent with Tax Cut", Percent, DiffStat::PercCut),
    diff("tax_inc", "Tax Units with Tax Increase", Count, DiffStat::TaxInc),
    diff("perc_inc", "Percent with Tax Increase", Percent, DiffStat::PercInc),
    diff("mean", "Average Tax Change", Currency, DiffStat::Mean),
    diff("tot_change", "Total Tax Difference", Currency, DiffStat::TotChange),
    diff("share_of_change", "Share of Overall Change", Percent, DiffStat::ShareOfChange),
    diff("pc_aftertaxinc", "% Change in After-Tax Income", Percent, DiffStat::PcAftertaxinc),
];

/// Record variables a difference table reads from each scenario.
pub const DIFF_VARIABLES: [&str; 7] = [
    "expanded_income", "c00100", "aftertax_income", "iitax", "payrolltax", "combined", "weight",
];

pub fn dist_table_specs() -> Vec<ColumnSpec> {
    DIST_TABLE_COLUMNS.iter().map(|c| c.spec).collect()
}

pub fn diff_table_specs() -> Vec<ColumnSpec> {
    DIFF_TABLE_COLUMNS.iter().map(|c| c.spec).collect()
}
