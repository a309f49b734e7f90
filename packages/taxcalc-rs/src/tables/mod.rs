// src/tables/mod.rs
//! Distribution and difference tables over binned filer records.

pub mod catalog;
pub mod difference;
pub mod distribution;
pub mod format;
pub mod table;

pub use catalog::{
    ColumnSpec, ValueKind, AFTERTAX_MEASURE, DIFF_TABLE_COLUMNS, DIFF_VARIABLES, DIST_TABLE_COLUMNS,
    DIST_VARIABLES, INCOME_MEASURE,
};
pub use difference::create_difference_table;
pub use distribution::create_distribution_table;
pub use format::TableFormat;
pub use table::{Table, ALL_ROW};
