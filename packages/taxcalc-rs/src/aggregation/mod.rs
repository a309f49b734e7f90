// src/aggregation/mod.rs

pub mod partition;
pub mod weighted;

pub use partition::{Group, Partition};
pub use weighted::{
    COUNT_TOLERANCE,
    weighted_count_lt_zero, weighted_count_lt_zero_with_tolerance,
    weighted_count_gt_zero, weighted_count_gt_zero_with_tolerance,
    weighted_count_where, weighted_count, weighted_sum, unweighted_sum,
};
