// src/estimation/mod.rs
pub mod bootstrap;
pub mod mt19937;

pub use bootstrap::{bootstrap_se_ci, bootstrap_se_ci_with_rng, BootstrapResult};
pub use mt19937::Mt19937;
