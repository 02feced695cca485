//! # ot-report
//!
//! Flat tabular output for OraTune: the per-iteration trajectory table and
//! the cross-scenario evaluation table, one row per record. Both tables
//! carry one column per search-space dimension so rows are self-contained.

mod sink;

pub use sink::{write_aggregate_csv, write_trajectory_csv};
