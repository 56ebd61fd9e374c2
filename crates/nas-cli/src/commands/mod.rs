//! Command implementations for nas-cli

pub mod apply;
pub mod check;
pub mod dataset;
pub mod plan;

pub use apply::run_apply;
pub use check::run_check;
pub use dataset::{run_destroy, run_show};
pub use plan::run_plan;
