//! Reconciliation engine for NAS dataset management
//!
//! This crate drives create/read/update/delete of datasets against a
//! remote [`DatasetStore`], using the Layer 0 crates for conversion:
//!
//! - **Engine**: [`ReconciliationEngine`] with one store round trip per operation
//! - **Planning**: [`plan`] decides between create, replace, update and no-op
//! - **Drift check**: [`check`] compares desired and reconciled properties
//! - **Configuration**: [`EngineConfig`] timeouts and the TOML [`Manifest`]
//!
//! # Architecture
//!
//! ```text
//!                    nasctl
//!                      |
//!          nas-core  (engine, plan, check)
//!           /      \
//!     nas-props -- nas-path
//! ```
//!
//! Every call is stateless from the engine's point of view: actions derive
//! only from the desired configuration and a freshly fetched record.

pub mod check;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod plan;
pub mod store;

pub use check::{DriftItem, DriftReport, DriftStatus, check};
pub use config::{EngineConfig, Manifest};
pub use engine::{Reconciliation, ReconciliationEngine};
pub use error::{Error, ReadFailure, Result};
pub use plan::{Plan, PlanAction, plan};
pub use store::{DatasetStore, StoreError, StoreResult};
