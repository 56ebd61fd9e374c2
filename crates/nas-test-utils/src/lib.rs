//! Shared test utilities for the nas-datasets workspace.
//!
//! Standard fixtures for wire records, stores and on-disk manifests. It is
//! a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`record`]: [`RecordBuilder`](record::RecordBuilder) for remote records
//! - [`store`]: [`RecordingStore`](store::RecordingStore) call counting and failure injection
//! - [`workspace`]: [`TestWorkspace`](workspace::TestWorkspace) temp dir with manifest and state file

pub mod record;
pub mod store;
pub mod workspace;
