//! Emulated dataset stores
//!
//! Two [`DatasetStore`](nas_core::DatasetStore) implementations that behave
//! like the appliance's dataset API closely enough to drive the engine
//! without one:
//!
//! - [`MemoryStore`]: in-process table, for tests and embedding
//! - [`SnapshotStore`]: the same table persisted as JSON, used by `nasctl`
//!
//! Both synthesize full records on create (mount point, defaults inherited
//! from the enclosing dataset, dual value/rawvalue pairs), refuse
//! duplicates and orphans, and refuse to destroy datasets with children.

mod datasets;
mod memory;
mod record;
mod snapshot;

pub use datasets::Datasets;
pub use memory::MemoryStore;
pub use snapshot::SnapshotStore;
