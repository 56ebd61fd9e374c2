//! Configuration for the reconciliation engine
//!
//! - **EngineConfig**: per-operation timeouts
//! - **Manifest**: TOML file declaring the desired datasets

mod engine;
mod manifest;

pub use engine::EngineConfig;
pub use manifest::Manifest;
