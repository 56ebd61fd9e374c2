//! Dataset identity codec for NAS dataset management
//!
//! A dataset is addressed by a `/`-delimited path of the form
//! `pool[/parent-segment/...]/name`. This crate decomposes that string into
//! a [`DatasetIdentity`] and composes it back, losslessly in both directions.

pub mod error;
pub mod identity;

pub use error::{Error, Result};
pub use identity::{DatasetIdentity, SEPARATOR, decode, encode};
