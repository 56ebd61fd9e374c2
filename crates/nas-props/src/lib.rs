//! Dataset property translation for NAS dataset management
//!
//! Every managed property has a representation in the desired configuration
//! (case-insensitive tokens, plain integers) and another on the wire
//! (uppercase tokens, `value`/`rawvalue` pairs, null wrappers). This crate
//! converts between the two:
//!
//! - **Registry**: [`PROPERTIES`] declares one [`PropertyRule`] per property;
//!   adding a property is a table entry, not new control flow
//! - **Wire model**: [`WireRecord`], [`WireProperty`] and the three-state
//!   [`Tristate`] slot used to read every property uniformly
//! - **Translation**: [`to_wire_create_request`] and [`from_wire_record`]
//!
//! # Example
//!
//! ```
//! use nas_props::{DesiredConfiguration, Property, to_wire_create_request};
//!
//! let desired = DesiredConfiguration::new("tank", "", "data")
//!     .with(Property::Compression, "lz4");
//! let request = to_wire_create_request(&desired).unwrap();
//!
//! assert_eq!(request.name, "tank/data");
//! assert_eq!(request.get("compression").unwrap(), "LZ4");
//! ```

pub mod config;
pub mod error;
pub mod property;
pub mod registry;
pub mod translate;
pub mod wire;

pub use config::{DesiredConfiguration, ReconciledConfiguration};
pub use error::{Error, Result};
pub use property::{FieldValue, Property};
pub use registry::{PROPERTIES, PropertyRule, ReadRule, WriteRule};
pub use translate::{
    expected_value, from_wire_property, from_wire_record, to_wire_create_request, to_wire_value,
    validate_desired,
};
pub use wire::{DatasetType, Tristate, WireCreateRequest, WireProperty, WireRecord};
