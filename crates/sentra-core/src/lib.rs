// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Sentra Core
//!
//! Identity and value primitives shared by every Sentra crate:
//!
//! - **NodeId / ExpandedNodeId**: node identity with all four identifier kinds
//! - **QualifiedName / LocalizedText**: naming value types
//! - **Variant / DataValue**: runtime values with type metadata and timestamps
//! - **StatusCode**: OPC UA-style status word with named constants
//! - **AccessLevel / AttributeId**: access bitmask and attribute enumeration
//! - **Well-known ids**: standard reference types, objects, and data types
//!
//! # Examples
//!
//! ```
//! use sentra_core::{NodeId, Variant, DataValue};
//!
//! let node_id: NodeId = "ns=2;s=Plant.Temperature".parse().unwrap();
//! let value = DataValue::new(Variant::Double(21.5));
//! assert!(value.status.is_good());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod access;
pub mod attribute;
pub mod data_value;
pub mod error;
pub mod ids;
pub mod nodeid;
pub mod qualified_name;
pub mod status;
pub mod variant;

pub use access::AccessLevel;
pub use attribute::AttributeId;
pub use data_value::DataValue;
pub use error::SpaceError;
pub use nodeid::{ExpandedNodeId, NodeId, NodeIdentifier};
pub use qualified_name::{LocalizedText, QualifiedName};
pub use status::StatusCode;
pub use variant::{ArrayValue, BuiltinType, Variant};
