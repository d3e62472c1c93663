// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Sentra Space
//!
//! The in-memory address space: a typed graph of nodes plus the machinery
//! that mediates attribute access on it.
//!
//! - **Node / NodeKind**: one node struct with a tagged union over the eight
//!   node classes
//! - **Reference**: typed directed edges with automatic inverse maintenance
//! - **NodeManager**: per-namespace node table with browse and browse-path
//!   resolution
//! - **AttributeDelegate / DelegateChain**: chain-of-responsibility over
//!   value reads and writes
//! - **AccessPolicy / RestrictedAccessDelegate**: per-identity access
//!   narrowing
//! - **MethodInvocationHandler / invoke_method**: validated method dispatch
//! - **NodeFactory**: recursive instantiation of object types
//!
//! # Examples
//!
//! ```
//! use sentra_core::{NodeId, QualifiedName, Variant};
//! use sentra_space::{NodeManager, VariableNodeBuilder};
//!
//! let manager = NodeManager::new(2, "urn:sentra:demo");
//! let node = VariableNodeBuilder::new()
//!     .node_id(manager.new_node_id("Plant/Temperature"))
//!     .browse_name(QualifiedName::new(2, "Temperature"))
//!     .value(Variant::Double(21.5))
//!     .build()
//!     .unwrap();
//! manager.add_node(node).unwrap();
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod access;
pub mod delegate;
pub mod factory;
pub mod manager;
pub mod method;
pub mod node;
pub mod reference;

pub use access::{AccessPolicy, RestrictedAccessDelegate};
pub use delegate::{
    read_stored_value, write_stored_value, AttributeContext, AttributeDelegate,
    ComputedValueDelegate, DelegateChain, Next, ValueLoggingDelegate,
};
pub use factory::NodeFactory;
pub use manager::{NodeManager, ReferenceDescription, RelativePathElement};
pub use method::{invoke_method, Argument, CallResult, MethodInvocationHandler};
pub use node::{
    MethodAttributes, MethodNodeBuilder, Node, NodeClass, NodeKind, ObjectNodeBuilder,
    ObjectTypeNodeBuilder, VariableAttributes, VariableNodeBuilder,
};
pub use reference::Reference;
