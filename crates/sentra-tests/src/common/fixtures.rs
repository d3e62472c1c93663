// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Pre-built test data.

use sentra_core::ids::DataTypeId;
use sentra_core::variant::value_rank;
use sentra_core::{AccessLevel, NodeId, QualifiedName, Variant};
use sentra_server::{bootstrap, Server, ServerConfig};
use sentra_space::{NodeManager, ObjectNodeBuilder, VariableNodeBuilder};

/// Namespace index used by all test fixtures.
pub const TEST_NAMESPACE: u16 = 2;

/// Creates an empty manager in the test namespace.
pub fn test_manager() -> NodeManager {
    NodeManager::new(TEST_NAMESPACE, "urn:sentra:test")
}

/// Boots a server with the base graph and default configuration.
///
/// Must be called inside a tokio runtime.
pub fn test_server() -> Server {
    bootstrap(&ServerConfig::default()).expect("base graph population failed")
}

/// Adds a scalar Double variable and returns its id.
pub fn add_double_variable(
    manager: &NodeManager,
    path: &str,
    value: f64,
    access_level: AccessLevel,
) -> NodeId {
    let node_id = manager.new_node_id(path);
    let name = path.rsplit('/').next().unwrap_or(path);
    manager
        .add_node(
            VariableNodeBuilder::new()
                .node_id(node_id.clone())
                .browse_name(QualifiedName::new(TEST_NAMESPACE, name))
                .data_type(DataTypeId::DOUBLE)
                .value_rank(value_rank::SCALAR)
                .access_level(access_level)
                .value(Variant::Double(value))
                .build()
                .expect("fixture variable"),
        )
        .expect("fixture variable registration");
    node_id
}

/// Adds an object node and returns its id.
pub fn add_object(manager: &NodeManager, path: &str) -> NodeId {
    let node_id = manager.new_node_id(path);
    let name = path.rsplit('/').next().unwrap_or(path);
    manager
        .add_node(
            ObjectNodeBuilder::new()
                .node_id(node_id.clone())
                .browse_name(QualifiedName::new(TEST_NAMESPACE, name))
                .build()
                .expect("fixture object"),
        )
        .expect("fixture object registration");
    node_id
}
