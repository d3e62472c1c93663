// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Namespace startup.
//!
//! Builds the base graph every address space starts from: the Root folder,
//! its Objects/Types/Views children, and the Server object with events
//! enabled. Startup is fail-fast: any population error aborts construction
//! rather than leaving a half-built graph behind.

use std::sync::Arc;

use sentra_core::ids::{ObjectId, ReferenceTypeId, TypeDefinitionId};
use sentra_core::{QualifiedName, SpaceError};
use sentra_space::{NodeManager, ObjectNodeBuilder, ObjectTypeNodeBuilder};

use crate::config::ServerConfig;
use crate::server::Server;

/// Builds the base graph and wraps it in a [`Server`].
///
/// Must be called inside a tokio runtime.
pub fn bootstrap(config: &ServerConfig) -> Result<Server, SpaceError> {
    let manager = Arc::new(NodeManager::new(
        config.namespace_index,
        config.namespace_uri.clone(),
    ));
    populate_base_graph(&manager)?;
    tracing::info!(
        namespace_index = config.namespace_index,
        namespace_uri = %config.namespace_uri,
        nodes = manager.len(),
        "address space ready"
    );
    Ok(Server::new(manager))
}

/// Registers the standard folders and the Server object.
pub fn populate_base_graph(manager: &NodeManager) -> Result<(), SpaceError> {
    manager.add_node(
        ObjectNodeBuilder::new()
            .node_id(ObjectId::ROOT_FOLDER)
            .browse_name(QualifiedName::standard("Root"))
            .build()?,
    )?;

    for (node_id, name) in [
        (ObjectId::OBJECTS_FOLDER, "Objects"),
        (ObjectId::TYPES_FOLDER, "Types"),
        (ObjectId::VIEWS_FOLDER, "Views"),
    ] {
        manager.add_node(
            ObjectNodeBuilder::new()
                .node_id(node_id.clone())
                .browse_name(QualifiedName::standard(name))
                .build()?,
        )?;
        manager.add_reference(&ObjectId::ROOT_FOLDER, ReferenceTypeId::ORGANIZES, &node_id)?;
    }

    // Standard type definitions instances point back to.
    for (node_id, name) in [
        (TypeDefinitionId::BASE_OBJECT_TYPE, "BaseObjectType"),
        (TypeDefinitionId::FOLDER_TYPE, "FolderType"),
        (TypeDefinitionId::BASE_EVENT_TYPE, "BaseEventType"),
    ] {
        manager.add_node(
            ObjectTypeNodeBuilder::new()
                .node_id(node_id.clone())
                .browse_name(QualifiedName::standard(name))
                .build()?,
        )?;
        manager.add_reference(
            &ObjectId::TYPES_FOLDER,
            ReferenceTypeId::ORGANIZES,
            &node_id,
        )?;
    }

    // Modelling rule objects used by the node factory.
    for (node_id, name) in [
        (ObjectId::MODELLING_RULE_MANDATORY, "Mandatory"),
        (ObjectId::MODELLING_RULE_OPTIONAL, "Optional"),
    ] {
        manager.add_node(
            ObjectNodeBuilder::new()
                .node_id(node_id.clone())
                .browse_name(QualifiedName::standard(name))
                .build()?,
        )?;
    }

    // Server object: event notifier on, so event subscribers have a source.
    manager.add_node(
        ObjectNodeBuilder::new()
            .node_id(ObjectId::SERVER)
            .browse_name(QualifiedName::standard("Server"))
            .event_notifier(0x01)
            .build()?,
    )?;
    manager.add_reference(
        &ObjectId::OBJECTS_FOLDER,
        ReferenceTypeId::ORGANIZES,
        &ObjectId::SERVER,
    )?;

    Ok(())
}
