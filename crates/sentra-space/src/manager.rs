// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The per-namespace node table.
//!
//! [`NodeManager`] owns every node of one namespace behind a single
//! readers-writer lock, so lookups and traversals run concurrently while
//! registration and removal are exclusive. Reference edges are kept
//! symmetric: adding an edge to a local target inserts the inverse half on
//! the target in the same critical section, and traversals never observe a
//! half-linked pair.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use sentra_core::{
    ExpandedNodeId, LocalizedText, NodeId, QualifiedName, SpaceError,
};

use crate::node::{Node, NodeClass};
use crate::reference::Reference;

/// One entry in a browse result.
#[derive(Debug, Clone)]
pub struct ReferenceDescription {
    /// The reference type of the edge.
    pub reference_type_id: NodeId,
    /// Direction of the half the browsed node owns.
    pub is_forward: bool,
    /// The other endpoint.
    pub target_id: ExpandedNodeId,
    /// Target browse name; `None` for external or missing targets.
    pub browse_name: Option<QualifiedName>,
    /// Target display name; `None` for external or missing targets.
    pub display_name: Option<LocalizedText>,
    /// Target node class; `None` for external or missing targets.
    pub node_class: Option<NodeClass>,
}

/// One step of a relative browse path.
#[derive(Debug, Clone)]
pub struct RelativePathElement {
    /// Reference type the step must follow.
    pub reference_type_id: NodeId,
    /// Browse name the target must carry.
    pub target_name: QualifiedName,
}

impl RelativePathElement {
    /// Creates a path step.
    pub fn new(reference_type_id: NodeId, target_name: QualifiedName) -> Self {
        Self {
            reference_type_id,
            target_name,
        }
    }
}

/// Owns and indexes the nodes of one namespace.
pub struct NodeManager {
    namespace_index: u16,
    namespace_uri: String,
    nodes: RwLock<HashMap<NodeId, Arc<Node>>>,
}

impl NodeManager {
    /// Creates an empty manager for a namespace.
    pub fn new(namespace_index: u16, namespace_uri: impl Into<String>) -> Self {
        Self {
            namespace_index,
            namespace_uri: namespace_uri.into(),
            nodes: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the namespace index this manager owns.
    pub fn namespace_index(&self) -> u16 {
        self.namespace_index
    }

    /// Returns the namespace URI.
    pub fn namespace_uri(&self) -> &str {
        &self.namespace_uri
    }

    /// Mints a string node id in this manager's namespace.
    pub fn new_node_id(&self, path: impl Into<String>) -> NodeId {
        NodeId::string(self.namespace_index, path)
    }

    /// Registers a node.
    ///
    /// Fails with [`SpaceError::DuplicateNodeId`] when the id is taken; the
    /// existing node is left untouched.
    pub fn add_node(&self, node: Node) -> Result<Arc<Node>, SpaceError> {
        let mut nodes = self.nodes.write();
        let node_id = node.node_id().clone();
        if nodes.contains_key(&node_id) {
            return Err(SpaceError::duplicate_node_id(node_id));
        }
        let node = Arc::new(node);
        nodes.insert(node_id.clone(), node.clone());
        tracing::debug!(
            node_id = %node_id,
            node_class = %node.node_class(),
            "node registered"
        );
        Ok(node)
    }

    /// Looks up a node by id.
    pub fn get_node(&self, node_id: &NodeId) -> Option<Arc<Node>> {
        self.nodes.read().get(node_id).cloned()
    }

    /// Returns `true` when the id is registered.
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.nodes.read().contains_key(node_id)
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Returns `true` when no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    /// Returns a snapshot of every registered id.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.read().keys().cloned().collect()
    }

    /// Unregisters a node and detaches its reference edges.
    ///
    /// Every edge listed on the removed node has its other half dropped from
    /// the peer; references to the removed id held privately elsewhere are
    /// the caller's responsibility.
    pub fn remove_node(&self, node_id: &NodeId) -> Result<Arc<Node>, SpaceError> {
        let mut nodes = self.nodes.write();
        let removed = nodes
            .remove(node_id)
            .ok_or_else(|| SpaceError::node_not_found(node_id.clone()))?;
        for reference in removed.references() {
            if let Some(target) = reference.local_target() {
                if let Some(peer) = nodes.get(target) {
                    peer.remove_references_to(node_id);
                }
            }
        }
        tracing::debug!(node_id = %node_id, "node removed");
        Ok(removed)
    }

    /// Adds an edge between two local nodes, inserting both halves.
    pub fn add_reference(
        &self,
        source_id: &NodeId,
        reference_type_id: NodeId,
        target_id: &NodeId,
    ) -> Result<(), SpaceError> {
        let nodes = self.nodes.read();
        let source = nodes
            .get(source_id)
            .ok_or_else(|| SpaceError::node_not_found(source_id.clone()))?;
        let forward =
            Reference::forward(source_id.clone(), reference_type_id, target_id.clone());
        // Inverse half goes on local targets only.
        if let Some(target) = nodes.get(target_id) {
            if let Some(inverse) = forward.inverse() {
                target.insert_reference(inverse);
            }
        }
        source.insert_reference(forward);
        Ok(())
    }

    /// Adds a forward-only edge to a target outside this address space.
    pub fn add_external_reference(
        &self,
        source_id: &NodeId,
        reference_type_id: NodeId,
        target_id: ExpandedNodeId,
    ) -> Result<(), SpaceError> {
        let nodes = self.nodes.read();
        let source = nodes
            .get(source_id)
            .ok_or_else(|| SpaceError::node_not_found(source_id.clone()))?;
        source.insert_reference(Reference::forward_external(
            source_id.clone(),
            reference_type_id,
            target_id,
        ));
        Ok(())
    }

    /// Lists the references of a node, resolving local target details.
    pub fn browse(&self, node_id: &NodeId) -> Result<Vec<ReferenceDescription>, SpaceError> {
        let nodes = self.nodes.read();
        let node = nodes
            .get(node_id)
            .ok_or_else(|| SpaceError::node_not_found(node_id.clone()))?;

        let descriptions = node
            .references()
            .into_iter()
            .map(|reference| {
                let target = reference.local_target().and_then(|id| nodes.get(id));
                ReferenceDescription {
                    reference_type_id: reference.reference_type_id.clone(),
                    is_forward: reference.is_forward,
                    browse_name: target.map(|t| t.browse_name().clone()),
                    display_name: target.map(|t| t.display_name().clone()),
                    node_class: target.map(|t| t.node_class()),
                    target_id: reference.target_id,
                }
            })
            .collect();
        Ok(descriptions)
    }

    /// Resolves a relative browse path from a starting node.
    ///
    /// Each step follows forward references of the given type to targets with
    /// the given browse name. A step that matches nothing fails the whole
    /// resolution with [`SpaceError::NoMatch`].
    pub fn translate_browse_path(
        &self,
        start: &NodeId,
        path: &[RelativePathElement],
    ) -> Result<Vec<NodeId>, SpaceError> {
        let nodes = self.nodes.read();
        if !nodes.contains_key(start) {
            return Err(SpaceError::node_not_found(start.clone()));
        }

        let mut current = vec![start.clone()];
        for element in path {
            let mut next = Vec::new();
            for node_id in &current {
                let Some(node) = nodes.get(node_id) else {
                    continue;
                };
                for reference in node.references() {
                    if !reference.is_forward
                        || reference.reference_type_id != element.reference_type_id
                    {
                        continue;
                    }
                    let Some(target_id) = reference.local_target() else {
                        continue;
                    };
                    let Some(target) = nodes.get(target_id) else {
                        continue;
                    };
                    if target.browse_name() == &element.target_name
                        && !next.contains(target_id)
                    {
                        next.push(target_id.clone());
                    }
                }
            }
            if next.is_empty() {
                return Err(SpaceError::no_match(element.target_name.to_string()));
            }
            current = next;
        }
        Ok(current)
    }
}
