// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed directed edges between nodes.

use serde::{Deserialize, Serialize};

use sentra_core::{ExpandedNodeId, NodeId};

/// A reference from one node to another.
///
/// Each logical edge is stored as two halves, one on each endpoint: the
/// forward half on the source and the inverse half on the target. The target
/// is an [`ExpandedNodeId`] so references may legally point at nodes outside
/// the local address space; such edges only get their forward half.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Node that owns this half of the edge.
    pub source_id: NodeId,
    /// NodeId of the reference type node describing the relationship.
    pub reference_type_id: NodeId,
    /// The other endpoint.
    pub target_id: ExpandedNodeId,
    /// `true` for the source-to-target direction.
    pub is_forward: bool,
}

impl Reference {
    /// Creates the forward half of an edge between two local nodes.
    pub fn forward(source_id: NodeId, reference_type_id: NodeId, target_id: NodeId) -> Self {
        Self {
            source_id,
            reference_type_id,
            target_id: target_id.into(),
            is_forward: true,
        }
    }

    /// Creates a forward half pointing at an external target.
    pub fn forward_external(
        source_id: NodeId,
        reference_type_id: NodeId,
        target_id: ExpandedNodeId,
    ) -> Self {
        Self {
            source_id,
            reference_type_id,
            target_id,
            is_forward: true,
        }
    }

    /// Creates the matching inverse half, owned by the target.
    ///
    /// Only defined for local targets; the inverse of an edge into another
    /// server is not ours to store.
    pub fn inverse(&self) -> Option<Self> {
        let target = self.target_id.as_local()?;
        Some(Self {
            source_id: target.clone(),
            reference_type_id: self.reference_type_id.clone(),
            target_id: self.source_id.clone().into(),
            is_forward: !self.is_forward,
        })
    }

    /// Returns the target as a local [`NodeId`] when it is not external.
    pub fn local_target(&self) -> Option<&NodeId> {
        self.target_id.as_local()
    }
}
