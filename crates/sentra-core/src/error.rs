// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for address-space operations.
//!
//! Programming-level failures (bad ids, duplicate registration, invalid
//! values) are reported as [`SpaceError`]; recoverable per-item outcomes at
//! the service boundary are reported as [`StatusCode`] values instead. Every
//! variant maps onto a status code via [`SpaceError::status`] so the boundary
//! can downgrade errors uniformly.

use thiserror::Error;

use crate::nodeid::NodeId;
use crate::status::StatusCode;

/// Errors raised by address-space operations.
#[derive(Debug, Error)]
pub enum SpaceError {
    /// A node id string could not be parsed or is semantically invalid.
    #[error("Invalid node id '{input}': {reason}")]
    InvalidNodeId {
        /// The offending input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A node with the same id is already registered.
    #[error("Node already exists: {node_id}")]
    DuplicateNodeId {
        /// The conflicting node id.
        node_id: NodeId,
    },

    /// No node with the given id is registered.
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// The missing node id.
        node_id: NodeId,
    },

    /// A node exists but has the wrong node class for the operation.
    #[error("Node {node_id} is not a {expected} node")]
    NodeClassMismatch {
        /// The node in question.
        node_id: NodeId,
        /// The node class the operation requires.
        expected: &'static str,
    },

    /// A type definition id does not resolve to a usable type node.
    #[error("Invalid type definition: {node_id}")]
    TypeDefinitionInvalid {
        /// The offending type definition id.
        node_id: NodeId,
    },

    /// A value failed structural validation.
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Why the value was rejected.
        reason: String,
    },

    /// A builder was finalized without a required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A browse path could not be resolved to any target.
    #[error("No match for browse path at '{step}'")]
    NoMatch {
        /// The path step that failed to resolve.
        step: String,
    },
}

impl SpaceError {
    /// Creates an [`SpaceError::InvalidNodeId`].
    pub fn invalid_node_id(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNodeId {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`SpaceError::DuplicateNodeId`].
    pub fn duplicate_node_id(node_id: NodeId) -> Self {
        Self::DuplicateNodeId { node_id }
    }

    /// Creates a [`SpaceError::NodeNotFound`].
    pub fn node_not_found(node_id: NodeId) -> Self {
        Self::NodeNotFound { node_id }
    }

    /// Creates a [`SpaceError::NodeClassMismatch`].
    pub fn node_class_mismatch(node_id: NodeId, expected: &'static str) -> Self {
        Self::NodeClassMismatch { node_id, expected }
    }

    /// Creates a [`SpaceError::TypeDefinitionInvalid`].
    pub fn type_definition_invalid(node_id: NodeId) -> Self {
        Self::TypeDefinitionInvalid { node_id }
    }

    /// Creates an [`SpaceError::InvalidValue`].
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates a [`SpaceError::MissingField`].
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates a [`SpaceError::NoMatch`].
    pub fn no_match(step: impl Into<String>) -> Self {
        Self::NoMatch { step: step.into() }
    }

    /// Maps this error onto the status code reported at the service boundary.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidNodeId { .. } => StatusCode::BAD_NODE_ID_INVALID,
            Self::DuplicateNodeId { .. } => StatusCode::BAD_NODE_ID_EXISTS,
            Self::NodeNotFound { .. } => StatusCode::BAD_NODE_ID_UNKNOWN,
            Self::NodeClassMismatch { .. } => StatusCode::BAD_NODE_ID_INVALID,
            Self::TypeDefinitionInvalid { .. } => StatusCode::BAD_NODE_ID_INVALID,
            Self::InvalidValue { .. } => StatusCode::BAD_TYPE_MISMATCH,
            Self::MissingField { .. } => StatusCode::BAD_INTERNAL_ERROR,
            Self::NoMatch { .. } => StatusCode::BAD_NO_MATCH,
        }
    }
}
