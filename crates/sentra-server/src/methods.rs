// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Shipped method handlers.

use std::sync::Arc;

use sentra_core::ids::{DataTypeId, ReferenceTypeId, TypeDefinitionId};
use sentra_core::{NodeId, QualifiedName, SpaceError, StatusCode, Variant};
use sentra_monitor::{EventPayload, SubscriptionModel};
use sentra_space::{
    Argument, AttributeContext, MethodInvocationHandler, MethodNodeBuilder, NodeManager,
};

// =============================================================================
// SqrtMethod
// =============================================================================

/// `sqrt(x)`: one Double in, one Double out.
///
/// Negative input is a domain failure reported as `BadOutOfRange`.
pub struct SqrtMethod;

impl SqrtMethod {
    /// Declared input signature.
    pub fn input_arguments() -> Vec<Argument> {
        vec![Argument::scalar("x", DataTypeId::DOUBLE).with_description("A value.")]
    }

    /// Declared output signature.
    pub fn output_arguments() -> Vec<Argument> {
        vec![Argument::scalar("x_sqrt", DataTypeId::DOUBLE).with_description("The square root of x.")]
    }

    /// Registers a `sqrt(x)` method node as a component of `parent_id`.
    pub fn register(manager: &NodeManager, parent_id: &NodeId) -> Result<NodeId, SpaceError> {
        let node_id = manager.new_node_id("Methods/sqrt(x)");
        manager.add_node(
            MethodNodeBuilder::new()
                .node_id(node_id.clone())
                .browse_name(QualifiedName::new(manager.namespace_index(), "sqrt(x)"))
                .description("Returns the correctly rounded positive square root of x.")
                .input_arguments(Self::input_arguments())
                .output_arguments(Self::output_arguments())
                .handler(Arc::new(SqrtMethod))
                .build()?,
        )?;
        manager.add_reference(parent_id, ReferenceTypeId::HAS_COMPONENT, &node_id)?;
        Ok(node_id)
    }
}

impl MethodInvocationHandler for SqrtMethod {
    fn invoke(
        &self,
        _ctx: &AttributeContext,
        inputs: &[Variant],
    ) -> Result<Vec<Variant>, StatusCode> {
        let x = inputs[0].as_double().ok_or(StatusCode::BAD_TYPE_MISMATCH)?;
        if x < 0.0 {
            return Err(StatusCode::BAD_OUT_OF_RANGE);
        }
        Ok(vec![Variant::Double(x.sqrt())])
    }
}

// =============================================================================
// GenerateEventMethod
// =============================================================================

/// `generateEvent(eventTypeId)`: posts one event of the given type.
pub struct GenerateEventMethod {
    subscriptions: Arc<SubscriptionModel>,
    source_node: NodeId,
    severity: u16,
}

impl GenerateEventMethod {
    /// Creates the handler posting events from `source_node`.
    pub fn new(subscriptions: Arc<SubscriptionModel>, source_node: NodeId, severity: u16) -> Self {
        Self {
            subscriptions,
            source_node,
            severity,
        }
    }

    /// Declared input signature.
    pub fn input_arguments() -> Vec<Argument> {
        vec![Argument::scalar("eventTypeId", DataTypeId::NODE_ID)
            .with_description("NodeId of the event type to generate.")]
    }

    /// Registers a `generateEvent` method node as a component of `parent_id`.
    pub fn register(
        manager: &NodeManager,
        parent_id: &NodeId,
        handler: GenerateEventMethod,
    ) -> Result<NodeId, SpaceError> {
        let node_id = manager.new_node_id("Methods/generateEvent(eventTypeId)");
        manager.add_node(
            MethodNodeBuilder::new()
                .node_id(node_id.clone())
                .browse_name(QualifiedName::new(
                    manager.namespace_index(),
                    "generateEvent(eventTypeId)",
                ))
                .description("Generate an event of the type identified by eventTypeId.")
                .input_arguments(Self::input_arguments())
                .handler(Arc::new(handler))
                .build()?,
        )?;
        manager.add_reference(parent_id, ReferenceTypeId::HAS_COMPONENT, &node_id)?;
        Ok(node_id)
    }
}

impl MethodInvocationHandler for GenerateEventMethod {
    fn invoke(
        &self,
        _ctx: &AttributeContext,
        inputs: &[Variant],
    ) -> Result<Vec<Variant>, StatusCode> {
        let requested = inputs[0].as_node_id().ok_or(StatusCode::BAD_TYPE_MISMATCH)?;
        let event_type = if requested.is_null() {
            default_event_type()
        } else {
            requested.clone()
        };
        let payload = EventPayload::builder()
            .event_type(event_type)
            .source_node(self.source_node.clone())
            .message("event message!")
            .severity(self.severity)
            .build()
            .map_err(|e| e.status())?;
        self.subscriptions.notify_event(payload);
        Ok(Vec::new())
    }
}

/// Event type used when a caller passes the null NodeId.
pub fn default_event_type() -> NodeId {
    TypeDefinitionId::BASE_EVENT_TYPE
}
