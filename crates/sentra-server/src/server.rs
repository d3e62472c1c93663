// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The service boundary.
//!
//! [`Server`] exposes the address space as plain calls: attribute reads and
//! writes, method calls, browsing, browse-path translation, and the
//! monitored-item services. Background producers feed the same pipeline
//! through [`Server::post_value`] and [`Server::post_event`], so delegate
//! chains and access policies are never bypassed.

use std::sync::Arc;

use sentra_core::ids::{ObjectId, ReferenceTypeId, TypeDefinitionId};
use sentra_core::{AttributeId, DataValue, NodeId, StatusCode, Variant};
use sentra_monitor::{
    EventPayload, MonitoredItemHandle, MonitoredItemId, MonitoredItemRequest, MonitoringMode,
    PeriodicProducer, SubscriptionModel,
};
use sentra_space::{
    invoke_method, read_stored_value, write_stored_value, AttributeContext, CallResult,
    NodeKind, NodeManager, ReferenceDescription, RelativePathElement,
};

use crate::config::ProducerConfig;

/// The address-space server.
pub struct Server {
    manager: Arc<NodeManager>,
    subscriptions: Arc<SubscriptionModel>,
}

impl Server {
    /// Creates a server over an existing node manager.
    ///
    /// Must be called inside a tokio runtime; the subscription model spawns
    /// its drain task immediately.
    pub fn new(manager: Arc<NodeManager>) -> Self {
        Self {
            manager,
            subscriptions: Arc::new(SubscriptionModel::new()),
        }
    }

    /// Returns the node manager.
    pub fn manager(&self) -> &Arc<NodeManager> {
        &self.manager
    }

    /// Returns the subscription model.
    pub fn subscriptions(&self) -> &Arc<SubscriptionModel> {
        &self.subscriptions
    }

    // =========================================================================
    // Attribute services
    // =========================================================================

    /// Reads one attribute of one node.
    ///
    /// Never panics and never returns an error: failures come back as a
    /// status-only [`DataValue`].
    pub fn read(
        &self,
        ctx: &AttributeContext,
        node_id: &NodeId,
        attribute: AttributeId,
    ) -> DataValue {
        let Some(node) = self.manager.get_node(node_id) else {
            return DataValue::status_only(StatusCode::BAD_NODE_ID_UNKNOWN);
        };

        match attribute {
            AttributeId::NodeId => DataValue::new(Variant::NodeId(node.node_id().clone())),
            AttributeId::NodeClass => DataValue::new(Variant::Int32(node.node_class() as i32)),
            AttributeId::BrowseName => {
                DataValue::new(Variant::QualifiedName(node.browse_name().clone()))
            }
            AttributeId::DisplayName => {
                DataValue::new(Variant::LocalizedText(node.display_name().clone()))
            }
            AttributeId::Description => match node.description() {
                Some(text) => DataValue::new(Variant::LocalizedText(text.clone())),
                None => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::WriteMask | AttributeId::UserWriteMask => {
                DataValue::new(Variant::UInt32(0))
            }
            AttributeId::EventNotifier => match node.event_notifier() {
                Some(bits) => DataValue::new(Variant::Byte(bits)),
                None => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::Value => self.read_value(ctx, &node),
            AttributeId::DataType => match node.variable() {
                Some(var) => DataValue::new(Variant::NodeId(var.data_type().clone())),
                None => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::ValueRank => match node.variable() {
                Some(var) => DataValue::new(Variant::Int32(var.value_rank())),
                None => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::ArrayDimensions => match node.variable().and_then(|v| {
                v.array_dimensions().map(|dims| {
                    Variant::array(
                        sentra_core::BuiltinType::UInt32,
                        dims.iter().map(|d| Variant::UInt32(*d)).collect(),
                    )
                })
            }) {
                Some(Ok(value)) => DataValue::new(value),
                _ => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::AccessLevel => match node.variable() {
                Some(var) => DataValue::new(Variant::Byte(var.access_level().bits())),
                None => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::UserAccessLevel => match node.variable() {
                Some(var) => {
                    let resolved = match var.delegate() {
                        Some(chain) => chain.user_access_level(ctx, &node),
                        None => Ok(var.user_access_level()),
                    };
                    match resolved {
                        Ok(level) => DataValue::new(Variant::Byte(level.bits())),
                        Err(status) => DataValue::status_only(status),
                    }
                }
                None => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::MinimumSamplingInterval => match node.variable() {
                Some(_) => DataValue::new(Variant::Double(0.0)),
                None => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::Historizing => match node.variable() {
                Some(_) => DataValue::new(Variant::Boolean(false)),
                None => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::IsAbstract => match node.kind() {
                NodeKind::ObjectType { is_abstract }
                | NodeKind::DataType { is_abstract }
                | NodeKind::VariableType { is_abstract, .. } => {
                    DataValue::new(Variant::Boolean(*is_abstract))
                }
                _ => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::Symmetric => match node.kind() {
                NodeKind::ReferenceType { symmetric, .. } => {
                    DataValue::new(Variant::Boolean(*symmetric))
                }
                _ => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::InverseName => match node.kind() {
                NodeKind::ReferenceType {
                    inverse_name: Some(name),
                    ..
                } => DataValue::new(Variant::LocalizedText(name.clone())),
                _ => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::ContainsNoLoops => match node.kind() {
                NodeKind::View { contains_no_loops } => {
                    DataValue::new(Variant::Boolean(*contains_no_loops))
                }
                _ => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
            AttributeId::Executable | AttributeId::UserExecutable => match node.method() {
                Some(method) => DataValue::new(Variant::Boolean(method.is_executable())),
                None => DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
            },
        }
    }

    fn read_value(&self, ctx: &AttributeContext, node: &sentra_space::Node) -> DataValue {
        let Some(var) = node.variable() else {
            return DataValue::status_only(StatusCode::BAD_ATTRIBUTE_ID_INVALID);
        };
        if !var.access_level().can_read() {
            return DataValue::status_only(StatusCode::BAD_NOT_READABLE);
        }
        let result = match var.delegate() {
            Some(chain) => chain.get_value(ctx, node),
            None => read_stored_value(node),
        };
        match result {
            Ok(value) => value,
            Err(status) => DataValue::status_only(status),
        }
    }

    /// Writes one attribute of one node.
    ///
    /// Only the Value attribute is writable through this boundary. A
    /// successful write feeds the subscription pipeline.
    pub fn write(
        &self,
        ctx: &AttributeContext,
        node_id: &NodeId,
        attribute: AttributeId,
        value: Variant,
    ) -> StatusCode {
        let Some(node) = self.manager.get_node(node_id) else {
            return StatusCode::BAD_NODE_ID_UNKNOWN;
        };
        if attribute != AttributeId::Value {
            return StatusCode::BAD_NOT_WRITABLE;
        }
        let Some(var) = node.variable() else {
            return StatusCode::BAD_NOT_WRITABLE;
        };
        if !var.access_level().can_write() {
            return StatusCode::BAD_NOT_WRITABLE;
        }

        let incoming = DataValue::new(value);
        let result = match var.delegate() {
            Some(chain) => chain.set_value(ctx, &node, incoming),
            None => write_stored_value(&node, incoming),
        };
        match result {
            Ok(()) => {
                self.subscriptions
                    .notify_value_change(node_id.clone(), var.stored_value());
                StatusCode::GOOD
            }
            Err(status) => {
                tracing::debug!(node_id = %node_id, status = %status, "write rejected");
                status
            }
        }
    }

    // =========================================================================
    // Method service
    // =========================================================================

    /// Calls a method in the context of its owning object.
    pub fn call(
        &self,
        ctx: &AttributeContext,
        object_id: &NodeId,
        method_id: &NodeId,
        inputs: &[Variant],
    ) -> CallResult {
        let Some(object) = self.manager.get_node(object_id) else {
            return CallResult::bad(StatusCode::BAD_NODE_ID_UNKNOWN);
        };
        let Some(method) = self.manager.get_node(method_id) else {
            return CallResult::bad(StatusCode::BAD_NODE_ID_UNKNOWN);
        };
        // The method must be a component of the target object.
        let owned = object.references().iter().any(|r| {
            r.is_forward
                && r.reference_type_id == ReferenceTypeId::HAS_COMPONENT
                && r.local_target() == Some(method_id)
        });
        if !owned {
            return CallResult::bad(StatusCode::BAD_METHOD_INVALID);
        }
        invoke_method(ctx, &method, inputs)
    }

    // =========================================================================
    // View services
    // =========================================================================

    /// Lists the references of a node.
    pub fn browse(&self, node_id: &NodeId) -> Result<Vec<ReferenceDescription>, StatusCode> {
        self.manager.browse(node_id).map_err(|e| e.status())
    }

    /// Resolves a relative browse path.
    pub fn translate_browse_path(
        &self,
        start: &NodeId,
        path: &[RelativePathElement],
    ) -> Result<Vec<NodeId>, StatusCode> {
        self.manager
            .translate_browse_path(start, path)
            .map_err(|e| e.status())
    }

    // =========================================================================
    // Monitored-item services
    // =========================================================================

    /// Creates monitored items, validating each request against the address
    /// space.
    pub fn create_monitored_items(
        &self,
        requests: Vec<MonitoredItemRequest>,
    ) -> Vec<Result<MonitoredItemHandle, StatusCode>> {
        requests
            .into_iter()
            .map(|request| {
                if !self.manager.contains(&request.node_id) {
                    return Err(StatusCode::BAD_NODE_ID_UNKNOWN);
                }
                match request.attribute {
                    AttributeId::Value | AttributeId::EventNotifier => {}
                    _ => return Err(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
                }
                Ok(self.subscriptions.create_item(request))
            })
            .collect()
    }

    /// Updates sampling intervals of existing items.
    pub fn modify_monitored_items(
        &self,
        changes: &[(MonitoredItemId, std::time::Duration)],
    ) -> Vec<StatusCode> {
        self.subscriptions.on_data_items_modified(changes)
    }

    /// Changes monitoring modes of existing items.
    pub fn set_monitoring_mode(
        &self,
        changes: &[(MonitoredItemId, MonitoringMode)],
    ) -> Vec<StatusCode> {
        self.subscriptions.on_monitoring_mode_changed(changes)
    }

    /// Deletes monitored items; idempotent.
    pub fn delete_monitored_items(&self, ids: &[MonitoredItemId]) -> Vec<StatusCode> {
        self.subscriptions.on_data_items_deleted(ids)
    }

    // =========================================================================
    // Publish interface
    // =========================================================================

    /// Posts a new value from a background producer.
    ///
    /// Runs the exact same path as a client write under the anonymous
    /// context, so delegate chains and access policies apply.
    pub fn post_value(&self, node_id: &NodeId, value: Variant) -> StatusCode {
        self.write(
            &AttributeContext::anonymous(),
            node_id,
            AttributeId::Value,
            value,
        )
    }

    /// Posts an event into the subscription pipeline.
    pub fn post_event(&self, payload: EventPayload) {
        tracing::debug!(
            event_type = %payload.event_type,
            source = %payload.source_node,
            severity = payload.severity,
            "event posted"
        );
        self.subscriptions.notify_event(payload);
    }

    /// Starts the configured periodic event producer.
    ///
    /// Emits a base event from the Server object on every tick. Returns
    /// `None` when the producer is disabled.
    pub fn start_event_producer(&self, config: &ProducerConfig) -> Option<PeriodicProducer> {
        if !config.enabled {
            return None;
        }
        let subscriptions = Arc::clone(&self.subscriptions);
        let severity = config.event_severity;
        Some(PeriodicProducer::spawn(
            "event-producer",
            config.interval,
            move || {
                let payload = EventPayload::builder()
                    .event_type(TypeDefinitionId::BASE_EVENT_TYPE)
                    .source_node(ObjectId::SERVER)
                    .message("event message!")
                    .severity(severity)
                    .build()
                    .map_err(|e| e.status())?;
                subscriptions.notify_event(payload);
                Ok(())
            },
        ))
    }
}
