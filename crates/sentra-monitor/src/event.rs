// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Event notifications.
//!
//! Events are ephemeral: a payload is built, published through the
//! subscription model, and discarded. It is never registered in the node
//! graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sentra_core::{LocalizedText, NodeId, SpaceError};

/// One event notification, mirroring the base event fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Unique id of this event occurrence.
    pub event_id: Uuid,
    /// NodeId of the event type.
    pub event_type: NodeId,
    /// Node the event originates from.
    pub source_node: NodeId,
    /// Display name of the source.
    pub source_name: String,
    /// When the event occurred.
    pub time: DateTime<Utc>,
    /// Human-readable message.
    pub message: LocalizedText,
    /// Severity from 1 (lowest) to 1000 (highest).
    pub severity: u16,
}

impl EventPayload {
    /// Starts building an event.
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }
}

/// Builder for [`EventPayload`].
#[derive(Default)]
pub struct EventBuilder {
    event_type: Option<NodeId>,
    source_node: Option<NodeId>,
    source_name: Option<String>,
    time: Option<DateTime<Utc>>,
    message: Option<LocalizedText>,
    severity: u16,
}

impl EventBuilder {
    /// Sets the event type (required).
    pub fn event_type(mut self, event_type: NodeId) -> Self {
        self.event_type = Some(event_type);
        self
    }

    /// Sets the source node (required).
    pub fn source_node(mut self, source_node: NodeId) -> Self {
        self.source_node = Some(source_node);
        self
    }

    /// Sets the source display name; defaults to the source node id.
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Sets the event time; defaults to now.
    pub fn time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Sets the message.
    pub fn message(mut self, message: impl Into<LocalizedText>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the severity.
    pub fn severity(mut self, severity: u16) -> Self {
        self.severity = severity;
        self
    }

    /// Builds the payload with a fresh event id.
    pub fn build(self) -> Result<EventPayload, SpaceError> {
        let event_type = self
            .event_type
            .ok_or(SpaceError::missing_field("event_type"))?;
        let source_node = self
            .source_node
            .ok_or(SpaceError::missing_field("source_node"))?;
        let source_name = self
            .source_name
            .unwrap_or_else(|| source_node.to_canonical_string());
        Ok(EventPayload {
            event_id: Uuid::new_v4(),
            event_type,
            source_node,
            source_name,
            time: self.time.unwrap_or_else(Utc::now),
            message: self.message.unwrap_or_else(|| LocalizedText::plain("")),
            severity: self.severity,
        })
    }
}
