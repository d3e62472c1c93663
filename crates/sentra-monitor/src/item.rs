// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Monitored item types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use sentra_core::{AttributeId, DataValue, NodeId};

use crate::event::EventPayload;

/// Server-assigned identifier for one monitored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonitoredItemId(u32);

impl MonitoredItemId {
    /// Creates an id from its raw value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MonitoredItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monitoring mode of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitoringMode {
    /// Nothing is sampled or reported.
    Disabled,
    /// Values are sampled but not reported.
    Sampling,
    /// Values are sampled and reported.
    Reporting,
}

impl fmt::Display for MonitoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Parameters for creating one monitored item.
#[derive(Debug, Clone)]
pub struct MonitoredItemRequest {
    /// Node to monitor.
    pub node_id: NodeId,
    /// Attribute to monitor; Value for data changes, EventNotifier for
    /// events.
    pub attribute: AttributeId,
    /// Requested sampling interval.
    pub sampling_interval: Duration,
    /// Initial monitoring mode.
    pub mode: MonitoringMode,
}

impl MonitoredItemRequest {
    /// Monitors a node's Value attribute, reporting, at 250 ms.
    pub fn value_of(node_id: NodeId) -> Self {
        Self {
            node_id,
            attribute: AttributeId::Value,
            sampling_interval: Duration::from_millis(250),
            mode: MonitoringMode::Reporting,
        }
    }

    /// Monitors a node's EventNotifier attribute, reporting.
    pub fn events_of(node_id: NodeId) -> Self {
        Self {
            attribute: AttributeId::EventNotifier,
            ..Self::value_of(node_id)
        }
    }

    /// Overrides the initial mode.
    pub fn with_mode(mut self, mode: MonitoringMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the sampling interval.
    pub fn with_sampling_interval(mut self, interval: Duration) -> Self {
        self.sampling_interval = interval;
        self
    }
}

/// One notification delivered to a monitored item's receiver.
#[derive(Debug, Clone)]
pub enum ItemNotification {
    /// A monitored value changed.
    DataChange {
        /// The node whose value changed.
        node_id: NodeId,
        /// The new value.
        value: DataValue,
    },
    /// An event was posted against the monitored node.
    Event(EventPayload),
}

/// Handle returned for each created monitored item.
///
/// Dropping the receiver does not delete the item; it only discards future
/// notifications.
pub struct MonitoredItemHandle {
    /// The server-assigned item id.
    pub id: MonitoredItemId,
    /// Receiver for this item's notifications.
    pub notifications: mpsc::UnboundedReceiver<ItemNotification>,
}
