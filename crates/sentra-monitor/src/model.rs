// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The subscription model.
//!
//! Value changes and events are enqueued on an unbounded channel and fanned
//! out to monitored items by a dedicated drain task, so the thread posting a
//! change never blocks on delivery. The single drain preserves per-node
//! notification order. An item's monitoring mode is consulted at delivery
//! time, which means disabling an item suppresses even changes that were
//! already queued when the mode changed.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use sentra_core::{AttributeId, DataValue, NodeId, StatusCode};

use crate::event::EventPayload;
use crate::item::{
    ItemNotification, MonitoredItemHandle, MonitoredItemId, MonitoredItemRequest, MonitoringMode,
};

enum Change {
    Data { node_id: NodeId, value: DataValue },
    Event { payload: EventPayload },
}

struct ItemState {
    node_id: NodeId,
    attribute: AttributeId,
    mode: RwLock<MonitoringMode>,
    sampling_interval: RwLock<Duration>,
    sender: mpsc::UnboundedSender<ItemNotification>,
}

#[derive(Default)]
struct Registry {
    items: DashMap<MonitoredItemId, Arc<ItemState>>,
    by_node: DashMap<NodeId, Vec<MonitoredItemId>>,
    delivered: AtomicU64,
    dropped: AtomicU64,
}

impl Registry {
    fn deliver(&self, change: Change) {
        match change {
            Change::Data { node_id, value } => {
                let key = node_id.clone();
                self.fan_out(&key, AttributeId::Value, || ItemNotification::DataChange {
                    node_id: node_id.clone(),
                    value: value.clone(),
                });
            }
            Change::Event { payload } => {
                let key = payload.source_node.clone();
                self.fan_out(&key, AttributeId::EventNotifier, || {
                    ItemNotification::Event(payload.clone())
                });
            }
        }
    }

    fn fan_out<F>(&self, node_id: &NodeId, attribute: AttributeId, make: F)
    where
        F: Fn() -> ItemNotification,
    {
        let Some(item_ids) = self.by_node.get(node_id) else {
            return;
        };
        for item_id in item_ids.iter() {
            let Some(item) = self.items.get(item_id) else {
                continue;
            };
            if item.attribute != attribute {
                continue;
            }
            if *item.mode.read() != MonitoringMode::Reporting {
                continue;
            }
            if item.sender.send(make()).is_ok() {
                self.delivered.fetch_add(1, Ordering::Relaxed);
            } else {
                // Receiver dropped; the item still exists until deleted.
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Delivery counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionStats {
    /// Changes accepted into the queue.
    pub enqueued: u64,
    /// Notifications handed to item receivers.
    pub delivered: u64,
    /// Notifications discarded because the receiver was gone.
    pub dropped: u64,
}

/// Registry of monitored items plus the delivery pipeline.
///
/// Must be created inside a tokio runtime; dropping the model stops the
/// drain task.
pub struct SubscriptionModel {
    registry: Arc<Registry>,
    queue: mpsc::UnboundedSender<Change>,
    enqueued: AtomicU64,
    next_id: AtomicU32,
    drain: JoinHandle<()>,
}

impl SubscriptionModel {
    /// Creates the model and spawns its drain task.
    pub fn new() -> Self {
        let (queue, mut rx) = mpsc::unbounded_channel::<Change>();
        let registry = Arc::new(Registry::default());
        let drain_registry = registry.clone();
        let drain = tokio::spawn(async move {
            while let Some(change) = rx.recv().await {
                drain_registry.deliver(change);
            }
        });
        Self {
            registry,
            queue,
            enqueued: AtomicU64::new(0),
            next_id: AtomicU32::new(0),
            drain,
        }
    }

    /// Creates one monitored item and returns its handle.
    pub fn create_item(&self, request: MonitoredItemRequest) -> MonitoredItemHandle {
        let id = MonitoredItemId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let (sender, notifications) = mpsc::unbounded_channel();
        let state = Arc::new(ItemState {
            node_id: request.node_id.clone(),
            attribute: request.attribute,
            mode: RwLock::new(request.mode),
            sampling_interval: RwLock::new(request.sampling_interval),
            sender,
        });
        self.registry.items.insert(id, state);
        self.registry
            .by_node
            .entry(request.node_id.clone())
            .or_default()
            .push(id);
        tracing::debug!(
            item_id = %id,
            node_id = %request.node_id,
            attribute = %request.attribute,
            mode = %request.mode,
            "monitored item created"
        );
        MonitoredItemHandle { id, notifications }
    }

    /// Creates a batch of monitored items.
    pub fn on_data_items_created(
        &self,
        requests: Vec<MonitoredItemRequest>,
    ) -> Vec<MonitoredItemHandle> {
        requests.into_iter().map(|r| self.create_item(r)).collect()
    }

    /// Updates sampling intervals; unknown ids report
    /// `BadMonitoredItemIdInvalid`.
    pub fn on_data_items_modified(
        &self,
        changes: &[(MonitoredItemId, Duration)],
    ) -> Vec<StatusCode> {
        changes
            .iter()
            .map(|(id, interval)| match self.registry.items.get(id) {
                Some(item) => {
                    *item.sampling_interval.write() = *interval;
                    StatusCode::GOOD
                }
                None => StatusCode::BAD_MONITORED_ITEM_ID_INVALID,
            })
            .collect()
    }

    /// Changes monitoring modes; the new mode takes effect for every
    /// notification not yet delivered.
    pub fn on_monitoring_mode_changed(
        &self,
        changes: &[(MonitoredItemId, MonitoringMode)],
    ) -> Vec<StatusCode> {
        changes
            .iter()
            .map(|(id, mode)| match self.registry.items.get(id) {
                Some(item) => {
                    *item.mode.write() = *mode;
                    tracing::debug!(item_id = %id, mode = %mode, "monitoring mode changed");
                    StatusCode::GOOD
                }
                None => StatusCode::BAD_MONITORED_ITEM_ID_INVALID,
            })
            .collect()
    }

    /// Deletes monitored items. Idempotent: deleting an unknown or
    /// already-deleted id succeeds.
    pub fn on_data_items_deleted(&self, ids: &[MonitoredItemId]) -> Vec<StatusCode> {
        ids.iter()
            .map(|id| {
                if let Some((_, item)) = self.registry.items.remove(id) {
                    if let Some(mut list) = self.registry.by_node.get_mut(&item.node_id) {
                        list.retain(|other| other != id);
                    }
                    tracing::debug!(item_id = %id, "monitored item deleted");
                }
                StatusCode::GOOD
            })
            .collect()
    }

    /// Enqueues a value change. Never blocks.
    pub fn notify_value_change(&self, node_id: NodeId, value: DataValue) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
        let _ = self.queue.send(Change::Data { node_id, value });
    }

    /// Enqueues an event. Never blocks.
    pub fn notify_event(&self, payload: EventPayload) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
        let _ = self.queue.send(Change::Event { payload });
    }

    /// Returns the sampling interval of a live item, or `None` for unknown
    /// or deleted ids.
    pub fn sampling_interval(&self, id: MonitoredItemId) -> Option<Duration> {
        self.registry
            .items
            .get(&id)
            .map(|item| *item.sampling_interval.read())
    }

    /// Returns the number of live monitored items.
    pub fn monitored_count(&self) -> usize {
        self.registry.items.len()
    }

    /// Returns delivery counters.
    pub fn stats(&self) -> SubscriptionStats {
        SubscriptionStats {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            delivered: self.registry.delivered.load(Ordering::Relaxed),
            dropped: self.registry.dropped.load(Ordering::Relaxed),
        }
    }
}

impl Default for SubscriptionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SubscriptionModel {
    fn drop(&mut self) {
        self.drain.abort();
    }
}
