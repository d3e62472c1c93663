// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Sentra Monitor
//!
//! Monitored items and asynchronous notification delivery:
//!
//! - **MonitoredItem / MonitoringMode**: per-item sampling state
//! - **SubscriptionModel**: item registry plus an unbounded queue drained by
//!   a dedicated task, so value writers never block on delivery
//! - **EventPayload / EventBuilder**: ephemeral event notifications
//! - **PeriodicProducer**: cancellable background tasks with error-isolated
//!   ticks
//!
//! The model is transport-agnostic: each created item hands back a channel
//! receiver, and whatever session layer sits above is free to forward from
//! it.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod event;
pub mod item;
pub mod model;
pub mod producer;

pub use event::{EventBuilder, EventPayload};
pub use item::{
    ItemNotification, MonitoredItemHandle, MonitoredItemId, MonitoredItemRequest, MonitoringMode,
};
pub use model::{SubscriptionModel, SubscriptionStats};
pub use producer::PeriodicProducer;
