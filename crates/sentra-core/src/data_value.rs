// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Attribute read results: [`DataValue`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::StatusCode;
use crate::variant::Variant;

/// A value together with its quality and timestamps.
///
/// Every attribute read produces one of these. The source timestamp reflects
/// when the underlying value changed; the server timestamp reflects when this
/// `DataValue` was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataValue {
    /// The value itself; [`Variant::Empty`] for status-only results.
    pub value: Variant,
    /// Quality of the value.
    pub status: StatusCode,
    /// When the underlying value last changed.
    pub source_timestamp: DateTime<Utc>,
    /// When this result was produced.
    pub server_timestamp: DateTime<Utc>,
}

impl DataValue {
    /// Creates a good-quality value with both timestamps set to now.
    pub fn new(value: Variant) -> Self {
        let now = Utc::now();
        Self {
            value,
            status: StatusCode::GOOD,
            source_timestamp: now,
            server_timestamp: now,
        }
    }

    /// Creates a value with an explicit status.
    pub fn with_status(value: Variant, status: StatusCode) -> Self {
        let now = Utc::now();
        Self {
            value,
            status,
            source_timestamp: now,
            server_timestamp: now,
        }
    }

    /// Creates a status-only result carrying no value.
    pub fn status_only(status: StatusCode) -> Self {
        Self::with_status(Variant::Empty, status)
    }

    /// Returns `true` when the status is good.
    #[inline]
    pub fn is_good(&self) -> bool {
        self.status.is_good()
    }

    /// Returns a copy with the server timestamp refreshed.
    pub fn restamped(mut self) -> Self {
        self.server_timestamp = Utc::now();
        self
    }
}

impl From<Variant> for DataValue {
    fn from(value: Variant) -> Self {
        Self::new(value)
    }
}
