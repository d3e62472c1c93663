// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The standard attribute enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one attribute of a node.
///
/// Which attributes a node carries depends on its node class; reading an
/// attribute a class does not define yields `BadAttributeIdInvalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum AttributeId {
    /// The node's identifier.
    NodeId = 1,
    /// The node's class.
    NodeClass = 2,
    /// The qualified browse name.
    BrowseName = 3,
    /// The display name.
    DisplayName = 4,
    /// The optional description.
    Description = 5,
    /// Server write mask.
    WriteMask = 6,
    /// Per-user write mask.
    UserWriteMask = 7,
    /// Whether a type node is abstract.
    IsAbstract = 8,
    /// Whether a reference type is symmetric.
    Symmetric = 9,
    /// Inverse name of a reference type.
    InverseName = 10,
    /// Whether a view contains no loops.
    ContainsNoLoops = 11,
    /// Event notifier bits of an object or view.
    EventNotifier = 12,
    /// The current value of a variable.
    Value = 13,
    /// Declared data type of a variable.
    DataType = 14,
    /// Declared value rank of a variable.
    ValueRank = 15,
    /// Declared array dimensions of a variable.
    ArrayDimensions = 16,
    /// Static access level of a variable.
    AccessLevel = 17,
    /// Effective per-user access level of a variable.
    UserAccessLevel = 18,
    /// Minimum sampling interval supported by a variable.
    MinimumSamplingInterval = 19,
    /// Whether the variable's history is collected.
    Historizing = 20,
    /// Whether a method may be called.
    Executable = 21,
    /// Whether the current user may call a method.
    UserExecutable = 22,
}

impl AttributeId {
    /// Returns the numeric attribute id.
    #[inline]
    pub const fn value(&self) -> u32 {
        *self as u32
    }

    /// Looks up an attribute id from its numeric value.
    pub const fn from_value(value: u32) -> Option<Self> {
        let id = match value {
            1 => AttributeId::NodeId,
            2 => AttributeId::NodeClass,
            3 => AttributeId::BrowseName,
            4 => AttributeId::DisplayName,
            5 => AttributeId::Description,
            6 => AttributeId::WriteMask,
            7 => AttributeId::UserWriteMask,
            8 => AttributeId::IsAbstract,
            9 => AttributeId::Symmetric,
            10 => AttributeId::InverseName,
            11 => AttributeId::ContainsNoLoops,
            12 => AttributeId::EventNotifier,
            13 => AttributeId::Value,
            14 => AttributeId::DataType,
            15 => AttributeId::ValueRank,
            16 => AttributeId::ArrayDimensions,
            17 => AttributeId::AccessLevel,
            18 => AttributeId::UserAccessLevel,
            19 => AttributeId::MinimumSamplingInterval,
            20 => AttributeId::Historizing,
            21 => AttributeId::Executable,
            22 => AttributeId::UserExecutable,
            _ => return None,
        };
        Some(id)
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
