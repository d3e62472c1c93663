// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Node identity types.
//!
//! A [`NodeId`] uniquely identifies a node within one server address space.
//! It pairs a namespace index with one of four identifier kinds: numeric,
//! string, GUID, or opaque bytes. [`ExpandedNodeId`] additionally carries an
//! optional namespace URI so references may point at nodes the local address
//! space does not own.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SpaceError;

// =============================================================================
// NodeId
// =============================================================================

/// Node identifier.
///
/// Immutable value type with full equality and hashing, usable as a map key.
/// The canonical string form is `ns=<namespace>;{i|s|g|b}=<identifier>`, with
/// the `ns=` prefix omitted for the standard namespace.
///
/// # Examples
///
/// ```
/// use sentra_core::NodeId;
///
/// let numeric = NodeId::numeric(2, 1001);
/// let string = NodeId::string(2, "Plant.Temperature");
/// let parsed: NodeId = "ns=2;s=Plant.Temperature".parse().unwrap();
/// assert_eq!(string, parsed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Namespace index (0 = standard namespace).
    pub namespace_index: u16,

    /// The node identifier.
    pub identifier: NodeIdentifier,
}

impl NodeId {
    /// Creates a numeric node ID.
    #[inline]
    pub const fn numeric(namespace_index: u16, value: u32) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Numeric(value),
        }
    }

    /// Creates a string node ID.
    #[inline]
    pub fn string(namespace_index: u16, value: impl Into<String>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::String(value.into()),
        }
    }

    /// Creates a GUID node ID.
    #[inline]
    pub const fn guid(namespace_index: u16, value: Uuid) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Guid(value),
        }
    }

    /// Creates a GUID node ID with a random UUID.
    pub fn random_guid(namespace_index: u16) -> Self {
        Self::guid(namespace_index, Uuid::new_v4())
    }

    /// Creates an opaque (byte string) node ID.
    #[inline]
    pub fn opaque(namespace_index: u16, value: impl Into<Vec<u8>>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Opaque(value.into()),
        }
    }

    /// Returns the null node ID (ns=0, i=0).
    #[inline]
    pub const fn null() -> Self {
        Self::numeric(0, 0)
    }

    /// Returns `true` if this is the null node ID.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && matches!(self.identifier, NodeIdentifier::Numeric(0))
    }

    /// Returns `true` if this is in the standard namespace (ns=0).
    #[inline]
    pub fn is_standard(&self) -> bool {
        self.namespace_index == 0
    }

    /// Returns the numeric identifier value, if numeric.
    pub fn as_numeric(&self) -> Option<u32> {
        match &self.identifier {
            NodeIdentifier::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string identifier value, if string.
    pub fn as_string(&self) -> Option<&str> {
        match &self.identifier {
            NodeIdentifier::String(v) => Some(v),
            _ => None,
        }
    }

    /// Converts to the canonical string format.
    ///
    /// Format: `ns=<namespace>;{i|s|g|b}=<identifier>`; the namespace part is
    /// omitted for ns=0.
    pub fn to_canonical_string(&self) -> String {
        let id_part = match &self.identifier {
            NodeIdentifier::Numeric(v) => format!("i={v}"),
            NodeIdentifier::String(v) => format!("s={v}"),
            NodeIdentifier::Guid(v) => format!("g={v}"),
            NodeIdentifier::Opaque(v) => format!("b={}", BASE64.encode(v)),
        };
        if self.namespace_index == 0 {
            id_part
        } else {
            format!("ns={};{}", self.namespace_index, id_part)
        }
    }

    /// Wraps this id as an [`ExpandedNodeId`] with no namespace URI.
    pub fn into_expanded(self) -> ExpandedNodeId {
        ExpandedNodeId {
            node_id: self,
            namespace_uri: None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for NodeId {
    type Err = SpaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut namespace_index = 0u16;
        let mut rest = s;

        if let Some(after_ns) = s.strip_prefix("ns=") {
            let (ns_part, id_part) = after_ns
                .split_once(';')
                .ok_or_else(|| SpaceError::invalid_node_id(s, "missing ';' after namespace"))?;
            namespace_index = ns_part
                .parse()
                .map_err(|_| SpaceError::invalid_node_id(s, "namespace index is not a u16"))?;
            rest = id_part;
        }

        let (kind, value) = rest
            .split_once('=')
            .ok_or_else(|| SpaceError::invalid_node_id(s, "missing identifier part"))?;

        let identifier = match kind {
            "i" => NodeIdentifier::Numeric(
                value
                    .parse()
                    .map_err(|_| SpaceError::invalid_node_id(s, "numeric identifier is not a u32"))?,
            ),
            "s" => NodeIdentifier::String(value.to_string()),
            "g" => NodeIdentifier::Guid(
                value
                    .parse()
                    .map_err(|_| SpaceError::invalid_node_id(s, "invalid GUID identifier"))?,
            ),
            "b" => NodeIdentifier::Opaque(
                BASE64
                    .decode(value)
                    .map_err(|_| SpaceError::invalid_node_id(s, "invalid base64 identifier"))?,
            ),
            other => {
                return Err(SpaceError::invalid_node_id(
                    s,
                    format!("unknown identifier kind '{other}'"),
                ))
            }
        };

        Ok(Self {
            namespace_index,
            identifier,
        })
    }
}

// =============================================================================
// NodeIdentifier
// =============================================================================

/// The identifier part of a [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum NodeIdentifier {
    /// Numeric identifier (most compact, used by all standard nodes).
    Numeric(u32),
    /// String identifier (human-readable hierarchical paths).
    String(String),
    /// GUID identifier.
    Guid(Uuid),
    /// Opaque byte-string identifier.
    Opaque(Vec<u8>),
}

// =============================================================================
// ExpandedNodeId
// =============================================================================

/// A [`NodeId`] extended with an optional namespace URI.
///
/// Reference targets use this form so a reference may legally point at a node
/// owned by another server. When `namespace_uri` is set, the target is
/// external and the local address space does not maintain the inverse half of
/// the reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpandedNodeId {
    /// The local node id portion.
    pub node_id: NodeId,
    /// Namespace URI for external targets; `None` for local targets.
    pub namespace_uri: Option<String>,
}

impl ExpandedNodeId {
    /// Creates an expanded id pointing at a node in a remote namespace.
    pub fn external(node_id: NodeId, namespace_uri: impl Into<String>) -> Self {
        Self {
            node_id,
            namespace_uri: Some(namespace_uri.into()),
        }
    }

    /// Returns the local [`NodeId`] if this target is not external.
    pub fn as_local(&self) -> Option<&NodeId> {
        if self.namespace_uri.is_none() {
            Some(&self.node_id)
        } else {
            None
        }
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        node_id.into_expanded()
    }
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace_uri {
            Some(uri) => write!(f, "nsu={};{}", uri, self.node_id),
            None => write!(f, "{}", self.node_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_roundtrip() {
        let id = NodeId::numeric(2, 1001);
        assert_eq!(id.to_canonical_string(), "ns=2;i=1001");
        assert_eq!("ns=2;i=1001".parse::<NodeId>().unwrap(), id);
    }

    #[test]
    fn test_string_roundtrip() {
        let id = NodeId::string(3, "Plant.Line1.Speed");
        assert_eq!(id.to_canonical_string(), "ns=3;s=Plant.Line1.Speed");
        assert_eq!("ns=3;s=Plant.Line1.Speed".parse::<NodeId>().unwrap(), id);
    }

    #[test]
    fn test_standard_namespace_omits_prefix() {
        let id = NodeId::numeric(0, 85);
        assert_eq!(id.to_canonical_string(), "i=85");
        assert_eq!("i=85".parse::<NodeId>().unwrap(), id);
    }

    #[test]
    fn test_guid_roundtrip() {
        let id = NodeId::random_guid(2);
        let parsed: NodeId = id.to_canonical_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_opaque_roundtrip() {
        let id = NodeId::opaque(2, vec![0xde, 0xad, 0xbe, 0xef]);
        let parsed: NodeId = id.to_canonical_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-node-id".parse::<NodeId>().is_err());
        assert!("ns=2;x=1".parse::<NodeId>().is_err());
        assert!("ns=notanumber;i=1".parse::<NodeId>().is_err());
        assert!("ns=2;i=notanumber".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = NodeId::string(2, "Plant.Line1.Speed");
        let json = serde_json::to_string(&id).unwrap();
        let parsed: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
        assert!(json.contains("\"type\":\"String\""));
    }

    #[test]
    fn test_null_node_id() {
        assert!(NodeId::null().is_null());
        assert!(!NodeId::numeric(0, 1).is_null());
    }

    #[test]
    fn test_expanded_external_has_no_local() {
        let local: ExpandedNodeId = NodeId::numeric(2, 5).into();
        assert!(local.as_local().is_some());

        let external = ExpandedNodeId::external(NodeId::numeric(1, 5), "urn:other:server");
        assert!(external.as_local().is_none());
    }
}
