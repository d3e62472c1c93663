// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Well-known node ids from the standard namespace.
//!
//! Only the ids the address-space services actually touch are listed; all of
//! them use the standard numeric values so external tooling recognizes them.

use crate::nodeid::NodeId;

/// Standard reference type nodes.
pub struct ReferenceTypeId;

impl ReferenceTypeId {
    /// Organizes (i=35): loose hierarchical grouping.
    pub const ORGANIZES: NodeId = NodeId::numeric(0, 35);
    /// HasEventSource (i=36).
    pub const HAS_EVENT_SOURCE: NodeId = NodeId::numeric(0, 36);
    /// HasModellingRule (i=37): links instance declarations to their rule.
    pub const HAS_MODELLING_RULE: NodeId = NodeId::numeric(0, 37);
    /// HasTypeDefinition (i=40): links instances to their type.
    pub const HAS_TYPE_DEFINITION: NodeId = NodeId::numeric(0, 40);
    /// HasSubtype (i=45).
    pub const HAS_SUBTYPE: NodeId = NodeId::numeric(0, 45);
    /// HasProperty (i=46).
    pub const HAS_PROPERTY: NodeId = NodeId::numeric(0, 46);
    /// HasComponent (i=47): structural containment.
    pub const HAS_COMPONENT: NodeId = NodeId::numeric(0, 47);
}

/// Standard object and object-type nodes.
pub struct ObjectId;

impl ObjectId {
    /// ModellingRule_Mandatory (i=78).
    pub const MODELLING_RULE_MANDATORY: NodeId = NodeId::numeric(0, 78);
    /// ModellingRule_Optional (i=80).
    pub const MODELLING_RULE_OPTIONAL: NodeId = NodeId::numeric(0, 80);
    /// Root folder (i=84).
    pub const ROOT_FOLDER: NodeId = NodeId::numeric(0, 84);
    /// Objects folder (i=85).
    pub const OBJECTS_FOLDER: NodeId = NodeId::numeric(0, 85);
    /// Types folder (i=86).
    pub const TYPES_FOLDER: NodeId = NodeId::numeric(0, 86);
    /// Views folder (i=87).
    pub const VIEWS_FOLDER: NodeId = NodeId::numeric(0, 87);
    /// Server object (i=2253).
    pub const SERVER: NodeId = NodeId::numeric(0, 2253);
}

/// Standard type-definition nodes.
pub struct TypeDefinitionId;

impl TypeDefinitionId {
    /// BaseObjectType (i=58).
    pub const BASE_OBJECT_TYPE: NodeId = NodeId::numeric(0, 58);
    /// FolderType (i=61).
    pub const FOLDER_TYPE: NodeId = NodeId::numeric(0, 61);
    /// BaseDataVariableType (i=63).
    pub const BASE_DATA_VARIABLE_TYPE: NodeId = NodeId::numeric(0, 63);
    /// PropertyType (i=68).
    pub const PROPERTY_TYPE: NodeId = NodeId::numeric(0, 68);
    /// BaseEventType (i=2041).
    pub const BASE_EVENT_TYPE: NodeId = NodeId::numeric(0, 2041);
}

/// Standard data type nodes.
pub struct DataTypeId;

impl DataTypeId {
    /// Boolean (i=1).
    pub const BOOLEAN: NodeId = NodeId::numeric(0, 1);
    /// SByte (i=2).
    pub const SBYTE: NodeId = NodeId::numeric(0, 2);
    /// Byte (i=3).
    pub const BYTE: NodeId = NodeId::numeric(0, 3);
    /// Int16 (i=4).
    pub const INT16: NodeId = NodeId::numeric(0, 4);
    /// UInt16 (i=5).
    pub const UINT16: NodeId = NodeId::numeric(0, 5);
    /// Int32 (i=6).
    pub const INT32: NodeId = NodeId::numeric(0, 6);
    /// UInt32 (i=7).
    pub const UINT32: NodeId = NodeId::numeric(0, 7);
    /// Int64 (i=8).
    pub const INT64: NodeId = NodeId::numeric(0, 8);
    /// UInt64 (i=9).
    pub const UINT64: NodeId = NodeId::numeric(0, 9);
    /// Float (i=10).
    pub const FLOAT: NodeId = NodeId::numeric(0, 10);
    /// Double (i=11).
    pub const DOUBLE: NodeId = NodeId::numeric(0, 11);
    /// String (i=12).
    pub const STRING: NodeId = NodeId::numeric(0, 12);
    /// DateTime (i=13).
    pub const DATE_TIME: NodeId = NodeId::numeric(0, 13);
    /// Guid (i=14).
    pub const GUID: NodeId = NodeId::numeric(0, 14);
    /// ByteString (i=15).
    pub const BYTE_STRING: NodeId = NodeId::numeric(0, 15);
    /// NodeId (i=17).
    pub const NODE_ID: NodeId = NodeId::numeric(0, 17);
    /// QualifiedName (i=20).
    pub const QUALIFIED_NAME: NodeId = NodeId::numeric(0, 20);
    /// LocalizedText (i=21).
    pub const LOCALIZED_TEXT: NodeId = NodeId::numeric(0, 21);
    /// BaseDataType (i=24): accepts any concrete type.
    pub const BASE_DATA_TYPE: NodeId = NodeId::numeric(0, 24);
}
