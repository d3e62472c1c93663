// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Nodes.
//!
//! A [`Node`] carries the attributes common to every node class plus a
//! [`NodeKind`] tagged union for the class-specific ones. Common attributes
//! are immutable after construction; mutable state (the value slot, the
//! reference list, the delegate chain, method handlers) sits behind its own
//! lock so readers of one node never contend with writers of another.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use sentra_core::{
    variant::value_rank, AccessLevel, DataValue, LocalizedText, NodeId, QualifiedName, SpaceError,
    StatusCode, Variant,
};
use sentra_core::ids::DataTypeId;

use crate::delegate::DelegateChain;
use crate::method::{Argument, MethodInvocationHandler};
use crate::reference::Reference;

// =============================================================================
// NodeClass
// =============================================================================

/// The eight node classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeClass {
    /// Real-world or organizational entity.
    Object = 1,
    /// Holds a value.
    Variable = 2,
    /// Callable behavior.
    Method = 4,
    /// Type definition for objects.
    ObjectType = 8,
    /// Type definition for variables.
    VariableType = 16,
    /// Type definition for references.
    ReferenceType = 32,
    /// Type definition for data values.
    DataType = 64,
    /// A subset view of the address space.
    View = 128,
}

impl NodeClass {
    /// Returns the class name.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeClass::Object => "Object",
            NodeClass::Variable => "Variable",
            NodeClass::Method => "Method",
            NodeClass::ObjectType => "ObjectType",
            NodeClass::VariableType => "VariableType",
            NodeClass::ReferenceType => "ReferenceType",
            NodeClass::DataType => "DataType",
            NodeClass::View => "View",
        }
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Node
// =============================================================================

/// One node in the address space.
pub struct Node {
    node_id: NodeId,
    browse_name: QualifiedName,
    display_name: LocalizedText,
    description: Option<LocalizedText>,
    references: RwLock<Vec<Reference>>,
    kind: NodeKind,
}

/// Class-specific node state.
pub enum NodeKind {
    /// Object instance.
    Object {
        /// EventNotifier bits (0x01 = subscribers may receive events).
        event_notifier: AtomicU8,
    },
    /// Variable instance.
    Variable(VariableAttributes),
    /// Method instance.
    Method(MethodAttributes),
    /// Object type definition.
    ObjectType {
        /// Whether instances of this type may exist.
        is_abstract: bool,
    },
    /// Variable type definition.
    VariableType {
        /// Declared data type for instances.
        data_type: NodeId,
        /// Declared value rank for instances.
        value_rank: i32,
        /// Whether instances of this type may exist.
        is_abstract: bool,
    },
    /// Reference type definition.
    ReferenceType {
        /// Whether the reference reads the same in both directions.
        symmetric: bool,
        /// Name of the inverse direction, for asymmetric types.
        inverse_name: Option<LocalizedText>,
    },
    /// Data type definition.
    DataType {
        /// Whether values of this type may exist.
        is_abstract: bool,
    },
    /// View.
    View {
        /// Whether the view is loop-free.
        contains_no_loops: bool,
    },
}

impl Node {
    /// Returns the node id.
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Returns the browse name.
    pub fn browse_name(&self) -> &QualifiedName {
        &self.browse_name
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &LocalizedText {
        &self.display_name
    }

    /// Returns the description, if any.
    pub fn description(&self) -> Option<&LocalizedText> {
        self.description.as_ref()
    }

    /// Returns the class-specific state.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the node class.
    pub fn node_class(&self) -> NodeClass {
        match &self.kind {
            NodeKind::Object { .. } => NodeClass::Object,
            NodeKind::Variable(_) => NodeClass::Variable,
            NodeKind::Method(_) => NodeClass::Method,
            NodeKind::ObjectType { .. } => NodeClass::ObjectType,
            NodeKind::VariableType { .. } => NodeClass::VariableType,
            NodeKind::ReferenceType { .. } => NodeClass::ReferenceType,
            NodeKind::DataType { .. } => NodeClass::DataType,
            NodeKind::View { .. } => NodeClass::View,
        }
    }

    /// Returns a snapshot of the reference list.
    pub fn references(&self) -> Vec<Reference> {
        self.references.read().clone()
    }

    /// Appends one reference half, skipping exact duplicates.
    pub fn insert_reference(&self, reference: Reference) {
        let mut references = self.references.write();
        if !references.contains(&reference) {
            references.push(reference);
        }
    }

    /// Drops every reference half whose target is the given local node.
    pub fn remove_references_to(&self, target: &NodeId) {
        self.references
            .write()
            .retain(|r| r.local_target() != Some(target));
    }

    /// Returns the variable state, if this is a variable node.
    pub fn variable(&self) -> Option<&VariableAttributes> {
        match &self.kind {
            NodeKind::Variable(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Returns the method state, if this is a method node.
    pub fn method(&self) -> Option<&MethodAttributes> {
        match &self.kind {
            NodeKind::Method(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Returns the event notifier bits of an object node.
    pub fn event_notifier(&self) -> Option<u8> {
        match &self.kind {
            NodeKind::Object { event_notifier } => Some(event_notifier.load(Ordering::Relaxed)),
            _ => None,
        }
    }

    /// Sets the event notifier bits of an object node.
    pub fn set_event_notifier(&self, bits: u8) {
        if let NodeKind::Object { event_notifier } = &self.kind {
            event_notifier.store(bits, Ordering::Relaxed);
        }
    }

    /// Creates a reference type node.
    pub fn reference_type(
        node_id: NodeId,
        browse_name: QualifiedName,
        symmetric: bool,
        inverse_name: Option<LocalizedText>,
    ) -> Self {
        let display_name = LocalizedText::plain(browse_name.name.clone());
        Self {
            node_id,
            browse_name,
            display_name,
            description: None,
            references: RwLock::new(Vec::new()),
            kind: NodeKind::ReferenceType {
                symmetric,
                inverse_name,
            },
        }
    }

    /// Creates a data type node.
    pub fn data_type(node_id: NodeId, browse_name: QualifiedName, is_abstract: bool) -> Self {
        let display_name = LocalizedText::plain(browse_name.name.clone());
        Self {
            node_id,
            browse_name,
            display_name,
            description: None,
            references: RwLock::new(Vec::new()),
            kind: NodeKind::DataType { is_abstract },
        }
    }

    /// Creates a variable type node.
    pub fn variable_type(
        node_id: NodeId,
        browse_name: QualifiedName,
        data_type: NodeId,
        value_rank: i32,
        is_abstract: bool,
    ) -> Self {
        let display_name = LocalizedText::plain(browse_name.name.clone());
        Self {
            node_id,
            browse_name,
            display_name,
            description: None,
            references: RwLock::new(Vec::new()),
            kind: NodeKind::VariableType {
                data_type,
                value_rank,
                is_abstract,
            },
        }
    }

    /// Creates a view node.
    pub fn view(node_id: NodeId, browse_name: QualifiedName, contains_no_loops: bool) -> Self {
        let display_name = LocalizedText::plain(browse_name.name.clone());
        Self {
            node_id,
            browse_name,
            display_name,
            description: None,
            references: RwLock::new(Vec::new()),
            kind: NodeKind::View { contains_no_loops },
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("node_id", &self.node_id)
            .field("browse_name", &self.browse_name)
            .field("node_class", &self.node_class())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// VariableAttributes
// =============================================================================

/// Variable-specific state: the value slot and its type metadata.
pub struct VariableAttributes {
    value: RwLock<DataValue>,
    data_type: NodeId,
    value_rank: i32,
    array_dimensions: Option<Vec<u32>>,
    access_level: AccessLevel,
    user_access_level: AccessLevel,
    delegate: RwLock<Option<Arc<DelegateChain>>>,
}

impl VariableAttributes {
    /// Returns a snapshot of the stored value.
    pub fn stored_value(&self) -> DataValue {
        self.value.read().clone()
    }

    /// Replaces the stored value after validating it against the declared
    /// dataType and valueRank.
    pub fn set_stored_value(&self, value: DataValue) -> Result<(), StatusCode> {
        if !value.value.compatible_with(&self.data_type, self.value_rank) {
            return Err(StatusCode::BAD_TYPE_MISMATCH);
        }
        *self.value.write() = value.restamped();
        Ok(())
    }

    /// Returns the declared data type.
    pub fn data_type(&self) -> &NodeId {
        &self.data_type
    }

    /// Returns the declared value rank.
    pub fn value_rank(&self) -> i32 {
        self.value_rank
    }

    /// Returns the declared array dimensions, if any.
    pub fn array_dimensions(&self) -> Option<&[u32]> {
        self.array_dimensions.as_deref()
    }

    /// Returns the static access level.
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    /// Returns the default per-user access level.
    pub fn user_access_level(&self) -> AccessLevel {
        self.user_access_level
    }

    /// Returns the installed delegate chain, if any.
    pub fn delegate(&self) -> Option<Arc<DelegateChain>> {
        self.delegate.read().clone()
    }

    /// Installs a delegate chain, replacing any existing one.
    pub fn set_delegate(&self, chain: Arc<DelegateChain>) {
        *self.delegate.write() = Some(chain);
    }
}

// =============================================================================
// MethodAttributes
// =============================================================================

/// Method-specific state: the declared signature and the handler.
pub struct MethodAttributes {
    input_arguments: Vec<Argument>,
    output_arguments: Vec<Argument>,
    handler: RwLock<Option<Arc<dyn MethodInvocationHandler>>>,
}

impl MethodAttributes {
    /// Returns the declared input arguments.
    pub fn input_arguments(&self) -> &[Argument] {
        &self.input_arguments
    }

    /// Returns the declared output arguments.
    pub fn output_arguments(&self) -> &[Argument] {
        &self.output_arguments
    }

    /// Returns the invocation handler, if one is attached.
    pub fn handler(&self) -> Option<Arc<dyn MethodInvocationHandler>> {
        self.handler.read().clone()
    }

    /// Returns `true` when a handler is attached and the method is callable.
    pub fn is_executable(&self) -> bool {
        self.handler.read().is_some()
    }

    /// Attaches the invocation handler.
    pub fn set_handler(&self, handler: Arc<dyn MethodInvocationHandler>) {
        *self.handler.write() = Some(handler);
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Builder for object nodes.
#[derive(Default)]
pub struct ObjectNodeBuilder {
    node_id: Option<NodeId>,
    browse_name: Option<QualifiedName>,
    display_name: Option<LocalizedText>,
    description: Option<LocalizedText>,
    event_notifier: u8,
}

impl ObjectNodeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node id (required).
    pub fn node_id(mut self, node_id: NodeId) -> Self {
        self.node_id = Some(node_id);
        self
    }

    /// Sets the browse name (required).
    pub fn browse_name(mut self, name: QualifiedName) -> Self {
        self.browse_name = Some(name);
        self
    }

    /// Sets the display name; defaults to the browse name.
    pub fn display_name(mut self, name: impl Into<LocalizedText>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, text: impl Into<LocalizedText>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Sets the event notifier bits.
    pub fn event_notifier(mut self, bits: u8) -> Self {
        self.event_notifier = bits;
        self
    }

    /// Builds the node.
    pub fn build(self) -> Result<Node, SpaceError> {
        let node_id = self.node_id.ok_or(SpaceError::missing_field("node_id"))?;
        let browse_name = self
            .browse_name
            .ok_or(SpaceError::missing_field("browse_name"))?;
        let display_name = self
            .display_name
            .unwrap_or_else(|| LocalizedText::plain(browse_name.name.clone()));
        Ok(Node {
            node_id,
            browse_name,
            display_name,
            description: self.description,
            references: RwLock::new(Vec::new()),
            kind: NodeKind::Object {
                event_notifier: AtomicU8::new(self.event_notifier),
            },
        })
    }
}

/// Builder for variable nodes.
pub struct VariableNodeBuilder {
    node_id: Option<NodeId>,
    browse_name: Option<QualifiedName>,
    display_name: Option<LocalizedText>,
    description: Option<LocalizedText>,
    data_type: NodeId,
    value_rank: i32,
    array_dimensions: Option<Vec<u32>>,
    access_level: AccessLevel,
    user_access_level: Option<AccessLevel>,
    value: Option<Variant>,
}

impl Default for VariableNodeBuilder {
    fn default() -> Self {
        Self {
            node_id: None,
            browse_name: None,
            display_name: None,
            description: None,
            data_type: DataTypeId::BASE_DATA_TYPE,
            value_rank: value_rank::ANY,
            array_dimensions: None,
            access_level: AccessLevel::READ_ONLY,
            user_access_level: None,
            value: None,
        }
    }
}

impl VariableNodeBuilder {
    /// Creates a builder with a permissive type declaration (BaseDataType,
    /// any rank) and read-only access.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node id (required).
    pub fn node_id(mut self, node_id: NodeId) -> Self {
        self.node_id = Some(node_id);
        self
    }

    /// Sets the browse name (required).
    pub fn browse_name(mut self, name: QualifiedName) -> Self {
        self.browse_name = Some(name);
        self
    }

    /// Sets the display name; defaults to the browse name.
    pub fn display_name(mut self, name: impl Into<LocalizedText>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, text: impl Into<LocalizedText>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Declares the data type.
    pub fn data_type(mut self, data_type: NodeId) -> Self {
        self.data_type = data_type;
        self
    }

    /// Declares the value rank.
    pub fn value_rank(mut self, rank: i32) -> Self {
        self.value_rank = rank;
        self
    }

    /// Declares the array dimensions.
    pub fn array_dimensions(mut self, dimensions: Vec<u32>) -> Self {
        self.array_dimensions = Some(dimensions);
        self
    }

    /// Sets the static access level.
    pub fn access_level(mut self, level: AccessLevel) -> Self {
        self.access_level = level;
        self
    }

    /// Sets the default per-user access level; defaults to the static level.
    pub fn user_access_level(mut self, level: AccessLevel) -> Self {
        self.user_access_level = Some(level);
        self
    }

    /// Sets the initial value.
    pub fn value(mut self, value: Variant) -> Self {
        self.value = Some(value);
        self
    }

    /// Builds the node, validating the initial value against the declared
    /// type.
    pub fn build(self) -> Result<Node, SpaceError> {
        let node_id = self.node_id.ok_or(SpaceError::missing_field("node_id"))?;
        let browse_name = self
            .browse_name
            .ok_or(SpaceError::missing_field("browse_name"))?;
        let display_name = self
            .display_name
            .unwrap_or_else(|| LocalizedText::plain(browse_name.name.clone()));

        let initial = self.value.unwrap_or(Variant::Empty);
        if !initial.is_empty() && !initial.compatible_with(&self.data_type, self.value_rank) {
            return Err(SpaceError::invalid_value(format!(
                "initial value does not match declared type {} rank {}",
                self.data_type, self.value_rank
            )));
        }

        Ok(Node {
            node_id,
            browse_name,
            display_name,
            description: self.description,
            references: RwLock::new(Vec::new()),
            kind: NodeKind::Variable(VariableAttributes {
                value: RwLock::new(DataValue::new(initial)),
                data_type: self.data_type,
                value_rank: self.value_rank,
                array_dimensions: self.array_dimensions,
                access_level: self.access_level,
                user_access_level: self.user_access_level.unwrap_or(self.access_level),
                delegate: RwLock::new(None),
            }),
        })
    }
}

/// Builder for method nodes.
#[derive(Default)]
pub struct MethodNodeBuilder {
    node_id: Option<NodeId>,
    browse_name: Option<QualifiedName>,
    display_name: Option<LocalizedText>,
    description: Option<LocalizedText>,
    input_arguments: Vec<Argument>,
    output_arguments: Vec<Argument>,
    handler: Option<Arc<dyn MethodInvocationHandler>>,
}

impl MethodNodeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node id (required).
    pub fn node_id(mut self, node_id: NodeId) -> Self {
        self.node_id = Some(node_id);
        self
    }

    /// Sets the browse name (required).
    pub fn browse_name(mut self, name: QualifiedName) -> Self {
        self.browse_name = Some(name);
        self
    }

    /// Sets the display name; defaults to the browse name.
    pub fn display_name(mut self, name: impl Into<LocalizedText>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, text: impl Into<LocalizedText>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Declares the input argument signature.
    pub fn input_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.input_arguments = arguments;
        self
    }

    /// Declares the output argument signature.
    pub fn output_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.output_arguments = arguments;
        self
    }

    /// Attaches the invocation handler.
    pub fn handler(mut self, handler: Arc<dyn MethodInvocationHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Builds the node.
    pub fn build(self) -> Result<Node, SpaceError> {
        let node_id = self.node_id.ok_or(SpaceError::missing_field("node_id"))?;
        let browse_name = self
            .browse_name
            .ok_or(SpaceError::missing_field("browse_name"))?;
        let display_name = self
            .display_name
            .unwrap_or_else(|| LocalizedText::plain(browse_name.name.clone()));
        Ok(Node {
            node_id,
            browse_name,
            display_name,
            description: self.description,
            references: RwLock::new(Vec::new()),
            kind: NodeKind::Method(MethodAttributes {
                input_arguments: self.input_arguments,
                output_arguments: self.output_arguments,
                handler: RwLock::new(self.handler),
            }),
        })
    }
}

/// Builder for object type nodes.
#[derive(Default)]
pub struct ObjectTypeNodeBuilder {
    node_id: Option<NodeId>,
    browse_name: Option<QualifiedName>,
    display_name: Option<LocalizedText>,
    description: Option<LocalizedText>,
    is_abstract: bool,
}

impl ObjectTypeNodeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node id (required).
    pub fn node_id(mut self, node_id: NodeId) -> Self {
        self.node_id = Some(node_id);
        self
    }

    /// Sets the browse name (required).
    pub fn browse_name(mut self, name: QualifiedName) -> Self {
        self.browse_name = Some(name);
        self
    }

    /// Sets the display name; defaults to the browse name.
    pub fn display_name(mut self, name: impl Into<LocalizedText>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, text: impl Into<LocalizedText>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Marks the type abstract.
    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Builds the node.
    pub fn build(self) -> Result<Node, SpaceError> {
        let node_id = self.node_id.ok_or(SpaceError::missing_field("node_id"))?;
        let browse_name = self
            .browse_name
            .ok_or(SpaceError::missing_field("browse_name"))?;
        let display_name = self
            .display_name
            .unwrap_or_else(|| LocalizedText::plain(browse_name.name.clone()));
        Ok(Node {
            node_id,
            browse_name,
            display_name,
            description: self.description,
            references: RwLock::new(Vec::new()),
            kind: NodeKind::ObjectType {
                is_abstract: self.is_abstract,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentra_core::ids::ReferenceTypeId;

    #[test]
    fn test_builder_requires_identity() {
        let err = VariableNodeBuilder::new().build();
        assert!(err.is_err());

        let err = VariableNodeBuilder::new()
            .node_id(NodeId::numeric(2, 1))
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn test_display_name_defaults_to_browse_name() {
        let node = ObjectNodeBuilder::new()
            .node_id(NodeId::numeric(2, 1))
            .browse_name(QualifiedName::new(2, "Motor"))
            .build()
            .unwrap();
        assert_eq!(node.display_name().text, "Motor");
        assert_eq!(node.node_class(), NodeClass::Object);
    }

    #[test]
    fn test_variable_initial_value_validated() {
        let err = VariableNodeBuilder::new()
            .node_id(NodeId::numeric(2, 1))
            .browse_name(QualifiedName::new(2, "Speed"))
            .data_type(DataTypeId::DOUBLE)
            .value_rank(value_rank::SCALAR)
            .value(Variant::String("not a double".into()))
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn test_stored_value_type_checked() {
        let node = VariableNodeBuilder::new()
            .node_id(NodeId::numeric(2, 1))
            .browse_name(QualifiedName::new(2, "Speed"))
            .data_type(DataTypeId::DOUBLE)
            .value_rank(value_rank::SCALAR)
            .value(Variant::Double(1.0))
            .build()
            .unwrap();
        let var = node.variable().unwrap();

        assert!(var.set_stored_value(DataValue::new(Variant::Double(2.0))).is_ok());
        assert_eq!(var.stored_value().value, Variant::Double(2.0));

        let err = var.set_stored_value(DataValue::new(Variant::Int32(3)));
        assert_eq!(err.unwrap_err(), StatusCode::BAD_TYPE_MISMATCH);
        // Failed write leaves the slot untouched.
        assert_eq!(var.stored_value().value, Variant::Double(2.0));
    }

    #[test]
    fn test_insert_reference_dedupes() {
        let node = ObjectNodeBuilder::new()
            .node_id(NodeId::numeric(2, 1))
            .browse_name(QualifiedName::new(2, "Plant"))
            .build()
            .unwrap();
        let edge = Reference::forward(
            NodeId::numeric(2, 1),
            ReferenceTypeId::ORGANIZES,
            NodeId::numeric(2, 2),
        );
        node.insert_reference(edge.clone());
        node.insert_reference(edge);
        assert_eq!(node.references().len(), 1);
    }

    #[test]
    fn test_event_notifier_only_on_objects() {
        let object = ObjectNodeBuilder::new()
            .node_id(NodeId::numeric(2, 1))
            .browse_name(QualifiedName::new(2, "Server"))
            .event_notifier(1)
            .build()
            .unwrap();
        assert_eq!(object.event_notifier(), Some(1));

        let variable = VariableNodeBuilder::new()
            .node_id(NodeId::numeric(2, 2))
            .browse_name(QualifiedName::new(2, "V"))
            .build()
            .unwrap();
        assert_eq!(variable.event_notifier(), None);
    }
}
