// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Type-driven node instantiation.
//!
//! [`NodeFactory::instantiate`] materializes an instance of an ObjectType:
//! the instance node itself, a HasTypeDefinition edge back to the type, and a
//! recursive copy of every instance declaration the type marks mandatory
//! (HasModellingRule to ModellingRule_Mandatory). Optional declarations are
//! skipped.

use std::sync::Arc;

use sentra_core::ids::{ObjectId, ReferenceTypeId};
use sentra_core::{NodeId, QualifiedName, SpaceError};

use crate::manager::NodeManager;
use crate::node::{Node, NodeKind, ObjectNodeBuilder, VariableNodeBuilder};

/// Instantiates object types registered in a [`NodeManager`].
pub struct NodeFactory<'a> {
    manager: &'a NodeManager,
}

impl<'a> NodeFactory<'a> {
    /// Creates a factory over a manager.
    pub fn new(manager: &'a NodeManager) -> Self {
        Self { manager }
    }

    /// Creates an instance of the given object type.
    ///
    /// The type definition must resolve to a non-abstract ObjectType node;
    /// anything else fails with an error mapping to `BadNodeIdInvalid`.
    pub fn instantiate(
        &self,
        node_id: NodeId,
        browse_name: QualifiedName,
        type_definition_id: &NodeId,
    ) -> Result<Arc<Node>, SpaceError> {
        let type_node = self
            .manager
            .get_node(type_definition_id)
            .ok_or_else(|| SpaceError::type_definition_invalid(type_definition_id.clone()))?;
        match type_node.kind() {
            NodeKind::ObjectType { is_abstract: false } => {}
            _ => {
                return Err(SpaceError::type_definition_invalid(
                    type_definition_id.clone(),
                ))
            }
        }

        let instance = self.manager.add_node(
            ObjectNodeBuilder::new()
                .node_id(node_id.clone())
                .browse_name(browse_name)
                .build()?,
        )?;
        self.manager.add_reference(
            &node_id,
            ReferenceTypeId::HAS_TYPE_DEFINITION,
            type_definition_id,
        )?;
        self.instantiate_members(&node_id, &type_node)?;

        tracing::debug!(
            node_id = %node_id,
            type_definition = %type_definition_id,
            "instance created"
        );
        Ok(instance)
    }

    /// Copies the mandatory instance declarations of `declaration` under
    /// `parent_id`, recursing into each copy.
    fn instantiate_members(
        &self,
        parent_id: &NodeId,
        declaration: &Node,
    ) -> Result<(), SpaceError> {
        for reference in declaration.references() {
            if !reference.is_forward {
                continue;
            }
            let structural = reference.reference_type_id == ReferenceTypeId::HAS_COMPONENT
                || reference.reference_type_id == ReferenceTypeId::HAS_PROPERTY;
            if !structural {
                continue;
            }
            let Some(member_id) = reference.local_target() else {
                continue;
            };
            let Some(member) = self.manager.get_node(member_id) else {
                continue;
            };
            if !self.is_mandatory(&member) {
                continue;
            }

            let child_id = self.derive_member_id(parent_id, member.browse_name());
            let child = match member.kind() {
                NodeKind::Variable(var) => {
                    let mut builder = VariableNodeBuilder::new()
                        .node_id(child_id.clone())
                        .browse_name(member.browse_name().clone())
                        .display_name(member.display_name().clone())
                        .data_type(var.data_type().clone())
                        .value_rank(var.value_rank())
                        .access_level(var.access_level())
                        .user_access_level(var.user_access_level())
                        .value(var.stored_value().value);
                    if let Some(dimensions) = var.array_dimensions() {
                        builder = builder.array_dimensions(dimensions.to_vec());
                    }
                    builder.build()?
                }
                NodeKind::Object { .. } => ObjectNodeBuilder::new()
                    .node_id(child_id.clone())
                    .browse_name(member.browse_name().clone())
                    .display_name(member.display_name().clone())
                    .build()?,
                // Declarations of other classes are not instantiated.
                _ => continue,
            };
            self.manager.add_node(child)?;
            self.manager.add_reference(
                parent_id,
                reference.reference_type_id.clone(),
                &child_id,
            )?;
            if let Some(type_definition) = Self::type_definition_of(&member) {
                self.manager.add_reference(
                    &child_id,
                    ReferenceTypeId::HAS_TYPE_DEFINITION,
                    &type_definition,
                )?;
            }
            self.instantiate_members(&child_id, &member)?;
        }
        Ok(())
    }

    fn is_mandatory(&self, declaration: &Node) -> bool {
        declaration.references().iter().any(|r| {
            r.is_forward
                && r.reference_type_id == ReferenceTypeId::HAS_MODELLING_RULE
                && r.local_target() == Some(&ObjectId::MODELLING_RULE_MANDATORY)
        })
    }

    fn type_definition_of(declaration: &Node) -> Option<NodeId> {
        declaration
            .references()
            .iter()
            .find(|r| r.is_forward && r.reference_type_id == ReferenceTypeId::HAS_TYPE_DEFINITION)
            .and_then(|r| r.local_target().cloned())
    }

    fn derive_member_id(&self, parent_id: &NodeId, member_name: &QualifiedName) -> NodeId {
        let base = parent_id
            .as_string()
            .map(str::to_string)
            .unwrap_or_else(|| parent_id.to_canonical_string());
        NodeId::string(
            self.manager.namespace_index(),
            format!("{}.{}", base, member_name.name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentra_core::ids::{DataTypeId, TypeDefinitionId};
    use sentra_core::variant::value_rank;
    use sentra_core::Variant;

    use crate::node::ObjectTypeNodeBuilder;

    /// Builds a type with one mandatory and one optional variable member.
    fn machine_type(manager: &NodeManager) -> NodeId {
        let type_id = manager.new_node_id("Types/MachineType");
        manager
            .add_node(
                ObjectTypeNodeBuilder::new()
                    .node_id(type_id.clone())
                    .browse_name(QualifiedName::new(2, "MachineType"))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        // FolderType registered so HasTypeDefinition edges resolve locally.
        manager
            .add_node(
                ObjectTypeNodeBuilder::new()
                    .node_id(TypeDefinitionId::BASE_DATA_VARIABLE_TYPE)
                    .browse_name(QualifiedName::standard("BaseDataVariableType"))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        for (name, mandatory) in [("RPM", true), ("Diagnostics", false)] {
            let member_id = manager.new_node_id(format!("Types/MachineType.{name}"));
            manager
                .add_node(
                    VariableNodeBuilder::new()
                        .node_id(member_id.clone())
                        .browse_name(QualifiedName::new(2, name))
                        .data_type(DataTypeId::DOUBLE)
                        .value_rank(value_rank::SCALAR)
                        .value(Variant::Double(0.0))
                        .build()
                        .unwrap(),
                )
                .unwrap();
            manager
                .add_reference(&type_id, ReferenceTypeId::HAS_COMPONENT, &member_id)
                .unwrap();
            manager
                .add_reference(
                    &member_id,
                    ReferenceTypeId::HAS_TYPE_DEFINITION,
                    &TypeDefinitionId::BASE_DATA_VARIABLE_TYPE,
                )
                .unwrap();
            let rule = if mandatory {
                ObjectId::MODELLING_RULE_MANDATORY
            } else {
                ObjectId::MODELLING_RULE_OPTIONAL
            };
            manager
                .add_node(
                    ObjectNodeBuilder::new()
                        .node_id(rule.clone())
                        .browse_name(QualifiedName::standard(if mandatory {
                            "Mandatory"
                        } else {
                            "Optional"
                        }))
                        .build()
                        .unwrap(),
                )
                .ok();
            manager
                .add_reference(&member_id, ReferenceTypeId::HAS_MODELLING_RULE, &rule)
                .unwrap();
        }
        type_id
    }

    #[test]
    fn test_instantiate_copies_mandatory_members_only() {
        let manager = NodeManager::new(2, "urn:sentra:test");
        let type_id = machine_type(&manager);
        let factory = NodeFactory::new(&manager);

        let instance_id = manager.new_node_id("Plant/Machine1");
        factory
            .instantiate(
                instance_id.clone(),
                QualifiedName::new(2, "Machine1"),
                &type_id,
            )
            .unwrap();

        let rpm_id = NodeId::string(2, "Plant/Machine1.RPM");
        let rpm = manager.get_node(&rpm_id).expect("mandatory member copied");
        assert_eq!(
            rpm.variable().unwrap().stored_value().value,
            Variant::Double(0.0)
        );
        assert!(!manager.contains(&NodeId::string(2, "Plant/Machine1.Diagnostics")));

        // Instance is wired to its type and its member.
        let refs = manager.get_node(&instance_id).unwrap().references();
        assert!(refs.iter().any(|r| {
            r.is_forward
                && r.reference_type_id == ReferenceTypeId::HAS_TYPE_DEFINITION
                && r.local_target() == Some(&type_id)
        }));
        assert!(refs.iter().any(|r| {
            r.is_forward
                && r.reference_type_id == ReferenceTypeId::HAS_COMPONENT
                && r.local_target() == Some(&rpm_id)
        }));
    }

    #[test]
    fn test_unknown_type_definition_rejected() {
        let manager = NodeManager::new(2, "urn:sentra:test");
        let factory = NodeFactory::new(&manager);
        let err = factory
            .instantiate(
                manager.new_node_id("X"),
                QualifiedName::new(2, "X"),
                &NodeId::numeric(2, 404),
            )
            .unwrap_err();
        assert!(matches!(err, SpaceError::TypeDefinitionInvalid { .. }));
    }

    #[test]
    fn test_non_object_type_rejected() {
        let manager = NodeManager::new(2, "urn:sentra:test");
        let variable_id = manager.new_node_id("NotAType");
        manager
            .add_node(
                VariableNodeBuilder::new()
                    .node_id(variable_id.clone())
                    .browse_name(QualifiedName::new(2, "NotAType"))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        let factory = NodeFactory::new(&manager);
        let err = factory
            .instantiate(
                manager.new_node_id("X"),
                QualifiedName::new(2, "X"),
                &variable_id,
            )
            .unwrap_err();
        assert!(matches!(err, SpaceError::TypeDefinitionInvalid { .. }));
    }
}
