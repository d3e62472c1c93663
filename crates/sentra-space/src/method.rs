// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Method dispatch.
//!
//! [`invoke_method`] validates a call against the declared signature before
//! the handler runs. Outcomes are three-tier: `Good` with outputs, overall
//! `BadInvalidArgument` with per-argument results marking exactly the failing
//! positions, or a domain `Bad*` status from the handler with empty outputs.

use serde::{Deserialize, Serialize};

use sentra_core::{variant::value_rank, LocalizedText, NodeId, StatusCode, Variant};

use crate::delegate::AttributeContext;
use crate::node::Node;

// =============================================================================
// Argument
// =============================================================================

/// One declared method argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument name.
    pub name: String,
    /// Declared data type.
    pub data_type: NodeId,
    /// Declared value rank.
    pub value_rank: i32,
    /// Optional description.
    pub description: Option<LocalizedText>,
}

impl Argument {
    /// Declares a scalar argument.
    pub fn scalar(name: impl Into<String>, data_type: NodeId) -> Self {
        Self {
            name: name.into(),
            data_type,
            value_rank: value_rank::SCALAR,
            description: None,
        }
    }

    /// Declares a one-dimensional array argument.
    pub fn array(name: impl Into<String>, data_type: NodeId) -> Self {
        Self {
            name: name.into(),
            data_type,
            value_rank: value_rank::ONE_DIMENSION,
            description: None,
        }
    }

    /// Attaches a description.
    pub fn with_description(mut self, text: impl Into<LocalizedText>) -> Self {
        self.description = Some(text.into());
        self
    }
}

// =============================================================================
// MethodInvocationHandler
// =============================================================================

/// Executes a method call.
///
/// The handler runs only after every input argument passed validation, so it
/// may index `inputs` positionally against the declared signature. Domain
/// failures are reported as a `Bad*` status code.
pub trait MethodInvocationHandler: Send + Sync {
    /// Runs the method and returns its output arguments.
    fn invoke(&self, ctx: &AttributeContext, inputs: &[Variant]) -> Result<Vec<Variant>, StatusCode>;
}

impl<F> MethodInvocationHandler for F
where
    F: Fn(&AttributeContext, &[Variant]) -> Result<Vec<Variant>, StatusCode> + Send + Sync,
{
    fn invoke(&self, ctx: &AttributeContext, inputs: &[Variant]) -> Result<Vec<Variant>, StatusCode> {
        self(ctx, inputs)
    }
}

// =============================================================================
// CallResult
// =============================================================================

/// The outcome of one method call.
#[derive(Debug, Clone)]
pub struct CallResult {
    /// Overall status.
    pub status: StatusCode,
    /// Per-input-argument validation results; empty unless arguments were
    /// individually validated.
    pub input_argument_results: Vec<StatusCode>,
    /// Output arguments; empty unless the call succeeded.
    pub output_arguments: Vec<Variant>,
}

impl CallResult {
    /// Creates a failed result with no per-argument detail.
    pub fn bad(status: StatusCode) -> Self {
        Self {
            status,
            input_argument_results: Vec::new(),
            output_arguments: Vec::new(),
        }
    }

    /// Returns `true` when the call succeeded.
    pub fn is_good(&self) -> bool {
        self.status.is_good()
    }
}

/// Validates the inputs against the method's declared signature and, when
/// every argument passes, runs the handler.
pub fn invoke_method(ctx: &AttributeContext, node: &Node, inputs: &[Variant]) -> CallResult {
    let Some(method) = node.method() else {
        return CallResult::bad(StatusCode::BAD_METHOD_INVALID);
    };

    let declared = method.input_arguments();
    if inputs.len() > declared.len() {
        return CallResult::bad(StatusCode::BAD_TOO_MANY_ARGUMENTS);
    }

    let mut results = Vec::with_capacity(declared.len());
    let mut any_bad = false;
    for (position, argument) in declared.iter().enumerate() {
        let status = match inputs.get(position) {
            None => StatusCode::BAD_ARGUMENTS_MISSING,
            Some(value) if value.compatible_with(&argument.data_type, argument.value_rank) => {
                StatusCode::GOOD
            }
            Some(_) => StatusCode::BAD_TYPE_MISMATCH,
        };
        if status.is_bad() {
            any_bad = true;
        }
        results.push(status);
    }

    if any_bad {
        return CallResult {
            status: StatusCode::BAD_INVALID_ARGUMENT,
            input_argument_results: results,
            output_arguments: Vec::new(),
        };
    }

    let Some(handler) = method.handler() else {
        return CallResult::bad(StatusCode::BAD_NOT_EXECUTABLE);
    };

    match handler.invoke(ctx, inputs) {
        Ok(outputs) => CallResult {
            status: StatusCode::GOOD,
            input_argument_results: results,
            output_arguments: outputs,
        },
        Err(status) => {
            tracing::debug!(
                node_id = %node.node_id(),
                status = %status,
                "method handler reported failure"
            );
            CallResult {
                status,
                input_argument_results: results,
                output_arguments: Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use sentra_core::ids::DataTypeId;
    use sentra_core::QualifiedName;

    use crate::node::MethodNodeBuilder;

    fn negate_method() -> Node {
        MethodNodeBuilder::new()
            .node_id(NodeId::numeric(2, 10))
            .browse_name(QualifiedName::new(2, "Negate"))
            .input_arguments(vec![Argument::scalar("x", DataTypeId::DOUBLE)])
            .output_arguments(vec![Argument::scalar("negated", DataTypeId::DOUBLE)])
            .handler(Arc::new(
                |_: &AttributeContext, inputs: &[Variant]| -> Result<Vec<Variant>, StatusCode> {
                    let x = inputs[0].as_double().ok_or(StatusCode::BAD_TYPE_MISMATCH)?;
                    Ok(vec![Variant::Double(-x)])
                },
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_good_call() {
        let node = negate_method();
        let result = invoke_method(&AttributeContext::anonymous(), &node, &[Variant::Double(4.0)]);
        assert!(result.is_good());
        assert_eq!(result.input_argument_results, vec![StatusCode::GOOD]);
        assert_eq!(result.output_arguments, vec![Variant::Double(-4.0)]);
    }

    #[test]
    fn test_missing_argument_marked_per_position() {
        let node = negate_method();
        let result = invoke_method(&AttributeContext::anonymous(), &node, &[]);
        assert_eq!(result.status, StatusCode::BAD_INVALID_ARGUMENT);
        assert_eq!(result.input_argument_results.len(), 1);
        assert!(result.input_argument_results[0].is_bad());
        assert!(result.output_arguments.is_empty());
    }

    #[test]
    fn test_wrong_type_marked_per_position() {
        let node = negate_method();
        let result = invoke_method(
            &AttributeContext::anonymous(),
            &node,
            &[Variant::String("four".into())],
        );
        assert_eq!(result.status, StatusCode::BAD_INVALID_ARGUMENT);
        assert_eq!(
            result.input_argument_results,
            vec![StatusCode::BAD_TYPE_MISMATCH]
        );
    }

    #[test]
    fn test_too_many_arguments() {
        let node = negate_method();
        let result = invoke_method(
            &AttributeContext::anonymous(),
            &node,
            &[Variant::Double(1.0), Variant::Double(2.0)],
        );
        assert_eq!(result.status, StatusCode::BAD_TOO_MANY_ARGUMENTS);
    }

    #[test]
    fn test_handler_missing_means_not_executable() {
        let node = MethodNodeBuilder::new()
            .node_id(NodeId::numeric(2, 11))
            .browse_name(QualifiedName::new(2, "Detached"))
            .build()
            .unwrap();
        let result = invoke_method(&AttributeContext::anonymous(), &node, &[]);
        assert_eq!(result.status, StatusCode::BAD_NOT_EXECUTABLE);
    }

    #[test]
    fn test_non_method_node_rejected() {
        let node = crate::node::ObjectNodeBuilder::new()
            .node_id(NodeId::numeric(2, 12))
            .browse_name(QualifiedName::new(2, "NotAMethod"))
            .build()
            .unwrap();
        let result = invoke_method(&AttributeContext::anonymous(), &node, &[]);
        assert_eq!(result.status, StatusCode::BAD_METHOD_INVALID);
    }
}
