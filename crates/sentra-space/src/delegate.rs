// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Attribute delegation.
//!
//! A [`DelegateChain`] interposes an ordered list of [`AttributeDelegate`]
//! stages between callers and a variable's stored value. Each stage receives
//! a [`Next`] continuation and chooses to short-circuit (return without
//! calling it), pass through, or transform the result. The stage added first
//! is outermost: it sees the request before, and the result after, every
//! stage added later. Past the last stage sits the terminal default store,
//! which reads and writes the node's value slot with type validation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sentra_core::{AccessLevel, DataValue, StatusCode};

use crate::node::Node;

// =============================================================================
// AttributeContext
// =============================================================================

/// Per-request context passed through delegate chains and method handlers.
#[derive(Debug, Clone, Default)]
pub struct AttributeContext {
    identity: Option<String>,
}

impl AttributeContext {
    /// Creates an anonymous context.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a context for an authenticated identity.
    pub fn with_identity(identity: impl Into<String>) -> Self {
        Self {
            identity: Some(identity.into()),
        }
    }

    /// Returns the authenticated identity, if any.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }
}

// =============================================================================
// AttributeDelegate
// =============================================================================

/// One stage in a delegate chain.
///
/// Default implementations pass straight through, so a stage only overrides
/// the paths it cares about.
pub trait AttributeDelegate: Send + Sync {
    /// Intercepts a value read.
    fn get_value(
        &self,
        ctx: &AttributeContext,
        node: &Node,
        next: Next<'_>,
    ) -> Result<DataValue, StatusCode> {
        next.get_value(ctx, node)
    }

    /// Intercepts a value write.
    fn set_value(
        &self,
        ctx: &AttributeContext,
        node: &Node,
        value: DataValue,
        next: Next<'_>,
    ) -> Result<(), StatusCode> {
        next.set_value(ctx, node, value)
    }

    /// Intercepts the effective per-user access level.
    fn user_access_level(
        &self,
        ctx: &AttributeContext,
        node: &Node,
        next: Next<'_>,
    ) -> Result<AccessLevel, StatusCode> {
        next.user_access_level(ctx, node)
    }
}

// =============================================================================
// Next / DelegateChain
// =============================================================================

/// Continuation handed to each stage, pointing at the remainder of the chain.
pub struct Next<'a> {
    chain: &'a DelegateChain,
    index: usize,
}

impl Next<'_> {
    /// Invokes the rest of the chain for a read.
    pub fn get_value(self, ctx: &AttributeContext, node: &Node) -> Result<DataValue, StatusCode> {
        match self.chain.stages.get(self.index) {
            Some(stage) => stage.get_value(
                ctx,
                node,
                Next {
                    chain: self.chain,
                    index: self.index + 1,
                },
            ),
            None => read_stored_value(node),
        }
    }

    /// Invokes the rest of the chain for a write.
    pub fn set_value(
        self,
        ctx: &AttributeContext,
        node: &Node,
        value: DataValue,
    ) -> Result<(), StatusCode> {
        match self.chain.stages.get(self.index) {
            Some(stage) => stage.set_value(
                ctx,
                node,
                value,
                Next {
                    chain: self.chain,
                    index: self.index + 1,
                },
            ),
            None => write_stored_value(node, value),
        }
    }

    /// Invokes the rest of the chain for the effective access level.
    pub fn user_access_level(
        self,
        ctx: &AttributeContext,
        node: &Node,
    ) -> Result<AccessLevel, StatusCode> {
        match self.chain.stages.get(self.index) {
            Some(stage) => stage.user_access_level(
                ctx,
                node,
                Next {
                    chain: self.chain,
                    index: self.index + 1,
                },
            ),
            None => node
                .variable()
                .map(|v| v.user_access_level())
                .ok_or(StatusCode::BAD_ATTRIBUTE_ID_INVALID),
        }
    }
}

/// An ordered list of delegate stages over the terminal default store.
pub struct DelegateChain {
    stages: Vec<Arc<dyn AttributeDelegate>>,
}

impl DelegateChain {
    /// Creates a chain from stages in outermost-first order.
    pub fn new(stages: Vec<Arc<dyn AttributeDelegate>>) -> Self {
        Self { stages }
    }

    /// Creates a single-stage chain.
    pub fn single(stage: Arc<dyn AttributeDelegate>) -> Self {
        Self::new(vec![stage])
    }

    /// Returns the number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` when the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Reads the value through the chain.
    pub fn get_value(&self, ctx: &AttributeContext, node: &Node) -> Result<DataValue, StatusCode> {
        Next {
            chain: self,
            index: 0,
        }
        .get_value(ctx, node)
    }

    /// Writes the value through the chain.
    pub fn set_value(
        &self,
        ctx: &AttributeContext,
        node: &Node,
        value: DataValue,
    ) -> Result<(), StatusCode> {
        Next {
            chain: self,
            index: 0,
        }
        .set_value(ctx, node, value)
    }

    /// Resolves the effective per-user access level through the chain.
    pub fn user_access_level(
        &self,
        ctx: &AttributeContext,
        node: &Node,
    ) -> Result<AccessLevel, StatusCode> {
        Next {
            chain: self,
            index: 0,
        }
        .user_access_level(ctx, node)
    }
}

/// Terminal read: a snapshot of the variable's stored value.
pub fn read_stored_value(node: &Node) -> Result<DataValue, StatusCode> {
    node.variable()
        .map(|v| v.stored_value())
        .ok_or(StatusCode::BAD_ATTRIBUTE_ID_INVALID)
}

/// Terminal write: replaces the stored value after type validation.
pub fn write_stored_value(node: &Node, value: DataValue) -> Result<(), StatusCode> {
    node.variable()
        .ok_or(StatusCode::BAD_ATTRIBUTE_ID_INVALID)?
        .set_stored_value(value)
}

// =============================================================================
// ValueLoggingDelegate
// =============================================================================

/// Pass-through stage that logs every read and write it sees.
///
/// The counters make the stage's activity observable to tests and metrics
/// without scraping log output.
#[derive(Default)]
pub struct ValueLoggingDelegate {
    reads: AtomicU64,
    writes: AtomicU64,
}

impl ValueLoggingDelegate {
    /// Creates the stage with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many reads reached this stage.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns how many writes reached this stage.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns total reads plus writes.
    pub fn records(&self) -> u64 {
        self.reads() + self.writes()
    }
}

impl AttributeDelegate for ValueLoggingDelegate {
    fn get_value(
        &self,
        ctx: &AttributeContext,
        node: &Node,
        next: Next<'_>,
    ) -> Result<DataValue, StatusCode> {
        let result = next.get_value(ctx, node);
        self.reads.fetch_add(1, Ordering::Relaxed);
        match &result {
            Ok(value) => tracing::debug!(
                node_id = %node.node_id(),
                identity = ctx.identity().unwrap_or("anonymous"),
                value = ?value.value,
                "value read"
            ),
            Err(status) => tracing::debug!(
                node_id = %node.node_id(),
                identity = ctx.identity().unwrap_or("anonymous"),
                status = %status,
                "value read failed"
            ),
        }
        result
    }

    fn set_value(
        &self,
        ctx: &AttributeContext,
        node: &Node,
        value: DataValue,
        next: Next<'_>,
    ) -> Result<(), StatusCode> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            node_id = %node.node_id(),
            identity = ctx.identity().unwrap_or("anonymous"),
            value = ?value.value,
            "value write"
        );
        next.set_value(ctx, node, value)
    }
}

// =============================================================================
// ComputedValueDelegate
// =============================================================================

/// Stage that computes the value on every read instead of consulting the
/// stored slot. Writes pass through to the rest of the chain.
pub struct ComputedValueDelegate {
    compute: Box<dyn Fn(&AttributeContext, &Node) -> Result<DataValue, StatusCode> + Send + Sync>,
}

impl ComputedValueDelegate {
    /// Creates the stage from a compute closure.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(&AttributeContext, &Node) -> Result<DataValue, StatusCode> + Send + Sync + 'static,
    {
        Self {
            compute: Box::new(compute),
        }
    }
}

impl AttributeDelegate for ComputedValueDelegate {
    fn get_value(
        &self,
        ctx: &AttributeContext,
        node: &Node,
        _next: Next<'_>,
    ) -> Result<DataValue, StatusCode> {
        (self.compute)(ctx, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use sentra_core::ids::DataTypeId;
    use sentra_core::variant::value_rank;
    use sentra_core::{NodeId, QualifiedName, Variant};

    use crate::node::VariableNodeBuilder;

    fn double_node(value: f64) -> Node {
        VariableNodeBuilder::new()
            .node_id(NodeId::numeric(2, 1))
            .browse_name(QualifiedName::new(2, "V"))
            .data_type(DataTypeId::DOUBLE)
            .value_rank(value_rank::SCALAR)
            .value(Variant::Double(value))
            .build()
            .unwrap()
    }

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl AttributeDelegate for Recorder {
        fn get_value(
            &self,
            ctx: &AttributeContext,
            node: &Node,
            next: Next<'_>,
        ) -> Result<DataValue, StatusCode> {
            self.log.lock().push(format!("{}:enter", self.name));
            let result = next.get_value(ctx, node);
            self.log.lock().push(format!("{}:exit", self.name));
            result
        }
    }

    #[test]
    fn test_first_added_is_outermost() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = DelegateChain::new(vec![
            Arc::new(Recorder {
                name: "outer",
                log: log.clone(),
            }),
            Arc::new(Recorder {
                name: "inner",
                log: log.clone(),
            }),
        ]);
        let node = double_node(1.0);

        chain.get_value(&AttributeContext::anonymous(), &node).unwrap();

        assert_eq!(
            *log.lock(),
            vec!["outer:enter", "inner:enter", "inner:exit", "outer:exit"]
        );
    }

    #[test]
    fn test_empty_chain_hits_default_store() {
        let chain = DelegateChain::new(Vec::new());
        let node = double_node(4.5);
        let value = chain.get_value(&AttributeContext::anonymous(), &node).unwrap();
        assert_eq!(value.value, Variant::Double(4.5));
    }

    #[test]
    fn test_terminal_write_rejects_type_mismatch() {
        let chain = DelegateChain::new(Vec::new());
        let node = double_node(1.0);
        let err = chain.set_value(
            &AttributeContext::anonymous(),
            &node,
            DataValue::new(Variant::Boolean(true)),
        );
        assert_eq!(err.unwrap_err(), StatusCode::BAD_TYPE_MISMATCH);
    }

    #[test]
    fn test_computed_value_short_circuits() {
        let chain = DelegateChain::single(Arc::new(ComputedValueDelegate::new(|_, _| {
            Ok(DataValue::new(Variant::Double(99.0)))
        })));
        let node = double_node(1.0);
        let value = chain.get_value(&AttributeContext::anonymous(), &node).unwrap();
        assert_eq!(value.value, Variant::Double(99.0));
        // Stored slot untouched.
        assert_eq!(node.variable().unwrap().stored_value().value, Variant::Double(1.0));
    }

    #[test]
    fn test_logging_counters() {
        let logging = Arc::new(ValueLoggingDelegate::new());
        let chain = DelegateChain::new(vec![logging.clone()]);
        let node = double_node(1.0);
        let ctx = AttributeContext::anonymous();

        chain.get_value(&ctx, &node).unwrap();
        chain
            .set_value(&ctx, &node, DataValue::new(Variant::Double(2.0)))
            .unwrap();

        assert_eq!(logging.reads(), 1);
        assert_eq!(logging.writes(), 1);
        assert_eq!(logging.records(), 2);
    }
}
