// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity-based access restriction.

use std::collections::HashMap;

use sentra_core::{AccessLevel, DataValue, StatusCode};

use crate::delegate::{AttributeContext, AttributeDelegate, Next};
use crate::node::Node;

// =============================================================================
// AccessPolicy
// =============================================================================

/// Maps identities onto access levels.
///
/// Resolution is pure: the same identity always yields the same level.
/// Identities without an explicit rule, including anonymous requests, fall
/// back to the default level.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: HashMap<String, AccessLevel>,
    default_level: AccessLevel,
}

impl AccessPolicy {
    /// Creates a policy with the given default level and no explicit rules.
    pub fn new(default_level: AccessLevel) -> Self {
        Self {
            rules: HashMap::new(),
            default_level,
        }
    }

    /// Creates a policy denying everyone not explicitly allowed.
    pub fn deny_by_default() -> Self {
        Self::new(AccessLevel::NONE)
    }

    /// Adds an explicit rule for one identity.
    pub fn allow(mut self, identity: impl Into<String>, level: AccessLevel) -> Self {
        self.rules.insert(identity.into(), level);
        self
    }

    /// Resolves the access level for an identity.
    pub fn resolve(&self, identity: Option<&str>) -> AccessLevel {
        identity
            .and_then(|id| self.rules.get(id).copied())
            .unwrap_or(self.default_level)
    }
}

// =============================================================================
// RestrictedAccessDelegate
// =============================================================================

/// Delegate stage that enforces an [`AccessPolicy`].
///
/// A read or write whose identity resolves below the required level is
/// rejected with `BadUserAccessDenied` before any inner stage runs, so denied
/// attempts produce no inner side effects. Install this stage first
/// (outermost) when composing chains.
pub struct RestrictedAccessDelegate {
    policy: AccessPolicy,
}

impl RestrictedAccessDelegate {
    /// Creates the stage from a policy.
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy.
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }
}

impl AttributeDelegate for RestrictedAccessDelegate {
    fn get_value(
        &self,
        ctx: &AttributeContext,
        node: &Node,
        next: Next<'_>,
    ) -> Result<DataValue, StatusCode> {
        if !self.policy.resolve(ctx.identity()).can_read() {
            return Err(StatusCode::BAD_USER_ACCESS_DENIED);
        }
        next.get_value(ctx, node)
    }

    fn set_value(
        &self,
        ctx: &AttributeContext,
        node: &Node,
        value: DataValue,
        next: Next<'_>,
    ) -> Result<(), StatusCode> {
        if !self.policy.resolve(ctx.identity()).can_write() {
            return Err(StatusCode::BAD_USER_ACCESS_DENIED);
        }
        next.set_value(ctx, node, value)
    }

    fn user_access_level(
        &self,
        ctx: &AttributeContext,
        node: &Node,
        next: Next<'_>,
    ) -> Result<AccessLevel, StatusCode> {
        // Never widen beyond what the rest of the chain reports.
        let inner = next.user_access_level(ctx, node)?;
        Ok(inner.intersect(self.policy.resolve(ctx.identity())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use sentra_core::ids::DataTypeId;
    use sentra_core::variant::value_rank;
    use sentra_core::{NodeId, QualifiedName, Variant};

    use crate::delegate::DelegateChain;
    use crate::node::VariableNodeBuilder;

    fn admin_only_chain() -> DelegateChain {
        let policy = AccessPolicy::deny_by_default().allow("admin", AccessLevel::READ_WRITE);
        DelegateChain::single(Arc::new(RestrictedAccessDelegate::new(policy)))
    }

    fn double_node() -> Node {
        VariableNodeBuilder::new()
            .node_id(NodeId::numeric(2, 1))
            .browse_name(QualifiedName::new(2, "Secret"))
            .data_type(DataTypeId::DOUBLE)
            .value_rank(value_rank::SCALAR)
            .value(Variant::Double(7.0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_policy_resolution() {
        let policy = AccessPolicy::new(AccessLevel::READ_ONLY)
            .allow("admin", AccessLevel::READ_WRITE)
            .allow("intruder", AccessLevel::NONE);

        assert_eq!(policy.resolve(Some("admin")), AccessLevel::READ_WRITE);
        assert_eq!(policy.resolve(Some("intruder")), AccessLevel::NONE);
        assert_eq!(policy.resolve(Some("unknown")), AccessLevel::READ_ONLY);
        assert_eq!(policy.resolve(None), AccessLevel::READ_ONLY);
    }

    #[test]
    fn test_anonymous_denied() {
        let chain = admin_only_chain();
        let node = double_node();
        let err = chain.get_value(&AttributeContext::anonymous(), &node);
        assert_eq!(err.unwrap_err(), StatusCode::BAD_USER_ACCESS_DENIED);
    }

    #[test]
    fn test_admin_allowed() {
        let chain = admin_only_chain();
        let node = double_node();
        let ctx = AttributeContext::with_identity("admin");

        let value = chain.get_value(&ctx, &node).unwrap();
        assert_eq!(value.value, Variant::Double(7.0));
        assert!(chain
            .set_value(&ctx, &node, DataValue::new(Variant::Double(8.0)))
            .is_ok());
    }

    #[test]
    fn test_user_access_level_intersects() {
        let chain = admin_only_chain();
        let node = double_node();

        let anonymous = chain
            .user_access_level(&AttributeContext::anonymous(), &node)
            .unwrap();
        assert_eq!(anonymous, AccessLevel::NONE);

        let admin = chain
            .user_access_level(&AttributeContext::with_identity("admin"), &node)
            .unwrap();
        // The node itself is read-only, so admin does not get write back.
        assert_eq!(admin, AccessLevel::READ_ONLY);
    }
}
