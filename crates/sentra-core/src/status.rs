// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Status codes.
//!
//! A [`StatusCode`] is a 32-bit word whose top two bits carry severity
//! (`00` good, `01` uncertain, `10` bad). Recoverable service outcomes are
//! reported as status codes rather than errors; the constants below cover
//! every code the address-space services produce.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 32-bit status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(u32);

impl StatusCode {
    // =========================================================================
    // Good
    // =========================================================================

    /// The operation succeeded.
    pub const GOOD: StatusCode = StatusCode(0x0000_0000);

    // =========================================================================
    // Bad
    // =========================================================================

    /// The operation failed for an unspecified reason.
    pub const BAD: StatusCode = StatusCode(0x8000_0000);
    /// An internal error occurred.
    pub const BAD_INTERNAL_ERROR: StatusCode = StatusCode(0x8002_0000);
    /// The user does not have permission for the requested operation.
    pub const BAD_USER_ACCESS_DENIED: StatusCode = StatusCode(0x8023_0000);
    /// The request has more arguments than the method signature declares.
    pub const BAD_TOO_MANY_ARGUMENTS: StatusCode = StatusCode(0x8030_0000);
    /// The node id is not syntactically or semantically valid.
    pub const BAD_NODE_ID_INVALID: StatusCode = StatusCode(0x8061_0000);
    /// The node id refers to a node that does not exist.
    pub const BAD_NODE_ID_UNKNOWN: StatusCode = StatusCode(0x8062_0000);
    /// The attribute is not supported for the specified node.
    pub const BAD_ATTRIBUTE_ID_INVALID: StatusCode = StatusCode(0x8063_0000);
    /// The access level does not allow reading the value.
    pub const BAD_NOT_READABLE: StatusCode = StatusCode(0x8068_0000);
    /// The access level does not allow writing the value.
    pub const BAD_NOT_WRITABLE: StatusCode = StatusCode(0x8069_0000);
    /// The value was out of range.
    pub const BAD_OUT_OF_RANGE: StatusCode = StatusCode(0x806A_0000);
    /// The requested operation is not supported.
    pub const BAD_NOT_SUPPORTED: StatusCode = StatusCode(0x806B_0000);
    /// A requested item was not found.
    pub const BAD_NOT_FOUND: StatusCode = StatusCode(0x806C_0000);
    /// The monitoring mode is invalid.
    pub const BAD_MONITORING_MODE_INVALID: StatusCode = StatusCode(0x806F_0000);
    /// The monitored item id does not refer to a valid monitored item.
    pub const BAD_MONITORED_ITEM_ID_INVALID: StatusCode = StatusCode(0x8070_0000);
    /// The reference type id does not refer to a valid reference type node.
    pub const BAD_REFERENCE_TYPE_ID_INVALID: StatusCode = StatusCode(0x807F_0000);
    /// The requested node id is already used by another node.
    pub const BAD_NODE_ID_EXISTS: StatusCode = StatusCode(0x8092_0000);
    /// The browse name is invalid.
    pub const BAD_BROWSE_NAME_INVALID: StatusCode = StatusCode(0x8094_0000);
    /// The type definition node id does not reference an appropriate type.
    pub const BAD_TYPE_DEFINITION_INVALID: StatusCode = StatusCode(0x8097_0000);
    /// The browse path could not be matched to a target node.
    pub const BAD_NO_MATCH: StatusCode = StatusCode(0x80A4_0000);
    /// The value supplied does not match the declared data type or rank.
    pub const BAD_TYPE_MISMATCH: StatusCode = StatusCode(0x80AB_0000);
    /// The method id does not refer to a method of the specified object.
    pub const BAD_METHOD_INVALID: StatusCode = StatusCode(0x80AC_0000);
    /// The request did not supply all required input arguments.
    pub const BAD_ARGUMENTS_MISSING: StatusCode = StatusCode(0x80AD_0000);
    /// One or more input arguments failed validation.
    pub const BAD_INVALID_ARGUMENT: StatusCode = StatusCode(0x80AE_0000);
    /// The executable attribute does not allow the method to be called.
    pub const BAD_NOT_EXECUTABLE: StatusCode = StatusCode(0x80B0_0000);

    /// Creates a status code from its raw 32-bit value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw 32-bit value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns `true` when the severity bits indicate success.
    #[inline]
    pub const fn is_good(&self) -> bool {
        self.0 & 0xC000_0000 == 0
    }

    /// Returns `true` when the severity bits indicate failure.
    #[inline]
    pub const fn is_bad(&self) -> bool {
        self.0 & 0x8000_0000 != 0
    }

    /// Returns the symbolic name for known codes.
    pub fn name(&self) -> Option<&'static str> {
        let name = match self.0 {
            0x0000_0000 => "Good",
            0x8000_0000 => "Bad",
            0x8002_0000 => "BadInternalError",
            0x8023_0000 => "BadUserAccessDenied",
            0x8030_0000 => "BadTooManyArguments",
            0x8061_0000 => "BadNodeIdInvalid",
            0x8062_0000 => "BadNodeIdUnknown",
            0x8063_0000 => "BadAttributeIdInvalid",
            0x8068_0000 => "BadNotReadable",
            0x8069_0000 => "BadNotWritable",
            0x806A_0000 => "BadOutOfRange",
            0x806B_0000 => "BadNotSupported",
            0x806C_0000 => "BadNotFound",
            0x806F_0000 => "BadMonitoringModeInvalid",
            0x8070_0000 => "BadMonitoredItemIdInvalid",
            0x807F_0000 => "BadReferenceTypeIdInvalid",
            0x8092_0000 => "BadNodeIdExists",
            0x8094_0000 => "BadBrowseNameInvalid",
            0x8097_0000 => "BadTypeDefinitionInvalid",
            0x80A4_0000 => "BadNoMatch",
            0x80AB_0000 => "BadTypeMismatch",
            0x80AC_0000 => "BadMethodInvalid",
            0x80AD_0000 => "BadArgumentsMissing",
            0x80AE_0000 => "BadInvalidArgument",
            0x80B0_0000 => "BadNotExecutable",
            _ => return None,
        };
        Some(name)
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::GOOD
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "0x{:08X}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_bits() {
        assert!(StatusCode::GOOD.is_good());
        assert!(!StatusCode::GOOD.is_bad());
        assert!(StatusCode::BAD_NOT_WRITABLE.is_bad());
        assert!(!StatusCode::BAD_NOT_WRITABLE.is_good());
    }

    #[test]
    fn test_display_known_and_unknown() {
        assert_eq!(StatusCode::BAD_TYPE_MISMATCH.to_string(), "BadTypeMismatch");
        assert_eq!(StatusCode::new(0x8123_0000).to_string(), "0x81230000");
    }

    #[test]
    fn test_default_is_good() {
        assert_eq!(StatusCode::default(), StatusCode::GOOD);
    }
}
