// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Access-level bitmask.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

/// Bitmask describing which value operations a variable permits.
///
/// The static `accessLevel` attribute constrains every caller; the effective
/// `userAccessLevel` may be narrowed further per identity by an access
/// policy, never widened beyond the static level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessLevel(u8);

impl AccessLevel {
    /// No value access.
    pub const NONE: AccessLevel = AccessLevel(0);
    /// The current value may be read.
    pub const CURRENT_READ: AccessLevel = AccessLevel(0x01);
    /// The current value may be written.
    pub const CURRENT_WRITE: AccessLevel = AccessLevel(0x02);
    /// Read-only access.
    pub const READ_ONLY: AccessLevel = AccessLevel(0x01);
    /// Write-only access.
    pub const WRITE_ONLY: AccessLevel = AccessLevel(0x02);
    /// Full read/write access.
    pub const READ_WRITE: AccessLevel = AccessLevel(0x03);

    /// Creates an access level from raw bits.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns `true` when every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(&self, other: AccessLevel) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` when reads are permitted.
    #[inline]
    pub const fn can_read(&self) -> bool {
        self.contains(Self::CURRENT_READ)
    }

    /// Returns `true` when writes are permitted.
    #[inline]
    pub const fn can_write(&self) -> bool {
        self.contains(Self::CURRENT_WRITE)
    }

    /// Returns the intersection of two levels.
    #[inline]
    pub const fn intersect(&self, other: AccessLevel) -> AccessLevel {
        AccessLevel(self.0 & other.0)
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        Self::READ_ONLY
    }
}

impl BitOr for AccessLevel {
    type Output = AccessLevel;

    fn bitor(self, rhs: Self) -> Self::Output {
        AccessLevel(self.0 | rhs.0)
    }
}

impl BitAnd for AccessLevel {
    type Output = AccessLevel;

    fn bitand(self, rhs: Self) -> Self::Output {
        AccessLevel(self.0 & rhs.0)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.can_read(), self.can_write()) {
            (true, true) => write!(f, "ReadWrite"),
            (true, false) => write!(f, "ReadOnly"),
            (false, true) => write!(f, "WriteOnly"),
            (false, false) => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        assert!(AccessLevel::READ_WRITE.contains(AccessLevel::CURRENT_READ));
        assert!(AccessLevel::READ_WRITE.contains(AccessLevel::CURRENT_WRITE));
        assert!(!AccessLevel::READ_ONLY.contains(AccessLevel::CURRENT_WRITE));
        assert!(AccessLevel::NONE.contains(AccessLevel::NONE));
    }

    #[test]
    fn test_intersect_never_widens() {
        let narrowed = AccessLevel::READ_WRITE.intersect(AccessLevel::READ_ONLY);
        assert_eq!(narrowed, AccessLevel::READ_ONLY);
        let denied = AccessLevel::WRITE_ONLY.intersect(AccessLevel::READ_ONLY);
        assert_eq!(denied, AccessLevel::NONE);
    }

    #[test]
    fn test_display() {
        assert_eq!(AccessLevel::READ_WRITE.to_string(), "ReadWrite");
        assert_eq!(AccessLevel::NONE.to_string(), "None");
    }
}
