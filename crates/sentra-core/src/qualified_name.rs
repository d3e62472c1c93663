// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Naming value types: [`QualifiedName`] and [`LocalizedText`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A name qualified by a namespace index.
///
/// Browse names are qualified so two namespaces may use the same plain name
/// without colliding. Browse path resolution matches on both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Namespace index the name belongs to.
    pub namespace_index: u16,
    /// The plain name.
    pub name: String,
}

impl QualifiedName {
    /// Creates a qualified name.
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }

    /// Creates a name in the standard namespace (ns=0).
    pub fn standard(name: impl Into<String>) -> Self {
        Self::new(0, name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.namespace_index, self.name)
        }
    }
}

/// Human-readable text with an optional locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Locale identifier such as `en`; `None` when unspecified.
    pub locale: Option<String>,
    /// The display text.
    pub text: String,
}

impl LocalizedText {
    /// Creates localized text with an explicit locale.
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            text: text.into(),
        }
    }

    /// Creates text with no locale tag.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            locale: None,
            text: text.into(),
        }
    }

    /// Creates English text.
    pub fn english(text: impl Into<String>) -> Self {
        Self::new("en", text)
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for LocalizedText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_display() {
        assert_eq!(QualifiedName::standard("Objects").to_string(), "Objects");
        assert_eq!(QualifiedName::new(2, "Motor").to_string(), "2:Motor");
    }

    #[test]
    fn test_qualified_name_equality_includes_namespace() {
        assert_ne!(QualifiedName::new(1, "X"), QualifiedName::new(2, "X"));
        assert_eq!(QualifiedName::new(2, "X"), QualifiedName::new(2, "X"));
    }

    #[test]
    fn test_localized_text() {
        let text = LocalizedText::english("Hello");
        assert_eq!(text.locale.as_deref(), Some("en"));
        assert_eq!(text.to_string(), "Hello");
    }
}
