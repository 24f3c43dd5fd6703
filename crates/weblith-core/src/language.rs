//! Language identifiers for localized content.
//!
//! Resources in Weblith carry per-language content variants. A [`Language`]
//! wraps the lowercase language identifier (e.g. `"de"`, `"fr"`) used to key
//! localized value maps and to instantiate per-language index field names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A language identifier.
///
/// Ordered and hashable so it can key ordered maps; the identifier is
/// normalized to lowercase at construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Create a language from its identifier.
    pub fn new(identifier: impl AsRef<str>) -> Self {
        Self(identifier.as_ref().trim().to_lowercase())
    }

    /// The language identifier (e.g. `"de"`).
    pub fn identifier(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(identifier: &str) -> Self {
        Self::new(identifier)
    }
}

// ============================================================================
// Tests
// ============================================================================
