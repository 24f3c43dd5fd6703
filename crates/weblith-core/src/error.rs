//! Error types for weblith-core.

use thiserror::Error;

/// Result type alias for Weblith operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the Weblith platform crates.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A caller violated an API contract (e.g. a blank metadata entry name).
    #[error("contract violation: {0}")]
    Contract(String),

    /// An operation against a collaborator failed.
    #[error("operation failed: {0}")]
    Operation(String),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a contract-violation error.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract(message.into())
    }

    /// Create an operation error.
    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation(message.into())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_display() {
        let err = Error::contract("entry name must not be blank");
        assert_eq!(
            err.to_string(),
            "contract violation: entry name must not be blank"
        );
    }

    #[test]
    fn test_operation_display() {
        let err = Error::operation("index unavailable");
        assert_eq!(err.to_string(), "operation failed: index unavailable");
    }

    #[test]
    fn test_serialization_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
