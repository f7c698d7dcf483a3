//! Error types for schemaforge.
//!
//! The compilers themselves are total and never fail; everything here
//! belongs to the boundary: loading schemas, applying edits, talking to a
//! generator and writing exports.

use thiserror::Error;

/// The main error type for schemaforge operations.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The schema generator failed or returned a non-success response.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// An operation needed a current schema but the workspace is empty.
    #[error("No schema loaded")]
    NoSchema,

    /// An edit named an entity that does not exist.
    #[error("{kind} not found: '{name}'")]
    NotFound { kind: &'static str, name: String },

    /// An edit was structurally invalid (e.g. a duplicate table name).
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed schema JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed config file.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ForgeError {
    /// Create a not-found error for the given entity kind.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create an invalid-edit error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidEdit(message.into())
    }
}

/// Result type alias for schemaforge operations.
pub type ForgeResult<T> = Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ForgeError::not_found("Table", "users");
        assert_eq!(err.to_string(), "Table not found: 'users'");
    }

    #[test]
    fn test_generation_error_display() {
        let err = ForgeError::Generation("rate limited".to_string());
        assert_eq!(err.to_string(), "Generation failed: rate limited");
    }
}
