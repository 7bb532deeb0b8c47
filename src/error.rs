//! Error types for the Lexigraph resolution engine
//!
//! This module provides structured error definitions using thiserror,
//! with anyhow interop for error propagation at the edges.

use thiserror::Error;

/// Main error type for Lexigraph operations
#[derive(Error, Debug)]
pub enum LexigraphError {
    /// Catalog store operation failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] sqlx::Error),

    /// Extraction collaborator request failed (transport or payload shape)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Invalid term ID format
    #[error("Invalid term ID: {0}")]
    InvalidTermId(#[from] uuid::Error),

    /// Term not found in the catalog
    #[error("Term not found: {0}")]
    TermNotFound(String),

    /// Link type string outside the catalog's choice set
    #[error("Invalid link type: {0}")]
    InvalidLinkType(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Lexigraph operations
pub type Result<T> = std::result::Result<T, LexigraphError>;

/// Convert anyhow::Error to LexigraphError
impl From<anyhow::Error> for LexigraphError {
    fn from(err: anyhow::Error) -> Self {
        LexigraphError::Other(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for LexigraphError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        LexigraphError::Catalog(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LexigraphError::TermNotFound("test-id".to_string());
        assert_eq!(err.to_string(), "Term not found: test-id");
    }

    #[test]
    fn test_error_conversion() {
        let uuid_err = uuid::Uuid::parse_str("invalid");
        assert!(uuid_err.is_err());

        let lex_err: LexigraphError = uuid_err.unwrap_err().into();
        assert!(matches!(lex_err, LexigraphError::InvalidTermId(_)));
    }
}
