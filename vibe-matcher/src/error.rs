//! Error types for vibe-matcher

use thiserror::Error;

/// Errors that can occur while building the catalog or matching queries
#[derive(Debug, Error)]
pub enum VibeError {
    /// Embedding call failed or returned a malformed vector
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Catalog input record is unusable
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Bad endpoint or matching configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VibeError {
    /// Create an external service error
    pub fn external_service(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    /// Create an invalid catalog error
    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the embedding service is to blame
    pub fn is_external_service(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}

/// Result type for vibe-matcher operations
pub type Result<T> = std::result::Result<T, VibeError>;
