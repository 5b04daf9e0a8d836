//! Error types for the vibe matcher CLI.

use thiserror::Error;
use vibe_matcher::VibeError;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Catalog not initialized")]
    NotInitialized,

    #[error(transparent)]
    Vibe(#[from] VibeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Vibe(VibeError::ExternalService(_)) => 3,
            CliError::Vibe(VibeError::InvalidConfig(_))
            | CliError::Vibe(VibeError::InvalidCatalog(_))
            | CliError::Vibe(VibeError::Json(_)) => 2,
            _ => 1,
        }
    }
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
