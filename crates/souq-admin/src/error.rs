//! Error types for the admin screens.

use thiserror::Error;

/// Admin-specific errors.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Table configuration error.
    #[error("grid error: {0}")]
    Grid(#[from] souq_grid::GridError),

    /// Payload or cache entry could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The API answered with `success = false`.
    #[error("API error: {0}")]
    Api(String),

    /// No screen is registered under this name.
    #[error("unknown resource: {0}")]
    UnknownResource(String),
}

/// Result type alias for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
