//! Common error types.

use thiserror::Error;

/// Error type for everything around the player core.
///
/// Player operations themselves never fail; this covers the ambient
/// surfaces (option parsing, host lookups, the command line).
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Options JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mount point not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type PlayerResult<T> = Result<T, PlayerError>;

impl PlayerError {
    pub fn invalid_options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }
}
