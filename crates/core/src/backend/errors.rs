//! Backend errors.

use thiserror::Error;

/// Failure reported by a backend call.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No backend client was configured for this session.
    #[error("backend not initialized")]
    NotInitialized,

    /// The remote service rejected or failed the call; carries its message.
    #[error("{0}")]
    Remote(String),

    /// A document did not have the expected shape.
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl BackendError {
    /// Remote failure carrying the service message.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }
}
