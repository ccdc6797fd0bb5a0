//! Firebase adapter errors.

use reqwest::StatusCode;
use skillorbit::backend::BackendError;
use thiserror::Error;

/// Errors raised while talking to the Firebase REST APIs.
#[derive(Debug, Error)]
pub enum FirebaseError {
    /// Transport failure or an unreadable body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error payload.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The response did not have the expected shape.
    #[error("unexpected response from Firebase: {0}")]
    UnexpectedResponse(String),

    /// The call needs a signed-in user.
    #[error("No user is currently signed in.")]
    NotSignedIn,
}

impl From<FirebaseError> for BackendError {
    fn from(error: FirebaseError) -> Self {
        BackendError::remote(error.to_string())
    }
}
