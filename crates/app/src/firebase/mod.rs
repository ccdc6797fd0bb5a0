//! Firebase REST adapter.
//!
//! Implements the storefront's [`AuthProvider`](skillorbit::backend::AuthProvider)
//! with the Identity Toolkit API and its
//! [`DocumentStore`](skillorbit::backend::DocumentStore) with the Firestore
//! REST API.

use std::sync::{Mutex, MutexGuard, PoisonError};

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};
use skillorbit::users::AuthUser;
use tracing::debug;

mod auth;
mod errors;
mod firestore;
pub mod values;

pub use errors::FirebaseError;

/// Public Identity Toolkit endpoint.
pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Public Firestore endpoint.
pub const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Connection settings for one Firebase project.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Web API key.
    pub api_key: String,

    /// Project id, e.g. `skillorbit-prod`.
    pub project_id: String,

    /// Identity Toolkit base URL.
    pub identity_url: String,

    /// Firestore base URL.
    pub firestore_url: String,
}

impl FirebaseConfig {
    /// Settings for the public endpoints.
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            identity_url: IDENTITY_TOOLKIT_URL.to_string(),
            firestore_url: FIRESTORE_URL.to_string(),
        }
    }

    /// Root of the project's default database, as used in document names.
    pub fn database_path(&self) -> String {
        format!("projects/{}/databases/(default)", self.project_id)
    }

    /// Full document name, e.g. `projects/p/databases/(default)/documents/users/u1`.
    pub fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/documents/{collection}/{id}", self.database_path())
    }

    fn documents_url(&self) -> String {
        format!("{}/{}/documents", self.firestore_url, self.database_path())
    }

    fn accounts_url(&self, method: &str) -> String {
        format!("{}/accounts:{method}", self.identity_url)
    }
}

/// Signed-in account and the ID token that authorizes Firestore calls.
#[derive(Debug, Clone)]
struct IdSession {
    user: AuthUser,
    id_token: String,
}

/// Firebase client holding at most one signed-in account.
#[derive(Debug)]
pub struct FirebaseClient {
    config: FirebaseConfig,
    http: Client,
    session: Mutex<Option<IdSession>>,
}

impl FirebaseClient {
    /// Create a client with no signed-in account.
    #[must_use]
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            config,
            http: Client::new(),
            session: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    fn session(&self) -> MutexGuard<'_, Option<IdSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn id_token(&self) -> Option<String> {
        self.session().as_ref().map(|session| session.id_token.clone())
    }

    /// Attach the ID token, when signed in.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.id_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and decode its JSON body, turning error payloads into
    /// [`FirebaseError::Api`].
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, FirebaseError> {
        let response = request.send().await?;
        let status = response.status();

        debug!(%status, url = %response.url(), "firebase response");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(FirebaseError::Api {
                status,
                message: error_message(&text),
            });
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Human-readable message from an error body. Identity Toolkit error codes
/// are translated; anything else is passed through.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => auth::describe_error(&envelope.error.message),
        Err(_) if body.trim().is_empty() => "request failed".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
