//! Backend contract
//!
//! The storefront delegates authentication and persistence to a hosted
//! service. These traits are the request/response surface the facade relies
//! on; adapters for concrete services live outside this crate.

use async_trait::async_trait;
use mockall::automock;
use serde_json::{Map, Value};

use crate::users::{AuthUser, ProviderCredential};

mod errors;
pub mod memory;

pub use errors::BackendError;
pub use memory::MemoryBackend;

/// Document body: a JSON object.
pub type Document = Map<String, Value>;

/// Named document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// Profiles keyed by user id.
    Users,

    /// Catalog keyed by course id.
    Courses,

    /// Append-only enrollment records with generated keys.
    Orders,
}

impl Collection {
    /// Collection name in the document store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Courses => "courses",
            Self::Orders => "orders",
        }
    }
}

/// A document together with its key.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Document key.
    pub id: String,
    /// Document fields.
    pub data: Document,
}

/// Sort direction for ordered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Oldest or smallest first.
    Ascending,
    /// Newest or largest first.
    Descending,
}

/// Remote authentication service.
///
/// Implementations track their own signed-in account; calls that act on
/// "the current user" fail when nobody is signed in.
#[automock]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create an email/password account and sign it in.
    async fn create_user(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    /// Sign in with a token from an external identity provider, creating the
    /// account on first use.
    async fn sign_in_with_provider(
        &self,
        credential: &ProviderCredential,
    ) -> Result<AuthUser, BackendError>;

    /// Set the display name of the signed-in account.
    async fn update_display_name(&self, display_name: &str) -> Result<AuthUser, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Email a password reset link.
    async fn send_password_reset(&self, email: &str) -> Result<(), BackendError>;
}

/// Remote document database.
#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document, `None` when it does not exist.
    async fn get(&self, collection: Collection, id: &str)
    -> Result<Option<Document>, BackendError>;

    /// Create or overwrite a document.
    async fn set(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> Result<(), BackendError>;

    /// Add `values` to the array at `field`, skipping ones already present.
    /// Fails when the document does not exist.
    async fn array_union(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> Result<(), BackendError>;

    /// Append a document under a generated key and return the key.
    async fn add(&self, collection: Collection, data: Document) -> Result<String, BackendError>;

    /// All documents that have `field`, sorted by it.
    async fn list_ordered(
        &self,
        collection: Collection,
        field: &str,
        direction: Direction,
    ) -> Result<Vec<Snapshot>, BackendError>;

    /// Documents with the given keys; missing keys are skipped.
    async fn get_many(
        &self,
        collection: Collection,
        ids: &[String],
    ) -> Result<Vec<Snapshot>, BackendError>;
}
