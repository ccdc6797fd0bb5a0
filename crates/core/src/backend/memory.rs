//! In-memory backend.
//!
//! Behaves like the hosted service closely enough for tests and offline demos,
//! including its user-facing error messages.

use std::{
    cmp::Ordering,
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    backend::{AuthProvider, BackendError, Collection, Direction, Document, DocumentStore, Snapshot},
    users::{AuthUser, ProviderCredential, UserId},
};

const EMAIL_IN_USE: &str = "The email address is already in use by another account.";
const BAD_EMAIL: &str = "The email address is badly formatted.";
const WEAK_PASSWORD: &str = "Password should be at least 6 characters";
const NO_SUCH_USER: &str =
    "There is no user record corresponding to this identifier. The user may have been deleted.";
const WRONG_PASSWORD: &str = "The password is invalid or the user does not have a password.";
const NOT_SIGNED_IN: &str = "No user is currently signed in.";
const INVALID_IDP: &str = "Invalid IdP response/credential.";

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug)]
struct Account {
    user: AuthUser,
    password: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    /// Accounts keyed by uid.
    accounts: FxHashMap<UserId, Account>,

    /// Provider ID token -> identity it resolves to.
    provider_identities: FxHashMap<String, AuthUser>,

    current: Option<UserId>,

    collections: FxHashMap<Collection, BTreeMap<String, Document>>,

    /// When set, every call fails with this message.
    outage: Option<String>,

    password_resets: Vec<String>,
}

impl State {
    fn check_available(&self) -> Result<(), BackendError> {
        self.outage
            .as_ref()
            .map_or(Ok(()), |message| Err(BackendError::remote(message.clone())))
    }

    fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts
            .values()
            .find(|account| account.user.email.as_deref() == Some(email))
    }

    fn collection(&mut self, collection: Collection) -> &mut BTreeMap<String, Document> {
        self.collections.entry(collection).or_default()
    }
}

/// Auth service and document store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    /// Empty backend with nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every subsequent call fail with `message` (or recover with `None`).
    pub fn set_outage(&self, message: Option<&str>) {
        self.state().outage = message.map(str::to_string);
    }

    /// Accept `id_token` for provider sign-in, resolving to `identity`.
    pub fn register_provider_identity(&self, id_token: &str, identity: AuthUser) {
        self.state()
            .provider_identities
            .insert(id_token.to_string(), identity);
    }

    /// Write a document directly, bypassing the outage switch.
    pub fn seed(&self, collection: Collection, id: &str, data: Document) {
        self.state().collection(collection).insert(id.to_string(), data);
    }

    /// Every document in a collection, in key order.
    pub fn documents(&self, collection: Collection) -> Vec<Snapshot> {
        self.state()
            .collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(id, data)| Snapshot {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Addresses that were sent a password reset, oldest first.
    pub fn password_resets(&self) -> Vec<String> {
        self.state().password_resets.clone()
    }

    /// The account signed in on this backend.
    pub fn current_user(&self) -> Option<AuthUser> {
        let state = self.state();

        state
            .current
            .as_ref()
            .and_then(|uid| state.accounts.get(uid))
            .map(|account| account.user.clone())
    }
}

fn generate_key() -> String {
    Uuid::now_v7().simple().to_string()
}

fn validate_email(email: &str) -> Result<(), BackendError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(BackendError::remote(BAD_EMAIL)),
    }
}

#[async_trait]
impl AuthProvider for MemoryBackend {
    async fn create_user(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let mut state = self.state();
        state.check_available()?;

        validate_email(email)?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BackendError::remote(WEAK_PASSWORD));
        }

        if state.account_by_email(email).is_some() {
            return Err(BackendError::remote(EMAIL_IN_USE));
        }

        let user = AuthUser {
            uid: UserId::new(generate_key()),
            email: Some(email.to_string()),
            display_name: None,
            photo_url: None,
        };

        state.accounts.insert(
            user.uid.clone(),
            Account {
                user: user.clone(),
                password: Some(password.to_string()),
            },
        );
        state.current = Some(user.uid.clone());

        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let mut state = self.state();
        state.check_available()?;

        validate_email(email)?;

        let account = state
            .account_by_email(email)
            .ok_or_else(|| BackendError::remote(NO_SUCH_USER))?;

        if account.password.as_deref() != Some(password) {
            return Err(BackendError::remote(WRONG_PASSWORD));
        }

        let user = account.user.clone();
        state.current = Some(user.uid.clone());

        Ok(user)
    }

    async fn sign_in_with_provider(
        &self,
        credential: &ProviderCredential,
    ) -> Result<AuthUser, BackendError> {
        let mut state = self.state();
        state.check_available()?;

        let identity = state
            .provider_identities
            .get(&credential.id_token)
            .cloned()
            .ok_or_else(|| BackendError::remote(INVALID_IDP))?;

        let user = state
            .accounts
            .entry(identity.uid.clone())
            .or_insert_with(|| Account {
                user: identity,
                password: None,
            })
            .user
            .clone();

        state.current = Some(user.uid.clone());

        Ok(user)
    }

    async fn update_display_name(&self, display_name: &str) -> Result<AuthUser, BackendError> {
        let mut state = self.state();
        state.check_available()?;

        let uid = state
            .current
            .clone()
            .ok_or_else(|| BackendError::remote(NOT_SIGNED_IN))?;

        let account = state
            .accounts
            .get_mut(&uid)
            .ok_or_else(|| BackendError::remote(NO_SUCH_USER))?;

        account.user.display_name = Some(display_name.to_string());

        Ok(account.user.clone())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let mut state = self.state();
        state.check_available()?;

        state.current = None;

        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), BackendError> {
        let mut state = self.state();
        state.check_available()?;

        validate_email(email)?;

        if state.account_by_email(email).is_none() {
            return Err(BackendError::remote(NO_SUCH_USER));
        }

        state.password_resets.push(email.to_string());

        Ok(())
    }
}

/// Field ordering: timestamps chronologically, other strings lexically,
/// numbers numerically. Mixed kinds compare equal.
fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::String(left), Value::String(right)) => {
            match (left.parse::<Timestamp>(), right.parse::<Timestamp>()) {
                (Ok(left), Ok(right)) => left.cmp(&right),
                _ => left.cmp(right),
            }
        }
        (Value::Number(left), Value::Number(right)) => match (left.as_f64(), right.as_f64()) {
            (Some(left), Some(right)) => left.total_cmp(&right),
            _ => Ordering::Equal,
        },
        (Value::Bool(left), Value::Bool(right)) => left.cmp(right),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn get(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, BackendError> {
        let mut state = self.state();
        state.check_available()?;

        Ok(state.collection(collection).get(id).cloned())
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> Result<(), BackendError> {
        let mut state = self.state();
        state.check_available()?;

        state.collection(collection).insert(id.to_string(), data);

        Ok(())
    }

    async fn array_union(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> Result<(), BackendError> {
        let mut state = self.state();
        state.check_available()?;

        let document = state
            .collection(collection)
            .get_mut(id)
            .ok_or_else(|| {
                BackendError::remote(format!(
                    "No document to update: {}/{id}",
                    collection.as_str()
                ))
            })?;

        let entry = document
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));

        if !entry.is_array() {
            *entry = Value::Array(Vec::new());
        }

        if let Value::Array(existing) = entry {
            for value in values {
                if !existing.contains(&value) {
                    existing.push(value);
                }
            }
        }

        Ok(())
    }

    async fn add(&self, collection: Collection, data: Document) -> Result<String, BackendError> {
        let mut state = self.state();
        state.check_available()?;

        let key = generate_key();
        state.collection(collection).insert(key.clone(), data);

        Ok(key)
    }

    async fn list_ordered(
        &self,
        collection: Collection,
        field: &str,
        direction: Direction,
    ) -> Result<Vec<Snapshot>, BackendError> {
        let mut state = self.state();
        state.check_available()?;

        let mut snapshots: Vec<Snapshot> = state
            .collection(collection)
            .iter()
            .filter(|(_, data)| data.get(field).is_some_and(|value| !value.is_null()))
            .map(|(id, data)| Snapshot {
                id: id.clone(),
                data: data.clone(),
            })
            .collect();

        snapshots.sort_by(|left, right| {
            let ordering = match (left.data.get(field), right.data.get(field)) {
                (Some(left), Some(right)) => compare_values(left, right),
                _ => Ordering::Equal,
            };

            match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });

        Ok(snapshots)
    }

    async fn get_many(
        &self,
        collection: Collection,
        ids: &[String],
    ) -> Result<Vec<Snapshot>, BackendError> {
        let mut state = self.state();
        state.check_available()?;

        let documents = state.collection(collection);

        Ok(ids
            .iter()
            .filter_map(|id| {
                documents.get(id).map(|data| Snapshot {
                    id: id.clone(),
                    data: data.clone(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_email() -> TestResult {
        let backend = MemoryBackend::new();

        backend.create_user("ana@example.test", "secret1").await?;

        let result = backend.create_user("ana@example.test", "secret2").await;

        assert!(
            matches!(result, Err(BackendError::Remote(ref message)) if message == EMAIL_IN_USE),
            "expected email-in-use, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_user_rejects_short_password_and_bad_email() {
        let backend = MemoryBackend::new();

        let short = backend.create_user("ana@example.test", "12345").await;
        let malformed = backend.create_user("not-an-email", "secret1").await;

        assert!(matches!(short, Err(BackendError::Remote(ref m)) if m == WEAK_PASSWORD));
        assert!(matches!(malformed, Err(BackendError::Remote(ref m)) if m == BAD_EMAIL));
    }

    #[tokio::test]
    async fn sign_in_checks_password() -> TestResult {
        let backend = MemoryBackend::new();
        let created = backend.create_user("ana@example.test", "secret1").await?;
        backend.sign_out().await?;

        let wrong = backend.sign_in("ana@example.test", "nope").await;
        assert!(matches!(wrong, Err(BackendError::Remote(ref m)) if m == WRONG_PASSWORD));
        assert!(backend.current_user().is_none());

        let signed_in = backend.sign_in("ana@example.test", "secret1").await?;
        assert_eq!(signed_in.uid, created.uid);
        assert_eq!(backend.current_user(), Some(created));

        Ok(())
    }

    #[tokio::test]
    async fn update_display_name_requires_session() -> TestResult {
        let backend = MemoryBackend::new();

        let result = backend.update_display_name("Ana").await;
        assert!(matches!(result, Err(BackendError::Remote(ref m)) if m == NOT_SIGNED_IN));

        backend.create_user("ana@example.test", "secret1").await?;
        let updated = backend.update_display_name("Ana").await?;

        assert_eq!(updated.display_name.as_deref(), Some("Ana"));

        Ok(())
    }

    #[tokio::test]
    async fn array_union_skips_existing_values() -> TestResult {
        let backend = MemoryBackend::new();
        backend.seed(Collection::Users, "u1", doc(json!({ "enrolledCourses": ["a"] })));

        backend
            .array_union(Collection::Users, "u1", "enrolledCourses", vec![json!("a"), json!("b")])
            .await?;

        let stored = backend.get(Collection::Users, "u1").await?.ok_or("missing")?;

        assert_eq!(stored.get("enrolledCourses"), Some(&json!(["a", "b"])));

        Ok(())
    }

    #[tokio::test]
    async fn array_union_on_missing_document_fails() {
        let backend = MemoryBackend::new();

        let result = backend
            .array_union(Collection::Users, "ghost", "enrolledCourses", vec![json!("a")])
            .await;

        assert!(
            matches!(result, Err(BackendError::Remote(ref m)) if m.starts_with("No document to update")),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_ordered_sorts_timestamps_and_skips_missing_field() -> TestResult {
        let backend = MemoryBackend::new();
        backend.seed(Collection::Courses, "old", doc(json!({ "createdAt": "2024-01-01T00:00:00Z" })));
        backend.seed(Collection::Courses, "new", doc(json!({ "createdAt": "2024-03-01T00:00:00.5Z" })));
        backend.seed(Collection::Courses, "mid", doc(json!({ "createdAt": "2024-02-01T00:00:00Z" })));
        backend.seed(Collection::Courses, "undated", doc(json!({ "title": "x" })));

        let listed = backend
            .list_ordered(Collection::Courses, "createdAt", Direction::Descending)
            .await?;

        let ids: Vec<&str> = listed.iter().map(|snapshot| snapshot.id.as_str()).collect();

        assert_eq!(ids, ["new", "mid", "old"]);

        Ok(())
    }

    #[tokio::test]
    async fn outage_fails_every_call() {
        let backend = MemoryBackend::new();
        backend.set_outage(Some("network down"));

        let result = backend.get(Collection::Courses, "x").await;

        assert!(matches!(result, Err(BackendError::Remote(ref m)) if m == "network down"));
    }

    #[tokio::test]
    async fn provider_sign_in_requires_registered_token() -> TestResult {
        let backend = MemoryBackend::new();
        let credential = ProviderCredential {
            provider: crate::users::IdentityProvider::Google,
            id_token: "token-1".to_string(),
        };

        let rejected = backend.sign_in_with_provider(&credential).await;
        assert!(matches!(rejected, Err(BackendError::Remote(ref m)) if m == INVALID_IDP));

        let identity = AuthUser {
            uid: UserId::new("g-1"),
            email: Some("gia@example.test".to_string()),
            display_name: Some("Gia".to_string()),
            photo_url: Some("https://example.test/gia.png".to_string()),
        };
        backend.register_provider_identity("token-1", identity.clone());

        let user = backend.sign_in_with_provider(&credential).await?;

        assert_eq!(user, identity);

        Ok(())
    }
}
