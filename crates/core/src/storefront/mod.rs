//! Storefront facade
//!
//! One explicitly constructed client per page session. Every remote failure is
//! caught here and reported as an [`Outcome`] failure or a fail-closed default;
//! nothing propagates to the caller as an error.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    backend::{AuthProvider, BackendError, Collection, Direction, Document, DocumentStore, Snapshot},
    clock::{Clock, SystemClock},
    courses::{Course, CourseId},
    users::{
        AuthUser, Order, OrderId, OrderStatus, ProviderCredential, User, UserId, UserProfile,
    },
};

mod outcome;
mod session;

pub use outcome::Outcome;
pub use session::Subscription;

use session::Session;

const ENROLLED_COURSES_FIELD: &str = "enrolledCourses";
const CREATED_AT_FIELD: &str = "createdAt";

#[derive(Clone)]
struct Remote {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
}

/// Client-side facade over the hosted auth service and document store.
pub struct Storefront {
    remote: Option<Remote>,
    clock: Arc<dyn Clock>,
    session: Session,
}

impl Storefront {
    /// Facade backed by the given services.
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            remote: Some(Remote { auth, store }),
            clock: Arc::new(SystemClock),
            session: Session::default(),
        }
    }

    /// Facade with no backend; every remote call reports "backend not
    /// initialized" or its fail-closed default.
    pub fn offline() -> Self {
        Self {
            remote: None,
            clock: Arc::new(SystemClock),
            session: Session::default(),
        }
    }

    /// Use `clock` for document timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Whether a backend is attached.
    pub fn is_online(&self) -> bool {
        self.remote.is_some()
    }

    fn remote(&self) -> Result<&Remote, BackendError> {
        self.remote.as_ref().ok_or(BackendError::NotInitialized)
    }

    // --- Auth ---

    /// Create an account, set its display name and write its profile.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Outcome<AuthUser> {
        self.try_sign_up(email, password, display_name).await.into()
    }

    async fn try_sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthUser, BackendError> {
        let remote = self.remote()?;

        let created = remote.auth.create_user(email, password).await?;
        self.session.change(Some(&created));

        let user = remote.auth.update_display_name(display_name).await?;
        self.session.refresh(user.clone());

        let profile = UserProfile::new_member(&user, self.clock.now());

        remote
            .store
            .set(Collection::Users, user.uid.as_str(), to_document(&profile)?)
            .await?;

        debug!(uid = %user.uid, "created account");

        Ok(user)
    }

    /// Email and password sign-in.
    pub async fn sign_in(&self, email: &str, password: &str) -> Outcome<AuthUser> {
        self.try_sign_in(email, password).await.into()
    }

    async fn try_sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let user = self.remote()?.auth.sign_in(email, password).await?;

        self.session.change(Some(&user));

        Ok(user)
    }

    /// Sign in with an identity-provider token. A profile is written the
    /// first time the account is seen.
    pub async fn sign_in_with_provider(&self, credential: &ProviderCredential) -> Outcome<AuthUser> {
        self.try_sign_in_with_provider(credential).await.into()
    }

    async fn try_sign_in_with_provider(
        &self,
        credential: &ProviderCredential,
    ) -> Result<AuthUser, BackendError> {
        let remote = self.remote()?;

        let user = remote.auth.sign_in_with_provider(credential).await?;
        self.session.change(Some(&user));

        let existing = remote
            .store
            .get(Collection::Users, user.uid.as_str())
            .await?;

        if existing.is_none() {
            let profile = UserProfile::new_member(&user, self.clock.now());

            remote
                .store
                .set(Collection::Users, user.uid.as_str(), to_document(&profile)?)
                .await?;
        }

        Ok(user)
    }

    /// End the session. The cached user is kept when the backend refuses.
    pub async fn sign_out(&self) -> Outcome<()> {
        self.try_sign_out().await.into()
    }

    async fn try_sign_out(&self) -> Result<(), BackendError> {
        self.remote()?.auth.sign_out().await?;

        self.session.change(None);

        Ok(())
    }

    /// Ask the auth service to mail a password reset link.
    pub async fn send_password_reset(&self, email: &str) -> Outcome<()> {
        self.try_send_password_reset(email).await.into()
    }

    async fn try_send_password_reset(&self, email: &str) -> Result<(), BackendError> {
        self.remote()?.auth.send_password_reset(email).await
    }

    /// The signed-in user as last reported, without a network call.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.session.current()
    }

    /// Observe sign-in and sign-out. The observer runs once immediately with
    /// the current user, then after every change until the handle is dropped.
    pub fn subscribe(
        &self,
        observer: impl Fn(Option<&AuthUser>) + Send + Sync + 'static,
    ) -> Subscription {
        self.session.subscribe(Arc::new(observer))
    }

    // --- Profiles ---

    /// Whether the user's profile carries the admin role. Any failure or a
    /// missing profile counts as "not an admin".
    pub async fn is_admin(&self, user_id: &UserId) -> bool {
        match self.try_get_user(user_id).await {
            Ok(user) => user.is_some_and(|user| user.profile.is_admin()),
            Err(error) => {
                debug!(%user_id, "admin check failed: {error}");
                false
            }
        }
    }

    /// Profile for `user_id`; absent when missing or unreadable.
    pub async fn get_user(&self, user_id: &UserId) -> Option<User> {
        self.try_get_user(user_id).await.unwrap_or_else(|error| {
            error!(%user_id, "Error getting user: {error}");
            None
        })
    }

    async fn try_get_user(&self, user_id: &UserId) -> Result<Option<User>, BackendError> {
        let document = self
            .remote()?
            .store
            .get(Collection::Users, user_id.as_str())
            .await?;

        document
            .map(|data| {
                from_snapshot(Snapshot {
                    id: user_id.to_string(),
                    data,
                })
            })
            .transpose()
    }

    // --- Catalog ---

    /// Every course, newest first. Empty on failure.
    pub async fn get_courses(&self) -> Vec<Course> {
        self.try_get_courses().await.unwrap_or_else(|error| {
            error!("Error getting courses: {error}");
            Vec::new()
        })
    }

    async fn try_get_courses(&self) -> Result<Vec<Course>, BackendError> {
        let snapshots = self
            .remote()?
            .store
            .list_ordered(Collection::Courses, CREATED_AT_FIELD, Direction::Descending)
            .await?;

        Ok(parse_courses(snapshots))
    }

    /// A single course; absent when missing or on failure.
    pub async fn get_course(&self, course_id: &CourseId) -> Option<Course> {
        self.try_get_course(course_id).await.unwrap_or_else(|error| {
            error!(%course_id, "Error getting course: {error}");
            None
        })
    }

    async fn try_get_course(&self, course_id: &CourseId) -> Result<Option<Course>, BackendError> {
        let document = self
            .remote()?
            .store
            .get(Collection::Courses, course_id.as_str())
            .await?;

        document
            .map(|data| {
                from_snapshot(Snapshot {
                    id: course_id.to_string(),
                    data,
                })
            })
            .transpose()
    }

    /// Courses the user is enrolled in. Empty when the user is unknown, has
    /// no enrollments, or on failure.
    pub async fn get_user_courses(&self, user_id: &UserId) -> Vec<Course> {
        self.try_get_user_courses(user_id)
            .await
            .unwrap_or_else(|error| {
                error!(%user_id, "Error getting user courses: {error}");
                Vec::new()
            })
    }

    async fn try_get_user_courses(&self, user_id: &UserId) -> Result<Vec<Course>, BackendError> {
        let Some(user) = self.try_get_user(user_id).await? else {
            return Ok(Vec::new());
        };

        if user.profile.enrolled_courses.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = user
            .profile
            .enrolled_courses
            .into_iter()
            .map(CourseId::into_string)
            .collect();

        let snapshots = self
            .remote()?
            .store
            .get_many(Collection::Courses, &ids)
            .await?;

        Ok(parse_courses(snapshots))
    }

    // --- Enrollment ---

    /// Add the course to the user's enrolled set and record an order.
    ///
    /// The set update is idempotent; the order log is not, so repeated calls
    /// record one order each. Succeeds with the key of the new order.
    pub async fn enroll(&self, user_id: &UserId, course_id: &CourseId) -> Outcome<OrderId> {
        self.try_enroll(user_id, course_id).await.into()
    }

    async fn try_enroll(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<OrderId, BackendError> {
        let remote = self.remote()?;

        remote
            .store
            .array_union(
                Collection::Users,
                user_id.as_str(),
                ENROLLED_COURSES_FIELD,
                vec![Value::String(course_id.to_string())],
            )
            .await?;

        let order = Order {
            user_id: user_id.clone(),
            course_id: course_id.clone(),
            status: OrderStatus::Completed,
            created_at: self.clock.now(),
        };

        let order_id = OrderId::new(
            remote
                .store
                .add(Collection::Orders, to_document(&order)?)
                .await?,
        );

        debug!(%user_id, %course_id, order = %order_id, "enrolled");

        Ok(order_id)
    }
}

impl Debug for Storefront {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Storefront")
            .field("online", &self.is_online())
            .field("clock", &self.clock)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn to_document<T: Serialize>(value: &T) -> Result<Document, BackendError> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        _ => Err(BackendError::Malformed(serde::ser::Error::custom(
            "expected a JSON object",
        ))),
    }
}

fn from_snapshot<T: DeserializeOwned>(snapshot: Snapshot) -> Result<T, BackendError> {
    let mut data = snapshot.data;
    data.insert("id".to_string(), Value::String(snapshot.id));

    Ok(serde_json::from_value(Value::Object(data))?)
}

/// Parse course documents, skipping (and logging) ones that do not fit.
fn parse_courses(snapshots: Vec<Snapshot>) -> Vec<Course> {
    snapshots
        .into_iter()
        .filter_map(|snapshot| {
            let id = snapshot.id.clone();

            from_snapshot(snapshot)
                .map_err(|error| warn!(course_id = %id, "skipping malformed course: {error}"))
                .ok()
        })
        .collect()
}
