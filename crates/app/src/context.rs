//! App Context

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use serde_json::Value;
use skillorbit::{
    backend::{Collection, MemoryBackend},
    courses::Course,
    fixtures::{CoursesFixture, FixtureError},
    storefront::Storefront,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    firebase::{FirebaseClient, FirebaseConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load the sample catalog")]
    Fixture(#[from] FixtureError),

    #[error("failed to encode course {0}")]
    Encode(String, #[source] serde_json::Error),
}

/// Everything a command needs.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub storefront: Arc<Storefront>,
}

impl AppContext {
    /// Build the context the configuration asks for: the in-memory demo,
    /// Firebase when configured, and an offline storefront otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when the demo catalog cannot be loaded.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        if config.demo {
            return Self::demo();
        }

        match config.firebase() {
            Some(firebase) => Ok(Self::firebase(firebase)),
            None => {
                warn!("Firebase is not configured; remote calls will fail");

                Ok(Self::offline())
            }
        }
    }

    pub fn firebase(config: FirebaseConfig) -> Self {
        info!(project = %config.project_id, "using Firebase");

        let client = Arc::new(FirebaseClient::new(config));

        Self {
            storefront: Arc::new(Storefront::new(client.clone(), client)),
        }
    }

    pub fn offline() -> Self {
        Self {
            storefront: Arc::new(Storefront::offline()),
        }
    }

    /// In-memory backend holding the sample catalog.
    ///
    /// # Errors
    ///
    /// Returns an error when the sample catalog cannot be loaded.
    pub fn demo() -> Result<Self, AppInitError> {
        let backend = Arc::new(MemoryBackend::new());

        seed_catalog(&backend, &CoursesFixture::sample()?.courses, Timestamp::now())?;

        info!("using the in-memory demo backend");

        Ok(Self {
            storefront: Arc::new(Storefront::new(backend.clone(), backend)),
        })
    }
}

/// Store `courses` so that later entries are newer, ending at `newest`.
///
/// # Errors
///
/// Returns an error when a course cannot be encoded as a document.
pub fn seed_catalog(
    backend: &MemoryBackend,
    courses: &[Course],
    newest: Timestamp,
) -> Result<(), AppInitError> {
    let mut created_at = newest;

    for course in courses.iter().rev() {
        let mut course = course.clone();
        course.created_at = course.created_at.or(Some(created_at));
        created_at = created_at
            .checked_sub(SignedDuration::from_hours(24))
            .unwrap_or(Timestamp::MIN);

        let encoded = serde_json::to_value(&course)
            .map_err(|error| AppInitError::Encode(course.id.to_string(), error))?;

        if let Value::Object(mut document) = encoded {
            document.remove("id");
            backend.seed(Collection::Courses, course.id.as_str(), document);
        }
    }

    Ok(())
}
