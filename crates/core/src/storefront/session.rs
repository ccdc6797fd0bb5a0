//! Cached auth session and its observers.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::{
        Arc, Mutex, MutexGuard, PoisonError, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

use rustc_hash::FxHashMap;

use crate::users::AuthUser;

type Observer = Arc<dyn Fn(Option<&AuthUser>) + Send + Sync>;

type Observers = Mutex<FxHashMap<u64, Observer>>;

#[derive(Default)]
pub(crate) struct Session {
    current: Mutex<Option<AuthUser>>,
    observers: Arc<Observers>,
    next_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Session {
    pub(crate) fn current(&self) -> Option<AuthUser> {
        lock(&self.current).clone()
    }

    /// Replace the cached user and notify observers.
    pub(crate) fn change(&self, user: Option<&AuthUser>) {
        *lock(&self.current) = user.cloned();

        self.notify(user);
    }

    /// Replace the cached user without notifying (profile edits).
    pub(crate) fn refresh(&self, user: AuthUser) {
        *lock(&self.current) = Some(user);
    }

    pub(crate) fn subscribe(&self, observer: Observer) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        observer(self.current().as_ref());

        lock(&self.observers).insert(id, observer);

        Subscription {
            id,
            observers: Arc::downgrade(&self.observers),
        }
    }

    fn notify(&self, user: Option<&AuthUser>) {
        // Snapshot first so observers may (un)subscribe from inside the callback.
        let observers: Vec<Observer> = lock(&self.observers).values().cloned().collect();

        for observer in observers {
            observer(user);
        }
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Session")
            .field("current", &self.current())
            .field("observers", &lock(&self.observers).len())
            .finish_non_exhaustive()
    }
}

/// Handle for an auth-state observer. Dropping it unregisters the observer.
#[must_use = "dropping the subscription unregisters the observer immediately"]
pub struct Subscription {
    id: u64,
    observers: Weak<Observers>,
}

impl Subscription {
    /// Stop receiving auth-state changes.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade() {
            lock(&observers).remove(&self.id);
        }
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
