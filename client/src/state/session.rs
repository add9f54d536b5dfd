//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering.
//!
//! DESIGN
//! ======
//! [`TokenStore`] is plain Rust: every mutation persists the full [`Session`]
//! through a [`SessionPersistence`] port and notifies subscribers before
//! returning. [`SessionHandle`] makes one store shareable between async flows,
//! and [`SessionContext`] bridges it into a Leptos signal for rendering.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SESSION_STORAGE_KEY;
use crate::net::types::UserIdentity;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<UserIdentity>,
    pub loading: bool,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Durable storage for the serialized session.
pub trait SessionPersistence {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
}

/// On-disk envelope, versioned so the layout can evolve.
#[derive(Serialize, Deserialize)]
struct PersistedSession {
    state: Session,
    #[serde(default)]
    version: u32,
}

const PERSISTED_VERSION: u32 = 0;

/// Session persisted in `localStorage` under [`SESSION_STORAGE_KEY`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSessionStorage;

impl SessionPersistence for LocalSessionStorage {
    fn load(&self) -> Option<Session> {
        crate::util::storage::load_json::<PersistedSession>(SESSION_STORAGE_KEY)
            .filter(|p| p.version == PERSISTED_VERSION)
            .map(|p| p.state)
    }

    fn save(&self, session: &Session) {
        let envelope = PersistedSession { state: session.clone(), version: PERSISTED_VERSION };
        crate::util::storage::save_json(SESSION_STORAGE_KEY, &envelope);
    }
}

type Subscriber = Arc<dyn Fn(&Session) + Send + Sync>;

/// Process-wide holder of the [`Session`].
pub struct TokenStore<P> {
    session: Session,
    persistence: P,
    subscribers: Vec<Subscriber>,
    revision: u64,
}

impl<P: SessionPersistence> TokenStore<P> {
    /// Restore the persisted session verbatim, or start signed out.
    pub fn restore(persistence: P) -> Self {
        let session = persistence.load().unwrap_or_default();
        Self { session, persistence, subscribers: Vec::new(), revision: 0 }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Monotonic mutation counter; not persisted.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the user and clear the loading flag.
    pub fn set_user(&mut self, user: Option<UserIdentity>) {
        self.session.user = user;
        self.session.loading = false;
        self.commit();
    }

    /// Update the loading flag only.
    pub fn set_loading(&mut self, loading: bool) {
        self.session.loading = loading;
        self.commit();
    }

    /// Register a callback run synchronously after every mutation.
    ///
    /// Callbacks must not write back into the store.
    pub fn subscribe(&mut self, subscriber: impl Fn(&Session) + Send + Sync + 'static) {
        self.subscribers.push(Arc::new(subscriber));
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.persistence.save(&self.session);
        for subscriber in &self.subscribers {
            subscriber(&self.session);
        }
    }
}

/// Shareable handle to one [`TokenStore`].
///
/// Mutations go through the handle so that async flows holding a clone never
/// keep a borrow across an await point.
pub struct SessionHandle<P> {
    store: Arc<Mutex<TokenStore<P>>>,
    initializing: Arc<AtomicBool>,
}

impl<P> Clone for SessionHandle<P> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), initializing: Arc::clone(&self.initializing) }
    }
}

impl<P: SessionPersistence> SessionHandle<P> {
    pub fn new(store: TokenStore<P>) -> Self {
        Self { store: Arc::new(Mutex::new(store)), initializing: Arc::new(AtomicBool::new(false)) }
    }

    fn lock(&self) -> MutexGuard<'_, TokenStore<P>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.lock().session().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.lock().is_logged_in()
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision()
    }

    pub fn set_user(&self, user: Option<UserIdentity>) {
        self.lock().set_user(user);
    }

    pub fn set_loading(&self, loading: bool) {
        self.lock().set_loading(loading);
    }

    pub fn subscribe(&self, subscriber: impl Fn(&Session) + Send + Sync + 'static) {
        self.lock().subscribe(subscriber);
    }

    /// Claim the single initialization/refresh slot. Returns `None` if one is running.
    pub fn begin_initialization(&self) -> Option<InitializationSlot<'_, P>> {
        self.initializing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InitializationSlot { handle: self })
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing.load(Ordering::Acquire)
    }
}

/// Held for the duration of one initialization or refresh; releases on drop.
pub struct InitializationSlot<'a, P> {
    handle: &'a SessionHandle<P>,
}

impl<P> Drop for InitializationSlot<'_, P> {
    fn drop(&mut self) {
        self.handle.initializing.store(false, Ordering::Release);
    }
}

/// Session store as provided through Leptos context.
#[derive(Clone)]
pub struct SessionContext {
    pub handle: SessionHandle<LocalSessionStorage>,
    /// Mirror of the store for reactive reads.
    pub state: RwSignal<Session>,
}

impl SessionContext {
    /// Restore the browser session and wire the store into a signal.
    pub fn install() -> Self {
        let handle = SessionHandle::new(TokenStore::restore(LocalSessionStorage));
        let state = RwSignal::new(handle.session());
        handle.subscribe(move |session| state.set(session.clone()));
        Self { handle, state }
    }
}
