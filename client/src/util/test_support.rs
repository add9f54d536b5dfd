//! In-memory fakes for the session ports, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::sync::{Arc, Mutex};

use jsonwebtoken::{EncodingKey, Header, encode};

use crate::net::types::CredentialPair;
use crate::state::session::{Session, SessionPersistence};
use crate::util::credentials::CredentialStore;
use crate::util::session_init::TokenRefresher;

/// Build a compact HS256 JWT carrying `claims`, signed with a key the client never sees.
pub fn token_with_claims(claims: &serde_json::Value) -> String {
    encode(&Header::default(), claims, &EncodingKey::from_secret(b"server-side-secret")).unwrap()
}

/// Access token for user `id`/`name` expiring at `exp`.
pub fn access_token(id: u64, name: &str, exp: i64) -> String {
    token_with_claims(&serde_json::json!({
        "token_type": "access",
        "exp": exp,
        "user_id": id,
        "username": name,
    }))
}

/// Session persistence that records every save.
#[derive(Clone, Default)]
pub struct MemorySessionStorage {
    pub stored: Arc<Mutex<Option<Session>>>,
    pub saves: Arc<Mutex<Vec<Session>>>,
}

impl MemorySessionStorage {
    pub fn with(session: Session) -> Self {
        let storage = Self::default();
        *storage.stored.lock().unwrap() = Some(session);
        storage
    }

    pub fn last_saved(&self) -> Option<Session> {
        self.stored.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }
}

impl SessionPersistence for MemorySessionStorage {
    fn load(&self) -> Option<Session> {
        self.stored.lock().unwrap().clone()
    }

    fn save(&self, session: &Session) {
        *self.stored.lock().unwrap() = Some(session.clone());
        self.saves.lock().unwrap().push(session.clone());
    }
}

#[derive(Default)]
pub struct MemoryCredentials {
    pub pair: RefCell<Option<CredentialPair>>,
    pub cleared: Cell<usize>,
}

impl MemoryCredentials {
    pub fn with(pair: CredentialPair) -> Self {
        Self { pair: RefCell::new(Some(pair)), cleared: Cell::new(0) }
    }
}

impl CredentialStore for MemoryCredentials {
    fn load(&self) -> Option<CredentialPair> {
        self.pair.borrow().clone()
    }

    fn save(&self, pair: &CredentialPair) {
        *self.pair.borrow_mut() = Some(pair.clone());
    }

    fn clear(&self) {
        *self.pair.borrow_mut() = None;
        self.cleared.set(self.cleared.get() + 1);
    }
}

/// Refresher returning a canned response and counting calls.
#[derive(Default)]
pub struct FakeRefresher {
    pub response: Option<CredentialPair>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeRefresher {
    pub fn returning(response: Option<CredentialPair>) -> Self {
        Self { response, calls: RefCell::new(Vec::new()) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl TokenRefresher for FakeRefresher {
    async fn refresh(&self, refresh_token: &str) -> Option<CredentialPair> {
        self.calls.borrow_mut().push(refresh_token.to_owned());
        self.response.clone()
    }
}
