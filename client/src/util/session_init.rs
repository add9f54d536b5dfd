//! Session lifecycle: startup reconciliation, credential writes, refresh.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once at application mount (see `components::main_wrapper`) and again
//! whenever an authorized request finds an expired access token. Every path
//! leaves the store with `loading == false` so the route guard always has a
//! defined state to render.
//!
//! CONCURRENCY
//! ===========
//! Initialization and authorized-request refreshes share one single-flight
//! slot: a second call while one is in flight returns
//! [`InitOutcome::AlreadyRunning`] (or [`AccessError::RefreshInFlight`])
//! without touching state. A refresh
//! that resolves after another writer (login, logout) changed the store is
//! discarded instead of overwriting the newer session.

#[cfg(test)]
#[path = "session_init_test.rs"]
mod session_init_test;

use crate::net::types::{CredentialPair, UserIdentity};
use crate::state::session::{SessionHandle, SessionPersistence};
use crate::util::credentials::CredentialStore;
use crate::util::jwt::{self, DecodeError};

/// Exchange a refresh token for a new credential pair.
#[allow(async_fn_in_trait)]
pub trait TokenRefresher {
    /// `None` on any failure; callers decide what to do next.
    async fn refresh(&self, refresh_token: &str) -> Option<CredentialPair>;
}

/// Why the session ended up signed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearReason {
    RefreshFailed,
    MalformedToken,
}

/// Result of one initialization or refresh attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    /// No credentials were persisted.
    Unauthenticated,
    /// The persisted access token was still valid.
    Restored,
    /// The access token had expired and was refreshed.
    Refreshed,
    /// Credentials were discarded and the user signed out.
    Cleared(ClearReason),
    /// Another writer changed the session while the refresh was in flight.
    Superseded,
    /// An initialization was already running.
    AlreadyRunning,
}

/// Reconcile persisted credentials with the session store.
pub async fn initialize_session<P, C, R>(session: &SessionHandle<P>, credentials: &C, refresher: &R, now: i64) -> InitOutcome
where
    P: SessionPersistence,
    C: CredentialStore,
    R: TokenRefresher,
{
    let Some(_slot) = session.begin_initialization() else {
        return InitOutcome::AlreadyRunning;
    };
    session.set_loading(true);

    let Some(pair) = credentials.load() else {
        session.set_user(None);
        return InitOutcome::Unauthenticated;
    };

    if jwt::is_expired(&pair.access_token, now) {
        return refresh_session(session, credentials, refresher, &pair.refresh_token).await;
    }

    match jwt::decode(&pair.access_token) {
        Ok(user) => {
            session.set_user(Some(user));
            InitOutcome::Restored
        }
        Err(e) => {
            leptos::logging::warn!("discarding undecodable access token: {e}");
            sign_out(session, credentials);
            InitOutcome::Cleared(ClearReason::MalformedToken)
        }
    }
}

/// Exchange `refresh_token` and apply the result to the store.
///
/// On failure the persisted pair is cleared and the user signed out.
pub async fn refresh_session<P, C, R>(
    session: &SessionHandle<P>,
    credentials: &C,
    refresher: &R,
    refresh_token: &str,
) -> InitOutcome
where
    P: SessionPersistence,
    C: CredentialStore,
    R: TokenRefresher,
{
    let revision = session.revision();
    let refreshed = refresher.refresh(refresh_token).await;

    if session.revision() != revision {
        leptos::logging::log!("session changed during token refresh; discarding result");
        return InitOutcome::Superseded;
    }

    let Some(pair) = refreshed else {
        leptos::logging::warn!("token refresh failed; signing out");
        sign_out(session, credentials);
        return InitOutcome::Cleared(ClearReason::RefreshFailed);
    };

    match apply_credentials(session, credentials, &pair) {
        Ok(_) => InitOutcome::Refreshed,
        Err(e) => {
            leptos::logging::warn!("refreshed access token is undecodable: {e}");
            sign_out(session, credentials);
            InitOutcome::Cleared(ClearReason::MalformedToken)
        }
    }
}

/// Persist a fresh credential pair and sign in the identity it carries.
///
/// The pair is only written when its access token decodes.
///
/// # Errors
///
/// Returns the [`DecodeError`] for an undecodable access token; the store's
/// loading flag is cleared either way.
pub fn apply_credentials<P, C>(
    session: &SessionHandle<P>,
    credentials: &C,
    pair: &CredentialPair,
) -> Result<UserIdentity, DecodeError>
where
    P: SessionPersistence,
    C: CredentialStore,
{
    match jwt::decode(&pair.access_token) {
        Ok(user) => {
            credentials.save(pair);
            session.set_user(Some(user.clone()));
            Ok(user)
        }
        Err(e) => {
            session.set_loading(false);
            Err(e)
        }
    }
}

/// Drop persisted credentials and sign the user out.
pub fn sign_out<P, C>(session: &SessionHandle<P>, credentials: &C)
where
    P: SessionPersistence,
    C: CredentialStore,
{
    credentials.clear();
    session.set_user(None);
}

/// Why no access token could be produced for an authorized request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Your session has expired. Please log in again.")]
    SignedOut,
    #[error("Your session is being renewed. Please try again.")]
    RefreshInFlight,
}

/// Access token to attach to an authorized request.
///
/// Refreshes once when the persisted access token has expired. The refresh
/// shares the single-flight slot with [`initialize_session`]: while another
/// refresh holds it this returns [`AccessError::RefreshInFlight`] without
/// touching credentials.
///
/// # Errors
///
/// [`AccessError::SignedOut`] when there are no credentials or the refresh
/// failed (the session has then been signed out).
pub async fn fresh_access_token<P, C, R>(
    session: &SessionHandle<P>,
    credentials: &C,
    refresher: &R,
    now: i64,
) -> Result<String, AccessError>
where
    P: SessionPersistence,
    C: CredentialStore,
    R: TokenRefresher,
{
    let pair = credentials.load().ok_or(AccessError::SignedOut)?;
    if !jwt::is_expired(&pair.access_token, now) {
        return Ok(pair.access_token);
    }
    let Some(_slot) = session.begin_initialization() else {
        return Err(AccessError::RefreshInFlight);
    };
    match refresh_session(session, credentials, refresher, &pair.refresh_token).await {
        InitOutcome::Refreshed | InitOutcome::Superseded => {
            credentials.load().map(|p| p.access_token).ok_or(AccessError::SignedOut)
        }
        _ => Err(AccessError::SignedOut),
    }
}

/// [`fresh_access_token`] against the browser cookies and the refresh endpoint.
///
/// # Errors
///
/// See [`fresh_access_token`].
#[cfg(feature = "hydrate")]
pub async fn browser_access_token(session: &crate::state::session::SessionContext) -> Result<String, AccessError> {
    fresh_access_token(
        &session.handle,
        &crate::util::credentials::CookieCredentials,
        &crate::net::api::HttpRefresher,
        jwt::unix_now(),
    )
    .await
}
