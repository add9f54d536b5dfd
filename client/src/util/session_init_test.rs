use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::state::session::{Session, TokenStore};
use crate::util::test_support::{FakeRefresher, MemoryCredentials, MemorySessionStorage, access_token};

const NOW: i64 = 1_700_000_000;

fn handle() -> SessionHandle<MemorySessionStorage> {
    SessionHandle::new(TokenStore::restore(MemorySessionStorage::default()))
}

fn live_token(id: u64, name: &str) -> String {
    access_token(id, name, NOW + 3_600)
}

fn expired_token(id: u64, name: &str) -> String {
    access_token(id, name, NOW - 60)
}

// =============================================================
// initialize_session
// =============================================================

#[test]
fn absent_tokens_leave_signed_out_idle_session() {
    let session = handle();
    let creds = MemoryCredentials::default();
    let refresher = FakeRefresher::default();

    let outcome = block_on(initialize_session(&session, &creds, &refresher, NOW));

    assert_eq!(outcome, InitOutcome::Unauthenticated);
    assert_eq!(session.session(), Session { user: None, loading: false });
    assert_eq!(refresher.call_count(), 0);
    assert_eq!(creds.cleared.get(), 0);
}

#[test]
fn absent_tokens_reset_stale_persisted_user() {
    let persisted = Session { user: Some(jwt::decode(&live_token(1, "ada")).unwrap()), loading: false };
    let session = SessionHandle::new(TokenStore::restore(MemorySessionStorage::with(persisted)));

    block_on(initialize_session(&session, &MemoryCredentials::default(), &FakeRefresher::default(), NOW));

    assert!(!session.is_logged_in());
}

#[test]
fn unexpired_token_sets_user_without_refresh() {
    let session = handle();
    let access = live_token(7, "ada");
    let creds = MemoryCredentials::with(CredentialPair::new(access.clone(), "R1"));
    let refresher = FakeRefresher::returning(Some(CredentialPair::new("unused", "unused")));

    let outcome = block_on(initialize_session(&session, &creds, &refresher, NOW));

    assert_eq!(outcome, InitOutcome::Restored);
    assert_eq!(session.session().user, Some(jwt::decode(&access).unwrap()));
    assert!(!session.session().loading);
    assert_eq!(refresher.call_count(), 0);
    assert_eq!(creds.load(), Some(CredentialPair::new(access, "R1")));
}

#[test]
fn expired_token_refreshes_and_persists_new_pair() {
    let session = handle();
    let creds = MemoryCredentials::with(CredentialPair::new(expired_token(7, "ada"), "R1"));
    let a2 = live_token(7, "ada-renewed");
    let refresher = FakeRefresher::returning(Some(CredentialPair::new(a2.clone(), "R2")));

    let outcome = block_on(initialize_session(&session, &creds, &refresher, NOW));

    assert_eq!(outcome, InitOutcome::Refreshed);
    assert_eq!(*refresher.calls.borrow(), vec!["R1".to_owned()]);
    assert_eq!(creds.load(), Some(CredentialPair::new(a2.clone(), "R2")));
    assert_eq!(session.session(), Session { user: Some(jwt::decode(&a2).unwrap()), loading: false });
}

#[test]
fn failed_refresh_clears_tokens_and_user() {
    let session = handle();
    session.set_user(Some(jwt::decode(&live_token(1, "ada")).unwrap()));
    let creds = MemoryCredentials::with(CredentialPair::new(expired_token(1, "ada"), "R1"));
    let refresher = FakeRefresher::returning(None);

    let outcome = block_on(initialize_session(&session, &creds, &refresher, NOW));

    assert_eq!(outcome, InitOutcome::Cleared(ClearReason::RefreshFailed));
    assert_eq!(creds.load(), None);
    assert_eq!(creds.cleared.get(), 1);
    assert_eq!(session.session(), Session { user: None, loading: false });
}

#[test]
fn undecodable_refreshed_token_clears_session() {
    let session = handle();
    let creds = MemoryCredentials::with(CredentialPair::new(expired_token(1, "ada"), "R1"));
    let refresher = FakeRefresher::returning(Some(CredentialPair::new("garbage", "R2")));

    let outcome = block_on(initialize_session(&session, &creds, &refresher, NOW));

    assert_eq!(outcome, InitOutcome::Cleared(ClearReason::MalformedToken));
    assert_eq!(creds.load(), None);
    assert!(!session.is_logged_in());
    assert!(!session.session().loading);
}

#[test]
fn malformed_access_token_is_treated_as_expired() {
    let session = handle();
    let creds = MemoryCredentials::with(CredentialPair::new("not-a-jwt", "R1"));
    let refresher = FakeRefresher::returning(None);

    let outcome = block_on(initialize_session(&session, &creds, &refresher, NOW));

    assert_eq!(refresher.call_count(), 1);
    assert_eq!(outcome, InitOutcome::Cleared(ClearReason::RefreshFailed));
}

#[test]
fn unexpired_token_with_bad_claims_is_cleared() {
    let session = handle();
    let token = crate::util::test_support::token_with_claims(&serde_json::json!({ "exp": NOW + 60 }));
    let creds = MemoryCredentials::with(CredentialPair::new(token, "R1"));

    let outcome = block_on(initialize_session(&session, &creds, &FakeRefresher::default(), NOW));

    assert_eq!(outcome, InitOutcome::Cleared(ClearReason::MalformedToken));
    assert_eq!(creds.load(), None);
}

#[test]
fn reentrant_initialization_is_skipped() {
    let session = handle();
    let creds = MemoryCredentials::with(CredentialPair::new(live_token(1, "ada"), "R1"));
    let _running = session.begin_initialization();
    let before = session.revision();

    let outcome = block_on(initialize_session(&session, &creds, &FakeRefresher::default(), NOW));

    assert_eq!(outcome, InitOutcome::AlreadyRunning);
    assert_eq!(session.revision(), before);
    assert!(!session.is_logged_in());
}

#[test]
fn initialization_releases_slot_when_done() {
    let session = handle();
    block_on(initialize_session(&session, &MemoryCredentials::default(), &FakeRefresher::default(), NOW));
    assert!(!session.is_initializing());
}

/// Refresher that simulates a login landing while the exchange is in flight.
struct RacingRefresher {
    session: SessionHandle<MemorySessionStorage>,
    winner: UserIdentity,
}

impl TokenRefresher for RacingRefresher {
    async fn refresh(&self, _refresh_token: &str) -> Option<CredentialPair> {
        self.session.set_user(Some(self.winner.clone()));
        Some(CredentialPair::new(live_token(1, "stale"), "R-stale"))
    }
}

#[test]
fn refresh_resolving_after_login_is_discarded() {
    let session = handle();
    let creds = MemoryCredentials::with(CredentialPair::new(expired_token(1, "ada"), "R1"));
    let winner = jwt::decode(&live_token(2, "fresh-login")).unwrap();
    let refresher = RacingRefresher { session: session.clone(), winner: winner.clone() };

    let outcome = block_on(initialize_session(&session, &creds, &refresher, NOW));

    assert_eq!(outcome, InitOutcome::Superseded);
    assert_eq!(session.session().user, Some(winner));
    assert_eq!(creds.load().map(|p| p.refresh_token), Some("R1".to_owned()));
}

// =============================================================
// apply_credentials / sign_out
// =============================================================

#[test]
fn apply_credentials_writes_pair_and_user() {
    let session = handle();
    let creds = MemoryCredentials::default();
    let pair = CredentialPair::new(live_token(3, "grace"), "R3");

    let user = apply_credentials(&session, &creds, &pair).unwrap();

    assert_eq!(user.username, "grace");
    assert_eq!(creds.load(), Some(pair));
    assert!(session.is_logged_in());
}

#[test]
fn apply_credentials_rejects_undecodable_token_without_persisting() {
    let session = handle();
    session.set_loading(true);
    let creds = MemoryCredentials::default();

    let result = apply_credentials(&session, &creds, &CredentialPair::new("bad", "R"));

    assert!(result.is_err());
    assert_eq!(creds.load(), None);
    assert!(!session.session().loading);
    assert!(!session.is_logged_in());
}

#[test]
fn sign_out_clears_everything() {
    let session = handle();
    let creds = MemoryCredentials::default();
    apply_credentials(&session, &creds, &CredentialPair::new(live_token(3, "grace"), "R3")).unwrap();

    sign_out(&session, &creds);

    assert_eq!(creds.load(), None);
    assert_eq!(session.session(), Session::default());
}

// =============================================================
// fresh_access_token
// =============================================================

#[test]
fn fresh_access_token_returns_live_token_as_is() {
    let session = handle();
    let access = live_token(1, "ada");
    let creds = MemoryCredentials::with(CredentialPair::new(access.clone(), "R1"));
    let refresher = FakeRefresher::default();

    assert_eq!(block_on(fresh_access_token(&session, &creds, &refresher, NOW)), Ok(access));
    assert_eq!(refresher.call_count(), 0);
}

#[test]
fn fresh_access_token_refreshes_expired_token() {
    let session = handle();
    let creds = MemoryCredentials::with(CredentialPair::new(expired_token(1, "ada"), "R1"));
    let a2 = live_token(1, "ada");
    let refresher = FakeRefresher::returning(Some(CredentialPair::new(a2.clone(), "R2")));

    assert_eq!(block_on(fresh_access_token(&session, &creds, &refresher, NOW)), Ok(a2));
    assert!(session.is_logged_in());
    assert!(!session.is_initializing());
}

#[test]
fn fresh_access_token_without_credentials_is_signed_out() {
    let session = handle();
    let refresher = FakeRefresher::default();
    assert_eq!(
        block_on(fresh_access_token(&session, &MemoryCredentials::default(), &refresher, NOW)),
        Err(AccessError::SignedOut)
    );
    assert_eq!(refresher.call_count(), 0);
}

#[test]
fn fresh_access_token_failed_refresh_signs_out() {
    let session = handle();
    let creds = MemoryCredentials::with(CredentialPair::new(expired_token(1, "ada"), "R1"));

    assert_eq!(
        block_on(fresh_access_token(&session, &creds, &FakeRefresher::returning(None), NOW)),
        Err(AccessError::SignedOut)
    );
    assert_eq!(creds.load(), None);
}

#[test]
fn fresh_access_token_defers_to_a_running_refresh() {
    let session = handle();
    let pair = CredentialPair::new(expired_token(1, "ada"), "R1");
    let creds = MemoryCredentials::with(pair.clone());
    let refresher = FakeRefresher::returning(None);
    let _running = session.begin_initialization();

    let result = block_on(fresh_access_token(&session, &creds, &refresher, NOW));

    assert_eq!(result, Err(AccessError::RefreshInFlight));
    assert_eq!(refresher.call_count(), 0);
    assert_eq!(creds.load(), Some(pair));
    assert_eq!(creds.cleared.get(), 0);
}

/// Refresher whose exchange overlaps a second authorized request that would fail.
struct OverlappingRefresher<'a> {
    session: SessionHandle<MemorySessionStorage>,
    creds: &'a MemoryCredentials,
    renewed: CredentialPair,
    overlapped: RefCell<Option<Result<String, AccessError>>>,
}

impl TokenRefresher for OverlappingRefresher<'_> {
    async fn refresh(&self, _refresh_token: &str) -> Option<CredentialPair> {
        let failing = FakeRefresher::returning(None);
        let second = fresh_access_token(&self.session, self.creds, &failing, NOW).await;
        *self.overlapped.borrow_mut() = Some(second);
        Some(self.renewed.clone())
    }
}

#[test]
fn overlapping_authorized_requests_keep_the_successful_refresh() {
    let session = handle();
    let creds = MemoryCredentials::with(CredentialPair::new(expired_token(1, "ada"), "R1"));
    let a2 = live_token(1, "ada");
    let refresher = OverlappingRefresher {
        session: session.clone(),
        creds: &creds,
        renewed: CredentialPair::new(a2.clone(), "R2"),
        overlapped: RefCell::new(None),
    };

    let first = block_on(fresh_access_token(&session, &creds, &refresher, NOW));

    assert_eq!(first, Ok(a2.clone()));
    assert_eq!(*refresher.overlapped.borrow(), Some(Err(AccessError::RefreshInFlight)));
    assert_eq!(creds.load(), Some(CredentialPair::new(a2, "R2")));
    assert_eq!(creds.cleared.get(), 0);
    assert!(session.is_logged_in());
}
