//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes apply identical gating: a placeholder while the session is
//! loading, the view when signed in, and a redirect to `/login` otherwise.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::session::Session;

/// What a protected route should render for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Render,
    RedirectToLogin,
}

/// Gate a protected view on `session`. Loading always wins.
pub fn guard_decision(session: &Session) -> GuardDecision {
    if session.loading {
        GuardDecision::Loading
    } else if session.is_logged_in() {
        GuardDecision::Render
    } else {
        GuardDecision::RedirectToLogin
    }
}
