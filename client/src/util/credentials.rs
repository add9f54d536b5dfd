//! Cookie-backed credential persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The access/refresh pair lives in two cookies with independent lifetimes so
//! it survives reloads without being part of the serialized session. The
//! [`CredentialStore`] port lets the session initializer run against an
//! in-memory store in tests.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use cookie::{Cookie, SameSite};
use time::Duration;

use crate::config::{ACCESS_TOKEN_COOKIE, ACCESS_TOKEN_TTL_DAYS, REFRESH_TOKEN_COOKIE, REFRESH_TOKEN_TTL_DAYS};
use crate::net::types::CredentialPair;

/// Persistence port for the credential pair.
pub trait CredentialStore {
    /// Read the persisted pair. `None` when either token is missing.
    fn load(&self) -> Option<CredentialPair>;
    fn save(&self, pair: &CredentialPair);
    fn clear(&self);
}

/// Build a percent-encoded `document.cookie` assignment for `name`.
///
/// `max_age_days == None` produces an expiring (deletion) cookie.
pub fn format_cookie(name: &str, value: &str, max_age_days: Option<u32>, secure: bool) -> String {
    let max_age = max_age_days.map_or(Duration::ZERO, |days| Duration::days(i64::from(days)));
    Cookie::build((name, value))
        .path("/")
        .max_age(max_age)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
        .encoded()
        .to_string()
}

/// Find and decode the value of cookie `name` in a `document.cookie` string.
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    Cookie::split_parse_encoded(cookies)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}

/// Credentials stored in browser cookies.
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieCredentials;

#[cfg(feature = "hydrate")]
impl CookieCredentials {
    fn document() -> Option<web_sys::HtmlDocument> {
        use wasm_bindgen::JsCast;
        web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
    }

    fn read(name: &str) -> Option<String> {
        let cookies = Self::document()?.cookie().ok()?;
        parse_cookie(&cookies, name)
    }

    fn write(name: &str, value: &str, max_age_days: Option<u32>) {
        let Some(doc) = Self::document() else {
            return;
        };
        let _ = doc.set_cookie(&format_cookie(name, value, max_age_days, true));
    }
}

impl CredentialStore for CookieCredentials {
    fn load(&self) -> Option<CredentialPair> {
        #[cfg(feature = "hydrate")]
        {
            let access = Self::read(ACCESS_TOKEN_COOKIE)?;
            let refresh = Self::read(REFRESH_TOKEN_COOKIE)?;
            Some(CredentialPair::new(access, refresh))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, pair: &CredentialPair) {
        #[cfg(feature = "hydrate")]
        {
            Self::write(ACCESS_TOKEN_COOKIE, &pair.access_token, Some(ACCESS_TOKEN_TTL_DAYS));
            Self::write(REFRESH_TOKEN_COOKIE, &pair.refresh_token, Some(REFRESH_TOKEN_TTL_DAYS));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (pair, ACCESS_TOKEN_TTL_DAYS, REFRESH_TOKEN_TTL_DAYS);
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            Self::write(ACCESS_TOKEN_COOKIE, "", None);
            Self::write(REFRESH_TOKEN_COOKIE, "", None);
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE);
        }
    }
}
