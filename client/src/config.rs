//! Compile-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle has no environment at runtime, so the API base URL is
//! baked in at build time through `LEARNMART_API_BASE_URL`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Fallback REST API root used when no build-time override is present.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Per-request timeout applied to every REST call.
pub const REQUEST_TIMEOUT_MS: u32 = 60_000;

/// Cookie holding the short-lived access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie holding the long-lived refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
pub const ACCESS_TOKEN_TTL_DAYS: u32 = 1;
pub const REFRESH_TOKEN_TTL_DAYS: u32 = 7;

/// localStorage key for the persisted session.
pub const SESSION_STORAGE_KEY: &str = "auth-storage";
/// localStorage key for the anonymous cart id.
pub const CART_ID_STORAGE_KEY: &str = "randomString";

/// Route the guard redirects unauthenticated visitors to.
pub const LOGIN_PATH: &str = "/login";

/// REST API root, honoring the build-time override.
pub fn api_base_url() -> &'static str {
    option_env!("LEARNMART_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL)
}

/// Join a relative endpoint path onto `base`, normalizing the slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Absolute URL for an API endpoint path such as `user/token/`.
pub fn api_url(path: &str) -> String {
    join_url(api_base_url(), path)
}
