//! REST API helpers for communicating with the course API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each raced against
//! [`REQUEST_TIMEOUT_MS`](crate::config::REQUEST_TIMEOUT_MS).
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so auth and
//! profile failures degrade UI behavior without crashing hydration. Error
//! payloads are reduced to one human-readable message for toasts.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{
    ChangePasswordRequest, Course, CredentialPair, EnrolledCourse, ErrorBody, NewPasswordRequest, RegisterRequest,
    StudentSummary, TokenPairResponse, UserProfile,
};
#[cfg(feature = "hydrate")]
use super::types::{LoginRequest, MessageResponse, RefreshRequest};
use crate::util::session_init::TokenRefresher;

pub const LOGIN_FALLBACK_MESSAGE: &str = "Invalid email or password";
pub const REGISTER_FALLBACK_MESSAGE: &str = "Registration failed. Please try again.";
pub const GENERIC_FALLBACK_MESSAGE: &str = "An error occurred";

/// Failures surfaced by REST calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    /// Non-2xx response; `message` is already user-presentable.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

pub const COURSE_LIST_ENDPOINT: &str = "course/course-list/";

#[cfg(any(test, feature = "hydrate"))]
fn password_reset_endpoint(email: &str) -> String {
    format!("user/password-reset/{}/", urlencoding::encode(email))
}

#[cfg(any(test, feature = "hydrate"))]
fn student_summary_endpoint(user_id: &str) -> String {
    format!("student/summary/{}/", urlencoding::encode(user_id))
}

#[cfg(any(test, feature = "hydrate"))]
fn student_course_list_endpoint(user_id: &str) -> String {
    format!("student/course-list/{}/", urlencoding::encode(user_id))
}

#[cfg(any(test, feature = "hydrate"))]
fn profile_endpoint(user_id: &str) -> String {
    format!("user/profile/{}/", urlencoding::encode(user_id))
}

#[cfg(any(test, feature = "hydrate"))]
fn cart_list_endpoint(cart_id: &str) -> String {
    format!("cart/course-Cart-List/{cart_id}/")
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Message for a failed login: the server's `detail`, else a generic hint.
pub fn login_error_message(body: Option<&ErrorBody>) -> String {
    body.and_then(|b| b.detail.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| LOGIN_FALLBACK_MESSAGE.to_owned())
}

/// Message for a failed registration, preferring the top-level `message`
/// and then the first field error in form order.
pub fn register_error_message(body: Option<&ErrorBody>) -> String {
    body.and_then(|b| {
        b.message
            .clone()
            .or_else(|| b.email.first().cloned())
            .or_else(|| b.password.first().cloned())
            .or_else(|| b.confirm_password.first().cloned())
            .or_else(|| b.non_field_errors.first().cloned())
    })
    .filter(|m| !m.is_empty())
    .unwrap_or_else(|| REGISTER_FALLBACK_MESSAGE.to_owned())
}

/// Message for any other failed call: `message`, then `detail`.
pub fn generic_error_message(body: Option<&ErrorBody>) -> String {
    body.and_then(|b| b.message.clone().or_else(|| b.detail.clone()))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERIC_FALLBACK_MESSAGE.to_owned())
}

/// The summary endpoint answers with a list; only its first row is meaningful.
pub fn first_summary(rows: Vec<StudentSummary>) -> StudentSummary {
    rows.into_iter().next().unwrap_or_default()
}

/// Interpret a token-endpoint response; `None` unless 2xx with both tokens.
pub fn token_pair_from(status_ok: bool, body: Option<TokenPairResponse>) -> Option<CredentialPair> {
    if !status_ok {
        return None;
    }
    body?.into_pair()
}

#[cfg(feature = "hydrate")]
mod http {
    use futures::future::{Either, select};
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use super::ApiError;
    use crate::config::{REQUEST_TIMEOUT_MS, api_url};
    use crate::net::types::ErrorBody;

    pub fn get(path: &str) -> RequestBuilder {
        Request::get(&api_url(path)).header("Accept", "application/json")
    }

    pub fn post(path: &str) -> RequestBuilder {
        Request::post(&api_url(path)).header("Accept", "application/json")
    }

    pub fn with_json<T: Serialize>(builder: RequestBuilder, payload: &T) -> Result<Request, ApiError> {
        builder.json(payload).map_err(|e| ApiError::Network(e.to_string()))
    }

    /// Send `request`, failing with [`ApiError::Timeout`] past the deadline.
    pub async fn send(request: Request) -> Result<Response, ApiError> {
        let send = std::pin::pin!(request.send());
        let timer = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(REQUEST_TIMEOUT_MS));
        match select(send, timer).await {
            Either::Left((result, _)) => result.map_err(|e| ApiError::Network(e.to_string())),
            Either::Right(((), _)) => Err(ApiError::Timeout),
        }
    }

    pub async fn json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a GET built from `builder` and decode a 2xx JSON body.
    pub async fn fetch<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let request = builder.build().map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = send(request).await?;
        if !resp.ok() {
            return Err(status_error(resp, super::generic_error_message).await);
        }
        json(resp).await
    }

    /// Turn a non-2xx response into [`ApiError::Status`] using `describe`.
    pub async fn status_error(resp: Response, describe: fn(Option<&ErrorBody>) -> String) -> ApiError {
        let status = resp.status();
        let body = resp.json::<ErrorBody>().await.ok();
        ApiError::Status { status, message: describe(body.as_ref()) }
    }
}

/// Sign in with email and password via `POST user/token/`.
///
/// # Errors
///
/// Returns [`ApiError::Status`] carrying the server's `detail` message on
/// rejected credentials, or a transport error.
pub async fn login(email: &str, password: &str) -> Result<CredentialPair, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = http::with_json(http::post("user/token/"), &LoginRequest { email, password })?;
        let resp = http::send(request).await?;
        if !resp.ok() {
            return Err(http::status_error(resp, login_error_message).await);
        }
        let body: TokenPairResponse = http::json(resp).await?;
        body.into_pair()
            .ok_or_else(|| ApiError::Decode("token response missing access or refresh".to_owned()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err(ApiError::Unavailable)
    }
}

/// Exchange a refresh token via `POST user/token/refresh/`.
///
/// Returns `None` on network error, timeout, non-2xx, or a response missing
/// either token. No retry.
pub async fn refresh_tokens(refresh_token: &str) -> Option<CredentialPair> {
    if refresh_token.is_empty() {
        return None;
    }
    #[cfg(feature = "hydrate")]
    {
        let request = http::with_json(http::post("user/token/refresh/"), &RefreshRequest { refresh: refresh_token })
            .ok()?;
        let resp = match http::send(request).await {
            Ok(resp) => resp,
            Err(e) => {
                leptos::logging::warn!("token refresh request failed: {e}");
                return None;
            }
        };
        let ok = resp.ok();
        let body = if ok { resp.json::<TokenPairResponse>().await.ok() } else { None };
        token_pair_from(ok, body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Create an account via `POST user/register/`. Returns the created user JSON.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with the first validation message on rejection.
pub async fn register(form: &RegisterRequest) -> Result<serde_json::Value, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = http::with_json(http::post("user/register/"), form)?;
        let resp = http::send(request).await?;
        if !resp.ok() {
            return Err(http::status_error(resp, register_error_message).await);
        }
        http::json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = form;
        Err(ApiError::Unavailable)
    }
}

/// Ask the API to email a password-reset link via `GET user/password-reset/{email}/`.
///
/// # Errors
///
/// Returns [`ApiError::Status`] when the address is unknown, or a transport error.
pub async fn request_password_reset(email: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = http::get(&password_reset_endpoint(email))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = http::send(request).await?;
        if !resp.ok() {
            return Err(http::status_error(resp, generic_error_message).await);
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err(ApiError::Unavailable)
    }
}

/// Set a new password from an emailed reset link via `POST user/password-change/`.
///
/// Returns the server's confirmation message.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with the server's `message` on an invalid OTP.
pub async fn create_new_password(req: &NewPasswordRequest) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = http::with_json(http::post("user/password-change/"), req)?;
        let resp = http::send(request).await?;
        if !resp.ok() {
            return Err(http::status_error(resp, generic_error_message).await);
        }
        let body: MessageResponse = http::json(resp).await?;
        Ok(body.message.unwrap_or_default())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = req;
        Err(ApiError::Unavailable)
    }
}

/// Change the signed-in user's password via `POST user/change-password/`.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with the server's `message` on rejection.
pub async fn change_password(access_token: &str, req: &ChangePasswordRequest) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder = http::post("user/change-password/").header("Authorization", &bearer(access_token));
        let request = http::with_json(builder, req)?;
        let resp = http::send(request).await?;
        if !resp.ok() {
            return Err(http::status_error(resp, generic_error_message).await);
        }
        let body: MessageResponse = http::json(resp).await?;
        Ok(body.message.unwrap_or_default())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (access_token, req);
        Err(ApiError::Unavailable)
    }
}

/// Number of courses in the guest cart via `GET cart/course-Cart-List/{cart_id}/`.
/// Returns `None` on failure or on the server.
pub async fn fetch_cart_count(cart_id: &str) -> Option<usize> {
    #[cfg(feature = "hydrate")]
    {
        let request = http::get(&cart_list_endpoint(cart_id)).build().ok()?;
        let resp = http::send(request).await.ok()?;
        if !resp.ok() {
            return None;
        }
        let items: Vec<serde_json::Value> = resp.json().await.ok()?;
        Some(items.len())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = cart_id;
        None
    }
}

/// Public course catalog via `GET course/course-list/`.
///
/// # Errors
///
/// Returns a transport, status, or decode error.
pub async fn fetch_courses() -> Result<Vec<Course>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        http::fetch(http::get(COURSE_LIST_ENDPOINT)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Dashboard totals via `GET student/summary/{user_id}/`.
///
/// # Errors
///
/// Returns a transport, status, or decode error.
pub async fn fetch_student_summary(access_token: &str, user_id: &str) -> Result<StudentSummary, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder = http::get(&student_summary_endpoint(user_id)).header("Authorization", &bearer(access_token));
        http::fetch(builder).await.map(first_summary)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (access_token, user_id);
        Err(ApiError::Unavailable)
    }
}

/// Enrollments with lecture progress via `GET student/course-list/{user_id}/`.
///
/// # Errors
///
/// Returns a transport, status, or decode error.
pub async fn fetch_enrolled_courses(access_token: &str, user_id: &str) -> Result<Vec<EnrolledCourse>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder =
            http::get(&student_course_list_endpoint(user_id)).header("Authorization", &bearer(access_token));
        http::fetch(builder).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (access_token, user_id);
        Err(ApiError::Unavailable)
    }
}

/// Profile for the dashboard header via `GET user/profile/{user_id}/`.
///
/// # Errors
///
/// Returns a transport, status, or decode error.
pub async fn fetch_profile(access_token: &str, user_id: &str) -> Result<UserProfile, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let builder = http::get(&profile_endpoint(user_id)).header("Authorization", &bearer(access_token));
        http::fetch(builder).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (access_token, user_id);
        Err(ApiError::Unavailable)
    }
}

/// [`TokenRefresher`] backed by the refresh endpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpRefresher;

impl TokenRefresher for HttpRefresher {
    async fn refresh(&self, refresh_token: &str) -> Option<CredentialPair> {
        refresh_tokens(refresh_token).await
    }
}
