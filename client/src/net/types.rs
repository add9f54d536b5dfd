//! Shared wire DTOs for the client/API boundary.
//!
//! DESIGN
//! ======
//! These types mirror the course API's JSON payloads so serde round-trips stay
//! lossless. Identifiers arrive as numbers from the token issuer but are kept
//! as strings on the client so persisted sessions stay schema-stable.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Identity decoded from an access token's claims.
///
/// Used only for UI personalization; the API re-validates every token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Account identifier (`user_id` claim).
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    /// Display name (`username` claim).
    pub username: String,
    /// Account email, if the issuer embeds it.
    #[serde(default)]
    pub email: Option<String>,
    /// Full name, if the issuer embeds it.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Instructor profile identifier for teaching accounts.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub teacher_id: Option<String>,
}

impl UserIdentity {
    /// Name to greet the user with: full name when present, otherwise username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Access/refresh token pair persisted in cookies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl CredentialPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

/// Token endpoint response body (`user/token/` and `user/token/refresh/`).
///
/// Both fields are optional on the wire: a response missing either one is
/// treated as a failed exchange rather than a decode error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TokenPairResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl TokenPairResponse {
    /// Convert into a credential pair when both tokens are present and non-empty.
    pub fn into_pair(self) -> Option<CredentialPair> {
        let access = self.access.filter(|t| !t.is_empty())?;
        let refresh = self.refresh.filter(|t| !t.is_empty())?;
        Some(CredentialPair::new(access, refresh))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Registration form payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Password reset confirmation sent from the emailed link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewPasswordRequest {
    pub password: String,
    pub otp: String,
    pub uuidb64: String,
}

/// Authenticated password change payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChangePasswordRequest {
    pub user_id: String,
    pub old_password: String,
    pub new_password: String,
}

/// Generic `{ "message": ... }` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error payloads returned by the API.
///
/// Login failures carry `detail`, most others carry `message`; registration
/// validation errors are per-field arrays of strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub email: Vec<String>,
    #[serde(default)]
    pub password: Vec<String>,
    #[serde(default)]
    pub confirm_password: Vec<String>,
    #[serde(default)]
    pub non_field_errors: Vec<String>,
}

/// Catalog course as listed by `course/course-list/`.
///
/// Related collections are reduced to their lengths; the UI only shows counts.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Course {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub language: String,
    /// Decimal amount as sent by the API, e.g. `"1500.00"`.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: String,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub category: Option<CourseCategory>,
    #[serde(default)]
    pub teacher: Option<CourseTeacher>,
    #[serde(rename = "students", default, deserialize_with = "deserialize_len")]
    pub student_count: usize,
    #[serde(rename = "reviews", default, deserialize_with = "deserialize_len")]
    pub review_count: usize,
}

impl Course {
    pub fn category_title(&self) -> &str {
        self.category.as_ref().map_or("", |c| c.title.as_str())
    }

    pub fn teacher_name(&self) -> &str {
        self.teacher.as_ref().map_or("", |t| t.full_name.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CourseCategory {
    #[serde(default)]
    pub title: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CourseTeacher {
    #[serde(default)]
    pub full_name: String,
}

/// Learning totals for the dashboard stat cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct StudentSummary {
    #[serde(default)]
    pub total_courses: u32,
    #[serde(default)]
    pub completed_lessons: u32,
    #[serde(default)]
    pub achieved_certificates: u32,
}

/// One enrollment from `student/course-list/{user_id}/`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EnrolledCourse {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub enrollment_id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub course: Course,
    #[serde(rename = "lectures", default, deserialize_with = "deserialize_len")]
    pub lecture_count: usize,
    #[serde(rename = "completed_lesson", default, deserialize_with = "deserialize_len")]
    pub completed_count: usize,
}

impl EnrolledCourse {
    /// Completed lectures as a whole percentage, rounding halves up.
    pub fn progress_percent(&self) -> usize {
        if self.lecture_count == 0 {
            return 0;
        }
        (self.completed_count * 200 + self.lecture_count) / (2 * self.lecture_count)
    }

    /// Nothing finished yet, or some lectures still open.
    pub fn is_in_progress(&self) -> bool {
        self.completed_count == 0 || self.completed_count < self.lecture_count
    }

    pub fn is_completed(&self) -> bool {
        self.completed_count > 0 && self.completed_count == self.lecture_count
    }
}

/// Profile shown in the dashboard header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    id_from_value(value).ok_or_else(|| D::Error::custom("expected string or integer id"))
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    id_from_value(value)
        .map(Some)
        .ok_or_else(|| D::Error::custom("expected string or integer id"))
}

fn id_from_value(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_u64().map(|u| u.to_string())),
        _ => None,
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        _ => Err(D::Error::custom("expected decimal string or number price")),
    }
}

/// Length of a JSON array, `null` counting as empty.
fn deserialize_len<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<serde::de::IgnoredAny>>::deserialize(deserializer)?;
    Ok(items.map_or(0, |items| items.len()))
}
