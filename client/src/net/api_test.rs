use super::*;

fn body(json: serde_json::Value) -> ErrorBody {
    serde_json::from_value(json).unwrap()
}

#[test]
fn password_reset_endpoint_formats_expected_path() {
    assert_eq!(password_reset_endpoint("ada@example.com"), "user/password-reset/ada%40example.com/");
}

#[test]
fn password_reset_endpoint_keeps_email_in_one_path_segment() {
    let path = password_reset_endpoint("a#b?c/d@x.com");
    assert_eq!(path, "user/password-reset/a%23b%3Fc%2Fd%40x.com/");
    assert_eq!(path.matches('/').count(), 3);
}

#[test]
fn student_endpoints_format_expected_paths() {
    assert_eq!(student_summary_endpoint("42"), "student/summary/42/");
    assert_eq!(student_course_list_endpoint("42"), "student/course-list/42/");
    assert_eq!(profile_endpoint("42"), "user/profile/42/");
    assert_eq!(profile_endpoint("u 1/2"), "user/profile/u%201%2F2/");
}

#[test]
fn first_summary_takes_first_row_or_zeroes() {
    let rows = vec![
        StudentSummary { total_courses: 3, completed_lessons: 7, achieved_certificates: 1 },
        StudentSummary { total_courses: 9, completed_lessons: 9, achieved_certificates: 9 },
    ];
    assert_eq!(first_summary(rows).total_courses, 3);
    assert_eq!(first_summary(Vec::new()), StudentSummary::default());
}

#[test]
fn cart_list_endpoint_formats_expected_path() {
    assert_eq!(cart_list_endpoint("aB3xY9"), "cart/course-Cart-List/aB3xY9/");
}

#[test]
fn bearer_formats_authorization_header() {
    assert_eq!(bearer("tok"), "Bearer tok");
}

#[test]
fn login_error_message_uses_detail() {
    let b = body(serde_json::json!({ "detail": "No active account found with the given credentials" }));
    assert_eq!(login_error_message(Some(&b)), "No active account found with the given credentials");
}

#[test]
fn login_error_message_falls_back() {
    assert_eq!(login_error_message(None), LOGIN_FALLBACK_MESSAGE);
    assert_eq!(login_error_message(Some(&body(serde_json::json!({ "detail": "" })))), LOGIN_FALLBACK_MESSAGE);
}

#[test]
fn register_error_message_prefers_message_then_field_order() {
    let with_message = body(serde_json::json!({ "message": "Closed", "email": ["taken"] }));
    assert_eq!(register_error_message(Some(&with_message)), "Closed");

    let fields = body(serde_json::json!({
        "password": ["too short"],
        "email": ["taken"],
        "non_field_errors": ["nope"]
    }));
    assert_eq!(register_error_message(Some(&fields)), "taken");

    let confirm_only = body(serde_json::json!({ "confirm_password": ["mismatch"] }));
    assert_eq!(register_error_message(Some(&confirm_only)), "mismatch");

    let non_field = body(serde_json::json!({ "non_field_errors": ["nope"] }));
    assert_eq!(register_error_message(Some(&non_field)), "nope");
}

#[test]
fn register_error_message_falls_back() {
    assert_eq!(register_error_message(None), REGISTER_FALLBACK_MESSAGE);
    assert_eq!(register_error_message(Some(&ErrorBody::default())), REGISTER_FALLBACK_MESSAGE);
}

#[test]
fn generic_error_message_prefers_message_over_detail() {
    let b = body(serde_json::json!({ "message": "Invalid OTP or user not found", "detail": "x" }));
    assert_eq!(generic_error_message(Some(&b)), "Invalid OTP or user not found");
    let d = body(serde_json::json!({ "detail": "Not found." }));
    assert_eq!(generic_error_message(Some(&d)), "Not found.");
    assert_eq!(generic_error_message(None), GENERIC_FALLBACK_MESSAGE);
}

#[test]
fn token_pair_from_requires_success_and_both_fields() {
    let full = TokenPairResponse { access: Some("A2".to_owned()), refresh: Some("R2".to_owned()) };
    assert_eq!(token_pair_from(true, Some(full.clone())), Some(CredentialPair::new("A2", "R2")));
    assert_eq!(token_pair_from(false, Some(full)), None);
    assert_eq!(token_pair_from(true, None), None);
    let partial = TokenPairResponse { access: Some("A2".to_owned()), refresh: None };
    assert_eq!(token_pair_from(true, Some(partial)), None);
}

#[test]
fn status_error_displays_server_message() {
    let err = ApiError::Status { status: 401, message: "Invalid email or password".to_owned() };
    assert_eq!(err.to_string(), "Invalid email or password");
    assert_eq!(ApiError::Timeout.to_string(), "request timed out");
}

#[test]
fn calls_are_unavailable_outside_browser() {
    assert_eq!(futures::executor::block_on(login("a@b.com", "pw")), Err(ApiError::Unavailable));
    assert_eq!(futures::executor::block_on(refresh_tokens("R1")), None);
    assert_eq!(futures::executor::block_on(HttpRefresher.refresh("")), None);
    assert_eq!(futures::executor::block_on(fetch_courses()), Err(ApiError::Unavailable));
    assert_eq!(futures::executor::block_on(fetch_student_summary("A1", "1")), Err(ApiError::Unavailable));
    assert_eq!(futures::executor::block_on(fetch_profile("A1", "1")), Err(ApiError::Unavailable));
    assert!(matches!(futures::executor::block_on(fetch_enrolled_courses("A1", "1")), Err(ApiError::Unavailable)));
}
