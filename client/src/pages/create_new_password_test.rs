use super::*;

fn link() -> (Option<String>, Option<String>) {
    (Some("482913".to_owned()), Some("MTI".to_owned()))
}

#[test]
fn validate_new_password_builds_request_from_link() {
    let (otp, uuidb64) = link();
    let request = validate_new_password("hunter22", "hunter22", otp, uuidb64).unwrap();
    assert_eq!(
        request,
        NewPasswordRequest { password: "hunter22".to_owned(), otp: "482913".to_owned(), uuidb64: "MTI".to_owned() }
    );
}

#[test]
fn validate_new_password_checks_form_before_link() {
    assert_eq!(validate_new_password("", "", None, None), Err("Enter a new password."));
    assert_eq!(validate_new_password("a", "b", None, None), Err("Passwords do not match"));
}

#[test]
fn validate_new_password_rejects_incomplete_links() {
    let (otp, uuidb64) = link();
    assert_eq!(
        validate_new_password("pw", "pw", otp, None),
        Err("This reset link is invalid or incomplete.")
    );
    assert_eq!(
        validate_new_password("pw", "pw", Some(String::new()), uuidb64),
        Err("This reset link is invalid or incomplete.")
    );
}
