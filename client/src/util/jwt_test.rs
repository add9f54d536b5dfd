use super::*;
use crate::util::test_support::token_with_claims;

#[test]
fn decode_extracts_identity_claims() {
    let token = token_with_claims(&serde_json::json!({
        "token_type": "access",
        "exp": 2_000_000_000,
        "user_id": 12,
        "username": "ada",
        "email": "ada@example.com"
    }));
    let user = decode(&token).unwrap();
    assert_eq!(user.user_id, "12");
    assert_eq!(user.username, "ada");
    assert_eq!(user.email.as_deref(), Some("ada@example.com"));
}

#[test]
fn decode_ignores_signature() {
    let token = token_with_claims(&serde_json::json!({ "user_id": 3, "username": "grace" }));
    let (unsigned, _) = token.rsplit_once('.').unwrap();
    let forged = format!("{unsigned}.not-the-real-signature");
    assert_eq!(decode(&forged).unwrap().username, "grace");
}

#[test]
fn decode_rejects_malformed_tokens() {
    for bad in ["just-one-segment", "header..sig", "h.!!!.s", "a.b.c.d"] {
        assert!(matches!(decode(bad), Err(DecodeError::Token(_))), "accepted {bad:?}");
    }
}

#[test]
fn decode_rejects_claims_without_username() {
    let token = token_with_claims(&serde_json::json!({ "user_id": 1, "exp": 10 }));
    let err = decode(&token).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Token(ref e) if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::Json(_))
    ));
}

#[test]
fn expiry_reads_integer_and_float_claims() {
    let int_token = token_with_claims(&serde_json::json!({ "exp": 1_700_000_000 }));
    assert_eq!(expiry(&int_token).unwrap(), 1_700_000_000);
    let float_token = token_with_claims(&serde_json::json!({ "exp": 1_700_000_000.9 }));
    assert_eq!(expiry(&float_token).unwrap(), 1_700_000_000);
}

#[test]
fn expiry_missing_claim_is_error() {
    let token = token_with_claims(&serde_json::json!({ "user_id": 1 }));
    assert!(matches!(expiry(&token), Err(DecodeError::MissingExpiry)));
}

#[test]
fn is_expired_compares_against_now() {
    let token = token_with_claims(&serde_json::json!({ "exp": 1_000 }));
    assert!(!is_expired(&token, 999));
    assert!(is_expired(&token, 1_001));
}

#[test]
fn is_expired_from_the_expiry_second_onward() {
    let token = token_with_claims(&serde_json::json!({ "exp": 1_700_000_000 }));
    assert!(is_expired(&token, 1_700_000_000));
}

#[test]
fn is_expired_treats_garbage_and_missing_exp_as_expired() {
    assert!(is_expired("", 0));
    assert!(is_expired("not-a-jwt", 0));
    let no_exp = token_with_claims(&serde_json::json!({ "user_id": 1, "username": "a" }));
    assert!(is_expired(&no_exp, 0));
}

#[test]
fn unix_now_is_after_2020() {
    assert!(unix_now() > 1_577_836_800);
}
