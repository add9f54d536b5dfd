use super::*;

#[test]
fn join_url_inserts_single_slash() {
    assert_eq!(join_url("http://api.test/api", "user/token/"), "http://api.test/api/user/token/");
}

#[test]
fn join_url_collapses_duplicate_slashes() {
    assert_eq!(join_url("http://api.test/api/", "/user/token/"), "http://api.test/api/user/token/");
}

#[test]
fn api_url_keeps_trailing_slash_of_endpoint() {
    assert!(api_url("user/token/refresh/").ends_with("/user/token/refresh/"));
}

#[test]
fn cookie_lifetimes_favor_refresh_token() {
    assert!(REFRESH_TOKEN_TTL_DAYS > ACCESS_TOKEN_TTL_DAYS);
}
