//! Session token extraction and hashing

use axum::http::{header, HeaderMap};
use cookie::Cookie;
use sha2::{Digest, Sha256};

/// Find the session token in the request headers
///
/// The named cookie wins. Otherwise an `Authorization: Bearer` header is used;
/// the scheme name matches case-insensitively.
/// Cookie headers that fail to parse are skipped, not rejected.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(|cookie| cookie.ok())
        .find(|cookie| cookie.name() == cookie_name && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_string());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

/// SHA-256 of the raw token as 64 hex characters
///
/// Stores keep only this digest, never the token itself.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
