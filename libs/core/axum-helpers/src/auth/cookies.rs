//! Cookie helpers for session and sign-in state.

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, header, header::InvalidHeaderValue};

/// Cookie holding the session token
pub const SESSION_COOKIE: &str = "session_token";

/// Attributes shared by the cookies this service sets
#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub max_age: Duration,
    pub secure: bool,
}

/// Build an HttpOnly, SameSite=Lax `Set-Cookie` value scoped to `/`.
pub fn build_cookie(
    name: &str,
    value: &str,
    options: CookieOptions,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{name}={value}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        options.max_age.as_secs()
    );
    if options.secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// `Set-Cookie` value that deletes `name` on the client.
pub fn expire_cookie(name: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    build_cookie(
        name,
        "",
        CookieOptions {
            max_age: Duration::ZERO,
            secure,
        },
    )
}

/// Find `name` in a single `Cookie` header value.
pub fn extract_cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

/// Find `name` across every `Cookie` header of a request.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|raw| extract_cookie_value(raw, name))
}

/// Bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
