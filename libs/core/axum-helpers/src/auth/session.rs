use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::cookies::{SESSION_COOKIE, bearer_token, cookie_value};
use super::tokens::{SessionClaims, SessionTokens};

/// The authenticated identity attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Identity-provider user id
    pub subject_id: String,
    /// Name posts are attributed to; ownership is decided by this value
    pub display_name: String,
    pub email: String,
    pub image: Option<String>,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Self {
            subject_id: claims.sub,
            display_name: claims.name,
            email: claims.email,
            image: claims.picture,
        }
    }
}

/// Resolves the current request's session from its headers.
///
/// The `session_token` cookie is tried first, then an
/// `Authorization: Bearer` header. A stale cookie does not mask a valid
/// bearer token.
#[derive(Clone, Debug)]
pub struct SessionResolver {
    tokens: SessionTokens,
}

impl SessionResolver {
    pub fn new(tokens: SessionTokens) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    /// `None` when no token is present or none passes verification.
    pub fn resolve(&self, headers: &HeaderMap) -> Option<Session> {
        cookie_value(headers, SESSION_COOKIE)
            .and_then(|token| self.verify(&token, "cookie"))
            .or_else(|| bearer_token(headers).and_then(|token| self.verify(&token, "bearer")))
    }

    fn verify(&self, token: &str, source: &'static str) -> Option<Session> {
        match self.tokens.verify(token) {
            Ok(claims) => Some(claims.into()),
            Err(e) => {
                tracing::debug!(source, error = %e, "Session token rejected");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionConfig;
    use axum::http::{HeaderValue, header};

    fn resolver() -> SessionResolver {
        let config = SessionConfig::new("test-secret-key-that-is-at-least-32-chars").unwrap();
        SessionResolver::new(SessionTokens::new(&config))
    }

    #[test]
    fn test_no_token_means_no_session() {
        assert_eq!(resolver().resolve(&HeaderMap::new()), None);
    }

    #[test]
    fn test_resolves_from_cookie() {
        let resolver = resolver();
        let token = resolver
            .tokens()
            .issue("42", "Alice", "alice@example.com", None)
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap(),
        );

        let session = resolver.resolve(&headers).unwrap();
        assert_eq!(session.subject_id, "42");
        assert_eq!(session.display_name, "Alice");
        assert_eq!(session.image, None);
    }

    #[test]
    fn test_resolves_from_bearer() {
        let resolver = resolver();
        let token = resolver
            .tokens()
            .issue("7", "Bob", "bob@example.com", Some("https://img/b.png"))
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let session = resolver.resolve(&headers).unwrap();
        assert_eq!(session.display_name, "Bob");
        assert_eq!(session.image.as_deref(), Some("https://img/b.png"));
    }

    #[test]
    fn test_tampered_token_is_no_session() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session_token=eyJhbGciOiJIUzI1NiJ9.e30.forged"),
        );
        assert_eq!(resolver().resolve(&headers), None);
    }

    #[test]
    fn test_stale_cookie_falls_back_to_bearer() {
        let resolver = resolver();
        let token = resolver
            .tokens()
            .issue("7", "Bob", "bob@example.com", None)
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session_token=eyJhbGciOiJIUzI1NiJ9.e30.expired"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let session = resolver.resolve(&headers).unwrap();
        assert_eq!(session.display_name, "Bob");
    }

    #[test]
    fn test_valid_cookie_wins_over_bearer() {
        let resolver = resolver();
        let cookie = resolver
            .tokens()
            .issue("1", "Alice", "alice@example.com", None)
            .unwrap();
        let bearer = resolver
            .tokens()
            .issue("7", "Bob", "bob@example.com", None)
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{SESSION_COOKIE}={cookie}")).unwrap(),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {bearer}")).unwrap(),
        );

        assert_eq!(resolver.resolve(&headers).unwrap().display_name, "Alice");
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let session = Session {
            subject_id: "1".into(),
            display_name: "Alice".into(),
            email: "alice@example.com".into(),
            image: None,
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["displayName"], "Alice");
        assert_eq!(json["subjectId"], "1");
    }
}
