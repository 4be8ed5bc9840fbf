use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use thiserror::Error;

use super::session::{Session, SessionResolver};
use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No session on the request
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Failed to sign session token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized | AuthError::InvalidToken(_) => {
                AppError::Unauthorized("Unauthorized".to_string())
            }
            AuthError::Signing(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

/// Resolve the session or fail with [`AuthError::Unauthorized`].
///
/// Handlers touching post data call this (or extract [`Authenticated`])
/// before any storage access.
pub fn require_authenticated(
    resolver: &SessionResolver,
    headers: &HeaderMap,
) -> Result<Session, AuthError> {
    resolver.resolve(headers).ok_or(AuthError::Unauthorized)
}

/// Extractor that rejects the request with 401 unless it carries a valid session.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Session);

impl<S> FromRequestParts<S> for Authenticated
where
    SessionResolver: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let resolver = SessionResolver::from_ref(state);
        let session = require_authenticated(&resolver, &parts.headers)?;
        Ok(Authenticated(session))
    }
}

/// Extractor for the optional session; never rejects.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

impl<S> FromRequestParts<S> for CurrentSession
where
    SessionResolver: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(
            SessionResolver::from_ref(state).resolve(&parts.headers),
        ))
    }
}
