use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, AuthError};
use database::ConnectionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    /// The provider profile cannot be turned into a user, e.g. it has no email
    #[error("Sign-in denied: {0}")]
    AccessDenied(String),

    /// `state` missing, expired, or not matching the sign-in cookie
    #[error("Invalid OAuth state")]
    InvalidState,

    #[error("Missing authorization code")]
    MissingCode,

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error(transparent)]
    Session(#[from] AuthError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound("User not found".to_string()),
            UserError::AccessDenied(_) => AppError::Forbidden("Access denied".to_string()),
            UserError::InvalidState => {
                AppError::BadRequest("Invalid or expired sign-in state".to_string())
            }
            UserError::MissingCode => {
                AppError::BadRequest("Missing authorization code".to_string())
            }
            UserError::OAuth(msg) => {
                tracing::error!(error = %msg, "OAuth provider error");
                AppError::Unauthorized("OAuth authentication failed".to_string())
            }
            UserError::Session(e) => e.into(),
            UserError::Connection(e) => AppError::Connection(e),
            UserError::Database(msg) => AppError::Database(msg),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}
