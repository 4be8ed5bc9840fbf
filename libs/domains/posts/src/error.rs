use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::ConnectionError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Post ID is required")]
    MissingId,

    #[error("Post {0} is not owned by the requester")]
    Forbidden(String),

    #[error("Invalid post: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type PostResult<T> = Result<T, PostError>;

impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound(_) => AppError::NotFound("Post not found".to_string()),
            PostError::MissingId => AppError::BadRequest("Post ID is required".to_string()),
            PostError::Forbidden(_) => AppError::Forbidden("Forbidden".to_string()),
            PostError::Validation(errors) => AppError::ValidationError(errors),
            PostError::Connection(e) => AppError::Connection(e),
            PostError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for PostError {
    fn from(err: mongodb::error::Error) -> Self {
        PostError::Database(err.to_string())
    }
}
