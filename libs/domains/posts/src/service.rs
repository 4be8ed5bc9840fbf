//! Post Service - request-level rules on top of the repository

use std::sync::Arc;

use axum_helpers::Session;
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{PostError, PostResult};
use crate::models::Post;
use crate::repository::PostRepository;
use crate::validation::validate_payload;

/// Operations behind the `/posts` routes.
///
/// Callers pass an already-resolved [`Session`]; the service never sees an
/// anonymous request.
pub struct PostService<R: PostRepository> {
    repository: Arc<R>,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Every post; reading is not restricted to the author.
    #[instrument(skip(self, session), fields(user = %session.display_name))]
    pub async fn list_posts(&self, session: &Session) -> PostResult<Vec<Post>> {
        self.repository.list().await
    }

    /// Validate `payload` and store it attributed to the session's display name.
    #[instrument(skip(self, session, payload), fields(user = %session.display_name))]
    pub async fn create_post(&self, session: &Session, payload: &Value) -> PostResult<Post> {
        let input = validate_payload(payload)?;
        let post = Post::new(input, session.display_name.clone());
        self.repository.create(post).await
    }

    /// Delete a post owned by the session.
    ///
    /// An id that is absent fails with [`PostError::MissingId`]; one that is
    /// not a valid post id, or names no post, fails with
    /// [`PostError::NotFound`].
    #[instrument(skip(self, session), fields(user = %session.display_name))]
    pub async fn delete_post(&self, session: &Session, id: Option<&str>) -> PostResult<()> {
        let raw_id = id.map(str::trim).filter(|s| !s.is_empty()).ok_or(PostError::MissingId)?;
        let id = Uuid::parse_str(raw_id).map_err(|_| PostError::NotFound(raw_id.to_string()))?;

        let post = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| PostError::NotFound(id.to_string()))?;

        if !post.is_owned_by(&session.display_name) {
            tracing::warn!(post_id = %id, author = %post.author, "Delete refused for non-owner");
            return Err(PostError::Forbidden(id.to_string()));
        }

        if !self.repository.delete(id).await? {
            // Removed between the lookup and the delete.
            return Err(PostError::NotFound(id.to_string()));
        }

        tracing::info!(post_id = %id, "Post deleted by owner");
        Ok(())
    }
}
