use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PostResult;
use crate::models::Post;

/// Persistence for posts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a fully built post
    async fn create(&self, post: Post) -> PostResult<Post>;

    async fn get_by_id(&self, id: Uuid) -> PostResult<Option<Post>>;

    /// Every post, in storage order
    async fn list(&self) -> PostResult<Vec<Post>>;

    /// `false` when no post had that id
    async fn delete(&self, id: Uuid) -> PostResult<bool>;
}
