//! Process-local [`PostRepository`] for tests and local runs without MongoDB.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::PostResult;
use crate::models::Post;
use crate::repository::PostRepository;

#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> PostResult<Post> {
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn get_by_id(&self, id: Uuid) -> PostResult<Option<Post>> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> PostResult<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    async fn delete(&self, id: Uuid) -> PostResult<bool> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }
}
