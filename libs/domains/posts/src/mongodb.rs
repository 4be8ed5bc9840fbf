//! MongoDB implementation of PostRepository

use std::sync::Arc;

use async_trait::async_trait;
use database::ConnectionCache;
use futures::TryStreamExt;
use mongodb::{Collection, Database, bson::doc};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{PostError, PostResult};
use crate::models::{Post, PostDocument};
use crate::repository::PostRepository;

pub const COLLECTION: &str = "posts";

/// Posts in the `posts` collection.
///
/// Every operation goes through the shared connection cache, so the first
/// request after a failed connection attempt retries it.
pub struct MongoPostRepository {
    connection: Arc<ConnectionCache<Database>>,
}

impl MongoPostRepository {
    pub fn new(connection: Arc<ConnectionCache<Database>>) -> Self {
        Self { connection }
    }

    async fn collection(&self) -> PostResult<Collection<PostDocument>> {
        let db = self.connection.ensure_connected().await?;
        Ok(db.collection::<PostDocument>(COLLECTION))
    }
}

fn into_post(doc: PostDocument) -> PostResult<Post> {
    Post::try_from(doc).map_err(PostError::Database)
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    #[instrument(skip(self, post), fields(post_id = %post.id, author = %post.author))]
    async fn create(&self, post: Post) -> PostResult<Post> {
        self.collection()
            .await?
            .insert_one(PostDocument::from(&post))
            .await?;

        tracing::info!("Post created");
        Ok(post)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> PostResult<Option<Post>> {
        self.collection()
            .await?
            .find_one(doc! { "_id": id.to_string() })
            .await?
            .map(into_post)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> PostResult<Vec<Post>> {
        let cursor = self.collection().await?.find(doc! {}).await?;
        let docs: Vec<PostDocument> = cursor.try_collect().await?;
        docs.into_iter().map(into_post).collect()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> PostResult<bool> {
        let result = self
            .collection()
            .await?
            .delete_one(doc! { "_id": id.to_string() })
            .await?;

        if result.deleted_count > 0 {
            tracing::info!("Post deleted");
        }
        Ok(result.deleted_count > 0)
    }
}
