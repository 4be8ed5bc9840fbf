use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A blog post as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Display name of the session that created the post
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload. The author is never read from the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct CreatePost {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Title must be between 3 and 100 characters"
    ))]
    pub title: String,
    #[validate(length(
        min = 10,
        max = 10000,
        message = "Content must be between 10 and 10000 characters"
    ))]
    pub content: String,
}

/// Query string of `DELETE /posts`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DeleteParams {
    /// Post ID
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

impl Post {
    /// Build a new post attributed to `author`.
    pub fn new(input: CreatePost, author: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            content: input.content,
            author: author.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, display_name: &str) -> bool {
        self.author == display_name
    }
}

/// Storage shape of a post in the `posts` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
}

impl From<&Post> for PostDocument {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            created_at: bson::DateTime::from_millis(post.created_at.timestamp_millis()),
            updated_at: bson::DateTime::from_millis(post.updated_at.timestamp_millis()),
        }
    }
}

impl TryFrom<PostDocument> for Post {
    type Error = String;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&doc.id).map_err(|e| format!("invalid _id '{}': {e}", doc.id))?;
        Ok(Self {
            id,
            title: doc.title,
            content: doc.content,
            author: doc.author,
            created_at: from_bson_datetime(doc.created_at),
            updated_at: from_bson_datetime(doc.updated_at),
        })
    }
}

fn from_bson_datetime(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}
