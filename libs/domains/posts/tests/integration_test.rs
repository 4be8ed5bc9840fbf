//! Integration tests for the MongoDB post repository
//!
//! These need Docker; run with `cargo test -- --ignored`.

use std::sync::Arc;

use domain_posts::*;
use test_utils::{TestDataBuilder, TestMongo};

fn new_post(builder: &TestDataBuilder, suffix: &str, author: &str) -> Post {
    Post::new(
        CreatePost {
            title: builder.title(suffix),
            content: "Integration test body text.".to_string(),
        },
        author,
    )
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_get_list_delete() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("posts_crud");
    let repo = MongoPostRepository::new(mongo.cache(&builder.database_name()));

    let created = repo.create(new_post(&builder, "one", "Alice")).await.unwrap();

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.author, "Alice");
    assert_eq!(fetched.title, created.title);
    assert_eq!(fetched.created_at.timestamp_millis(), created.created_at.timestamp_millis());

    repo.create(new_post(&builder, "two", "Bob")).await.unwrap();
    assert_eq!(repo.list().await.unwrap().len(), 2);

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_ownership_enforced_against_mongo() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("posts_ownership");
    let repo = Arc::new(MongoPostRepository::new(mongo.cache(&builder.database_name())));
    let service = PostService::from_shared(Arc::clone(&repo));

    let post = repo.create(new_post(&builder, "owned", "Alice")).await.unwrap();
    let id = post.id.to_string();

    let bob = axum_helpers::Session {
        subject_id: "gh-bob".into(),
        display_name: "Bob".into(),
        email: "bob@example.com".into(),
        image: None,
    };
    let result = service.delete_post(&bob, Some(id.as_str())).await;
    assert!(matches!(result, Err(PostError::Forbidden(_))));
    assert!(repo.get_by_id(post.id).await.unwrap().is_some());
}
