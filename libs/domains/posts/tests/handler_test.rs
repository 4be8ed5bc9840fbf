//! Handler tests for Posts domain
//!
//! These drive the posts router end to end over the in-memory repository:
//! - the session gate runs before any storage access
//! - validation failures come back as field maps
//! - only the author may delete a post

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::SessionTokens;
use domain_posts::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::sessions;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

struct Harness {
    app: Router,
    repository: Arc<InMemoryPostRepository>,
    tokens: SessionTokens,
}

fn harness() -> Harness {
    let repository = Arc::new(InMemoryPostRepository::new());
    let tokens = sessions::tokens();
    let app = handlers::router(
        PostService::from_shared(Arc::clone(&repository)),
        sessions::resolver(),
    );
    Harness {
        app,
        repository,
        tokens,
    }
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(
    method: &str,
    uri: &str,
    user: Option<(&SessionTokens, &str)>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((tokens, name)) = user {
        let (key, value) = sessions::cookie_for(tokens, name);
        builder = builder.header(key, value);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn hello_all() -> Value {
    json!({"title": "Hello All", "content": "This is my first post body."})
}

#[tokio::test]
async fn test_alice_and_bob_scenario() {
    let h = harness();

    // Alice creates
    let response = h
        .app
        .clone()
        .oneshot(request("POST", "/", Some((&h.tokens, "Alice")), Some(hello_all())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = json_body(response.into_body()).await;
    assert_eq!(created["title"], "Hello All");
    assert_eq!(created["content"], "This is my first post body.");
    assert_eq!(created["author"], "Alice");
    assert!(created["createdAt"].is_string());
    let id = created["id"].as_str().unwrap().to_string();

    // Bob can read it
    let response = h
        .app
        .clone()
        .oneshot(request("GET", "/", Some((&h.tokens, "Bob")), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let posts: Vec<Post> = json_body(response.into_body()).await;
    assert!(posts.iter().any(|p| p.id.to_string() == id));

    // Bob cannot delete it
    let uri = format!("/?id={id}");
    let response = h
        .app
        .clone()
        .oneshot(request("DELETE", &uri, Some((&h.tokens, "Bob")), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.repository.len().await, 1);

    // Alice can
    let response = h
        .app
        .clone()
        .oneshot(request("DELETE", &uri, Some((&h.tokens, "Alice")), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({"success": true}));

    // Second delete reports absence
    let response = h
        .app
        .clone()
        .oneshot(request("DELETE", &uri, Some((&h.tokens, "Alice")), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // And the list no longer has it
    let response = h
        .app
        .oneshot(request("GET", "/", Some((&h.tokens, "Alice")), None))
        .await
        .unwrap();
    let posts: Vec<Post> = json_body(response.into_body()).await;
    assert!(posts.iter().all(|p| p.id.to_string() != id));
}

/// Counts every repository call, reads included
#[derive(Default)]
struct CountingRepository {
    inner: InMemoryPostRepository,
    calls: AtomicUsize,
}

impl CountingRepository {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostRepository for CountingRepository {
    async fn create(&self, post: Post) -> PostResult<Post> {
        self.hit();
        self.inner.create(post).await
    }

    async fn get_by_id(&self, id: Uuid) -> PostResult<Option<Post>> {
        self.hit();
        self.inner.get_by_id(id).await
    }

    async fn list(&self) -> PostResult<Vec<Post>> {
        self.hit();
        self.inner.list().await
    }

    async fn delete(&self, id: Uuid) -> PostResult<bool> {
        self.hit();
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn test_unauthenticated_requests_never_reach_storage() {
    let repository = Arc::new(CountingRepository::default());
    let app = handlers::router(
        PostService::from_shared(Arc::clone(&repository)),
        sessions::resolver(),
    );
    let id = Uuid::now_v7();

    let cases = [
        request("GET", "/", None, None),
        request("POST", "/", None, Some(hello_all())),
        request("DELETE", &format!("/?id={id}"), None, None),
    ];

    for req in cases {
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "UNAUTHORIZED");
    }

    assert_eq!(repository.calls(), 0);

    // The same routes do reach storage once a session is present.
    let tokens = sessions::tokens();
    let response = app
        .oneshot(request("GET", "/", Some((&tokens, "Alice")), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repository.calls(), 1);
}

#[tokio::test]
async fn test_forged_token_is_unauthorized() {
    let h = harness();

    let response = h
        .app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .header(header::COOKIE, "session_token=not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let h = harness();
    let token = sessions::token_for(&h.tokens, "Alice");

    let response = h
        .app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_validation_reports_fields() {
    let h = harness();

    let response = h
        .app
        .oneshot(request(
            "POST",
            "/",
            Some((&h.tokens, "Alice")),
            Some(json!({"title": "Hi", "content": "short"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["title"].is_array());
    assert!(body["details"]["content"].is_array());
    assert!(h.repository.is_empty().await);
}

#[tokio::test]
async fn test_create_missing_fields_reports_required() {
    let h = harness();

    let response = h
        .app
        .oneshot(request("POST", "/", Some((&h.tokens, "Alice")), Some(json!({}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["details"].get("title").is_some());
    assert!(body["details"].get("content").is_some());
}

#[tokio::test]
async fn test_create_malformed_json_is_bad_request() {
    let h = harness();
    let (key, value) = sessions::cookie_for(&h.tokens, "Alice");

    let response = h
        .app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(key, value)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(h.repository.is_empty().await);
}

#[tokio::test]
async fn test_create_ignores_client_author() {
    let h = harness();

    let response = h
        .app
        .oneshot(request(
            "POST",
            "/",
            Some((&h.tokens, "Alice")),
            Some(json!({
                "title": "Hello All",
                "content": "This is my first post body.",
                "author": "Mallory"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let post: Post = json_body(response.into_body()).await;
    assert_eq!(post.author, "Alice");
}

#[tokio::test]
async fn test_delete_without_id_is_bad_request() {
    let h = harness();

    let response = h
        .app
        .oneshot(request("DELETE", "/", Some((&h.tokens, "Alice")), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Post ID is required");
}

#[tokio::test]
async fn test_delete_malformed_id_is_not_found() {
    let h = harness();

    let response = h
        .app
        .oneshot(request("DELETE", "/?id=xyz", Some((&h.tokens, "Alice")), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
