use axum::{
    Json, Router,
    extract::{FromRef, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, Authenticated, JsonBody, SessionResolver,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
        UnauthorizedResponse,
    },
};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PostResult;
use crate::models::{CreatePost, DeleteParams, DeleteResponse, Post};
use crate::repository::PostRepository;
use crate::service::PostService;

const TAG: &str = "posts";

/// OpenAPI documentation for Posts API
#[derive(OpenApi)]
#[openapi(
    paths(list_posts, create_post, delete_post),
    components(
        schemas(Post, CreatePost, DeleteResponse),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = TAG, description = "Blog post endpoints")
    )
)]
pub struct ApiDoc;

/// Router state: the service plus the session resolver the gate reads.
pub struct PostsState<R: PostRepository> {
    pub service: Arc<PostService<R>>,
    pub sessions: SessionResolver,
}

impl<R: PostRepository> Clone for PostsState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            sessions: self.sessions.clone(),
        }
    }
}

impl<R: PostRepository> FromRef<PostsState<R>> for SessionResolver {
    fn from_ref(state: &PostsState<R>) -> Self {
        state.sessions.clone()
    }
}

/// Create the posts router. Every route sits behind the session gate.
pub fn router<R: PostRepository + 'static>(
    service: PostService<R>,
    sessions: SessionResolver,
) -> Router {
    let state = PostsState {
        service: Arc::new(service),
        sessions,
    };

    Router::new()
        .route("/", get(list_posts).post(create_post).delete(delete_post))
        .with_state(state)
}

/// List all posts
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All posts", body = Vec<Post>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    ),
    security(("session_cookie" = []))
)]
async fn list_posts<R: PostRepository>(
    Authenticated(session): Authenticated,
    State(state): State<PostsState<R>>,
) -> PostResult<Json<Vec<Post>>> {
    let posts = state.service.list_posts(&session).await?;
    Ok(Json(posts))
}

/// Create a post attributed to the current session
///
/// Any `author` field in the body is ignored.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreatePost,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    ),
    security(("session_cookie" = []))
)]
async fn create_post<R: PostRepository>(
    Authenticated(session): Authenticated,
    State(state): State<PostsState<R>>,
    JsonBody(payload): JsonBody<Value>,
) -> PostResult<impl IntoResponse> {
    let post = state.service.create_post(&session, &payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Delete a post owned by the current session
#[utoipa::path(
    delete,
    path = "",
    tag = TAG,
    params(DeleteParams),
    responses(
        (status = 200, description = "Post deleted", body = DeleteResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    ),
    security(("session_cookie" = []))
)]
async fn delete_post<R: PostRepository>(
    Authenticated(session): Authenticated,
    State(state): State<PostsState<R>>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let Query(params) =
        params.map_err(|e| AppError::BadRequest(format!("Invalid query string: {e}")))?;

    state
        .service
        .delete_post(&session, params.id.as_deref())
        .await?;

    Ok(Json(DeleteResponse { success: true }))
}
