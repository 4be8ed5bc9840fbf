//! Posts API routes

use std::sync::Arc;

use axum::Router;
use domain_posts::{MongoPostRepository, PostService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoPostRepository::new(Arc::clone(&state.mongo));
    handlers::router(PostService::new(repository), state.sessions.clone())
}
