//! API routes
//!
//! Everything here is nested under `/api` by `axum_helpers::create_router`.

pub mod auth;
pub mod debug;
pub mod health;
pub mod posts;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/posts", posts::router(state))
        .nest("/auth", auth::router(state))
        .merge(health::router(state.clone()))
        .merge(debug::router(state.clone()))
}
