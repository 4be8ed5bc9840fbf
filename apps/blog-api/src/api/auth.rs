//! Sign-in and session routes

use std::sync::Arc;

use axum::Router;
use domain_users::{AuthState, GithubProvider, MongoUserRepository, UserService, auth_router};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let config = &state.config;
    let provider = GithubProvider::new(
        &config.oauth.github_client_id,
        &config.oauth.github_client_secret,
    );

    auth_router(AuthState {
        service: Arc::new(UserService::new(MongoUserRepository::new(Arc::clone(
            &state.mongo,
        )))),
        provider: Arc::new(provider),
        config: config.oauth.clone(),
        sessions: state.sessions.clone(),
        secure_cookies: config.session.secure_cookies,
    })
}
