//! Fixtures shared by the app's route tests.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum_helpers::{SessionConfig, SessionResolver, SessionTokens};
use core_config::{Environment, app_info, server::ServerConfig};
use database::{ConnectionCache, DatabaseError};
use database::mongodb::MongoConfig;
use domain_users::OAuthConfig;

use crate::config::Config;
use crate::state::AppState;

pub fn test_config() -> Config {
    let session = SessionConfig::new("0123456789abcdef0123456789abcdef")
        .expect("valid test secret");
    Config {
        app: app_info!(),
        environment: Environment::Development,
        server: ServerConfig::default(),
        mongodb: MongoConfig::new("mongodb://127.0.0.1:1"),
        session,
        oauth: OAuthConfig::new("client-123", "github-secret", "http://localhost:3000"),
        cors_origins: vec![HeaderValue::from_static("http://localhost:3000")],
    }
}

/// State whose MongoDB connector always fails without touching the network.
pub fn state_with_unreachable_mongo() -> AppState {
    let config = test_config();
    let sessions = SessionResolver::new(SessionTokens::new(&config.session));
    AppState {
        config: Arc::new(config),
        mongo: Arc::new(ConnectionCache::new("mongodb", || async {
            Err(DatabaseError::ConnectionFailed("connection refused".into()))
        })),
        sessions,
    }
}
