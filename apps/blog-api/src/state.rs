//! Shared application state passed to the route builders.

use std::sync::Arc;

use axum_helpers::{SessionResolver, SessionTokens};
use database::ConnectionCache;
use database::mongodb::{Database, connection_cache};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// The one MongoDB connection every route shares
    pub mongo: Arc<ConnectionCache<Database>>,
    pub sessions: SessionResolver,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let mongo = Arc::new(connection_cache(config.mongodb.clone()));
        let sessions = SessionResolver::new(SessionTokens::new(&config.session));
        Self {
            config: Arc::new(config),
            mongo,
            sessions,
        }
    }
}
