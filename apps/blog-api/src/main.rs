use axum_helpers::{create_cors_layer, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::{RetryConfig, retry_with_backoff};
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

#[cfg(test)]
mod test_support;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    for warning in config.warnings() {
        warn!("{warning}");
    }

    info!(
        environment = config.environment.as_str(),
        mongodb = %config.mongodb.redacted_url(),
        database = %config.mongodb.database,
        "Starting blog API"
    );

    let state = AppState::new(config);

    // Warm the connection; requests retry on their own if this fails.
    let mongo = state.mongo.clone();
    if let Err(e) = retry_with_backoff(
        "mongodb warm-up",
        || mongo.ensure_connected(),
        RetryConfig::new(),
    )
    .await
    {
        warn!(error = %e, "MongoDB unavailable at startup, continuing");
    }

    let cors = create_cors_layer(state.config.cors_origins.clone());
    let router = create_router::<openapi::ApiDoc>(
        api::routes(&state),
        health_router(state.config.app),
        cors,
    );

    let mongo = state.mongo.clone();
    create_production_app(router, &state.config.server, async move {
        if let Some(db) = mongo.reset().await {
            info!("Shutting down: closing MongoDB connections");
            db.client().clone().shutdown().await;
            info!("MongoDB connection closed");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Blog API shutdown complete");
    Ok(())
}
