//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Connects on demand, so a cold or reset cache is exercised here too.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mongo = state.mongo.clone();
    let probe: HealthCheckFuture = Box::pin(async move {
        let db = mongo.ensure_connected().await.map_err(|e| e.to_string())?;
        if check_health(&db).await {
            Ok(())
        } else {
            Err("ping failed".to_string())
        }
    });

    run_health_checks(vec![("mongodb", probe)]).await
}
