//! Deployment self-check
//!
//! Reports which settings are present and what looks wrong, never the values.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigChecks {
    pub mongodb_uri: bool,
    pub session_secret: bool,
    pub github_client_id: bool,
    pub github_client_secret: bool,
    pub app_base_url: bool,
}

#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub status: &'static str,
    pub environment: &'static str,
    pub checks: ConfigChecks,
    /// Connection cache state: `empty`, `connecting` or `ready`
    pub mongodb: String,
    pub warnings: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/debug/config", get(config_report))
        .with_state(state)
}

async fn config_report(State(state): State<AppState>) -> Json<ConfigReport> {
    let config = &state.config;
    let checks = ConfigChecks {
        mongodb_uri: !config.mongodb.url.is_empty(),
        session_secret: !config.session.secret.is_empty(),
        github_client_id: !config.oauth.github_client_id.is_empty(),
        github_client_secret: !config.oauth.github_client_secret.is_empty(),
        app_base_url: !config.oauth.app_base_url.is_empty(),
    };
    let warnings = config.warnings();

    Json(ConfigReport {
        status: if warnings.is_empty() { "ok" } else { "warning" },
        environment: config.environment.as_str(),
        checks,
        mongodb: state.mongo.state().await.to_string(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::state_with_unreachable_mongo;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_report_has_no_secret_values() {
        let app = router(state_with_unreachable_mongo());

        let response = app
            .oneshot(Request::get("/debug/config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let raw = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!raw.contains("0123456789abcdef"));
        assert!(!raw.contains("github-secret"));

        let body: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["environment"], "development");
        assert_eq!(body["checks"]["sessionSecret"], true);
        assert_eq!(body["mongodb"], "empty");
    }
}
