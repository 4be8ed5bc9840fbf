use axum::http::HeaderValue;
use axum_helpers::{SessionConfig, parse_origins};
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_users::OAuthConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub session: SessionConfig,
    pub oauth: OAuthConfig,
    /// `CORS_ALLOWED_ORIGIN`, or `APP_BASE_URL` when unset
    pub cors_origins: Vec<HeaderValue>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let mongodb = MongoConfig::from_env()?;
        let session = SessionConfig::from_env()?;
        let oauth = OAuthConfig::from_env()?;

        let raw_origins = std::env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| oauth.app_base_url.clone());
        let cors_origins = parse_origins(&raw_origins)
            .map_err(|e| eyre::eyre!("Invalid CORS_ALLOWED_ORIGIN: {e}"))?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            mongodb,
            session,
            oauth,
            cors_origins,
        })
    }

    /// Deployment problems worth flagging but not fatal.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.environment.is_production() {
            if !self.oauth.uses_https() {
                warnings.push("APP_BASE_URL should use https in production".to_string());
            }
            if !self.session.secure_cookies {
                warnings.push("Session cookies are not marked Secure".to_string());
            }
        }
        warnings
    }
}
