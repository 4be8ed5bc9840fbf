use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};

/// Database used when `MONGODB_DATABASE` is not set
pub const DEFAULT_DATABASE: &str = "full-stack-app";

/// MongoDB connection settings.
///
/// ```ignore
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "blog")
///     .with_app_name("blog-api");
/// ```
#[derive(Clone)]
pub struct MongoConfig {
    /// `mongodb://` or `mongodb+srv://` connection string
    pub url: String,

    pub database: String,

    /// Reported to the server in its connection logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,

    pub connect_timeout: Duration,

    pub server_selection_timeout: Duration,

    /// Pooled sockets idle longer than this are closed
    pub max_idle_time: Duration,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Connection string with any credentials masked, safe to log.
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}://***@{}", &self.url[..scheme_end], &self.url[at + 1..])
            }
            _ => self.url.clone(),
        }
    }
}

impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("url", &self.redacted_url())
            .field("database", &self.database)
            .field("app_name", &self.app_name)
            .field("max_pool_size", &self.max_pool_size)
            .finish_non_exhaustive()
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            max_pool_size: 10,
            connect_timeout: Duration::from_secs(10),
            server_selection_timeout: Duration::from_secs(5),
            max_idle_time: Duration::from_secs(45),
        }
    }
}

/// Reject connection strings without a MongoDB scheme.
pub fn validate_uri(url: &str) -> Result<(), String> {
    if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
        Ok(())
    } else {
        Err("must start with mongodb:// or mongodb+srv://".to_string())
    }
}

/// Environment variables:
/// - `MONGODB_URI` (required)
/// - `MONGODB_DATABASE` (default: `full-stack-app`)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 10)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 5)
/// - `MONGODB_MAX_IDLE_SECS` (default: 45)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("MONGODB_URI")?;
        validate_uri(&url).map_err(|details| ConfigError::ParseError {
            key: "MONGODB_URI".to_string(),
            details,
        })?;

        let defaults = Self::default();

        Ok(Self {
            url,
            database: env_or_default("MONGODB_DATABASE", DEFAULT_DATABASE),
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            connect_timeout: Duration::from_secs(env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout.as_secs(),
            )?),
            server_selection_timeout: Duration::from_secs(env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout.as_secs(),
            )?),
            max_idle_time: Duration::from_secs(env_parse_or(
                "MONGODB_MAX_IDLE_SECS",
                defaults.max_idle_time.as_secs(),
            )?),
        })
    }
}
