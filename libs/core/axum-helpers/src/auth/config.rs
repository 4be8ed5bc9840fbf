use std::time::Duration;

use core_config::{ConfigError, Environment, FromEnv, env_parse_or, env_required};

/// Minimum accepted length of the signing secret
pub const MIN_SECRET_LEN: usize = 32;

/// Session lifetime when `SESSION_TTL_SECS` is unset (30 days)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Session token configuration.
///
/// Loaded from environment variables:
/// - `SESSION_SECRET` (required, at least 32 characters)
/// - `SESSION_TTL_SECS` (default: 2592000)
/// - `APP_ENV`: cookies are marked `Secure` in production
#[derive(Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl: Duration,
    pub secure_cookies: bool,
}

impl SessionConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        check_secret(&secret)?;
        Ok(Self {
            secret,
            ttl: DEFAULT_SESSION_TTL,
            secure_cookies: false,
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("ttl", &self.ttl)
            .field("secure_cookies", &self.secure_cookies)
            .finish_non_exhaustive()
    }
}

fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "SESSION_SECRET".to_string(),
            details: format!(
                "must be at least {MIN_SECRET_LEN} characters (got {}). Generate one with: openssl rand -base64 32",
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("SESSION_SECRET")?;
        check_secret(&secret)?;

        let ttl_secs = env_parse_or("SESSION_TTL_SECS", DEFAULT_SESSION_TTL.as_secs())?;

        Ok(Self {
            secret,
            ttl: Duration::from_secs(ttl_secs),
            secure_cookies: Environment::from_env().use_https(),
        })
    }
}
