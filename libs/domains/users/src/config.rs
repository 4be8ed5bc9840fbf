use core_config::{ConfigError, FromEnv, env_required};

/// GitHub OAuth client and redirect targets.
///
/// Loaded from environment variables:
/// - `GITHUB_CLIENT_ID` (required)
/// - `GITHUB_CLIENT_SECRET` (required)
/// - `APP_BASE_URL` (required): public origin of the app, e.g. `https://blog.example.com`
#[derive(Clone)]
pub struct OAuthConfig {
    pub github_client_id: String,
    pub github_client_secret: String,
    pub app_base_url: String,
}

impl OAuthConfig {
    pub fn new(
        github_client_id: impl Into<String>,
        github_client_secret: impl Into<String>,
        app_base_url: impl Into<String>,
    ) -> Self {
        Self {
            github_client_id: github_client_id.into(),
            github_client_secret: github_client_secret.into(),
            app_base_url: app_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Redirect URI registered with GitHub
    pub fn callback_url(&self) -> String {
        format!("{}/api/auth/callback/github", self.app_base_url)
    }

    /// Where a completed sign-in lands
    pub fn signed_in_url(&self) -> String {
        format!("{}/posts", self.app_base_url)
    }

    /// Where a refused sign-in lands
    pub fn access_denied_url(&self) -> String {
        format!("{}/login?error=AccessDenied", self.app_base_url)
    }

    pub fn uses_https(&self) -> bool {
        self.app_base_url.starts_with("https://")
    }
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("github_client_id", &self.github_client_id)
            .field("app_base_url", &self.app_base_url)
            .finish_non_exhaustive()
    }
}

impl FromEnv for OAuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_required("APP_BASE_URL")?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::ParseError {
                key: "APP_BASE_URL".to_string(),
                details: format!("expected an http(s) URL, got '{base_url}'"),
            });
        }

        Ok(Self::new(
            env_required("GITHUB_CLIENT_ID")?,
            env_required("GITHUB_CLIENT_SECRET")?,
            base_url,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [(&str, Option<&str>); 3] = [
        ("GITHUB_CLIENT_ID", Some("client-123")),
        ("GITHUB_CLIENT_SECRET", Some("shh")),
        ("APP_BASE_URL", Some("https://blog.example.com/")),
    ];

    #[test]
    fn test_from_env() {
        temp_env::with_vars(VARS, || {
            let config = OAuthConfig::from_env().unwrap();
            assert_eq!(config.github_client_id, "client-123");
            assert_eq!(config.app_base_url, "https://blog.example.com");
            assert_eq!(
                config.callback_url(),
                "https://blog.example.com/api/auth/callback/github"
            );
            assert_eq!(config.signed_in_url(), "https://blog.example.com/posts");
            assert_eq!(
                config.access_denied_url(),
                "https://blog.example.com/login?error=AccessDenied"
            );
            assert!(config.uses_https());
        });
    }

    #[test]
    fn test_missing_secret() {
        temp_env::with_vars(
            [
                ("GITHUB_CLIENT_ID", Some("client-123")),
                ("GITHUB_CLIENT_SECRET", None),
                ("APP_BASE_URL", Some("http://localhost:3000")),
            ],
            || {
                let err = OAuthConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "GITHUB_CLIENT_SECRET"));
            },
        );
    }

    #[test]
    fn test_base_url_must_be_http() {
        temp_env::with_vars(
            [
                ("GITHUB_CLIENT_ID", Some("client-123")),
                ("GITHUB_CLIENT_SECRET", Some("shh")),
                ("APP_BASE_URL", Some("blog.example.com")),
            ],
            || {
                assert!(matches!(
                    OAuthConfig::from_env(),
                    Err(ConfigError::ParseError { .. })
                ));
            },
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = OAuthConfig::new("id", "top-secret", "http://localhost:3000");
        assert!(!format!("{config:?}").contains("top-secret"));
    }
}
