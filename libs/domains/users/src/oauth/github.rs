use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;

use super::provider::{OAuthProvider, OAuthResult};
use super::types::OAuthUserInfo;
use crate::error::UserError;

const API_BASE: &str = "https://api.github.com";
const CLIENT_USER_AGENT: &str = "blog-api";

#[derive(Clone)]
pub struct GithubProvider {
    client_id: String,
    client_secret: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    id: i64,
    login: String,
    email: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

impl GithubProvider {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn api_get(&self, path: &str, access_token: &str) -> OAuthResult<reqwest::Response> {
        self.http_client
            .get(format!("{API_BASE}{path}"))
            .bearer_auth(access_token)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| UserError::OAuth(format!("GitHub request {path} failed: {e}")))
    }

    /// Users with a private email expose it only through `/user/emails`.
    async fn fetch_primary_email(&self, access_token: &str) -> OAuthResult<Option<String>> {
        let response = self.api_get("/user/emails", access_token).await?;
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "GitHub emails not readable");
            return Ok(None);
        }

        let emails: Vec<GithubEmail> = response
            .json()
            .await
            .map_err(|e| UserError::OAuth(format!("Failed to parse emails: {e}")))?;

        Ok(primary_verified(emails))
    }
}

fn primary_verified(emails: Vec<GithubEmail>) -> Option<String> {
    emails
        .into_iter()
        .find(|e| e.primary && e.verified)
        .map(|e| e.email)
}

#[async_trait]
impl OAuthProvider for GithubProvider {
    fn name(&self) -> &str {
        "github"
    }

    fn required_scopes(&self) -> &'static [&'static str] {
        &["read:user", "user:email"]
    }

    fn auth_url(&self) -> &str {
        "https://github.com/login/oauth/authorize"
    }

    fn token_url(&self) -> &str {
        "https://github.com/login/oauth/access_token"
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn client_secret(&self) -> &str {
        &self.client_secret
    }

    fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    async fn get_user_info(&self, access_token: &str) -> OAuthResult<OAuthUserInfo> {
        let response = self.api_get("/user", access_token).await?;
        if !response.status().is_success() {
            return Err(UserError::OAuth(format!(
                "GitHub API returned {}",
                response.status()
            )));
        }

        let user: GithubUser = response
            .json()
            .await
            .map_err(|e| UserError::OAuth(format!("Failed to parse user: {e}")))?;

        let email = match user.email.filter(|e| !e.is_empty()) {
            Some(email) => Some(email),
            None => self.fetch_primary_email(access_token).await?,
        };

        Ok(OAuthUserInfo {
            provider_user_id: user.id.to_string(),
            email,
            name: user.name,
            username: Some(user.login),
            avatar_url: user.avatar_url,
        })
    }
}
