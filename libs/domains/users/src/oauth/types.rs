use serde::Deserialize;

/// Profile fields the service needs from an identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthUserInfo {
    pub provider_user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Provider handle, e.g. the GitHub login
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Query string GitHub sends back to the callback.
///
/// `error` is set instead of `code` when the user cancels on GitHub.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}
