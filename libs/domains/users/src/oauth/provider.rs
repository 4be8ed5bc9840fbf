use async_trait::async_trait;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse as _, TokenUrl,
    basic::BasicClient,
};

use super::state::OAuthState;
use super::types::{OAuthUserInfo, TokenResponse};
use crate::error::UserError;

pub type OAuthResult<T> = Result<T, UserError>;

/// Client with authorize and token endpoints configured
pub type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// An OAuth 2 authorization-code provider with PKCE.
///
/// Implementors supply endpoints and credentials plus [`get_user_info`];
/// the redirect and code exchange are shared.
///
/// [`get_user_info`]: OAuthProvider::get_user_info
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn name(&self) -> &str;

    fn required_scopes(&self) -> &'static [&'static str];

    fn auth_url(&self) -> &str;
    fn token_url(&self) -> &str;
    fn client_id(&self) -> &str;
    fn client_secret(&self) -> &str;
    fn http_client(&self) -> &reqwest::Client;

    fn oauth_client(&self, redirect_uri: &str) -> OAuthResult<ConfiguredClient> {
        let invalid = |what: &str, e: oauth2::url::ParseError| {
            UserError::OAuth(format!("Invalid {what} URL: {e}"))
        };

        Ok(BasicClient::new(ClientId::new(self.client_id().to_string()))
            .set_client_secret(ClientSecret::new(self.client_secret().to_string()))
            .set_auth_uri(
                AuthUrl::new(self.auth_url().to_string()).map_err(|e| invalid("auth", e))?,
            )
            .set_token_uri(
                TokenUrl::new(self.token_url().to_string()).map_err(|e| invalid("token", e))?,
            )
            .set_redirect_uri(
                RedirectUrl::new(redirect_uri.to_string()).map_err(|e| invalid("redirect", e))?,
            ))
    }

    /// Provider URL the browser is sent to, carrying `state` and the S256
    /// challenge derived from its verifier.
    fn authorize_url(&self, state: &OAuthState, redirect_uri: &str) -> OAuthResult<String> {
        let verifier = PkceCodeVerifier::new(state.pkce_verifier.clone());
        let challenge = PkceCodeChallenge::from_code_verifier_sha256(&verifier);
        let csrf = state.csrf.clone();

        let (url, _) = self
            .required_scopes()
            .iter()
            .fold(
                self.oauth_client(redirect_uri)?
                    .authorize_url(move || CsrfToken::new(csrf)),
                |request, scope| request.add_scope(Scope::new(scope.to_string())),
            )
            .set_pkce_challenge(challenge)
            .url();

        Ok(url.to_string())
    }

    /// Trade the callback's code for an access token.
    async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: &str,
        redirect_uri: &str,
    ) -> OAuthResult<TokenResponse> {
        let token = self
            .oauth_client(redirect_uri)?
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(self.http_client())
            .await
            .map_err(|e| UserError::OAuth(format!("Failed to exchange code: {e}")))?;

        Ok(TokenResponse {
            access_token: token.access_token().secret().clone(),
        })
    }

    async fn get_user_info(&self, access_token: &str) -> OAuthResult<OAuthUserInfo>;
}
