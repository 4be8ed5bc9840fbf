//! GitHub sign-in: authorize redirect, code exchange, profile fetch.

pub mod github;
pub mod provider;
pub mod state;
pub mod types;

pub use github::GithubProvider;
pub use provider::{OAuthProvider, OAuthResult};
pub use state::{OAUTH_STATE_COOKIE, OAuthState, STATE_TTL};
pub use types::{OAuthCallbackParams, OAuthUserInfo, TokenResponse};
