//! Session authentication.
//!
//! - [`SessionTokens`]: signs and verifies HS256 session tokens
//! - [`SessionResolver`]: turns request headers into an optional [`Session`]
//! - [`require_authenticated`] / [`Authenticated`]: the authorization gate
//! - [`cookies`]: `Set-Cookie` builders and cookie parsing
//!
//! # Example
//!
//! ```ignore
//! use axum::extract::FromRef;
//! use axum_helpers::auth::{Authenticated, SessionConfig, SessionResolver, SessionTokens};
//!
//! #[derive(Clone)]
//! struct AppState {
//!     sessions: SessionResolver,
//! }
//!
//! impl FromRef<AppState> for SessionResolver {
//!     fn from_ref(state: &AppState) -> Self {
//!         state.sessions.clone()
//!     }
//! }
//!
//! async fn whoami(Authenticated(session): Authenticated) -> String {
//!     session.display_name
//! }
//! ```

pub mod config;
pub mod cookies;
pub mod gate;
pub mod session;
pub mod tokens;

pub use config::SessionConfig;
pub use gate::{AuthError, Authenticated, CurrentSession, require_authenticated};
pub use session::{Session, SessionResolver};
pub use tokens::{SessionClaims, SessionTokens};
