//! Users Domain
//!
//! Users exist to back sessions: one is created the first time someone signs
//! in with GitHub and matched by email afterwards.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /auth/signin, /auth/callback, /auth/session, /auth/signout
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │   Service   │     │    OAuth    │  ← GitHub provider, state + PKCE
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← upsert by email (MongoDB, in-memory)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_users::{AuthState, GithubProvider, MongoUserRepository, UserService, auth_router};
//!
//! let state = AuthState {
//!     service: Arc::new(UserService::new(MongoUserRepository::new(cache))),
//!     provider: Arc::new(GithubProvider::new(&config.github_client_id, &config.github_client_secret)),
//!     config,
//!     sessions,
//!     secure_cookies: environment.use_https(),
//! };
//! let router = auth_router(state);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod oauth;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use config::OAuthConfig;
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, AuthState, SessionResponse, auth_router};
pub use models::{NewUser, User, UserDocument};
pub use self::mongodb::{MongoUserRepository, ensure_indexes, init_indexes};
pub use oauth::{GithubProvider, OAuthProvider, OAuthUserInfo};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
