//! # Axum Helpers
//!
//! Shared web plumbing for the blog service.
//!
//! ## Modules
//!
//! - **[`auth`]**: session tokens, session resolution, the authorization gate
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: the error envelope and error codes
//! - **[`extractors`]**: JSON body extractor with enveloped rejections
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::{create_cors_layer, create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let cors = create_cors_layer(parse_origins("http://localhost:3000")?);
//! let router = create_router::<ApiDoc>(api_routes, health_router(app_info!()), cors);
//! create_production_app(router, &ServerConfig::default(), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{
    AuthError, Authenticated, CurrentSession, Session, SessionClaims, SessionConfig,
    SessionResolver, SessionTokens, require_authenticated,
};

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, parse_origins, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::JsonBody;
