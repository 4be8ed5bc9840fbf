//! Database library: MongoDB connector, configuration, health checks, and
//! the process-wide connection cache shared by every data-access route.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::{ConnectionCache, mongodb::{MongoConfig, connect_from_config}};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "blog");
//! let cache = ConnectionCache::new("mongodb", move || {
//!     let config = config.clone();
//!     async move { connect_from_config(&config).await }
//! });
//!
//! // First caller connects, everyone after reuses the handle.
//! let db = cache.ensure_connected().await?;
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

// Re-exports for convenience
pub use common::{
    ConnectionCache, ConnectionError, ConnectionState, DatabaseError, DatabaseResult, RetryConfig,
    retry_with_backoff,
};
