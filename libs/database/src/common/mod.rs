//! Utilities shared by every backend

pub mod connection_cache;
pub mod error;
pub mod retry;

pub use connection_cache::{ConnectionCache, ConnectionState};
pub use error::{ConnectionError, DatabaseError, DatabaseResult};
pub use retry::{RetryConfig, retry_with_backoff};
