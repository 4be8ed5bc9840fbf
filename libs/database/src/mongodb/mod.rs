//! MongoDB connector, configuration, and health checks

mod config;
mod connector;
mod health;

pub use config::{MongoConfig, validate_uri};
pub use connector::{connect_from_config, connection_cache};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
