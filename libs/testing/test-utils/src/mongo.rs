//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that starts a throwaway MongoDB container.

use std::sync::Arc;

use database::ConnectionCache;
use database::mongodb::{Database, MongoConfig, connect_from_config, connection_cache};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let cache = mongo.cache("my_test");
/// let db = cache.ensure_connected().await.unwrap();
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a MongoDB 7 container.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7.0")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{host_port}/?directConnection=true");
        tracing::info!(port = host_port, "Test MongoDB ready (mongo:7.0)");

        Self {
            container,
            connection_string,
        }
    }

    /// Config pointing at a database named after the test, so tests sharing
    /// a container stay isolated.
    pub fn config(&self, database: &str) -> MongoConfig {
        MongoConfig::with_database(self.connection_string.clone(), database)
            .with_app_name("test-utils")
    }

    /// A connected database handle.
    pub async fn database(&self, database: &str) -> Database {
        connect_from_config(&self.config(database))
            .await
            .expect("Failed to connect to test MongoDB")
    }

    /// A lazily connecting cache over the test database.
    pub fn cache(&self, database: &str) -> Arc<ConnectionCache<Database>> {
        Arc::new(connection_cache(self.config(database)))
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
