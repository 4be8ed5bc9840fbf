use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tracing::info;

use super::MongoConfig;
use crate::common::{ConnectionCache, DatabaseError};

/// Open a client with the configured pool bounds and verify it with `ping`.
///
/// Returns a handle to `config.database`.
pub async fn connect_from_config(config: &MongoConfig) -> Result<Database, DatabaseError> {
    info!(url = %config.redacted_url(), database = %config.database, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.server_selection_timeout);
    options.max_idle_time = Some(config.max_idle_time);
    if let Some(app_name) = &config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;
    let database = client.database(&config.database);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(database = %config.database, "Connected to MongoDB");
    Ok(database)
}

/// A lazily connecting cache for `config`.
///
/// Success means connected and pinged, nothing more. Schema setup such as
/// index creation belongs to the repositories and must not fail the cache.
pub fn connection_cache(config: MongoConfig) -> ConnectionCache<Database> {
    ConnectionCache::new("mongodb", move || {
        let config = config.clone();
        async move { connect_from_config(&config).await }
    })
}
