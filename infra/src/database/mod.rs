//! Database connectivity and repository implementations

pub mod mysql;

use std::time::Duration;

use km_shared::config::DatabaseConfig;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

/// Build the MySQL connection pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.max_connections,
        "Connecting to MySQL"
    );
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect(&config.url)
        .await
}
