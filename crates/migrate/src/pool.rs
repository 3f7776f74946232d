//! Connection pool setup
//!
//! One small pool per run, owned by the run entry points in `runner`.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use stratum_core::DatabaseConfig;

use crate::error::{MigrateError, MigrateResult};

/// Open a connection pool for the configured database.
pub async fn connect(config: &DatabaseConfig) -> MigrateResult<PgPool> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user)
        .password(&config.password);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| {
            MigrateError::Connection(format!(
                "Failed to connect to {}: {}",
                config.display_target(),
                e
            ))
        })?;

    tracing::debug!("connected to {}", config.display_target());
    Ok(pool)
}
