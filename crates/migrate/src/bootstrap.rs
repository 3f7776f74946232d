//! Extension bootstrap
//!
//! The schemas managed by stratum use `uuid_generate_v4()` column defaults,
//! which live in the uuid-ossp extension. It is created idempotently before
//! any migration runs. Failure here is fatal for the whole run.

use sqlx::PgPool;

use crate::error::{MigrateError, MigrateResult};

const UUID_EXTENSION_SQL: &str = r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#;

/// Ensure the UUID generation extension exists.
pub async fn ensure_uuid_extension(pool: &PgPool) -> MigrateResult<()> {
    sqlx::query(UUID_EXTENSION_SQL)
        .execute(pool)
        .await
        .map_err(|e| MigrateError::Bootstrap(e.to_string()))?;

    tracing::debug!("uuid-ossp extension present");
    Ok(())
}
