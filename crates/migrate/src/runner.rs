//! Migration runner - executes migrations against the database
//!
//! Sequential, stop-on-first-failure execution of the discovered plan. The
//! free functions own the pool for the duration of a run and close it on
//! every exit path; `MigrationRunner` itself never closes the pool it is
//! given.

use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use sqlx::PgPool;
use stratum_core::DatabaseConfig;

use crate::bootstrap;
use crate::definitions::{ApplyOutcome, MigrationFile, RunReport};
use crate::discovery;
use crate::error::{MigrateError, MigrateResult};
use crate::pool;
use crate::sql;

/// SQLSTATE codes for the duplicate-object error class: column, object,
/// function, schema, table.
const DUPLICATE_OBJECT_CODES: &[&str] = &["42701", "42710", "42723", "42P06", "42P07"];

/// Run every migration in `dir` against the configured database.
///
/// Connects, runs, and closes the pool before returning, on success and
/// failure alike.
pub async fn run_directory(config: &DatabaseConfig, dir: &Path) -> MigrateResult<RunReport> {
    let pool = pool::connect(config).await?;
    let result = MigrationRunner::new(pool.clone()).run(dir).await;
    pool.close().await;
    result
}

/// Apply one named migration file against the configured database.
///
/// Existence is checked before a connection is opened, so a bad filename
/// never costs a connection attempt. Pool lifetime is handled as in
/// [`run_directory`].
pub async fn apply_single(config: &DatabaseConfig, path: &Path) -> MigrateResult<ApplyOutcome> {
    if !path.is_file() {
        return Err(MigrateError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let pool = pool::connect(config).await?;
    let result = MigrationRunner::new(pool.clone()).apply_file(path).await;
    pool.close().await;
    result
}

/// Migration runner bound to an open connection pool.
pub struct MigrationRunner {
    pool: PgPool,
}

impl MigrationRunner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply every migration in `dir`, in validated version order.
    ///
    /// Bootstraps the uuid-ossp extension first. Stops at the first failing
    /// file; files after it are not attempted. An empty plan is a no-op
    /// success.
    pub async fn run(&self, dir: &Path) -> MigrateResult<RunReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        bootstrap::ensure_uuid_extension(&self.pool).await?;

        let migrations = discovery::discover(dir)?;
        if migrations.is_empty() {
            tracing::info!("no migrations found in {}", dir.display());
        }

        let mut applied_files = Vec::with_capacity(migrations.len());
        for migration in &migrations {
            self.apply(migration).await?;
            applied_files.push(migration.filename.clone());
        }

        Ok(RunReport {
            applied_count: applied_files.len(),
            applied_files,
            execution_time_ms: start.elapsed().as_millis(),
            started_at,
        })
    }

    /// Apply a single named file.
    ///
    /// Unlike the directory run, an error in the duplicate-object SQLSTATE
    /// class is downgraded to a warning: the objects the file creates are
    /// already there, and the run still reports success.
    pub async fn apply_file(&self, path: &Path) -> MigrateResult<ApplyOutcome> {
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let text = read_sql(path)?;
        tracing::info!("applying {}", filename);

        for statement in sql::split_statements(&text) {
            if let Err(e) = sqlx::query(&statement).execute(&self.pool).await {
                if is_duplicate_object(&e) {
                    tracing::warn!("{}: object already exists, treating as applied", filename);
                    return Ok(ApplyOutcome::AlreadyPresent);
                }
                return Err(MigrateError::Execution {
                    file: filename,
                    message: e.to_string(),
                });
            }
        }

        tracing::info!("applied {}", filename);
        Ok(ApplyOutcome::Applied)
    }

    async fn apply(&self, migration: &MigrationFile) -> MigrateResult<()> {
        let text = read_sql(&migration.path)?;
        if text.trim().is_empty() {
            tracing::info!("skipping {}: file is empty", migration.filename);
            return Ok(());
        }

        tracing::info!("applying {}", migration.filename);
        for statement in sql::split_statements(&text) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| MigrateError::Execution {
                    file: migration.filename.clone(),
                    message: e.to_string(),
                })?;
        }
        tracing::info!("applied {}", migration.filename);

        Ok(())
    }
}

fn read_sql(path: &Path) -> MigrateResult<String> {
    fs::read_to_string(path).map_err(|e| MigrateError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn is_duplicate_object(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map_or(false, |code| is_duplicate_object_code(code.as_ref()))
}

fn is_duplicate_object_code(code: &str) -> bool {
    DUPLICATE_OBJECT_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_object_code_classification() {
        assert!(is_duplicate_object_code("42P07"));
        assert!(is_duplicate_object_code("42710"));
        assert!(is_duplicate_object_code("42701"));

        // syntax error and undefined table are fatal
        assert!(!is_duplicate_object_code("42601"));
        assert!(!is_duplicate_object_code("42P01"));
    }
}
