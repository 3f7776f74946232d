//! Error types for the migration pipeline
//!
//! Every failure class the pipeline can hit is a variant here; nothing is
//! retried and every error ends the run. The CLI boundary is the only place
//! these are turned into an exit status.

use stratum_core::ConfigError;
use thiserror::Error;

/// Result type alias for migration operations
pub type MigrateResult<T> = Result<T, MigrateError>;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid migration filename '{filename}': {reason}")]
    InvalidFilename { filename: String, reason: String },

    #[error("Duplicate migration version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        version: u64,
        first: String,
        second: String,
    },

    #[error("Ambiguous migration order: '{first}' and '{second}' have version prefixes of different widths, zero-pad them to a common width")]
    AmbiguousOrder { first: String, second: String },

    #[error("Migration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Extension bootstrap failed: {0}")]
    Bootstrap(String),

    #[error("Failed to execute {file}: {message}")]
    Execution { file: String, message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
