//! Core types for the migration pipeline

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// A discovered migration file, ordered by its numeric version prefix.
///
/// Content is read at execution time, not cached here.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationFile {
    /// Version parsed from the filename prefix (`001_init.sql` -> 1)
    pub version: u64,
    /// Human-readable name derived from the rest of the filename
    pub name: String,
    /// Full filename including extension
    pub filename: String,
    /// Path used to read the SQL text when the file is executed
    pub path: PathBuf,
}

/// Result of a directory run, returned to the invoking layer.
///
/// The CLI translates this into output lines and an exit status; nothing in
/// the pipeline calls `process::exit` itself.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Number of files that were executed
    pub applied_count: usize,
    /// Filenames in the order they were applied
    pub applied_files: Vec<String>,
    /// Total execution time in milliseconds
    pub execution_time_ms: u128,
    /// When the run started
    pub started_at: DateTime<Utc>,
}

/// Outcome of the single-file variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The file's statements ran to completion
    Applied,
    /// Execution hit a duplicate-object error; the schema objects already
    /// exist and the run still counts as a success
    AlreadyPresent,
}
