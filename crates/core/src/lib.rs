//! # stratum-core: Configuration layer for stratum
//!
//! Provides the validated database configuration consumed by the migration
//! pipeline. Connection parameters are resolved from the process environment
//! at the CLI boundary and validated at construction time, so an invalid
//! configuration never reaches a connection attempt.

pub mod config;
pub mod error;

pub use config::*;
pub use error::*;
