//! # stratum-migrate: Migration pipeline for stratum
//!
//! Applies a directory of ordered `.sql` files to a PostgreSQL database:
//! discover and validate the plan, bootstrap the uuid-ossp extension,
//! execute each file sequentially, stop on the first failure. No applied-
//! migrations ledger is kept; each file is expected to be idempotent
//! (`CREATE TABLE IF NOT EXISTS` and friends) or to fail loudly.

pub mod bootstrap;
pub mod definitions;
pub mod discovery;
pub mod error;
pub mod pool;
pub mod runner;
pub mod sql;

pub use definitions::*;
pub use error::*;
pub use runner::*;
