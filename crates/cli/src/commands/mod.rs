pub mod apply;
pub mod list;
pub mod run;

use stratum_core::{ConfigError, DatabaseConfig};

/// Resolve the database config at the CLI boundary: strict by default,
/// local-development defaults behind `--local`.
pub(crate) fn load_config(local: bool) -> Result<DatabaseConfig, ConfigError> {
    if local {
        DatabaseConfig::from_env_or_defaults()
    } else {
        DatabaseConfig::from_env()
    }
}
