//! Database configuration
//!
//! Connection parameters come from five `DB_*` environment variables. The
//! strict loader requires all of them; the lenient loader substitutes fixed
//! local-development defaults for absent ones. Both validate what they read.

use std::env;

use crate::error::ConfigError;

pub const ENV_HOST: &str = "DB_HOST";
pub const ENV_PORT: &str = "DB_PORT";
pub const ENV_NAME: &str = "DB_NAME";
pub const ENV_USER: &str = "DB_USER";
pub const ENV_PASSWORD: &str = "DB_PASSWORD";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_NAME: &str = "stratum_dev";
const DEFAULT_USER: &str = "stratum";
const DEFAULT_PASSWORD: &str = "stratum";

/// Validated PostgreSQL connection parameters.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl DatabaseConfig {
    /// Strict loader: every `DB_*` variable must be present and non-empty.
    ///
    /// Fails naming the first missing key, before any I/O happens.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: require_env(ENV_HOST)?,
            port: parse_port(ENV_PORT, &require_env(ENV_PORT)?)?,
            database: require_env(ENV_NAME)?,
            user: require_env(ENV_USER)?,
            password: require_env(ENV_PASSWORD)?,
        })
    }

    /// Lenient loader for local development: absent variables fall back to
    /// `stratum:stratum@localhost:5432/stratum_dev`. Variables that are set
    /// are still validated, so a malformed `DB_PORT` is an error here too.
    pub fn from_env_or_defaults() -> Result<Self, ConfigError> {
        let port = match optional_env(ENV_PORT) {
            Some(value) => parse_port(ENV_PORT, &value)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: optional_env(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database: optional_env(ENV_NAME).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            user: optional_env(ENV_USER).unwrap_or_else(|| DEFAULT_USER.to_string()),
            password: optional_env(ENV_PASSWORD).unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        })
    }

    /// Connection target with the password elided, safe for log output.
    pub fn display_target(&self) -> String {
        format!(
            "postgres://{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

fn require_env(key: &'static str) -> Result<String, ConfigError> {
    optional_env(key).ok_or(ConfigError::MissingEnv { key })
}

/// An empty or whitespace-only value counts as absent.
fn optional_env(key: &'static str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn parse_port(key: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidEnv {
        key,
        value: value.to_string(),
        reason: "expected a TCP port number".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_KEYS: [&str; 5] = [ENV_HOST, ENV_PORT, ENV_NAME, ENV_USER, ENV_PASSWORD];

    fn clear_env() {
        for key in ALL_KEYS {
            env::remove_var(key);
        }
    }

    fn set_all() {
        env::set_var(ENV_HOST, "db.internal");
        env::set_var(ENV_PORT, "6543");
        env::set_var(ENV_NAME, "cms");
        env::set_var(ENV_USER, "cms_admin");
        env::set_var(ENV_PASSWORD, "secret");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_all_keys() {
        clear_env();
        set_all();

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.database, "cms");
        assert_eq!(config.user, "cms_admin");
        assert_eq!(config.password, "secret");
    }

    #[test]
    #[serial]
    fn test_from_env_missing_key_is_fatal() {
        clear_env();
        set_all();
        env::remove_var(ENV_PASSWORD);

        let err = DatabaseConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv { key: "DB_PASSWORD" }));
    }

    #[test]
    #[serial]
    fn test_empty_value_counts_as_missing() {
        clear_env();
        set_all();
        env::set_var(ENV_HOST, "  ");

        let err = DatabaseConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv { key: "DB_HOST" }));
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_rejected() {
        clear_env();
        set_all();
        env::set_var(ENV_PORT, "fivethousand");

        let err = DatabaseConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: "DB_PORT", .. }));
    }

    #[test]
    #[serial]
    fn test_defaults_fill_absent_keys() {
        clear_env();

        let config = DatabaseConfig::from_env_or_defaults().unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "stratum_dev");
        assert_eq!(config.user, "stratum");
        assert_eq!(config.password, "stratum");
    }

    #[test]
    #[serial]
    fn test_defaults_keep_set_keys() {
        clear_env();
        env::set_var(ENV_HOST, "ci-postgres");

        let config = DatabaseConfig::from_env_or_defaults().unwrap();
        assert_eq!(config.host, "ci-postgres");
        assert_eq!(config.port, 5432);
    }

    #[test]
    #[serial]
    fn test_defaults_do_not_mask_invalid_port() {
        clear_env();
        env::set_var(ENV_PORT, "nope");

        assert!(DatabaseConfig::from_env_or_defaults().is_err());
    }

    #[test]
    fn test_display_target_elides_password() {
        let config = DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            database: "cms".to_string(),
            user: "cms_admin".to_string(),
            password: "secret".to_string(),
        };

        let target = config.display_target();
        assert_eq!(target, "postgres://cms_admin@localhost:5432/cms");
        assert!(!target.contains("secret"));
    }
}
