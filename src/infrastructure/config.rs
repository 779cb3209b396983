use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;

/// Environment variable holding the log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
/// Environment variable overriding the directory the log file is written to.
pub const LOG_DIR_VAR: &str = "PROMO_UPLOAD_LOG_DIR";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid LOG_LEVEL value '{value}': {reason}")]
    InvalidLogLevel { value: String, reason: String },
}

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: LevelFilter,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(std::env::var(LOG_LEVEL_VAR).ok(), std::env::var(LOG_DIR_VAR).ok())
    }

    /// Builds a config from raw variable values; unset values take defaults.
    pub fn from_values(log_level: Option<String>, log_dir: Option<String>) -> Result<Self, ConfigError> {
        let log_level = match log_level {
            Some(value) => LevelFilter::from_str(value.trim()).map_err(|e| ConfigError::InvalidLogLevel {
                reason: e.to_string(),
                value,
            })?,
            None => DEFAULT_LOG_LEVEL,
        };

        let log_dir = log_dir.map(PathBuf::from).unwrap_or_else(default_log_dir);

        Ok(Self { log_level, log_dir })
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("promo-upload"))
        .unwrap_or_else(std::env::temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_values(None, None).unwrap();
        assert_eq!(config.log_level, LevelFilter::INFO);
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_values(Some("debug".to_string()), Some("/var/log/promo".to_string())).unwrap();
        assert_eq!(config.log_level, LevelFilter::DEBUG);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/promo"));
    }

    #[test]
    fn test_invalid_level() {
        let err = Config::from_values(Some("loud".to_string()), None).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }
}
