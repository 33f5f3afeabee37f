use std::path::{Path, PathBuf};

use orblink_transport::SerialConfig;
use serde::Deserialize;

/// CLI configuration file.
///
/// ```toml
/// [serial]
/// port = "/dev/rfcomm0"
/// baud_rate = 115200
/// read_timeout_ms = 100
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub serial: SerialConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            [serial]
            port = "/dev/rfcomm0"
            baud_rate = 57600
            read_timeout_ms = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.serial.port, "/dev/rfcomm0");
        assert_eq!(config.serial.baud_rate, 57_600);
        assert_eq!(config.serial.read_timeout_ms, 50);
    }

    #[test]
    fn defaults_apply_when_omitted() {
        let config: Config = toml::from_str(
            r#"
            [serial]
            port = "COM5"
            "#,
        )
        .unwrap();
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.serial.read_timeout_ms, 100);
    }

    #[test]
    fn missing_port_is_an_error() {
        let result: Result<Config, _> = toml::from_str("[serial]\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_missing_file_fails() {
        let err = Config::load("/nonexistent/orblink.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
