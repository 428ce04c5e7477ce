//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file and environment overrides.
//! Every key has a default, so an empty file (or none at all) is valid.
//!
//! ```yaml
//! server:
//!   bind: "127.0.0.1:5000"
//! storage:
//!   data_file: "parcel_data.json"
//! locale: cs
//! ```

use crate::core::error::ConfigError;
use crate::core::messages::Locale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_ENV: &str = "PARCEL_CONFIG";
/// Environment variable overriding `server.bind`
pub const BIND_ENV: &str = "PARCEL_BIND";
/// Environment variable overriding `storage.data_file`
pub const DATA_FILE_ENV: &str = "PARCEL_DATA_FILE";
/// Environment variable overriding `locale`
pub const LOCALE_ENV: &str = "PARCEL_LOCALE";

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

/// Record store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the shipment collection
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("parcel_data.json"),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// Language of validation messages
    pub locale: Locale,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|source| ConfigError::Parse {
            file: Some(path.to_path_buf()),
            source,
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml).map_err(|source| ConfigError::Parse { file: None, source })
    }

    fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as null rather than an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load configuration for the running process
    ///
    /// Reads the file named by `PARCEL_CONFIG` when it is set, then applies
    /// `PARCEL_BIND`, `PARCEL_DATA_FILE` and `PARCEL_LOCALE`.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_yaml_file(PathBuf::from(path))?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by environment variable name
    ///
    /// Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = lookup(BIND_ENV) {
            self.server.bind = bind;
        }

        if let Some(data_file) = lookup(DATA_FILE_ENV) {
            self.storage.data_file = PathBuf::from(data_file);
        }

        if let Some(locale) = lookup(LOCALE_ENV) {
            self.locale = locale
                .parse()
                .map_err(|message| ConfigError::InvalidValue {
                    field: LOCALE_ENV.to_string(),
                    value: locale.clone(),
                    message,
                })?;
        }

        Ok(self)
    }

    /// Create a configuration for tests that writes to `data_file`
    pub fn for_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageConfig {
                data_file: data_file.into(),
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.bind, "127.0.0.1:5000");
        assert_eq!(config.storage.data_file, PathBuf::from("parcel_data.json"));
        assert_eq!(config.locale, Locale::Cs);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = AppConfig {
            locale: Locale::En,
            ..AppConfig::for_data_file("/var/lib/parcel/data.json")
        };
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml_str("locale: en\n").unwrap();

        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_unknown_locale_in_yaml_fails() {
        let err = AppConfig::from_yaml_str("locale: de\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { file: None, .. }));
    }

    #[test]
    fn test_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            (BIND_ENV, "0.0.0.0:8080"),
            (DATA_FILE_ENV, "/tmp/shipments.json"),
            (LOCALE_ENV, "en"),
        ]);

        let config = AppConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.storage.data_file, PathBuf::from("/tmp/shipments.json"));
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let config = AppConfig::default()
            .with_overrides(|key| (key == BIND_ENV).then(|| "  ".to_string()))
            .unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:5000");
    }

    #[test]
    fn test_invalid_locale_override_fails() {
        let err = AppConfig::default()
            .with_overrides(|key| (key == LOCALE_ENV).then(|| "klingon".to_string()))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("klingon"));
    }
}
