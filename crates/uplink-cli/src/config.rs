//! Optional TOML configuration for the `uplink` binary.
//!
//! ```toml
//! [decode]
//! family = "ws301"
//! pretty = false
//!
//! [logging]
//! level = "info"
//!
//! [[device]]
//! dev_eui = "24e124136b502217"
//! family = "milesight"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use uplink_core::families::Family;

/// Log levels accepted by `[logging] level` and `--log-level`.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

const DEV_EUI_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub decode: DecodeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default, rename = "device")]
    pub devices: Vec<DeviceConfig>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct DecodeConfig {
    /// Used when neither `--family` nor `--device` is given.
    #[serde(default)]
    pub family: Option<Family>,

    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Maps a device EUI to the family that decodes its uplinks.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    pub dev_eui: String,
    pub family: Family,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_log_level(&self.logging.level)?;

        let mut seen = HashSet::new();
        for device in &self.devices {
            if device.dev_eui.len() != DEV_EUI_LEN
                || !device.dev_eui.chars().all(|c| c.is_ascii_hexdigit())
            {
                return Err(ConfigError::Invalid(format!(
                    "dev_eui '{}' must be {} hex digits",
                    device.dev_eui, DEV_EUI_LEN
                )));
            }
            if !seen.insert(device.dev_eui.to_ascii_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "dev_eui '{}' is listed more than once",
                    device.dev_eui
                )));
            }
        }
        Ok(())
    }

    /// Family configured for `dev_eui` (case-insensitive).
    pub fn family_for_device(&self, dev_eui: &str) -> Option<Family> {
        self.devices
            .iter()
            .find(|device| device.dev_eui.eq_ignore_ascii_case(dev_eui))
            .map(|device| device.family)
    }
}

pub fn validate_log_level(level: &str) -> Result<(), ConfigError> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "log level '{}' must be one of: {}",
            level,
            LOG_LEVELS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use uplink_core::families::Family;

    use super::{Config, ConfigError, validate_log_level};

    fn parse(raw: &str) -> Result<Config, ConfigError> {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(raw.as_bytes()).expect("write config");
        Config::load(file.path())
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert!(config.decode.family.is_none());
        assert!(!config.decode.pretty);
        assert_eq!(config.logging.level, "warn");
        assert!(config.devices.is_empty());
    }

    #[test]
    fn full_config() {
        let config = parse(
            r#"
[decode]
family = "ws301"
pretty = true

[logging]
level = "debug"

[[device]]
dev_eui = "24E124136B502217"
family = "milesight"

[[device]]
dev_eui = "0004a30b001c0530"
family = "sensor-node"
"#,
        )
        .unwrap();
        assert_eq!(config.decode.family, Some(Family::Ws301));
        assert!(config.decode.pretty);
        assert_eq!(config.family_for_device("24e124136b502217"), Some(Family::Milesight));
        assert_eq!(config.family_for_device("0004A30B001C0530"), Some(Family::SensorNode));
        assert_eq!(config.family_for_device("ffffffffffffffff"), None);
    }

    #[test]
    fn unknown_family_is_rejected() {
        let err = parse("[decode]\nfamily = \"em310\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn short_dev_eui_is_rejected() {
        let err = parse("[[device]]\ndev_eui = \"24e1\"\nfamily = \"ws202\"\n").unwrap_err();
        assert!(err.to_string().contains("16 hex digits"));
    }

    #[test]
    fn duplicate_dev_eui_is_rejected() {
        let err = parse(
            "[[device]]\ndev_eui = \"24e124136b502217\"\nfamily = \"ws202\"\n\
             [[device]]\ndev_eui = \"24E124136B502217\"\nfamily = \"ws301\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let err = parse("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(validate_log_level("TRACE").is_ok());
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Config::load("/nonexistent/uplink.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
