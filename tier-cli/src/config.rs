//! Calculator configuration.
//!
//! Read from an optional TOML file. Every section and key may be omitted;
//! missing values fall back to [`AppConfig::default`].
//!
//! ```toml
//! [defaults]
//! breakpoints = "10,50,100"
//! prices = "100,80,60"
//! headcount = 50
//!
//! [limits]
//! max_headcount = 1000
//! history_capacity = 100
//!
//! [logging]
//! level = "info"
//! file = "tier-calc.log"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tier_core::HISTORY_CAPACITY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("defaults.headcount ({headcount}) exceeds limits.max_headcount ({max})")]
    HeadcountOutOfRange { headcount: u32, max: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: DefaultsConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

/// Values the calculator starts with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub breakpoints: String,
    pub prices: String,
    pub headcount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest headcount the front end accepts (inclusive).
    pub max_headcount: u32,
    pub history_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            breakpoints: "10,50,100".to_string(),
            prices: "100,80,60".to_string(),
            headcount: 50,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_headcount: 1000,
            history_capacity: HISTORY_CAPACITY,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Parses TOML text. `origin` only appears in error messages.
    pub fn from_toml_str(
        text: &str,
        origin: &str,
    ) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.headcount > self.limits.max_headcount {
            return Err(ConfigError::HeadcountOutOfRange {
                headcount: self.defaults.headcount,
                max: self.limits.max_headcount,
            });
        }
        Ok(())
    }
}
