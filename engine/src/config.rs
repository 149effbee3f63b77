//! Engine and ledger configuration.
//!
//! Everything has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! [engine]
//! api_version = 1
//! level_step = 1
//!
//! [store]
//! path = "/var/lib/tally"
//! temporary = false
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tally_primitives::API_VERSION;
use tally_store::StoreError;

/// Errors raised while loading configuration or building from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unsupported api_version {got}, expected {expected}")]
    UnsupportedApiVersion { expected: u32, got: u32 },
    #[error("level_step must be at least 1, got {0}")]
    InvalidLevelStep(i64),
    #[error("store.path is required unless store.temporary is set")]
    MissingStorePath,
    #[error("store: {0}")]
    Store(#[from] StoreError),
}

/// Executor settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Version mixed into every transaction reference.
    pub api_version: u32,
    /// Levels gained per LevelUp.
    pub level_step: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_version: API_VERSION,
            level_step: 1,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_version != API_VERSION {
            return Err(ConfigError::UnsupportedApiVersion {
                expected: API_VERSION,
                got: self.api_version,
            });
        }
        if self.level_step < 1 {
            return Err(ConfigError::InvalidLevelStep(self.level_step));
        }
        Ok(())
    }
}

/// Where a durable ledger keeps its records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
    /// Use a throwaway database removed on drop. Overrides `path`.
    pub temporary: bool,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.temporary && self.path.is_none() {
            return Err(ConfigError::MissingStorePath);
        }
        Ok(())
    }
}

/// `[engine]` plus `[store]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    pub engine: EngineConfig,
    pub store: StoreConfig,
}

impl LedgerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.store.validate()
    }

    /// A config for a throwaway sled database.
    pub fn temporary() -> Self {
        Self {
            engine: EngineConfig::default(),
            store: StoreConfig {
                path: None,
                temporary: true,
            },
        }
    }
}
