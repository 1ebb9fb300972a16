//! Configuration loading and typed config structures for Stowage.
//!
//! The configuration lives in `stowage-config.yaml`. Every section is
//! optional; anything left out falls back to the defaults below, so an
//! empty file (or no file at all) yields a working setup.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use stowage_bank::{BankConfig, BankError, StarterItem, StaticItemRegistry};
use stowage_types::ItemType;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The item catalog is not a valid registry.
    #[error("invalid item catalog: {source}")]
    Registry {
        /// The underlying registry error.
        #[from]
        source: BankError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `stowage-config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StowageConfig {
    /// Capacity and upgrade settings.
    #[serde(default)]
    pub bank: BankConfig,

    /// The item catalog. Defaults to a small built-in catalog.
    #[serde(default = "default_catalog")]
    pub items: Vec<ItemType>,

    /// Items placed in every fresh storage account.
    #[serde(default)]
    pub starter_items: Vec<StarterItem>,

    /// Settings for the standalone session.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for StowageConfig {
    fn default() -> Self {
        Self {
            bank: BankConfig::default(),
            items: default_catalog(),
            starter_items: Vec::new(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StowageConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `STOWAGE_LOG_LEVEL` overrides `logging.level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Build the item registry from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Registry`] on duplicate codes, negative
    /// weights or zero maxima.
    pub fn registry(&self) -> Result<StaticItemRegistry, ConfigError> {
        Ok(StaticItemRegistry::from_types(self.items.iter().cloned())?)
    }
}

/// Settings for a standalone session with no surrounding world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Whether the actor counts as standing next to a storage terminal
    /// (default: true).
    #[serde(default = "default_adjacent_to_terminal")]
    pub adjacent_to_terminal: bool,

    /// Currency the actor starts with (default: 0).
    #[serde(default)]
    pub starting_currency: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            adjacent_to_terminal: default_adjacent_to_terminal(),
            starting_currency: 0,
        }
    }
}

const fn default_adjacent_to_terminal() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON-formatted log lines (default: false).
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Apply environment variable overrides.
    ///
    /// - `STOWAGE_LOG_LEVEL` overrides `level`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("STOWAGE_LOG_LEVEL") {
            self.level = val;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_catalog() -> Vec<ItemType> {
    vec![
        ItemType::stackable("IronOre", Decimal::new(2, 0), 100),
        ItemType::stackable("Arrow", Decimal::new(1, 1), 500),
        ItemType::stackable("Feather", Decimal::ZERO, 1000),
        ItemType::stackable("HealthPotion", Decimal::new(5, 1), 20),
        ItemType::unstackable("IronSword", Decimal::new(8, 0), 200),
        ItemType::unstackable("WoodenBow", Decimal::new(4, 0), 120),
    ]
}
