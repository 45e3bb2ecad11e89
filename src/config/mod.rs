//! Persistent user preferences.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    core::utils::{app_data_dir, config_file_in, DEFAULT_FILE_PREFIX},
    currency::DEFAULT_CURRENCY_PREFIX,
    errors::ExpenseError,
    storage::json_backend::write_atomic,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error(transparent)]
    Storage(#[from] ExpenseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_prefix")]
    pub currency_prefix: String,
    #[serde(default = "Config::default_file_prefix")]
    pub file_prefix: String,
    /// Directory holding the yearly ledger files. Defaults to
    /// `<documents>/ExpenditureManager`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_prefix: Self::default_currency_prefix(),
            file_prefix: Self::default_file_prefix(),
            data_dir: None,
        }
    }
}

impl Config {
    fn default_currency_prefix() -> String {
        DEFAULT_CURRENCY_PREFIX.to_string()
    }

    fn default_file_prefix() -> String {
        DEFAULT_FILE_PREFIX.to_string()
    }

    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(app_data_dir)
    }
}

/// Loads and saves [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn with_base_dir(base: &Path) -> Self {
        Self::new(config_file_in(base))
    }

    pub fn new_default() -> Self {
        Self::with_base_dir(&app_data_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes through the same staged temp file as ledger saves.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.path, json.as_bytes())?;
        Ok(())
    }
}
