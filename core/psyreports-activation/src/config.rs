//! Activation configuration.
//!
//! Resolution order, later wins:
//! 1. Built-in defaults ([`DEFAULT_SALT`], platform data directory)
//! 2. JSON config file, if present
//! 3. Environment variables [`SALT_ENV`] and [`DATA_DIR_ENV`]

use crate::error::{ActivationError, ActivationResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Salt used when neither side overrides it.
pub const DEFAULT_SALT: &str = "PSY_PRO_SECRET_2024";

/// Environment variable overriding the salt.
pub const SALT_ENV: &str = "PSYREPORTS_SALT";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PSYREPORTS_DATA_DIR";

const APP_DIR: &str = "psyreports";
const CONFIG_FILE: &str = "activation.json";
const STORAGE_FILE: &str = "storage.json";
const LEDGER_FILE: &str = "credits.json";

/// Settings shared by the issuing and validating sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Shared secret compared byte-for-byte during validation.
    pub salt: String,
    /// Directory holding the key-value store and the credit ledger.
    pub data_dir: PathBuf,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            salt: DEFAULT_SALT.to_string(),
            data_dir: default_data_dir(),
        }
    }
}

impl ActivationConfig {
    /// Loads configuration from `path` (or the default config file when
    /// `None`), then applies environment overrides.
    ///
    /// A missing default config file is not an error; a missing explicit one is.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> ActivationResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads a JSON config file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> ActivationResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ActivationError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ActivationError::Config(format!("invalid {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "Loaded activation config");
        Ok(config)
    }

    /// Applies overrides from `lookup`, typically the process environment.
    ///
    /// An empty salt variable is ignored so that a blank export does not
    /// silently change the shared secret.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(salt) = lookup(SALT_ENV).filter(|s| !s.is_empty()) {
            self.salt = salt;
        }
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|s| !s.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
    }

    /// Path of the key-value store file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }

    /// Path of the credit ledger file.
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(LEDGER_FILE)
    }
}

/// Platform data directory for the application, falling back to the
/// working directory when the platform has none.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR))
}

/// Default config file location, if the platform has a config directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_salt() {
        assert_eq!(ActivationConfig::default().salt, DEFAULT_SALT);
    }

    #[test]
    fn env_overrides() {
        let mut config = ActivationConfig::default();
        config.apply_env(env(&[(SALT_ENV, "CLINIC_42"), (DATA_DIR_ENV, "/tmp/psy")]));
        assert_eq!(config.salt, "CLINIC_42");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/psy"));
    }

    #[test]
    fn empty_env_ignored() {
        let mut config = ActivationConfig::default();
        config.apply_env(env(&[(SALT_ENV, ""), (DATA_DIR_ENV, "  ")]));
        assert_eq!(config, ActivationConfig::default());
    }

    #[test]
    fn file_paths_live_in_data_dir() {
        let config = ActivationConfig {
            salt: DEFAULT_SALT.into(),
            data_dir: PathBuf::from("/data"),
        };
        assert_eq!(config.storage_path(), PathBuf::from("/data/storage.json"));
        assert_eq!(config.ledger_path(), PathBuf::from("/data/credits.json"));
    }
}
