//! Configuration management.

use std::path::{Path, PathBuf};

use classwatch_client::AccountCredentials;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Configured accounts.
    #[serde(default)]
    pub accounts: Vec<AccountEntry>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Refresh interval in seconds.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// One configured account: the three credential fields, stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Account identifier, unique within the config.
    pub id: String,
    /// Base URL of the course-progress instance.
    pub instance: String,
    /// Login username.
    pub username: String,
    /// Login password.
    pub password: String,
}

impl AccountEntry {
    /// Returns the credentials for establishing a session.
    pub fn credentials(&self) -> AccountCredentials {
        AccountCredentials {
            instance: self.instance.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("classwatch")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on IO or parse failures.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on IO or parse failures. A missing file is
    /// not an error; defaults are returned.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on IO or serialization failures.
    pub fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::default_path())
    }

    /// Saves configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on IO or serialization failures.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Returns the account with the given id.
    pub fn account(&self, id: &str) -> Option<&AccountEntry> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Adds an account entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateAccount`] if an entry with the same
    /// id already exists.
    pub fn add_account(&mut self, entry: AccountEntry) -> Result<(), StoreError> {
        if self.account(&entry.id).is_some() {
            return Err(StoreError::DuplicateAccount(entry.id));
        }
        self.accounts.push(entry);
        Ok(())
    }

    /// Removes the account with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AccountNotFound`] if no such entry exists.
    pub fn remove_account(&mut self, id: &str) -> Result<AccountEntry, StoreError> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::AccountNotFound(id.to_string()))?;
        Ok(self.accounts.remove(index))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> AccountEntry {
        AccountEntry {
            id: id.to_string(),
            instance: "https://swim.example.org".to_string(),
            username: "parent@example.org".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.general.refresh_interval, 3600);
        assert!(config.accounts.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.add_account(entry("alice")).unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.accounts.len(), 1);
        assert_eq!(loaded.accounts[0].username, "parent@example.org");
        assert_eq!(loaded.accounts[0].password, "hunter2");
    }

    #[test]
    fn test_duplicate_account_rejected() {
        let mut config = Config::default();
        config.add_account(entry("alice")).unwrap();
        assert!(matches!(
            config.add_account(entry("alice")),
            Err(StoreError::DuplicateAccount(_))
        ));
    }

    #[test]
    fn test_remove_account() {
        let mut config = Config::default();
        config.add_account(entry("alice")).unwrap();
        assert!(config.remove_account("alice").is_ok());
        assert!(matches!(
            config.remove_account("alice"),
            Err(StoreError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_credentials_conversion() {
        let creds = entry("alice").credentials();
        assert_eq!(creds.instance, "https://swim.example.org");
        assert_eq!(creds.username, "parent@example.org");
    }
}
