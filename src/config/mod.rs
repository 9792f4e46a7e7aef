use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::{
    currency::{CurrencyCode, LocaleConfig},
    errors::LedgerError,
    utils::persistence::write_atomic,
};

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unknown configuration key `{0}`")]
    UnknownKey(String),
    #[error("Invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error(transparent)]
    Storage(#[from] LedgerError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// Turns an actif/passif mismatch into an error instead of a warning.
    #[serde(default)]
    pub strict_balance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_ledger: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "fr-FR".into(),
            currency: "XOF".into(),
            entity_name: None,
            strict_balance: false,
            last_opened_ledger: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = ["locale", "currency", "entity_name", "strict_balance"];

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.clone())
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::from_tag(&self.locale)
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        Ok(match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "entity_name" => self.entity_name.clone().unwrap_or_default(),
            "strict_balance" => self.strict_balance.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        })
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "locale" => {
                if value.trim().is_empty() {
                    return Err(invalid());
                }
                self.locale = value.trim().to_string();
            }
            "currency" => {
                let code = value.trim();
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(invalid());
                }
                self.currency = code.to_uppercase();
            }
            "entity_name" => {
                let name = value.trim();
                self.entity_name = (!name.is_empty()).then(|| name.to_string());
            }
            "strict_balance" => {
                self.strict_balance = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid()),
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

/// Loads and saves `<base>/config/config.json`.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_root = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_root)?;
        Ok(Self {
            path: config_root.join(CONFIG_FILE),
        })
    }

    /// Missing files yield the default configuration.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.currency_code().as_str(), "XOF");
    }

    #[test]
    fn saved_values_are_reloaded() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("entity_name", "SCP Diallo & Associés").unwrap();
        config.set("strict_balance", "on").unwrap();
        config.set("currency", "xaf").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.entity_name.as_deref(), Some("SCP Diallo & Associés"));
        assert!(loaded.strict_balance);
        assert_eq!(loaded.currency, "XAF");
        assert!(manager.path().ends_with("config/config.json"));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("strict_balance", "maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("currency", "FCFA"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
