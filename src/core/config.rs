use crate::providers::frankfurter::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FrankfurterProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl FrankfurterProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FrankfurterProviderConfig {
    fn default() -> Self {
        FrankfurterProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub frankfurter: FrankfurterProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_amount_decimals")]
    pub amount_decimals: u32,
    #[serde(default = "default_rate_decimals")]
    pub rate_decimals: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            amount_decimals: default_amount_decimals(),
            rate_decimals: default_rate_decimals(),
        }
    }
}

fn default_amount_decimals() -> u32 {
    2
}

fn default_rate_decimals() -> u32 {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Loads the config at the default location, or the built-in defaults
    /// when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "xconv", "xconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  frankfurter:
    base_url: "http://example.com/rates"
    timeout_secs: 3
display:
  amount_decimals: 3
  rate_decimals: 6
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.frankfurter.base_url,
            "http://example.com/rates"
        );
        assert_eq!(config.providers.frankfurter.timeout(), Duration::from_secs(3));
        assert_eq!(config.display.amount_decimals, 3);
        assert_eq!(config.display.rate_decimals, 6);
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.providers.frankfurter.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.providers.frankfurter.timeout_secs, 10);
        assert_eq!(config.display.amount_decimals, 2);
        assert_eq!(config.display.rate_decimals, 4);

        let partial = r#"
providers:
  frankfurter:
    base_url: "http://localhost:8080"
"#;
        let config: AppConfig = serde_yaml::from_str(partial).unwrap();
        assert_eq!(config.providers.frankfurter.base_url, "http://localhost:8080");
        assert_eq!(config.providers.frankfurter.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.display.rate_decimals, 4);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("missing.yaml"));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
