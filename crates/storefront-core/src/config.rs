use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use storefront_api::ApiConfig;

pub const ENV_BASE_URL: &str = "STOREFRONT_BASE_URL";
pub const ENV_ACCESS_KEY: &str = "STOREFRONT_ACCESS_KEY";
pub const ENV_LANGUAGE_ID: &str = "STOREFRONT_LANGUAGE_ID";

/// Main configuration structure
///
/// Loaded from the config file, then env vars, then CLI flags.
/// Priority: CLI > Env > File > Defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults, then
    /// apply environment overrides
    pub fn load() -> crate::Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load a config file; a missing file means defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Overlay values from the environment. `lookup` is `std::env::var` in
    /// practice and a map in tests.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.store.base_url = base_url;
        }
        if let Some(access_key) = lookup(ENV_ACCESS_KEY) {
            self.store.access_key = access_key;
        }
        if let Some(language_id) = lookup(ENV_LANGUAGE_ID) {
            self.store.language_id = Some(language_id);
        }
    }

    /// Connection settings for the API client
    pub fn api_config(&self) -> crate::Result<ApiConfig> {
        if self.store.base_url.trim().is_empty() {
            return Err(crate::Error::ConfigError("No store API base URL configured".into()));
        }
        if self.store.access_key.trim().is_empty() {
            return Err(crate::Error::ConfigError(format!(
                "No sales channel access key configured (set {} or store.access_key)",
                ENV_ACCESS_KEY
            )));
        }

        let mut api = ApiConfig::new(&self.store.base_url, &self.store.access_key);
        api.language_id = self.store.language_id.clone();
        api.extra_headers = self
            .store
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Ok(api)
    }

    /// Get the config file path
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("storefront");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store API root, including the `/store-api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sales channel access key (Settings > Sales Channels > API access)
    #[serde(default)]
    pub access_key: String,

    #[serde(default)]
    pub language_id: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    "http://localhost:8000/store-api".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_key: String::new(),
            language_id: None,
            headers: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}
