use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Origins a browser UI may call the API from; `"*"` allows any
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

/// Metadata provider (OMDb) settings. The API key is not part of the config
/// file; it comes from the environment or the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many search hits get a full detail lookup
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Restrict title search to "movie" or "series"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 0 disables the search cache
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

/// Values a UI needs to follow the server's behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_goal_hours")]
    pub goal_hours: f64,
    #[serde(default = "default_notice_timeout_ms")]
    pub notice_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_base_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_results() -> usize {
    5
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_max_entries() -> usize {
    256
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_goal_hours() -> f64 {
    100.0
}

fn default_notice_timeout_ms() -> u64 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            search_type: None,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            max_entries: default_cache_max_entries(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            goal_hours: default_goal_hours(),
            notice_timeout_ms: default_notice_timeout_ms(),
        }
    }
}

impl ClientConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(anyhow::anyhow!("server.bind_addr cannot be empty"));
        }

        for origin in &self.server.allowed_origins {
            let valid = origin == "*"
                || ((origin.starts_with("http://") || origin.starts_with("https://"))
                    && !origin.contains(char::is_whitespace));
            if !valid {
                return Err(anyhow::anyhow!(
                    "Invalid server.allowed_origins entry: '{}'",
                    origin
                ));
            }
        }

        if self.provider.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("provider.base_url cannot be empty"));
        }

        if !(1..=60).contains(&self.provider.timeout_secs) {
            return Err(anyhow::anyhow!(
                "provider.timeout_secs must be between 1 and 60, got {}",
                self.provider.timeout_secs
            ));
        }

        if !(1..=10).contains(&self.provider.max_results) {
            return Err(anyhow::anyhow!(
                "provider.max_results must be between 1 and 10, got {}",
                self.provider.max_results
            ));
        }

        if let Some(ref search_type) = self.provider.search_type {
            if !["movie", "series"].contains(&search_type.as_str()) {
                return Err(anyhow::anyhow!("Invalid provider.search_type: {}", search_type));
            }
        }

        if self.cache.ttl_secs > 0 && self.cache.max_entries == 0 {
            return Err(anyhow::anyhow!(
                "cache.max_entries must be positive when caching is enabled"
            ));
        }

        if !self.client.goal_hours.is_finite() || self.client.goal_hours < 0.0 {
            return Err(anyhow::anyhow!("client.goal_hours must be a non-negative number"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.server.bind_addr = "0.0.0.0:9000".to_string();
        config.provider.search_type = Some("movie".to_string());
        config.client.goal_hours = 250.0;

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(loaded.provider.search_type.as_deref(), Some("movie"));
        assert_eq!(loaded.client.goal_hours, 250.0);
        assert_eq!(loaded.provider.timeout_secs, 10);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[provider]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.provider.timeout_secs, 5);
        assert_eq!(config.provider.max_results, 5);
        assert_eq!(config.provider.base_url, "http://www.omdbapi.com/");
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.client.debounce_ms, 300);
        assert_eq!(config.client.goal_hours, 100.0);
        assert_eq!(config.server.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.server.allowed_origins, vec!["*"]);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.provider.max_results, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.provider.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.provider.timeout_secs = 15;

        config.provider.max_results = 11;
        assert!(config.validate().is_err());
        config.provider.max_results = 3;

        config.provider.search_type = Some("episode".to_string());
        assert!(config.validate().is_err());
        config.provider.search_type = Some("series".to_string());

        config.client.goal_hours = -1.0;
        assert!(config.validate().is_err());
        config.client.goal_hours = 0.0;

        config.server.allowed_origins = vec!["localhost:3000".to_string()];
        assert!(config.validate().is_err());
        config.server.allowed_origins = vec!["http://localhost:3000".to_string()];

        assert!(config.validate().is_ok());
    }
}
