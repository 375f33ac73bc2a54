use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::paths::PathManager;

/// Environment variable holding the metadata provider credential
pub const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";

const OMDB_API_KEY: &str = "omdb_api_key";
const PLACEHOLDER_KEY: &str = "YOUR_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn get_omdb_api_key(&self) -> Option<&String> {
        self.get(OMDB_API_KEY)
    }

    pub fn set_omdb_api_key(&mut self, key: String) {
        self.set(OMDB_API_KEY.to_string(), key);
    }
}

/// `.env` files seen at startup.
///
/// Loading happens before logging is configured, so the outcome is kept
/// and reported through [`EnvFiles::log`] afterwards.
#[derive(Debug, Default)]
pub struct EnvFiles {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl EnvFiles {
    pub fn log(&self) {
        for path in &self.loaded {
            debug!(path = %path.display(), "Loaded environment file");
        }
        for (path, error) in &self.failed {
            warn!(path = %path.display(), error = %error, "Failed to load environment file");
        }
    }
}

/// Load `.env` files into the process environment.
///
/// The config directory's `.env` is read first, then one in the working
/// directory. Variables already set in the environment are never overridden.
pub fn load_env_files(paths: &PathManager) -> EnvFiles {
    let mut files = EnvFiles::default();
    let env_file = paths.env_file();
    if env_file.exists() {
        match dotenvy::from_path(&env_file) {
            Ok(()) => files.loaded.push(env_file),
            Err(e) => files.failed.push((env_file, e.to_string())),
        }
    }
    if let Ok(path) = dotenvy::dotenv() {
        files.loaded.push(path);
    }
    files
}

/// Resolve the provider API key: `OMDB_API_KEY` first, then the credential store.
///
/// Returns `None` when neither holds a usable key. Absence is not an error here;
/// it surfaces as a configuration error on first provider use.
pub fn resolve_api_key(store: &CredentialStore) -> Option<String> {
    resolve_api_key_from(std::env::var(OMDB_API_KEY_ENV).ok(), store)
}

fn resolve_api_key_from(env_value: Option<String>, store: &CredentialStore) -> Option<String> {
    env_value
        .and_then(usable_key)
        .or_else(|| store.get_omdb_api_key().cloned().and_then(usable_key))
}

fn usable_key(key: String) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER_KEY {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// First 8 characters followed by "...", for logs and status output
pub fn mask_secret(secret: &str) -> String {
    let preview: String = secret.chars().take(8).collect();
    format!("{}...", preview)
}
