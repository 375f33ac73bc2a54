pub mod check;
pub mod config;
pub mod search;
pub mod serve;

use color_eyre::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;
use watchtime_config::{resolve_api_key, Config, CredentialStore, PathManager};
use watchtime_core::{Tracker, TrackerOptions};
use watchtime_sources::OmdbClient;

/// Load and validate the config file, falling back to defaults when it is absent
pub fn load_config(config_file: &Path) -> Result<Config> {
    let path = config_file.display();
    let config = Config::load_or_default(config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", path, e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid config in {}: {}", path, e))?;
    Ok(config)
}

/// Build the tracker with an OMDb provider.
///
/// A missing API key is not fatal here; provider calls report it instead.
pub fn build_tracker(config: &Config, path_manager: &PathManager) -> Result<Arc<Tracker>> {
    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    if let Err(e) = cred_store.load() {
        warn!(
            path = %path_manager.credentials_file().display(),
            error = %e,
            "Failed to read credentials file, ignoring it"
        );
    }

    let api_key = resolve_api_key(&cred_store);
    if api_key.is_none() {
        warn!("OMDb API key not configured. Set OMDB_API_KEY or run `watchtime config set-key`.");
    }

    let provider = OmdbClient::new(&config.provider, api_key)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create OMDb client: {}", e))?;

    Ok(Arc::new(Tracker::new(Arc::new(provider), TrackerOptions::from_config(config))))
}
