pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{CacheConfig, ClientConfig, Config, LoggingConfig, ProviderConfig, ServerConfig};
pub use credentials::{
    load_env_files, mask_secret, resolve_api_key, CredentialStore, EnvFiles, OMDB_API_KEY_ENV,
};
pub use paths::{container_base_path, PathManager};
