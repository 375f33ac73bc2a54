use crate::output::{Output, OutputFormat};
use color_eyre::eyre::Context;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;
use watchtime_config::{
    mask_secret, resolve_api_key, Config, CredentialStore, PathManager, OMDB_API_KEY_ENV,
};

pub async fn run_config(
    cmd: crate::ConfigCommands,
    config: &Config,
    config_file: &Path,
    path_manager: &PathManager,
    output: &Output,
) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => {
            show_config(full, config, config_file, path_manager, output)
        }
        crate::ConfigCommands::Init { force } => {
            init_config(force, config_file, path_manager, output)
        }
        crate::ConfigCommands::SetKey { key } => set_key(key, path_manager, output),
    }
}

fn show_config(
    full: bool,
    config: &Config,
    config_file: &Path,
    path_manager: &PathManager,
    output: &Output,
) -> Result<()> {
    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

    let api_key = resolve_api_key(&cred_store);
    let env_key_set = std::env::var(OMDB_API_KEY_ENV)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);
    let key_source = if env_key_set {
        "environment"
    } else if api_key.is_some() {
        "credentials file"
    } else {
        "not set"
    };
    let key_display = match &api_key {
        Some(key) if full => key.clone(),
        Some(key) => mask_secret(key),
        None => "<not set>".to_string(),
    };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());
            if !config_file.exists() {
                println!(
                    "{}",
                    format!("(no file at {}, showing defaults)", config_file.display()).dimmed()
                );
            }
            println!();

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
            ]);
            let log_file = match &config.logging.file {
                Some(path) => path.display().to_string(),
                None => format!("<stderr> (log dir: {})", path_manager.log_dir().display()),
            };
            let rows = [
                ("Config file", config_file.display().to_string()),
                ("server.bind_addr", config.server.bind_addr.clone()),
                ("server.allowed_origins", config.server.allowed_origins.join(", ")),
                ("provider.base_url", config.provider.base_url.clone()),
                ("provider.timeout_secs", config.provider.timeout_secs.to_string()),
                ("provider.max_results", config.provider.max_results.to_string()),
                (
                    "provider.search_type",
                    config.provider.search_type.clone().unwrap_or_else(|| "<any>".to_string()),
                ),
                ("API key", format!("{} ({})", key_display, key_source)),
                ("cache.ttl_secs", config.cache.ttl_secs.to_string()),
                ("cache.max_entries", config.cache.max_entries.to_string()),
                ("client.debounce_ms", config.client.debounce_ms.to_string()),
                ("client.goal_hours", config.client.goal_hours.to_string()),
                ("client.notice_timeout_ms", config.client.notice_timeout_ms.to_string()),
                ("logging.level", config.logging.level.clone()),
                ("logging.file", log_file),
            ];
            for (setting, value) in rows {
                table.add_row(vec![Cell::new(setting), Cell::new(value)]);
            }
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let mut value = serde_json::to_value(config)?;
            value["config_file"] = json!(config_file.display().to_string());
            value["api_key"] = json!({
                "configured": api_key.is_some(),
                "source": key_source,
                "value": api_key.as_ref().map(|_| key_display.clone()),
            });
            output.json(&value);
        }
    }

    Ok(())
}

fn init_config(
    force: bool,
    config_file: &Path,
    path_manager: &PathManager,
    output: &Output,
) -> Result<()> {
    if config_file.exists() && !force {
        output.warn(format!(
            "Config file already exists at {}. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }

    let config_dir = path_manager.config_dir();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create {}: {}", config_dir.display(), e))?;
    Config::default()
        .save_to_file(config_file)
        .map_err(|e| {
            color_eyre::eyre::eyre!("Failed to write config to {}: {}", config_file.display(), e)
        })?;

    output.success(format!("Wrote default config to {}", config_file.display()));
    Ok(())
}

fn set_key(key: Option<String>, path_manager: &PathManager, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => rpassword::prompt_password("OMDb API key: ").wrap_err("Failed to read API key")?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
    }

    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;
    cred_store.set_omdb_api_key(key.clone());
    cred_store
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!(
        "Saved OMDb API key {} to {}",
        mask_secret(&key),
        path_manager.credentials_file().display()
    ));
    if std::env::var(OMDB_API_KEY_ENV).is_ok() {
        output.warn(format!(
            "{} is set and takes precedence over the stored key",
            OMDB_API_KEY_ENV
        ));
    }
    Ok(())
}
