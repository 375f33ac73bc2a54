use color_eyre::Result;
use watchtime_config::{Config, PathManager};

use crate::output::{Output, OutputFormat};

pub async fn run_check(config: &Config, path_manager: &PathManager, output: &Output) -> Result<()> {
    let tracker = super::build_tracker(config, path_manager)?;
    let status = tracker.provider_status().await;

    match output.format() {
        OutputFormat::Human => {
            output.info(format!("Provider: {} ({})", status.provider, config.provider.base_url));
            match &status.api_key_preview {
                Some(preview) => output.success(format!("API key configured: {}", preview)),
                None => output.warn(
                    "API key not configured. Get one at http://www.omdbapi.com/ \
                     and run `watchtime config set-key`.",
                ),
            }
            if status.reachable {
                output.success("Test search succeeded");
            } else if let Some(error) = &status.error {
                output.error(format!(
                    "Test search failed [{}]: {}",
                    status.error_kind.as_deref().unwrap_or("unknown"),
                    error
                ));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&status)?);
        }
    }

    if !status.reachable {
        return Err(color_eyre::eyre::eyre!("Metadata provider check failed"));
    }
    Ok(())
}
