use color_eyre::Result;
use comfy_table::{Cell, Table};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use watchtime_config::{Config, PathManager};
use watchtime_core::{Debouncer, Tracker};
use watchtime_models::MovieRecord;

use crate::output::{Output, OutputFormat};

pub async fn run_search(
    config: &Config,
    path_manager: &PathManager,
    query: Option<String>,
    interactive: bool,
    output: &Output,
) -> Result<()> {
    let tracker = super::build_tracker(config, path_manager)?;

    if interactive {
        return run_interactive(tracker, config.client.debounce(), *output).await;
    }

    let query = query.unwrap_or_default();
    search_once(&tracker, &query, output).await;
    Ok(())
}

/// Every stdin line is a keystroke burst; only the last one inside the
/// debounce window reaches the provider.
async fn run_interactive(tracker: Arc<Tracker>, delay: Duration, output: Output) -> Result<()> {
    let debouncer = Debouncer::new(delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let tracker = tracker.clone();
        debouncer.call(async move {
            search_once(&tracker, &line, &output).await;
        });
    }

    // Let the last scheduled search finish before exiting
    tokio::time::sleep(debouncer.delay()).await;
    while debouncer.is_pending() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    Ok(())
}

async fn search_once(tracker: &Tracker, query: &str, output: &Output) {
    if query.trim().is_empty() {
        return;
    }

    match tracker.search(query).await {
        Ok(results) => print_results(query, &results, output),
        Err(e) => output.error(format!("[{}] {}", e.kind(), e)),
    }
}

fn print_results(query: &str, results: &[MovieRecord], output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return;
            }
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Type").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Runtime").add_attribute(comfy_table::Attribute::Bold),
            ]);
            for record in results {
                let runtime = if record.duration > 0 {
                    format!("{} min", record.duration)
                } else {
                    "unknown".to_string()
                };
                table.add_row(vec![
                    Cell::new(&record.id),
                    Cell::new(&record.title),
                    Cell::new(&record.year),
                    Cell::new(record.media_type),
                    Cell::new(runtime),
                ]);
            }
            output.info(format!("Results for '{}':", query.trim()));
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::json!({
                "query": query.trim(),
                "results": results,
            }));
        }
    }
}
