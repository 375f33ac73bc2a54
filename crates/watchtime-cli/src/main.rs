use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use watchtime_config::{load_env_files, PathManager};

mod api;
mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchtime")]
#[command(about = "WatchTime - Track how much time you've spent watching movies and shows")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    #[command(long_about = "Serve the watch-time API: title search proxied to OMDb, the \
        in-memory watched list and aggregate statistics. The watched list lives only as long \
        as the process.")]
    Serve {
        /// Address to listen on (overrides server.bind_addr)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
    /// Search titles on the metadata provider
    #[command(long_about = "Search OMDb by title. With --interactive, each line read from \
        stdin is treated as a keystroke burst and only the last line within the debounce \
        window is searched.")]
    Search {
        /// Title to search for
        #[arg(required_unless_present = "interactive")]
        query: Option<String>,

        /// Read queries from stdin, debounced
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "query")]
        interactive: bool,
    },
    /// Check metadata provider configuration and connectivity
    Check,
    /// Manage configuration and credentials
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration (masks the API key)
    Show {
        /// Show the full API key
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the OMDb API key in the credentials file
    #[command(long_about = "Store the OMDb API key in the credentials file. Get a free key \
        at http://www.omdbapi.com/. The OMDB_API_KEY environment variable still takes \
        precedence.")]
    SetKey {
        /// API key (if not provided, will prompt)
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let path_manager = PathManager::default();
    let env_files = load_env_files(&path_manager);

    let config_file = cli.config.clone().unwrap_or_else(|| path_manager.config_file());
    let config = commands::load_config(&config_file)?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    env_files.log();

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Serve { bind } => commands::serve::run_serve(config, &path_manager, bind).await,
        Commands::Search { query, interactive } => {
            commands::search::run_search(&config, &path_manager, query, interactive, &output).await
        }
        Commands::Check => commands::check::run_check(&config, &path_manager, &output).await,
        Commands::Config { cmd } => {
            commands::config::run_config(cmd, &config, &config_file, &path_manager, &output).await
        }
    }
}
