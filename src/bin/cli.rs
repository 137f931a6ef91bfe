//! busbot CLI
//!
//! Runs chat commands once, or polls the station list on an interval.

use std::path::PathBuf;

use busbot::{
    error::Result,
    models::{Config, NotifiedSet},
    pipeline::{self, BotCommand, BotContext},
};
use clap::{Parser, Subcommand};

/// busbot - Bus Arrival Notifier
#[derive(Parser, Debug)]
#[command(name = "busbot", version, about = "Relays live bus arrivals into a chat channel")]
struct Cli {
    /// Path to storage directory containing config and list files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the station list
    List,

    /// Report the board of a listed station
    BusList {
        /// Station name (may contain spaces)
        #[arg(required = true, num_args = 1..)]
        station: Vec<String>,
    },

    /// Report the board at a raw URL
    Bus { url: String },

    /// Add a station or update its id
    Add { station: String, id: String },

    /// Remove a station
    Remove {
        #[arg(required = true, num_args = 1..)]
        station: Vec<String>,
    },

    /// Handle one chat line, e.g. "!bus_list North Gate"
    Dispatch { line: String },

    /// Run a single poll cycle
    PollOnce,

    /// Poll the station list forever
    Watch,

    /// Clear the persisted notified snapshot
    ResetNotified,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::debug!("Loaded configuration from {}", config_path.display());

    if let Command::Validate = cli.command {
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("✓ Config OK");
        return Ok(());
    }

    let ctx = BotContext::from_config(&config, &cli.storage_dir)?;

    match cli.command {
        Command::List => pipeline::execute(&ctx, BotCommand::List).await?,
        Command::BusList { station } => {
            let station = station.join(" ");
            pipeline::execute(&ctx, BotCommand::BusList { station }).await?
        }
        Command::Bus { url } => pipeline::execute(&ctx, BotCommand::Bus { url }).await?,
        Command::Add { station, id } => {
            pipeline::execute(&ctx, BotCommand::Add { station, id }).await?
        }
        Command::Remove { station } => {
            let station = station.join(" ");
            pipeline::execute(&ctx, BotCommand::Remove { station }).await?
        }
        Command::Dispatch { line } => pipeline::handle_line(&ctx, &line).await?,
        Command::PollOnce => {
            let mut notified = pipeline::restore_notified(&ctx, &config.poll).await?;
            let summary = pipeline::run_poll_cycle(&ctx, &mut notified).await?;
            if summary.failed > 0 {
                log::warn!("{} station(s) failed to report", summary.failed);
            }
        }
        Command::Watch => pipeline::run_poll_loop(&ctx, &config.poll).await?,
        Command::ResetNotified => {
            ctx.storage.save_notified(&NotifiedSet::new()).await?;
            log::info!("Notified snapshot cleared");
        }
        // Handled before the context is built
        Command::Validate => {}
    }

    Ok(())
}
