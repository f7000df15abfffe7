//! Emoteport CLI: the main entry point.
//!
//! Commands:
//! - `serve`   Start the HTTP API
//! - `user`    Look up one channel identity
//! - `emotes`  Print the merged emote list for a channel
//! - `badges`  Print the chat badges for a channel
//! - `search`  Search channels by partial name
//! - `config`  Show, locate, validate or initialise the config file
//! - `status`  Show the effective configuration at a glance

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "emoteport",
    about = "Emoteport: Twitch channel lookup with merged third-party emotes",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Override the bind address
        #[arg(long)]
        host: Option<String>,

        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print a channel's identity
    User {
        /// Twitch login name
        name: String,
    },

    /// Print every emote usable in a channel
    Emotes {
        /// Twitch login name
        name: String,
    },

    /// Print a channel's chat badges
    Badges {
        /// Twitch login name
        name: String,
    },

    /// Search channels by partial name
    Search {
        query: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show configuration status
    Status,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (secrets redacted)
    Show,
    /// Print the config file path
    Path,
    /// Load and validate the configuration
    Validate,
    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Serve { host, port } => commands::serve::run(host, port).await?,
        Commands::User { name } => commands::lookup::user(&name).await?,
        Commands::Emotes { name } => commands::lookup::emotes(&name).await?,
        Commands::Badges { name } => commands::lookup::badges(&name).await?,
        Commands::Search { query } => commands::lookup::search(&query).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Init { force } => commands::config_cmd::init(force).await?,
        },
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout carries command output; logs go to stderr.
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
