//! Portseek CLI - Find free ports and socket paths
//!
//! A command-line tool for picking a port (or unix socket path) before
//! starting a server, and for managing the search defaults.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use portseek_core::{ConfigStore, PortFinder, PortOptions, SocketOptions};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "portseek")]
#[command(author, version, about = "Find free ports and socket paths")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log level (e.g., trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a free port
    #[command(alias = "get")]
    Port(PortArgs),

    /// Find several free ports in increasing order
    Ports {
        /// Number of ports to find
        count: usize,

        #[command(flatten)]
        args: PortArgs,
    },

    /// Find a free unix socket path
    #[command(alias = "sock")]
    Socket {
        /// First candidate path (default: base path + .sock)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Octal mode for a created parent directory (default: 755)
        #[arg(short, long, value_parser = parse_mode)]
        mode: Option<u32>,
    },

    /// List the hosts every port is checked on
    Hosts,

    /// Show or change the search defaults
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
struct PortArgs {
    /// Port to start searching at
    #[arg(short, long, allow_negative_numbers = true)]
    port: Option<i64>,

    /// Host the port must also be free on
    #[arg(long)]
    host: Option<String>,

    /// Lower bound of the searched range
    #[arg(long, allow_negative_numbers = true)]
    start_port: Option<i64>,

    /// Highest acceptable port
    #[arg(long, allow_negative_numbers = true)]
    stop_port: Option<i64>,
}

impl From<PortArgs> for PortOptions {
    fn from(args: PortArgs) -> Self {
        PortOptions {
            port: args.port,
            host: args.host,
            start_port: args.start_port,
            stop_port: args.stop_port,
        }
    }
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current defaults
    #[command(alias = "ls")]
    Show,
    /// Change defaults
    Set {
        /// Lowest port searches begin from
        #[arg(long)]
        base_port: Option<u16>,
        /// Highest port searches may reach
        #[arg(long)]
        highest_port: Option<u16>,
        /// Path (without .sock) socket searches begin from
        #[arg(long)]
        base_path: Option<PathBuf>,
    },
}

fn parse_mode(value: &str) -> Result<u32, String> {
    u32::from_str_radix(value.trim_start_matches("0o"), 8)
        .map_err(|e| format!("invalid octal mode {:?}: {}", value, e))
}

fn install_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_finder(store: &ConfigStore) -> anyhow::Result<PortFinder> {
    let defaults = store.load().await?;
    debug!(path = %store.path().display(), defaults = ?defaults, "Loaded defaults");
    Ok(PortFinder::with_defaults(defaults))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    install_tracing(&cli.log);

    let store = ConfigStore::new()?;

    match cli.command {
        Commands::Port(args) => {
            let finder = load_finder(&store).await?;
            commands::port::get(&finder, args.into(), cli.json).await?;
        }
        Commands::Ports { count, args } => {
            let finder = load_finder(&store).await?;
            commands::port::get_many(&finder, count, args.into(), cli.json).await?;
        }
        Commands::Socket { path, mode } => {
            let finder = load_finder(&store).await?;
            let options = SocketOptions { path, mode };
            commands::socket::get(&finder, options, cli.json).await?;
        }
        Commands::Hosts => {
            let finder = load_finder(&store).await?;
            commands::hosts::list(&finder, cli.json).await?;
        }
        Commands::Config { action } => match action {
            None | Some(ConfigAction::Show) => commands::config::show(&store, cli.json).await?,
            Some(ConfigAction::Set {
                base_port,
                highest_port,
                base_path,
            }) => commands::config::set(&store, base_port, highest_port, base_path).await?,
        },
    }

    Ok(())
}
