pub mod commands;

use clap::{Parser, Subcommand};
use pitchcraft_core::config::{AppConfig, LoadOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "pitchcraft",
    about = "Pitchcraft operator CLI",
    long_about = "Inspect Pitchcraft configuration and catalog, run readiness checks, and render dialogue replies offline.",
    after_help = "Examples:\n  pitchcraft doctor --json\n  pitchcraft catalog\n  pitchcraft reply request.json --seed 7"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "List catalog products with today's offer pricing")]
    Catalog,
    #[command(about = "Validate config, catalog loading, and reply rendering for every stage")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Render the next reply for a chat request stored as JSON")]
    Reply {
        #[arg(help = "Path to a JSON file shaped like the POST /api/chat body")]
        path: PathBuf,
        #[arg(long, help = "Pin the scarcity count so the reply is reproducible")]
        seed: Option<u32>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Catalog => commands::catalog::run(),
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Reply { path, seed } => commands::reply::run(&path, seed),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Diagnostics go to stderr so stdout stays machine-readable.
fn init_logging() {
    use pitchcraft_core::config::LogFormat::*;
    use tracing::Level;

    let Ok(config) = AppConfig::load(LoadOptions::default()) else {
        return;
    };
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level);

    let _ = match config.logging.format {
        Compact => builder.compact().try_init(),
        Pretty => builder.pretty().try_init(),
        Json => builder.json().try_init(),
    };
}
