//! PromptFence CLI
//!
//! Command-line front end for the PromptFence detection core.
//!
//! # Usage
//!
//! ```bash
//! promptfence scan --file notes.txt --preset finance
//! echo "card 4111 1111 1111 1111" | promptfence scan --anonymize
//! promptfence presets show developer --format json
//! promptfence validate iban "DE89 3704 0044 0532 0130 00"
//! promptfence config set-preset health
//! ```

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "promptfence")]
#[command(author = "PromptFence")]
#[command(version)]
#[command(about = "Detect and redact sensitive data before it reaches an AI assistant", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Profile name from config file
    #[arg(long, short, global = true, env = "PROMPTFENCE_PROFILE")]
    profile: Option<String>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan text and evaluate it against the active policy
    Scan(ScanArgs),
    /// Inspect built-in presets
    Presets {
        #[command(subcommand)]
        action: PresetCommands,
    },
    /// Run a checksum validator
    Validate {
        #[command(subcommand)]
        action: ValidateCommands,
    },
    /// Check whether a host is an AI assistant domain
    Domain { host: String },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// Read input from a file instead of stdin
    #[arg(long, short = 'i')]
    file: Option<PathBuf>,

    /// Preset id overriding the configured one
    #[arg(long)]
    preset: Option<String>,

    /// Disable WARN decisions
    #[arg(long)]
    no_warn: bool,

    /// Disable BLOCK decisions
    #[arg(long)]
    no_block: bool,

    /// Print the anonymized text
    #[arg(long, short)]
    anonymize: bool,

    /// Destination host; attaches a telemetry event for WARN/BLOCK
    #[arg(long)]
    domain: Option<String>,
}

#[derive(Subcommand)]
enum PresetCommands {
    /// List all presets
    List,
    /// Show a preset's rules and copy
    Show { id: String },
}

#[derive(Subcommand)]
enum ValidateCommands {
    /// IBAN mod-97 check
    Iban { value: String },
    /// Payment card Luhn check
    Card { value: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the effective policy
    Show,
    /// Select the active preset
    SetPreset { id: String },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let profile = cli.profile.as_deref();
    let result = match cli.command {
        Commands::Scan(args) => commands::scan::handle(args, profile, cli.format),
        Commands::Presets { action } => {
            commands::presets::handle(action, cli.format).map(|_| ExitCode::SUCCESS)
        }
        Commands::Validate { action } => {
            commands::validate::handle(action, cli.format).map(|_| ExitCode::SUCCESS)
        }
        Commands::Domain { host } => {
            commands::validate::domain(&host, profile, cli.format).map(|_| ExitCode::SUCCESS)
        }
        Commands::Config { action } => {
            commands::config::handle(action, profile, cli.format).map(|_| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
