//! artmarket - typo-tolerant artwork search
//!
//! Searches the marketplace catalogue (or a local JSON catalogue) and falls
//! back to common misspellings when the term matches nothing as typed.

use artmarket_cli::output::Status;
use artmarket_core::config::Config;
use artmarket_core::error::exit_codes;
use artmarket_telemetry::TelemetryConfig;
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod settings;

/// Typo-tolerant artwork search for the art marketplace
#[derive(Parser)]
#[command(name = "artmarket")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to a configuration file (defaults to ./artmarket.toml and friends)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search approved artworks, trying spelling variations when nothing matches
    Search {
        /// Search term (empty lists the category)
        #[arg(default_value = "")]
        term: String,

        /// Category to search within ("all" for every category)
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Search a local JSON catalogue instead of the backend
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },

    /// Show the spelling variations generated for a term
    Variants {
        /// Term to vary
        term: String,

        /// Maximum variants to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::report(&e);
            return exit_code(e.exit_code());
        }
    };

    let level = if cli.verbose {
        "artmarket=debug,artmarket_search=debug,artmarket_api_client=debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    if let Err(e) = artmarket_telemetry::init_with_config(TelemetryConfig::new(
        level,
        config.schema.logging.json,
    )) {
        Status::warning(&format!("Logging disabled: {e}"));
    }

    let result = match cli.command {
        Commands::Search {
            term,
            category,
            catalog,
        } => {
            commands::search::run(
                &config,
                &term,
                category.as_deref(),
                catalog.as_deref(),
                cli.format,
            )
            .await
        }
        Commands::Variants { term, limit } => {
            commands::variants::run(&config, &term, limit, cli.format)
        }
        Commands::Config => commands::config::run(&config, cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<artmarket_core::Error>() {
            Some(coded) => {
                Status::report(coded);
                exit_code(coded.exit_code())
            }
            None => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit_code(exit_codes::FAILURE)
            }
        },
    }
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
