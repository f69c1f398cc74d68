//! Config command - show the effective configuration

use crate::OutputFormat;
use anyhow::Result;
use artmarket_cli::output::Status;
use artmarket_core::config::Config;

/// Print the effective configuration and where it came from
pub fn run(config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "path": config.path.as_ref().map(|p| p.display().to_string()),
                "config": config.schema,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            match config.path {
                Some(ref path) => Status::info(&format!("Loaded from {}", path.display())),
                None => Status::info("No configuration file found, using defaults"),
            }
            println!();
            print!("{}", toml::to_string_pretty(&config.schema)?);
        }
    }
    Ok(())
}
