//! Variants command - show the spelling variations tried for a term

use crate::settings;
use crate::OutputFormat;
use anyhow::Result;
use artmarket_cli::output::{format_count, Status};
use artmarket_core::config::Config;
use artmarket_search::typo_variants_with;

/// Print the variants generated for `term` under the configured edit classes
pub fn run(config: &Config, term: &str, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let mut options = settings::variant_options(&config.schema.search.edits);
    if let Some(limit) = limit {
        options = options.with_limit(limit);
    }
    let variants = typo_variants_with(term, &options);

    if format == OutputFormat::Json {
        let json = serde_json::json!({
            "term": term,
            "count": variants.len(),
            "variants": variants,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    if variants.is_empty() {
        Status::warning(&format!("No variations for \"{}\"", term.trim()));
        return Ok(());
    }

    Status::header(&format!(
        "{} of \"{}\"",
        format_count(variants.len(), "variation", "variations"),
        term.trim()
    ));
    for variant in &variants {
        println!("{variant}");
    }
    Ok(())
}
