//! Search command - run the multi-pass search and print the results

use crate::settings;
use crate::OutputFormat;
use anyhow::Result;
use artmarket_api_client::{ApiError, MarketplaceClient};
use artmarket_cli::output::{color_enabled, format_count, format_duration, Status};
use artmarket_cli::{progress, render};
use artmarket_core::config::Config;
use artmarket_core::{Error, ResultExt};
use artmarket_search::{
    category_filter, MemoryStore, RecordStore, SearchError, SearchExecutor, SearchOutcome,
    SearchPass, SearchSession, StoreError,
};
use artmarket_telemetry::{metrics, Timer};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Shown when neither the term nor any variant matched
pub const NO_MATCHES: &str =
    "No matches found. We also tried common typos and spelling variations — try different search terms.";

/// Shown when the backend could not answer the exact or browse query
pub const FETCH_FAILED: &str = "Failed to fetch artworks, please retry.";

/// JSON output for a search
#[derive(Serialize)]
struct SearchReport<'a> {
    term: &'a str,
    category: &'a str,
    #[serde(flatten)]
    outcome: &'a SearchOutcome,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

/// Run a search against the backend or a local catalogue
pub async fn run(
    config: &Config,
    term: &str,
    category: Option<&str>,
    catalog: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let category = category.unwrap_or(config.schema.search.default_category.as_str());
    let store = open_store(catalog)?;

    let executor =
        SearchExecutor::with_options(store, settings::search_options(&config.schema.search));
    let session = SearchSession::new(executor);

    let spinner = (format == OutputFormat::Text).then(|| progress::spinner("Searching artworks..."));
    let timer = Timer::start("search.command");
    let result = session.search(term, category).await;
    let elapsed = timer.elapsed();
    if let Some(ref pb) = spinner {
        progress::finish(pb);
    }

    let outcome = match result {
        Ok(outcome) => {
            metrics().record_search(&outcome, elapsed);
            outcome
        }
        Err(e) => {
            metrics().record_search_error(elapsed);
            return Err(fetch_failed(e).into());
        }
    };
    timer.stop();
    debug!(metrics = %metrics().export_json(), "Search metrics");

    match format {
        OutputFormat::Json => print_json(term, category, &outcome),
        OutputFormat::Text => {
            print_text(term, category, &outcome, elapsed);
            Ok(())
        }
    }
}

/// The local catalogue when given, otherwise the hosted backend
fn open_store(catalog: Option<&Path>) -> Result<Box<dyn RecordStore>> {
    if let Some(path) = catalog {
        let context = format!("While reading catalogue {}", path.display());
        let json = std::fs::read_to_string(path)
            .map_err(Error::from)
            .context(context.clone())?;
        let store = MemoryStore::from_json(&json)
            .map_err(|e| Error::catalog(e.to_string()).with_context(context))?;
        debug!(records = store.len(), path = %path.display(), "Loaded catalogue");
        return Ok(Box::new(store));
    }

    let client = MarketplaceClient::new().map_err(client_error)?;
    debug!(base_url = %client.base_url(), "Searching hosted catalogue");
    Ok(Box::new(client.artworks()))
}

fn client_error(e: ApiError) -> Error {
    match e {
        ApiError::MissingEnvVar(_) | ApiError::Config(_) => Error::config(e.to_string())
            .with_suggestion("Set SUPABASE_URL and SUPABASE_ANON_KEY, or pass --catalog FILE"),
        other => Error::backend(other.to_string()),
    }
}

fn fetch_failed(e: SearchError) -> Error {
    let error = match e {
        SearchError::Store(StoreError::Unavailable(_)) => Error::backend_unavailable(FETCH_FAILED),
        _ => Error::backend(FETCH_FAILED),
    };
    error.with_context(e.to_string()).with_source(e)
}

fn print_json(term: &str, category: &str, outcome: &SearchOutcome) -> Result<()> {
    let report = SearchReport {
        term,
        category,
        outcome,
        count: outcome.len(),
        message: (outcome.is_empty() && outcome.pass == SearchPass::Fuzzy).then_some(NO_MATCHES),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(term: &str, category: &str, outcome: &SearchOutcome, elapsed: std::time::Duration) {
    let term = term.trim();
    let scope = match category_filter(category) {
        Some(c) => format!(" in {c}"),
        None => String::new(),
    };

    if outcome.is_empty() {
        match outcome.pass {
            SearchPass::Browse => println!("No artworks listed{scope} yet."),
            SearchPass::Exact | SearchPass::Fuzzy => println!("{NO_MATCHES}"),
        }
        return;
    }

    let heading = match outcome.pass {
        SearchPass::Browse => format!("Latest artworks{scope}"),
        SearchPass::Exact | SearchPass::Fuzzy => format!("Results for \"{term}\"{scope}"),
    };
    Status::header(&heading);

    let mut terms = vec![term.to_string()];
    if let Some(ref report) = outcome.fuzzy {
        Status::info(&format!(
            "No exact matches. Showing results for similar spellings: {}",
            report.matched_variants.join(", ")
        ));
        terms.extend(report.matched_variants.iter().cloned());
    }

    let color = color_enabled();
    println!();
    for record in &outcome.records {
        println!("{}", render::render_record(record, &terms, color));
    }

    println!(
        "{} in {}",
        format_count(outcome.len(), "artwork", "artworks"),
        format_duration(elapsed)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use artmarket_core::ErrorCode;

    #[test]
    fn test_store_failure_maps_to_backend_error() {
        let err = fetch_failed(SearchError::Store(StoreError::backend("HTTP 500")));
        assert_eq!(err.code, ErrorCode::BackendError);
        assert_eq!(err.message, FETCH_FAILED);
        assert!(err.context.unwrap().contains("HTTP 500"));

        let err = fetch_failed(SearchError::Store(StoreError::unavailable("circuit open")));
        assert_eq!(err.code, ErrorCode::BackendUnavailable);
    }

    #[test]
    fn test_missing_backend_is_config_error() {
        let err = client_error(ApiError::missing_env("SUPABASE_URL"));
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert!(err.suggestion.is_some());
    }
}
