//! WASM bindings for the browser client.

use wasm_bindgen::prelude::*;

/// Typo variants of a search term as a JSON array of strings.
///
/// # Arguments
/// * `term` - Search term as typed
/// * `limit` - Maximum variants to return (0 for all)
#[wasm_bindgen]
pub fn typo_variants(term: &str, limit: usize) -> String {
    let mut options = crate::VariantOptions::default();
    if limit > 0 {
        options.limit = Some(limit);
    }
    let variants = crate::typo_variants_with(term, &options);
    serde_json::to_string(&variants).unwrap_or_else(|_| "[]".to_string())
}

/// Matched ranges of `term` in `text` as a JSON array of `[start, end]` pairs.
///
/// Offsets are UTF-8 byte offsets.
#[wasm_bindgen]
pub fn highlight_matches(text: &str, term: &str) -> String {
    let pairs: Vec<[usize; 2]> = crate::highlight_ranges(text, term)
        .into_iter()
        .map(|range| [range.start, range.end])
        .collect();
    serde_json::to_string(&pairs).unwrap_or_else(|_| "[]".to_string())
}

/// Whether a JSON-encoded artwork matches `pattern` in any text field.
#[wasm_bindgen]
pub fn record_matches(record_json: &str, pattern: &str) -> bool {
    serde_json::from_str::<crate::MatchRecord>(record_json)
        .map(|record| record.matches(pattern))
        .unwrap_or(false)
}
