//! Mapping from the configuration file to search options

use artmarket_core::config::{EditsConfig, SearchConfig};
use artmarket_search::{SearchOptions, VariantOptions};

/// Executor options from `[search]`
pub fn search_options(config: &SearchConfig) -> SearchOptions {
    SearchOptions {
        max_variants: config.max_variants,
        fuzzy_concurrency: config.fuzzy_concurrency,
        variants: variant_options(&config.edits),
    }
}

/// Generator options from `[search.edits]`
pub fn variant_options(edits: &EditsConfig) -> VariantOptions {
    VariantOptions {
        deletions: edits.deletions,
        transpositions: edits.transpositions,
        substitutions: edits.substitutions,
        duplications: edits.duplications,
        limit: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artmarket_core::config::VARIANT_QUERY_CEILING;
    use artmarket_search::MAX_FUZZY_QUERIES;

    #[test]
    fn test_ceiling_matches_executor_cap() {
        assert_eq!(VARIANT_QUERY_CEILING, MAX_FUZZY_QUERIES);
    }

    #[test]
    fn test_defaults_agree() {
        assert_eq!(search_options(&SearchConfig::default()), SearchOptions::default());
    }

    #[test]
    fn test_edits_mapped() {
        let edits = EditsConfig {
            substitutions: false,
            duplications: false,
            ..EditsConfig::default()
        };
        let options = variant_options(&edits);

        assert!(options.deletions);
        assert!(options.transpositions);
        assert!(!options.substitutions);
        assert!(!options.duplications);
    }
}
