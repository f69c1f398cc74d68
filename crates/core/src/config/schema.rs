//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Most typo-variant queries a single search may issue.
pub const VARIANT_QUERY_CEILING: usize = 50;

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.logging.validate()
    }
}

/// Search behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Typo variants queried when the exact pass is empty
    #[serde(default = "default_max_variants")]
    pub max_variants: usize,

    /// Variant queries in flight at once (1 = sequential)
    #[serde(default = "default_fuzzy_concurrency")]
    pub fuzzy_concurrency: usize,

    /// Category used when none is given on the command line
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Edit classes used to build variants
    #[serde(default)]
    pub edits: EditsConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_variants: default_max_variants(),
            fuzzy_concurrency: default_fuzzy_concurrency(),
            default_category: default_category(),
            edits: EditsConfig::default(),
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<()> {
        if self.max_variants > VARIANT_QUERY_CEILING {
            return Err(Error::invalid_config(
                "search.max_variants",
                format!("{} exceeds the limit of {VARIANT_QUERY_CEILING}", self.max_variants),
            )
            .with_suggestion(format!("Use a value between 0 and {VARIANT_QUERY_CEILING}")));
        }
        if self.fuzzy_concurrency == 0 {
            return Err(Error::invalid_config(
                "search.fuzzy_concurrency",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn default_max_variants() -> usize {
    VARIANT_QUERY_CEILING
}

fn default_fuzzy_concurrency() -> usize {
    1
}

fn default_category() -> String {
    "all".to_string()
}

/// Typo edit classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditsConfig {
    /// Remove one character
    #[serde(default = "default_true")]
    pub deletions: bool,

    /// Swap two adjacent characters
    #[serde(default = "default_true")]
    pub transpositions: bool,

    /// Replace a character with a neighbouring key
    #[serde(default = "default_true")]
    pub substitutions: bool,

    /// Type a character twice
    #[serde(default = "default_true")]
    pub duplications: bool,
}

impl Default for EditsConfig {
    fn default() -> Self {
        Self {
            deletions: true,
            transpositions: true,
            substitutions: true,
            duplications: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
        let level = self.level.to_lowercase();
        // Directive strings like "artmarket_search=debug" are passed through
        if !level.contains('=') && !LEVELS.contains(&level.as_str()) {
            return Err(Error::invalid_config(
                "logging.level",
                format!("unknown level '{}'", self.level),
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let schema = ConfigSchema::default();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.search.max_variants, 50);
        assert_eq!(schema.search.fuzzy_concurrency, 1);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [search]
            fuzzy_concurrency = 4

            [search.edits]
            substitutions = false
            "#,
        )
        .unwrap();

        assert_eq!(schema.search.fuzzy_concurrency, 4);
        assert_eq!(schema.search.max_variants, 50);
        assert!(!schema.search.edits.substitutions);
        assert!(schema.search.edits.deletions);
        assert_eq!(schema.logging.level, "warn");
    }

    #[test]
    fn test_rejects_variant_budget_over_ceiling() {
        let mut schema = ConfigSchema::default();
        schema.search.max_variants = 51;
        let err = schema.validate().unwrap_err();
        assert!(err.message.contains("search.max_variants"));
    }

    #[test]
    fn test_rejects_zero_concurrency_and_bad_level() {
        let mut schema = ConfigSchema::default();
        schema.search.fuzzy_concurrency = 0;
        assert!(schema.validate().is_err());

        let mut schema = ConfigSchema::default();
        schema.logging.level = "loud".to_string();
        assert!(schema.validate().is_err());

        schema.logging.level = "artmarket_search=debug".to_string();
        assert!(schema.validate().is_ok());
    }
}
