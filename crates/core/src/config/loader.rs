//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Locations searched, in order, when no path is given.
const CANDIDATES: &[&str] = &[".artmarket.toml", "artmarket.toml", ".config/artmarket.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from; `None` when defaults were used
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, a standard location, or defaults.
    ///
    /// An explicit path that does not exist is an error; a missing file in
    /// the standard locations is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(Path::new(".")),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find a configuration file under `dir`
fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|candidate| candidate.exists())
}

/// Load, parse, and validate a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let context = format!("While loading {}", path.display());

    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(context.clone())?;
    let schema: ConfigSchema = toml::from_str(&content)
        .map_err(Error::from)
        .context(context.clone())?;
    schema.validate().context(context)?;

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.search.max_variants, 50);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artmarket.toml");
        fs::write(&path, "[search]\nmax_variants = 20\n\n[logging]\njson = true\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.path.as_deref(), Some(path.as_path()));
        assert_eq!(config.schema.search.max_variants, 20);
        assert!(config.schema.logging.json);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_invalid_file_reports_context() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artmarket.toml");
        fs::write(&path, "[search]\nmax_variants = 80\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
        assert!(err.context.unwrap().contains("artmarket.toml"));
    }

    #[test]
    fn test_find_config_file_order() {
        let dir = TempDir::new().unwrap();
        assert!(find_config_file(dir.path()).is_none());

        fs::write(dir.path().join("artmarket.toml"), "").unwrap();
        fs::write(dir.path().join(".artmarket.toml"), "").unwrap();
        assert_eq!(
            find_config_file(dir.path()),
            Some(dir.path().join(".artmarket.toml"))
        );
    }
}
