//! Configuration for the marketplace backend client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use artmarket_core::retry::{CircuitBreakerConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Local backend started by the platform CLI
const LOCAL_BACKEND_URL: &str = "http://localhost:54321";

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development backend
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse from `ARTMARKET_ENV`
    pub fn from_env() -> Self {
        Self::parse(&env::var("ARTMARKET_ENV").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Project URL of the hosted backend (REST and auth live under it)
    pub base_url: String,
    /// Anonymous key, sent on every request
    pub anon_key: Option<String>,
    /// Service role key, used as bearer token when no user is signed in
    pub service_role_key: Option<String>,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Circuit breaker configuration
    pub circuit_breaker: CircuitBreakerConfig,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `ARTMARKET_API_URL` or `SUPABASE_URL`: Backend project URL
    /// - `SUPABASE_ANON_KEY`: Anonymous key
    /// - `SUPABASE_SERVICE_ROLE_KEY`: Service role key (admin tooling only)
    /// - `ARTMARKET_ENV`: Environment (development/staging/production)
    /// - `ARTMARKET_TIMEOUT_SECS`: Request timeout in seconds
    ///
    /// Outside development a backend URL is required.
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();

        let base_url = match env::var("ARTMARKET_API_URL").or_else(|_| env::var("SUPABASE_URL")) {
            Ok(url) => url,
            Err(_) if environment == Environment::Development => LOCAL_BACKEND_URL.to_string(),
            Err(_) => return Err(ApiError::missing_env("SUPABASE_URL")),
        };

        let timeout = env::var("ARTMARKET_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map_or(Duration::from_secs(30), Duration::from_secs);

        let retry = match environment {
            Environment::Development => RetryConfig::quick(),
            Environment::Staging => RetryConfig::default(),
            Environment::Production => RetryConfig::patient(),
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: env::var("SUPABASE_ANON_KEY").ok(),
            service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY").ok(),
            timeout,
            retry,
            circuit_breaker: CircuitBreakerConfig::default(),
            environment,
        })
    }

    /// Create development configuration (local backend)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: LOCAL_BACKEND_URL.to_string(),
            anon_key: None,
            service_role_key: None,
            timeout: Duration::from_secs(10),
            retry: RetryConfig::quick(),
            circuit_breaker: CircuitBreakerConfig::default(),
            environment: Environment::Development,
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder-style method to set anon key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set service role key
    #[must_use]
    pub fn with_service_role_key(mut self, key: impl Into<String>) -> Self {
        self.service_role_key = Some(key.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// URL of a REST (table) resource
    #[must_use]
    pub fn rest_url(&self, resource: &str) -> String {
        format!("{}/rest/v1/{resource}", self.base_url)
    }

    /// URL of an auth endpoint
    #[must_use]
    pub fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{endpoint}", self.base_url)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(ApiError::config("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config() {
        let config = ClientConfig::development();
        assert!(config.base_url.contains("localhost"));
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("dev"), Environment::Development);
        assert_eq!(Environment::parse("STAGE"), Environment::Staging);
        assert_eq!(Environment::parse(""), Environment::Production);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://art.example.co/")
            .with_anon_key("anon")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://art.example.co");
        assert_eq!(config.anon_key.as_deref(), Some("anon"));
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_endpoint_urls() {
        let config = ClientConfig::default().with_base_url("https://art.example.co");
        assert_eq!(config.rest_url("artworks"), "https://art.example.co/rest/v1/artworks");
        assert_eq!(config.auth_url("logout"), "https://art.example.co/auth/v1/logout");
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default().with_base_url("ftp://x").validate().is_err());
        assert!(ClientConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
