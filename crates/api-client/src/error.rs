//! Error types for the API client

use artmarket_search::StoreError;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Circuit breaker is open
    #[error("Circuit breaker is open - backend temporarily unavailable")]
    CircuitOpen,

    /// An operation needs a signed-in session
    #[error("Not signed in")]
    NotSignedIn,

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            // 5xx and 429 (rate limited)
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::CircuitOpen
            | Self::NotSignedIn
            | Self::Config(_)
            | Self::MissingEnvVar(_)
            | Self::Json(_)
            | Self::InvalidUrl(_)
            | Self::RetriesExhausted { .. } => false,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }

    /// Whether the backend could not be reached at all
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::CircuitOpen | Self::RetriesExhausted { .. } => true,
            _ => false,
        }
    }
}

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        if err.is_unavailable() {
            StoreError::Unavailable(err.to_string())
        } else if matches!(err, ApiError::Json(_)) {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::api_response(503, "down").is_retryable());
        assert!(ApiError::api_response(429, "slow down").is_retryable());
        assert!(!ApiError::api_response(401, "jwt expired").is_retryable());
        assert!(!ApiError::CircuitOpen.is_retryable());
    }

    #[test]
    fn test_status_classes() {
        let err = ApiError::api_response(404, "missing");
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert!(ApiError::api_response(500, "boom").is_server_error());
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            StoreError::from(ApiError::CircuitOpen),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(ApiError::api_response(400, "bad filter")),
            StoreError::Backend(_)
        ));

        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        assert!(matches!(
            StoreError::from(ApiError::Json(json_err)),
            StoreError::Decode(_)
        ));
    }
}
