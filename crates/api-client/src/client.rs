//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::auth::Session;
use crate::endpoints::{ArtworksApi, AuthApi};
use crate::error::{ApiError, ApiResult};
use artmarket_core::retry::{CircuitBreaker, CircuitState};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header expected by the hosted backend
const APIKEY_HEADER: &str = "apikey";

/// Marketplace backend client with built-in resilience patterns
///
/// One client is constructed by the application root and handed to whatever
/// needs it; clones share the connection pool, circuit breaker, and session.
///
/// This client wraps `reqwest` and adds:
/// - Automatic retry with exponential backoff
/// - Circuit breaker to prevent cascading failures
/// - Request correlation IDs for tracing
/// - The signed-in user's session, if any
#[derive(Clone)]
pub struct MarketplaceClient {
    inner: Client,
    config: Arc<ClientConfig>,
    circuit_breaker: Arc<CircuitBreaker>,
    session: Arc<RwLock<Option<Session>>>,
}

impl MarketplaceClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("artmarket-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(ref key) = config.anon_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| ApiError::config("anon key is not a valid header value"))?;
            default_headers.insert(APIKEY_HEADER, value);
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        let circuit_breaker = Arc::new(CircuitBreaker::new(config.circuit_breaker.clone()));

        Ok(Self {
            inner,
            config: Arc::new(config),
            circuit_breaker,
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the backend project URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get circuit breaker state
    #[must_use]
    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    /// Reset the circuit breaker
    pub fn reset_circuit(&self) {
        self.circuit_breaker.reset();
    }

    // -------------------------------------------------------------------------
    // Session lifecycle
    // -------------------------------------------------------------------------

    /// The signed-in user's session
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a user is signed in
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session().is_some()
    }

    pub(crate) fn install_session(&self, session: Session) {
        debug!(user_id = %session.user.id, "Session installed");
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub(crate) fn clear_session(&self) -> Option<Session> {
        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            debug!("Session cleared");
        }
        previous
    }

    /// Bearer token: user session, then service role key, then anon key
    fn bearer_token(&self) -> Option<String> {
        self.session()
            .map(|s| s.access_token)
            .or_else(|| self.config.service_role_key.clone())
            .or_else(|| self.config.anon_key.clone())
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access artwork catalogue endpoints
    #[must_use]
    pub fn artworks(&self) -> ArtworksApi {
        ArtworksApi::new(self.clone())
    }

    /// Access auth endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods with resilience
    // -------------------------------------------------------------------------

    /// Perform a GET request to an absolute URL
    #[instrument(skip(self), fields(request_id))]
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.request_url(Method::GET, url, Option::<&()>::None).await
    }

    /// Perform a POST request to an absolute URL
    #[instrument(skip(self, body), fields(request_id))]
    pub async fn post_url<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request_url(Method::POST, url, Some(body)).await
    }

    /// Execute a request to an absolute URL with full resilience patterns
    async fn request_url<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        if !self.circuit_breaker.can_execute() {
            warn!(
                request_id = %request_id,
                url = %url,
                "Circuit breaker is open, rejecting request"
            );
            return Err(ApiError::CircuitOpen);
        }

        self.execute_with_retry(&request_id, method, url, body)
            .await
    }

    /// Execute request with retry logic
    async fn execute_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        request_id: &str,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let retry_config = &self.config.retry;
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry_config.max_attempts {
            if attempt > 0 {
                let delay = retry_config.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self
                .execute_single_request(request_id, method.clone(), url, body)
                .await;
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    self.circuit_breaker.record_success();
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) => {
                    // 4xx means the backend is healthy and rejected us
                    if !e.is_client_error() {
                        self.circuit_breaker.record_failure();
                    }

                    if e.is_retryable() && attempt + 1 < retry_config.max_attempts {
                        debug!(
                            request_id = %request_id,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, will retry"
                        );
                        last_error = Some(e);
                    } else {
                        debug!(
                            request_id = %request_id,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, not retrying"
                        );
                        return Err(e);
                    }
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts: retry_config.max_attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// Execute a single request without retry
    async fn execute_single_request<T: DeserializeOwned, B: Serialize>(
        &self,
        request_id: &str,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let mut request = self
            .inner
            .request(method, url)
            .header(X_REQUEST_ID, request_id);

        if let Some(token) = self.bearer_token() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        handle_response(response).await
    }
}

/// Check status and deserialize; an empty body reads as JSON `null`
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = if text.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            text
        };
        return Err(ApiError::api_response(status.as_u16(), message));
    }

    let body = if text.trim().is_empty() { "null" } else { text.as_str() };
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::auth::AuthUser;
    use chrono::{Duration, Utc};

    fn session(token: &str) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some("buyer@example.com".to_string()),
            },
        }
    }

    #[test]
    fn test_client_creation() {
        let client = MarketplaceClient::with_config(ClientConfig::development());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClientConfig::development().with_base_url("not a url");
        assert!(MarketplaceClient::with_config(config).is_err());
    }

    #[test]
    fn test_bearer_token_precedence() {
        let config = ClientConfig::development().with_anon_key("anon");
        let client = MarketplaceClient::with_config(config).unwrap();
        assert_eq!(client.bearer_token().as_deref(), Some("anon"));

        client.install_session(session("user-jwt"));
        assert_eq!(client.bearer_token().as_deref(), Some("user-jwt"));

        client.clear_session();
        assert_eq!(client.bearer_token().as_deref(), Some("anon"));
    }

    #[test]
    fn test_clones_share_session() {
        let client = MarketplaceClient::with_config(ClientConfig::development()).unwrap();
        let handle = client.clone();

        client.install_session(session("jwt"));
        assert!(handle.is_signed_in());

        assert!(handle.clear_session().is_some());
        assert!(!client.is_signed_in());
        assert!(client.clear_session().is_none());
    }
}
