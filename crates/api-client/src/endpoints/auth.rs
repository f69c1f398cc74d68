//! Auth endpoints and the signed-in session
//!
//! Signing in installs a [`Session`] on the client, so every later request
//! (from any clone of the client) carries the user's access token. Signing
//! out revokes the token on the backend and drops the local session even if
//! revocation fails.

use crate::client::MarketplaceClient;
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Auth API interface
#[derive(Clone)]
pub struct AuthApi {
    client: MarketplaceClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: MarketplaceClient) -> Self {
        Self { client }
    }

    /// Sign in with email and password
    ///
    /// POST /auth/v1/token?grant_type=password
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> ApiResult<Session> {
        let url = self.client.config().auth_url("token?grant_type=password");
        let body = PasswordGrant { email, password };

        let token: TokenResponse = self.client.post_url(&url, &body).await?;
        let session = Session::from(token);
        info!(user_id = %session.user.id, "Signed in");

        self.client.install_session(session.clone());
        Ok(session)
    }

    /// Exchange the refresh token for a new session
    ///
    /// POST /auth/v1/token?grant_type=refresh_token
    pub async fn refresh(&self) -> ApiResult<Session> {
        let current = self.client.session().ok_or(ApiError::NotSignedIn)?;
        let url = self.client.config().auth_url("token?grant_type=refresh_token");
        let body = RefreshGrant {
            refresh_token: &current.refresh_token,
        };

        let token: TokenResponse = self.client.post_url(&url, &body).await?;
        let session = Session::from(token);
        self.client.install_session(session.clone());
        Ok(session)
    }

    /// Return the current session, refreshing it first if it has expired
    pub async fn ensure_fresh(&self) -> ApiResult<Session> {
        match self.client.session() {
            Some(session) if !session.is_expired() => Ok(session),
            Some(_) => self.refresh().await,
            None => Err(ApiError::NotSignedIn),
        }
    }

    /// Sign out: revoke the session on the backend and tear it down locally
    ///
    /// POST /auth/v1/logout
    pub async fn sign_out(&self) -> ApiResult<()> {
        if !self.client.is_signed_in() {
            return Ok(());
        }

        let url = self.client.config().auth_url("logout");
        let result: ApiResult<()> = self.client.post_url(&url, &serde_json::json!({})).await;
        self.client.clear_session();

        if let Err(ref e) = result {
            warn!(error = %e, "Backend sign-out failed; local session dropped anyway");
        }
        result
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Token endpoint response
#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: AuthUser,
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID
    pub id: String,
    /// Email address, when the account has one
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for authenticated requests
    pub access_token: String,
    /// Token exchanged for a new session on expiry
    pub refresh_token: String,
    /// When the access token expires
    pub expires_at: DateTime<Utc>,
    /// The signed-in user
    pub user: AuthUser,
}

impl Session {
    /// Whether the access token has expired (with a 30 second margin)
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(30) >= self.expires_at
    }
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        Self {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
            user: token.user,
        }
    }
}
