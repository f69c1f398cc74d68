//! Marketplace backend client
//!
//! This crate provides a resilient HTTP client for the marketplace's hosted
//! backend: the REST layer over the artwork catalogue and the auth endpoints.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load URLs and keys from environment variables
//! - **Retry with exponential backoff**: Automatic retry for transient failures
//! - **Circuit breaker**: Prevent cascading failures during outages
//! - **Request correlation**: Track requests with unique IDs for debugging
//! - **Record store**: [`ArtworksApi`] plugs straight into the search executor
//!
//! # Example
//!
//! ```rust,no_run
//! use artmarket_api_client::MarketplaceClient;
//! use artmarket_search::SearchExecutor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarketplaceClient::new()?;
//!     let executor = SearchExecutor::new(client.artworks());
//!
//!     let outcome = executor.search("monett", "paintings").await?;
//!     println!("{} artworks via {:?}", outcome.len(), outcome.pass);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::MarketplaceClient;
pub use config::{ClientConfig, Environment};
pub use endpoints::{ArtworksApi, AuthApi, AuthUser, Session};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::MarketplaceClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{ArtworksApi, AuthApi, Session};
    pub use crate::error::{ApiError, ApiResult};
}
