//! Core utilities for the art marketplace search tools
//!
//! This crate provides shared functionality used by the client and CLI crates:
//!
//! - **Error handling**: Coded errors with context and recovery suggestions
//! - **Configuration**: `artmarket.toml` loading with defaults and validation
//! - **Resilience**: Backoff policy and circuit breaker for backend calls
//!
//! # Example
//!
//! ```rust,no_run
//! use artmarket_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid artmarket.toml");
//! println!("fuzzy variants: {}", config.schema.search.max_variants);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig};
}
