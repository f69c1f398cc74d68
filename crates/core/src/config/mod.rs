//! Configuration loading and schema definitions
//!
//! Settings live in `artmarket.toml`; backend connection details come from
//! the environment (see `artmarket-api-client`).

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
