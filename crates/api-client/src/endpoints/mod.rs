//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a specific set of backend endpoints.
//!
//! | Module | Backend path | Description |
//! |--------|--------------|-------------|
//! | `artworks` | `/rest/v1/artworks` | Approved catalogue queries; implements `RecordStore` |
//! | `auth` | `/auth/v1/token`, `/auth/v1/logout` | Session sign-in, refresh, sign-out |

pub mod artworks;
pub mod auth;

pub use artworks::ArtworksApi;
pub use auth::{AuthApi, AuthUser, Session};
