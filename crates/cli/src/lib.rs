//! Terminal output helpers for the art marketplace tools
//!
//! Provides shared CLI functionality:
//! - Status messages and error reports
//! - Search result rendering with highlighted matches
//! - Spinners for backend round-trips

#![warn(missing_docs)]

pub mod output;
pub mod progress;
pub mod render;
