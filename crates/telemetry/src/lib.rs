//! Logging and metrics for the art marketplace tools
//!
//! - [`init_with_config`] installs a tracing subscriber writing compact text
//!   or JSON lines to stderr
//! - [`metrics()`] is a process-wide registry of search counters and latency

mod logging;
mod metrics;

pub use logging::{init, init_with_config, session_id, TelemetryConfig};
pub use metrics::{metrics, names, LatencySummary, MetricsRegistry, Timer};
