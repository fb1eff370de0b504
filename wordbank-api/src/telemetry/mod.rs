//! Wordbank Telemetry - Logging Infrastructure
//!
//! Structured `tracing` output for the API layer, plus a request span
//! middleware. Everything writes to stdout; there is no exporter.

pub mod middleware;
pub mod tracer;

pub use middleware::observability_middleware;
pub use tracer::{init_tracer, LogFormat, TelemetryConfig};
