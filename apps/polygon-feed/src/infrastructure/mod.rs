//! Infrastructure Layer - Adapters and external integrations.
//!
//! This layer contains the Polygon codec and session that drive the port
//! interfaces defined in the application layer.

/// Polygon frame splitting, record decoding and the feed session.
pub mod polygon;

/// Configuration loaded from the environment.
pub mod config;

/// Prometheus metrics instrumentation.
pub mod metrics;

/// OpenTelemetry tracing integration.
pub mod telemetry;

/// Newline-delimited frame replay connection.
pub mod replay;
