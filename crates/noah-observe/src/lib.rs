//! Observability setup for Noah: tracing subscriber and optional
//! OpenTelemetry export.

pub mod tracing_setup;
