//! Exporter self-metrics and Prometheus text exposition.
//!
//! Report samples come from the core collector; this module adds the scrape
//! duration summary, the failed-scrape counter and build info, then renders
//! everything as text for the telemetry endpoint.

pub mod metrics;

pub use metrics::{ExporterMetrics, TextEncoder};
