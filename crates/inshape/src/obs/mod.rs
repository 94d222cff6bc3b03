//! Observability: thread-local telemetry (metrics) and sink abstractions.

pub mod metrics;
pub mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use metrics::EventReport;
pub use sink::{
    FilterKind, FilterPath, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
