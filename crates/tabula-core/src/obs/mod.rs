//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Engine code never touches metrics state directly; it emits
//! `MetricsEvent`s into a `MetricsSink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, TableSummary};
pub use sink::{ExecKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
