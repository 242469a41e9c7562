//! Metrics sink boundary.
//!
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.
//! A `Db` records into the process-local global sink unless a sink override
//! was installed with `Db::metrics_sink`.

use crate::obs::metrics;
use derive_more::Display;

///
/// ExecKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ExecKind {
    #[display("select")]
    Select,
    #[display("count")]
    Count,
    #[display("insert")]
    Insert,
    #[display("update")]
    Update,
    #[display("delete")]
    Delete,
    #[display("introspect")]
    Introspect,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent<'a> {
    Statement {
        kind: ExecKind,
        table: &'a str,
    },
    RowsLoaded {
        table: &'a str,
        rows: u64,
    },
    ValidationFailed {
        model: &'a str,
        validation: &'a str,
    },
    DescriptorResolved {
        model: &'a str,
        columns: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent<'_>);
}

/// GlobalMetricsSink
/// Default process-local sink that writes into global metrics state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::Statement { kind, table } => {
                metrics::with_state_mut(|m| {
                    m.ops.bump(kind);
                    m.tables.entry(table.to_string()).or_default().bump(kind);
                });
            }

            MetricsEvent::RowsLoaded { table, rows } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_loaded = m.ops.rows_loaded.saturating_add(rows);
                    let entry = m.tables.entry(table.to_string()).or_default();
                    entry.rows_loaded = entry.rows_loaded.saturating_add(rows);
                });
            }

            MetricsEvent::ValidationFailed { model, validation } => {
                metrics::with_state_mut(|m| {
                    m.ops.validation_failures = m.ops.validation_failures.saturating_add(1);
                    *m.failed_validations
                        .entry(format!("{model}.{validation}"))
                        .or_default() += 1;
                });
            }

            MetricsEvent::DescriptorResolved { model, columns } => {
                metrics::with_state_mut(|m| {
                    m.ops.descriptors_resolved = m.ops.descriptors_resolved.saturating_add(1);
                    m.columns.insert(model.to_string(), columns);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

///
/// TESTS
///
