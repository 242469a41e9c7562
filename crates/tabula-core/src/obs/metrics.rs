use crate::obs::sink::ExecKind;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for runtime operations.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) tables: BTreeMap<String, TableCounters>,
    pub(crate) failed_validations: BTreeMap<String, u64>,
    pub(crate) columns: BTreeMap<String, u64>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Statements issued
    pub selects: u64,
    pub counts: u64,
    pub inserts: u64,
    pub updates: u64,
    pub deletes: u64,
    pub introspections: u64,

    // Rows
    pub rows_loaded: u64,

    // Engine
    pub validation_failures: u64,
    pub descriptors_resolved: u64,
}

impl EventOps {
    pub(crate) const fn bump(&mut self, kind: ExecKind) {
        let slot = match kind {
            ExecKind::Select => &mut self.selects,
            ExecKind::Count => &mut self.counts,
            ExecKind::Insert => &mut self.inserts,
            ExecKind::Update => &mut self.updates,
            ExecKind::Delete => &mut self.deletes,
            ExecKind::Introspect => &mut self.introspections,
        };
        *slot = slot.saturating_add(1);
    }
}

///
/// TableCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct TableCounters {
    pub(crate) ops: EventOps,
    pub(crate) rows_loaded: u64,
}

impl TableCounters {
    pub(crate) const fn bump(&mut self, kind: ExecKind) {
        self.ops.bump(kind);
    }
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all event state.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
/// Counter report, global totals plus one summary per table.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: EventOps,
    pub tables: Vec<TableSummary>,
    /// Failure counts keyed by `Model.validation`.
    pub failed_validations: BTreeMap<String, u64>,
    /// Introspected column count per resolved model.
    pub columns: BTreeMap<String, u64>,
}

///
/// TableSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TableSummary {
    pub table: String,
    pub selects: u64,
    pub counts: u64,
    pub inserts: u64,
    pub updates: u64,
    pub deletes: u64,
    pub rows_loaded: u64,
    pub avg_rows_per_select: f64,
}

/// Build a report from in-memory counters.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let tables = snap
        .tables
        .iter()
        .map(|(table, c)| TableSummary {
            table: table.clone(),
            selects: c.ops.selects,
            counts: c.ops.counts,
            inserts: c.ops.inserts,
            updates: c.ops.updates,
            deletes: c.ops.deletes,
            rows_loaded: c.rows_loaded,
            avg_rows_per_select: if c.ops.selects > 0 {
                c.rows_loaded as f64 / c.ops.selects as f64
            } else {
                0.0
            },
        })
        .collect();

    EventReport {
        counters: snap.ops,
        tables,
        failed_validations: snap.failed_validations,
        columns: snap.columns,
    }
}
