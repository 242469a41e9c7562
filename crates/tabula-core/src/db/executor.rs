//! Statement layer of the record engine.
//!
//! Builds parameterized SQL for one model descriptor, runs it through the
//! store, and normalizes rows into records. Identifiers are quoted; values
//! always travel as binds. Every statement is logged and reported to the
//! metrics sink.

use crate::{
    Error, PRIMARY_KEY,
    db::Record,
    model::ModelDescriptor,
    obs::{ExecKind, MetricsEvent, MetricsSink},
    store::{Binds, Row, Store, StoreError, quote_identifier},
    value::Value,
};
use std::rc::Rc;

///
/// Executor
///
/// Borrowed store plus metrics sink. Cheap to build per call; holds no
/// state of its own.
///

#[derive(Clone, Copy)]
pub struct Executor<'a> {
    store: &'a dyn Store,
    sink: &'a dyn MetricsSink,
}

impl<'a> Executor<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn Store, sink: &'a dyn MetricsSink) -> Self {
        Self { store, sink }
    }

    pub(crate) fn record(&self, event: MetricsEvent<'_>) {
        self.sink.record(event);
    }

    fn run(
        &self,
        kind: ExecKind,
        table: &str,
        sql: &str,
        binds: &Binds,
    ) -> Result<Vec<Row>, Error> {
        log::debug!(target: "tabula::sql", "{kind} {sql} [{} binds]", binds.len());
        self.record(MetricsEvent::Statement { kind, table });

        let rows = self.store.execute(sql, binds)?;
        if kind == ExecKind::Select {
            self.record(MetricsEvent::RowsLoaded {
                table,
                rows: rows.len() as u64,
            });
        }

        Ok(rows)
    }

    pub(crate) fn columns_of(&self, table: &str) -> Result<Vec<String>, Error> {
        let quoted = quote_identifier(table)?;
        log::debug!(target: "tabula::sql", "introspect SELECT * FROM {quoted}");
        self.record(MetricsEvent::Statement {
            kind: ExecKind::Introspect,
            table,
        });

        Ok(self.store.columns_of(table)?)
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    /// `SELECT *` with an optional caller-trusted WHERE fragment.
    pub fn select(
        &self,
        desc: &Rc<ModelDescriptor>,
        fragment: Option<&str>,
        binds: &Binds,
        limit: Option<u32>,
    ) -> Result<Vec<Record>, Error> {
        let mut sql = format!("SELECT * FROM {}", quote_identifier(desc.table_name())?);
        if let Some(fragment) = fragment {
            sql.push_str(" WHERE ");
            sql.push_str(fragment);
        }
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        self.run(ExecKind::Select, desc.table_name(), &sql, binds)?
            .into_iter()
            .map(|row| Record::from_row(desc, row))
            .collect()
    }

    /// First row matching `"column" = value`.
    pub fn find_by_value(
        &self,
        desc: &Rc<ModelDescriptor>,
        column: &str,
        value: &Value,
    ) -> Result<Option<Record>, Error> {
        if value.is_null() {
            return Ok(None);
        }

        let fragment = format!("{} = ?", quote_identifier(column)?);
        let binds = Binds::Positional(vec![value.clone()]);

        Ok(self
            .select(desc, Some(&fragment), &binds, Some(1))?
            .into_iter()
            .next())
    }

    /// `SELECT COUNT("id")` with an optional WHERE fragment.
    pub fn count(
        &self,
        desc: &ModelDescriptor,
        fragment: Option<&str>,
        binds: &Binds,
    ) -> Result<i64, Error> {
        let mut sql = format!(
            "SELECT COUNT({}) FROM {}",
            quote_identifier(PRIMARY_KEY)?,
            quote_identifier(desc.table_name())?
        );
        if let Some(fragment) = fragment {
            sql.push_str(" WHERE ");
            sql.push_str(fragment);
        }

        let rows = self.run(ExecKind::Count, desc.table_name(), &sql, binds)?;

        rows.first()
            .and_then(|row| row.get_index(0))
            .and_then(Value::as_int)
            .ok_or_else(|| StoreError::UnexpectedShape { statement: "count" }.into())
    }

    pub fn exists(&self, desc: &Rc<ModelDescriptor>, id: i64) -> Result<bool, Error> {
        Ok(self
            .find_by_value(desc, PRIMARY_KEY, &Value::Int(id))?
            .is_some())
    }

    // ---------------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------------

    /// INSERT every non-id column and return the id the store assigned.
    pub fn insert(&self, record: &Record) -> Result<i64, Error> {
        let desc = record.descriptor();
        let table = quote_identifier(desc.table_name())?;
        let columns = desc
            .columns_except_id()
            .map(quote_identifier)
            .collect::<Result<Vec<_>, _>>()?;

        let sql = if columns.is_empty() {
            format!("INSERT INTO {table} DEFAULT VALUES")
        } else {
            let placeholders = vec!["?"; columns.len()].join(", ");
            format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders})",
                columns.join(", ")
            )
        };
        let binds = Binds::Positional(record.values()[1..].to_vec());

        self.run(ExecKind::Insert, desc.table_name(), &sql, &binds)?;

        Ok(self.store.last_inserted_id()?)
    }

    /// UPDATE every non-id column of the row keyed by `id`.
    pub fn update(&self, record: &Record, id: i64) -> Result<(), Error> {
        let desc = record.descriptor();
        let assignments = desc
            .columns_except_id()
            .map(|c| quote_identifier(c).map(|q| format!("{q} = ?")))
            .collect::<Result<Vec<_>, _>>()?;
        if assignments.is_empty() {
            return Ok(());
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            quote_identifier(desc.table_name())?,
            assignments.join(", "),
            quote_identifier(PRIMARY_KEY)?
        );
        let mut values = record.values()[1..].to_vec();
        values.push(Value::Int(id));

        self.run(
            ExecKind::Update,
            desc.table_name(),
            &sql,
            &Binds::Positional(values),
        )?;

        Ok(())
    }

    pub fn delete(&self, desc: &ModelDescriptor, id: i64) -> Result<(), Error> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            quote_identifier(desc.table_name())?,
            quote_identifier(PRIMARY_KEY)?
        );

        self.run(
            ExecKind::Delete,
            desc.table_name(),
            &sql,
            &Binds::Positional(vec![Value::Int(id)]),
        )?;

        Ok(())
    }
}
