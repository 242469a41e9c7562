//! Validation engine.
//!
//! Validations are plain function pointers run in declaration order against
//! a `ValidateContext`, which exposes the record and the store-backed checks
//! (`is_unique`, `is_persisted`).

use crate::{
    Error,
    db::{AttributeSet, Db, Executor, Record},
    model::SchemaError,
    obs::MetricsEvent,
    store::{Binds, Store, quote_identifier},
    value::Value,
};

///
/// ValidateContext
///

pub struct ValidateContext<'a> {
    record: &'a Record,
    exec: Executor<'a>,
}

impl<'a> ValidateContext<'a> {
    #[must_use]
    pub const fn new(record: &'a Record, exec: Executor<'a>) -> Self {
        Self { record, exec }
    }

    #[must_use]
    pub const fn record(&self) -> &Record {
        self.record
    }

    pub fn get(&self, column: &str) -> Result<&Value, Error> {
        self.record.get(column)
    }

    /// Whether the record's row exists in the store.
    pub fn is_persisted(&self) -> Result<bool, Error> {
        match self.record.id() {
            Some(id) => self.exec.exists(self.record.descriptor(), id),
            None => Ok(false),
        }
    }

    /// Uniqueness of the record's values for `columns` taken together.
    ///
    /// Counts rows matching every column. An unsaved record is unique when
    /// no row matches; a persisted record may match itself, so at most one
    /// row is allowed.
    pub fn is_unique(&self, columns: &[&str]) -> Result<bool, Error> {
        let desc = self.record.descriptor();
        if columns.is_empty() {
            return Err(SchemaError::EmptyUniqueness {
                model: desc.name().to_string(),
            }
            .into());
        }

        // plain `=`: a NULL value matches no row
        let mut clauses = Vec::with_capacity(columns.len());
        let mut binds = Vec::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            clauses.push(format!("{} = :u{i}", quote_identifier(column)?));
            binds.push((format!("u{i}"), self.record.get(column)?.clone()));
        }
        let binds = Binds::Named(binds);

        let count = self
            .exec
            .count(desc, Some(&clauses.join(" AND ")), &binds)?;

        if self.is_persisted()? {
            Ok((0..=1).contains(&count))
        } else {
            Ok(count == 0)
        }
    }
}

impl<S: Store> Db<S> {
    /// Name of the first failing validation, if any.
    pub(crate) fn failed_validation(&self, record: &Record) -> Result<Option<&'static str>, Error> {
        let cx = ValidateContext::new(record, self.executor());
        for validation in record.descriptor().validations() {
            if !(validation.check)(&cx)? {
                log::debug!(
                    target: "tabula::validate",
                    "{} failed validation '{}'",
                    record.model_name(),
                    validation.name
                );
                self.executor().record(MetricsEvent::ValidationFailed {
                    model: record.model_name(),
                    validation: validation.name,
                });

                return Ok(Some(validation.name));
            }
        }

        Ok(None)
    }

    /// True iff every declared validation holds; stops at the first failure.
    pub fn is_valid(&self, record: &Record) -> Result<bool, Error> {
        Ok(self.failed_validation(record)?.is_none())
    }

    /// Uniqueness of `record` over `columns`; see `ValidateContext::is_unique`.
    pub fn is_unique(&self, record: &Record, columns: &[&str]) -> Result<bool, Error> {
        ValidateContext::new(record, self.executor()).is_unique(columns)
    }

    /// Whether `record` has a stored row.
    pub fn is_persisted(&self, record: &Record) -> Result<bool, Error> {
        ValidateContext::new(record, self.executor()).is_persisted()
    }
}
