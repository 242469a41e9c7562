//! Record engine entry points.
//!
//! `Db` owns the store and the model catalog. Class-level operations
//! (`build`, `create`, `find`, `where_`, ...) live on the `Model` handle
//! returned by `Db::model`; instance-level operations (`save`, `update`,
//! `destroy`, `reload`) and the association and validation engines are
//! methods on `Db` that take the record.

mod executor;
mod model;
mod record;
mod relation;
mod validate;


use crate::{
    Error,
    config::Config,
    model::{Catalog, ModelDescriptor, Schema},
    obs::{MetricsSink, sink::GLOBAL_METRICS_SINK},
    store::Store,
    value::Value,
};
use std::rc::Rc;

// re-exports
pub use executor::Executor;
pub use model::Model;
pub use record::{AttributeSet, Record};
pub use relation::AssociationError;
pub use validate::ValidateContext;

///
/// Db
///
/// Store handle plus model catalog, with session policy (debug, metrics).
///

pub struct Db<S: Store> {
    store: S,
    catalog: Catalog,
    metrics: Option<&'static dyn MetricsSink>,
}

impl<S: Store> Db<S> {
    #[must_use]
    pub fn new(store: S, schema: Schema) -> Self {
        Self {
            store,
            catalog: Catalog::new(schema),
            metrics: None,
        }
    }

    /// Build a `Db` applying config-level table overrides and debug flag.
    /// Every overridden model must be declared in `schema`.
    pub fn with_config(store: S, schema: Schema, config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let mut catalog = Catalog::new(schema).with_table_overrides(&config.tables)?;
        catalog.set_debug(config.debug);

        Ok(Self {
            store,
            catalog,
            metrics: None,
        })
    }

    /// Log every resolved descriptor at `info`.
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.catalog.set_debug(true);
        self
    }

    #[must_use]
    pub const fn metrics_sink(mut self, sink: &'static dyn MetricsSink) -> Self {
        self.metrics = Some(sink);
        self
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(crate) fn executor(&self) -> Executor<'_> {
        let sink: &dyn MetricsSink = match self.metrics {
            Some(sink) => sink,
            None => &GLOBAL_METRICS_SINK,
        };

        Executor::new(&self.store, sink)
    }

    /// Resolved descriptor for `model` (introspected on first use).
    pub fn descriptor(&self, model: &str) -> Result<Rc<ModelDescriptor>, Error> {
        self.catalog.resolve(model, &self.executor())
    }

    /// Class-level handle for `model`.
    pub fn model(&self, name: &str) -> Result<Model<'_, S>, Error> {
        Ok(Model::new(self, self.descriptor(name)?))
    }

    // ---------------------------------------------------------------------
    // Instance operations
    // ---------------------------------------------------------------------

    /// Validate, then INSERT (unsaved) or UPDATE (persisted).
    ///
    /// A failing validation returns `InvalidRecord` and writes nothing. An
    /// INSERT assigns the store id to the record.
    pub fn save(&self, record: &mut Record) -> Result<(), Error> {
        if record.is_frozen() {
            return Err(Error::frozen(record.model_name()));
        }
        if let Some(validation) = self.failed_validation(record)? {
            return Err(Error::InvalidRecord {
                model: record.model_name().to_string(),
                validation: validation.to_string(),
            });
        }

        let exec = self.executor();
        match record.id() {
            Some(id) => exec.update(record, id),
            None => {
                let id = exec.insert(record)?;
                record.assign_id(id);

                Ok(())
            }
        }
    }

    /// Assign `attributes`, then `save`.
    pub fn update<I, K, V>(&self, record: &mut Record, attributes: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        record.assign_attributes(attributes)?;

        self.save(record)
    }

    /// DELETE the record's row, then freeze it.
    ///
    /// A never-saved record issues no statement. Destroying twice re-issues
    /// the DELETE, which matches no row.
    pub fn destroy(&self, record: &mut Record) -> Result<(), Error> {
        if let Some(id) = record.id() {
            self.executor().delete(record.descriptor(), id)?;
        }
        record.freeze();

        Ok(())
    }

    /// Fresh copy of the record's row; the original is left untouched.
    pub fn reload(&self, record: &Record) -> Result<Option<Record>, Error> {
        match record.id() {
            Some(id) => self.model(record.model_name())?.find(id),
            None => Ok(None),
        }
    }
}

#[cfg(feature = "sqlite")]
impl Db<crate::store::SqliteStore> {
    /// Open the SQLite store named by `config` and apply its overrides.
    pub fn open(schema: Schema, config: &Config) -> Result<Self, Error> {
        let store = crate::store::SqliteStore::from_config(&config.store)?;

        Self::with_config(store, schema, config)
    }
}
