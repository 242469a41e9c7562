use crate::{
    Error, PRIMARY_KEY,
    db::{AttributeSet, Db, Record},
    model::ModelDescriptor,
    store::{Binds, Store},
    value::Value,
};
use std::rc::Rc;

///
/// Model
///
/// Class-level operations for one resolved model.
///
/// `where_` and `find_by` splice the caller's fragment into the statement
/// verbatim. The fragment is trusted text; keep values in `binds`.
///

pub struct Model<'a, S: Store> {
    db: &'a Db<S>,
    desc: Rc<ModelDescriptor>,
}

impl<'a, S: Store> Model<'a, S> {
    pub(crate) const fn new(db: &'a Db<S>, desc: Rc<ModelDescriptor>) -> Self {
        Self { db, desc }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.desc.name()
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        self.desc.table_name()
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        self.desc.column_names()
    }

    #[must_use]
    pub const fn descriptor(&self) -> &Rc<ModelDescriptor> {
        &self.desc
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Unsaved record with `attributes` assigned.
    pub fn build<I, K, V>(&self, attributes: I) -> Result<Record, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.build_with(attributes, |_| Ok(()))
    }

    /// `build`, then run `init` on the record before returning it.
    pub fn build_with<I, K, V, F>(&self, attributes: I, init: F) -> Result<Record, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
        F: FnOnce(&mut Record) -> Result<(), Error>,
    {
        let mut record = Record::new(Rc::clone(&self.desc));
        record.assign_attributes(attributes)?;
        init(&mut record)?;

        Ok(record)
    }

    /// `build` + `save`. Fails with `InvalidRecord` when a validation does
    /// not hold; nothing is written in that case.
    pub fn create<I, K, V>(&self, attributes: I) -> Result<Record, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.create_with(attributes, |_| Ok(()))
    }

    pub fn create_with<I, K, V, F>(&self, attributes: I, init: F) -> Result<Record, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
        F: FnOnce(&mut Record) -> Result<(), Error>,
    {
        let mut record = self.build_with(attributes, init)?;
        self.db.save(&mut record)?;

        Ok(record)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn find(&self, id: i64) -> Result<Option<Record>, Error> {
        self.db
            .executor()
            .find_by_value(&self.desc, PRIMARY_KEY, &Value::Int(id))
    }

    pub fn all(&self) -> Result<Vec<Record>, Error> {
        self.db
            .executor()
            .select(&self.desc, None, &Binds::None, None)
    }

    /// Every row matching `fragment`; empty when nothing matches.
    pub fn where_(&self, fragment: &str, binds: impl Into<Binds>) -> Result<Vec<Record>, Error> {
        self.db
            .executor()
            .select(&self.desc, Some(fragment), &binds.into(), None)
    }

    /// First row matching `fragment` (`LIMIT 1`).
    pub fn find_by(&self, fragment: &str, binds: impl Into<Binds>) -> Result<Option<Record>, Error> {
        Ok(self
            .db
            .executor()
            .select(&self.desc, Some(fragment), &binds.into(), Some(1))?
            .into_iter()
            .next())
    }

    pub fn count(&self) -> Result<i64, Error> {
        self.db.executor().count(&self.desc, None, &Binds::None)
    }

    pub fn exists(&self, id: i64) -> Result<bool, Error> {
        self.db.executor().exists(&self.desc, id)
    }
}
