use crate::{
    Error,
    db::Executor,
    model::{ModelDescriptor, Schema},
    obs::MetricsEvent,
};
use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
};
use tabula_utils::inflector;

///
/// Catalog
///
/// Schema plus a write-once descriptor cache. A model's table name and
/// columns are resolved on first use; later schema changes in the store are
/// not observed.
///

#[derive(Debug)]
pub struct Catalog {
    schema: Schema,
    table_overrides: BTreeMap<String, String>,
    descriptors: RefCell<HashMap<String, Rc<ModelDescriptor>>>,
    debug: bool,
}

impl Catalog {
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            table_overrides: BTreeMap::new(),
            descriptors: RefCell::new(HashMap::new()),
            debug: false,
        }
    }

    /// Apply config-level table overrides; every named model must exist.
    pub(crate) fn with_table_overrides(
        mut self,
        overrides: &BTreeMap<String, String>,
    ) -> Result<Self, Error> {
        for (model, table) in overrides {
            self.schema.constantize(model)?;
            self.table_overrides.insert(model.clone(), table.clone());
        }

        Ok(self)
    }

    pub(crate) const fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Table name for `model`: config override, then the definition's own
    /// override, then `tableize(model)`.
    pub fn table_name(&self, model: &str) -> Result<String, Error> {
        let def = self.schema.constantize(model)?;

        Ok(self
            .table_overrides
            .get(model)
            .cloned()
            .or_else(|| def.table_override().map(ToString::to_string))
            .unwrap_or_else(|| inflector::tableize(def.name())))
    }

    /// Cached descriptor for `model`, introspecting the store on first use.
    pub(crate) fn resolve(
        &self,
        model: &str,
        exec: &Executor<'_>,
    ) -> Result<Rc<ModelDescriptor>, Error> {
        if let Some(desc) = self.descriptors.borrow().get(model) {
            return Ok(Rc::clone(desc));
        }

        let def = Rc::clone(self.schema.constantize(model)?);
        let table = self.table_name(model)?;
        let columns = exec.columns_of(&table)?;
        let desc = Rc::new(ModelDescriptor::new(def, table, columns)?);

        exec.record(MetricsEvent::DescriptorResolved {
            model,
            columns: desc.column_names().len() as u64,
        });
        if self.debug {
            log::info!(
                target: "tabula::schema",
                "resolved {model} -> \"{}\" {:?}",
                desc.table_name(),
                desc.column_names()
            );
        }

        self.descriptors
            .borrow_mut()
            .insert(model.to_string(), Rc::clone(&desc));

        Ok(desc)
    }

    /// Number of descriptors resolved so far.
    #[must_use]
    pub fn resolved_len(&self) -> usize {
        self.descriptors.borrow().len()
    }
}
