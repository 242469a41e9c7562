use crate::{
    Error,
    model::{ModelDef, SchemaError},
};
use std::{
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

///
/// Schema
///
/// Explicit model registry. Built once at startup and handed to a `Db`;
/// there is no ambient, process-wide registry.
///

#[derive(Clone, Debug, Default)]
pub struct Schema {
    models: BTreeMap<String, Rc<ModelDef>>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model definition.
    pub fn register(&mut self, def: ModelDef) -> Result<&mut Self, SchemaError> {
        if self.models.contains_key(def.name()) {
            return Err(SchemaError::DuplicateModel(def.name().to_string()));
        }

        let mut seen = BTreeSet::new();
        for association in def.associations() {
            if !seen.insert(association.name.as_str()) {
                return Err(SchemaError::DuplicateAssociation {
                    model: def.name().to_string(),
                    association: association.name.clone(),
                });
            }
        }

        self.models.insert(def.name().to_string(), Rc::new(def));

        Ok(self)
    }

    /// Builder-style `register`.
    pub fn with(mut self, def: ModelDef) -> Result<Self, SchemaError> {
        self.register(def)?;

        Ok(self)
    }

    /// Resolve a model by name.
    pub fn constantize(&self, name: &str) -> Result<&Rc<ModelDef>, Error> {
        self.models.get(name).ok_or_else(|| Error::NameResolution {
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelDef> {
        self.models.values().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

///
/// TESTS
///
