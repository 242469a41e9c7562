use crate::{
    Error,
    db::ValidateContext,
    model::{AssociationDef, AssociationOptions},
};
use std::fmt;

///
/// ValidateFn
///
/// Validation predicate. Returns `Ok(false)` when the record is invalid;
/// `Err` only for store failures raised while checking (e.g. uniqueness).
///

pub type ValidateFn = fn(&ValidateContext<'_>) -> Result<bool, Error>;

///
/// Validation
///

#[derive(Clone, Copy)]
pub struct Validation {
    pub name: &'static str,
    pub check: ValidateFn,
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

///
/// ModelDef
///
/// Declaration of one model: name, optional table override, associations,
/// and ordered validations. Columns are never declared; they come from the
/// store when the model is first resolved.
///
/// ```ignore
/// let pokemon = ModelDef::new("Pokemon")
///     .has_one("stats", AssociationOptions::new().class_name("Stats"))
///     .has_many("pokemon_abilities", AssociationOptions::new())
///     .has_many_through("abilities", "pokemon_abilities", AssociationOptions::new())
///     .validate("valid_name", |cx| Ok(cx.get("name")?.as_text().is_some_and(|s| !s.is_empty())));
/// ```
///

#[derive(Clone, Debug)]
pub struct ModelDef {
    name: String,
    table_name: Option<String>,
    associations: Vec<AssociationDef>,
    validations: Vec<Validation>,
}

impl ModelDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: None,
            associations: Vec::new(),
            validations: Vec::new(),
        }
    }

    /// Map the model onto an explicit table instead of `tableize(name)`.
    #[must_use]
    pub fn table_name(mut self, table: impl Into<String>) -> Self {
        self.table_name = Some(table.into());
        self
    }

    #[must_use]
    pub fn belongs_to(mut self, name: &str, options: AssociationOptions) -> Self {
        self.associations
            .push(AssociationDef::belongs_to(name, options));
        self
    }

    #[must_use]
    pub fn has_one(mut self, name: &str, options: AssociationOptions) -> Self {
        let def = AssociationDef::has_one(&self.name, name, options);
        self.associations.push(def);
        self
    }

    #[must_use]
    pub fn has_many(mut self, name: &str, options: AssociationOptions) -> Self {
        let def = AssociationDef::has_many(&self.name, name, options);
        self.associations.push(def);
        self
    }

    #[must_use]
    pub fn has_many_through(
        mut self,
        name: &str,
        through: &str,
        options: AssociationOptions,
    ) -> Self {
        let def = AssociationDef::has_many_through(&self.name, name, through, options);
        self.associations.push(def);
        self
    }

    #[must_use]
    pub fn has_one_through(
        mut self,
        name: &str,
        through: &str,
        options: AssociationOptions,
    ) -> Self {
        let def = AssociationDef::has_one_through(&self.name, name, through, options);
        self.associations.push(def);
        self
    }

    /// Append a validation; validations run in declaration order.
    #[must_use]
    pub fn validate(mut self, name: &'static str, check: ValidateFn) -> Self {
        self.validations.push(Validation { name, check });
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn table_override(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    #[must_use]
    pub fn association(&self, name: &str) -> Option<&AssociationDef> {
        self.associations.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn associations(&self) -> &[AssociationDef] {
        &self.associations
    }

    #[must_use]
    pub fn validations(&self) -> &[Validation] {
        &self.validations
    }
}

///
/// TESTS
///
