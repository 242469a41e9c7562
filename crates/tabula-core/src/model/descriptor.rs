use crate::{
    PRIMARY_KEY,
    model::{AssociationDef, ModelDef, SchemaError, Validation},
};
use std::rc::Rc;

///
/// ModelDescriptor
///
/// Resolved per-model metadata: the definition plus the table name and the
/// introspected column list (`"id"` first). Built once per model and shared
/// by every record of that model.
///

#[derive(Debug)]
pub struct ModelDescriptor {
    def: Rc<ModelDef>,
    table_name: String,
    columns: Vec<String>,
}

impl ModelDescriptor {
    /// Build a descriptor from introspected columns, moving `"id"` first.
    pub fn new(
        def: Rc<ModelDef>,
        table_name: impl Into<String>,
        columns: Vec<String>,
    ) -> Result<Self, SchemaError> {
        let table_name = table_name.into();
        let Some(pk) = columns.iter().position(|c| c == PRIMARY_KEY) else {
            return Err(SchemaError::MissingPrimaryKey {
                model: def.name().to_string(),
                table: table_name,
            });
        };

        let mut columns = columns;
        let id = columns.remove(pk);
        columns.insert(0, id);

        Ok(Self {
            def,
            table_name,
            columns,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.def.name()
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Columns written by INSERT and UPDATE.
    pub fn columns_except_id(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().skip(1).map(String::as_str)
    }

    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    #[must_use]
    pub fn association(&self, name: &str) -> Option<&AssociationDef> {
        self.def.association(name)
    }

    #[must_use]
    pub fn validations(&self) -> &[Validation] {
        self.def.validations()
    }

    #[must_use]
    pub fn def(&self) -> &ModelDef {
        &self.def
    }
}

///
/// TESTS
///
