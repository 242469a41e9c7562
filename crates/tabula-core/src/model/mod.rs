//! Model declarations and the per-model descriptors built from them.
//!
//! A `Schema` is the explicit registry of `ModelDef`s. The `Catalog` turns a
//! definition into a `ModelDescriptor` once per model by introspecting the
//! store, and hands out the cached descriptor afterwards.

mod association;
mod catalog;
mod def;
mod descriptor;
mod schema;

use crate::error::ErrorClass;
use thiserror::Error as ThisError;

// re-exports
pub use association::{AssociationDef, AssociationKind, AssociationOptions};
pub use catalog::Catalog;
pub use def::{ModelDef, ValidateFn, Validation};
pub use descriptor::ModelDescriptor;
pub use schema::Schema;

///
/// SchemaError
///
/// Declaration and introspection failures. These indicate a mismatch between
/// model declarations and the store, never bad user input.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("association '{association}' declared twice on {model}")]
    DuplicateAssociation { model: String, association: String },

    #[error("model {0} already registered")]
    DuplicateModel(String),

    #[error("uniqueness check on {model} needs at least one column")]
    EmptyUniqueness { model: String },

    #[error("table '{table}' for {model} has no \"id\" column")]
    MissingPrimaryKey { model: String, table: String },
}

impl SchemaError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::DuplicateAssociation { .. }
            | Self::DuplicateModel(_)
            | Self::MissingPrimaryKey { .. } => ErrorClass::Internal,
            Self::EmptyUniqueness { .. } => ErrorClass::Invalid,
        }
    }
}
