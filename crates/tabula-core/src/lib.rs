//! Core runtime for Tabula: values, the store boundary, model declarations,
//! and the record, association, and validation engines.
//!
//! The runtime is single-threaded and blocking. Every store call completes
//! before the operation that issued it returns; transactions belong to the
//! caller and the store.
#![warn(unreachable_pub)]

#[macro_use]
mod macros;

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod store;
pub mod value;

// test
#[cfg(all(test, feature = "sqlite"))]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Primary-key column every mapped table must expose.
pub const PRIMARY_KEY: &str = "id";

// re-exports
pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary plus the attribute capability trait.
/// No executors or store adapters are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{AttributeSet as _, Db, Record},
        model::{AssociationOptions, ModelDef, Schema},
        store::Binds,
        value::Value,
    };
}
