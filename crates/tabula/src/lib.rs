//! ## Crate layout
//! - `core`: values, the store boundary, model declarations, and the record,
//!   association, and validation engines.
//! - `utils`: the inflector.
//!
//! ```ignore
//! use tabula::prelude::*;
//!
//! let schema = Schema::new().with(ModelDef::new("Pokemon"))?;
//! let db = Db::new(SqliteStore::open("pokedex.sqlite3")?, schema);
//!
//! let pokemons = db.model("Pokemon")?;
//! let pikachu = pokemons.create(attributes! { "index" => 25, "name" => "Pikachu" })?;
//! assert_eq!(pokemons.find(pikachu.id().unwrap())?, Some(pikachu));
//! ```

pub use tabula_core as core;
pub use tabula_utils as utils;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use tabula_core::{Error, attributes, binds};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        Error,
        config::Config,
        db::{AttributeSet as _, Db, Model, Record, ValidateContext},
        model::{AssociationOptions, ModelDef, Schema},
        store::{Binds, Store},
        value::Value,
    };
    #[cfg(feature = "sqlite")]
    pub use crate::core::store::SqliteStore;
    pub use crate::{attributes, binds};
}
