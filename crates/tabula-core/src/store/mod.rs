//! Store boundary: the single external capability the runtime consumes.
//!
//! A store runs parameterized statements, reports the id assigned by the last
//! insert, and introspects a table's columns. Statement text built by the
//! runtime only ever interpolates quoted identifiers; every value travels as a
//! bind. Caller-supplied WHERE fragments are the one exception: they are
//! trusted as-is and must keep their values in binds too.

mod binds;
mod identifier;
mod row;
#[cfg(feature = "sqlite")]
mod sqlite;

use std::rc::Rc;
use thiserror::Error as ThisError;

// re-exports
pub use binds::Binds;
pub use identifier::{MAX_IDENTIFIER_LENGTH, quote_identifier, validate_identifier};
pub use row::Row;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

///
/// StoreError
///
/// Failures raised at the store boundary. Backend errors pass through
/// untranslated; the runtime never retries.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("unexpected result shape for {statement}")]
    UnexpectedShape { statement: &'static str },
}

impl StoreError {
    /// Wrap an arbitrary backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

///
/// Store
///
/// Parameterized-query executor. Implementations are blocking and are not
/// expected to be shared across threads.
///

pub trait Store {
    /// Run one statement. Row-returning statements yield normalized rows;
    /// INSERT/UPDATE/DELETE yield an empty list.
    fn execute(&self, sql: &str, binds: &Binds) -> Result<Vec<Row>, StoreError>;

    /// Identifier assigned by the most recent INSERT on this connection.
    fn last_inserted_id(&self) -> Result<i64, StoreError>;

    /// Ordered column names of `table`.
    fn columns_of(&self, table: &str) -> Result<Vec<String>, StoreError>;
}

impl<S: Store + ?Sized> Store for &S {
    fn execute(&self, sql: &str, binds: &Binds) -> Result<Vec<Row>, StoreError> {
        (**self).execute(sql, binds)
    }

    fn last_inserted_id(&self) -> Result<i64, StoreError> {
        (**self).last_inserted_id()
    }

    fn columns_of(&self, table: &str) -> Result<Vec<String>, StoreError> {
        (**self).columns_of(table)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn execute(&self, sql: &str, binds: &Binds) -> Result<Vec<Row>, StoreError> {
        (**self).execute(sql, binds)
    }

    fn last_inserted_id(&self) -> Result<i64, StoreError> {
        (**self).last_inserted_id()
    }

    fn columns_of(&self, table: &str) -> Result<Vec<String>, StoreError> {
        (**self).columns_of(table)
    }
}

impl<S: Store + ?Sized> Store for Rc<S> {
    fn execute(&self, sql: &str, binds: &Binds) -> Result<Vec<Row>, StoreError> {
        (**self).execute(sql, binds)
    }

    fn last_inserted_id(&self) -> Result<i64, StoreError> {
        (**self).last_inserted_id()
    }

    fn columns_of(&self, table: &str) -> Result<Vec<String>, StoreError> {
        (**self).columns_of(table)
    }
}
