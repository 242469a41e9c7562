use crate::{
    config::StoreConfig,
    store::{Binds, Row, Store, StoreError, quote_identifier},
    value::Value,
};
use rusqlite::{
    Connection, params_from_iter,
    types::{ToSql, ToSqlOutput, ValueRef},
};
use std::{path::Path, time::Duration};

///
/// SqliteStore
///
/// `Store` over a single rusqlite connection. Statements are prepared per
/// call; nothing is pooled or cached.
///

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    #[must_use]
    pub const fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    /// Open the store described by `config` (in-memory when no path is set)
    /// and apply its connection pragmas.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let store = match &config.path {
            Some(path) => Self::open(path)?,
            None => Self::open_in_memory()?,
        };

        store
            .conn
            .pragma_update(None, "foreign_keys", config.foreign_keys)?;
        if let Some(ms) = config.busy_timeout_ms {
            store.conn.busy_timeout(Duration::from_millis(ms))?;
        }

        Ok(store)
    }

    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run a batch of semicolon-separated statements without binds
    /// (schema setup, fixtures).
    pub fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        self.conn.execute_batch(sql)?;

        Ok(())
    }

    /// Run `f` inside a transaction; commits on `Ok`, rolls back on `Err`.
    pub fn transaction<T, E>(&self, f: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(StoreError::from)?;
        let out = f(self)?;
        tx.commit().map_err(StoreError::from)?;

        Ok(out)
    }
}

impl Store for SqliteStore {
    fn execute(&self, sql: &str, binds: &Binds) -> Result<Vec<Row>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = match binds {
            Binds::None => stmt.query([])?,
            Binds::Positional(values) => stmt.query(params_from_iter(values.iter()))?,
            Binds::Named(pairs) => {
                let names: Vec<String> = pairs.iter().map(|(k, _)| placeholder(k)).collect();
                let params: Vec<(&str, &dyn ToSql)> = names
                    .iter()
                    .map(String::as_str)
                    .zip(pairs.iter().map(|(_, v)| v as &dyn ToSql))
                    .collect();

                stmt.query(params.as_slice())?
            }
        };

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut normalized = Row::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                normalized.push(column.as_str(), value_from_ref(row.get_ref(idx)?));
            }
            out.push(normalized);
        }

        Ok(out)
    }

    fn last_inserted_id(&self) -> Result<i64, StoreError> {
        Ok(self.conn.last_insert_rowid())
    }

    fn columns_of(&self, table: &str) -> Result<Vec<String>, StoreError> {
        let sql = format!("SELECT * FROM {}", quote_identifier(table)?);
        let stmt = self.conn.prepare(&sql)?;

        Ok(stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Self::Null => ValueRef::Null,
            Self::Int(v) => ValueRef::Integer(*v),
            Self::Float(v) => ValueRef::Real(*v),
            Self::Text(v) => ValueRef::Text(v.as_bytes()),
            Self::Blob(v) => ValueRef::Blob(v),
        };

        Ok(ToSqlOutput::Borrowed(value))
    }
}

// Named placeholders are keyed with their sigil in rusqlite.
fn placeholder(name: &str) -> String {
    if name.starts_with([':', '@', '$']) {
        name.to_string()
    } else {
        format!(":{name}")
    }
}

fn value_from_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int(v),
        ValueRef::Real(v) => Value::Float(v),
        ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
        ValueRef::Blob(v) => Value::Blob(v.to_vec()),
    }
}

///
/// TESTS
///
