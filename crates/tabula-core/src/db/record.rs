use crate::{
    Error, PRIMARY_KEY,
    model::ModelDescriptor,
    store::Row,
    value::Value,
};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::{cmp::Ordering, fmt, rc::Rc};

///
/// AttributeSet
///
/// Column-keyed attribute access. Keys are validated against the model's
/// introspected columns; unknown keys fail with `UnknownAttribute`.
///

pub trait AttributeSet {
    fn get(&self, column: &str) -> Result<&Value, Error>;

    fn set(&mut self, column: &str, value: Value) -> Result<(), Error>;

    /// Ordered `(column, value)` pairs, `"id"` first.
    fn attributes(&self) -> Vec<(String, Value)>;

    /// Bulk `set`; stops at the first failing key.
    fn assign_attributes<I, K, V>(&mut self, attributes: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
        Self: Sized,
    {
        for (column, value) in attributes {
            self.set(column.as_ref(), value.into())?;
        }

        Ok(())
    }
}

///
/// Record
///
/// One row of one model. Values are aligned with the descriptor's columns,
/// so position 0 is always `"id"`. A destroyed record is frozen: reads keep
/// working, writes fail with `FrozenMutation`.
///

#[derive(Clone)]
pub struct Record {
    model: Rc<ModelDescriptor>,
    values: Vec<Value>,
    frozen: bool,
}

impl Record {
    /// Blank record: every column `NULL`, no id.
    #[must_use]
    pub fn new(model: Rc<ModelDescriptor>) -> Self {
        let values = vec![Value::Null; model.column_names().len()];

        Self {
            model,
            values,
            frozen: false,
        }
    }

    /// Build a record from a normalized store row, matching columns by name.
    pub(crate) fn from_row(model: &Rc<ModelDescriptor>, row: Row) -> Result<Self, Error> {
        let mut record = Self::new(Rc::clone(model));
        for (column, value) in row {
            let index = model
                .column_index(&column)
                .ok_or_else(|| Error::unknown_attribute(model.name(), &column))?;
            record.values[index] = value;
        }

        Ok(record)
    }

    #[must_use]
    pub const fn descriptor(&self) -> &Rc<ModelDescriptor> {
        &self.model
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Store-assigned id; `None` until the record is saved.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.values.first().and_then(Value::as_int)
    }

    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) const fn freeze(&mut self) {
        self.frozen = true;
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.values[0] = Value::Int(id);
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Same stored row: same model, and equal ids when both are persisted,
    /// otherwise equal attributes.
    #[must_use]
    pub fn same_row(&self, other: &Self) -> bool {
        if self.model_name() != other.model_name() {
            return false;
        }

        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            _ => self.values == other.values,
        }
    }

    /// An assigned id accepts only itself; an unassigned one accepts an
    /// integer or `NULL`. Matched by variant, not numeric equality.
    fn check_id(&self, value: &Value) -> Result<(), Error> {
        match (self.id(), value) {
            (Some(id), Value::Int(v)) if *v == id => Ok(()),
            (Some(id), _) => Err(Error::ImmutableId {
                model: self.model.name().to_string(),
                id,
            }),
            (None, Value::Int(_) | Value::Null) => Ok(()),
            (None, other) => Err(Error::InvalidId {
                model: self.model.name().to_string(),
                value: other.to_string(),
            }),
        }
    }

    fn index_of(&self, column: &str) -> Result<usize, Error> {
        self.model
            .column_index(column)
            .ok_or_else(|| Error::unknown_attribute(self.model.name(), column))
    }
}

impl AttributeSet for Record {
    fn get(&self, column: &str) -> Result<&Value, Error> {
        let index = self.index_of(column)?;

        Ok(&self.values[index])
    }

    fn set(&mut self, column: &str, value: Value) -> Result<(), Error> {
        if self.frozen {
            return Err(Error::frozen(self.model.name()));
        }

        let index = self.index_of(column)?;
        if column == PRIMARY_KEY {
            self.check_id(&value)?;
        }

        self.values[index] = value;

        Ok(())
    }

    fn attributes(&self) -> Vec<(String, Value)> {
        self.model
            .column_names()
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.model_name() == other.model_name() && self.values == other.values
    }
}

impl PartialOrd for Record {
    /// Lexicographic by attributes; records of different models are
    /// incomparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.model_name() != other.model_name() {
            return None;
        }

        Some(self.values.cmp(&other.values))
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.model.name());
        for (column, value) in self.model.column_names().iter().zip(&self.values) {
            out.field(column, value);
        }
        if self.frozen {
            out.field("frozen", &true);
        }

        out.finish()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.model.column_names().iter().zip(&self.values) {
            map.serialize_entry(column, value)?;
        }

        map.end()
    }
}

///
/// TESTS
///
