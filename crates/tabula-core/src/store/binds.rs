use crate::value::Value;

///
/// Binds
///
/// Values bound to a statement's placeholders. Positional binds pair with `?`
/// in order; named binds pair with `:name` (the leading `:` is optional in
/// the key).
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Binds {
    #[default]
    None,
    Positional(Vec<Value>),
    Named(Vec<(String, Value)>),
}

impl Binds {
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Positional(values) => values.len(),
            Self::Named(pairs) => pairs.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Value>> for Binds {
    fn from(values: Vec<Value>) -> Self {
        Self::Positional(values)
    }
}

impl From<()> for Binds {
    fn from((): ()) -> Self {
        Self::None
    }
}

///
/// TESTS
///
