use crate::{
    config::ConfigError,
    db::AssociationError,
    model::SchemaError,
    store::StoreError,
};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// Error
///
/// Every failure surfaced by the runtime. "Not found" is never an error:
/// lookups return `Option` and `where_` returns an empty list.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Association(#[from] AssociationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("can't modify frozen {model}: the record has been destroyed")]
    FrozenMutation { model: String },

    #[error("{model} id is already assigned ({id}) and cannot change")]
    ImmutableId { model: String, id: i64 },

    #[error("{model} id must be an integer, got {value}")]
    InvalidId { model: String, value: String },

    #[error("{model} record is invalid: validation '{validation}' failed")]
    InvalidRecord { model: String, validation: String },

    #[error("uninitialized model {name}")]
    NameResolution { name: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown association '{association}' for {model}")]
    UnknownAssociation { model: String, association: String },

    #[error("unknown attribute '{attribute}' for {model}")]
    UnknownAttribute { model: String, attribute: String },
}

impl Error {
    pub(crate) fn frozen(model: &str) -> Self {
        Self::FrozenMutation {
            model: model.to_string(),
        }
    }

    pub(crate) fn unknown_attribute(model: &str, attribute: &str) -> Self {
        Self::UnknownAttribute {
            model: model.to_string(),
            attribute: attribute.to_string(),
        }
    }

    /// Stable classification for callers that map errors onto user-facing
    /// responses.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Association(err) => err.class(),
            Self::Config(_) => ErrorClass::Internal,
            Self::FrozenMutation { .. } | Self::ImmutableId { .. } => ErrorClass::Conflict,
            Self::InvalidId { .. }
            | Self::InvalidRecord { .. }
            | Self::UnknownAttribute { .. } => ErrorClass::Invalid,
            Self::NameResolution { .. } | Self::UnknownAssociation { .. } => ErrorClass::NotFound,
            Self::Schema(err) => err.class(),
            Self::Store(_) => ErrorClass::Store,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
///
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorClass {
    #[display("conflict")]
    Conflict,
    #[display("internal")]
    Internal,
    #[display("invalid")]
    Invalid,
    #[display("not_found")]
    NotFound,
    #[display("store")]
    Store,
    #[display("unsupported")]
    Unsupported,
}

///
/// TESTS
///
