use derive_more::Display;
use tabula_utils::inflector;

///
/// AssociationKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum AssociationKind {
    #[display("belongs_to")]
    BelongsTo,
    #[display("has_one")]
    HasOne,
    #[display("has_many")]
    HasMany,
    #[display("has_many_through")]
    HasManyThrough,
    #[display("has_one_through")]
    HasOneThrough,
}

impl AssociationKind {
    /// Kinds whose getter yields a list.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::HasMany | Self::HasManyThrough)
    }

    #[must_use]
    pub const fn is_through(self) -> bool {
        matches!(self, Self::HasManyThrough | Self::HasOneThrough)
    }
}

///
/// AssociationOptions
///
/// Overrides for the inflected defaults. Unset fields fall back to the
/// per-kind conventions applied by `AssociationDef`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AssociationOptions {
    pub class_name: Option<String>,
    pub foreign_key: Option<String>,
    pub source: Option<String>,
}

impl AssociationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

///
/// AssociationDef
///
/// One declared association with every default resolved.
///
/// `class_name` names the target model for direct kinds and the through
/// model for through kinds. `foreign_key` lives on the declaring table for
/// `belongs_to` and on the associated (or through) table otherwise.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssociationDef {
    pub name: String,
    pub kind: AssociationKind,
    pub class_name: String,
    pub foreign_key: String,
    pub through: Option<String>,
    pub source: Option<String>,
}

impl AssociationDef {
    #[must_use]
    pub fn belongs_to(name: &str, options: AssociationOptions) -> Self {
        Self {
            name: name.to_string(),
            kind: AssociationKind::BelongsTo,
            class_name: options
                .class_name
                .unwrap_or_else(|| inflector::classify(name)),
            foreign_key: options
                .foreign_key
                .unwrap_or_else(|| inflector::foreign_key(name)),
            through: None,
            source: None,
        }
    }

    #[must_use]
    pub fn has_one(owner: &str, name: &str, options: AssociationOptions) -> Self {
        Self::direct(AssociationKind::HasOne, owner, name, options)
    }

    #[must_use]
    pub fn has_many(owner: &str, name: &str, options: AssociationOptions) -> Self {
        Self::direct(AssociationKind::HasMany, owner, name, options)
    }

    #[must_use]
    pub fn has_many_through(
        owner: &str,
        name: &str,
        through: &str,
        options: AssociationOptions,
    ) -> Self {
        let source = options
            .source
            .clone()
            .unwrap_or_else(|| inflector::singularize(name));

        Self::through(AssociationKind::HasManyThrough, owner, name, through, source, options)
    }

    #[must_use]
    pub fn has_one_through(
        owner: &str,
        name: &str,
        through: &str,
        options: AssociationOptions,
    ) -> Self {
        let source = options.source.clone().unwrap_or_else(|| name.to_string());

        Self::through(AssociationKind::HasOneThrough, owner, name, through, source, options)
    }

    fn direct(
        kind: AssociationKind,
        owner: &str,
        name: &str,
        options: AssociationOptions,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            class_name: options
                .class_name
                .unwrap_or_else(|| inflector::classify(name)),
            foreign_key: options
                .foreign_key
                .unwrap_or_else(|| inflector::foreign_key(owner)),
            through: None,
            source: None,
        }
    }

    fn through(
        kind: AssociationKind,
        owner: &str,
        name: &str,
        through: &str,
        source: String,
        options: AssociationOptions,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            class_name: options
                .class_name
                .unwrap_or_else(|| inflector::classify(through)),
            foreign_key: options
                .foreign_key
                .unwrap_or_else(|| inflector::foreign_key(owner)),
            through: Some(through.to_string()),
            source: Some(source),
        }
    }
}

///
/// TESTS
///
