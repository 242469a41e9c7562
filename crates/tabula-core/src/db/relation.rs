//! Association engine.
//!
//! Getters read through the store on every call; nothing is cached on the
//! owner. `one` serves `belongs_to`, `has_one`, and `has_one_through`;
//! `many` serves `has_many` and `has_many_through`.

use crate::{
    Error, PRIMARY_KEY,
    db::{AttributeSet, Db, Record},
    error::ErrorClass,
    model::{AssociationDef, AssociationKind, ModelDescriptor},
    store::{Store, quote_identifier},
    value::Value,
};
use std::rc::Rc;
use thiserror::Error as ThisError;

///
/// AssociationError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum AssociationError {
    #[error("association '{association}' on {model} is {kind}; use {expected}")]
    KindMismatch {
        model: String,
        association: String,
        kind: AssociationKind,
        expected: &'static str,
    },

    #[error("{model} must be saved before assigning '{association}'")]
    NotPersisted { model: String, association: String },

    #[error("source '{source_name}' on {model} must be a belongs_to association")]
    SourceNotBelongsTo { model: String, source_name: String },

    #[error("association '{association}' expects {expected} records, got {found}")]
    WrongTarget {
        association: String,
        expected: String,
        found: String,
    },
}

impl AssociationError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::KindMismatch { .. } => ErrorClass::Unsupported,
            Self::NotPersisted { .. } => ErrorClass::Conflict,
            Self::SourceNotBelongsTo { .. } => ErrorClass::Internal,
            Self::WrongTarget { .. } => ErrorClass::Invalid,
        }
    }
}

impl<S: Store> Db<S> {
    // ---------------------------------------------------------------------
    // Getters
    // ---------------------------------------------------------------------

    /// Single-valued association: `belongs_to`, `has_one`, `has_one_through`.
    pub fn one(&self, owner: &Record, name: &str) -> Result<Option<Record>, Error> {
        let def = association(owner, name)?;

        match def.kind {
            AssociationKind::BelongsTo => {
                let target = self.descriptor(&def.class_name)?;
                let fk = owner.get(&def.foreign_key)?;

                self.executor().find_by_value(&target, PRIMARY_KEY, fk)
            }
            AssociationKind::HasOne => {
                let Some(id) = owner.id() else {
                    return Ok(None);
                };
                let target = self.descriptor(&def.class_name)?;

                self.executor()
                    .find_by_value(&target, &def.foreign_key, &Value::Int(id))
            }
            AssociationKind::HasOneThrough => {
                let Some(through) = self.one(owner, through_name(def))? else {
                    return Ok(None);
                };

                self.one(&through, self.source_of(owner, def)?.name.as_str())
            }
            AssociationKind::HasMany | AssociationKind::HasManyThrough => {
                Err(kind_mismatch(owner, def, "many"))
            }
        }
    }

    /// Collection association: `has_many`, `has_many_through`.
    ///
    /// Through rows whose source row no longer exists are skipped.
    pub fn many(&self, owner: &Record, name: &str) -> Result<Vec<Record>, Error> {
        let def = association(owner, name)?;

        match def.kind {
            AssociationKind::HasMany => {
                let Some(id) = owner.id() else {
                    return Ok(Vec::new());
                };
                let target = self.descriptor(&def.class_name)?;

                self.where_value(&target, &def.foreign_key, id)
            }
            AssociationKind::HasManyThrough => {
                let source = self.source_of(owner, def)?;

                self.many(owner, through_name(def))?
                    .iter()
                    .filter_map(|through| self.one(through, &source.name).transpose())
                    .collect()
            }
            AssociationKind::BelongsTo
            | AssociationKind::HasOne
            | AssociationKind::HasOneThrough => Err(kind_mismatch(owner, def, "one")),
        }
    }

    // ---------------------------------------------------------------------
    // Setters
    // ---------------------------------------------------------------------

    /// Assign a single-valued association and return the associated record
    /// as stored.
    ///
    /// - `belongs_to`: writes the target's id (or `NULL`) into the owner's
    ///   foreign key and saves the owner.
    /// - `has_one`: no-op when unchanged; otherwise destroys the current
    ///   target and re-points the new one at the owner.
    /// - `has_one_through`: no-op when unchanged; otherwise destroys the
    ///   current through row and creates one for the new target.
    pub fn set_one(
        &self,
        owner: &mut Record,
        name: &str,
        target: Option<Record>,
    ) -> Result<Option<Record>, Error> {
        let def = association(owner, name)?.clone();

        match def.kind {
            AssociationKind::BelongsTo => {
                let fk = match &target {
                    Some(target) => {
                        check_target(&def, &def.class_name, target)?;
                        Value::Int(persisted_id(target, &def)?)
                    }
                    None => Value::Null,
                };
                self.update(owner, [(def.foreign_key.as_str(), fk)])?;

                Ok(target)
            }
            AssociationKind::HasOne => {
                let owner_id = persisted_id(owner, &def)?;
                if let Some(target) = &target {
                    check_target(&def, &def.class_name, target)?;
                }

                let current = self.one(owner, &def.name)?;
                if current == target {
                    return Ok(target);
                }
                // a re-assigned copy of the current row is updated, not replaced
                if let Some(mut current) = current
                    && !target.as_ref().is_some_and(|t| t.same_row(&current))
                {
                    self.destroy(&mut current)?;
                }

                target
                    .map(|mut target| {
                        self.update(&mut target, [(def.foreign_key.as_str(), owner_id)])?;
                        Ok::<_, Error>(target)
                    })
                    .transpose()
            }
            AssociationKind::HasOneThrough => {
                let owner_id = persisted_id(owner, &def)?;
                let through = association(owner, through_name(&def))?.clone();
                let source = self.source_of(owner, &def)?;
                let target_id = target
                    .as_ref()
                    .map(|target| {
                        check_target(&def, &source.class_name, target)?;
                        persisted_id(target, &def)
                    })
                    .transpose()?;

                let current = self.one(owner, &def.name)?;
                if current == target {
                    return Ok(target);
                }
                if let Some(mut join) = self.one(owner, through_name(&def))? {
                    self.destroy(&mut join)?;
                }

                if let Some(target_id) = target_id {
                    self.create_through(&through, &source, owner_id, target_id)?;
                }

                Ok(target)
            }
            AssociationKind::HasMany | AssociationKind::HasManyThrough => {
                Err(kind_mismatch(owner, &def, "set_many"))
            }
        }
    }

    /// Reconcile a collection association with `targets` and return the new
    /// collection.
    ///
    /// - `has_many`: destroys current rows missing from `targets`, re-points
    ///   new ones at the owner, and leaves the rest untouched.
    /// - `has_many_through`: keeps through rows whose source is in
    ///   `targets`, destroys the others, and creates through rows for the
    ///   unmatched targets.
    ///
    /// Records match by id when both are persisted, otherwise by attributes.
    pub fn set_many(
        &self,
        owner: &Record,
        name: &str,
        targets: Vec<Record>,
    ) -> Result<Vec<Record>, Error> {
        let def = association(owner, name)?.clone();

        match def.kind {
            AssociationKind::HasMany => {
                let owner_id = persisted_id(owner, &def)?;
                for target in &targets {
                    check_target(&def, &def.class_name, target)?;
                }

                let current = self.many(owner, &def.name)?;
                for mut removed in current
                    .iter()
                    .filter(|c| !targets.iter().any(|t| t.same_row(c)))
                    .cloned()
                {
                    self.destroy(&mut removed)?;
                }

                targets
                    .into_iter()
                    .map(|mut target| {
                        if !current.iter().any(|c| c.same_row(&target)) {
                            self.update(&mut target, [(def.foreign_key.as_str(), owner_id)])?;
                        }
                        Ok::<_, Error>(target)
                    })
                    .collect()
            }
            AssociationKind::HasManyThrough => {
                let owner_id = persisted_id(owner, &def)?;
                let through = association(owner, through_name(&def))?.clone();
                let source = self.source_of(owner, &def)?;
                for target in &targets {
                    check_target(&def, &source.class_name, target)?;
                    persisted_id(target, &def)?;
                }

                let mut unmatched: Vec<&Record> = targets.iter().collect();
                for mut join in self.many(owner, through_name(&def))? {
                    let matched = self
                        .one(&join, &source.name)?
                        .and_then(|current| unmatched.iter().position(|t| t.same_row(&current)));

                    match matched {
                        Some(pos) => {
                            unmatched.remove(pos);
                        }
                        None => self.destroy(&mut join)?,
                    }
                }

                for target in unmatched {
                    let target_id = persisted_id(target, &def)?;
                    self.create_through(&through, &source, owner_id, target_id)?;
                }

                Ok(targets)
            }
            AssociationKind::BelongsTo
            | AssociationKind::HasOne
            | AssociationKind::HasOneThrough => Err(kind_mismatch(owner, &def, "set_one")),
        }
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    fn where_value(
        &self,
        target: &Rc<ModelDescriptor>,
        column: &str,
        id: i64,
    ) -> Result<Vec<Record>, Error> {
        let fragment = format!("{} = ?", quote_identifier(column)?);

        self.executor()
            .select(target, Some(&fragment), &binds![id], None)
    }

    /// The `belongs_to` on the through model that a through association
    /// reads its targets from. The through model is the target of the
    /// owner's declared through association.
    fn source_of(&self, owner: &Record, def: &AssociationDef) -> Result<AssociationDef, Error> {
        let through_def = association(owner, through_name(def))?;
        let through = self.descriptor(&through_def.class_name)?;
        let source_name = def.source.as_deref().unwrap_or(&def.name);
        let source = through
            .association(source_name)
            .ok_or_else(|| Error::UnknownAssociation {
                model: through.name().to_string(),
                association: source_name.to_string(),
            })?;

        if source.kind != AssociationKind::BelongsTo {
            return Err(AssociationError::SourceNotBelongsTo {
                model: through.name().to_string(),
                source_name: source_name.to_string(),
            }
            .into());
        }

        Ok(source.clone())
    }

    /// Create one row of the through model linking the owner to a target.
    fn create_through(
        &self,
        through: &AssociationDef,
        source: &AssociationDef,
        owner_id: i64,
        target_id: i64,
    ) -> Result<Record, Error> {
        self.model(&through.class_name)?.create([
            (through.foreign_key.as_str(), Value::Int(owner_id)),
            (source.foreign_key.as_str(), Value::Int(target_id)),
        ])
    }
}

fn association<'r>(owner: &'r Record, name: &str) -> Result<&'r AssociationDef, Error> {
    owner
        .descriptor()
        .association(name)
        .ok_or_else(|| Error::UnknownAssociation {
            model: owner.model_name().to_string(),
            association: name.to_string(),
        })
}

fn through_name(def: &AssociationDef) -> &str {
    def.through.as_deref().unwrap_or_default()
}

fn kind_mismatch(owner: &Record, def: &AssociationDef, expected: &'static str) -> Error {
    AssociationError::KindMismatch {
        model: owner.model_name().to_string(),
        association: def.name.clone(),
        kind: def.kind,
        expected,
    }
    .into()
}

fn persisted_id(record: &Record, def: &AssociationDef) -> Result<i64, Error> {
    record.id().ok_or_else(|| {
        AssociationError::NotPersisted {
            model: record.model_name().to_string(),
            association: def.name.clone(),
        }
        .into()
    })
}

fn check_target(def: &AssociationDef, expected: &str, target: &Record) -> Result<(), Error> {
    if target.model_name() == expected {
        Ok(())
    } else {
        Err(AssociationError::WrongTarget {
            association: def.name.clone(),
            expected: expected.to_string(),
            found: target.model_name().to_string(),
        }
        .into())
    }
}
