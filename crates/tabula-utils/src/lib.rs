//! Shared, store-independent helpers for Tabula.
//!
//! Everything here is pure: no I/O, no registry access, no allocation beyond
//! the returned strings.

pub mod inflector;

pub use inflector::{
    camelize, classify, demodulize, foreign_key, pluralize, singularize, tableize, underscorize,
};
