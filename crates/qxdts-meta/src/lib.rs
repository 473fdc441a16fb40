//! Meta-database for the qxdts declaration generator.
//!
//! This crate provides the read-only model the generator works from:
//! - Class, mixin and interface records (`ClassMeta` and friends)
//! - The `MetaIndex` trait the generator queries
//! - Hierarchy flattening for override detection (`HierarchyView`)
//! - Loading the on-disk database written by the metadata extractor

pub mod model;
pub use model::{
    Access, ClassKind, ClassMeta, Jsdoc, JsdocEntry, MemberKind, MemberMap, MethodMeta,
    ParamMeta, PropertyMap, PropertyMeta, ReturnMeta, TypeRef,
};

pub mod index;
pub use index::MetaIndex;

pub mod hierarchy;
pub use hierarchy::HierarchyView;

pub mod database;
pub use database::MetaDatabase;

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod model_tests;
#[cfg(test)]
#[path = "tests/hierarchy_tests.rs"]
mod hierarchy_tests;
