use std::path::Path;

use crate::hierarchy::{self, HierarchyView};
use crate::model::ClassMeta;

/// Read access to a meta-database.
///
/// The declaration generator consumes only this trait, so any store of
/// [`ClassMeta`] records can drive it.
pub trait MetaIndex {
    /// Every class name in the index, in no particular order.
    fn class_names(&self) -> Vec<String>;

    fn meta_data(&self, name: &str) -> Option<&ClassMeta>;

    /// The flattened ancestor and mixin tables of `meta`.
    fn hierarchy_flat(&self, meta: &ClassMeta) -> HierarchyView<'_> {
        hierarchy::flatten(self, meta)
    }

    /// Directory the records (and their `classFilename`s) are relative to.
    fn root_dir(&self) -> &Path;
}
