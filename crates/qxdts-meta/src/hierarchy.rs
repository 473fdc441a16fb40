//! Flattened class hierarchies.
//!
//! A [`HierarchyView`] answers "which ancestors and which mixins can see a
//! member of this name" without walking the class graph on every query. It is
//! built once per emitted class and dropped afterwards.

use std::collections::VecDeque;

use indexmap::IndexMap;
use tracing::trace;

use crate::index::MetaIndex;
use crate::model::{ClassMeta, MemberKind};

#[derive(Debug, Default)]
pub struct HierarchyView<'a> {
    /// Every transitive superclass (every super-interface for interfaces),
    /// excluding the class itself, nearest first.
    pub super_classes: IndexMap<String, &'a ClassMeta>,
    /// Every mixin included by the class, by any ancestor, or by another
    /// mixin in this view.
    pub mixins: IndexMap<String, &'a ClassMeta>,
}

impl<'a> HierarchyView<'a> {
    pub fn mixin(&self, name: &str) -> Option<&'a ClassMeta> {
        self.mixins.get(name).copied()
    }

    /// Whether any ancestor declares `name` in `kind`.
    pub fn ancestor_declares(&self, kind: MemberKind, name: &str) -> bool {
        self.super_classes
            .values()
            .any(|meta| meta.declares(kind, name))
    }

    /// Whether any mixin in the view declares `name` in `kind`.
    pub fn mixin_declares(&self, kind: MemberKind, name: &str) -> bool {
        self.mixins.values().any(|meta| meta.declares(kind, name))
    }
}

/// Build the flattened view of `meta`.
///
/// Names without metadata (builtin roots such as `Object`, classes outside the
/// index) are left out. Cyclic superclass or mixin graphs terminate because
/// every name is entered at most once.
pub fn flatten<'a, I>(index: &'a I, meta: &ClassMeta) -> HierarchyView<'a>
where
    I: MetaIndex + ?Sized,
{
    let mut view = HierarchyView::default();
    let own_name = meta.name().unwrap_or_default();

    let mut pending: VecDeque<String> = meta.super_class.iter().cloned().collect();
    while let Some(name) = pending.pop_front() {
        if name == own_name || view.super_classes.contains_key(&name) {
            continue;
        }
        let Some(super_meta) = index.meta_data(&name) else {
            trace!(class = own_name, superclass = %name, "superclass not in index");
            continue;
        };
        pending.extend(super_meta.super_class.iter().cloned());
        view.super_classes.insert(name, super_meta);
    }

    let mut pending: VecDeque<String> = meta
        .mixins
        .iter()
        .chain(view.super_classes.values().flat_map(|sup| sup.mixins.iter()))
        .cloned()
        .collect();
    while let Some(name) = pending.pop_front() {
        if view.mixins.contains_key(&name) {
            continue;
        }
        let Some(mixin_meta) = index.meta_data(&name) else {
            trace!(class = own_name, mixin = %name, "mixin not in index");
            continue;
        };
        pending.extend(mixin_meta.mixins.iter().cloned());
        view.mixins.insert(name, mixin_meta);
    }

    view
}
