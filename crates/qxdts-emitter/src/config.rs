//! Emitter configuration.
//!
//! Everything the writer needs besides the meta-database: where the output
//! goes, the preamble, the members to comment out and the type vocabulary.
//! The tables are plain data handed to the writer at construction.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "qooxdoo.d.ts";

/// Preamble copied verbatim after the header of every generated file.
pub const BASE_DECLARATION: &str = include_str!("../assets/base_declaration.d.ts");

/// Legacy type names and their TypeScript replacements.
pub const DEFAULT_TYPE_MAPPINGS: &[(&str, &str)] = &[
    ("Event", "qx.event.type.Event"),
    ("LocalizedString", "qx.locale.LocalizedString"),
    ("LayoutItem", "qx.ui.core.LayoutItem"),
    ("Widget", "qx.ui.core.Widget"),
    ("Decorator", "qx.ui.decoration.Decorator"),
    ("MWidgetController", "qx.ui.list.core.MWidgetController"),
    ("AbstractTreeItem", "qx.ui.tree.core.AbstractTreeItem"),
    ("Axis", "qx.ui.virtual.core.Axis"),
    ("ILayer", "qx.ui.virtual.core.ILayer"),
    ("Pane", "qx.ui.virtual.core.Pane"),
    ("IDesktop", "qx.ui.window.IDesktop"),
    ("IWindowManager", "qx.ui.window.IWindowManager"),
    ("DateFormat", "qx.util.format.DateFormat"),
    ("Class", "qx.Class"),
    ("Interface", "qx.Interface"),
    ("Mixin", "qx.Mixin"),
    ("Theme", "qx.Theme"),
    ("Boolean", "boolean"),
    ("Number", "number"),
    ("String", "string"),
    ("Color", "string"),
    ("Font", "string"),
    ("document", "Document"),
    ("Stylesheet", "StyleSheet"),
    ("Element", "HTMLElement"),
    ("Object", "object"),
    ("Map", "Record<string, any>"),
    ("var", "unknown"),
    ("*", "unknown"),
    ("arguments", "unknown"),
];

/// Members whose legacy signatures cannot be expressed against their
/// TypeScript supertypes. They are written commented out.
pub const DEFAULT_IGNORE: &[(&str, &[&str])] = &[
    ("qx.ui.virtual.core.CellEvent", &["init"]),
    ("qx.ui.table.columnmodel.resizebehavior.Default", &["set"]),
    ("qx.ui.progressive.renderer.table.Widths", &["set"]),
    ("qx.ui.table.columnmodel.resizebehavior", &["set"]),
    ("qx.ui.table.pane.CellEvent", &["init"]),
    ("qx.ui.mobile.dialog.Manager", &["error"]),
    ("qx.ui.mobile.container.Navigation", &["add"]),
    ("qx.ui.website.Table", &["filter", "sort"]),
    ("qx.ui.website.DatePicker", &["init", "sort"]),
    ("qx.event.type.Orientation", &["init"]),
    ("qx.event.type.KeySequence", &["init"]),
    ("qx.event.type.KeyInput", &["init"]),
    ("qx.event.type.GeoPosition", &["init"]),
    ("qx.event.type.Drag", &["init"]),
    ("qx.bom.request.SimpleXhr", &["addListener", "addListenerOnce"]),
    ("qx.event.dispatch.AbstractBubbling", &["dispatchEvent"]),
    ("qx.event.dispatch.Direct", &["dispatchEvent"]),
    ("qx.event.dispatch.MouseCapture", &["dispatchEvent"]),
    ("qx.event.type.Native", &["init"]),
    ("qx.html.Element", &["removeListener", "removeListenerById"]),
    ("qx.html.Flash", &["setAttribute"]),
    ("qx.util.LibraryManager", &["get", "set"]),
];

#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Path of the generated file; doc-comment source links are relative to
    /// its directory.
    pub output_to: PathBuf,
    /// Directory relative paths are resolved against when computing source
    /// links. `None` leaves both sides relative.
    pub working_dir: Option<PathBuf>,
    pub base_declaration: String,
    /// Qualified class name to member names written commented out.
    pub ignore: FxHashMap<String, Vec<String>>,
    pub type_mappings: FxHashMap<String, String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        let mut config = Self::empty();
        config.base_declaration = BASE_DECLARATION.to_string();
        config.type_mappings = DEFAULT_TYPE_MAPPINGS
            .iter()
            .map(|&(from, to)| (from.to_string(), to.to_string()))
            .collect();
        config.ignore = DEFAULT_IGNORE
            .iter()
            .map(|&(class, members)| {
                (
                    class.to_string(),
                    members.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect();
        config
    }
}

impl WriterConfig {
    /// No preamble, no mappings, nothing ignored.
    pub fn empty() -> Self {
        Self {
            output_to: PathBuf::from(DEFAULT_OUTPUT),
            working_dir: None,
            base_declaration: String::new(),
            ignore: FxHashMap::default(),
            type_mappings: FxHashMap::default(),
        }
    }

    pub fn with_output_to(mut self, output_to: impl Into<PathBuf>) -> Self {
        self.output_to = output_to.into();
        self
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(working_dir.into());
        self
    }

    pub fn with_base_declaration(mut self, text: impl Into<String>) -> Self {
        self.base_declaration = text.into();
        self
    }

    pub fn with_type_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.type_mappings.insert(from.into(), to.into());
        self
    }

    /// Add members to the ignore list of `class_name`, keeping existing ones.
    pub fn with_ignored_members<S: Into<String>>(
        mut self,
        class_name: impl Into<String>,
        members: impl IntoIterator<Item = S>,
    ) -> Self {
        let entry = self.ignore.entry(class_name.into()).or_default();
        for member in members {
            let member = member.into();
            if !entry.contains(&member) {
                entry.push(member);
            }
        }
        self
    }

    pub fn is_ignored(&self, class_name: &str, member: &str) -> bool {
        self.ignore
            .get(class_name)
            .is_some_and(|members| members.iter().any(|m| m == member))
    }
}
