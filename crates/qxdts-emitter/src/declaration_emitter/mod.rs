//! Declaration File (.d.ts) Emitter
//!
//! Generates one ambient declaration file for every class in a meta-database.
//!
//! ```text
//! // meta: app.Main { extend: qx.core.Object, properties: { visible: Boolean } }
//! ```
//!
//! Generates:
//!
//! ```typescript
//! declare module app {
//!   // app.Main
//!   class Main extends globalThis.qx.core.Object {
//!     getVisible(): boolean;
//!     isVisible(): boolean;
//!     setVisible(value: boolean): void;
//!     resetVisible(): void;
//!
//!   }
//! }
//! ```
//!
//! Classes are written in lexicographic order of their qualified names, so
//! every run of classes sharing a package lands in one `declare module` block.
//! Mixin bodies are inlined into each class that includes them, and members an
//! ancestor already declares are left to the ancestor.

mod members;

use std::io::Write;

use qxdts_meta::{ClassKind, ClassMeta, HierarchyView, MemberKind, MetaIndex};
use tracing::{debug, debug_span, trace, warn};

use crate::config::WriterConfig;
use crate::error::{EmitError, Result};
use crate::type_mapper::{TypeMapper, UNKNOWN_TYPE};

/// Indentation of class members.
const INDENT: &str = "    ";

/// Superclasses that are not written as `extends` clauses.
const BUILTIN_ROOTS: &[&str] = &["Object", "Array", "Error"];

/// Counters reported after a pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmitStats {
    pub classes: usize,
    pub skipped: usize,
    pub modules: usize,
}

/// State of the class being written. Lives for one class only.
struct ClassContext<'a> {
    meta: &'a ClassMeta,
    name: &'a str,
    hierarchy: HierarchyView<'a>,
    /// Inclusion chain currently being inlined, starting at the class itself.
    inlining: Vec<&'a str>,
}

/// Writes the declarations of every class in `meta_db` to `out`.
///
/// The index and configuration are borrowed for the whole pass. Per-class
/// state lives in a `ClassContext` and is dropped after each class.
pub struct DeclarationWriter<'a, I: MetaIndex + ?Sized, W: Write> {
    meta_db: &'a I,
    config: &'a WriterConfig,
    types: TypeMapper<'a, I>,
    out: W,
}

impl<'a, I, W> DeclarationWriter<'a, I, W>
where
    I: MetaIndex + ?Sized,
    W: Write,
{
    pub fn new(meta_db: &'a I, config: &'a WriterConfig, out: W) -> Self {
        Self {
            meta_db,
            config,
            types: TypeMapper::new(meta_db, &config.type_mappings),
            out,
        }
    }

    /// Give back the output sink, e.g. the `Vec<u8>` a test wrote into.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the whole declaration file, stamped with the current local time.
    pub fn process(&mut self) -> Result<EmitStats> {
        let timestamp = chrono::Local::now()
            .format("%a %b %d %Y %H:%M:%S GMT%z")
            .to_string();
        self.process_at(&timestamp)
    }

    /// Write the whole declaration file with a fixed header timestamp.
    pub fn process_at(&mut self, timestamp: &str) -> Result<EmitStats> {
        self.open(timestamp)?;

        let meta_db = self.meta_db;
        let mut stats = EmitStats::default();
        let mut class_names = meta_db.class_names();
        class_names.sort();

        let mut last_package: Option<&str> = None;
        let mut declared = false;
        for class_name in &class_names {
            let Some(meta) = meta_db.meta_data(class_name) else {
                warn!(class = %class_name, "listed class has no metadata");
                stats.skipped += 1;
                continue;
            };

            let package = package_name(class_name);
            if last_package != Some(package) {
                if declared {
                    self.write("}\n\n")?;
                }
                declared = !package.is_empty();
                if declared {
                    self.write(&format!("declare module {package} {{\n"))?;
                    stats.modules += 1;
                }
                last_package = Some(package);
            } else {
                self.write("\n")?;
            }

            if self.write_class(meta, declared)? {
                stats.classes += 1;
            } else {
                stats.skipped += 1;
            }
        }

        self.close(declared)?;
        debug!(
            classes = stats.classes,
            skipped = stats.skipped,
            modules = stats.modules,
            "declaration pass complete"
        );
        Ok(stats)
    }

    fn open(&mut self, timestamp: &str) -> Result<()> {
        self.write(&format!("// Generated declaration file at {timestamp}\n"))?;
        let config = self.config;
        self.write(&config.base_declaration)?;
        self.write("\n")
    }

    fn close(&mut self, declared: bool) -> Result<()> {
        if declared {
            self.write("}\n")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write one class or interface declaration. Returns `false` when the
    /// record has no class name and was skipped.
    fn write_class(&mut self, meta: &'a ClassMeta, declared: bool) -> Result<bool> {
        let Some(name) = meta.name() else {
            debug!("skipping class record without a name");
            return Ok(false);
        };
        let _span = debug_span!("class", class = name).entered();

        let meta_db = self.meta_db;
        let mut ctx = ClassContext {
            meta,
            name,
            hierarchy: meta_db.hierarchy_flat(meta),
            inlining: vec![name],
        };

        let extends = self.extends_clause(meta);
        let keyword = if meta.is_interface() {
            "interface "
        } else if meta.is_abstract {
            "abstract class "
        } else {
            "class "
        };
        let declare = if declared { "" } else { "declare " };
        let short_name = name.rsplit('.').next().unwrap_or(name);

        self.write(&format!("  // {name}\n"))?;
        let mut header = format!("  {declare}{keyword}{short_name}{extends}");
        if !meta.interfaces.is_empty() {
            let interfaces: Vec<String> = meta
                .interfaces
                .iter()
                .map(|itf| self.types.get_type(itf))
                .collect();
            header.push_str(" implements ");
            header.push_str(&interfaces.join(", "));
        }
        header.push_str(" {\n");
        self.write(&header)?;

        if meta.kind == ClassKind::Class {
            if let Some(construct) = &meta.construct {
                self.write_constructor(construct)?;
            }
        }

        self.write_class_body(&mut ctx, meta)?;
        self.write("\n  }\n")?;
        Ok(true)
    }

    fn extends_clause(&self, meta: &ClassMeta) -> String {
        let supers = meta
            .super_class
            .iter()
            .map(String::as_str)
            .filter(|name| !BUILTIN_ROOTS.contains(name));

        let mapped: Vec<String> = if meta.is_interface() {
            supers
                .map(|name| self.types.get_type(name))
                .filter(|ty| ty != UNKNOWN_TYPE)
                .collect()
        } else {
            supers
                .take(1)
                .map(|name| self.types.get_type(name))
                .filter(|ty| ty != UNKNOWN_TYPE)
                .collect()
        };

        if mapped.is_empty() {
            String::new()
        } else {
            format!(" extends {}", mapped.join(", "))
        }
    }

    /// Inline the bodies of every mixin `meta` includes, recursively.
    fn include_mixins(&mut self, ctx: &mut ClassContext<'a>, meta: &'a ClassMeta) -> Result<()> {
        for mixin in &meta.mixins {
            self.write(&format!("{INDENT}// Mixin: {mixin}\n"))?;

            if ctx.inlining.contains(&mixin.as_str()) {
                let mut chain = ctx.inlining.clone();
                chain.push(mixin);
                return Err(EmitError::MixinCycle {
                    class: ctx.name.to_string(),
                    chain: chain.join(" -> "),
                });
            }
            let Some(mixin_meta) = ctx.hierarchy.mixin(mixin) else {
                return Err(EmitError::MissingMixin {
                    class: ctx.name.to_string(),
                    mixin: mixin.clone(),
                });
            };

            trace!(class = ctx.name, mixin = %mixin, "inlining mixin");
            ctx.inlining.push(mixin);
            let result = self.write_class_body(ctx, mixin_meta);
            ctx.inlining.pop();
            result?;
        }
        Ok(())
    }

    /// Whether `name` should be left to an ancestor or another mixin.
    ///
    /// Members of a mixin the current class includes directly are never
    /// overrides, even when an ancestor declares the same name. Members found
    /// on an ancestor, or on any other mixin in the hierarchy, are.
    fn check_override(&self, ctx: &ClassContext<'a>, name: &str, kind: MemberKind) -> bool {
        let on_local_mixin = ctx.meta.mixins.iter().any(|mixin| {
            ctx.hierarchy
                .mixin(mixin)
                .is_some_and(|meta| meta.declares(kind, name))
        });
        if on_local_mixin {
            return false;
        }
        ctx.hierarchy.ancestor_declares(kind, name) || ctx.hierarchy.mixin_declares(kind, name)
    }
}

/// All but the last dotted segment; empty for root-level classes.
fn package_name(class_name: &str) -> &str {
    class_name
        .rfind('.')
        .map(|pos| &class_name[..pos])
        .unwrap_or("")
}

/// Write declarations for `meta_db` into a string.
pub fn emit_declarations<I: MetaIndex + ?Sized>(
    meta_db: &I,
    config: &WriterConfig,
    timestamp: &str,
) -> Result<(String, EmitStats)> {
    let mut writer = DeclarationWriter::new(meta_db, config, Vec::new());
    let stats = writer.process_at(timestamp)?;
    let bytes = writer.into_inner();
    Ok((String::from_utf8_lossy(&bytes).into_owned(), stats))
}
