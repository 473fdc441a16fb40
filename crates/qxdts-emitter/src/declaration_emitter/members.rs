use std::io::Write;
use std::path::{Path, PathBuf};

use qxdts_meta::{Access, ClassMeta, MemberKind, MemberMap, MethodMeta, MetaIndex, ParamMeta};
use tracing::trace;

use super::{ClassContext, DeclarationWriter, INDENT};
use crate::error::Result;
use crate::jsdoc::{display_path, fixup_description, relative_path};

/// Everything needed to write one method signature.
struct MethodDecl<'m> {
    access: Option<Access>,
    is_static: bool,
    is_abstract: bool,
    is_mixin: bool,
    params: &'m [ParamMeta],
    /// Translated return type; `void` when `None`.
    returns: Option<String>,
    /// `Some` writes a doc block, with the description when there is one.
    doc: Option<Option<&'m str>>,
    /// Written commented out.
    hidden: bool,
}

impl MethodDecl<'_> {
    fn accessor(returns: Option<String>) -> Self {
        MethodDecl {
            access: None,
            is_static: false,
            is_abstract: false,
            is_mixin: false,
            params: &[],
            returns,
            doc: None,
            hidden: false,
        }
    }
}

impl<'a, I, W> DeclarationWriter<'a, I, W>
where
    I: MetaIndex + ?Sized,
    W: Write,
{
    /// Statics, members, property accessors and inlined mixins of `meta`.
    /// The constructor is written by the caller.
    pub(super) fn write_class_body(
        &mut self,
        ctx: &mut ClassContext<'a>,
        meta: &'a ClassMeta,
    ) -> Result<()> {
        if meta.is_singleton {
            self.write_singleton_accessor(ctx, meta)?;
        }
        self.write_methods(ctx, &meta.statics, meta, true)?;
        self.write_methods(ctx, &meta.members, meta, false)?;
        self.write_properties(ctx, meta)?;
        self.include_mixins(ctx, meta)
    }

    pub(super) fn write_constructor(&mut self, construct: &MethodMeta) -> Result<()> {
        let params = self.serialize_parameters(&construct.params);
        self.write(&format!("{INDENT}constructor ({params});\n"))
    }

    fn write_singleton_accessor(&mut self, ctx: &ClassContext<'a>, meta: &ClassMeta) -> Result<()> {
        let self_type = self.types.get_type(meta.name().unwrap_or(ctx.name));
        self.write_method(
            ctx,
            "getInstance",
            MethodDecl {
                access: Some(Access::Public),
                is_static: true,
                is_abstract: false,
                is_mixin: false,
                params: &[],
                returns: Some(self_type),
                doc: Some(None),
                hidden: self.config.is_ignored(ctx.name, "getInstance"),
            },
        )
    }

    fn write_methods(
        &mut self,
        ctx: &ClassContext<'a>,
        methods: &'a MemberMap,
        owner: &ClassMeta,
        is_static: bool,
    ) -> Result<()> {
        let kind = if is_static {
            MemberKind::Statics
        } else {
            MemberKind::Members
        };
        // Interfaces cannot carry access or abstract modifiers.
        let in_interface = owner.is_interface();

        for (name, method) in methods {
            if !method.is_function() {
                continue;
            }
            if self.check_override(ctx, name, kind) {
                trace!(class = ctx.name, member = %name, "suppressed as override");
                continue;
            }

            let returns = method
                .return_type
                .as_ref()
                .map(|ret| self.types.get_type_ref(ret.type_ref.as_ref()));
            let decl = MethodDecl {
                access: if in_interface { None } else { method.access },
                is_static,
                is_abstract: !in_interface && method.is_abstract,
                is_mixin: method.mixin,
                params: &method.params,
                returns,
                doc: Some(method.description()),
                hidden: self.config.is_ignored(ctx.name, name),
            };
            self.write_method(ctx, name, decl)?;
        }
        Ok(())
    }

    /// Accessors synthesized for each property: `get`, `is` (booleans only),
    /// `set` and `reset`, mirrored with an `Async` suffix for async properties.
    fn write_properties(&mut self, ctx: &ClassContext<'a>, meta: &'a ClassMeta) -> Result<()> {
        for (property_name, property) in &meta.properties {
            if property.is_group() {
                trace!(class = ctx.name, property = %property_name, "skipping property group");
                continue;
            }
            if self.check_override(ctx, property_name, MemberKind::Properties) {
                trace!(class = ctx.name, property = %property_name, "suppressed as override");
                continue;
            }

            let upname = first_up(property_name);
            let check = property.check.as_deref().unwrap_or_default();
            self.write_accessors(ctx, &upname, check, "")?;
            if property.is_async {
                self.write_accessors(ctx, &upname, check, "Async")?;
            }
        }
        Ok(())
    }

    fn write_accessors(
        &mut self,
        ctx: &ClassContext<'a>,
        upname: &str,
        check: &str,
        suffix: &str,
    ) -> Result<()> {
        let value_type = self.types.get_type(check);
        let is_boolean = value_type == "boolean";

        self.write_method(
            ctx,
            &format!("get{upname}{suffix}"),
            MethodDecl::accessor(Some(value_type.clone())),
        )?;
        if is_boolean {
            self.write_method(
                ctx,
                &format!("is{upname}{suffix}"),
                MethodDecl::accessor(Some(value_type)),
            )?;
        }

        let value = [ParamMeta::new("value", check)];
        self.write_method(
            ctx,
            &format!("set{upname}{suffix}"),
            MethodDecl {
                params: &value,
                ..MethodDecl::accessor(None)
            },
        )?;
        self.write_method(
            ctx,
            &format!("reset{upname}{suffix}"),
            MethodDecl::accessor(None),
        )
    }

    fn write_method(&mut self, ctx: &ClassContext<'a>, name: &str, decl: MethodDecl<'_>) -> Result<()> {
        let mut declaration = String::new();
        let mut comment = String::new();

        match decl.access {
            Some(Access::Private) => return Ok(()),
            Some(access) => {
                if let Some(modifier) = access.modifier() {
                    declaration.push_str(modifier);
                    declaration.push(' ');
                }
            }
            None => {}
        }
        if decl.is_static {
            declaration.push_str("static ");
        }
        if decl.is_abstract {
            declaration.push_str("abstract ");
            comment.push_str("Abstract ");
        }
        if decl.is_mixin {
            comment.push_str("Mixin ");
        }

        declaration.push_str(&escape_method_name(name));
        declaration.push('(');
        declaration.push_str(&self.serialize_parameters(decl.params));
        declaration.push_str("): ");
        declaration.push_str(decl.returns.as_deref().unwrap_or("void"));

        if let Some(description) = decl.doc {
            self.write_doc_comment(ctx, description)?;
        }

        let prefix = if decl.hidden { "// " } else { "" };
        let comment = if comment.is_empty() {
            comment
        } else {
            format!(" // {comment}")
        };
        self.write(&format!("{INDENT}{prefix}{declaration};{comment}\n"))
    }

    fn write_doc_comment(&mut self, ctx: &ClassContext<'a>, description: Option<&str>) -> Result<()> {
        let mut lines = vec!["/**".to_string()];
        if let Some(description) = description {
            let text = fixup_description(description, ctx.name);
            lines.extend(text.split('\n').map(|line| format!(" * {}", line.trim())));
        }
        lines.push(" *".to_string());
        if let Some(link) = self.source_link(ctx.meta) {
            lines.push(format!(" * [source code]({link})"));
        }
        lines.push(" */\n".to_string());

        let block = lines
            .iter()
            .map(|line| format!("{INDENT}{line}"))
            .collect::<Vec<_>>()
            .join("\n");
        self.write(&block)
    }

    /// Path of the class source relative to the output file's directory.
    fn source_link(&self, meta: &ClassMeta) -> Option<String> {
        let filename = meta.class_filename.as_deref()?;
        let base = self.config.working_dir.clone().unwrap_or_default();
        let output_dir = self
            .config
            .output_to
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(PathBuf::new);
        let source = base.join(self.meta_db.root_dir()).join(filename);
        Some(display_path(&relative_path(&base.join(output_dir), &source)))
    }

    /// `name[?]: type` list. Once a parameter is optional (declared so, or the
    /// trailing `varargs`) every parameter after it is optional too.
    fn serialize_parameters(&self, params: &[ParamMeta]) -> String {
        let mut force_optional = false;
        params
            .iter()
            .map(|param| {
                let mut decl = param.name.clone();
                if param.optional || param.name == "varargs" || force_optional {
                    decl.push('?');
                    force_optional = true;
                }
                decl.push_str(": ");
                decl.push_str(&self.types.get_type_ref(param.type_ref.as_ref()));
                if param.type_ref.as_ref().is_some_and(|t| t.name().is_some() && t.dimensions() > 0) {
                    decl.push_str("[]");
                }
                decl
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Quote names that are not plain identifiers.
fn escape_method_name(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_identifier {
        name.to_string()
    } else {
        format!("\"{name}\"")
    }
}

fn first_up(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
