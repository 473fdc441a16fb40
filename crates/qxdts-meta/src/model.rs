//! Class metadata records.
//!
//! One [`ClassMeta`] exists per class, mixin or interface in the
//! meta-database. The records mirror the JSON written by the metadata
//! extractor, with the loosely-typed parts (a superclass that may be a string
//! or a list, type references that may be strings or objects) normalized at
//! deserialization time so the generator can rely on well-typed input.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Member maps keep declaration order so emission follows the source.
pub type MemberMap = IndexMap<String, MethodMeta>;
pub type PropertyMap = IndexMap<String, PropertyMeta>;

/// JSDoc tags of a member: tag name (`@description`, `@param`, ...) to entries.
pub type Jsdoc = IndexMap<String, Vec<JsdocEntry>>;

/// Accepts an absent value, a single string, or a list of strings.
fn deserialize_one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(name)) => vec![name],
        Some(OneOrMany::Many(names)) => names,
    })
}

/// Keeps string values only; any other JSON shape (a list of allowed values,
/// a check function body) is treated as "no type".
fn deserialize_string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Mixin,
    Theme,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Protected,
    Private,
    #[serde(other)]
    Unspecified,
}

impl Access {
    /// The TypeScript modifier for this access level, if one is written.
    pub fn modifier(self) -> Option<&'static str> {
        match self {
            Access::Public => Some("public"),
            Access::Protected => Some("protected"),
            Access::Private | Access::Unspecified => None,
        }
    }
}

/// A reference to a type as the extractor records it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    /// `"qx.ui.core.Widget"`, `"Boolean?"`, `"Array<String>"`.
    Name(String),
    /// Alternatives; only a single-element list carries a usable type.
    List(Vec<TypeRef>),
    /// `{ "name": "String", "dimensions": 1 }`.
    Named {
        #[serde(default)]
        name: String,
        #[serde(default)]
        dimensions: u32,
    },
}

impl TypeRef {
    /// The type name to translate, or `None` when the reference is unusable.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Name(name) => Some(name),
            TypeRef::Named { name, .. } => Some(name),
            TypeRef::List(list) => match list.as_slice() {
                [single] => single.name(),
                _ => None,
            },
        }
    }

    /// Array dimensions declared on the reference.
    pub fn dimensions(&self) -> u32 {
        match self {
            TypeRef::Name(_) => 0,
            TypeRef::Named { dimensions, .. } => *dimensions,
            TypeRef::List(list) => match list.as_slice() {
                [single] => single.dimensions(),
                _ => 0,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JsdocEntry {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParamMeta {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, rename = "type")]
    pub type_ref: Option<TypeRef>,
}

impl ParamMeta {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            type_ref: Some(TypeRef::Name(type_name.into())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReturnMeta {
    #[serde(default, rename = "type")]
    pub type_ref: Option<TypeRef>,
}

/// A static, member or constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMeta {
    /// `"function"` for methods; variables and other entries are not emitted.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub access: Option<Access>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Set by the extractor on members copied in from a mixin.
    #[serde(default)]
    pub mixin: bool,
    #[serde(default)]
    pub params: Vec<ParamMeta>,
    #[serde(default)]
    pub return_type: Option<ReturnMeta>,
    #[serde(default)]
    pub jsdoc: Option<Jsdoc>,
}

impl MethodMeta {
    pub fn is_function(&self) -> bool {
        self.kind.as_deref() == Some("function")
    }

    pub fn description(&self) -> Option<&str> {
        self.jsdoc
            .as_ref()?
            .get("@description")?
            .first()
            .map(|entry| entry.body.as_str())
            .filter(|body| !body.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMeta {
    /// Legacy type name from the property's `check`.
    #[serde(default, deserialize_with = "deserialize_string_or_none")]
    pub check: Option<String>,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    /// Names of the properties a property-group bundles.
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub group: Vec<String>,
}

impl PropertyMeta {
    pub fn is_group(&self) -> bool {
        !self.group.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMeta {
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: ClassKind,
    /// A single name for classes, possibly several for interfaces.
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub super_class: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub interfaces: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub mixins: Vec<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_singleton: bool,
    #[serde(default)]
    pub construct: Option<MethodMeta>,
    #[serde(default)]
    pub statics: MemberMap,
    #[serde(default)]
    pub members: MemberMap,
    #[serde(default)]
    pub properties: PropertyMap,
    /// Source file, relative to the meta-database root.
    #[serde(default)]
    pub class_filename: Option<String>,
}

impl ClassMeta {
    pub fn name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Whether this record declares `name` among the entries of `kind`.
    pub fn declares(&self, kind: MemberKind, name: &str) -> bool {
        match kind {
            MemberKind::Statics => self.statics.contains_key(name),
            MemberKind::Members => self.members.contains_key(name),
            MemberKind::Properties => self.properties.contains_key(name),
        }
    }
}

/// The member tables of a class, as consulted by override detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Statics,
    Members,
    Properties,
}
