use crate::model::*;
use serde_json::json;

fn parse(value: serde_json::Value) -> ClassMeta {
    serde_json::from_value(value).expect("class record should deserialize")
}

#[test]
fn test_superclass_accepts_string_or_list() {
    let class = parse(json!({ "className": "a.B", "superClass": "a.A" }));
    assert_eq!(class.super_class, vec!["a.A".to_string()]);

    let itf = parse(json!({
        "className": "a.IB",
        "type": "interface",
        "superClass": ["a.IA", "a.IC"]
    }));
    assert!(itf.is_interface());
    assert_eq!(itf.super_class, vec!["a.IA".to_string(), "a.IC".to_string()]);

    let root = parse(json!({ "className": "a.Root" }));
    assert!(root.super_class.is_empty());
    assert_eq!(root.kind, ClassKind::Class);
}

#[test]
fn test_single_mixin_string_is_normalized() {
    let class = parse(json!({ "className": "a.B", "mixins": "a.MOne" }));
    assert_eq!(class.mixins, vec!["a.MOne".to_string()]);
}

#[test]
fn test_missing_class_name_is_allowed() {
    let class = parse(json!({ "type": "class", "members": {} }));
    assert_eq!(class.name(), None);
}

#[test]
fn test_member_maps_keep_declaration_order() {
    let class = parse(json!({
        "className": "a.B",
        "members": {
            "zeta": { "type": "function" },
            "alpha": { "type": "function" },
            "mid": { "type": "variable" }
        }
    }));
    let names: Vec<&str> = class.members.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    assert!(class.members["zeta"].is_function());
    assert!(!class.members["mid"].is_function());
}

#[test]
fn test_method_fields() {
    let class = parse(json!({
        "className": "a.B",
        "members": {
            "_apply": {
                "type": "function",
                "access": "protected",
                "abstract": true,
                "params": [
                    { "name": "value", "type": "String" },
                    { "name": "old", "type": { "name": "Number", "dimensions": 1 }, "optional": true },
                    { "name": "either", "type": ["String", "Number"] }
                ],
                "returnType": { "type": "Boolean" },
                "jsdoc": { "@description": [{ "body": "Applies it" }] }
            }
        }
    }));
    let method = &class.members["_apply"];
    assert_eq!(method.access, Some(Access::Protected));
    assert!(method.is_abstract);
    assert_eq!(method.params.len(), 3);
    assert_eq!(method.params[0].type_ref.as_ref().and_then(TypeRef::name), Some("String"));
    assert!(method.params[1].optional);
    assert_eq!(method.params[1].type_ref.as_ref().map(TypeRef::dimensions), Some(1));
    assert_eq!(method.params[2].type_ref.as_ref().and_then(TypeRef::name), None);
    assert_eq!(
        method
            .return_type
            .as_ref()
            .and_then(|r| r.type_ref.as_ref())
            .and_then(TypeRef::name),
        Some("Boolean")
    );
    assert_eq!(method.description(), Some("Applies it"));
}

#[test]
fn test_unknown_access_and_kind_do_not_fail() {
    let class = parse(json!({
        "className": "a.Theme",
        "type": "something-new",
        "members": { "m": { "type": "function", "access": "internal" } }
    }));
    assert_eq!(class.kind, ClassKind::Other);
    assert_eq!(class.members["m"].access, Some(Access::Unspecified));
    assert_eq!(Access::Unspecified.modifier(), None);
    assert_eq!(Access::Protected.modifier(), Some("protected"));
}

#[test]
fn test_property_check_and_group() {
    let class = parse(json!({
        "className": "a.B",
        "properties": {
            "visible": { "check": "Boolean", "async": true },
            "align": { "check": ["left", "right"] },
            "padding": { "group": ["paddingTop", "paddingRight"] }
        }
    }));
    let visible = &class.properties["visible"];
    assert_eq!(visible.check.as_deref(), Some("Boolean"));
    assert!(visible.is_async);
    assert!(!visible.is_group());

    assert_eq!(class.properties["align"].check, None);
    assert!(class.properties["padding"].is_group());
}

#[test]
fn test_declares_by_kind() {
    let class = parse(json!({
        "className": "a.B",
        "statics": { "create": { "type": "function" } },
        "members": { "render": { "type": "function" } },
        "properties": { "width": { "check": "Integer" } }
    }));
    assert!(class.declares(MemberKind::Statics, "create"));
    assert!(!class.declares(MemberKind::Members, "create"));
    assert!(class.declares(MemberKind::Members, "render"));
    assert!(class.declares(MemberKind::Properties, "width"));
}
