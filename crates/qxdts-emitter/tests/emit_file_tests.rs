//! Writing a declaration file from an on-disk meta-database.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use qxdts_emitter::{DeclarationWriter, WriterConfig};
use qxdts_meta::MetaDatabase;
use tempfile::TempDir;

fn write_record(root: &Path, class_name: &str, json: &str) {
    let path = MetaDatabase::class_path(root, class_name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, json).unwrap();
}

fn sample_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let meta = dir.path().join("compiled/meta");
    fs::create_dir_all(&meta).unwrap();
    write_record(
        &meta,
        "qx.core.Object",
        r#"{ "className": "qx.core.Object", "type": "class", "superClass": "Object" }"#,
    );
    write_record(
        &meta,
        "app.Main",
        r#"{
            "className": "app.Main",
            "type": "class",
            "superClass": "qx.core.Object",
            "classFilename": "source/class/app/Main.js",
            "members": {
                "main": {
                    "type": "function",
                    "access": "public",
                    "jsdoc": { "@description": [{ "body": "Entry point" }] }
                }
            },
            "properties": { "visible": { "check": "Boolean" } }
        }"#,
    );
    fs::write(
        meta.join("db.json"),
        r#"{ "classnames": ["app.Main", "qx.core.Object"] }"#,
    )
    .unwrap();
    dir
}

#[test]
fn test_writes_declaration_file() {
    let project = sample_project();
    let db = MetaDatabase::load(project.path().join("compiled/meta")).unwrap();
    let output_path = project.path().join("types/qooxdoo.d.ts");
    fs::create_dir_all(output_path.parent().unwrap()).unwrap();

    let config = WriterConfig::default()
        .with_output_to("types/qooxdoo.d.ts")
        .with_working_dir(project.path());
    let file = fs::File::create(&output_path).unwrap();
    let mut writer = DeclarationWriter::new(&db, &config, BufWriter::new(file));
    let stats = writer.process().unwrap();
    drop(writer);

    assert_eq!(stats.classes, 2);
    assert_eq!(stats.modules, 2);

    let text = fs::read_to_string(&output_path).unwrap();
    assert!(text.starts_with("// Generated declaration file at "));
    assert!(text.contains("declare type QxUnknownType"), "base declaration missing");
    assert!(text.contains("declare module app {\n  // app.Main\n  class Main extends globalThis.qx.core.Object {\n"));
    assert!(text.contains(
        "    /**\n     * Entry point\n     *\n     * [source code](../compiled/meta/source/class/app/Main.js)\n     */\n    public main(): void;\n"
    ));
    assert!(text.contains("    isVisible(): boolean;\n"));
    assert!(text.contains("declare module qx.core {\n  // qx.core.Object\n  class Object {\n"));
    assert!(text.ends_with("\n  }\n}\n"));
}

#[test]
fn test_header_timestamp_is_a_local_date() {
    let project = sample_project();
    let db = MetaDatabase::load(project.path().join("compiled/meta")).unwrap();
    let config = WriterConfig::empty();
    let mut writer = DeclarationWriter::new(&db, &config, Vec::new());
    writer.process().unwrap();
    let text = String::from_utf8(writer.into_inner()).unwrap();

    let header = text.lines().next().unwrap();
    let stamp = header
        .strip_prefix("// Generated declaration file at ")
        .unwrap();
    // "Sat Oct 18 2026 14:03:11 GMT+0200"
    let parts: Vec<&str> = stamp.split(' ').collect();
    assert_eq!(parts.len(), 6, "unexpected stamp {stamp:?}");
    assert!(parts[5].starts_with("GMT"));
    assert_eq!(parts[4].matches(':').count(), 2);
}
