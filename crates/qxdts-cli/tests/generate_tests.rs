//! End-to-end runs of the driver against an on-disk meta-database.

use clap::Parser;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use qxdts_cli::args::CliArgs;
use qxdts_cli::driver;

fn write_file(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(
        root,
        "meta/db.json",
        r#"{ "classnames": ["qx.core.Object", "app.Main", "app.MLogging"] }"#,
    );
    write_file(
        root,
        "meta/qx/core/Object.json",
        r#"{
            "className": "qx.core.Object",
            "superClass": "Object",
            "members": { "toString": { "type": "function", "returnType": { "type": "String" } } }
        }"#,
    );
    write_file(
        root,
        "meta/app/MLogging.json",
        r#"{
            "className": "app.MLogging",
            "type": "mixin",
            "members": { "debug": { "type": "function", "params": [{ "name": "msg", "type": "String" }] } }
        }"#,
    );
    write_file(
        root,
        "meta/app/Main.json",
        r#"{
            "className": "app.Main",
            "superClass": "qx.core.Object",
            "mixins": "app.MLogging",
            "members": { "toString": { "type": "function" } },
            "properties": { "visible": { "check": "Boolean" } }
        }"#,
    );
    dir
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["qxdts", "meta"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).unwrap()
}

#[test]
fn lists_classes_sorted() {
    let dir = project();
    let names = driver::list_classes(&args(&[]), dir.path()).unwrap();
    assert_eq!(names, ["app.MLogging", "app.Main", "qx.core.Object"]);
}

#[test]
fn generates_declaration_file() {
    let dir = project();
    let summary = driver::generate(&args(&["-o", "types/qooxdoo.d.ts"]), dir.path()).unwrap();
    assert_eq!(summary.output, dir.path().join("types/qooxdoo.d.ts"));
    assert_eq!(summary.stats.classes, 3);
    assert_eq!(summary.stats.modules, 2);

    let text = fs::read_to_string(&summary.output).unwrap();
    assert!(text.contains("declare module app {"));
    assert!(text.contains("  class Main extends globalThis.qx.core.Object {"));
    assert!(text.contains("    // Mixin: app.MLogging\n"));
    assert!(text.contains("    debug(msg: string): void;\n"));
    assert!(text.contains("    getVisible(): boolean;\n    isVisible(): boolean;\n"));
    assert!(text.contains("    toString(): string;\n"));
    // Main's own toString is left to qx.core.Object.
    assert_eq!(text.matches("toString(").count(), 1);
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = project();
    write_file(
        dir.path(),
        "qxdts.json",
        r#"{ "outputTo": "gen/qx.d.ts", "ignore": { "app.MLogging": ["debug"] } }"#,
    );
    let summary = driver::generate(&args(&[]), dir.path()).unwrap();
    assert_eq!(summary.output, dir.path().join("gen/qx.d.ts"));

    let text = fs::read_to_string(&summary.output).unwrap();
    assert!(text.contains("    // debug(msg: string): void;\n"));
}

#[test]
fn missing_meta_directory_fails() {
    let dir = TempDir::new().unwrap();
    let err = driver::generate(&args(&[]), dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("meta"));
}

#[test]
fn missing_mixin_fails_the_run() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "meta/app/Broken.json",
        r#"{ "className": "app.Broken", "mixins": ["app.MGone"] }"#,
    );
    let err = driver::generate(&args(&[]), dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("app.MGone"));
}
