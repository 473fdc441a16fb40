use super::args::CliArgs;
use super::config::{CONFIG_FILE, find_config, load_config, resolve_writer_config};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["qxdts"];
    argv.extend_from_slice(extra);
    argv.push("meta");
    CliArgs::try_parse_from(argv).expect("should parse")
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create test dir");
    }
    fs::write(&path, contents).expect("failed to write test file");
    path
}

#[test]
fn defaults_without_config_file() {
    let dir = TempDir::new().unwrap();
    let config = resolve_writer_config(&args(&[]), None, dir.path()).unwrap();
    assert_eq!(config.output_to, PathBuf::from("qooxdoo.d.ts"));
    assert_eq!(config.working_dir.as_deref(), Some(dir.path()));
    assert_eq!(config.type_mappings.get("Boolean").map(String::as_str), Some("boolean"));
    assert!(config.is_ignored("qx.html.Flash", "setAttribute"));
    assert!(config.base_declaration.contains("QxUnknownType"));
}

#[test]
fn default_tables_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let config = resolve_writer_config(
        &args(&["--no-default-mappings", "--no-default-ignores"]),
        None,
        dir.path(),
    )
    .unwrap();
    assert!(config.type_mappings.is_empty());
    assert!(config.ignore.is_empty());
}

#[test]
fn config_file_merges_over_defaults() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "conf/base.d.ts", "declare type Custom = any;");
    let path = write_file(
        dir.path(),
        "conf/qxdts.json",
        r#"{
            "outputTo": "out/app.d.ts",
            "baseDeclaration": "base.d.ts",
            "ignore": {
                "qx.html.Flash": "embed",
                "app.Widget": ["render", "flush"]
            },
            "typeMappings": { "Boolean": "true | false", "Theme": "app.Theme" }
        }"#,
    );
    let file = load_config(&path).unwrap();
    let config = resolve_writer_config(&args(&[]), Some(&file), dir.path()).unwrap();

    assert_eq!(config.output_to, dir.path().join("conf/out/app.d.ts"));
    assert_eq!(config.base_declaration, "declare type Custom = any;");
    assert!(config.is_ignored("qx.html.Flash", "setAttribute"));
    assert!(config.is_ignored("qx.html.Flash", "embed"));
    assert!(config.is_ignored("app.Widget", "flush"));
    assert_eq!(config.type_mappings["Boolean"], "true | false");
    assert_eq!(config.type_mappings["Theme"], "app.Theme");
    assert_eq!(config.type_mappings["Number"], "number");
}

#[test]
fn command_line_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "cli-base.d.ts", "// from the command line");
    let path = write_file(dir.path(), CONFIG_FILE, r#"{ "outputTo": "from-config.d.ts" }"#);
    let file = load_config(&path).unwrap();
    let config = resolve_writer_config(
        &args(&["-o", "from-cli.d.ts", "--base-declaration", "cli-base.d.ts"]),
        Some(&file),
        dir.path(),
    )
    .unwrap();
    assert_eq!(config.output_to, PathBuf::from("from-cli.d.ts"));
    assert_eq!(config.base_declaration, "// from the command line");
}

#[test]
fn missing_base_declaration_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = resolve_writer_config(
        &args(&["--base-declaration", "nope.d.ts"]),
        None,
        dir.path(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("nope.d.ts"));
}

#[test]
fn malformed_config_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), CONFIG_FILE, r#"{ "typeMappings": [1, 2] }"#);
    let err = load_config(&path).unwrap_err();
    assert!(format!("{err:#}").contains(CONFIG_FILE));
}

#[test]
fn finds_config_in_working_directory() {
    let dir = TempDir::new().unwrap();
    assert_eq!(find_config(None, dir.path()), None);

    let path = write_file(dir.path(), CONFIG_FILE, "{}");
    assert_eq!(find_config(None, dir.path()), Some(path));

    let explicit = find_config(Some(Path::new("other.json")), dir.path());
    assert_eq!(explicit, Some(dir.path().join("other.json")));
}
