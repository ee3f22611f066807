//! Integration tests for the public load/merge/dump API

use anyconf::{ConfigTree, Error, MergeStrategy, PathSpec};
use similar_asserts::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn tree(json: &str) -> ConfigTree {
    anyconf::loads(json, Some("json")).expect("valid json fixture")
}

fn scenario_a() -> ConfigTree {
    tree(r#"{"name": "a", "a": 1, "b": {"b": [1, 2], "c": "C"}}"#)
}

fn scenario_b() -> ConfigTree {
    tree(r#"{"a": 2, "b": {"b": [1, 2, 3, 4, 5], "d": "D"}}"#)
}

/// Dump both scenario files into `dir` and return their paths.
fn dump_scenario(dir: &Path) -> (PathBuf, PathBuf) {
    let a_path = dir.join("a.json");
    let b_path = dir.join("b.json");
    anyconf::dump(&scenario_a(), &a_path, None).expect("dump a");
    anyconf::dump(&scenario_b(), &b_path, None).expect("dump b");
    assert!(a_path.exists() && b_path.exists());
    (a_path, b_path)
}

#[test]
fn find_parser_with_forced_type_ignores_extension() {
    let registry = anyconf::Registry::builtin();
    for tag in ["ini", "json", "yaml", "toml", "xml", "properties"] {
        let found = registry.resolve(Some(Path::new("dummy.conf")), Some(tag));
        assert_eq!(found.map(|d| d.type_tag()), Some(tag));
    }
}

#[test]
fn find_parser_by_file() {
    let registry = anyconf::Registry::builtin();
    for (file, tag) in [
        ("dummy.ini", "ini"),
        ("dummy.json", "json"),
        ("dummy.jsn", "json"),
        ("dummy.yaml", "yaml"),
        ("dummy.yml", "yaml"),
        ("dummy.xml", "xml"),
        ("dummy.properties", "properties"),
    ] {
        assert_eq!(registry.find_by_extension(file).map(|d| d.type_tag()), Some(tag), "{file}");
    }
}

#[test]
fn dumps_and_loads_round_trip() {
    let a = scenario_a();
    for format in ["json", "yaml", "toml"] {
        let text = anyconf::dumps(&a, format).expect("dumps");
        assert_eq!(anyconf::loads(&text, Some(format)).expect("loads"), a, "{format}");
    }
}

#[test]
fn string_only_formats_round_trip_string_trees() {
    let flat: ConfigTree = [("name", "a"), ("path", "/etc/app")].into_iter().collect();
    let sectioned: ConfigTree = [("server", flat.clone())].into_iter().collect();

    let text = anyconf::dumps(&flat, "properties").expect("dumps");
    assert_eq!(anyconf::loads(&text, Some("properties")).expect("loads"), flat);

    let text = anyconf::dumps(&sectioned, "ini").expect("dumps");
    assert_eq!(anyconf::loads(&text, Some("ini")).expect("loads"), sectioned);
}

#[test]
fn dump_and_single_load() {
    let tmp = TempDir::new().expect("tmp");
    let (a_path, _) = dump_scenario(tmp.path());
    assert_eq!(anyconf::single_load(&a_path, None).expect("load"), scenario_a());
}

#[test]
fn multi_load_merge_maps_replaces_sequences() {
    let tmp = TempDir::new().expect("tmp");
    let (a_path, b_path) = dump_scenario(tmp.path());

    let merged = anyconf::multi_load(vec![a_path, b_path], None, MergeStrategy::MergeMaps).expect("load");
    assert_eq!(merged, tree(r#"{"name": "a", "a": 2, "b": {"b": [1, 2, 3, 4, 5], "c": "C", "d": "D"}}"#));
}

#[test]
fn multi_load_merge_maps_and_sequences_concatenates() {
    let tmp = TempDir::new().expect("tmp");
    let (a_path, b_path) = dump_scenario(tmp.path());

    let merged = anyconf::multi_load(vec![a_path, b_path], None, MergeStrategy::MergeMapsAndSequences)
        .expect("load");
    assert_eq!(
        merged,
        tree(r#"{"name": "a", "a": 2, "b": {"b": [1, 2, 1, 2, 3, 4, 5], "c": "C", "d": "D"}}"#)
    );
}

#[test]
fn multi_load_replace_overwrites_top_level_keys() {
    let tmp = TempDir::new().expect("tmp");
    let (a_path, b_path) = dump_scenario(tmp.path());

    let merged = anyconf::multi_load(vec![a_path, b_path], None, MergeStrategy::Replace).expect("load");
    assert_eq!(merged, tree(r#"{"name": "a", "a": 2, "b": {"b": [1, 2, 3, 4, 5], "d": "D"}}"#));
}

#[test]
fn load_single_path_pattern_and_list() {
    let tmp = TempDir::new().expect("tmp");
    let (a_path, b_path) = dump_scenario(tmp.path());
    let expected =
        tree(r#"{"name": "a", "a": 2, "b": {"b": [1, 2, 1, 2, 3, 4, 5], "c": "C", "d": "D"}}"#);

    let single = anyconf::load(a_path.as_path(), None, MergeStrategy::default()).expect("single");
    assert_eq!(single, scenario_a());

    let pattern = format!("{}/*.json", tmp.path().display());
    let from_pattern = anyconf::load(pattern, None, MergeStrategy::default()).expect("pattern");
    assert_eq!(from_pattern, expected);

    let from_list = anyconf::load(vec![a_path, b_path], None, MergeStrategy::default()).expect("list");
    assert_eq!(from_list, expected);
}

#[test]
fn glob_order_decides_precedence() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("20-site.yml"), "level: site\n").expect("write");
    fs::write(tmp.path().join("10-base.yml"), "level: base\nbase_only: true\n").expect("write");

    let spec = PathSpec::Pattern(format!("{}/*.yml", tmp.path().display()));
    let merged = anyconf::multi_load(spec, None, MergeStrategy::MergeMaps).expect("load");
    assert_eq!(merged, tree(r#"{"level": "site", "base_only": true}"#));
}

#[test]
fn mixed_formats_merge_together() {
    let tmp = TempDir::new().expect("tmp");
    let defaults = tmp.path().join("defaults.toml");
    let overrides = tmp.path().join("overrides.yaml");
    fs::write(&defaults, "[server]\nhost = \"localhost\"\nport = 8080\n").expect("write");
    fs::write(&overrides, "server:\n  port: 9090\n").expect("write");

    let merged = anyconf::load(vec![defaults, overrides], None, MergeStrategy::MergeMaps).expect("load");
    assert_eq!(merged, tree(r#"{"server": {"host": "localhost", "port": 9090}}"#));
}

#[test]
fn dump_to_unknown_format_writes_json() {
    let tmp = TempDir::new().expect("tmp");
    let out = tmp.path().join("out.weirdfmt");
    anyconf::dump(&scenario_a(), &out, None).expect("fallback dump succeeds");

    let written = fs::read_to_string(&out).expect("read");
    assert_eq!(anyconf::loads(&written, Some("json")).expect("json"), scenario_a());
}

#[test]
fn unsupported_and_invalid_inputs_are_errors() {
    let tmp = TempDir::new().expect("tmp");
    let odd = tmp.path().join("a.unknownext");
    fs::write(&odd, "x").expect("write");

    let err = anyconf::single_load(&odd, None).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }));

    let err = anyconf::single_load(&odd, Some("nope")).unwrap_err();
    assert!(err.to_string().contains("given type: nope"), "{err}");

    let err = "merge_all_the_things".parse::<MergeStrategy>().unwrap_err();
    assert!(matches!(err, Error::InvalidStrategy(_)));
}

#[test]
fn list_supported_types_names_every_builtin() {
    assert_eq!(
        anyconf::list_supported_types(),
        vec!["json", "yaml", "toml", "ini", "xml", "properties"]
    );
}
