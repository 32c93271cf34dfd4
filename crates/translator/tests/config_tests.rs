// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Loading translator configuration files

use std::path::PathBuf;

use adql_sql_ir::{Function, Operand, Query, SelectItem, TableRef, UserFunction};
use adql_sql_test_utils::SqlAssertions;
use adql_sql_translator::{ConfigError, DialectKind, TranslatorConfig};

fn write_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("adql-sql-{}-{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

const YAML: &str = r#"
dialect: ansi
udfs:
  - signature: "foo(str VARCHAR, len INT) -> VARCHAR"
    translation: "left($$1, $$2)"
    description: "Leftmost characters"
  - signature: "gavo_match(pattern VARCHAR, string VARCHAR) -> INTEGER"
"#;

#[test]
fn test_load_yaml() {
    let path = write_config("load.yaml", YAML);
    let config = TranslatorConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.dialect, DialectKind::Ansi);
    assert_eq!(config.udfs.len(), 2);
}

#[test]
fn test_load_json() {
    let path = write_config(
        "load.json",
        r#"{"udfs": [{"signature": "bar(a INTEGER) -> INTEGER", "translation": "($$1 * 2)"}]}"#,
    );
    let config = TranslatorConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.dialect, DialectKind::Postgresql);
    assert_eq!(config.udfs.len(), 1);
}

#[test]
fn test_registry_resolves_unbound_calls() {
    let path = write_config("resolve.yml", YAML);
    let translator = TranslatorConfig::load(&path).unwrap().build_translator().unwrap();
    std::fs::remove_file(&path).ok();

    let call = |name: &str| -> Operand {
        Function::User(UserFunction::new(
            name,
            vec![Operand::string("hello"), Operand::integer(1495)],
        ))
        .into()
    };
    let query = Query::new(TableRef::named("foo")).with_select_items(vec![
        SelectItem::aliased(call("foo"), "l"),
        SelectItem::aliased(call("gavo_match"), "m"),
    ]);

    SqlAssertions::assert_sql(
        translator.translate_query(&query),
        "SELECT left('hello', 1495) AS \"l\" , gavo_match('hello', 1495) AS \"m\"\nFROM foo",
    );
}

#[test]
fn test_load_rejects_invalid_udf() {
    let path = write_config(
        "invalid.yaml",
        "udfs:\n  - signature: \"foo(a INT)\"\n    translation: \"f($$2)\"\n",
    );
    let result = TranslatorConfig::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(ConfigError::Definition(_))));
}

#[test]
fn test_load_reports_path() {
    let path = write_config("broken.json", "{ not json");
    let result = TranslatorConfig::load(&path);
    std::fs::remove_file(&path).ok();

    match result {
        Err(ConfigError::Parse { path: reported, .. }) => {
            assert!(reported.ends_with("broken.json"));
        }
        other => panic!("Expected a parse error, found {:?}", other),
    }
}

#[test]
fn test_load_missing_file() {
    let missing = std::env::temp_dir().join("adql-sql-does-not-exist.yaml");
    assert!(matches!(
        TranslatorConfig::load(missing),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_load_unknown_extension() {
    let path = write_config("config.toml", "dialect = \"ansi\"");
    let result = TranslatorConfig::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}
