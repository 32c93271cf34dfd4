// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Registry construction from declarations

use adql_sql_function_registry::{DataType, DefinitionError, FunctionRegistry, UdfDeclaration};

#[test]
fn test_from_declarations() {
    let registry = FunctionRegistry::from_declarations(&[
        UdfDeclaration::new("foo(str VARCHAR, len INT) -> VARCHAR").with_translation("left($$1, $$2)"),
        UdfDeclaration::new("gavo_match(pattern VARCHAR, string VARCHAR) -> INTEGER"),
    ])
    .unwrap();

    assert_eq!(registry.len(), 2);

    let foo = registry.lookup("FOO", 2).unwrap();
    assert_eq!(foo.return_type, DataType::VarChar(None));
    assert!(foo.translation.is_some());

    let gavo = registry.lookup("gavo_match", 2).unwrap();
    assert!(gavo.translation.is_none());
}

#[test]
fn test_from_declarations_fails_on_first_error() {
    let result = FunctionRegistry::from_declarations(&[
        UdfDeclaration::new("foo(a INT)"),
        UdfDeclaration::new("bar(a INT, b INT)").with_translation("f($$1, $$3)"),
        UdfDeclaration::new("upper(a VARCHAR)"),
    ]);

    assert!(matches!(
        result,
        Err(DefinitionError::PlaceholderOutOfRange { index: 3, .. })
    ));
}

#[test]
fn test_from_declarations_rejects_builtin_names() {
    let result = FunctionRegistry::from_declarations(&[UdfDeclaration::new("Upper(a VARCHAR)")]);
    assert_eq!(
        result.unwrap_err(),
        DefinitionError::ReservedName("Upper".to_string())
    );
}

#[test]
fn test_from_yaml_declarations() {
    let yaml = r#"
- signature: "sq(x DOUBLE) -> DOUBLE"
  translation: "($$1 * $$1)"
  description: "square"
- signature: "sq(x DOUBLE, y DOUBLE) -> DOUBLE"
"#;
    let declarations: Vec<UdfDeclaration> = serde_yaml::from_str(yaml).unwrap();
    let registry = FunctionRegistry::from_declarations(&declarations).unwrap();

    assert_eq!(registry.get_functions("SQ").len(), 2);
    assert_eq!(
        registry.lookup("sq", 1).unwrap().description.as_deref(),
        Some("square")
    );
}
