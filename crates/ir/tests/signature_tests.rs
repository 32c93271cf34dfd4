// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Function definitions: signature parsing and template binding

use adql_sql_ir::{DataType, DefinitionError, FunctionDef, TemplateSegment};

#[test]
fn test_definition_with_translation() {
    let def = FunctionDef::parse("foo(str VARCHAR, len INTEGER) -> VARCHAR")
        .unwrap()
        .with_translation("left($$1, $$2)")
        .unwrap();

    let template = def.translation.as_ref().unwrap();
    assert_eq!(template.max_index(), Some(2));
    assert_eq!(template.segments()[1], TemplateSegment::Argument(1));
}

#[test]
fn test_unreferenced_parameters_allowed() {
    let def = FunctionDef::parse("foo(a INT, b INT, c INT)")
        .unwrap()
        .with_translation("$$2")
        .unwrap();
    assert_eq!(def.translation.unwrap().max_index(), Some(2));
}

#[test]
fn test_template_beyond_parameters_rejected() {
    let err = FunctionDef::parse("foo(a VARCHAR, b INT)")
        .unwrap()
        .with_translation("bar($$1, $$3)")
        .unwrap_err();

    assert_eq!(
        err,
        DefinitionError::PlaceholderOutOfRange {
            function: "foo".to_string(),
            index: 3,
            parameters: 2,
        }
    );
}

#[test]
fn test_template_on_zero_parameters() {
    assert!(
        FunctionDef::parse("now()")
            .unwrap()
            .with_translation("CURRENT_TIMESTAMP")
            .is_ok()
    );
    assert!(
        FunctionDef::parse("now()")
            .unwrap()
            .with_translation("f($$1)")
            .is_err()
    );
}

#[test]
fn test_malformed_signatures_rejected() {
    for signature in [
        "",
        "foo",
        "foo(",
        "foo(a)",
        "foo(a INT,)",
        "foo(a INT) SMALLINT",
        "foo(a INT) -> ",
        "1foo(a INT)",
        "foo(a INT(x))",
    ] {
        assert!(
            matches!(
                FunctionDef::parse(signature),
                Err(DefinitionError::InvalidSignature { .. })
            ),
            "{signature:?} should be rejected"
        );
    }
}

#[test]
fn test_unknown_type_rejected() {
    let err = FunctionDef::parse("foo(a NUMBER)").unwrap_err();
    assert_eq!(
        err,
        DefinitionError::UnknownType {
            signature: "foo(a NUMBER)".to_string(),
            type_name: "NUMBER".to_string(),
        }
    );

    assert!(matches!(
        FunctionDef::parse("foo(a INT) -> THING"),
        Err(DefinitionError::UnknownType { .. })
    ));
}

#[test]
fn test_duplicate_parameter_rejected() {
    let err = FunctionDef::parse("foo(a INT, A VARCHAR)").unwrap_err();
    assert_eq!(
        err,
        DefinitionError::DuplicateParameter {
            function: "foo".to_string(),
            parameter: "A".to_string(),
        }
    );
}

#[test]
fn test_definition_serialization() {
    let def = FunctionDef::parse("foo(a CHAR(2)) -> POINT")
        .unwrap()
        .with_translation("point($$1)")
        .unwrap()
        .with_description("makes a point");

    let json = serde_json::to_string(&def).unwrap();
    let back: FunctionDef = serde_json::from_str(&json).unwrap();
    assert_eq!(back, def);
    assert_eq!(back.parameters[0].data_type, DataType::Char(Some(2)));
}
