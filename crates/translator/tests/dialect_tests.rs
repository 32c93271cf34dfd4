// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Dialect hooks seen through whole-query translation

use adql_sql_ir::{
    Constraint, Function, GeometryKind, IdentifierField, Operand, Query, SelectItem, TableRef,
};
use adql_sql_test_utils::{ListingDialect, MockDialect, SqlAssertions, TreeFixtures};
use adql_sql_translator::{PostgreSqlDialect, SqlDialect, SqlTranslator, TranslatorConfig};

fn point(ra: Operand, dec: Operand) -> Operand {
    Function::geometry(GeometryKind::Point, vec![Operand::string("ICRS"), ra, dec]).into()
}

fn circle(x: i64, y: i64, radius: i64) -> Operand {
    Function::geometry(
        GeometryKind::Circle,
        vec![
            Operand::string("ICRS"),
            Operand::integer(x),
            Operand::integer(y),
            Operand::integer(radius),
        ],
    )
    .into()
}

/// `SELECT DISTANCE(...) AS dist FROM stars WHERE CONTAINS(...) = 1`
fn cone_search() -> Query {
    let star = || point(Operand::column("ra"), Operand::column("dec"));
    Query::new(TableRef::named("stars"))
        .with_select_items(vec![SelectItem::aliased(
            Function::geometry(
                GeometryKind::Distance,
                vec![star(), point(Operand::integer(10), Operand::integer(20))],
            ),
            "dist",
        )])
        .with_where(Constraint::equals(
            Function::geometry(GeometryKind::Contains, vec![star(), circle(10, 20, 1)]).into(),
            Operand::integer(1),
        ))
}

#[test]
fn test_postgresql_cone_search() {
    SqlAssertions::assert_sql(
        SqlTranslator::new(PostgreSqlDialect::new()).translate_query(&cone_search()),
        "SELECT (point(ra, dec) <-> point(10, 20)) AS \"dist\"\n\
         FROM stars\n\
         WHERE CASE WHEN point(ra, dec) <@ circle(point(10, 20), 1) THEN 1 ELSE 0 END = 1",
    );
}

#[test]
fn test_postgresql_declines_region() {
    let query = Query::new(TableRef::named("stars")).with_select_items(vec![SelectItem::aliased(
        Function::geometry(GeometryKind::Region, vec![Operand::string("Circle 1 2 3")]),
        "r",
    )]);
    SqlAssertions::assert_unsupported(
        SqlTranslator::new(PostgreSqlDialect::new()).translate_query(&query),
        "REGION",
    );
}

/// Arguments are translated before the call, so the innermost function fails
#[test]
fn test_mock_geometry_failure_propagates() {
    SqlAssertions::assert_unsupported(
        SqlTranslator::new(MockDialect::new()).translate_query(&cone_search()),
        "POINT",
    );
}

#[test]
fn test_mock_failure_inside_with_item() {
    let query = Query::new(TableRef::named("cone"))
        .with_with_items(vec![adql_sql_ir::WithItem::new("cone", cone_search())]);
    SqlAssertions::assert_unsupported(
        SqlTranslator::new(MockDialect::new()).translate_query(&query),
        "POINT",
    );
}

#[test]
fn test_mock_declines_in_unit() {
    let query = Query::new(TableRef::named("stars")).with_select_items(vec![SelectItem::aliased(
        Function::in_unit(Operand::column("dist"), "arcsec"),
        "d",
    )]);
    SqlAssertions::assert_unsupported(
        SqlTranslator::new(MockDialect::new()).translate_query(&query),
        "IN_UNIT",
    );
}

#[test]
fn test_listing_dialect_writes_adql_geometry() {
    SqlAssertions::assert_sql(
        SqlTranslator::new(ListingDialect::new()).translate_query(&cone_search()),
        "SELECT DISTANCE(POINT('ICRS', ra, dec), POINT('ICRS', 10, 20)) AS \"dist\"\n\
         FROM stars\n\
         WHERE CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', 10, 20, 1)) = 1",
    );
}

#[test]
fn test_case_sensitive_db_names_are_quoted() {
    let dialect = MockDialect::new()
        .with_case_sensitive(IdentifierField::Table)
        .with_case_sensitive(IdentifierField::Column);
    let translator = SqlTranslator::new(dialect);
    let query = TreeFixtures::natural_join_query();

    SqlAssertions::assert_sql(
        translator.translate_from(&query.from),
        "\"aTable\" AS \"a\" NATURAL INNER JOIN \"anotherTable\" AS \"b\" ",
    );
    SqlAssertions::assert_sql(
        translator.translate_select(&query),
        "SELECT \"id\" AS \"id\" , \"name\" AS \"name\" , a.\"aColumn\" AS \"acolumn\" , \
         b.\"anotherColumn\" AS \"anothercolumn\"",
    );
}

#[test]
fn test_configured_dialect_translates() {
    let config = TranslatorConfig::from_yaml_str("dialect: postgresql").unwrap();
    let translator = config.build_translator().unwrap();
    assert_eq!(translator.dialect().name(), PostgreSqlDialect::NAME);
    assert!(translator.translate_query(&cone_search()).is_ok());

    let ansi = TranslatorConfig::from_yaml_str("dialect: ansi")
        .unwrap()
        .build_translator()
        .unwrap();
    SqlAssertions::assert_unsupported(ansi.translate_query(&cone_search()), "POINT");
}
