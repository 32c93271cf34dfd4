// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Construction and serialization of checked query trees

use std::sync::Arc;

use adql_sql_ir::{
    BinaryOp, ColumnRef, Constraint, ConstraintList, DataType, DbColumn, DbTable, FromItem,
    Function, FunctionDef, Identifier, Join, JoinCondition, JoinKind, Operand, OrderItem, Query,
    SelectItem, TableRef, UserFunction, WithItem,
};

fn linked_join() -> Query {
    let a = Arc::new(
        DbTable::new("aTable").with_columns(vec![
            DbColumn::new("id").with_type(DataType::Integer),
            DbColumn::new("name").with_type(DataType::VarChar(None)),
        ]),
    );
    let b = Arc::new(DbTable::new("anotherTable").with_columns(vec![
        DbColumn::new("id"),
        DbColumn::new("name"),
    ]));

    let join = Join::new(
        JoinKind::Inner,
        TableRef::named("aTable").with_alias("a").with_link(a.clone()),
        TableRef::named("anotherTable")
            .with_alias("b")
            .with_link(b),
        JoinCondition::Using(vec![Identifier::new("name")]),
    )
    .with_common_columns(vec![a.columns[1].clone()]);

    Query::new(join)
        .with_select_items(vec![
            SelectItem::expr(ColumnRef::new("name").linked_to_common(a.columns[1].clone())),
            SelectItem::aliased(
                Operand::binary(Operand::integer(1), BinaryOp::Add, Operand::number("0xF").unwrap()),
                "total",
            ),
        ])
        .with_where(
            ConstraintList::new(Constraint::equals(Operand::column("id"), Operand::integer(3)))
                .or(Constraint::IsNull {
                    operand: Operand::column("name"),
                    negated: false,
                }),
        )
        .with_order_by(vec![OrderItem::desc(Operand::column("id"))])
        .with_top(10)
        .with_offset(0)
}

#[test]
fn test_query_round_trip() {
    let query = linked_join();
    let json = serde_json::to_string(&query).unwrap();
    let back: Query = serde_json::from_str(&json).unwrap();
    assert_eq!(back, query);
}

#[test]
fn test_nested_with_round_trip() {
    let inner = Query::new(TableRef::named("baz"));
    let item = WithItem::new("Foo", Query::new(TableRef::named("bar")).with_with_items([
        WithItem::new("bar", inner),
    ]))
    .case_sensitive(true);
    let query = Query::new(TableRef::named("Foo")).with_with_items([item]);

    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(json["with"][0]["label"], "Foo");
    assert_eq!(json["with"][0]["label_case_sensitive"], true);

    let back: Query = serde_json::from_value(json).unwrap();
    assert_eq!(back.with[0].query.with[0].label, "bar");
}

#[test]
fn test_join_tables_and_common_columns() {
    let query = linked_join();
    let FromItem::Join(join) = &query.from else {
        panic!("expected a join");
    };
    assert!(join.merges_columns());
    assert_eq!(join.common_columns.len(), 1);
    assert_eq!(query.from.tables().len(), 2);
    assert!(query.from.tables().iter().all(|t| t.link.is_some()));
}

#[test]
fn test_user_function_keeps_definition() {
    let def = Arc::new(
        FunctionDef::parse("foo(a VARCHAR, b INT)")
            .unwrap()
            .with_translation("left($$1, $$2)")
            .unwrap(),
    );
    let call = UserFunction::new("foo", vec![Operand::string("hello"), Operand::integer(1495)])
        .with_definition(def.clone());
    let operand = Operand::from(Function::from(call));

    let Operand::Function(Function::User(udf)) = &operand else {
        panic!("expected a user function");
    };
    assert!(Arc::ptr_eq(udf.definition.as_ref().unwrap(), &def));
    assert_eq!(operand.default_name(), "foo");
}
