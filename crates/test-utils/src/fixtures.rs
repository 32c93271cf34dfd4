// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Table metadata fixtures and linked query trees
//!
//! Two tables share the `id` and `name` columns:
//!
//! ```text
//! aTable        (id, name, aColumn)        aliased "a"
//! anotherTable  (id, name, anotherColumn)  aliased "b"
//! ```

use std::sync::Arc;

use adql_sql_ir::{
    ColumnRef, DataType, DbColumn, DbTable, Identifier, Join, JoinCondition, JoinKind, Query,
    SelectItem, TableBinding, TableRef,
};

/// Sample metadata and query trees for testing
pub struct TreeFixtures;

impl TreeFixtures {
    // ===== Metadata =====

    pub fn a_table() -> Arc<DbTable> {
        Arc::new(DbTable::new("aTable").with_columns(vec![
            Self::id_column(),
            Self::name_column(),
            DbColumn::new("aColumn").with_type(DataType::VarChar(None)),
        ]))
    }

    pub fn another_table() -> Arc<DbTable> {
        Arc::new(DbTable::new("anotherTable").with_columns(vec![
            Self::id_column(),
            Self::name_column(),
            DbColumn::new("anotherColumn").with_type(DataType::VarChar(None)),
        ]))
    }

    pub fn id_column() -> DbColumn {
        DbColumn::new("id").with_type(DataType::Integer)
    }

    pub fn name_column() -> DbColumn {
        DbColumn::new("name").with_type(DataType::VarChar(None))
    }

    // ===== FROM items =====

    /// `aTable AS a`, linked
    pub fn a_ref() -> TableRef {
        TableRef::named("aTable")
            .with_alias("a")
            .with_link(Self::a_table())
    }

    /// `anotherTable AS b`, linked
    pub fn another_ref() -> TableRef {
        TableRef::named("anotherTable")
            .with_alias("b")
            .with_link(Self::another_table())
    }

    pub fn a_binding() -> TableBinding {
        TableBinding::new(Self::a_table()).with_alias("a")
    }

    pub fn another_binding() -> TableBinding {
        TableBinding::new(Self::another_table()).with_alias("b")
    }

    /// `aTable AS a NATURAL INNER JOIN anotherTable AS b`, merging id and name
    pub fn natural_join() -> Join {
        Join::new(
            JoinKind::Inner,
            Self::a_ref(),
            Self::another_ref(),
            JoinCondition::Natural,
        )
        .with_common_columns(vec![Self::id_column(), Self::name_column()])
    }

    /// `aTable AS a INNER JOIN anotherTable AS b USING (name)`
    pub fn using_join() -> Join {
        Join::new(
            JoinKind::Inner,
            Self::a_ref(),
            Self::another_ref(),
            JoinCondition::Using(vec![Identifier::new("name")]),
        )
        .with_common_columns(vec![Self::name_column()])
    }

    // ===== SELECT lists =====

    /// `id, name, a.aColumn, b.anotherColumn` over the NATURAL join
    pub fn natural_join_columns() -> Vec<SelectItem> {
        vec![
            Self::common("id", Self::id_column()),
            Self::common("name", Self::name_column()),
            Self::qualified("a", "aColumn", Self::a_binding()),
            Self::qualified("b", "anotherColumn", Self::another_binding()),
        ]
    }

    /// `b.id, name, a.aColumn, b.anotherColumn` over the USING join
    pub fn using_join_columns() -> Vec<SelectItem> {
        vec![
            Self::qualified("b", "id", Self::another_binding()),
            Self::common("name", Self::name_column()),
            Self::qualified("a", "aColumn", Self::a_binding()),
            Self::qualified("b", "anotherColumn", Self::another_binding()),
        ]
    }

    pub fn natural_join_query() -> Query {
        Query::new(Self::natural_join()).with_select_items(Self::natural_join_columns())
    }

    pub fn using_join_query() -> Query {
        Query::new(Self::using_join()).with_select_items(Self::using_join_columns())
    }

    // ===== Serialized trees =====

    /// Deserialize a query tree, panicking on invalid JSON
    pub fn query_from_json(json: &str) -> Query {
        serde_json::from_str(json)
            .unwrap_or_else(|err| panic!("Invalid query tree: {}\n{}", err, json))
    }

    fn common(name: &str, column: DbColumn) -> SelectItem {
        SelectItem::expr(ColumnRef::new(name).linked_to_common(column))
    }

    fn qualified(table: &str, name: &str, binding: TableBinding) -> SelectItem {
        let column = binding
            .table
            .get_column(name)
            .cloned()
            .unwrap_or_else(|| DbColumn::new(name));
        SelectItem::expr(ColumnRef::new(name).with_table(table).linked_to(column, binding))
    }
}
