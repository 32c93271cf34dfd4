// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! FROM clause: tables, joins and `*` expansion
//!
//! ## Joins
//!
//! ```text
//! <left>[ NATURAL] <KIND> <right> [ON <constraints> | USING (<columns>)]
//! ```
//!
//! The right operand is always followed by a space, so a NATURAL or CROSS
//! join ends with a single trailing space.
//!
//! ## Column expansion
//!
//! When every table of the FROM clause carries metadata, `*` is expanded to
//! the explicit column list. Across a NATURAL or USING join the common
//! columns come first and unqualified, followed by the remaining columns of
//! the left then the right side.

use adql_sql_ir::{
    DbColumn, FromItem, IdentifierField, JoinCondition, TableBinding, TableRef, TableSource,
};

use super::SqlTranslator;
use crate::dialect::SqlDialect;
use crate::error::{TranslationError, TranslationResult};
use crate::identifier::{alias_identifier, db_identifier, written_identifier};

/// One column of an expanded `*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExpandedColumn {
    pub adql_name: String,
    pub sql: String,
}

impl<D: SqlDialect> SqlTranslator<D> {
    /// Translate the content of a FROM clause
    pub fn translate_from(&self, from: &FromItem) -> TranslationResult<String> {
        match from {
            FromItem::Table(table) => self.translate_table(table),
            FromItem::Join(join) => {
                let mut sql = self.translate_from(&join.left)?;
                if matches!(join.condition, JoinCondition::Natural) {
                    sql.push_str(" NATURAL");
                }
                sql.push(' ');
                sql.push_str(join.kind.keyword());
                sql.push(' ');
                sql.push_str(&self.translate_from(&join.right)?);
                sql.push(' ');

                match &join.condition {
                    JoinCondition::On(constraints) => {
                        sql.push_str("ON ");
                        sql.push_str(&self.translate_constraints(constraints)?);
                    }
                    JoinCondition::Using(columns) => {
                        if columns.is_empty() {
                            return Err(TranslationError::malformed(
                                "USING join without any column",
                            ));
                        }
                        let columns: Vec<String> =
                            columns.iter().map(written_identifier).collect();
                        sql.push_str(&format!("USING ({})", columns.join(", ")));
                    }
                    JoinCondition::Natural | JoinCondition::None => {}
                }
                Ok(sql)
            }
        }
    }

    /// Translate one table of the FROM clause, with its alias
    pub fn translate_table(&self, table: &TableRef) -> TranslationResult<String> {
        let mut sql = match (&table.source, &table.link) {
            (TableSource::SubQuery(query), _) => format!("({})", self.translate_query(query)?),
            (TableSource::Named(_), Some(db_table)) => self.qualified_table_name(db_table),
            (TableSource::Named(name), None) => name
                .parts()
                .map(written_identifier)
                .collect::<Vec<_>>()
                .join("."),
        };

        if let Some(alias) = &table.alias {
            sql.push_str(" AS ");
            sql.push_str(&alias_identifier(&alias.name, alias.case_sensitive));
        }
        Ok(sql)
    }

    /// Columns `*` stands for, or `None` if a table has no metadata
    pub(crate) fn expand_all_columns(&self, from: &FromItem) -> Option<Vec<ExpandedColumn>> {
        match from {
            FromItem::Table(table) => {
                let binding = table.binding()?;
                Some(self.expand_table_columns(&binding))
            }
            FromItem::Join(join) => {
                let left = self.expand_all_columns(&join.left)?;
                let right = self.expand_all_columns(&join.right)?;

                if !join.merges_columns() {
                    return Some(left.into_iter().chain(right).collect());
                }

                let is_common = |column: &ExpandedColumn| {
                    join.common_columns
                        .iter()
                        .any(|common| common.adql_name.eq_ignore_ascii_case(&column.adql_name))
                };

                let mut columns: Vec<ExpandedColumn> = join
                    .common_columns
                    .iter()
                    .map(|common| self.common_column(common))
                    .collect();
                columns.extend(left.into_iter().filter(|c| !is_common(c)));
                columns.extend(right.into_iter().filter(|c| !is_common(c)));
                Some(columns)
            }
        }
    }

    /// Columns `t.*` stands for
    pub(crate) fn expand_table_columns(&self, binding: &TableBinding) -> Vec<ExpandedColumn> {
        let prefix = self.table_prefix(binding);
        binding
            .table
            .columns
            .iter()
            .map(|column| ExpandedColumn {
                adql_name: column.adql_name.clone(),
                sql: format!(
                    "{}.{}",
                    prefix,
                    db_identifier(&self.dialect, &column.db_name, IdentifierField::Column)
                ),
            })
            .collect()
    }

    fn common_column(&self, column: &DbColumn) -> ExpandedColumn {
        ExpandedColumn {
            adql_name: column.adql_name.clone(),
            sql: db_identifier(&self.dialect, &column.db_name, IdentifierField::Column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::AnsiDialect;
    use adql_sql_ir::{
        ColumnRef, Constraint, ConstraintList, DbTable, Identifier, Join, JoinKind, Operand, Query,
    };
    use std::sync::Arc;

    fn translator() -> SqlTranslator<AnsiDialect> {
        SqlTranslator::new(AnsiDialect::new())
    }

    #[test]
    fn test_table_forms() {
        let t = translator();
        assert_eq!(t.translate_table(&TableRef::named("foo")).unwrap(), "foo");
        assert_eq!(
            t.translate_table(&TableRef::named("aTable").with_alias("A")).unwrap(),
            "aTable AS \"a\""
        );
        assert_eq!(
            t.translate_table(&TableRef::named("aTable").with_alias(Identifier::quoted("A")))
                .unwrap(),
            "aTable AS \"A\""
        );

        let linked = TableRef::named("aTable").with_link(Arc::new(
            DbTable::new("aTable").with_db_name("a_table").with_schema("data"),
        ));
        assert_eq!(t.translate_table(&linked).unwrap(), "data.a_table");

        let sub = TableRef::subquery(Query::new(TableRef::named("bar"))).with_alias("s");
        assert_eq!(
            t.translate_table(&sub).unwrap(),
            "(SELECT *\nFROM bar) AS \"s\""
        );
    }

    #[test]
    fn test_join_forms() {
        let t = translator();
        let on = Join::new(
            JoinKind::Inner,
            TableRef::named("foo"),
            TableRef::named("foo2"),
            JoinCondition::On(ConstraintList::new(Constraint::equals(
                Operand::from(ColumnRef::new("id").with_table("foo")),
                Operand::from(ColumnRef::new("myCol").with_table("foo2")),
            ))),
        );
        assert_eq!(
            t.translate_from(&on.into()).unwrap(),
            "foo INNER JOIN foo2 ON foo.id = foo2.myCol"
        );

        let cross = Join::new(
            JoinKind::Cross,
            TableRef::named("a"),
            TableRef::named("b"),
            JoinCondition::None,
        );
        assert_eq!(t.translate_from(&cross.into()).unwrap(), "a CROSS JOIN b ");

        let natural_left = Join::new(
            JoinKind::LeftOuter,
            TableRef::named("a"),
            TableRef::named("b"),
            JoinCondition::Natural,
        );
        assert_eq!(
            t.translate_from(&natural_left.into()).unwrap(),
            "a NATURAL LEFT OUTER JOIN b "
        );
    }

    #[test]
    fn test_empty_using_is_malformed() {
        let join = Join::new(
            JoinKind::Inner,
            TableRef::named("a"),
            TableRef::named("b"),
            JoinCondition::Using(vec![]),
        );
        assert!(matches!(
            translator().translate_from(&join.into()),
            Err(TranslationError::MalformedTree { .. })
        ));
    }

    #[test]
    fn test_expansion_requires_metadata() {
        let t = translator();
        let linked = TableRef::named("t")
            .with_link(Arc::new(DbTable::new("t").with_columns(vec![DbColumn::new("x")])));
        let join = Join::new(
            JoinKind::Cross,
            linked.clone(),
            TableRef::named("u"),
            JoinCondition::None,
        );

        assert!(t.expand_all_columns(&join.into()).is_none());

        let columns = t.expand_all_columns(&linked.into()).unwrap();
        assert_eq!(
            columns,
            vec![ExpandedColumn {
                adql_name: "x".to_string(),
                sql: "t.x".to_string(),
            }]
        );
    }
}
