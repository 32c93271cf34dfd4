// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! WITH, SELECT, GROUP BY, ORDER BY and pagination

use adql_sql_ir::{
    ColumnLink, IdentifierField, OrderItem, OrderTarget, Operand, Query, SelectItem, WithItem,
};
use tracing::trace;

use super::{LIST_SEPARATOR, SqlTranslator};
use crate::dialect::SqlDialect;
use crate::error::{TranslationError, TranslationResult};
use crate::identifier::{alias_identifier, quote_identifier, written_identifier};

impl<D: SqlDialect> SqlTranslator<D> {
    /// Translate a WITH clause
    ///
    /// Always starts with `WITH `, even when there is no item; items are
    /// separated by ` , ` in declaration order.
    pub fn translate_with_clause(&self, items: &[WithItem]) -> TranslationResult<String> {
        let items = items
            .iter()
            .map(|item| self.translate_with_item(item))
            .collect::<TranslationResult<Vec<_>>>()?;
        Ok(format!("WITH {}", items.join(LIST_SEPARATOR)))
    }

    /// Translate one WITH item: `"label" AS (\n<query>\n)`
    pub fn translate_with_item(&self, item: &WithItem) -> TranslationResult<String> {
        Ok(format!(
            "{} AS (\n{}\n)",
            alias_identifier(&item.label, item.label_case_sensitive),
            self.translate_query(&item.query)?
        ))
    }

    /// Translate the SELECT line of a query
    ///
    /// Needs the whole query: `*` is expanded from the FROM clause.
    pub fn translate_select(&self, query: &Query) -> TranslationResult<String> {
        let select = &query.select;
        if select.items.is_empty() {
            return Err(TranslationError::malformed("SELECT clause without any item"));
        }

        let mut items = Vec::with_capacity(select.items.len());
        for item in &select.items {
            match item {
                SelectItem::AllColumns => match self.expand_all_columns(&query.from) {
                    Some(columns) if !columns.is_empty() => {
                        trace!(columns = columns.len(), "Expanded *");
                        items.extend(
                            columns
                                .into_iter()
                                .map(|column| self.aliased(column.sql, &column.adql_name)),
                        );
                    }
                    _ => items.push("*".to_string()),
                },
                SelectItem::TableColumns { table, binding } => match binding {
                    Some(binding) if !binding.table.columns.is_empty() => items.extend(
                        self.expand_table_columns(binding)
                            .into_iter()
                            .map(|column| self.aliased(column.sql, &column.adql_name)),
                    ),
                    _ => {
                        let path: Vec<String> = table.parts().map(written_identifier).collect();
                        items.push(format!("{}.*", path.join(".")));
                    }
                },
                SelectItem::Expr { operand, alias } => {
                    let alias = match alias {
                        Some(alias) => alias_identifier(&alias.name, alias.case_sensitive),
                        None => self.default_alias(operand),
                    };
                    items.push(format!("{} AS {}", self.translate_operand(operand)?, alias));
                }
            }
        }

        let distinct = if select.distinct { "DISTINCT " } else { "" };
        Ok(format!("SELECT {}{}", distinct, items.join(LIST_SEPARATOR)))
    }

    /// Alias of a selected operand written without `AS`
    ///
    /// Linked columns use their ADQL name, lower-cased unless written
    /// case-sensitive or unless the dialect keeps alias case. Anything else
    /// uses its name as written.
    fn default_alias(&self, operand: &Operand) -> String {
        if let Operand::Column(column) = operand {
            if let Some(link) = &column.link {
                let case_sensitive = column.column.case_sensitive
                    || self.dialect.is_case_sensitive(IdentifierField::Alias);
                let name = match link {
                    ColumnLink::Table { column, .. } | ColumnLink::Common { column } => {
                        &column.adql_name
                    }
                };
                return alias_identifier(name, case_sensitive);
            }
        }
        quote_identifier(&operand.default_name())
    }

    fn aliased(&self, sql: String, adql_name: &str) -> String {
        let case_sensitive = self.dialect.is_case_sensitive(IdentifierField::Alias);
        format!("{} AS {}", sql, alias_identifier(adql_name, case_sensitive))
    }

    /// Translate GROUP BY operands
    pub fn translate_group_by(&self, operands: &[Operand]) -> TranslationResult<String> {
        Ok(self.translate_operands(operands)?.join(LIST_SEPARATOR))
    }

    /// Translate ORDER BY items: `<expr|position> ASC|DESC`
    pub fn translate_order_by(&self, items: &[OrderItem]) -> TranslationResult<String> {
        let items = items
            .iter()
            .map(|item| {
                let target = match &item.target {
                    OrderTarget::Expr(operand) => self.translate_operand(operand)?,
                    OrderTarget::Position(0) => {
                        return Err(TranslationError::malformed(
                            "ORDER BY positions start at 1",
                        ));
                    }
                    OrderTarget::Position(position) => position.to_string(),
                };
                Ok(format!("{} {}", target, item.direction.keyword()))
            })
            .collect::<TranslationResult<Vec<_>>>()?;
        Ok(items.join(LIST_SEPARATOR))
    }

    /// `LIMIT` and `OFFSET` lines, each preceded by a line break
    ///
    /// An explicit `OFFSET 0` is kept.
    pub fn translate_pagination(&self, query: &Query) -> String {
        let mut sql = String::new();
        if let Some(top) = query.select.top {
            sql.push_str(&format!("\nLIMIT {top}"));
        }
        if let Some(offset) = query.offset {
            sql.push_str(&format!("\nOFFSET {offset}"));
        }
        sql
    }
}
