// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Translation engine
//!
//! [`SqlTranslator`] walks a checked query tree and emits SQL text. All the
//! structural rendering lives here, split by clause:
//!
//! - `expr`: operands, column references and function calls
//! - `udf`: user-defined functions and their translation templates
//! - `constraint`: WHERE/HAVING/ON conditions
//! - `from`: tables, joins and `*` expansion
//! - `clause`: WITH, SELECT, GROUP BY, ORDER BY and pagination
//!
//! Only the dialect-specific pieces are delegated to the [`SqlDialect`].

mod clause;
mod constraint;
mod expr;
mod from;
mod udf;

use std::sync::Arc;

use adql_sql_function_registry::FunctionRegistry;
use adql_sql_ir::Query;
use tracing::debug;

use crate::dialect::SqlDialect;
use crate::error::TranslationResult;

/// Separator of SELECT, GROUP BY and ORDER BY items
pub(crate) const LIST_SEPARATOR: &str = " , ";

/// Translator of checked query trees into the SQL of one dialect
///
/// The translator holds no mutable state; one instance can translate any
/// number of queries, from any number of threads.
///
/// # Example
///
/// ```rust,ignore
/// use adql_sql_translator::{PostgreSqlDialect, SqlTranslator};
///
/// let translator = SqlTranslator::new(PostgreSqlDialect::new());
/// let sql = translator.translate_query(&query)?;
/// ```
#[derive(Debug, Clone)]
pub struct SqlTranslator<D: SqlDialect> {
    dialect: D,
    registry: Option<Arc<FunctionRegistry>>,
}

impl<D: SqlDialect> SqlTranslator<D> {
    pub fn new(dialect: D) -> Self {
        Self {
            dialect,
            registry: None,
        }
    }

    /// Builder method: resolve unbound user-defined functions in this registry
    pub fn with_registry(mut self, registry: Arc<FunctionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    pub fn registry(&self) -> Option<&FunctionRegistry> {
        self.registry.as_deref()
    }

    /// Translate a whole query
    ///
    /// One clause per line: WITH, SELECT, FROM, WHERE, GROUP BY, HAVING,
    /// ORDER BY, LIMIT, OFFSET.
    pub fn translate_query(&self, query: &Query) -> TranslationResult<String> {
        debug!(
            dialect = self.dialect.name(),
            with_items = query.with.len(),
            "Translating query"
        );

        let mut sql = String::new();

        if !query.with.is_empty() {
            sql.push_str(&self.translate_with_clause(&query.with)?);
            sql.push('\n');
        }

        sql.push_str(&self.translate_select(query)?);

        sql.push_str("\nFROM ");
        sql.push_str(&self.translate_from(&query.from)?);

        if let Some(constraints) = &query.where_clause {
            sql.push_str("\nWHERE ");
            sql.push_str(&self.translate_constraints(constraints)?);
        }

        if !query.group_by.is_empty() {
            sql.push_str("\nGROUP BY ");
            sql.push_str(&self.translate_group_by(&query.group_by)?);
        }

        if let Some(constraints) = &query.having {
            sql.push_str("\nHAVING ");
            sql.push_str(&self.translate_constraints(constraints)?);
        }

        if !query.order_by.is_empty() {
            sql.push_str("\nORDER BY ");
            sql.push_str(&self.translate_order_by(&query.order_by)?);
        }

        sql.push_str(&self.translate_pagination(query));

        Ok(sql)
    }
}
