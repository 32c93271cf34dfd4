// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Operands, column references and builtin function calls

use adql_sql_ir::{
    AggregateKind, ColumnLink, ColumnRef, DbTable, Function, IdentifierField, Operand, TableBinding,
};
use tracing::debug;

use super::SqlTranslator;
use crate::dialect::SqlDialect;
use crate::error::{TranslationError, TranslationResult};
use crate::identifier::{correlation_prefix, db_identifier, written_identifier};

impl<D: SqlDialect> SqlTranslator<D> {
    /// Translate an operand
    ///
    /// Operations are fully parenthesized (`(a + b)`, `(-x)`), so the tree
    /// shape is kept whatever the precedence rules of the dialect.
    pub fn translate_operand(&self, operand: &Operand) -> TranslationResult<String> {
        match operand {
            Operand::Numeric(constant) => Ok(constant.value.clone()),
            Operand::String(value) => Ok(format!("'{}'", value.replace('\'', "''"))),
            Operand::Null => Ok("NULL".to_string()),
            Operand::Column(column) => Ok(self.translate_column(column)),
            Operand::Unary { op, operand } => {
                let operand = self.translate_operand(operand)?;
                // `--` would start a line comment
                let separator = if operand.starts_with('-') { " " } else { "" };
                Ok(format!("({}{}{})", op.symbol(), separator, operand))
            }
            Operand::Binary { left, op, right } => Ok(format!(
                "({} {} {})",
                self.translate_operand(left)?,
                op.symbol(),
                self.translate_operand(right)?
            )),
            Operand::Function(function) => self.translate_function(function),
        }
    }

    /// Translate a column reference
    ///
    /// Unlinked columns are written back as in the query. Columns linked to a
    /// table are qualified by the table alias, or by the full DB table name;
    /// NATURAL/USING common columns are never qualified.
    pub fn translate_column(&self, column: &ColumnRef) -> String {
        match &column.link {
            None => column
                .catalog
                .iter()
                .chain(column.schema.iter())
                .chain(column.table.iter())
                .chain(std::iter::once(&column.column))
                .map(written_identifier)
                .collect::<Vec<_>>()
                .join("."),
            Some(ColumnLink::Common { column }) => {
                db_identifier(&self.dialect, &column.db_name, IdentifierField::Column)
            }
            Some(ColumnLink::Table { column, table }) => format!(
                "{}.{}",
                self.table_prefix(table),
                db_identifier(&self.dialect, &column.db_name, IdentifierField::Column)
            ),
        }
    }

    /// Qualifier of the columns of a bound table
    pub(crate) fn table_prefix(&self, binding: &TableBinding) -> String {
        match &binding.alias {
            Some(alias) => correlation_prefix(alias),
            None => self.qualified_table_name(&binding.table),
        }
    }

    /// `[catalog.][schema.]table` with DB names
    pub(crate) fn qualified_table_name(&self, table: &DbTable) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(catalog) = &table.db_catalog {
            parts.push(db_identifier(&self.dialect, catalog, IdentifierField::Catalog));
        }
        if let Some(schema) = &table.db_schema {
            parts.push(db_identifier(&self.dialect, schema, IdentifierField::Schema));
        }
        parts.push(db_identifier(&self.dialect, &table.db_name, IdentifierField::Table));
        parts.join(".")
    }

    /// Translate a function call
    ///
    /// Builtin functions keep their ADQL form (`NAME(a, b)`); geometric
    /// functions and `IN_UNIT` are rendered by the dialect from their
    /// translated arguments.
    pub fn translate_function(&self, function: &Function) -> TranslationResult<String> {
        match function {
            Function::Aggregate {
                kind,
                distinct,
                argument,
            } => {
                let argument = match argument {
                    Some(argument) => self.translate_operand(argument)?,
                    None if *kind == AggregateKind::Count => "*".to_string(),
                    None => {
                        return Err(TranslationError::ArgumentCount {
                            function: kind.name().to_string(),
                            expected: "1".to_string(),
                            found: 0,
                        });
                    }
                };
                let distinct = if *distinct { "DISTINCT " } else { "" };
                Ok(format!("{}({}{})", kind.name(), distinct, argument))
            }
            Function::Math { kind, args } => {
                let (min, max) = kind.arity();
                if args.len() < min || args.len() > max {
                    let expected = if min == max {
                        min.to_string()
                    } else {
                        format!("{min} to {max}")
                    };
                    return Err(TranslationError::ArgumentCount {
                        function: kind.name().to_string(),
                        expected,
                        found: args.len(),
                    });
                }
                Ok(literal_call(kind.name(), &self.translate_operands(args)?))
            }
            Function::String { kind, argument } => Ok(format!(
                "{}({})",
                kind.name(),
                self.translate_operand(argument)?
            )),
            Function::Geometry(geometry) => {
                let args = self.translate_operands(&geometry.args)?;
                self.dialect
                    .translate_geometry(geometry, &args)
                    .inspect_err(|err| {
                        debug!(function = geometry.kind.name(), error = %err, "Geometry hook failed");
                    })
            }
            Function::InUnit(in_unit) => {
                let operand = self.translate_operand(&in_unit.operand)?;
                self.dialect
                    .translate_in_unit(in_unit, &operand)
                    .inspect_err(|err| {
                        debug!(unit = %in_unit.unit, error = %err, "IN_UNIT hook failed");
                    })
            }
            Function::User(udf) => self.translate_user_function(udf),
        }
    }

    pub(crate) fn translate_operands(&self, operands: &[Operand]) -> TranslationResult<Vec<String>> {
        operands
            .iter()
            .map(|operand| self.translate_operand(operand))
            .collect()
    }
}

/// ADQL-literal call syntax: `NAME(arg1, arg2)`
pub(crate) fn literal_call(name: &str, args: &[String]) -> String {
    format!("{}({})", name, args.join(", "))
}
