// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Identifier quoting and case folding
//!
//! Three sources decide whether a name is quoted:
//!
//! - names written in the query keep their own marker (double-quoted in ADQL
//!   means quoted in SQL)
//! - DB names from metadata are quoted when the dialect declares that kind of
//!   identifier case-sensitive
//! - aliases are always quoted, lower-cased unless written case-sensitive

use adql_sql_ir::{Identifier, IdentifierField};

use crate::dialect::SqlDialect;

/// Wrap a name in double quotes, doubling any embedded double quote
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// A name written in the query
pub fn written_identifier(identifier: &Identifier) -> String {
    if identifier.case_sensitive {
        quote_identifier(&identifier.name)
    } else {
        identifier.name.clone()
    }
}

/// A name coming from metadata
pub fn db_identifier<D: SqlDialect + ?Sized>(
    dialect: &D,
    name: &str,
    field: IdentifierField,
) -> String {
    if dialect.is_case_sensitive(field) {
        quote_identifier(name)
    } else {
        name.to_string()
    }
}

/// A quoted alias: verbatim when case-sensitive, lower-cased otherwise
pub fn alias_identifier(name: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        quote_identifier(name)
    } else {
        quote_identifier(&name.to_lowercase())
    }
}

/// Prefix of a column of an aliased table: `a`, or `"A"` when the alias was
/// written case-sensitive
pub fn correlation_prefix(alias: &Identifier) -> String {
    if alias.case_sensitive {
        quote_identifier(&alias.name)
    } else {
        alias.name.to_lowercase()
    }
}
