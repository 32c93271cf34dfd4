// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # ADQL SQL - Translator
//!
//! This crate renders checked ADQL query trees as SQL text for a relational
//! backend.
//!
//! ## Overview
//!
//! The translator is responsible for:
//! - Rendering every clause of a query with the same structure for all backends
//! - Expanding `*` and deduplicating NATURAL/USING join columns
//! - Substituting user-defined function templates
//! - Delegating quoting rules, geometry and type mapping to a dialect
//!
//! ## Translation Process
//!
//! ```text
//! Parser → Checker → Query tree → SqlTranslator<Dialect> → SQL
//! ```
//!
//! Any piece of a query (a WITH clause, a FROM item, an operand, a constraint
//! list) can also be translated on its own.
//!
//! ## Error Handling Strategy
//!
//! Translation is all-or-nothing: the first [`TranslationError`] (for example
//! a geometric function the dialect cannot express) aborts the translation
//! and no partial SQL is returned.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use adql_sql_translator::{PostgreSqlDialect, SqlTranslator};
//!
//! let translator = SqlTranslator::new(PostgreSqlDialect::new());
//!
//! match translator.translate_query(&query) {
//!     Ok(sql) => println!("{sql}"),
//!     Err(e) => eprintln!("Failed to translate: {e}"),
//! }
//! ```

pub mod config;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod identifier;

pub use config::{DialectKind, TranslatorConfig};
pub use dialect::{
    AnsiDialect, LanguageFeature, NativeGeometry, NativeType, PostgreSqlDialect, SqlDialect,
};
pub use engine::SqlTranslator;
pub use error::{ConfigError, GeometryError, GeometryResult, TranslationError, TranslationResult};
pub use identifier::quote_identifier;
