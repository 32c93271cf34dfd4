// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # ADQL SQL - Query Tree
//!
//! This crate provides the checked query tree consumed by the ADQL to SQL
//! translator. The tree is designed to:
//! - Be produced once by the (external) parser and checker, then only read
//! - Carry the checker's resolved metadata (tables, columns, join common columns)
//! - Keep operand and function kinds closed, so every dialect match is exhaustive
//! - Serialize with serde, so checked trees can be stored and replayed
//!
//! User-defined function definitions ([`FunctionDef`]) and their SQL
//! translation templates ([`TranslationTemplate`]) also live here: a function
//! call node holds its definition by reference, and any malformed definition
//! is rejected with a [`DefinitionError`] before translation begins.

pub mod error;
pub mod expr;
pub mod function;
pub mod identifier;
pub mod metadata;
pub mod query;
pub mod region;
pub mod signature;
pub mod template;

// Re-export commonly used types
pub use error::{DefinitionError, DefinitionResult};
pub use expr::{
    BinaryOp, ColumnLink, ColumnRef, ComparisonOp, Connector, Constraint, ConstraintList,
    InValues, NumericConstant, Operand, TableBinding, UnaryOp,
};
pub use function::{
    AggregateKind, Function, GeometryFunction, GeometryKind, InUnitFunction, MathKind,
    StringKind, UserFunction,
};
pub use identifier::{Identifier, IdentifierField};
pub use metadata::{DataType, DbColumn, DbTable};
pub use query::{
    FromItem, Join, JoinCondition, JoinKind, OrderItem, OrderTarget, Query, SelectClause,
    SelectItem, SortDirection, TableName, TableRef, TableSource, WithItem,
};
pub use region::{Coordinates, Region};
pub use signature::{FunctionDef, FunctionParameter};
pub use template::{TemplateSegment, TranslationTemplate, PLACEHOLDER_MARKER};
