// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Operands and constraints
//!
//! This module represents ADQL value expressions ([`Operand`]) and search
//! conditions ([`Constraint`], [`ConstraintList`]).
//!
//! ## Operands
//!
//! [`Operand`] is a closed sum type:
//!
//! - **Numeric constants**: canonical decimal value plus the source text
//! - **String constants**: the unescaped value
//! - **NULL**
//! - **Column references**: written path plus the checker's link
//! - **Unary/Binary operations**: arithmetic, bitwise and concatenation
//! - **Function calls**: see [`crate::Function`]
//!
//! Operations form a tree; there is no precedence information in the tree
//! itself, the shape *is* the precedence:
//!
//! ```text
//! Binary {
//!   left: Column(price),
//!   op: Mul,
//!   right: Binary { left: Numeric(1.1), op: Add, right: Numeric(0.5) }
//! }
//! ```
//!
//! Represents: `price * (1.1 + 0.5)`
//!
//! ## Column links
//!
//! The checker resolves a column reference to either a column of one table
//! ([`ColumnLink::Table`]) or to a column shared by both sides of a NATURAL or
//! USING join ([`ColumnLink::Common`]). Unlinked references are translated as
//! written.
//!
//! ## Constraints
//!
//! A [`ConstraintList`] is a first constraint followed by `AND`/`OR`-connected
//! ones. Parenthesized groups are [`Constraint::Group`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{DefinitionError, DefinitionResult};
use crate::function::Function;
use crate::identifier::Identifier;
use crate::metadata::{DbColumn, DbTable};
use crate::query::Query;

/// A value expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Numeric(NumericConstant),
    String(String),
    Null,
    Column(ColumnRef),
    Unary {
        op: UnaryOp,
        operand: Box<Operand>,
    },
    Binary {
        left: Box<Operand>,
        op: BinaryOp,
        right: Box<Operand>,
    },
    Function(Function),
}

impl Operand {
    /// Numeric constant read from ADQL text (decimal or hexadecimal)
    pub fn number(text: &str) -> DefinitionResult<Self> {
        NumericConstant::parse(text).map(Operand::Numeric)
    }

    /// Integer constant
    pub fn integer(value: i64) -> Self {
        Operand::Numeric(NumericConstant::from_i64(value))
    }

    /// String constant
    pub fn string(value: impl Into<String>) -> Self {
        Operand::String(value.into())
    }

    /// Unqualified, unlinked column reference
    pub fn column(name: impl Into<Identifier>) -> Self {
        Operand::Column(ColumnRef::new(name))
    }

    pub fn unary(op: UnaryOp, operand: Operand) -> Self {
        Operand::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Operand, op: BinaryOp, right: Operand) -> Self {
        Operand::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Name of the operand as written, used when no alias is given
    ///
    /// Column name for columns, source text for numbers, function name for
    /// calls and operator symbol for operations.
    pub fn default_name(&self) -> String {
        match self {
            Operand::Numeric(constant) => constant.source.clone(),
            Operand::String(value) => value.clone(),
            Operand::Null => "NULL".to_string(),
            Operand::Column(column) => column.column.name.clone(),
            Operand::Unary { op, .. } => op.symbol().to_string(),
            Operand::Binary { op, .. } => op.symbol().to_string(),
            Operand::Function(function) => function.name().to_string(),
        }
    }
}

impl From<ColumnRef> for Operand {
    fn from(column: ColumnRef) -> Self {
        Operand::Column(column)
    }
}

impl From<Function> for Operand {
    fn from(function: Function) -> Self {
        Operand::Function(function)
    }
}

impl From<NumericConstant> for Operand {
    fn from(constant: NumericConstant) -> Self {
        Operand::Numeric(constant)
    }
}

/// A numeric literal
///
/// `value` is the canonical decimal text emitted in SQL; `source` is the
/// literal as written (without a leading sign).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericConstant {
    pub value: String,
    pub source: String,
}

impl NumericConstant {
    /// Read a decimal (`12`, `1.5e3`) or hexadecimal (`0xF`) literal
    ///
    /// A leading sign is folded into the value: `-0xF` has value `-15`.
    pub fn parse(text: &str) -> DefinitionResult<Self> {
        let trimmed = text.trim();
        let invalid = || DefinitionError::InvalidNumber(text.to_string());

        let (sign, literal) = match trimmed.as_bytes().first() {
            Some(b'-') => ("-", &trimmed[1..]),
            Some(b'+') => ("", &trimmed[1..]),
            _ => ("", trimmed),
        };

        let digits = literal
            .strip_prefix("0x")
            .or_else(|| literal.strip_prefix("0X"));

        let magnitude = match digits {
            Some(hex) => {
                if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(invalid());
                }
                u128::from_str_radix(hex, 16)
                    .map_err(|_| invalid())?
                    .to_string()
            }
            None => {
                if !is_decimal_literal(literal) {
                    return Err(invalid());
                }
                literal.to_string()
            }
        };

        let value = if sign == "-" && magnitude.trim_start_matches(['0', '.']).is_empty() {
            magnitude
        } else {
            format!("{sign}{magnitude}")
        };

        Ok(Self {
            value,
            source: literal.to_string(),
        })
    }

    pub fn from_i64(value: i64) -> Self {
        Self {
            value: value.to_string(),
            source: value.unsigned_abs().to_string(),
        }
    }

    pub fn from_f64(value: f64) -> Self {
        Self {
            value: value.to_string(),
            source: value.abs().to_string(),
        }
    }
}

/// `digits[.digits][(e|E)[+-]digits]`, at least one digit in the mantissa
fn is_decimal_literal(text: &str) -> bool {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(pos) => (&text[..pos], Some(&text[pos + 1..])),
        None => (text, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if integer.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(integer) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Concat,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Concat => "||",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    BitNot,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::BitNot => "~",
        }
    }
}

/// A table as bound by the checker: its metadata and the alias it was given
/// in the FROM clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBinding {
    pub table: Arc<DbTable>,
    pub alias: Option<Identifier>,
}

impl TableBinding {
    pub fn new(table: Arc<DbTable>) -> Self {
        Self { table, alias: None }
    }

    pub fn with_alias(mut self, alias: impl Into<Identifier>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Resolution of a column reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnLink {
    /// A column of one table of the FROM clause
    Table {
        column: DbColumn,
        table: TableBinding,
    },
    /// A column shared by both sides of a NATURAL or USING join
    Common { column: DbColumn },
}

impl ColumnLink {
    pub fn column(&self) -> &DbColumn {
        match self {
            ColumnLink::Table { column, .. } | ColumnLink::Common { column } => column,
        }
    }
}

/// A column reference as written, with its optional resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub catalog: Option<Identifier>,
    pub schema: Option<Identifier>,
    pub table: Option<Identifier>,
    pub column: Identifier,
    pub link: Option<ColumnLink>,
}

impl ColumnRef {
    pub fn new(column: impl Into<Identifier>) -> Self {
        Self {
            catalog: None,
            schema: None,
            table: None,
            column: column.into(),
            link: None,
        }
    }

    /// Builder method: set the written table qualifier
    pub fn with_table(mut self, table: impl Into<Identifier>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Builder method: set the written schema qualifier
    pub fn with_schema(mut self, schema: impl Into<Identifier>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Builder method: set the written catalog qualifier
    pub fn with_catalog(mut self, catalog: impl Into<Identifier>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Builder method: link to a column of a bound table
    pub fn linked_to(mut self, column: DbColumn, table: TableBinding) -> Self {
        self.link = Some(ColumnLink::Table { column, table });
        self
    }

    /// Builder method: link to a NATURAL/USING common column
    pub fn linked_to_common(mut self, column: DbColumn) -> Self {
        self.link = Some(ColumnLink::Common { column });
        self
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
    ILike,
    NotILike,
}

impl ComparisonOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::LtEq => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::GtEq => ">=",
            ComparisonOp::Like => "LIKE",
            ComparisonOp::NotLike => "NOT LIKE",
            ComparisonOp::ILike => "ILIKE",
            ComparisonOp::NotILike => "NOT ILIKE",
        }
    }
}

/// Right-hand side of an IN constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InValues {
    List(Vec<Operand>),
    SubQuery(Box<Query>),
}

/// A search condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    Comparison {
        left: Operand,
        op: ComparisonOp,
        right: Operand,
    },
    Between {
        operand: Operand,
        low: Operand,
        high: Operand,
        negated: bool,
    },
    IsNull {
        operand: Operand,
        negated: bool,
    },
    In {
        operand: Operand,
        values: InValues,
        negated: bool,
    },
    Exists(Box<Query>),
    Not(Box<Constraint>),
    Group(ConstraintList),
}

impl Constraint {
    pub fn comparison(left: Operand, op: ComparisonOp, right: Operand) -> Self {
        Constraint::Comparison { left, op, right }
    }

    pub fn equals(left: Operand, right: Operand) -> Self {
        Self::comparison(left, ComparisonOp::Eq, right)
    }
}

/// Logical connector between two constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    pub fn keyword(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// A non-empty list of constraints joined by AND/OR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintList {
    pub first: Box<Constraint>,
    pub rest: Vec<(Connector, Constraint)>,
}

impl ConstraintList {
    pub fn new(first: Constraint) -> Self {
        Self {
            first: Box::new(first),
            rest: Vec::new(),
        }
    }

    pub fn and(mut self, constraint: Constraint) -> Self {
        self.rest.push((Connector::And, constraint));
        self
    }

    pub fn or(mut self, constraint: Constraint) -> Self {
        self.rest.push((Connector::Or, constraint));
        self
    }

    /// Constraints in order, each with the connector that precedes it
    pub fn iter(&self) -> impl Iterator<Item = (Option<Connector>, &Constraint)> {
        std::iter::once((None, self.first.as_ref()))
            .chain(self.rest.iter().map(|(connector, c)| (Some(*connector), c)))
    }
}

impl From<Constraint> for ConstraintList {
    fn from(constraint: Constraint) -> Self {
        ConstraintList::new(constraint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        let constant = NumericConstant::parse("12.5e-3").unwrap();
        assert_eq!(constant.value, "12.5e-3");
        assert_eq!(constant.source, "12.5e-3");

        assert!(NumericConstant::parse(".5").is_ok());
        assert!(NumericConstant::parse("5.").is_ok());
    }

    #[test]
    fn test_parse_hexadecimal() {
        let constant = NumericConstant::parse("0xF").unwrap();
        assert_eq!(constant.value, "15");
        assert_eq!(constant.source, "0xF");

        let negated = NumericConstant::parse("-0xF").unwrap();
        assert_eq!(negated.value, "-15");
        assert_eq!(negated.source, "0xF");
    }

    #[test]
    fn test_parse_negative_zero() {
        assert_eq!(NumericConstant::parse("-0x0").unwrap().value, "0");
    }

    #[test]
    fn test_parse_invalid() {
        for text in ["", "-", "0x", "0xG1", "0x+1", "1.2.3", "abc", "1e", "inf", "."] {
            assert_eq!(
                NumericConstant::parse(text),
                Err(DefinitionError::InvalidNumber(text.to_string())),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_default_names() {
        assert_eq!(Operand::number("0x1F").unwrap().default_name(), "0x1F");
        assert_eq!(Operand::Null.default_name(), "NULL");
        assert_eq!(Operand::column("myCol").default_name(), "myCol");
        assert_eq!(
            Operand::binary(Operand::integer(1), BinaryOp::Concat, Operand::integer(2))
                .default_name(),
            "||"
        );
        assert_eq!(
            Operand::unary(UnaryOp::BitNot, Operand::integer(1)).default_name(),
            "~"
        );
    }

    #[test]
    fn test_column_link() {
        let table = Arc::new(DbTable::new("aTable"));
        let column = ColumnRef::new("id")
            .with_table("a")
            .linked_to(DbColumn::new("id"), TableBinding::new(table).with_alias("a"));

        assert_eq!(column.link.as_ref().unwrap().column().db_name, "id");
        assert_eq!(column.table.as_ref().unwrap().name, "a");
    }

    #[test]
    fn test_constraint_list_builder() {
        let list = ConstraintList::new(Constraint::equals(Operand::column("a"), Operand::integer(1)))
            .and(Constraint::IsNull {
                operand: Operand::column("b"),
                negated: true,
            })
            .or(Constraint::Not(Box::new(Constraint::equals(
                Operand::column("c"),
                Operand::Null,
            ))));

        assert_eq!(list.iter().count(), 3);
        assert_eq!(list.rest[0].0, Connector::And);
        assert_eq!(list.rest[1].0.keyword(), "OR");
    }
}
