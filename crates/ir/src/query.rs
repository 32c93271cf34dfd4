// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Queries
//!
//! This module represents a checked ADQL query.
//!
//! ## Structure
//!
//! A [`Query`] is made of:
//!
//! - an optional **WITH** clause: ordered [`WithItem`]s, each a labelled
//!   sub-query
//! - a **SELECT** clause: `DISTINCT`, `TOP n` and the selected items
//! - a **FROM** clause: a single [`FromItem`], either a table or a join tree
//! - optional **WHERE**, **GROUP BY**, **HAVING** and **ORDER BY** clauses
//! - an optional **OFFSET**
//!
//! ### Simple SELECT
//! ```sql
//! SELECT TOP 5 id, name FROM aTable WHERE id > 10 ORDER BY id
//! ```
//!
//! ### WITH clause
//! ```sql
//! WITH foo AS (SELECT * FROM bar)
//! SELECT * FROM foo
//! ```
//!
//! ### Joins
//! ```sql
//! SELECT * FROM aTable AS a NATURAL JOIN anotherTable AS b
//! SELECT * FROM aTable AS a JOIN anotherTable AS b USING (name)
//! ```
//!
//! For NATURAL and USING joins the checker supplies the resolved common
//! columns in [`Join::common_columns`]; the translator relies on them to
//! render the shared columns only once.
//!
//! ## Construction
//!
//! Nodes are built with `with_*` builder methods and are never modified by
//! the translator.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::expr::{ConstraintList, Operand, TableBinding};
use crate::identifier::Identifier;
use crate::metadata::{DbColumn, DbTable};

/// A checked ADQL query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// WITH items, in declaration order
    pub with: Vec<WithItem>,

    pub select: SelectClause,

    pub from: FromItem,

    pub where_clause: Option<ConstraintList>,

    pub group_by: Vec<Operand>,

    pub having: Option<ConstraintList>,

    pub order_by: Vec<OrderItem>,

    /// Number of rows to skip
    pub offset: Option<u64>,
}

impl Query {
    /// `SELECT * FROM <from>`
    pub fn new(from: impl Into<FromItem>) -> Self {
        Self {
            with: Vec::new(),
            select: SelectClause::default(),
            from: from.into(),
            where_clause: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            offset: None,
        }
    }

    pub fn with_with_items(mut self, items: impl IntoIterator<Item = WithItem>) -> Self {
        self.with = items.into_iter().collect();
        self
    }

    pub fn with_select(mut self, select: SelectClause) -> Self {
        self.select = select;
        self
    }

    /// Builder method: replace the selected items
    pub fn with_select_items(mut self, items: Vec<SelectItem>) -> Self {
        self.select.items = items;
        self
    }

    pub fn with_distinct(mut self) -> Self {
        self.select.distinct = true;
        self
    }

    pub fn with_top(mut self, top: u64) -> Self {
        self.select.top = Some(top);
        self
    }

    pub fn with_where(mut self, constraints: impl Into<ConstraintList>) -> Self {
        self.where_clause = Some(constraints.into());
        self
    }

    pub fn with_group_by(mut self, group_by: Vec<Operand>) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn with_having(mut self, constraints: impl Into<ConstraintList>) -> Self {
        self.having = Some(constraints.into());
        self
    }

    pub fn with_order_by(mut self, order_by: Vec<OrderItem>) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// One labelled sub-query of a WITH clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithItem {
    pub label: String,
    /// Whether the label was written double-quoted
    pub label_case_sensitive: bool,
    pub query: Box<Query>,
}

impl WithItem {
    pub fn new(label: impl Into<String>, query: Query) -> Self {
        Self {
            label: label.into(),
            label_case_sensitive: false,
            query: Box::new(query),
        }
    }

    /// Builder method: mark the label as case-sensitive
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.label_case_sensitive = case_sensitive;
        self
    }
}

/// SELECT clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectClause {
    pub distinct: bool,
    /// Maximum number of rows (`TOP n`)
    pub top: Option<u64>,
    pub items: Vec<SelectItem>,
}

impl Default for SelectClause {
    fn default() -> Self {
        Self {
            distinct: false,
            top: None,
            items: vec![SelectItem::AllColumns],
        }
    }
}

/// Item in a SELECT list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectItem {
    /// `*`
    AllColumns,

    /// `t.*`, with the table the checker bound `t` to
    TableColumns {
        table: TableName,
        binding: Option<TableBinding>,
    },

    /// An operand with an optional `AS` alias
    Expr {
        operand: Operand,
        alias: Option<Identifier>,
    },
}

impl SelectItem {
    pub fn expr(operand: impl Into<Operand>) -> Self {
        SelectItem::Expr {
            operand: operand.into(),
            alias: None,
        }
    }

    pub fn aliased(operand: impl Into<Operand>, alias: impl Into<Identifier>) -> Self {
        SelectItem::Expr {
            operand: operand.into(),
            alias: Some(alias.into()),
        }
    }
}

/// A possibly qualified table name, as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableName {
    pub catalog: Option<Identifier>,
    pub schema: Option<Identifier>,
    pub table: Identifier,
}

impl TableName {
    pub fn new(table: impl Into<Identifier>) -> Self {
        Self {
            catalog: None,
            schema: None,
            table: table.into(),
        }
    }

    pub fn with_schema(mut self, schema: impl Into<Identifier>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_catalog(mut self, catalog: impl Into<Identifier>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Written parts, outermost first
    pub fn parts(&self) -> impl Iterator<Item = &Identifier> {
        self.catalog
            .iter()
            .chain(self.schema.iter())
            .chain(std::iter::once(&self.table))
    }
}

/// What a FROM table reads from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableSource {
    Named(TableName),
    SubQuery(Box<Query>),
}

/// A table of the FROM clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub source: TableSource,
    pub alias: Option<Identifier>,
    /// Metadata attached by the checker
    pub link: Option<Arc<DbTable>>,
}

impl TableRef {
    pub fn named(name: impl Into<Identifier>) -> Self {
        Self::from_name(TableName::new(name))
    }

    pub fn from_name(name: TableName) -> Self {
        Self {
            source: TableSource::Named(name),
            alias: None,
            link: None,
        }
    }

    pub fn subquery(query: Query) -> Self {
        Self {
            source: TableSource::SubQuery(Box::new(query)),
            alias: None,
            link: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<Identifier>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_link(mut self, table: Arc<DbTable>) -> Self {
        self.link = Some(table);
        self
    }

    /// The checker's binding for this table, if it is linked
    pub fn binding(&self) -> Option<TableBinding> {
        self.link.as_ref().map(|table| TableBinding {
            table: Arc::clone(table),
            alias: self.alias.clone(),
        })
    }
}

/// FROM clause content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FromItem {
    Table(TableRef),
    Join(Box<Join>),
}

impl FromItem {
    /// Tables of this item, left to right
    pub fn tables(&self) -> Vec<&TableRef> {
        match self {
            FromItem::Table(table) => vec![table],
            FromItem::Join(join) => {
                let mut tables = join.left.tables();
                tables.extend(join.right.tables());
                tables
            }
        }
    }
}

impl From<TableRef> for FromItem {
    fn from(table: TableRef) -> Self {
        FromItem::Table(table)
    }
}

impl From<Join> for FromItem {
    fn from(join: Join) -> Self {
        FromItem::Join(Box::new(join))
    }
}

/// JOIN of two FROM items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub left: FromItem,
    pub right: FromItem,
    pub condition: JoinCondition,
    /// NATURAL/USING common columns, as resolved on the left side
    pub common_columns: Vec<DbColumn>,
}

impl Join {
    pub fn new(
        kind: JoinKind,
        left: impl Into<FromItem>,
        right: impl Into<FromItem>,
        condition: JoinCondition,
    ) -> Self {
        Self {
            kind,
            left: left.into(),
            right: right.into(),
            condition,
            common_columns: Vec::new(),
        }
    }

    pub fn with_common_columns(mut self, columns: Vec<DbColumn>) -> Self {
        self.common_columns = columns;
        self
    }

    /// Whether the common columns are merged (NATURAL or USING)
    pub fn merges_columns(&self) -> bool {
        matches!(
            self.condition,
            JoinCondition::Natural | JoinCondition::Using(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinCondition {
    On(ConstraintList),
    Using(Vec<Identifier>),
    Natural,
    None,
}

/// ORDER BY item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub target: OrderTarget,
    pub direction: SortDirection,
}

impl OrderItem {
    pub fn asc(operand: impl Into<Operand>) -> Self {
        Self {
            target: OrderTarget::Expr(operand.into()),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(operand: impl Into<Operand>) -> Self {
        Self {
            target: OrderTarget::Expr(operand.into()),
            direction: SortDirection::Desc,
        }
    }

    /// Order by the 1-based position of a selected column
    pub fn position(position: u32, direction: SortDirection) -> Self {
        Self {
            target: OrderTarget::Position(position),
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderTarget {
    Expr(Operand),
    Position(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}
