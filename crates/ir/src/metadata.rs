// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Metadata types for checked queries
//!
//! This module defines the schema metadata the checker attaches to the query
//! tree: tables, their columns, and the ADQL abstract type system.
//!
//! Every table and column has two names:
//!
//! - the **ADQL name**, used in queries and for default column aliases
//! - the **DB name**, used in the generated SQL

use serde::{Deserialize, Serialize};
use std::fmt;

/// ADQL data types (the abstract type system of the query language)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    // Numeric types
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,

    // Binary types
    Binary(Option<usize>),
    VarBinary(Option<usize>),
    Blob,

    // String types
    Char(Option<usize>),
    VarChar(Option<usize>),
    Clob,

    // Date/Time
    Timestamp,

    // Geometries
    Point,
    Circle,
    Polygon,
    Region,

    // Not resolved by the checker
    Unknown,
    UnknownNumeric,
}

impl DataType {
    /// Resolve an ADQL type name (case-insensitive) with its optional length
    ///
    /// Returns `None` for names outside the ADQL type system. The length is
    /// only kept by the types that accept one.
    pub fn from_adql_name(name: &str, length: Option<usize>) -> Option<DataType> {
        let data_type = match name.to_ascii_uppercase().as_str() {
            "SMALLINT" => DataType::SmallInt,
            "INTEGER" | "INT" => DataType::Integer,
            "BIGINT" => DataType::BigInt,
            "REAL" => DataType::Real,
            "DOUBLE" => DataType::Double,
            "BINARY" => DataType::Binary(length),
            "VARBINARY" => DataType::VarBinary(length),
            "BLOB" => DataType::Blob,
            "CHAR" => DataType::Char(length),
            "VARCHAR" => DataType::VarChar(length),
            "CLOB" => DataType::Clob,
            "TIMESTAMP" => DataType::Timestamp,
            "POINT" => DataType::Point,
            "CIRCLE" => DataType::Circle,
            "POLYGON" => DataType::Polygon,
            "REGION" => DataType::Region,
            _ => return None,
        };
        Some(data_type)
    }

    /// Whether this is one of the numeric types
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::SmallInt
                | DataType::Integer
                | DataType::BigInt
                | DataType::Real
                | DataType::Double
                | DataType::UnknownNumeric
        )
    }

    /// Whether this is one of the geometric types
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            DataType::Point | DataType::Circle | DataType::Polygon | DataType::Region
        )
    }

    /// Declared length, for the types that carry one
    pub fn length(&self) -> Option<usize> {
        match self {
            DataType::Binary(len)
            | DataType::VarBinary(len)
            | DataType::Char(len)
            | DataType::VarChar(len) => *len,
            _ => None,
        }
    }

    /// ADQL type name without the length
    pub fn adql_name(&self) -> &'static str {
        match self {
            DataType::SmallInt => "SMALLINT",
            DataType::Integer => "INTEGER",
            DataType::BigInt => "BIGINT",
            DataType::Real => "REAL",
            DataType::Double => "DOUBLE",
            DataType::Binary(_) => "BINARY",
            DataType::VarBinary(_) => "VARBINARY",
            DataType::Blob => "BLOB",
            DataType::Char(_) => "CHAR",
            DataType::VarChar(_) => "VARCHAR",
            DataType::Clob => "CLOB",
            DataType::Timestamp => "TIMESTAMP",
            DataType::Point => "POINT",
            DataType::Circle => "CIRCLE",
            DataType::Polygon => "POLYGON",
            DataType::Region => "REGION",
            DataType::Unknown => "UNKNOWN",
            DataType::UnknownNumeric => "UNKNOWN_NUMERIC",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length() {
            Some(len) => write!(f, "{}({})", self.adql_name(), len),
            None => f.write_str(self.adql_name()),
        }
    }
}

/// Metadata for a column, as resolved by the checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbColumn {
    /// Column name in ADQL queries
    pub adql_name: String,
    /// Column name in the database
    pub db_name: String,
    /// Column type, when known
    pub data_type: Option<DataType>,
}

impl DbColumn {
    /// Column whose ADQL and DB names are identical
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            db_name: name.clone(),
            adql_name: name,
            data_type: None,
        }
    }

    /// Builder method: set a distinct DB name
    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    /// Builder method: set the column type
    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }
}

/// Metadata for a table, as resolved by the checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbTable {
    /// Catalog name in the database
    pub db_catalog: Option<String>,
    /// Schema name in the database
    pub db_schema: Option<String>,
    /// Table name in ADQL queries
    pub adql_name: String,
    /// Table name in the database
    pub db_name: String,
    /// Column definitions, in table order
    pub columns: Vec<DbColumn>,
}

impl DbTable {
    /// Table whose ADQL and DB names are identical
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            db_catalog: None,
            db_schema: None,
            db_name: name.clone(),
            adql_name: name,
            columns: Vec::new(),
        }
    }

    /// Builder method: set a distinct DB name
    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    /// Builder method: set the DB schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.db_schema = Some(schema.into());
        self
    }

    /// Builder method: set the DB catalog
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.db_catalog = Some(catalog.into());
        self
    }

    /// Builder method: add columns
    pub fn with_columns(mut self, columns: Vec<DbColumn>) -> Self {
        self.columns = columns;
        self
    }

    /// Get column by ADQL name (case-insensitive)
    pub fn get_column(&self, adql_name: &str) -> Option<&DbColumn> {
        self.columns
            .iter()
            .find(|c| c.adql_name.eq_ignore_ascii_case(adql_name))
    }
}
