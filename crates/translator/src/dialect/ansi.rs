// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Standard SQL dialect
//!
//! Case-insensitive identifiers and standard type names. Standard SQL has no
//! geometry, so every geometric function, `IN_UNIT` and region conversion is
//! declined.

use adql_sql_ir::{DataType, GeometryFunction, IdentifierField, InUnitFunction, Region};
use tracing::debug;

use super::{NativeGeometry, NativeType, SqlDialect};
use crate::error::{GeometryError, GeometryResult, TranslationError, TranslationResult};

/// Standard SQL dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDialect;

impl AnsiDialect {
    pub const NAME: &'static str = "ANSI";

    pub fn new() -> Self {
        Self
    }
}

impl SqlDialect for AnsiDialect {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_case_sensitive(&self, _field: IdentifierField) -> bool {
        false
    }

    fn translate_geometry(
        &self,
        function: &GeometryFunction,
        _args: &[String],
    ) -> TranslationResult<String> {
        debug!(function = function.kind.name(), "Geometry function declined by ANSI dialect");
        Err(TranslationError::unsupported_function(
            function.kind.name(),
            Self::NAME,
        ))
    }

    fn translate_in_unit(
        &self,
        _function: &InUnitFunction,
        _operand: &str,
    ) -> TranslationResult<String> {
        Err(TranslationError::unsupported_function(
            InUnitFunction::NAME,
            Self::NAME,
        ))
    }

    fn convert_type_from_db(&self, native: &NativeType) -> DataType {
        let length = native.length;
        match native.normalized_name().as_str() {
            "double precision" | "float" => DataType::Double,
            "character" => DataType::Char(length),
            "character varying" | "char varying" => DataType::VarChar(length),
            "binary varying" => DataType::VarBinary(length),
            "character large object" => DataType::Clob,
            "binary large object" => DataType::Blob,
            name => DataType::from_adql_name(name, length)
                .filter(|data_type| !data_type.is_geometry())
                .unwrap_or(DataType::Unknown),
        }
    }

    fn convert_type_to_db(&self, data_type: &DataType) -> TranslationResult<String> {
        let with_length = |name: &str, length: Option<usize>| match length {
            Some(length) => format!("{name}({length})"),
            None => name.to_string(),
        };

        let sql = match data_type {
            DataType::SmallInt => "SMALLINT".to_string(),
            DataType::Integer => "INTEGER".to_string(),
            DataType::BigInt => "BIGINT".to_string(),
            DataType::Real => "REAL".to_string(),
            DataType::Double => "DOUBLE PRECISION".to_string(),
            DataType::Binary(length) => with_length("BINARY", *length),
            DataType::VarBinary(length) => with_length("VARBINARY", *length),
            DataType::Blob => "BLOB".to_string(),
            DataType::Char(length) => with_length("CHAR", *length),
            DataType::VarChar(length) => with_length("VARCHAR", *length),
            DataType::Clob => "CLOB".to_string(),
            DataType::Timestamp => "TIMESTAMP".to_string(),
            DataType::Point
            | DataType::Circle
            | DataType::Polygon
            | DataType::Region
            | DataType::Unknown
            | DataType::UnknownNumeric => {
                return Err(TranslationError::UnsupportedType {
                    data_type: data_type.to_string(),
                    dialect: Self::NAME.to_string(),
                });
            }
        };
        Ok(sql)
    }

    fn translate_geometry_from_db(&self, _value: &NativeGeometry) -> GeometryResult<Region> {
        Err(GeometryError::Unsupported {
            dialect: Self::NAME.to_string(),
            message: "no geometry type".to_string(),
        })
    }

    fn translate_geometry_to_db(&self, region: &Region) -> GeometryResult<NativeGeometry> {
        Err(GeometryError::Unsupported {
            dialect: Self::NAME.to_string(),
            message: format!("cannot encode {}", region.shape()),
        })
    }
}
