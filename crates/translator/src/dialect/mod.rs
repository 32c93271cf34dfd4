// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL dialects
//!
//! Everything the shared engine cannot decide on its own is asked to the
//! dialect through the [`SqlDialect`] hooks:
//!
//! - default case sensitivity of DB identifiers and aliases
//! - SQL form of geometric functions and of `IN_UNIT`
//! - mapping between ADQL types and DB types
//! - encoding of region values
//! - the optional language features it implements
//!
//! A hook that has no answer returns an error; the engine never guesses.

pub mod ansi;
pub mod postgresql;

pub use ansi::AnsiDialect;
pub use postgresql::PostgreSqlDialect;

use adql_sql_ir::{
    DataType, GeometryFunction, GeometryKind, IdentifierField, InUnitFunction, Region,
};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryResult, TranslationResult};

/// A DB type as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeType {
    /// Type name, e.g. `character varying`
    pub name: String,
    pub length: Option<usize>,
}

impl NativeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: None,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Type name lower-cased, with inner whitespace collapsed
    pub fn normalized_name(&self) -> String {
        self.name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase()
    }
}

/// Optional ADQL feature a dialect may implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageFeature {
    Geometry(GeometryKind),
    InUnit,
}

/// A geometry value in the DB encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NativeGeometry {
    Text(String),
    Binary(Vec<u8>),
}

/// Dialect hooks consulted by [`crate::SqlTranslator`]
///
/// Implementations must be stateless or internally synchronized: a translator
/// may be shared across threads.
pub trait SqlDialect: Send + Sync {
    /// Dialect name, used in error messages and logs
    fn name(&self) -> &str;

    /// Whether DB identifiers of this kind must be quoted
    fn is_case_sensitive(&self, field: IdentifierField) -> bool;

    /// SQL for a geometric function, given its translated arguments
    fn translate_geometry(
        &self,
        function: &GeometryFunction,
        args: &[String],
    ) -> TranslationResult<String>;

    /// SQL for `IN_UNIT`, given its translated operand
    fn translate_in_unit(
        &self,
        function: &InUnitFunction,
        operand: &str,
    ) -> TranslationResult<String>;

    /// ADQL type of a DB column type; `DataType::Unknown` when unmapped
    fn convert_type_from_db(&self, native: &NativeType) -> DataType;

    /// DB type name for an ADQL type
    fn convert_type_to_db(&self, data_type: &DataType) -> TranslationResult<String>;

    /// Decode a DB geometry value
    fn translate_geometry_from_db(&self, value: &NativeGeometry) -> GeometryResult<Region>;

    /// Encode a region for the DB
    fn translate_geometry_to_db(&self, region: &Region) -> GeometryResult<NativeGeometry>;

    /// Optional features this dialect translates
    ///
    /// Lets a service advertise what queries may use before translating
    /// them. Defaults to none.
    fn supported_features(&self) -> Vec<LanguageFeature> {
        Vec::new()
    }

    fn supports(&self, feature: LanguageFeature) -> bool {
        self.supported_features().contains(&feature)
    }
}

impl<T: SqlDialect + ?Sized> SqlDialect for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_case_sensitive(&self, field: IdentifierField) -> bool {
        (**self).is_case_sensitive(field)
    }

    fn translate_geometry(
        &self,
        function: &GeometryFunction,
        args: &[String],
    ) -> TranslationResult<String> {
        (**self).translate_geometry(function, args)
    }

    fn translate_in_unit(
        &self,
        function: &InUnitFunction,
        operand: &str,
    ) -> TranslationResult<String> {
        (**self).translate_in_unit(function, operand)
    }

    fn convert_type_from_db(&self, native: &NativeType) -> DataType {
        (**self).convert_type_from_db(native)
    }

    fn convert_type_to_db(&self, data_type: &DataType) -> TranslationResult<String> {
        (**self).convert_type_to_db(data_type)
    }

    fn translate_geometry_from_db(&self, value: &NativeGeometry) -> GeometryResult<Region> {
        (**self).translate_geometry_from_db(value)
    }

    fn translate_geometry_to_db(&self, region: &Region) -> GeometryResult<NativeGeometry> {
        (**self).translate_geometry_to_db(region)
    }

    fn supported_features(&self) -> Vec<LanguageFeature> {
        (**self).supported_features()
    }
}

/// Check the argument count of a geometric function against accepted counts
pub(crate) fn expect_args(
    function: &GeometryFunction,
    args: &[String],
    accepted: &[usize],
) -> TranslationResult<()> {
    if accepted.contains(&args.len()) {
        return Ok(());
    }
    let expected = accepted
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ");
    Err(crate::TranslationError::ArgumentCount {
        function: function.kind.name().to_string(),
        expected,
        found: args.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_type_normalized_name() {
        let native = NativeType::new("Character   Varying").with_length(12);
        assert_eq!(native.normalized_name(), "character varying");
        assert_eq!(native.length, Some(12));
    }

    #[test]
    fn test_boxed_dialect_forwards() {
        let dialect: Box<dyn SqlDialect> = Box::new(AnsiDialect::new());
        assert_eq!(dialect.name(), "ANSI");
        assert!(!dialect.is_case_sensitive(IdentifierField::Column));
        assert_eq!(
            dialect.convert_type_to_db(&DataType::Integer).unwrap(),
            "INTEGER"
        );
    }

    #[test]
    fn test_supported_features() {
        assert!(AnsiDialect::new().supported_features().is_empty());

        let boxed: Box<dyn SqlDialect> = Box::new(PostgreSqlDialect::new());
        assert!(boxed.supports(LanguageFeature::Geometry(GeometryKind::Distance)));
        assert!(!boxed.supports(LanguageFeature::Geometry(GeometryKind::Region)));
        assert!(!boxed.supports(LanguageFeature::InUnit));
    }

    #[test]
    fn test_expect_args() {
        let function = GeometryFunction {
            kind: GeometryKind::Point,
            args: vec![],
        };
        let args = vec!["1".to_string()];
        assert!(expect_args(&function, &args, &[1]).is_ok());

        let err = expect_args(&function, &args, &[2, 3]).unwrap_err();
        assert_eq!(
            err,
            crate::TranslationError::ArgumentCount {
                function: "POINT".to_string(),
                expected: "2 or 3".to_string(),
                found: 1,
            }
        );
    }
}
