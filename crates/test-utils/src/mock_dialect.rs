// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock dialects for testing
//!
//! [`MockDialect`] declines every geometry, unit and geometry-value hook, so
//! a query using them fails to translate. [`ListingDialect`] writes geometric
//! functions back in their ADQL form, which lets tests exercise geometry
//! without depending on a real backend.

use adql_sql_ir::{
    DataType, GeometryFunction, GeometryKind, IdentifierField, InUnitFunction, Region,
};
use adql_sql_translator::{
    GeometryError, GeometryResult, LanguageFeature, NativeGeometry, NativeType, SqlDialect,
    TranslationError, TranslationResult,
};
use tracing::trace;

/// Dialect with no geometry support and a configurable quoting policy
#[derive(Debug, Clone, Default)]
pub struct MockDialect {
    case_sensitive: Vec<IdentifierField>,
}

impl MockDialect {
    pub const NAME: &'static str = "Mock";

    /// Create a dialect where no identifier is case-sensitive
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare DB identifiers of this kind case-sensitive
    pub fn with_case_sensitive(mut self, field: IdentifierField) -> Self {
        if !self.case_sensitive.contains(&field) {
            self.case_sensitive.push(field);
        }
        self
    }
}

impl SqlDialect for MockDialect {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_case_sensitive(&self, field: IdentifierField) -> bool {
        self.case_sensitive.contains(&field)
    }

    fn translate_geometry(
        &self,
        function: &GeometryFunction,
        _args: &[String],
    ) -> TranslationResult<String> {
        trace!(function = function.kind.name(), "Mock dialect declines geometry");
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
        DataType::from_adql_name(&native.normalized_name(), native.length)
            .unwrap_or(DataType::Unknown)
    }

    fn convert_type_to_db(&self, data_type: &DataType) -> TranslationResult<String> {
        match data_type {
            DataType::Unknown | DataType::UnknownNumeric => Err(TranslationError::UnsupportedType {
                data_type: data_type.adql_name().to_string(),
                dialect: Self::NAME.to_string(),
            }),
            _ => Ok(data_type.to_string()),
        }
    }

    fn translate_geometry_from_db(&self, _value: &NativeGeometry) -> GeometryResult<Region> {
        Err(GeometryError::Unsupported {
            dialect: Self::NAME.to_string(),
            message: "no geometry encoding".to_string(),
        })
    }

    fn translate_geometry_to_db(&self, region: &Region) -> GeometryResult<NativeGeometry> {
        Err(GeometryError::Unsupported {
            dialect: Self::NAME.to_string(),
            message: format!("cannot encode {}", region.shape()),
        })
    }
}

/// Dialect writing geometric functions and `IN_UNIT` as ADQL-literal calls
///
/// Every other hook behaves like the wrapped [`MockDialect`].
#[derive(Debug, Clone, Default)]
pub struct ListingDialect {
    inner: MockDialect,
}

impl ListingDialect {
    pub const NAME: &'static str = "Listing";

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: replace the wrapped dialect
    pub fn wrapping(inner: MockDialect) -> Self {
        Self { inner }
    }
}

impl SqlDialect for ListingDialect {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_case_sensitive(&self, field: IdentifierField) -> bool {
        self.inner.is_case_sensitive(field)
    }

    fn translate_geometry(
        &self,
        function: &GeometryFunction,
        args: &[String],
    ) -> TranslationResult<String> {
        Ok(format!("{}({})", function.kind.name(), args.join(", ")))
    }

    fn translate_in_unit(
        &self,
        function: &InUnitFunction,
        operand: &str,
    ) -> TranslationResult<String> {
        Ok(format!(
            "{}({}, '{}')",
            InUnitFunction::NAME,
            operand,
            function.unit.replace('\'', "''")
        ))
    }

    fn supported_features(&self) -> Vec<LanguageFeature> {
        [
            GeometryKind::Area,
            GeometryKind::Box,
            GeometryKind::Centroid,
            GeometryKind::Circle,
            GeometryKind::Contains,
            GeometryKind::Coord1,
            GeometryKind::Coord2,
            GeometryKind::Coordsys,
            GeometryKind::Distance,
            GeometryKind::Intersects,
            GeometryKind::Point,
            GeometryKind::Polygon,
            GeometryKind::Region,
        ]
        .into_iter()
        .map(LanguageFeature::Geometry)
        .chain(std::iter::once(LanguageFeature::InUnit))
        .collect()
    }

    fn convert_type_from_db(&self, native: &NativeType) -> DataType {
        self.inner.convert_type_from_db(native)
    }

    fn convert_type_to_db(&self, data_type: &DataType) -> TranslationResult<String> {
        self.inner.convert_type_to_db(data_type)
    }

    fn translate_geometry_from_db(&self, value: &NativeGeometry) -> GeometryResult<Region> {
        self.inner.translate_geometry_from_db(value)
    }

    fn translate_geometry_to_db(&self, region: &Region) -> GeometryResult<NativeGeometry> {
        Ok(NativeGeometry::Text(region.to_string()))
    }
}
