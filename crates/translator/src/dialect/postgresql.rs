// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! PostgreSQL dialect
//!
//! This module maps ADQL onto plain PostgreSQL (no extension required):
//! - Unquoted identifiers, folded to lower case by the server
//! - PostgreSQL type names (`double precision`, `character varying(n)`, ...)
//! - Geometric functions on the built-in planar types `point`, `circle`,
//!   `box` and `polygon`
//!
//! ## Geometry
//!
//! Coordinates are handled as planar values; the coordinate system argument
//! of ADQL 2.0 calls (`POINT('ICRS', ra, dec)`) is accepted and dropped.
//!
//! | ADQL | PostgreSQL |
//! |---|---|
//! | `POINT(x, y)` | `point(x, y)` |
//! | `CIRCLE(x, y, r)` / `CIRCLE(p, r)` | `circle(point(x, y), r)` / `circle(p, r)` |
//! | `BOX(x, y, w, h)` | `box(point(x - w / 2, y - h / 2), point(x + w / 2, y + h / 2))` |
//! | `AREA(g)` | `area(g)` |
//! | `CENTROID(g)` | `center(g)` |
//! | `COORD1(p)` / `COORD2(p)` | `(p)[0]` / `(p)[1]` |
//! | `DISTANCE(p1, p2)` | `(p1 <-> p2)` |
//! | `CONTAINS(a, b)` | `CASE WHEN a <@ b THEN 1 ELSE 0 END` |
//! | `INTERSECTS(a, b)` | `CASE WHEN a && b THEN 1 ELSE 0 END` |
//!
//! `COORDSYS`, `POLYGON`, `REGION` and `IN_UNIT` have no planar equivalent and
//! are declined. Regions are encoded in PostgreSQL's geometric text format;
//! decoding DB values is not supported.

use adql_sql_ir::{
    Coordinates, DataType, GeometryFunction, GeometryKind, IdentifierField, InUnitFunction, Region,
};
use tracing::debug;

use super::{LanguageFeature, NativeGeometry, NativeType, SqlDialect, expect_args};
use crate::error::{GeometryError, GeometryResult, TranslationError, TranslationResult};

/// PostgreSQL dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgreSqlDialect;

impl PostgreSqlDialect {
    pub const NAME: &'static str = "PostgreSQL";

    pub fn new() -> Self {
        Self
    }

    fn decline(&self, name: &str) -> TranslationError {
        debug!(function = name, "Function declined by PostgreSQL dialect");
        TranslationError::unsupported_function(name, Self::NAME)
    }
}

/// Geometric functions with a planar equivalent
const PLANAR_GEOMETRY: [GeometryKind; 10] = [
    GeometryKind::Area,
    GeometryKind::Box,
    GeometryKind::Centroid,
    GeometryKind::Circle,
    GeometryKind::Contains,
    GeometryKind::Coord1,
    GeometryKind::Coord2,
    GeometryKind::Distance,
    GeometryKind::Intersects,
    GeometryKind::Point,
];

/// Drop the leading coordinate system argument of ADQL 2.0 calls
fn without_coordsys(args: &[String], planar_count: usize) -> &[String] {
    if args.len() == planar_count + 1 {
        &args[1..]
    } else {
        args
    }
}

fn as_int_predicate(condition: String) -> String {
    format!("CASE WHEN {condition} THEN 1 ELSE 0 END")
}

fn point_text(point: &Coordinates) -> String {
    format!("({},{})", point.x, point.y)
}

impl SqlDialect for PostgreSqlDialect {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_case_sensitive(&self, _field: IdentifierField) -> bool {
        false
    }

    fn translate_geometry(
        &self,
        function: &GeometryFunction,
        args: &[String],
    ) -> TranslationResult<String> {
        let sql = match function.kind {
            GeometryKind::Point => {
                expect_args(function, args, &[2, 3])?;
                let args = without_coordsys(args, 2);
                format!("point({}, {})", args[0], args[1])
            }
            GeometryKind::Circle => {
                expect_args(function, args, &[2, 3, 4])?;
                match args.len() {
                    2 => format!("circle({}, {})", args[0], args[1]),
                    _ => {
                        let args = without_coordsys(args, 3);
                        format!("circle(point({}, {}), {})", args[0], args[1], args[2])
                    }
                }
            }
            GeometryKind::Box => {
                expect_args(function, args, &[4, 5])?;
                let args = without_coordsys(args, 4);
                let (x, y, w, h) = (&args[0], &args[1], &args[2], &args[3]);
                format!(
                    "box(point({x} - {w} / 2, {y} - {h} / 2), point({x} + {w} / 2, {y} + {h} / 2))"
                )
            }
            GeometryKind::Area => {
                expect_args(function, args, &[1])?;
                format!("area({})", args[0])
            }
            GeometryKind::Centroid => {
                expect_args(function, args, &[1])?;
                format!("center({})", args[0])
            }
            GeometryKind::Coord1 => {
                expect_args(function, args, &[1])?;
                format!("({})[0]", args[0])
            }
            GeometryKind::Coord2 => {
                expect_args(function, args, &[1])?;
                format!("({})[1]", args[0])
            }
            GeometryKind::Distance => {
                expect_args(function, args, &[2, 4])?;
                if args.len() == 4 {
                    format!(
                        "(point({}, {}) <-> point({}, {}))",
                        args[0], args[1], args[2], args[3]
                    )
                } else {
                    format!("({} <-> {})", args[0], args[1])
                }
            }
            GeometryKind::Contains => {
                expect_args(function, args, &[2])?;
                as_int_predicate(format!("{} <@ {}", args[0], args[1]))
            }
            GeometryKind::Intersects => {
                expect_args(function, args, &[2])?;
                as_int_predicate(format!("{} && {}", args[0], args[1]))
            }
            GeometryKind::Coordsys | GeometryKind::Polygon | GeometryKind::Region => {
                return Err(self.decline(function.kind.name()));
            }
        };
        Ok(sql)
    }

    fn translate_in_unit(
        &self,
        _function: &InUnitFunction,
        _operand: &str,
    ) -> TranslationResult<String> {
        Err(self.decline(InUnitFunction::NAME))
    }

    fn convert_type_from_db(&self, native: &NativeType) -> DataType {
        let length = native.length;
        match native.normalized_name().as_str() {
            "smallint" | "int2" | "smallserial" | "serial2" => DataType::SmallInt,
            "integer" | "int" | "int4" | "serial" | "serial4" => DataType::Integer,
            "bigint" | "int8" | "bigserial" | "serial8" => DataType::BigInt,
            "real" | "float4" => DataType::Real,
            "double precision" | "float8" | "numeric" | "decimal" => DataType::Double,
            "bytea" => DataType::VarBinary(length),
            "bit" => DataType::Binary(length),
            "bit varying" | "varbit" => DataType::VarBinary(length),
            "char" | "character" | "bpchar" => DataType::Char(length),
            "varchar" | "character varying" => DataType::VarChar(length),
            "text" => DataType::Clob,
            "timestamp"
            | "timestamptz"
            | "timestamp without time zone"
            | "timestamp with time zone"
            | "date"
            | "time" => DataType::Timestamp,
            "point" => DataType::Point,
            "circle" => DataType::Circle,
            "polygon" => DataType::Polygon,
            _ => DataType::Unknown,
        }
    }

    fn convert_type_to_db(&self, data_type: &DataType) -> TranslationResult<String> {
        let with_length = |name: &str, length: Option<usize>| match length {
            Some(length) => format!("{name}({length})"),
            None => name.to_string(),
        };

        let sql = match data_type {
            DataType::SmallInt => "smallint".to_string(),
            DataType::Integer => "integer".to_string(),
            DataType::BigInt => "bigint".to_string(),
            DataType::Real => "real".to_string(),
            DataType::Double => "double precision".to_string(),
            DataType::Binary(_) | DataType::VarBinary(_) | DataType::Blob => "bytea".to_string(),
            DataType::Char(length) => with_length("character", *length),
            DataType::VarChar(length) => with_length("character varying", *length),
            DataType::Clob => "text".to_string(),
            DataType::Timestamp => "timestamp".to_string(),
            DataType::Point => "point".to_string(),
            DataType::Circle => "circle".to_string(),
            DataType::Polygon | DataType::Region => "polygon".to_string(),
            DataType::Unknown | DataType::UnknownNumeric => {
                return Err(TranslationError::UnsupportedType {
                    data_type: data_type.to_string(),
                    dialect: Self::NAME.to_string(),
                });
            }
        };
        Ok(sql)
    }

    fn supported_features(&self) -> Vec<LanguageFeature> {
        PLANAR_GEOMETRY
            .iter()
            .copied()
            .map(LanguageFeature::Geometry)
            .collect()
    }

    fn translate_geometry_from_db(&self, _value: &NativeGeometry) -> GeometryResult<Region> {
        Err(GeometryError::Unsupported {
            dialect: Self::NAME.to_string(),
            message: "decoding geometric values is not supported".to_string(),
        })
    }

    fn translate_geometry_to_db(&self, region: &Region) -> GeometryResult<NativeGeometry> {
        let text = match region {
            Region::Position { point, .. } => point_text(point),
            Region::Circle { center, radius, .. } => {
                if *radius < 0.0 {
                    return Err(GeometryError::InvalidValue {
                        value: region.to_string(),
                        reason: "negative radius".to_string(),
                    });
                }
                format!("<{},{}>", point_text(center), radius)
            }
            Region::Box {
                center,
                width,
                height,
                ..
            } => {
                let low = Coordinates::new(center.x - width / 2.0, center.y - height / 2.0);
                let high = Coordinates::new(center.x + width / 2.0, center.y + height / 2.0);
                format!("({},{})", point_text(&low), point_text(&high))
            }
            Region::Polygon { vertices, .. } => {
                if vertices.len() < 3 {
                    return Err(GeometryError::InvalidValue {
                        value: region.to_string(),
                        reason: "a polygon needs at least 3 vertices".to_string(),
                    });
                }
                let points: Vec<String> = vertices.iter().map(point_text).collect();
                format!("({})", points.join(","))
            }
        };
        Ok(NativeGeometry::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(kind: GeometryKind, args: &[&str]) -> TranslationResult<String> {
        let function = GeometryFunction { kind, args: vec![] };
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        PostgreSqlDialect::new().translate_geometry(&function, &args)
    }

    #[test]
    fn test_point_drops_coordsys() {
        assert_eq!(
            geometry(GeometryKind::Point, &["'ICRS'", "10", "20"]).unwrap(),
            "point(10, 20)"
        );
        assert_eq!(
            geometry(GeometryKind::Point, &["ra", "dec"]).unwrap(),
            "point(ra, dec)"
        );
    }

    #[test]
    fn test_circle_forms() {
        assert_eq!(
            geometry(GeometryKind::Circle, &["'ICRS'", "1", "2", "0.5"]).unwrap(),
            "circle(point(1, 2), 0.5)"
        );
        assert_eq!(
            geometry(GeometryKind::Circle, &["point(1, 2)", "0.5"]).unwrap(),
            "circle(point(1, 2), 0.5)"
        );
    }

    #[test]
    fn test_contains_is_integer() {
        assert_eq!(
            geometry(GeometryKind::Contains, &["p", "c"]).unwrap(),
            "CASE WHEN p <@ c THEN 1 ELSE 0 END"
        );
    }

    #[test]
    fn test_declined_functions() {
        for kind in [
            GeometryKind::Coordsys,
            GeometryKind::Polygon,
            GeometryKind::Region,
        ] {
            assert_eq!(
                geometry(kind, &["x"]).unwrap_err(),
                TranslationError::unsupported_function(kind.name(), "PostgreSQL")
            );
        }
    }

    #[test]
    fn test_argument_count() {
        assert!(matches!(
            geometry(GeometryKind::Area, &[]),
            Err(TranslationError::ArgumentCount { found: 0, .. })
        ));
    }

    #[test]
    fn test_region_encoding() {
        let dialect = PostgreSqlDialect::new();
        assert_eq!(
            dialect
                .translate_geometry_to_db(&Region::circle(1.0, 2.0, 0.5))
                .unwrap(),
            NativeGeometry::Text("<(1,2),0.5>".to_string())
        );
        assert!(matches!(
            dialect.translate_geometry_to_db(&Region::circle(1.0, 2.0, -1.0)),
            Err(GeometryError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_type_round_trip() {
        let dialect = PostgreSqlDialect::new();
        for data_type in [
            DataType::SmallInt,
            DataType::Integer,
            DataType::BigInt,
            DataType::Real,
            DataType::Double,
            DataType::Clob,
            DataType::Timestamp,
            DataType::Point,
            DataType::Circle,
            DataType::Polygon,
        ] {
            let native = NativeType::new(dialect.convert_type_to_db(&data_type).unwrap());
            assert_eq!(dialect.convert_type_from_db(&native), data_type);
        }
    }
}
