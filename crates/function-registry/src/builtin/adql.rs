// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! ADQL builtin functions

use adql_sql_ir::{AggregateKind, GeometryKind, InUnitFunction, MathKind, StringKind};

const AGGREGATES: [AggregateKind; 5] = [
    AggregateKind::Count,
    AggregateKind::Avg,
    AggregateKind::Max,
    AggregateKind::Min,
    AggregateKind::Sum,
];

const MATH: [MathKind; 23] = [
    MathKind::Abs,
    MathKind::Ceiling,
    MathKind::Degrees,
    MathKind::Exp,
    MathKind::Floor,
    MathKind::Log,
    MathKind::Log10,
    MathKind::Mod,
    MathKind::Pi,
    MathKind::Power,
    MathKind::Radians,
    MathKind::Rand,
    MathKind::Round,
    MathKind::Sqrt,
    MathKind::Truncate,
    MathKind::Acos,
    MathKind::Asin,
    MathKind::Atan,
    MathKind::Atan2,
    MathKind::Cos,
    MathKind::Cot,
    MathKind::Sin,
    MathKind::Tan,
];

const STRING: [StringKind; 2] = [StringKind::Lower, StringKind::Upper];

const GEOMETRY: [GeometryKind; 13] = [
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
];

/// Get all builtin ADQL function names
pub fn all_functions() -> Vec<&'static str> {
    AGGREGATES
        .iter()
        .map(AggregateKind::name)
        .chain(MATH.iter().map(MathKind::name))
        .chain(STRING.iter().map(StringKind::name))
        .chain(GEOMETRY.iter().map(GeometryKind::name))
        .chain(std::iter::once(InUnitFunction::NAME))
        .collect()
}

/// Whether `name` is a builtin ADQL function (case-insensitive)
pub fn is_reserved(name: &str) -> bool {
    all_functions()
        .iter()
        .any(|builtin| builtin.eq_ignore_ascii_case(name))
}
