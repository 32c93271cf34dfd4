// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Function calls
//!
//! ADQL knows a fixed set of functions, plus user-defined functions declared
//! by the service:
//!
//! - **Aggregates**: `COUNT(*)`, `COUNT(DISTINCT x)`, `AVG`, `MAX`, `MIN`, `SUM`
//! - **Mathematical**: `ABS`, `POWER`, `ROUND`, ... and trigonometric functions
//! - **String**: `LOWER`, `UPPER`
//! - **Geometric**: `POINT`, `CIRCLE`, `CONTAINS`, ... (rendered by the dialect)
//! - **Unit conversion**: `IN_UNIT(x, 'unit')` (rendered by the dialect)
//! - **User-defined**: any other name, optionally bound to a [`FunctionDef`]

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::expr::Operand;
use crate::signature::FunctionDef;

/// A function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Function {
    /// Aggregate function; no argument means `COUNT(*)`
    Aggregate {
        kind: AggregateKind,
        distinct: bool,
        argument: Option<Box<Operand>>,
    },
    Math {
        kind: MathKind,
        args: Vec<Operand>,
    },
    String {
        kind: StringKind,
        argument: Box<Operand>,
    },
    Geometry(GeometryFunction),
    InUnit(InUnitFunction),
    User(UserFunction),
}

impl Function {
    /// `COUNT(*)`
    pub fn count_all() -> Self {
        Function::Aggregate {
            kind: AggregateKind::Count,
            distinct: false,
            argument: None,
        }
    }

    pub fn aggregate(kind: AggregateKind, argument: Operand) -> Self {
        Function::Aggregate {
            kind,
            distinct: false,
            argument: Some(Box::new(argument)),
        }
    }

    pub fn aggregate_distinct(kind: AggregateKind, argument: Operand) -> Self {
        Function::Aggregate {
            kind,
            distinct: true,
            argument: Some(Box::new(argument)),
        }
    }

    pub fn math(kind: MathKind, args: Vec<Operand>) -> Self {
        Function::Math { kind, args }
    }

    pub fn string(kind: StringKind, argument: Operand) -> Self {
        Function::String {
            kind,
            argument: Box::new(argument),
        }
    }

    pub fn geometry(kind: GeometryKind, args: Vec<Operand>) -> Self {
        Function::Geometry(GeometryFunction { kind, args })
    }

    pub fn in_unit(operand: Operand, unit: impl Into<String>) -> Self {
        Function::InUnit(InUnitFunction {
            operand: Box::new(operand),
            unit: unit.into(),
        })
    }

    /// Function name as written in ADQL
    pub fn name(&self) -> &str {
        match self {
            Function::Aggregate { kind, .. } => kind.name(),
            Function::Math { kind, .. } => kind.name(),
            Function::String { kind, .. } => kind.name(),
            Function::Geometry(geometry) => geometry.kind.name(),
            Function::InUnit(_) => InUnitFunction::NAME,
            Function::User(udf) => &udf.name,
        }
    }
}

impl From<UserFunction> for Function {
    fn from(udf: UserFunction) -> Self {
        Function::User(udf)
    }
}

impl From<GeometryFunction> for Function {
    fn from(geometry: GeometryFunction) -> Self {
        Function::Geometry(geometry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateKind {
    Count,
    Avg,
    Max,
    Min,
    Sum,
}

impl AggregateKind {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateKind::Count => "COUNT",
            AggregateKind::Avg => "AVG",
            AggregateKind::Max => "MAX",
            AggregateKind::Min => "MIN",
            AggregateKind::Sum => "SUM",
        }
    }
}

/// Mathematical and trigonometric functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathKind {
    Abs,
    Ceiling,
    Degrees,
    Exp,
    Floor,
    Log,
    Log10,
    Mod,
    Pi,
    Power,
    Radians,
    Rand,
    Round,
    Sqrt,
    Truncate,
    Acos,
    Asin,
    Atan,
    Atan2,
    Cos,
    Cot,
    Sin,
    Tan,
}

impl MathKind {
    pub fn name(&self) -> &'static str {
        match self {
            MathKind::Abs => "ABS",
            MathKind::Ceiling => "CEILING",
            MathKind::Degrees => "DEGREES",
            MathKind::Exp => "EXP",
            MathKind::Floor => "FLOOR",
            MathKind::Log => "LOG",
            MathKind::Log10 => "LOG10",
            MathKind::Mod => "MOD",
            MathKind::Pi => "PI",
            MathKind::Power => "POWER",
            MathKind::Radians => "RADIANS",
            MathKind::Rand => "RAND",
            MathKind::Round => "ROUND",
            MathKind::Sqrt => "SQRT",
            MathKind::Truncate => "TRUNCATE",
            MathKind::Acos => "ACOS",
            MathKind::Asin => "ASIN",
            MathKind::Atan => "ATAN",
            MathKind::Atan2 => "ATAN2",
            MathKind::Cos => "COS",
            MathKind::Cot => "COT",
            MathKind::Sin => "SIN",
            MathKind::Tan => "TAN",
        }
    }

    /// Accepted number of arguments, as an inclusive range
    pub fn arity(&self) -> (usize, usize) {
        match self {
            MathKind::Pi => (0, 0),
            MathKind::Rand => (0, 1),
            MathKind::Round | MathKind::Truncate => (1, 2),
            MathKind::Mod | MathKind::Power | MathKind::Atan2 => (2, 2),
            _ => (1, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringKind {
    Lower,
    Upper,
}

impl StringKind {
    pub fn name(&self) -> &'static str {
        match self {
            StringKind::Lower => "LOWER",
            StringKind::Upper => "UPPER",
        }
    }
}

/// Geometric functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Area,
    Box,
    Centroid,
    Circle,
    Contains,
    Coord1,
    Coord2,
    Coordsys,
    Distance,
    Intersects,
    Point,
    Polygon,
    Region,
}

impl GeometryKind {
    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Area => "AREA",
            GeometryKind::Box => "BOX",
            GeometryKind::Centroid => "CENTROID",
            GeometryKind::Circle => "CIRCLE",
            GeometryKind::Contains => "CONTAINS",
            GeometryKind::Coord1 => "COORD1",
            GeometryKind::Coord2 => "COORD2",
            GeometryKind::Coordsys => "COORDSYS",
            GeometryKind::Distance => "DISTANCE",
            GeometryKind::Intersects => "INTERSECTS",
            GeometryKind::Point => "POINT",
            GeometryKind::Polygon => "POLYGON",
            GeometryKind::Region => "REGION",
        }
    }
}

/// A geometric function call; its SQL form is chosen by the dialect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryFunction {
    pub kind: GeometryKind,
    pub args: Vec<Operand>,
}

/// `IN_UNIT(operand, 'unit')`; its SQL form is chosen by the dialect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InUnitFunction {
    pub operand: Box<Operand>,
    pub unit: String,
}

impl InUnitFunction {
    pub const NAME: &'static str = "IN_UNIT";
}

/// A call to a function ADQL does not define
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFunction {
    pub name: String,
    pub args: Vec<Operand>,
    /// Definition bound by the checker, if the function was declared
    pub definition: Option<Arc<FunctionDef>>,
}

impl UserFunction {
    pub fn new(name: impl Into<String>, args: Vec<Operand>) -> Self {
        Self {
            name: name.into(),
            args,
            definition: None,
        }
    }

    /// Builder method: bind the declared definition
    pub fn with_definition(mut self, definition: Arc<FunctionDef>) -> Self {
        self.definition = Some(definition);
        self
    }
}
