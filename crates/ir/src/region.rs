// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Regions
//!
//! Geometric values of the query language. Dialects convert them to and from
//! their native geometry encoding; [`fmt::Display`] renders the STC-S form:
//!
//! ```text
//! Position ICRS 10 20
//! Circle ICRS 10 20 0.5
//! Box 10 20 2 1
//! Polygon ICRS 0 0 1 0 1 1
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pair of coordinates, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// A region literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Region {
    Position {
        frame: Option<String>,
        point: Coordinates,
    },
    Circle {
        frame: Option<String>,
        center: Coordinates,
        radius: f64,
    },
    Box {
        frame: Option<String>,
        center: Coordinates,
        width: f64,
        height: f64,
    },
    Polygon {
        frame: Option<String>,
        vertices: Vec<Coordinates>,
    },
}

impl Region {
    pub fn position(x: f64, y: f64) -> Self {
        Region::Position {
            frame: None,
            point: Coordinates::new(x, y),
        }
    }

    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        Region::Circle {
            frame: None,
            center: Coordinates::new(x, y),
            radius,
        }
    }

    /// Builder method: set the coordinate frame
    pub fn with_frame(mut self, new_frame: impl Into<String>) -> Self {
        match &mut self {
            Region::Position { frame, .. }
            | Region::Circle { frame, .. }
            | Region::Box { frame, .. }
            | Region::Polygon { frame, .. } => *frame = Some(new_frame.into()),
        }
        self
    }

    pub fn frame(&self) -> Option<&str> {
        match self {
            Region::Position { frame, .. }
            | Region::Circle { frame, .. }
            | Region::Box { frame, .. }
            | Region::Polygon { frame, .. } => frame.as_deref(),
        }
    }

    /// STC-S shape keyword
    pub fn shape(&self) -> &'static str {
        match self {
            Region::Position { .. } => "Position",
            Region::Circle { .. } => "Circle",
            Region::Box { .. } => "Box",
            Region::Polygon { .. } => "Polygon",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shape())?;
        if let Some(frame) = self.frame() {
            write!(f, " {frame}")?;
        }
        match self {
            Region::Position { point, .. } => write!(f, " {point}"),
            Region::Circle { center, radius, .. } => write!(f, " {center} {radius}"),
            Region::Box {
                center,
                width,
                height,
                ..
            } => write!(f, " {center} {width} {height}"),
            Region::Polygon { vertices, .. } => {
                for vertex in vertices {
                    write!(f, " {vertex}")?;
                }
                Ok(())
            }
        }
    }
}
