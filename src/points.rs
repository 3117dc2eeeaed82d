// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The real-plane types the chaos game works with: points, the
//! polygons whose corners anchor an attractor, and the contraction
//! ratio applied at every step.

use std::ops::{Add, Mul};

use crate::errors::{FractalError, Result};

/// √3/2, the x-extent of the unit hexagon and the height of the unit
/// equilateral triangle.
pub const SQRT_3_2: f64 = 0.866_025_403_784_438_6;

/// A point on the real cartesian plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point2D {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2D {
    /// Constructor.
    pub fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2D {
    type Output = Point2D;
    fn add(self, other: Point2D) -> Point2D {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Mul<Point2D> for f64 {
    type Output = Point2D;
    fn mul(self, p: Point2D) -> Point2D {
        Point2D::new(self * p.x, self * p.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D::new(x, y)
    }
}

/// The fixed corners of an attractor.  At least three finite corners
/// that do not all lie on one line.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    corners: Vec<Point2D>,
}

impl Polygon {
    /// Validates the corner list.
    pub fn new(corners: Vec<Point2D>) -> Result<Self> {
        if corners.len() < 3 {
            return Err(FractalError::TooFewCorners(corners.len()));
        }
        if let Some(i) = corners.iter().position(|c| !c.is_finite()) {
            return Err(FractalError::NonFiniteCorner(i));
        }
        if collinear(&corners) {
            return Err(FractalError::DegeneratePolygon);
        }
        Ok(Polygon { corners })
    }

    /// The default equilateral triangle with unit sides, resting on the
    /// x-axis at the origin.
    pub fn triangle() -> Self {
        Polygon {
            corners: vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(1.0, 0.0),
                Point2D::new(0.5, SQRT_3_2),
            ],
        }
    }

    /// The unit hexagon, starting from the top corner and running
    /// clockwise.
    pub fn hexagon() -> Self {
        Polygon {
            corners: vec![
                Point2D::new(0.0, 1.0),
                Point2D::new(SQRT_3_2, 0.5),
                Point2D::new(SQRT_3_2, -0.5),
                Point2D::new(0.0, -1.0),
                Point2D::new(-SQRT_3_2, -0.5),
                Point2D::new(-SQRT_3_2, 0.5),
            ],
        }
    }

    /// The corners, in the order given.
    pub fn corners(&self) -> &[Point2D] {
        &self.corners
    }

    /// Number of corners.
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    /// Always false; a valid polygon has corners.
    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }
}

// True when every corner lies on one line through the first corner:
// every pair of offsets from it has a zero cross product.
fn collinear(corners: &[Point2D]) -> bool {
    let origin = corners[0];
    let offsets: Vec<(f64, f64)> = corners[1..]
        .iter()
        .map(|c| (c.x - origin.x, c.y - origin.y))
        .collect();
    offsets.iter().enumerate().all(|(i, a)| {
        offsets[i + 1..]
            .iter()
            .all(|b| a.0 * b.1 - a.1 * b.0 == 0.0)
    })
}

/// How much of the running point survives each step.  The new point is
/// `ratio * previous + (1 - ratio) * corner`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContractionRatio(f64);

impl ContractionRatio {
    /// The classic Sierpinski triangle midpoint step.
    pub const HALF: ContractionRatio = ContractionRatio(0.5);

    /// The Sierpinski hexagon step.  Not a midpoint, and not meant to
    /// be one.
    pub const THREE_QUARTERS: ContractionRatio = ContractionRatio(0.75);

    /// Accepts any value strictly between zero and one.
    pub fn new(ratio: f64) -> Result<Self> {
        if ratio > 0.0 && ratio < 1.0 {
            Ok(ContractionRatio(ratio))
        } else {
            Err(FractalError::InvalidRatio(ratio))
        }
    }

    /// The raw ratio.
    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_needs_three_corners() {
        let p = Polygon::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
        assert_eq!(p, Err(FractalError::TooFewCorners(2)));
    }

    #[test]
    fn polygon_rejects_collinear_corners() {
        let p = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 2.0),
        ]);
        assert_eq!(p, Err(FractalError::DegeneratePolygon));
    }

    #[test]
    fn polygon_rejects_repeated_corners() {
        let p = Polygon::new(vec![Point2D::new(1.0, 2.0); 4]);
        assert_eq!(p, Err(FractalError::DegeneratePolygon));
    }

    #[test]
    fn self_intersecting_polygon_is_not_degenerate() {
        let bowtie = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
        ];
        assert!(Polygon::new(bowtie).is_ok());
    }

    #[test]
    fn polygon_rejects_nan_corners() {
        let p = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(std::f64::NAN, 1.0),
            Point2D::new(2.0, 0.0),
        ]);
        assert_eq!(p, Err(FractalError::NonFiniteCorner(1)));
    }

    #[test]
    fn default_polygons_are_valid() {
        assert!(Polygon::new(Polygon::triangle().corners().to_vec()).is_ok());
        assert!(Polygon::new(Polygon::hexagon().corners().to_vec()).is_ok());
        assert_eq!(Polygon::hexagon().len(), 6);
    }

    #[test]
    fn ratio_is_open_interval() {
        assert!(ContractionRatio::new(0.0).is_err());
        assert!(ContractionRatio::new(1.0).is_err());
        assert!(ContractionRatio::new(std::f64::NAN).is_err());
        assert_eq!(ContractionRatio::new(0.75), Ok(ContractionRatio::THREE_QUARTERS));
    }
}
