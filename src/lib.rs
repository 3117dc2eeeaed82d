#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fractal point generators
//!
//! Two unrelated ways of finding the points of a fractal.
//!
//! The chaos game takes a polygon and a running point, and moves the
//! point part of the way toward a randomly chosen corner, over and
//! over.  The points visited fall onto the attractor of the iterated
//! function system the corners define: the Sierpinski triangle for
//! three corners and half steps, the Sierpinski hexagon for six corners
//! and three-quarter steps.  The points come out in order, so a
//! renderer can draw them all at once or reveal them one at a time.
//!
//! The escape-time filter samples a rectangle of the complex plane and
//! keeps the points whose orbit under `z -> z² + c` is still close to
//! the origin after a fixed number of iterations.  What's left is an
//! approximation of the Mandelbrot set.
//!
//! Neither generator renders anything.  They hand back points; drawing
//! them is someone else's problem.

pub mod chaos;
pub mod errors;
pub mod escape;
pub mod parse;
pub mod planes;
pub mod points;

pub use crate::chaos::{generate, sierpinski_hexagon, sierpinski_triangle, ChaosGame, Seed};
pub use crate::errors::{FractalError, Result};
pub use crate::escape::{filter_members, is_stable, EscapeTime, StabilityMask};
pub use crate::planes::ComplexGrid;
pub use crate::points::{ContractionRatio, Point2D, Polygon};
