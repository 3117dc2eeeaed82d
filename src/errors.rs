// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised when a generator is handed arguments it cannot work
//! with.  Every variant is a precondition failure; nothing in the
//! numeric core can fail once its inputs have been accepted.

use failure::Fail;

/// The ways a caller can hand us something unusable.
#[derive(Debug, Fail, PartialEq)]
pub enum FractalError {
    /// A polygon needs at least three corners.
    #[fail(display = "A polygon needs at least 3 corners, got {}", _0)]
    TooFewCorners(usize),

    /// All corners sit on a single line (or a single point).
    #[fail(display = "The polygon's corners are collinear")]
    DegeneratePolygon,

    /// A corner coordinate is NaN or infinite.
    #[fail(display = "Corner {} has a non-finite coordinate", _0)]
    NonFiniteCorner(usize),

    /// Contraction ratios live strictly between zero and one.
    #[fail(display = "Contraction ratio must lie in (0, 1), got {}", _0)]
    InvalidRatio(f64),

    /// The escape-time test needs at least one iteration.
    #[fail(display = "Iteration count must be at least 1")]
    InvalidIterations,

    /// Negative or NaN escape radius.
    #[fail(display = "Escape radius must be a non-negative number, got {}", _0)]
    InvalidRadius(f64),

    /// The corners of a complex region are out of order.
    #[fail(display = "Invalid region: {}", _0)]
    InvalidRegion(String),

    /// Grid density must be positive and finite.
    #[fail(display = "Grid density must be positive and finite, got {}", _0)]
    InvalidDensity(f64),

    /// Explicit grid rows of differing lengths.
    #[fail(display = "Grid row {} has {} samples, expected {}", _0, _1, _2)]
    RaggedGrid(usize, usize, usize),

    /// A worker pool with no workers.
    #[fail(display = "Thread count must be at least 1")]
    InvalidThreads,

    /// One of the filter's worker threads panicked.
    #[fail(display = "A worker thread panicked")]
    WorkerPanic,

    /// Textual input that could not be parsed.
    #[fail(display = "Could not parse {:?}: {}", _0, _1)]
    Parse(String, String),
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, FractalError>;
