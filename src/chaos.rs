// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The chaos game.
//!
//! Start with a point, pick one of the polygon's corners at random,
//! and move the point part of the way toward that corner.  Do it again.
//! And again.  The points visited converge onto the attractor of the
//! iterated function system defined by the corners: for three corners
//! and a ratio of one half, the Sierpinski triangle; for six corners
//! and a ratio of three quarters, the Sierpinski hexagon.
//!
//! Each step depends on the step before it, so a single run cannot be
//! split across threads.  Independent runs can, provided each has its
//! own random source.

use log::debug;
use rand::Rng;

use crate::errors::Result;
use crate::points::{ContractionRatio, Point2D, Polygon};

/// Where the running point starts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Seed {
    /// A uniformly random point inside the triangle spanned by the
    /// polygon's first three corners.
    InsideTriangle,
    /// One of the polygon's corners, chosen uniformly.
    RandomCorner,
    /// A caller-chosen starting point.
    At(Point2D),
}

impl Seed {
    fn select<R: Rng + ?Sized>(self, polygon: &Polygon, rng: &mut R) -> Point2D {
        let corners = polygon.corners();
        match self {
            Seed::InsideTriangle => point_in_triangle(corners[0], corners[1], corners[2], rng),
            Seed::RandomCorner => corners[rng.gen_range(0, corners.len())],
            Seed::At(p) => p,
        }
    }
}

/// A uniformly-distributed random point inside the triangle (p1, p2,
/// p3).  Sorting the two draws folds the unit square onto the simplex,
/// which keeps the distribution even across the whole triangle.
/// Collinear corners produce collinear points.
pub fn point_in_triangle<R: Rng + ?Sized>(
    p1: Point2D,
    p2: Point2D,
    p3: Point2D,
    rng: &mut R,
) -> Point2D {
    let (a, b): (f64, f64) = (rng.gen(), rng.gen());
    let (x, y) = if a <= b { (a, b) } else { (b, a) };
    let (s, t, u) = (x, y - x, 1.0 - y);
    s * p1 + t * p2 + u * p3
}

/// One step of the game: move `p` a fraction `1 - ratio` of the way
/// toward `corner`.
#[inline]
pub fn contract(p: Point2D, corner: Point2D, ratio: ContractionRatio) -> Point2D {
    let r = ratio.value();
    r * p + (1.0 - r) * corner
}

/// The lazy form of the chaos game.  Yields the polygon's corners in
/// order, then exactly `n` generated points.  Once consumed it cannot
/// be restarted; build a new one from an identically seeded random
/// source to replay a run.
pub struct ChaosGame<R> {
    polygon: Polygon,
    ratio: ContractionRatio,
    rng: R,
    current: Point2D,
    corner: usize,
    remaining: usize,
}

impl<R: Rng> ChaosGame<R> {
    /// Draws the starting point from `rng` according to `seed`.  `n`
    /// is capped so that corners plus points still fit in a `usize`.
    pub fn new(n: usize, polygon: Polygon, ratio: ContractionRatio, seed: Seed, mut rng: R) -> Self {
        let n = n.min(usize::MAX - polygon.len());
        let current = seed.select(&polygon, &mut rng);
        debug!(
            "chaos game: {} corners, ratio {}, {} points, starting at {:?}",
            polygon.len(),
            ratio.value(),
            n,
            current
        );
        ChaosGame {
            polygon,
            ratio,
            rng,
            current,
            corner: 0,
            remaining: n,
        }
    }

    /// The Sierpinski triangle: midpoint steps from a random interior
    /// point.  Fails if the corners do not form a triangle.
    pub fn triangle(n: usize, corners: Vec<Point2D>, rng: R) -> Result<Self> {
        let polygon = Polygon::new(corners)?;
        Ok(ChaosGame::new(n, polygon, ContractionRatio::HALF, Seed::InsideTriangle, rng))
    }

    /// The Sierpinski hexagon over the unit hexagon, three-quarter steps
    /// from a random corner.
    pub fn hexagon(n: usize, rng: R) -> Self {
        ChaosGame::new(
            n,
            Polygon::hexagon(),
            ContractionRatio::THREE_QUARTERS,
            Seed::RandomCorner,
            rng,
        )
    }

    /// The polygon driving this run.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

impl<R: Rng> Iterator for ChaosGame<R> {
    type Item = Point2D;

    fn next(&mut self) -> Option<Point2D> {
        let corners = self.polygon.corners();
        if self.corner < corners.len() {
            self.corner += 1;
            return Some(corners[self.corner - 1]);
        }
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let target = corners[self.rng.gen_range(0, corners.len())];
        self.current = contract(self.current, target, self.ratio);
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.polygon.len() - self.corner + self.remaining;
        (left, Some(left))
    }
}

impl<R: Rng> ExactSizeIterator for ChaosGame<R> {}

/// Runs the chaos game to completion and collects the points.  The
/// result holds `polygon.len() + n` points, the corners first.
pub fn generate<R: Rng>(
    n: usize,
    polygon: Polygon,
    ratio: ContractionRatio,
    seed: Seed,
    rng: R,
) -> Vec<Point2D> {
    ChaosGame::new(n, polygon, ratio, seed, rng).collect()
}

/// Collects a whole `ChaosGame::triangle` run.
pub fn sierpinski_triangle<R: Rng>(n: usize, corners: Vec<Point2D>, rng: R) -> Result<Vec<Point2D>> {
    Ok(ChaosGame::triangle(n, corners, rng)?.collect())
}

/// Collects a whole `ChaosGame::hexagon` run.
pub fn sierpinski_hexagon<R: Rng>(n: usize, rng: R) -> Vec<Point2D> {
    ChaosGame::hexagon(n, rng).collect()
}
