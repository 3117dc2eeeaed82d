// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time filter.
//!
//! A point `c` on the complex plane is in the Mandelbrot set if the
//! orbit of zero under `z -> z² + c` never goes to infinity.  We can't
//! iterate forever, so we settle for a fixed number of iterations and
//! ask whether the orbit is still inside some escape radius at the end.
//! Every sample is independent of every other, so the filter can be
//! spread over as many threads as we like without changing the result.

use std::sync::{Arc, Mutex};

use crossbeam::thread::ScopedJoinHandle;
use log::{debug, trace};
use num::Complex;

use crate::errors::{FractalError, Result};
use crate::planes::ComplexGrid;

/// Iteration count of the default Mandelbrot view.
pub const DEFAULT_ITERATIONS: usize = 30;

/// Escape radius of the default Mandelbrot view.  Anything that is
/// really diverging is far past this after thirty iterations.
pub const DEFAULT_RADIUS: f64 = 30.0;

/// Once an orbit is outside this radius it is guaranteed to keep
/// growing, so it is safe to stop iterating early.
const ESCAPE_BOUND: f64 = 2.0;

/// The parameters of an escape-time test.  Once built, this object
/// should not be mutable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EscapeTime {
    max_iterations: usize,
    escape_radius: f64,
}

impl EscapeTime {
    /// Requires at least one iteration and a radius that is neither
    /// negative nor NaN.  An infinite radius is allowed.
    pub fn new(max_iterations: usize, escape_radius: f64) -> Result<Self> {
        if max_iterations == 0 {
            return Err(FractalError::InvalidIterations);
        }
        if !(escape_radius >= 0.0) {
            return Err(FractalError::InvalidRadius(escape_radius));
        }
        Ok(EscapeTime {
            max_iterations,
            escape_radius,
        })
    }

    /// Number of iterations per sample.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// The inclusive radius the orbit must stay within.
    pub fn escape_radius(&self) -> f64 {
        self.escape_radius
    }

    /// Whether the orbit of zero under `z² + c` is still within the
    /// escape radius after every iteration has run.  Overflow turns into
    /// infinity or NaN, neither of which compares as inside.
    pub fn is_stable(&self, c: Complex<f64>) -> bool {
        let limit = self.escape_radius * self.escape_radius;
        let early_exit = self.escape_radius >= ESCAPE_BOUND;
        let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
        for _ in 0..self.max_iterations {
            z = z * z + c;
            // norm_sqr is the cheap filter; norm decides.
            if early_exit && z.norm_sqr() > limit && z.norm() > self.escape_radius {
                return false;
            }
        }
        let distance = z.norm();
        distance.is_finite() && distance <= self.escape_radius
    }

    /// The stability of every sample in the grid, in grid order.
    pub fn mask(&self, grid: &ComplexGrid) -> StabilityMask {
        StabilityMask {
            rows: grid.rows(),
            columns: grid.columns(),
            stable: grid.samples().iter().map(|c| self.is_stable(*c)).collect(),
        }
    }

    /// The stable samples of the grid, row by row.  Row and column
    /// are dropped; zip the grid against `mask()` to keep them.
    pub fn filter(&self, grid: &ComplexGrid) -> Vec<Complex<f64>> {
        debug!(
            "filtering {}x{} grid: {} iterations, radius {}",
            grid.rows(),
            grid.columns(),
            self.max_iterations,
            self.escape_radius
        );
        self.filter_row(grid.samples())
    }

    fn filter_row(&self, samples: &[Complex<f64>]) -> Vec<Complex<f64>> {
        samples
            .iter()
            .cloned()
            .filter(|c| self.is_stable(*c))
            .collect()
    }

    /// A multi-threaded version of `filter`.  Workers pull rows off a
    /// shared queue; the rows are put back in order afterwards, so the
    /// result is identical to the single-threaded one.
    pub fn filter_threaded(&self, grid: &ComplexGrid, threads: usize) -> Result<Vec<Complex<f64>>> {
        if threads == 0 {
            return Err(FractalError::InvalidThreads);
        }
        debug!(
            "filtering {}x{} grid on {} threads: {} iterations, radius {}",
            grid.rows(),
            grid.columns(),
            threads,
            self.max_iterations,
            self.escape_radius
        );

        let rows = Arc::new(Mutex::new(grid.row_samples().enumerate()));
        let mut finished: Vec<(usize, Vec<Complex<f64>>)> = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Vec<(usize, Vec<Complex<f64>>)>>> = (0..threads)
                .map(|worker| {
                    let rows = rows.clone();
                    spawner.spawn(move |_| {
                        let mut done = vec![];
                        loop {
                            let row = { rows.lock().ok().and_then(|mut rows| rows.next()) };
                            match row {
                                Some((index, samples)) => {
                                    done.push((index, self.filter_row(samples)));
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        trace!("worker {} filtered {} rows", worker, done.len());
                        done
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().map_err(|_| FractalError::WorkerPanic))
                .collect::<Result<Vec<_>>>()
        })
        .map_err(|_| FractalError::WorkerPanic)??
        .into_iter()
        .flatten()
        .collect();

        finished.sort_by_key(|(index, _)| *index);
        Ok(finished.into_iter().flat_map(|(_, row)| row).collect())
    }
}

/// Whether each sample of a grid survived the escape-time test, row
/// by row.
#[derive(Clone, Debug, PartialEq)]
pub struct StabilityMask {
    rows: usize,
    columns: usize,
    stable: Vec<bool>,
}

impl StabilityMask {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether the sample at a row and column is stable.
    pub fn get(&self, row: usize, column: usize) -> Option<bool> {
        if row < self.rows && column < self.columns {
            Some(self.stable[row * self.columns + column])
        } else {
            None
        }
    }

    /// The raw flags, row-major.
    pub fn as_slice(&self) -> &[bool] {
        &self.stable
    }

    /// How many samples are stable.
    pub fn count(&self) -> usize {
        self.stable.iter().filter(|s| **s).count()
    }

    /// The samples of `grid` where the mask is set.
    pub fn select(&self, grid: &ComplexGrid) -> Vec<Complex<f64>> {
        grid.samples()
            .iter()
            .zip(&self.stable)
            .filter(|(_, stable)| **stable)
            .map(|(c, _)| *c)
            .collect()
    }
}

/// Free-standing form of `EscapeTime::is_stable`.
pub fn is_stable(c: Complex<f64>, max_iterations: usize, escape_radius: f64) -> Result<bool> {
    Ok(EscapeTime::new(max_iterations, escape_radius)?.is_stable(c))
}

/// Free-standing form of `EscapeTime::filter`.
pub fn filter_members(
    grid: &ComplexGrid,
    max_iterations: usize,
    escape_radius: f64,
) -> Result<Vec<Complex<f64>>> {
    Ok(EscapeTime::new(max_iterations, escape_radius)?.filter(grid))
}
