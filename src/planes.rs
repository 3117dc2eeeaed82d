// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the ComplexGrid struct, a rectangle of evenly spaced
//! samples on the complex plane.  The real part of each sample varies
//! along the columns and the imaginary part along the rows, with the
//! leftlower corner of the region at row 0, column 0.
use itertools::iproduct;
use num::Complex;

use crate::errors::{FractalError, Result};

/// The leftlower corner of the default Mandelbrot view.
pub const DEFAULT_LEFTLOWER: Complex<f64> = Complex { re: -2.0, im: -1.5 };

/// The rightupper corner of the default Mandelbrot view.
pub const DEFAULT_RIGHTUPPER: Complex<f64> = Complex { re: 0.5, im: 1.5 };

/// Samples per unit length of the default Mandelbrot view.
pub const DEFAULT_DENSITY: f64 = 100.0;

/// Evenly spaced points across `count` samples from `low` to `high`,
/// both ends included.  A single sample sits on `low`.
fn linspace(low: f64, high: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![low];
    }
    let step = (high - low) / ((count - 1) as f64);
    (0..count).map(|i| low + (i as f64) * step).collect()
}

/// A row-major grid of complex samples.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexGrid {
    rows: usize,
    columns: usize,
    samples: Vec<Complex<f64>>,
}

impl ComplexGrid {
    /// Constructor.  Takes the leftlower and rightupper corners of a
    /// region of the complex plane and the number of samples per unit
    /// length along each axis.
    pub fn new(leftlower: Complex<f64>, rightupper: Complex<f64>, density: f64) -> Result<Self> {
        if !(density > 0.0 && density.is_finite()) {
            return Err(FractalError::InvalidDensity(density));
        }

        if !(rightupper.re > leftlower.re) {
            return Err(FractalError::InvalidRegion(
                "The left lower corner is not to the left of the right upper corner.".to_string(),
            ));
        }

        if !(rightupper.im > leftlower.im) {
            return Err(FractalError::InvalidRegion(
                "The left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        let columns = ((rightupper.re - leftlower.re) * density) as usize;
        let rows = ((rightupper.im - leftlower.im) * density) as usize;
        if rows == 0 || columns == 0 {
            return Err(FractalError::InvalidRegion(format!(
                "A density of {} leaves no samples in the region",
                density
            )));
        }

        let re = linspace(leftlower.re, rightupper.re, columns);
        let im = linspace(leftlower.im, rightupper.im, rows);
        let samples = iproduct!(im.iter(), re.iter())
            .map(|(&im, &re)| Complex::new(re, im))
            .collect();

        Ok(ComplexGrid {
            rows,
            columns,
            samples,
        })
    }

    /// A grid built from explicit rows of samples.  Every row must have
    /// the same length.
    pub fn from_rows(rows: Vec<Vec<Complex<f64>>>) -> Result<Self> {
        let columns = rows.first().map_or(0, |r| r.len());
        if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(FractalError::RaggedGrid(i, r.len(), columns));
        }
        Ok(ComplexGrid {
            rows: rows.len(),
            columns,
            samples: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows (samples along the imaginary axis).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (samples along the real axis).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The total number of samples in the grid.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Describes that the grid holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample at a given row and column, if there is one.
    pub fn get(&self, row: usize, column: usize) -> Option<Complex<f64>> {
        if row < self.rows && column < self.columns {
            Some(self.samples[row * self.columns + column])
        } else {
            None
        }
    }

    /// Every sample, row by row.
    pub fn samples(&self) -> &[Complex<f64>] {
        &self.samples
    }

    /// The grid split into its rows.
    pub fn row_samples(&self) -> std::slice::Chunks<'_, Complex<f64>> {
        self.samples.chunks(self.columns.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_fails_on_bad_shape() {
        let g = ComplexGrid::new(Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0), 2.0);
        assert!(g.is_err());
        let g = ComplexGrid::new(Complex::new(1.0, -1.0), Complex::new(-1.0, 1.0), 2.0);
        assert!(g.is_err());
    }

    #[test]
    fn grid_fails_on_bad_density() {
        let (ll, ru) = (Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert_eq!(ComplexGrid::new(ll, ru, 0.0), Err(FractalError::InvalidDensity(0.0)));
        assert!(ComplexGrid::new(ll, ru, -3.0).is_err());
        assert!(ComplexGrid::new(ll, ru, std::f64::INFINITY).is_err());
        assert!(ComplexGrid::new(ll, ru, 0.1).is_err());
    }

    #[test]
    fn grid_shape_follows_density() {
        let g = ComplexGrid::new(DEFAULT_LEFTLOWER, DEFAULT_RIGHTUPPER, DEFAULT_DENSITY).unwrap();
        assert_eq!(g.columns(), 250);
        assert_eq!(g.rows(), 300);
        assert_eq!(g.len(), 75_000);
    }

    #[test]
    fn grid_includes_both_corners() {
        let g = ComplexGrid::new(Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0), 1.25).unwrap();
        assert_eq!(g.rows(), 5);
        assert_eq!(g.columns(), 5);
        assert_eq!(g.get(0, 0), Some(Complex::new(-2.0, -2.0)));
        assert_eq!(g.get(2, 2), Some(Complex::new(0.0, 0.0)));
        assert_eq!(g.get(4, 4), Some(Complex::new(2.0, 2.0)));
        assert_eq!(g.get(5, 0), None);
    }

    #[test]
    fn real_part_varies_along_columns() {
        let g = ComplexGrid::new(Complex::new(0.0, 0.0), Complex::new(3.0, 2.0), 1.0).unwrap();
        assert_eq!(g.columns(), 3);
        assert_eq!(g.rows(), 2);
        for (row, samples) in g.row_samples().enumerate() {
            assert!(samples.iter().all(|c| c.im == samples[0].im));
            assert_eq!(samples[0].im, row as f64 * 2.0);
        }
        assert_eq!(g.get(1, 2), Some(Complex::new(3.0, 2.0)));
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let g = ComplexGrid::from_rows(vec![
            vec![Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)],
            vec![Complex::new(0.0, 1.0)],
        ]);
        assert_eq!(g, Err(FractalError::RaggedGrid(1, 1, 2)));
    }

    #[test]
    fn from_rows_single_sample() {
        let g = ComplexGrid::from_rows(vec![vec![Complex::new(0.0, 0.0)]]).unwrap();
        assert_eq!(g.rows(), 1);
        assert_eq!(g.columns(), 1);
        assert!(!g.is_empty());
    }
}
