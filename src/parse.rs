// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning command-line text into points and complex numbers.

use std::str::FromStr;

use num::Complex;

use crate::errors::{FractalError, Result};
use crate::points::Point2D;

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (
            T::from_str(s[..index].trim()),
            T::from_str(s[index + 1..].trim()),
        ) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and expecting
/// floating point numbers.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

/// An `x,y` pair as a point.
pub fn parse_point(s: &str) -> Option<Point2D> {
    parse_pair(s, ',').map(|(x, y)| Point2D { x, y })
}

/// A semicolon-separated list of `x,y` corners.
pub fn parse_corners(s: &str) -> Result<Vec<Point2D>> {
    s.split(';')
        .map(|corner| {
            parse_point(corner).ok_or_else(|| {
                FractalError::Parse(corner.to_string(), "expected a pair like 0.5,1".to_string())
            })
        })
        .collect()
}
