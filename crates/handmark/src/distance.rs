//! Distances between landmarks, for gestures like pinching.

use nalgebra::Point2;

use crate::extract::PixelLandmark;
use crate::{Error, Result};

/// A 2D pixel position in double precision.
pub type Point = Point2<f64>;

/// The distance between two points and the midpoint between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    start: Point,
    end: Point,
    distance: f64,
    midpoint: Point,
}

impl Distance {
    /// Returns the Euclidean distance between the two points.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        self.midpoint
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns both points as `[x1, y1, x2, y2]`.
    pub fn endpoints(&self) -> [f64; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }

    /// Returns whether the points are at most `threshold` pixels apart.
    ///
    /// This is the pinch check: thumb and index fingertip closer than some threshold.
    pub fn is_within(&self, threshold: f64) -> bool {
        self.distance <= threshold
    }
}

/// Computes the Euclidean distance and the midpoint between `a` and `b`.
///
/// Accepts [`PixelLandmark`]s, `[f64; 2]` arrays and [`Point`]s. Fails with
/// [`Error::InvalidPoint`] if a coordinate is NaN or infinite.
pub fn distance(a: impl Into<Point>, b: impl Into<Point>) -> Result<Distance> {
    let (start, end) = (check_finite(a.into())?, check_finite(b.into())?);
    Ok(Distance {
        start,
        end,
        distance: nalgebra::distance(&start, &end),
        midpoint: nalgebra::center(&start, &end),
    })
}

fn check_finite(p: Point) -> Result<Point> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(p)
    } else {
        Err(Error::InvalidPoint(format!(
            "coordinates ({}, {}) are not finite",
            p.x, p.y
        )))
    }
}

/// Parses a point from raw coordinates.
///
/// Both `[x, y]` and `[id, x, y]` (a landmark with its id) are accepted. Any other length, and
/// non-finite coordinates, fail with [`Error::InvalidPoint`].
pub fn point_from_coords(coords: &[f64]) -> Result<Point> {
    let (x, y) = match *coords {
        [x, y] | [_, x, y] => (x, y),
        _ => {
            return Err(Error::InvalidPoint(format!(
                "expected `[x, y]` or `[id, x, y]`, got {} values",
                coords.len()
            )))
        }
    };
    check_finite(Point::new(x, y))
}

impl From<PixelLandmark> for Point {
    fn from(lm: PixelLandmark) -> Self {
        Point::new(f64::from(lm.x()), f64::from(lm.y()))
    }
}
