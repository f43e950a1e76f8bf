//! Planar distance primitives over coordinate-space points and polylines.
//!
//! Distances are Euclidean in the same unit as the input coordinates
//! (decimal degrees) with no geodesic correction, so a value of `0.01` means
//! a hundredth of a degree, not a physical length.
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Euclidean distance between two points in raw coordinate units.
#[inline]
pub fn point_distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Distance from `p` to the closed segment `a`-`b`.
///
/// Projects `p` onto the segment interior when the projection parameter
/// falls within `[0, 1]`; otherwise the nearer endpoint wins. A degenerate
/// segment (`a == b`) falls back to point distance.
pub fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// An ordered sequence of connected line segments defined by consecutive
/// coordinate points.
///
/// Point order defines segment connectivity and must match the source data;
/// reversing it changes distances to any point that is not exactly
/// equidistant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    points: Vec<DVec2>,
}

impl Polyline {
    /// Creates a polyline from at least two `(longitude, latitude)` points.
    pub fn try_new(points: Vec<DVec2>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InvalidConfig(format!(
                "polyline requires at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Creates the two-point polyline spanning `start` to `end`.
    pub fn segment(start: DVec2, end: DVec2) -> Self {
        Self {
            points: vec![start, end],
        }
    }

    /// Vertices in input order.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Minimum Euclidean distance from `p` to any point on the polyline,
    /// including perpendicular projections onto segment interiors.
    pub fn distance_to(&self, p: DVec2) -> f64 {
        match self.points.as_slice() {
            [] => f64::INFINITY,
            [single] => point_distance(p, *single),
            points => points
                .windows(2)
                .map(|pair| segment_distance(p, pair[0], pair[1]))
                .fold(f64::INFINITY, f64::min),
        }
    }
}
