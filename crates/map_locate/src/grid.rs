//! Geographic sampling grids.
//!
//! This module defines [`Axis`] and [`GeoGrid`] to build the rectangular
//! lattice of sample points a plan is evaluated over. Points are
//! `DVec2 { x: longitude, y: latitude }` in decimal degrees, enumerated
//! row-major: the outer loop walks latitude rows, the inner loop walks
//! longitude columns. Probability fields are index-aligned with this order,
//! and renderers rely on it to place colors correctly.
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Evenly spaced samples over a closed interval.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axis {
    /// First sample value.
    pub start: f64,
    /// Last sample value.
    pub stop: f64,
    /// Number of samples, inclusive of both ends.
    pub count: usize,
}

impl Axis {
    /// Creates a new axis covering `start..=stop` with `count` samples.
    pub fn new(start: f64, stop: f64, count: usize) -> Self {
        Self { start, stop, count }
    }

    /// Materializes the sample values.
    ///
    /// A `count` of 0 or 1 yields just `start`. For larger counts the first
    /// sample is exactly `start` and the last exactly `stop`.
    pub fn values(&self) -> Vec<f64> {
        if self.count <= 1 {
            return vec![self.start];
        }

        let step = (self.stop - self.start) / (self.count - 1) as f64;
        (0..self.count)
            .map(|i| {
                if i == self.count - 1 {
                    self.stop
                } else {
                    self.start + step * i as f64
                }
            })
            .collect()
    }
}

/// A rectangular lattice of (longitude, latitude) sample points.
#[derive(Clone, Debug)]
pub struct GeoGrid {
    lat: Axis,
    lon: Axis,
    points: Vec<DVec2>,
}

impl GeoGrid {
    /// Builds the Cartesian product of the two axes, latitude rows outer,
    /// longitude columns inner.
    pub fn new(lat: Axis, lon: Axis) -> Self {
        let lats = lat.values();
        let lons = lon.values();

        let mut points = Vec::with_capacity(lats.len() * lons.len());
        for &lat_value in &lats {
            for &lon_value in &lons {
                points.push(DVec2::new(lon_value, lat_value));
            }
        }

        Self { lat, lon, points }
    }

    /// Sample points in row-major order.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Number of sample points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Latitude axis this grid was built from.
    pub fn lat(&self) -> Axis {
        self.lat
    }

    /// Longitude axis this grid was built from.
    pub fn lon(&self) -> Axis {
        self.lon
    }

    /// Lower-left and upper-right corners of the covered area,
    /// as (longitude, latitude) points.
    pub fn bounds(&self) -> (DVec2, DVec2) {
        let min = DVec2::new(
            self.lon.start.min(self.lon.stop),
            self.lat.start.min(self.lat.stop),
        );
        let max = DVec2::new(
            self.lon.start.max(self.lon.stop),
            self.lat.start.max(self.lat.stop),
        );
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn axis_values_cover_both_ends_evenly() {
        let values = Axis::new(0.0, 1.0, 5).values();
        assert_eq!(values.len(), 5);
        approx_eq(values[0], 0.0);
        approx_eq(values[4], 1.0);

        let step = values[1] - values[0];
        for pair in values.windows(2) {
            approx_eq(pair[1] - pair[0], step);
        }
    }

    #[test]
    fn axis_last_value_is_exactly_stop() {
        let values = Axis::new(52.0, 53.0, 100).values();
        assert_eq!(values.len(), 100);
        assert_eq!(values[0], 52.0);
        assert_eq!(values[99], 53.0);
    }

    #[test]
    fn degenerate_axis_yields_start_only() {
        assert_eq!(Axis::new(13.4, 14.2, 1).values(), vec![13.4]);
        assert_eq!(Axis::new(13.4, 14.2, 0).values(), vec![13.4]);
    }

    #[test]
    fn grid_enumerates_row_major() {
        let grid = GeoGrid::new(Axis::new(52.0, 53.0, 3), Axis::new(13.0, 14.0, 2));
        assert_eq!(grid.len(), 6);

        // First row shares the first latitude and walks longitudes.
        assert_eq!(grid.points()[0], DVec2::new(13.0, 52.0));
        assert_eq!(grid.points()[1], DVec2::new(14.0, 52.0));
        assert_eq!(grid.points()[2].y, 52.5);
        assert_eq!(grid.points()[3].y, 52.5);
        assert_eq!(grid.points()[5], DVec2::new(14.0, 53.0));
    }

    #[test]
    fn bounds_are_orientation_independent() {
        let grid = GeoGrid::new(Axis::new(53.0, 52.0, 2), Axis::new(14.0, 13.0, 2));
        let (min, max) = grid.bounds();
        assert_eq!(min, DVec2::new(13.0, 52.0));
        assert_eq!(max, DVec2::new(14.0, 53.0));
    }
}
