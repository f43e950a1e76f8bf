//! Scatter-heatmap PNG rendering for grid-aligned probability fields.
//!
//! Each grid point is drawn as a filled marker colored by its field value,
//! normalized over the field's finite range and mapped through a viridis
//! ramp. A vertical gradient strip on the right serves as the color legend.
use std::path::Path;

use anyhow::ensure;
use glam::DVec2;
use image::{Rgb, RgbImage};
use map_locate::field::ProbabilityField;
use map_locate::grid::GeoGrid;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes tracing with a default `info` filter.
///
/// Use the `RUST_LOG` environment variable to override the default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

const LEGEND_PAD: u32 = 12;

/// Parameters for heatmap rendering.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Plot area width in pixels.
    pub width: u32,
    /// Plot area height in pixels.
    pub height: u32,
    /// Marker radius in pixels.
    pub marker_radius: i64,
    /// Background color.
    pub background: [u8; 3],
    /// Width of the color-legend strip in pixels; 0 disables the legend.
    pub legend_width: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 900,
            marker_radius: 5,
            background: [20, 20, 26],
            legend_width: 36,
        }
    }
}

/// Renders the field as a scatter heatmap over the grid and writes it as a
/// PNG to `path`.
pub fn render_heatmap_to_png(
    grid: &GeoGrid,
    field: &ProbabilityField,
    config: &RenderConfig,
    path: &Path,
) -> anyhow::Result<()> {
    ensure!(
        field.len() == grid.len(),
        "field has {} values for {} grid points",
        field.len(),
        grid.len()
    );
    ensure!(
        config.width > 0 && config.height > 0,
        "plot area must not be empty"
    );

    let image_width = if config.legend_width > 0 {
        config.width + config.legend_width + 2 * LEGEND_PAD
    } else {
        config.width
    };
    let mut image = RgbImage::from_pixel(image_width, config.height, Rgb(config.background));

    let (min_value, max_value) = value_range(field.values());
    let inv_range = 1.0 / (max_value - min_value);
    let (min, max) = grid.bounds();

    for (point, &value) in grid.points().iter().zip(field.values()) {
        if !value.is_finite() {
            continue;
        }
        let t = ((value - min_value) * inv_range).clamp(0.0, 1.0);
        let color = Rgb(viridis(t));
        let (px, py) = pixel_position(*point, min, max, config.width, config.height);
        draw_marker(&mut image, px, py, config.marker_radius, config.width, color);
    }

    if config.legend_width > 0 {
        draw_legend(&mut image, config);
    }

    image.save(path)?;
    Ok(())
}

/// Marker center in pixel coordinates; latitude grows upward, pixel rows
/// grow downward.
fn pixel_position(p: DVec2, min: DVec2, max: DVec2, width: u32, height: u32) -> (i64, i64) {
    let tx = normalized(p.x, min.x, max.x);
    let ty = normalized(p.y, min.y, max.y);

    let px = (tx * (width.saturating_sub(1)) as f64).round() as i64;
    let py = ((1.0 - ty) * (height.saturating_sub(1)) as f64).round() as i64;
    (px, py)
}

fn normalized(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 {
        // A degenerate axis collapses to the plot center.
        0.5
    } else {
        (value - min) / span
    }
}

fn draw_marker(image: &mut RgbImage, px: i64, py: i64, radius: i64, plot_width: u32, color: Rgb<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let x = px + dx;
            let y = py + dy;
            if x < 0 || y < 0 || x >= plot_width as i64 || y >= image.height() as i64 {
                continue;
            }
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

fn draw_legend(image: &mut RgbImage, config: &RenderConfig) {
    let x0 = config.width + LEGEND_PAD;
    let x1 = x0 + config.legend_width;
    let height = config.height;

    for y in 0..height {
        // Highest value at the top of the strip.
        let t = if height > 1 {
            1.0 - y as f64 / (height - 1) as f64
        } else {
            1.0
        };
        let color = Rgb(viridis(t));
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

/// Finite min/max of the values, with the degenerate cases pinned so
/// normalization never divides by zero.
fn value_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for &value in values {
        if !value.is_finite() {
            continue;
        }
        min = min.min(value);
        max = max.max(value);
    }

    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if min == max {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

const VIRIDIS_STOPS: [(f64, [u8; 3]); 5] = [
    (0.00, [68, 1, 84]),
    (0.25, [59, 82, 139]),
    (0.50, [33, 145, 140]),
    (0.75, [94, 201, 98]),
    (1.00, [253, 231, 37]),
];

/// Evaluates the viridis ramp at normalized position `t` in [0, 1].
fn viridis(t: f64) -> [u8; 3] {
    if t <= 0.0 {
        return VIRIDIS_STOPS[0].1;
    }
    if t >= 1.0 {
        return VIRIDIS_STOPS[VIRIDIS_STOPS.len() - 1].1;
    }

    for i in 1..VIRIDIS_STOPS.len() {
        let (t1, c1) = VIRIDIS_STOPS[i];
        if t <= t1 {
            let (t0, c0) = VIRIDIS_STOPS[i - 1];
            let ratio = (t - t0) / (t1 - t0);
            return lerp_color(c0, c1, ratio);
        }
    }
    VIRIDIS_STOPS[VIRIDIS_STOPS.len() - 1].1
}

fn lerp_color(c0: [u8; 3], c1: [u8; 3], t: f64) -> [u8; 3] {
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    [
        channel(c0[0], c1[0]),
        channel(c0[1], c1[1]),
        channel(c0[2], c1[2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints_and_clamping() {
        assert_eq!(viridis(0.0), [68, 1, 84]);
        assert_eq!(viridis(1.0), [253, 231, 37]);
        assert_eq!(viridis(-0.5), [68, 1, 84]);
        assert_eq!(viridis(1.5), [253, 231, 37]);
    }

    #[test]
    fn viridis_interpolates_between_stops() {
        let mid = viridis(0.125);
        let lo = viridis(0.0);
        let hi = viridis(0.25);
        assert!(mid[2] < lo[2].max(hi[2]) && mid[2] > lo[2].min(hi[2]));
    }

    #[test]
    fn value_range_skips_non_finite_values() {
        let (min, max) = value_range(&[f64::NAN, 2.0, f64::INFINITY, 5.0]);
        assert_eq!((min, max), (2.0, 5.0));
    }

    #[test]
    fn value_range_handles_degenerate_inputs() {
        assert_eq!(value_range(&[]), (0.0, 1.0));
        assert_eq!(value_range(&[f64::NAN]), (0.0, 1.0));
        assert_eq!(value_range(&[3.0, 3.0]), (3.0, 4.0));
    }

    #[test]
    fn pixel_position_maps_corners() {
        let min = DVec2::new(13.0, 52.0);
        let max = DVec2::new(14.0, 53.0);

        // South-west corner lands bottom-left, north-east corner top-right.
        assert_eq!(pixel_position(min, min, max, 100, 100), (0, 99));
        assert_eq!(pixel_position(max, min, max, 100, 100), (99, 0));
    }

    #[test]
    fn pixel_position_centers_degenerate_axes() {
        let p = DVec2::new(13.0, 52.0);
        let (px, py) = pixel_position(p, p, p, 101, 101);
        assert_eq!((px, py), (50, 50));
    }
}
