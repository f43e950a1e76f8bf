//! Renders location-likelihood heatmaps for the Berlin candidate search.
//!
//! Loads the river polyline from the given coordinate file, evaluates the
//! river and landmark rules over two fixed views (a wide Berlin-area view
//! and a narrower bridge-focused view), and writes per-rule and composite
//! scatter heatmaps as PNG files. The satellite track rule is evaluated and
//! rendered standalone; it does not participate in the composite.
mod render;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use glam::DVec2;
use map_locate::prelude::*;
use tracing::info;

use crate::render::{render_heatmap_to_png, RenderConfig};

/// Assumed full river width in distance units; the rule uses half of it as
/// the Gaussian spread.
const RIVER_WIDTH: f64 = 2730.0;

/// Brandenburg Gate as a (longitude, latitude) point.
const GATE: DVec2 = DVec2::new(13.377689, 52.516288);
const GATE_MEAN: f64 = 4700.0;
const GATE_MODE: f64 = 3877.0;

/// Satellite overpass track endpoints as (longitude, latitude) points.
const SATELLITE_START: DVec2 = DVec2::new(13.39915, 52.590117);
const SATELLITE_END: DVec2 = DVec2::new(13.553989, 52.437385);
const SATELLITE_TRACK_WIDTH: f64 = 2400.0;
const EARTH_RADIUS_KM: f64 = 6371.0;

const GRID_SAMPLES: usize = 100;

#[derive(Parser, Debug)]
#[command(name = "map-locate")]
#[command(about = "Render location-likelihood heatmaps from a river coordinate file")]
struct Args {
    /// Path to the river coordinate file, one `latitude,longitude` per line
    river_file: PathBuf,

    /// Directory the PNG heatmaps are written to
    #[arg(long = "out-dir", default_value = ".")]
    out_dir: PathBuf,
}

struct View {
    name: &'static str,
    lat: Axis,
    lon: Axis,
}

fn views() -> [View; 2] {
    [
        View {
            name: "overview",
            lat: Axis::new(52.00, 53.00, GRID_SAMPLES),
            lon: Axis::new(12.80, 14.20, GRID_SAMPLES),
        },
        View {
            name: "bridge",
            lat: Axis::new(52.20, 52.70, GRID_SAMPLES),
            lon: Axis::new(13.10, 13.60, GRID_SAMPLES),
        },
    ]
}

fn main() -> anyhow::Result<()> {
    render::init_tracing();

    let args = Args::parse();

    let river = load_polyline(&args.river_file).with_context(|| {
        format!(
            "reading river coordinates from {}",
            args.river_file.display()
        )
    })?;
    info!("Loaded river polyline with {} points.", river.points().len());

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory {}", args.out_dir.display()))?;

    let config = RenderConfig::default();

    for view in views() {
        let grid = GeoGrid::new(view.lat, view.lon);

        let plan = Plan::new()
            .with_rule(Rule::near_polyline(
                "river",
                river.clone(),
                0.0,
                RIVER_WIDTH / 2.0,
            ))
            .with_rule(Rule::near_point("gate", GATE, GATE_MEAN, GATE_MODE)?);
        let result = run_plan(&plan, &grid)?;

        for rule_field in &result.fields {
            write_heatmap(
                &args.out_dir,
                view.name,
                &rule_field.rule_id,
                &grid,
                &rule_field.field,
                &config,
            )?;
        }
        write_heatmap(
            &args.out_dir,
            view.name,
            "combined",
            &grid,
            &result.combined,
            &config,
        )?;

        let satellite = Rule::near_track(
            "satellite",
            SATELLITE_START,
            SATELLITE_END,
            EARTH_RADIUS_KM,
            0.0,
            SATELLITE_TRACK_WIDTH / 2.0,
        );
        let satellite_field = satellite.evaluate(grid.points());
        write_heatmap(
            &args.out_dir,
            view.name,
            &satellite.id,
            &grid,
            &satellite_field,
            &config,
        )?;
    }

    Ok(())
}

fn write_heatmap(
    out_dir: &Path,
    view: &str,
    label: &str,
    grid: &GeoGrid,
    field: &ProbabilityField,
    config: &RenderConfig,
) -> anyhow::Result<()> {
    let path = out_dir.join(format!("{view}-{label}.png"));
    render_heatmap_to_png(grid, field, config, &path)
        .with_context(|| format!("rendering {}", path.display()))?;
    info!("Wrote {}.", path.display());
    Ok(())
}
