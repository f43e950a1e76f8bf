//! Reading reference polylines from coordinate text files.
//!
//! The expected format is one `latitude,longitude` record per line, no
//! header. Records are swapped into `(longitude, latitude)` points so they
//! match the grid's axis order; the line order from the source defines the
//! polyline's segment connectivity and is preserved.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::DVec2;

use crate::error::{Error, Result};
use crate::geometry::Polyline;

/// Parses `latitude,longitude` records from a reader into a polyline.
///
/// Fails with [`Error::Parse`] (carrying the 1-based line number) when a
/// line does not split into exactly two float tokens, and with
/// [`Error::InvalidConfig`] when fewer than 2 points are present.
pub fn read_polyline<R: BufRead>(reader: R) -> Result<Polyline> {
    let mut points = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let record = line.trim();

        let mut tokens = record.split(',');
        let (Some(lat_token), Some(lon_token), None) =
            (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(Error::Parse {
                line: line_number,
                message: format!("expected exactly two comma-separated fields, got '{record}'"),
            });
        };

        let lat: f64 = lat_token.trim().parse().map_err(|_| Error::Parse {
            line: line_number,
            message: format!("invalid latitude '{}'", lat_token.trim()),
        })?;
        let lon: f64 = lon_token.trim().parse().map_err(|_| Error::Parse {
            line: line_number,
            message: format!("invalid longitude '{}'", lon_token.trim()),
        })?;

        points.push(DVec2::new(lon, lat));
    }

    Polyline::try_new(points)
}

/// Reads a polyline from the file at `path`.
///
/// The file handle is scoped to this call and released on every exit path,
/// including parse failures.
pub fn load_polyline(path: impl AsRef<Path>) -> Result<Polyline> {
    let file = File::open(path)?;
    read_polyline(BufReader::new(file))
}
