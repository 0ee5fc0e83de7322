//! State accident mapping: filter one year's records to a state, drop
//! sentinel coordinates, and hand the rest to the renderer.

use polars::prelude::*;
use std::path::Path;
use tracing::info;

use crate::data::{read_accidents, year_path, DataError};
use crate::map::{render_map, MapError};

// FARS sentinel convention: coordinates above these values mean "unknown".
const LON_SENTINEL: f64 = 900.0;
const LAT_SENTINEL: f64 = 90.0;

/// Geographic bounding box of the plotted points, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lon: (f64, f64),
    pub lat: (f64, f64),
}

impl Bounds {
    /// Bounding box of a non-empty point set, padded slightly so markers
    /// on the hull are not clipped.
    pub fn of(points: &[(f64, f64)]) -> Self {
        let mut lon = (f64::INFINITY, f64::NEG_INFINITY);
        let mut lat = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in points {
            lon = (lon.0.min(x), lon.1.max(x));
            lat = (lat.0.min(y), lat.1.max(y));
        }
        Self {
            lon: pad_range(lon),
            lat: pad_range(lat),
        }
    }
}

fn pad_range((min, max): (f64, f64)) -> (f64, f64) {
    let span = max - min;
    // A single point (or collinear set) still needs a drawable window.
    let pad = if span > 0.0 { span * 0.05 } else { 0.5 };
    (min - pad, max + pad)
}

/// Parse an integer-like state code string.
pub fn parse_state(raw: &str) -> Result<i32, MapError> {
    raw.trim()
        .parse()
        .map_err(|_| MapError::Data(DataError::TypeConversion(raw.to_string())))
}

/// Plot one year's accident locations for a state as a PNG.
///
/// Fails with [`MapError::InvalidState`] when the code never appears in the
/// year's `STATE` column. When the state matches no plottable rows the call
/// logs "no accidents to plot" and returns without writing a file.
pub fn map_state(dir: &Path, state: i32, year: i32, out: &Path) -> Result<(), MapError> {
    let df = read_accidents(&year_path(dir, year))?;

    let state_i32 = df.column("STATE")?.cast(&DataType::Int32)?;
    let state_ca = state_i32.i32()?;
    if !state_ca.into_iter().flatten().any(|code| code == state) {
        return Err(MapError::InvalidState(state));
    }

    let filtered = df.lazy().filter(col("STATE").eq(lit(state))).collect()?;
    if filtered.height() == 0 {
        info!("no accidents to plot");
        return Ok(());
    }

    let points = valid_points(&filtered)?;
    if points.is_empty() {
        // rows exist but every coordinate is a sentinel
        info!("no accidents to plot");
        return Ok(());
    }

    let bounds = Bounds::of(&points);
    render_map(out, &bounds, &points)?;
    info!(points = points.len(), out = %out.display(), "state map written");
    Ok(())
}

/// Extract `(LONGITUD, LATITUDE)` pairs, dropping nulls and sentinel
/// coordinates. Sentinels are excluded from bounds computation and from
/// plotting alike.
pub fn valid_points(df: &DataFrame) -> Result<Vec<(f64, f64)>, MapError> {
    let lon_f64 = df.column("LONGITUD")?.cast(&DataType::Float64)?;
    let lon_ca = lon_f64.f64()?;
    let lat_f64 = df.column("LATITUDE")?.cast(&DataType::Float64)?;
    let lat_ca = lat_f64.f64()?;

    let mut points = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        if let (Some(lon), Some(lat)) = (lon_ca.get(i), lat_ca.get(i)) {
            if lon <= LON_SENTINEL && lat <= LAT_SENTINEL {
                points.push((lon, lat));
            }
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_year(dir: &Path, year: i32, rows: &str) {
        let csv = format!("STATE,MONTH,LATITUDE,LONGITUD\n{rows}");
        fs::write(dir.join(format!("accident_{year}.csv")), csv).unwrap();
    }

    #[test]
    fn sentinel_coordinates_are_dropped() {
        let df = df! {
            "LATITUDE" => [32.4, 95.0, 33.1, 77.7777],
            "LONGITUD" => [-86.7, -86.7, 999.0, 999.9999],
        }
        .unwrap();

        let points = valid_points(&df).unwrap();
        assert_eq!(points, vec![(-86.7, 32.4)]);
    }

    #[test]
    fn bounds_are_padded_and_sentinel_free() {
        let points = [(-86.7, 32.4), (-85.3, 34.0)];
        let bounds = Bounds::of(&points);
        assert!(bounds.lon.0 < -86.7 && bounds.lon.1 > -85.3);
        assert!(bounds.lat.0 < 32.4 && bounds.lat.1 > 34.0);
    }

    #[test]
    fn single_point_bounds_are_drawable() {
        let bounds = Bounds::of(&[(-86.7, 32.4)]);
        assert!(bounds.lon.1 - bounds.lon.0 > 0.0);
        assert!(bounds.lat.1 - bounds.lat.0 > 0.0);
    }

    #[test]
    fn unknown_state_code_fails_without_rendering() {
        let dir = TempDir::new().unwrap();
        write_year(dir.path(), 2013, "1,1,32.4,-86.7\n6,2,34.0,-118.2\n");
        let out = dir.path().join("map.png");

        let err = map_state(dir.path(), 99, 2013, &out).unwrap_err();
        assert!(matches!(err, MapError::InvalidState(99)));
        assert!(!out.exists());
    }

    #[test]
    fn all_sentinel_rows_plot_nothing_without_error() {
        let dir = TempDir::new().unwrap();
        write_year(dir.path(), 2013, "1,1,95.0,999.0\n1,2,99.9,888.8\n6,2,34.0,-118.2\n");
        let out = dir.path().join("map.png");

        map_state(dir.path(), 1, 2013, &out).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn writes_png_for_valid_state() {
        let dir = TempDir::new().unwrap();
        write_year(
            dir.path(),
            2013,
            "1,1,32.4,-86.7\n1,2,33.5,-86.8\n1,3,95.0,999.0\n6,2,34.0,-118.2\n",
        );
        let out = dir.path().join("map.png");

        map_state(dir.path(), 1, 2013, &out).unwrap();
        assert!(out.exists());
        assert!(fs::metadata(&out).unwrap().len() > 0);
    }

    #[test]
    fn state_code_parses_like_a_year() {
        assert_eq!(parse_state("6").unwrap(), 6);
        assert!(parse_state("CA").is_err());
    }
}
