//! Bitmap rendering of accident locations via plotters.
//!
//! The chart is a plain lon/lat scatter scaled to the sanitized coordinate
//! bounds; projection is left to the drawing library.

use plotters::prelude::*;
use std::path::Path;

use crate::map::{Bounds, MapError};

const MAP_SIZE: (u32, u32) = (900, 700);
const POINT_COLOR: RGBColor = RGBColor(203, 67, 53);
const POINT_RADIUS: i32 = 3;

/// Draw the point set to `out` as a PNG, scaled to `bounds`.
pub fn render_map(out: &Path, bounds: &Bounds, points: &[(f64, f64)]) -> Result<(), MapError> {
    let root = BitMapBackend::new(out, MAP_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(bounds.lon.0..bounds.lon.1, bounds.lat.0..bounds.lat.1)
        .map_err(draw_err)?;

    // Region frame
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(bounds.lon.0, bounds.lat.0), (bounds.lon.1, bounds.lat.1)],
            BLACK.stroke_width(1),
        )))
        .map_err(draw_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(lon, lat)| Circle::new((lon, lat), POINT_RADIUS, POINT_COLOR.filled())),
        )
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_err<E: std::fmt::Display>(err: E) -> MapError {
    MapError::Render(err.to_string())
}
