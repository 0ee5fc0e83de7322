//! Multi-year reader: loads several yearly files, tolerating per-year
//! failures.

use polars::prelude::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::warn;

use crate::data::{read_accidents, year_path, DataError};

/// Outcome of loading one year in a batch.
#[derive(Debug)]
pub enum YearData {
    /// Two-column frame: `MONTH` plus a constant `year` column.
    Loaded(DataFrame),
    /// The year failed to load; carries the warning text.
    Skipped(String),
}

impl YearData {
    pub fn is_skipped(&self) -> bool {
        matches!(self, YearData::Skipped(_))
    }
}

/// Load each year's file and project it down to `(MONTH, year)`.
///
/// Any error for an individual year is demoted to a warning and a
/// [`YearData::Skipped`] slot; the remaining years still load. The output
/// is aligned with the input year order. Years load in parallel since each
/// iteration touches only its own file.
pub fn read_years(dir: &Path, years: &[i32]) -> Vec<YearData> {
    years
        .par_iter()
        .map(|&year| match load_one(dir, year) {
            Ok(df) => YearData::Loaded(df),
            Err(err) => {
                let reason = format!("invalid year: {year}");
                warn!(%err, "{reason}");
                YearData::Skipped(reason)
            }
        })
        .collect()
}

fn load_one(dir: &Path, year: i32) -> Result<DataFrame, DataError> {
    let df = read_accidents(&year_path(dir, year))?;
    let projected = df
        .lazy()
        .select([col("MONTH"), lit(year).alias("year")])
        .collect()?;
    Ok(projected)
}
