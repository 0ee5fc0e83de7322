//! Filename resolution for yearly FARS data files.

use std::path::{Path, PathBuf};

use crate::data::DataError;

/// Canonical data filename for a year, e.g. `accident_2013.csv.bz2`.
pub fn accident_filename(year: i32) -> String {
    format!("accident_{year}.csv.bz2")
}

/// Parse an integer-like year string.
pub fn parse_year(raw: &str) -> Result<i32, DataError> {
    raw.trim()
        .parse()
        .map_err(|_| DataError::TypeConversion(raw.to_string()))
}

/// Path of a year's data file under the given data directory.
pub fn year_path(dir: &Path, year: i32) -> PathBuf {
    dir.join(accident_filename(year))
}
