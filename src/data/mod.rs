//! Data module - file resolution, CSV loading, and monthly summaries

mod files;
mod loader;
mod reader;
mod summary;

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

pub use files::{accident_filename, parse_year, year_path};
pub use loader::read_accidents;
pub use reader::{read_years, YearData};
pub use summary::summarize_years;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("not a number: {0:?}")]
    TypeConversion(String),
}
