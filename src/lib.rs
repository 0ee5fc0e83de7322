//! FARS Explorer - yearly traffic-fatality data analysis
//!
//! Loads per-year FARS accident files (`accident_<YYYY>.csv.bz2`),
//! summarizes accident counts by month and year, and plots accident
//! locations for a single state.

pub mod data;
pub mod map;

pub use data::{accident_filename, read_accidents, read_years, summarize_years, YearData};
pub use map::map_state;
