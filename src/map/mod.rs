//! Map module - state filtering, coordinate sanitization, map rendering

mod render;
mod state_map;

use polars::prelude::PolarsError;
use thiserror::Error;

use crate::data::DataError;

pub use render::render_map;
pub use state_map::{map_state, parse_state, valid_points, Bounds};

#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("column error: {0}")]
    Csv(#[from] PolarsError),
    #[error("invalid state: {0}")]
    InvalidState(i32),
    #[error("failed to render map: {0}")]
    Render(String),
}
