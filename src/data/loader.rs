//! CSV loader for FARS accident files.
//! Handles transparent bz2 decompression, using Polars for parsing.

use bzip2::read::MultiBzDecoder;
use polars::prelude::*;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use crate::data::DataError;

/// Load a FARS accident file into a DataFrame.
///
/// The file may be bz2-compressed (`.csv.bz2`) or plain `.csv`; a `.csv.bz2`
/// path whose decompressed sibling exists falls back to the sibling. Column
/// names and inferred dtypes are preserved. Every call re-reads from disk.
pub fn read_accidents(path: &Path) -> Result<DataFrame, DataError> {
    let source = resolve_source(path)?;
    let raw = fs::read(&source)?;

    let bytes = if source.extension().is_some_and(|ext| ext == "bz2") {
        let mut decompressed = Vec::new();
        MultiBzDecoder::new(raw.as_slice()).read_to_end(&mut decompressed)?;
        decompressed
    } else {
        raw
    };

    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(10_000))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    Ok(df)
}

/// Verify the file exists, trying the decompressed `.csv` name as a
/// fallback for a missing `.csv.bz2`.
fn resolve_source(path: &Path) -> Result<PathBuf, DataError> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }
    if path.extension().is_some_and(|ext| ext == "bz2") {
        let plain = path.with_extension("");
        if plain.exists() {
            return Ok(plain);
        }
    }
    Err(DataError::FileNotFound(path.to_path_buf()))
}
