//! Delimited file parsing, delegated to the polars CSV reader.

use crate::error::Result;
use crate::fileio::get_header_row_number;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Parse a delimited file into a typed frame.
///
/// The header row is located with the filename heuristic
/// ([`crate::fileio::get_header_row_number`]); everything above it is
/// skipped and parsing is delegated to polars with schema inference.
pub fn get_data_columns_csv(path: &Path) -> Result<DataFrame> {
    let header_row = get_header_row_number(path);

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(header_row)
        .with_infer_schema_length(Some(200))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        "parsed csv file {}: {} columns, {} rows (header at row {})",
        path.display(),
        df.width(),
        df.height(),
        header_row
    );

    Ok(df)
}
