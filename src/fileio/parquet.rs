//! Parquet persistence helpers for normalized tables.
//!
//! Pass-through marshaling only: a normalized frame written with
//! [`write_parquet`] reads back byte-for-byte equal, with column order and
//! the `DateTime` column preserved.

use crate::error::Result;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Write a frame to a Parquet file at `path`.
pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let bytes = ParquetWriter::new(file).finish(df)?;
    debug!("wrote {} ({} bytes)", path.display(), bytes);
    Ok(())
}

/// Read a frame back from a Parquet file at `path`.
pub fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)?;
    Ok(ParquetReader::new(file).finish()?)
}
