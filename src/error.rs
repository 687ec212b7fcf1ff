//! Error handling for CE-QUAL-W2 data operations.
//!
//! Provides error types with path and value context for file parsing,
//! time conversion, and plot rendering failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum W2Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] calamine::XlsxError),

    #[error("Plot control file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Unsupported file type for: {path}")]
    UnsupportedFileType { path: PathBuf },

    #[error("Invalid day of year {value} for year {year}")]
    InvalidDayOfYear { year: i32, value: f64 },

    #[error("Column '{column}' not found in: {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("Unrecognized date/time string: '{value}'")]
    DateTimeParse { value: String },

    #[error("Invalid file format in {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Plot rendering failed: {reason}")]
    Plot { reason: String },
}

pub type Result<T> = std::result::Result<T, W2Error>;
