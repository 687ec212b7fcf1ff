//! Readers for CE-QUAL-W2 model input and output files.
//!
//! The model writes tabular data in several shapes: fixed-width NPT/OPT
//! files, delimited CSV, Excel workbooks, and SQLite tables. Every reader
//! funnels into the same pipeline: classify the structure, locate the
//! header row, parse columns, then resolve the leading JDAY column into
//! absolute timestamps with [`crate::datetime::day_of_year_to_date`].

pub(crate) mod columns;
pub mod csv;
pub mod excel;
pub mod fixed_width;
pub mod parquet;
pub mod sqlite;

pub use self::csv::get_data_columns_csv;
pub use self::excel::get_data_columns_excel;
pub use self::fixed_width::{get_data_columns_fixed_width, split_fixed_width_line};
pub use self::parquet::{read_parquet, write_parquet};
pub use self::sqlite::get_data_columns_sqlite;

use crate::constants::{
    DATETIME_COLUMN, MET_COLUMN_NAMES, MET_TRANSLUCENCY_COLUMN, NPT_OPT_FIELD_WIDTH,
};
use crate::datetime::day_of_year_to_date;
use crate::error::{Result, W2Error};
use polars::prelude::*;
use std::path::Path;
use tracing::warn;

/// Structural classification of a model data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Structure could not be determined; `read` refuses these.
    Unknown,
    /// Fixed character-count columns (NPT/OPT convention).
    FixedWidth,
    /// Delimiter-separated columns.
    Csv,
}

impl FileType {
    /// Infer the file type from the path extension. NPT/OPT files are
    /// fixed-width, `.csv` is delimited, anything else is unknown.
    pub fn infer(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "npt" | "opt" => FileType::FixedWidth,
            "csv" => FileType::Csv,
            _ => FileType::Unknown,
        }
    }
}

/// Row index of the column-header line within a model output file.
///
/// TSR (time-series) files carry their header on the first line; every
/// other output file starts with two metadata/units lines. Pure function
/// of the path string, no file I/O.
pub fn get_header_row_number(path: &Path) -> usize {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name.contains("tsr") { 0 } else { 2 }
}

/// Resolve the leading day-of-year column of `df` into timestamps,
/// prepending a `DateTime` column anchored to `year`. Original columns
/// and their order are preserved.
pub fn dataframe_to_date_format(df: &mut DataFrame, year: i32) -> Result<()> {
    let first = df
        .get_column_names()
        .first()
        .map(|name| name.to_string())
        .ok_or_else(|| W2Error::InvalidDayOfYear {
            year,
            value: f64::NAN,
        })?;

    let doy = df.column(&first)?.cast(&DataType::Float64)?;
    let values: Vec<f64> = doy
        .f64()?
        .into_iter()
        .map(|value| {
            value.ok_or(W2Error::InvalidDayOfYear {
                year,
                value: f64::NAN,
            })
        })
        .collect::<Result<_>>()?;

    let stamps = day_of_year_to_date(year, &values)?;
    let millis: Vec<i64> = stamps
        .iter()
        .map(|dt| dt.and_utc().timestamp_millis())
        .collect();
    let datetime = Column::new(DATETIME_COLUMN.into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

    df.insert_column(0, datetime)?;
    Ok(())
}

/// Read a model data file and normalize its day-of-year column.
///
/// Dispatches on `file_type` ([`FileType::Unknown`] fails fast with
/// [`W2Error::UnsupportedFileType`], before any file handle is opened),
/// optionally restricts output to `data_columns`, then prepends the
/// `DateTime` column anchored to `year`.
pub fn read(
    path: &Path,
    year: i32,
    data_columns: Option<&[&str]>,
    file_type: FileType,
) -> Result<DataFrame> {
    let df = match file_type {
        FileType::Unknown => {
            return Err(W2Error::UnsupportedFileType {
                path: path.to_path_buf(),
            });
        }
        FileType::FixedWidth => get_data_columns_fixed_width(path, NPT_OPT_FIELD_WIDTH)?,
        FileType::Csv => get_data_columns_csv(path)?,
    };
    finish_table(df, path, year, data_columns)
}

/// Read a delimited model output file.
pub fn read_csv(path: &Path, year: i32, data_columns: Option<&[&str]>) -> Result<DataFrame> {
    read(path, year, data_columns, FileType::Csv)
}

/// Read a fixed-width NPT/OPT file using the 8-character field convention.
pub fn read_npt_opt(path: &Path, year: i32, data_columns: Option<&[&str]>) -> Result<DataFrame> {
    read(path, year, data_columns, FileType::FixedWidth)
}

/// Read a meteorology file, renaming data columns to the canonical W2 met
/// names when the column count matches the convention.
pub fn read_met(path: &Path, year: i32) -> Result<DataFrame> {
    let file_type = FileType::infer(path);
    let mut df = match file_type {
        FileType::Unknown => {
            return Err(W2Error::UnsupportedFileType {
                path: path.to_path_buf(),
            });
        }
        FileType::FixedWidth => get_data_columns_fixed_width(path, NPT_OPT_FIELD_WIDTH)?,
        FileType::Csv => get_data_columns_csv(path)?,
    };

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let data_count = names.len().saturating_sub(1);
    // Six data columns is the base met convention; a seventh carries
    // translucency.
    if data_count == MET_COLUMN_NAMES.len() || data_count == MET_COLUMN_NAMES.len() + 1 {
        let targets = MET_COLUMN_NAMES
            .iter()
            .copied()
            .chain(std::iter::once(MET_TRANSLUCENCY_COLUMN));
        for (old, new) in names[1..].iter().zip(targets) {
            df.rename(old, new.into())?;
        }
    } else {
        warn!(
            "met file {} has {} data columns, expected {} or {}; keeping original names",
            path.display(),
            data_count,
            MET_COLUMN_NAMES.len(),
            MET_COLUMN_NAMES.len() + 1
        );
    }

    finish_table(df, path, year, None)
}

/// Read the first worksheet of an Excel workbook through the shared
/// classify/parse/normalize pipeline.
pub fn read_excel(path: &Path, year: i32, data_columns: Option<&[&str]>) -> Result<DataFrame> {
    let df = get_data_columns_excel(path)?;
    finish_table(df, path, year, data_columns)
}

/// Run `sql` against a SQLite database and normalize the result set.
pub fn read_sqlite(
    path: &Path,
    sql: &str,
    year: i32,
    data_columns: Option<&[&str]>,
) -> Result<DataFrame> {
    let df = get_data_columns_sqlite(path, sql)?;
    finish_table(df, path, year, data_columns)
}

/// Shared tail of every reader: restrict to the requested columns, then
/// resolve the day-of-year column into timestamps.
fn finish_table(
    mut df: DataFrame,
    path: &Path,
    year: i32,
    data_columns: Option<&[&str]>,
) -> Result<DataFrame> {
    if let Some(requested) = data_columns {
        df = select_data_columns(df, requested, path)?;
    }
    dataframe_to_date_format(&mut df, year)?;
    Ok(df)
}

/// Keep the leading day-of-year column plus `requested`, in request order.
/// A requested name absent from the header fails with
/// [`W2Error::MissingColumn`].
fn select_data_columns(df: DataFrame, requested: &[&str], path: &Path) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let first = names.first().cloned().unwrap_or_default();

    let mut selection = vec![first.clone()];
    for &column in requested {
        if !names.iter().any(|name| name == column) {
            return Err(W2Error::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
        if column != first {
            selection.push(column.to_string());
        }
    }

    Ok(df.select(selection)?)
}
