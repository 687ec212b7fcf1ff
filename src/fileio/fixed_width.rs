//! Fixed-width file parsing.
//!
//! CE-QUAL-W2 NPT/OPT control and output files use fixed character-count
//! columns (conventionally 8 characters wide) rather than delimiters.

use crate::error::{Result, W2Error};
use crate::fileio::columns::build_dataframe;
use crate::fileio::get_header_row_number;
use polars::prelude::DataFrame;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Split a text line into fields of exactly `field_width` characters,
/// left to right. The final field may be shorter; no field is dropped and
/// trailing whitespace inside a field is preserved. Fields are not
/// validated as numeric.
pub fn split_fixed_width_line(line: &str, field_width: usize) -> Vec<String> {
    if field_width == 0 {
        return vec![line.to_string()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(field_width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Parse a fixed-width file into a typed frame.
///
/// The header row is located with the filename heuristic
/// ([`get_header_row_number`]); header and data lines are split at
/// `field_width`-character boundaries, and columns are numerically coerced
/// with graceful fallback to strings.
pub fn get_data_columns_fixed_width(path: &Path, field_width: usize) -> Result<DataFrame> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let lines: Vec<String> = reader.lines().collect::<std::io::Result<_>>()?;

    let header_row = get_header_row_number(path);
    if lines.len() <= header_row {
        return Err(W2Error::InvalidFormat {
            path: path.to_path_buf(),
            reason: format!(
                "expected a header at row {}, file has {} lines",
                header_row,
                lines.len()
            ),
        });
    }

    let header: Vec<String> = split_fixed_width_line(&lines[header_row], field_width)
        .into_iter()
        .map(|field| field.trim().to_string())
        .collect();

    let rows: Vec<Vec<String>> = lines[header_row + 1..]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_fixed_width_line(line, field_width))
        .collect();

    debug!(
        "parsed fixed-width file {}: {} columns, {} rows",
        path.display(),
        header.len(),
        rows.len()
    );

    build_dataframe(&header, &rows)
}
