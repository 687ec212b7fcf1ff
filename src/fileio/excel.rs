//! Excel workbook reading via calamine.

use crate::error::{Result, W2Error};
use crate::fileio::columns::build_dataframe;
use crate::fileio::get_header_row_number;
use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use polars::prelude::DataFrame;
use std::path::Path;
use tracing::debug;

/// Parse the first worksheet of an xlsx workbook into a typed frame.
///
/// The filename heuristic ([`crate::fileio::get_header_row_number`])
/// selects the header row within the sheet; cell values go through the
/// same numeric coercion as the text readers.
pub fn get_data_columns_excel(path: &Path) -> Result<DataFrame> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| W2Error::InvalidFormat {
            path: path.to_path_buf(),
            reason: "workbook has no worksheets".to_string(),
        })??;

    let mut rows = range.rows().map(|row| {
        row.iter().map(cell_to_string).collect::<Vec<String>>()
    });

    let header_row = get_header_row_number(path);
    let header = rows
        .by_ref()
        .nth(header_row)
        .ok_or_else(|| W2Error::InvalidFormat {
            path: path.to_path_buf(),
            reason: format!("expected a header at sheet row {header_row}"),
        })?;
    let data: Vec<Vec<String>> = rows.collect();

    debug!(
        "parsed workbook {}: {} columns, {} rows",
        path.display(),
        header.len(),
        data.len()
    );

    build_dataframe(&header, &data)
}

fn cell_to_string(cell: &Data) -> String {
    if cell.is_empty() {
        String::new()
    } else {
        cell.as_string().unwrap_or_else(|| format!("{}", cell))
    }
}
