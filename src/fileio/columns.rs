//! Row-to-frame conversion with numeric coercion.
//!
//! The fixed-width, Excel, and SQLite readers all produce rows of raw
//! string cells. This module turns those rows into a typed [`DataFrame`]:
//! a column where every populated cell parses as a number becomes
//! `Float64` (blanks become nulls); any unparseable cell demotes the whole
//! column to strings. Rows are never dropped.

use crate::error::Result;
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Build a typed frame from a header row and raw string data rows.
///
/// Column count follows the header; short data rows are padded with nulls
/// and cells beyond the header width are ignored. Blank or duplicate
/// header names are rewritten to keep frame columns unique.
pub fn build_dataframe(header: &[String], rows: &[Vec<String>]) -> Result<DataFrame> {
    let names = unique_column_names(header);

    let mut columns = Vec::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        let cells: Vec<&str> = rows
            .iter()
            .map(|row| row.get(idx).map(|cell| cell.trim()).unwrap_or(""))
            .collect();
        columns.push(coerce_column(name, &cells));
    }

    Ok(DataFrame::new(columns)?)
}

/// Coerce one column of raw cells into `Float64` if every populated cell
/// parses, otherwise fall back to strings.
fn coerce_column(name: &str, cells: &[&str]) -> Column {
    let parsed: Vec<Option<f64>> = cells
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                None
            } else {
                cell.parse::<f64>().ok()
            }
        })
        .collect();

    let all_numeric = cells
        .iter()
        .zip(&parsed)
        .all(|(cell, value)| cell.is_empty() || value.is_some());

    if all_numeric {
        Column::new(name.into(), parsed)
    } else {
        debug!("column '{}' has non-numeric cells, keeping as strings", name);
        let strings: Vec<String> = cells.iter().map(|cell| cell.to_string()).collect();
        Column::new(name.into(), strings)
    }
}

/// Trim header names, filling in blanks and de-duplicating repeats.
fn unique_column_names(header: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    header
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let trimmed = raw.trim();
            let mut name = if trimmed.is_empty() {
                format!("column_{idx}")
            } else {
                trimmed.to_string()
            };
            while !seen.insert(name.clone()) {
                name = format!("{name}_{idx}");
            }
            name
        })
        .collect()
}
