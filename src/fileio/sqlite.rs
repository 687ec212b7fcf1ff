//! SQLite table reading via rusqlite.

use crate::error::Result;
use crate::fileio::columns::build_dataframe;
use polars::prelude::DataFrame;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Run `sql` against a SQLite database and collect the result set into a
/// typed frame. Values pass through the same numeric coercion as the text
/// readers; NULL becomes a null cell.
pub fn get_data_columns_sqlite(path: &Path, sql: &str) -> Result<DataFrame> {
    let conn = Connection::open(path)?;
    let mut stmt = conn.prepare(sql)?;
    let header: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let column_count = header.len();

    let mut data: Vec<Vec<String>> = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            cells.push(value_to_string(row.get_ref(idx)?));
        }
        data.push(cells);
    }

    debug!(
        "queried {}: {} columns, {} rows",
        path.display(),
        column_count,
        data.len()
    );

    build_dataframe(&header, &data)
}

fn value_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(v) => v.to_string(),
        ValueRef::Real(v) => v.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_query_mixed_types() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model_output.db");

        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE tsr (jday REAL, temp REAL, note TEXT);
             INSERT INTO tsr VALUES (1.0, 15.2, 'calm');
             INSERT INTO tsr VALUES (2.0, NULL, 'windy');",
        )
        .unwrap();
        drop(conn);

        let df = get_data_columns_sqlite(&path, "SELECT * FROM tsr ORDER BY jday").unwrap();
        assert_eq!(df.shape(), (2, 3));
        let temp = df.column("temp").unwrap().f64().unwrap();
        assert_eq!(temp.get(0), Some(15.2));
        assert_eq!(temp.get(1), None);
        let note = df.column("note").unwrap().str().unwrap();
        assert_eq!(note.get(1), Some("windy"));
    }
}
