//! Analysis and reporting helpers for normalized model output.
//!
//! CSV export of normalized tables and a markdown index over a batch of
//! rendered plots. Ad-hoc SQL querying is covered by
//! [`crate::fileio::read_sqlite`], which accepts an arbitrary query.

use crate::error::Result;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Export a frame to a CSV file at `path`, header row included.
///
/// Pass-through marshaling: the `DateTime` column is written in ISO
/// format and the remaining columns in input order.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    CsvWriter::new(file).include_header(true).finish(df)?;
    debug!("wrote {} ({} rows)", path.display(), df.height());
    Ok(())
}

/// Write a markdown report indexing a batch of rendered plots, one image
/// entry per file. Pairs with [`crate::plots::plot_all_files`], which
/// returns the plot paths in the order they were written.
pub fn generate_plots_report(title: &str, plot_paths: &[PathBuf], out_path: &Path) -> Result<()> {
    let mut report = format!("# {title}\n\n");
    for path in plot_paths {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        report.push_str(&format!("## {name}\n\n![{name}]({})\n\n", path.display()));
    }
    std::fs::write(out_path, report)?;

    debug!(
        "wrote plots report {} ({} plots)",
        out_path.display(),
        plot_paths.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fileio::read_csv;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_write_csv_exports_normalized_table() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("tsr_seg2.csv");
        let mut file = File::create(&source).unwrap();
        write!(file, "JDAY,T2,DO\n1.0,8.4,10.1\n1.5,8.6,10.0\n").unwrap();

        let mut df = read_csv(&source, 2023, None).unwrap();
        let out = dir.path().join("export.csv");
        write_csv(&mut df, &out).unwrap();

        let contents = std::fs::read_to_string(&out).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("DateTime,JDAY,T2,DO"));
        let first = lines.next().unwrap();
        assert!(first.starts_with("2023-01-01"));
        assert!(first.ends_with("1.0,8.4,10.1"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn test_generate_plots_report_indexes_every_plot() {
        let dir = TempDir::new().unwrap();
        let plots = vec![
            dir.path().join("tsr_seg2.svg"),
            dir.path().join("qwb_wb1.svg"),
        ];

        let out = dir.path().join("report.md");
        generate_plots_report("Run 42 plots", &plots, &out).unwrap();

        let contents = std::fs::read_to_string(&out).unwrap();
        assert!(contents.starts_with("# Run 42 plots"));
        assert!(contents.contains("## tsr_seg2"));
        assert!(contents.contains("![qwb_wb1]"));
        assert_eq!(contents.matches("![").count(), 2);
    }
}
