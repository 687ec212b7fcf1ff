//! Integration tests for the Parquet cache and the plotting surface.
//!
//! Verifies that a normalized table survives a write/read round trip with
//! column order, values, and the timestamp column intact, and that plot
//! control files drive the plotting entry points end to end.

use cequalw2::{
    generate_plots_report, plot, plot_all_files, read_csv, read_parquet, read_plot_control,
    write_csv, write_parquet, write_plot_control, PlotConfig, PlotControl, PlotItem,
};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    write!(file, "{}", contents).unwrap();
    path
}

#[test]
fn parquet_round_trip_preserves_normalized_table() {
    let dir = TempDir::new().unwrap();
    let csv = write_fixture(
        &dir,
        "tsr_seg2.csv",
        "JDAY,T2,DO\n1.0,8.4,10.1\n1.5,8.6,10.0\n32.5,9.1,9.7\n",
    );

    let mut df = read_csv(&csv, 2023, None).unwrap();
    let cache = dir.path().join("tsr_seg2.parquet");
    write_parquet(&mut df, &cache).unwrap();

    let restored = read_parquet(&cache).unwrap();
    assert!(df.equals(&restored));

    let names: Vec<&str> = restored
        .get_column_names()
        .iter()
        .map(|n| n.as_str())
        .collect();
    assert_eq!(names, vec!["DateTime", "JDAY", "T2", "DO"]);
}

#[test]
fn plot_control_drives_plotting() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "tsr_seg2.csv", "JDAY,T2\n1.0,8.4\n2.0,8.6\n3.0,8.9\n");

    // Write a control file, read it back, and render each item it names.
    let control = PlotControl {
        items: vec![PlotItem {
            file: "tsr_seg2.csv".to_string(),
            columns: vec!["T2".to_string()],
            ylabel: Some("Temperature (C)".to_string()),
            colors: vec!["#2874a6".to_string()],
        }],
    };
    let control_path = dir.path().join("plots.yaml");
    write_plot_control(&control, &control_path).unwrap();
    let restored = read_plot_control(&control_path).unwrap();

    for item in &restored.items {
        let data_path = dir.path().join(&item.file);
        let columns: Vec<&str> = item.columns.iter().map(|c| c.as_str()).collect();
        let df = read_csv(&data_path, 2023, Some(&columns)).unwrap();

        let config = PlotConfig {
            ylabel: item.ylabel.clone(),
            palette: item.colors.clone(),
            ..PlotConfig::default()
        };
        let out = dir.path().join("tsr_seg2.svg");
        plot(&df, &config, &out).unwrap();
        assert!(std::fs::read_to_string(&out).unwrap().contains("<svg"));
    }
}

#[test]
fn plot_all_files_renders_every_recognized_file() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("output");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(
        data_dir.join("tsr_seg2.csv"),
        "JDAY,T2\n1.0,8.4\n2.0,8.6\n",
    )
    .unwrap();
    std::fs::write(
        data_dir.join("qwb.opt"),
        "Flow balance\nunits\nJDAY    QIN     \n1.0     10.2    \n2.0     10.4    \n",
    )
    .unwrap();
    std::fs::write(data_dir.join("readme.txt"), "not data\n").unwrap();

    let out_dir = dir.path().join("plots");
    let written = plot_all_files(
        &format!("{}/*", data_dir.display()),
        2023,
        &PlotConfig::default(),
        &out_dir,
    )
    .unwrap();

    assert_eq!(written.len(), 2);
    for path in &written {
        assert!(path.exists());
    }

    // A report indexes every plot the batch run produced.
    let report = dir.path().join("report.md");
    generate_plots_report("Model output plots", &written, &report).unwrap();
    let contents = std::fs::read_to_string(&report).unwrap();
    assert!(contents.contains("## tsr_seg2"));
    assert!(contents.contains("## qwb"));
}

#[test]
fn csv_export_round_trips_through_the_reader() {
    let dir = TempDir::new().unwrap();
    let source = write_fixture(
        &dir,
        "tsr_seg2.csv",
        "JDAY,T2,DO\n1.0,8.4,10.1\n32.5,9.1,9.7\n",
    );

    let mut df = read_csv(&source, 2023, None).unwrap();
    let export = dir.path().join("export.csv");
    write_csv(&mut df, &export).unwrap();

    let contents = std::fs::read_to_string(&export).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("DateTime,JDAY,T2,DO"));
    assert_eq!(lines.clone().count(), 2);
    assert!(lines.next_back().unwrap().starts_with("2023-02-01"));
}
