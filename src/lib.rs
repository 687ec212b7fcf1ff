//! CE-QUAL-W2 Data Toolkit
//!
//! A Rust library for reading, normalizing, and plotting output from the
//! CE-QUAL-W2 hydrodynamic and water-quality model.
//!
//! This library provides tools for:
//! - Parsing fixed-width NPT/OPT files, delimited CSV, Excel workbooks,
//!   and SQLite tables with the model's header-row conventions
//! - Converting fractional day-of-year (JDAY) values into calendar
//!   timestamps, leap years included
//! - Persisting normalized tables to Parquet and exporting them to CSV
//! - Rendering SVG time-series plots driven by YAML plot control files,
//!   with markdown report indexes over batch plot runs
//!
//! The central pipeline is: classify a file's structure, locate its
//! header row, parse columns, then resolve the leading JDAY column into
//! an absolute `DateTime` column anchored to a caller-supplied year.

pub mod analysis;
pub mod constants;
pub mod datetime;
pub mod error;
pub mod fileio;
pub mod plot_control;
pub mod plots;

pub use analysis::{generate_plots_report, write_csv};
pub use datetime::{convert_to_datetime, day_of_year_to_date, days_in_year, round_time, DateInput};
pub use error::{Result, W2Error};
pub use fileio::{
    dataframe_to_date_format, get_data_columns_csv, get_data_columns_excel,
    get_data_columns_fixed_width, get_data_columns_sqlite, get_header_row_number, read, read_csv,
    read_excel, read_met, read_npt_opt, read_parquet, read_sqlite, split_fixed_width_line,
    write_parquet, FileType,
};
pub use plot_control::{read_plot_control, write_plot_control, PlotControl, PlotItem};
pub use plots::{get_colors, multi_plot, plot, plot_all_files, PlotConfig};
