//! Plotting entry points for normalized model output.
//!
//! Renders line plots of normalized tables (see
//! [`crate::fileio::dataframe_to_date_format`]) to SVG via plotters.
//! Styling comes from an explicit [`PlotConfig`] passed at call time;
//! there is no process-wide styling state.

use crate::constants::{DATETIME_COLUMN, RAINBOW};
use crate::error::{Result, W2Error};
use crate::fileio::{read, FileType};
use chrono::NaiveDateTime;
use glob::glob;
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;
use polars::prelude::{DataFrame, DataType};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Styling configuration for a single plot call.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub ylabel: Option<String>,
    /// Hex colors, cycled across series.
    pub palette: Vec<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            title: None,
            ylabel: None,
            palette: RAINBOW.iter().map(|color| color.to_string()).collect(),
        }
    }
}

/// Cycle `palette` out to `n` colors.
pub fn get_colors(palette: &[String], n: usize) -> Result<Vec<RGBColor>> {
    if palette.is_empty() {
        return Err(W2Error::Plot {
            reason: "empty color palette".to_string(),
        });
    }
    (0..n)
        .map(|idx| parse_hex_color(&palette[idx % palette.len()]))
        .collect()
}

/// Map a plotters backend error into [`W2Error::Plot`].
fn draw_err<E: std::fmt::Display>(err: E) -> W2Error {
    W2Error::Plot {
        reason: err.to_string(),
    }
}

/// Parse a `#rrggbb` hex string into an [`RGBColor`].
fn parse_hex_color(hex: &str) -> Result<RGBColor> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    // Length is in bytes; require ASCII before slicing byte ranges.
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(W2Error::Plot {
            reason: format!("invalid hex color '{hex}'"),
        });
    }
    let parse = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| W2Error::Plot {
            reason: format!("invalid hex color '{hex}'"),
        })
    };
    Ok(RGBColor(parse(0..2)?, parse(2..4)?, parse(4..6)?))
}

/// Draw every numeric data column of a normalized table against its
/// `DateTime` column, as one chart with a shared legend.
pub fn plot(df: &DataFrame, config: &PlotConfig, out_path: &Path) -> Result<()> {
    let x = datetime_values(df)?;
    let series = numeric_series(df);
    if series.is_empty() {
        return Err(W2Error::Plot {
            reason: "no numeric data columns to plot".to_string(),
        });
    }
    let colors = get_colors(&config.palette, series.len())?;
    let (x_range, y_range) = axis_ranges(&x, &series)?;

    let root = SVGBackend::new(out_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60);
    if let Some(title) = &config.title {
        builder.caption(title, ("sans-serif", 22));
    }
    let mut chart = builder
        .build_cartesian_2d(RangedDateTime::from(x_range), y_range)
        .map_err(draw_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(8).y_labels(8);
    if let Some(ylabel) = &config.ylabel {
        mesh.y_desc(ylabel);
    }
    mesh.draw().map_err(draw_err)?;

    for ((name, values), color) in series.iter().zip(colors) {
        let points = points_of(&x, values);
        chart
            .draw_series(LineSeries::new(points, color))
            .map_err(draw_err)?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;
    root.present().map_err(draw_err)?;

    debug!("wrote plot {}", out_path.display());
    Ok(())
}

/// Draw each numeric data column in its own stacked subplot.
pub fn multi_plot(df: &DataFrame, config: &PlotConfig, out_path: &Path) -> Result<()> {
    let x = datetime_values(df)?;
    let series = numeric_series(df);
    if series.is_empty() {
        return Err(W2Error::Plot {
            reason: "no numeric data columns to plot".to_string(),
        });
    }
    let colors = get_colors(&config.palette, series.len())?;

    let root = SVGBackend::new(out_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    let areas = root.split_evenly((series.len(), 1));

    for (((name, values), color), area) in series.iter().zip(colors).zip(areas.iter()) {
        let single = [(name.clone(), values.clone())];
        let (x_range, y_range) = axis_ranges(&x, &single)?;
        let mut chart = ChartBuilder::on(area)
            .margin(5)
            .caption(name, ("sans-serif", 16))
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(RangedDateTime::from(x_range), y_range)
            .map_err(draw_err)?;
        chart
            .configure_mesh()
            .x_labels(6)
            .y_labels(5)
            .draw()
            .map_err(draw_err)?;
        chart
            .draw_series(LineSeries::new(points_of(&x, values), color))
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    debug!("wrote multi plot {}", out_path.display());
    Ok(())
}

/// Read every model output file matching `pattern` and render one SVG per
/// file into `out_dir`. Files that cannot be classified or read are
/// skipped with a warning; the paths of the written plots are returned.
pub fn plot_all_files(
    pattern: &str,
    year: i32,
    config: &PlotConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    for entry in glob(pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                warn!("skipping unreadable glob entry: {}", err);
                continue;
            }
        };
        let file_type = FileType::infer(&path);
        if file_type == FileType::Unknown {
            warn!("skipping {}: unrecognized file type", path.display());
            continue;
        }
        let df = match read(&path, year, None, file_type) {
            Ok(df) => df,
            Err(err) => {
                warn!("skipping {}: {}", path.display(), err);
                continue;
            }
        };

        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "plot".to_string());
        let out_path = out_dir.join(format!("{stem}.svg"));
        let file_config = PlotConfig {
            title: Some(
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| stem.clone()),
            ),
            ..config.clone()
        };
        plot(&df, &file_config, &out_path)?;
        written.push(out_path);
    }

    Ok(written)
}

/// Extract the `DateTime` column as timestamps.
fn datetime_values(df: &DataFrame) -> Result<Vec<NaiveDateTime>> {
    let millis = df
        .column(DATETIME_COLUMN)?
        .cast(&DataType::Int64)?
        .i64()?
        .into_iter()
        .collect::<Option<Vec<i64>>>()
        .ok_or_else(|| W2Error::Plot {
            reason: format!("null values in {DATETIME_COLUMN} column"),
        })?;
    if millis.is_empty() {
        return Err(W2Error::Plot {
            reason: "table has no rows".to_string(),
        });
    }
    Ok(millis
        .into_iter()
        .filter_map(chrono::DateTime::from_timestamp_millis)
        .map(|dt| dt.naive_utc())
        .collect())
}

/// Numeric data columns to draw: every float column except the timestamp
/// and the day-of-year source (JDAY).
fn numeric_series(df: &DataFrame) -> Vec<(String, Vec<Option<f64>>)> {
    df.get_columns()
        .iter()
        .filter(|column| {
            let name = column.name().as_str();
            name != DATETIME_COLUMN
                && !name.eq_ignore_ascii_case("jday")
                && column.dtype().is_primitive_numeric()
        })
        .filter_map(|column| {
            let values = column.cast(&DataType::Float64).ok()?;
            let ca = values.f64().ok()?;
            Some((column.name().to_string(), ca.into_iter().collect()))
        })
        .collect()
}

fn points_of(x: &[NaiveDateTime], values: &[Option<f64>]) -> Vec<(NaiveDateTime, f64)> {
    x.iter()
        .zip(values)
        .filter_map(|(&t, &v)| v.map(|v| (t, v)))
        .collect()
}

/// Compute padded axis ranges over every series.
fn axis_ranges(
    x: &[NaiveDateTime],
    series: &[(String, Vec<Option<f64>>)],
) -> Result<(std::ops::Range<NaiveDateTime>, std::ops::Range<f64>)> {
    let x_min = *x.iter().min().ok_or_else(|| W2Error::Plot {
        reason: "table has no rows".to_string(),
    })?;
    let x_max = *x.iter().max().unwrap_or(&x_min);

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (_, values) in series {
        for value in values.iter().flatten() {
            y_min = y_min.min(*value);
            y_max = y_max.max(*value);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return Err(W2Error::Plot {
            reason: "no finite values to plot".to_string(),
        });
    }
    // Pad degenerate ranges so plotters gets a non-empty axis.
    if y_min == y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }
    let x_max = if x_min == x_max {
        x_max + chrono::Duration::hours(1)
    } else {
        x_max
    };

    Ok((x_min..x_max, y_min..y_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fileio::read_csv;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_table(dir: &TempDir) -> DataFrame {
        let path = dir.path().join("tsr_seg2.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "JDAY,Temp,DO\n1.0,15.2,8.5\n2.0,15.5,8.3\n3.0,16.1,8.1\n"
        )
        .unwrap();
        read_csv(&path, 2023, None).unwrap()
    }

    #[test]
    fn test_get_colors_cycles_palette() {
        let palette = vec!["#ff0000".to_string(), "#00ff00".to_string()];
        let colors = get_colors(&palette, 5).unwrap();
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], RGBColor(255, 0, 0));
        assert_eq!(colors[2], RGBColor(255, 0, 0));
        assert_eq!(colors[3], RGBColor(0, 255, 0));
    }

    #[test]
    fn test_get_colors_rejects_bad_hex() {
        assert!(get_colors(&["#zzzzzz".to_string()], 1).is_err());
        assert!(get_colors(&[], 1).is_err());
    }

    #[test]
    fn test_get_colors_rejects_non_ascii_hex() {
        // Six bytes but two chars; must error, not panic on a byte slice.
        assert!(get_colors(&["€€".to_string()], 1).is_err());
        assert!(get_colors(&["#aabbc€".to_string()], 1).is_err());
    }

    #[test]
    fn test_plot_writes_svg() {
        let dir = TempDir::new().unwrap();
        let df = sample_table(&dir);
        let out = dir.path().join("tsr_seg2.svg");

        let config = PlotConfig {
            title: Some("Segment 2".to_string()),
            ylabel: Some("Temperature (C)".to_string()),
            ..PlotConfig::default()
        };
        plot(&df, &config, &out).unwrap();

        let contents = std::fs::read_to_string(&out).unwrap();
        assert!(contents.contains("<svg"));
    }

    #[test]
    fn test_multi_plot_writes_svg() {
        let dir = TempDir::new().unwrap();
        let df = sample_table(&dir);
        let out = dir.path().join("multi.svg");

        multi_plot(&df, &PlotConfig::default(), &out).unwrap();
        assert!(std::fs::read_to_string(&out).unwrap().contains("<svg"));
    }

    #[test]
    fn test_plot_all_files_skips_unknown_types() {
        let dir = TempDir::new().unwrap();
        let df_dir = dir.path().join("output");
        std::fs::create_dir_all(&df_dir).unwrap();
        std::fs::write(df_dir.join("tsr_1.csv"), "JDAY,Temp\n1.0,15.2\n2.0,15.5\n").unwrap();
        std::fs::write(df_dir.join("notes.txt"), "not a data file\n").unwrap();

        let pattern = format!("{}/*", df_dir.display());
        let out_dir = dir.path().join("plots");
        let written = plot_all_files(&pattern, 2023, &PlotConfig::default(), &out_dir).unwrap();

        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("tsr_1.svg"));
        assert!(written[0].exists());
    }
}
