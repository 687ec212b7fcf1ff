//! Plot control files.
//!
//! A plot control file is a YAML document listing which model output
//! files to plot and how: the columns to draw, axis labels, and optional
//! per-series color overrides. These helpers do format marshaling only.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One plot specification within a control file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotItem {
    /// Path of the model output file to read, relative to the control file.
    pub file: String,
    /// Columns to draw; empty means every numeric column.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Y-axis label.
    #[serde(default)]
    pub ylabel: Option<String>,
    /// Hex color overrides, one per series, cycled when shorter.
    #[serde(default)]
    pub colors: Vec<String>,
}

/// A full plot control document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotControl {
    pub items: Vec<PlotItem>,
}

/// Read a plot control document from a YAML file.
pub fn read_plot_control(path: &Path) -> Result<PlotControl> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Write a plot control document to a YAML file.
pub fn write_plot_control(control: &PlotControl, path: &Path) -> Result<()> {
    let text = serde_yaml::to_string(control)?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_round_trip() {
        let control = PlotControl {
            items: vec![
                PlotItem {
                    file: "tsr_seg2.csv".to_string(),
                    columns: vec!["Temp".to_string(), "DO".to_string()],
                    ylabel: Some("Temperature (C)".to_string()),
                    colors: vec!["#3366cc".to_string()],
                },
                PlotItem {
                    file: "qwb.opt".to_string(),
                    columns: vec![],
                    ylabel: None,
                    colors: vec![],
                },
            ],
        };

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plots.yaml");
        write_plot_control(&control, &path).unwrap();
        assert_eq!(read_plot_control(&path).unwrap(), control);
    }

    #[test]
    fn test_missing_fields_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plots.yaml");
        std::fs::write(&path, "items:\n  - file: tsr_seg2.csv\n").unwrap();

        let control = read_plot_control(&path).unwrap();
        assert_eq!(control.items.len(), 1);
        assert!(control.items[0].columns.is_empty());
        assert!(control.items[0].ylabel.is_none());
    }
}
