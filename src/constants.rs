//! Shared constants for CE-QUAL-W2 file conventions and plot styling.

/// Field width, in characters, of columns in NPT/OPT model control files.
pub const NPT_OPT_FIELD_WIDTH: usize = 8;

/// Name of the absolute-timestamp column added during normalization.
pub const DATETIME_COLUMN: &str = "DateTime";

/// Canonical column names for CE-QUAL-W2 meteorology files, in file order.
/// The leading JDAY column is handled separately by the reader.
pub const MET_COLUMN_NAMES: [&str; 6] = [
    "Air Temperature (C)",
    "Dew Point Temperature (C)",
    "Wind Speed (m/s)",
    "Wind Direction (radians)",
    "Cloudiness (fraction)",
    "Solar Radiation (W/m2)",
];

/// Name for the optional seventh met data column.
pub const MET_TRANSLUCENCY_COLUMN: &str = "Translucency (fraction)";

/// Default series color when no palette is supplied.
pub const DEFAULT_COLOR: &str = "#4682b4";

/// General-purpose qualitative palette.
pub const RAINBOW: [&str; 10] = [
    "#3366cc", "#dc3912", "#ff9900", "#109618", "#990099", "#0099c6", "#dd4477", "#66aa00",
    "#b82e2e", "#316395",
];

/// Cool palette, blues and greens.
pub const EVEREST: [&str; 8] = [
    "#1b4f72", "#2874a6", "#3498db", "#85c1e9", "#148f77", "#1abc9c", "#76d7c4", "#0e6251",
];

/// Muted palette, slate and earth tones.
pub const K2: [&str; 8] = [
    "#2c3e50", "#566573", "#808b96", "#aab7b8", "#7b7d7d", "#935116", "#af601a", "#ca6f1e",
];
