//! Application constants for the data validator
//!
//! This module contains default file names, the fixed rule definitions and
//! chart geometry used throughout the application.

// =============================================================================
// Default File Names
// =============================================================================

/// Input file read when no path is given on the command line
pub const DEFAULT_INPUT_FILE: &str = "survey_data.csv";

/// Delimited summary written next to the charts
pub const DEFAULT_SUMMARY_FILE: &str = "validation_summary.csv";

/// Valid vs invalid proportion chart
pub const DEFAULT_VALIDITY_CHART_FILE: &str = "validity_chart.png";

/// Per-rule error count chart
pub const DEFAULT_ERROR_CHART_FILE: &str = "error_chart.png";

/// Config file name looked up under the user config directory
pub const CONFIG_DIR_NAME: &str = "data-validator";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Field delimiter of the input file
pub const DEFAULT_DELIMITER: char = ',';

// =============================================================================
// Validation Rules
// =============================================================================

/// Fixed rule definitions, in registration order
pub mod rules {
    /// Age: integer at position 1, inclusive range
    pub const AGE_NAME: &str = "Age";
    pub const AGE_POSITION: usize = 1;
    pub const AGE_MIN: i64 = 0;
    pub const AGE_MAX: i64 = 120;

    /// Income: decimal at position 2, strictly positive
    pub const INCOME_NAME: &str = "Income";
    pub const INCOME_POSITION: usize = 2;

    /// Email: non-empty text at position 4 containing '@'
    pub const EMAIL_NAME: &str = "Email";
    pub const EMAIL_POSITION: usize = 4;
    pub const EMAIL_REQUIRED_CHAR: char = '@';
}

// =============================================================================
// Summary File Layout
// =============================================================================

pub mod summary_file {
    pub const HEADER: [&str; 3] = ["Metric", "Count", "Percentage"];
    pub const TOTAL_LABEL: &str = "Total Rows Processed";
    pub const VALID_LABEL: &str = "Valid Rows";
    pub const INVALID_LABEL: &str = "Invalid Rows";
    pub const RULE_SUFFIX: &str = " Errors";
    /// The total row's percentage is always reported as this literal
    pub const TOTAL_PERCENTAGE: &str = "100%";
}

// =============================================================================
// Chart Geometry
// =============================================================================

/// Canvas and layout constants shared by both charts (pixels)
pub mod chart {
    pub const CANVAS_WIDTH: u32 = 400;
    pub const CANVAS_HEIGHT: u32 = 300;

    pub const BACKGROUND: [u8; 3] = [255, 255, 255];
    pub const TEXT: [u8; 3] = [0, 0, 0];

    pub const TITLE_X: i32 = 100;
    pub const TITLE_BASELINE: i32 = 30;

    /// Validity (pie) chart
    pub const PIE_TITLE: &str = "Valid vs Invalid Records";
    pub const PIE_TITLE_SCALE: f32 = 16.0;
    pub const PIE_LEFT: i32 = 50;
    pub const PIE_TOP: i32 = 50;
    pub const PIE_DIAMETER: u32 = 200;
    pub const PIE_VALID_COLOR: [u8; 3] = [100, 200, 100];
    pub const PIE_INVALID_COLOR: [u8; 3] = [200, 100, 100];
    pub const PIE_LABEL_X: i32 = 270;
    pub const PIE_VALID_LABEL_BASELINE: i32 = 120;
    pub const PIE_INVALID_LABEL_BASELINE: i32 = 140;
    pub const LABEL_SCALE: f32 = 12.0;

    /// Error (bar) chart
    pub const BAR_TITLE: &str = "Error Counts by Column";
    pub const BAR_TITLE_SCALE: f32 = 14.0;
    pub const BAR_START_X: i32 = 80;
    pub const BAR_STEP_X: i32 = 80;
    pub const BAR_WIDTH: u32 = 50;
    pub const BAR_MAX_HEIGHT: u32 = 150;
    pub const BAR_BASELINE_Y: i32 = 250;
    pub const BAR_LABEL_OFFSET_X: i32 = 5;
    pub const BAR_LABEL_BASELINE: i32 = 270;
    pub const BAR_COLOR: [u8; 3] = [100, 150, 240];
}

/// Fonts tried, in order, when no font path is configured
pub const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
