//! Plot configuration shared across visualization modules
//!
//! Series colours are part of the configuration, never module-level state: a study
//! passes one [`PlotConfig`] down to every plot it draws, and series `k` of that
//! plot gets `series_color(k)`.

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `series_colors`: Optional colors, one per series
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `marker_size`: Radius of the measured-point markers
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust,ignore
/// use conv_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::convergence("Splitting Method Convergence");
/// config.series_colors = Some(vec![RED, BLUE, GREEN]);
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: "Relative l2 Error")
    pub ylabel: String,

    /// Optional colors for the series (one per series)
    ///
    /// If None, uses default palette: [RED, BLUE, GREEN, MAGENTA, CYAN, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Marker radius in pixels (default: 4)
    pub marker_size: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(), // Set by specific plot type
            ylabel: "Relative l2 Error".to_string(),
            series_colors: None,
            background: WHITE,
            line_width: 2,
            marker_size: 4,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Error against step size; default title "Convergence"
    pub fn convergence(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "Time Step".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Convergence".to_string()),
            ..Self::default()
        }
    }

    /// Error against runtime; default title "Performance"
    pub fn performance(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "Time (s)".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Performance".to_string()),
            ..Self::default()
        }
    }

    /// Side-by-side field heat maps; default title "Reference Solution"
    pub fn fields(title: impl IntoOptionalTitle) -> Self {
        Self {
            width: 1200,
            height: 600,
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Reference Solution".to_string()),
            ylabel: String::new(),
            ..Self::default()
        }
    }

    /// Builder pattern: set the series colors
    pub fn with_colors(mut self, colors: Vec<RGBColor>) -> Self {
        self.series_colors = Some(colors);
        self
    }

    /// Builder pattern: set the y-axis label
    pub fn with_ylabel(mut self, ylabel: impl Into<String>) -> Self {
        self.ylabel = ylabel.into();
        self
    }

    /// Get color for series at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub fn series_color(&self, series_index: usize) -> RGBColor {
        if let Some(ref colors) = self.series_colors {
            if series_index < colors.len() {
                return colors[series_index];
            }
        }

        const DEFAULT_COLORS: [RGBColor; 10] = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),   // Orange
            RGBColor(128, 0, 128),   // Purple
            RGBColor(255, 192, 203), // Pink
            RGBColor(165, 42, 42),   // Brown
        ];

        DEFAULT_COLORS[series_index % DEFAULT_COLORS.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
