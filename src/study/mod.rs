//! End-to-end studies
//!
//! Each study wires the pipeline for one family of runs:
//!
//! ```text
//! reference ──┐
//!             ├─► metric ─► ErrorTable ─► CSV
//! collector ──┘                  └──────► plot (optional)
//! ```
//!
//! | Study | Sweep | Reference | Outputs |
//! |-------|-------|-----------|---------|
//! | [`StudyKind::Lsrk`] | method × tolerance | grid | `lsrk.csv`, `lsrk.png` |
//! | [`StudyKind::Splitting`] | order × step size | grid | `splitting.csv`, `splitting.png` |
//! | [`StudyKind::Adjoint`] | order × step size (logs) | adjoint | `error_asa_order_<k>.csv`, `convergence_<c>.png` |
//!
//! The reference is loaded once per run with [`load_reference`] and handed to
//! [`run_study`]; its shape picks the metric.
//!
//! A study never stops on a missing result file: the cell stays NaN and the
//! warning is returned in the [`StudyReport`] for the caller to print.

pub mod adjoint;
pub mod lsrk;
pub mod splitting;

use std::fmt;
use std::path::{Path, PathBuf};

use plotters::style::RGBColor;

use crate::error::{AnalysisError, Result};
use crate::input::MarkerFormat;
use crate::output::export::{CsvConfig, ErrorTable};
use crate::output::visualization::{plot_reference_fields, PlotConfig};
use crate::reference::{AdjointReference, GridReference, ReferenceSolution};
use crate::sweep::{naming, SweepWarning};

pub use adjoint::{run_adjoint, run_adjoint_with};
pub use lsrk::{run_lsrk, run_lsrk_with};
pub use splitting::{run_splitting, run_splitting_with};

/// Grid side of the default PDE reference
pub const DEFAULT_GRID_PTS_1D: usize = 1024;

// =================================================================================================
// Configuration
// =================================================================================================

/// Which study to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyKind {
    Lsrk,
    Splitting,
    Adjoint,
}

impl fmt::Display for StudyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyKind::Lsrk => write!(f, "LSRK"),
            StudyKind::Splitting => write!(f, "Splitting"),
            StudyKind::Adjoint => write!(f, "Adjoint"),
        }
    }
}

/// Settings shared by every study
///
/// # Example
///
/// ```rust,ignore
/// use conv_rs::study::{StudyConfig, StudyKind, load_reference, run_study};
///
/// let config = StudyConfig::new("data").with_plot(true).with_grid_pts_1d(512);
/// let reference = load_reference(StudyKind::Splitting, &config)?;
/// let report = run_study(StudyKind::Splitting, &config, &reference)?;
/// for warning in report.warnings() {
///     println!("{warning}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StudyConfig {
    /// Directory holding the inputs; outputs are written next to them
    pub data_dir: PathBuf,

    /// Render plots in addition to the CSV tables
    pub plot: bool,

    /// Grid side of the PDE reference (`ref_<n>.txt`)
    pub grid_pts_1d: usize,

    /// Marker-line format of the adjoint logs
    pub marker: MarkerFormat,

    /// Explicit step-size file for the adjoint study
    ///
    /// When `None`, `<data_dir>/step_sizes.txt` is used if present, else the
    /// built-in steps.
    pub step_sizes: Option<PathBuf>,

    pub csv: CsvConfig,

    /// Colours for series 0, 1, ... of every plot; `None` keeps the default palette
    pub series_colors: Option<Vec<RGBColor>>,
}

impl StudyConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            plot: false,
            grid_pts_1d: DEFAULT_GRID_PTS_1D,
            marker: MarkerFormat::default(),
            step_sizes: None,
            csv: CsvConfig::default(),
            series_colors: None,
        }
    }

    pub fn with_plot(mut self, plot: bool) -> Self {
        self.plot = plot;
        self
    }

    pub fn with_grid_pts_1d(mut self, grid_pts_1d: usize) -> Self {
        self.grid_pts_1d = grid_pts_1d;
        self
    }

    pub fn with_marker(mut self, marker: MarkerFormat) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_step_sizes(mut self, path: impl Into<PathBuf>) -> Self {
        self.step_sizes = Some(path.into());
        self
    }

    pub fn with_csv_config(mut self, csv: CsvConfig) -> Self {
        self.csv = csv;
        self
    }

    pub fn with_series_colors(mut self, colors: Vec<RGBColor>) -> Self {
        self.series_colors = Some(colors);
        self
    }

    /// Apply the configured series colours to a plot configuration
    pub(crate) fn plot_config(&self, base: PlotConfig) -> PlotConfig {
        match &self.series_colors {
            Some(colors) => base.with_colors(colors.clone()),
            None => base,
        }
    }
}

// =================================================================================================
// Report
// =================================================================================================

/// A table written by a study
#[derive(Debug, Clone)]
pub struct WrittenTable {
    pub path: PathBuf,
    pub table: ErrorTable,
}

/// What a study produced, and what it had to skip
#[derive(Debug, Clone)]
pub struct StudyReport {
    kind: StudyKind,
    tables: Vec<WrittenTable>,
    plots: Vec<PathBuf>,
    warnings: Vec<SweepWarning>,
}

impl StudyReport {
    pub(crate) fn new(kind: StudyKind, warnings: Vec<SweepWarning>) -> Self {
        Self { kind, tables: Vec::new(), plots: Vec::new(), warnings }
    }

    pub(crate) fn push_table(&mut self, path: PathBuf, table: ErrorTable) {
        self.tables.push(WrittenTable { path, table });
    }

    pub(crate) fn push_plot(&mut self, path: PathBuf) {
        self.plots.push(path);
    }

    pub fn kind(&self) -> StudyKind {
        self.kind
    }

    pub fn tables(&self) -> &[WrittenTable] {
        &self.tables
    }

    /// Table written to `path`, if any
    pub fn table(&self, path: &Path) -> Option<&ErrorTable> {
        self.tables.iter().find(|t| t.path == path).map(|t| &t.table)
    }

    pub fn plots(&self) -> &[PathBuf] {
        &self.plots
    }

    pub fn warnings(&self) -> &[SweepWarning] {
        &self.warnings
    }
}

// =================================================================================================
// Dispatch
// =================================================================================================

/// Load the reference a study measures against
///
/// # Errors
///
/// `ReferenceMissing` or `MalformedReference`; both are fatal for the run.
pub fn load_reference(kind: StudyKind, config: &StudyConfig) -> Result<ReferenceSolution> {
    match kind {
        StudyKind::Lsrk | StudyKind::Splitting => load_grid_reference(config).map(ReferenceSolution::from),
        StudyKind::Adjoint => load_adjoint_reference(config).map(ReferenceSolution::from),
    }
}

/// `ref_<grid_pts_1d>.txt` from the data directory
pub fn load_grid_reference(config: &StudyConfig) -> Result<GridReference> {
    let path = naming::reference_path(&config.data_dir, config.grid_pts_1d);
    GridReference::load(&path, config.grid_pts_1d)
}

/// `asa_reference.txt` from the data directory
pub fn load_adjoint_reference(config: &StudyConfig) -> Result<AdjointReference> {
    AdjointReference::load(&naming::adjoint_reference_path(&config.data_dir))
}

/// Run one study with its default sweep against a reference loaded beforehand
pub fn run_study(
    kind: StudyKind,
    config: &StudyConfig,
    reference: &ReferenceSolution,
) -> Result<StudyReport> {
    match kind {
        StudyKind::Lsrk => run_lsrk(config, reference),
        StudyKind::Splitting => run_splitting(config, reference),
        StudyKind::Adjoint => run_adjoint(config, reference),
    }
}

pub(crate) fn grid_reference(kind: StudyKind, reference: &ReferenceSolution) -> Result<&GridReference> {
    reference.as_grid().ok_or_else(|| AnalysisError::WrongReference {
        study: kind.to_string(),
        expected: "grid",
    })
}

pub(crate) fn adjoint_reference(kind: StudyKind, reference: &ReferenceSolution) -> Result<&AdjointReference> {
    reference.as_adjoint().ok_or_else(|| AnalysisError::WrongReference {
        study: kind.to_string(),
        expected: "adjoint",
    })
}

/// Heat map of the grid reference, for the grid studies when plotting is on
pub(crate) fn plot_reference(
    reference: &GridReference,
    config: &StudyConfig,
    report: &mut StudyReport,
) -> Result<()> {
    let path = naming::reference_fields_plot_path(&config.data_dir);
    let title = format!("Reference solution ({0}x{0})", reference.side());
    plot_reference_fields(reference, &path, &PlotConfig::fields(title))?;
    report.push_plot(path);
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
