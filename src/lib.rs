//! conv-rs: Convergence and Error Analysis of Time-Integration Benchmarks
//!
//! Turns raw solver output into error tables and convergence plots, to check that
//! each numerical method reaches its claimed order of accuracy.
//!
//! # Architecture
//!
//! conv-rs is the last stage of a benchmark pipeline. The solvers have already run
//! and written their results; this crate only reads, measures and reports:
//!
//! ```text
//!  reference ──► ReferenceSolution ─┐
//!                                   ├─► ErrorMetric ─► ErrorTable ─► CSV / plot
//!  results ───► Collector ──────────┘
//!               (missing file → NaN + warning)
//! ```
//!
//! Two families of data are supported:
//!
//! 1. **Gray-Scott PDE runs**: flat vectors (wall time, then interleaved `u`/`v`
//!    grid samples), measured with the relative L2 error against a fine reference
//! 2. **Lotka-Volterra adjoint runs**: marker lines in solver logs holding
//!    `(‖y‖, ‖dg/dy₀‖, ‖dg/dp‖)`, measured entrywise
//!
//! # Quick Start
//!
//! ```rust
//! use conv_rs::metrics::capped_relative_l2_error;
//! use nalgebra::DVector;
//!
//! # fn main() -> conv_rs::Result<()> {
//! // Element 0 is a wall time and does not count
//! let reference = DVector::from_vec(vec![0.1, 1.0, 2.0, 3.0, 4.0]);
//! let sample = DVector::from_vec(vec![7.5, 1.0, 2.0, 3.0, 4.0]);
//! assert_eq!(capped_relative_l2_error(&reference, &sample)?, 0.0);
//!
//! // A diverged run is reported as NaN
//! let diverged = reference.map(|x| x * 100.0);
//! assert!(capped_relative_l2_error(&reference, &diverged)?.is_nan());
//! # Ok(())
//! # }
//! ```
//!
//! Whole studies run from a data directory:
//!
//! ```rust,ignore
//! use conv_rs::study::{load_reference, run_study, StudyConfig, StudyKind};
//!
//! let config = StudyConfig::new("data");
//! let reference = load_reference(StudyKind::Splitting, &config)?;
//! let report = run_study(StudyKind::Splitting, &config, &reference)?;
//! ```
//!
//! # Modules
//!
//! - [`reference`]: Ground-truth loading
//! - [`sweep`]: Sweep axes, file naming and result collection
//! - [`metrics`]: Relative error measures
//! - [`output`]: CSV export and plots
//! - [`study`]: The three end-to-end studies
//! - [`cli`]: Command-line options
//! - [`input`]: Numeric-line and marker-line readers

pub mod error;
pub mod input;
pub mod metrics;
pub mod reference;
pub mod sweep;

pub mod output;
pub mod study;

pub mod cli;

pub use error::{AnalysisError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use conv_rs::prelude::*;
    //! ```
    pub use crate::error::{AnalysisError, Result};
    pub use crate::metrics::{ErrorMetric, capped_relative_l2_error, entrywise_relative_error};
    pub use crate::output::{ErrorTable, PlotConfig, export_table_csv};
    pub use crate::reference::{AdjointReference, GridReference, ReferenceSolution};
    pub use crate::study::{StudyConfig, StudyKind, StudyReport, load_reference, run_study};
    pub use crate::sweep::{Collector, StepPlan, TolerancePlan};
}
