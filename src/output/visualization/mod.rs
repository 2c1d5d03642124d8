//! Plot adapter
//!
//! Thin layer between error tables and the `plotters` renderer.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`), including series colours
//! - **slopes**: Theoretical `(h/h₀)^p` slopes and their alignment to measured data
//! - **convergence**: Log-log error plots (against step size or runtime)
//! - **fields**: Heat maps of the reference `u`/`v` fields
//!
//! | Use Case | Function |
//! |----------|----------|
//! | Error vs step size, with order slopes | `plot_convergence` |
//! | Error vs runtime | `plot_performance` |
//! | Reference fields | `plot_reference_fields` |

pub mod config;
pub mod convergence;
pub mod fields;
pub mod slopes;

pub use config::{PlotConfig, NO_TITLE};
pub use convergence::{plot_convergence, plot_curves, plot_performance, Curve, CurveStyle};
pub use fields::plot_reference_fields;
pub use slopes::{align_slope, alignment_scale, theoretical_slope, SLOPE_EPSILON};
