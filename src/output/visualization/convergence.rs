//! Log-log convergence and performance plots
//!
//! Everything drawn here comes from an [`ErrorTable`]: the measured curves are its
//! columns, and the theoretical slopes are computed from its axis values.
//!
//! # Available functions
//!
//! - [`plot_convergence`] — one measured curve per series against the step size,
//!   plus an aligned theoretical slope per series when its order is given
//! - [`plot_performance`] — error against runtime, one curve per series
//! - [`plot_curves`]      — the shared renderer, for callers assembling curves by hand
//!
//! NaN cells split a curve: each run of finite, positive points is drawn as its own
//! segment, so a missing record shows up as a gap rather than a misleading line.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::config::PlotConfig;
use super::slopes::{align_slope, theoretical_slope};
use crate::error::{AnalysisError, Result};
use crate::output::export::ErrorTable;

// =================================================================================================
// Curves
// =================================================================================================

/// How a curve is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveStyle {
    /// Solid line with point markers
    Measured,
    /// Thin translucent line, no markers
    Theoretical,
}

/// One labelled set of (x, y) points
#[derive(Debug, Clone)]
pub struct Curve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub style: CurveStyle,
}

/// Split points into runs that can be drawn on log axes
///
/// A point breaks the run when either coordinate is non-finite or not positive.
pub fn drawable_segments(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for &(x, y) in points {
        if x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0 {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Padded log-axis range covering every drawable point of every curve
fn log_range<F>(curves: &[Curve], coordinate: F) -> Option<(f64, f64)>
where
    F: Fn(&(f64, f64)) -> f64,
{
    let (lo, hi) = curves
        .iter()
        .flat_map(|c| drawable_segments(&c.points))
        .flatten()
        .map(|p| coordinate(&p))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    if lo == hi {
        return Some((lo / 2.0, hi * 2.0));
    }
    Some((lo / 1.5, hi * 1.5))
}

// =================================================================================================
// Public API
// =================================================================================================

/// Plot `metric` of every series against the table axis (step size)
///
/// # Arguments
///
/// * `table`       — Error table with the step size as axis
/// * `metric`      — Metric name of the columns to draw (e.g. `"Error"`, `"y"`)
/// * `orders`      — Per-series convergence order; `Some(p)` adds the aligned
///                   `(h/h₀)^p` line for that series
/// * `output_path` — Output file path (`.png` → bitmap, `.svg` → vector)
/// * `config`      — Plot configuration; colours are taken per series index
///
/// # Errors
///
/// `Plot` if no column of `metric` holds a drawable point, or if the backend fails.
pub fn plot_convergence(
    table: &ErrorTable,
    metric: &str,
    orders: &[Option<u32>],
    output_path: impl AsRef<Path>,
    config: &PlotConfig,
) -> Result<()> {
    let steps = table.axis_values();
    let mut curves = Vec::new();

    let series: Vec<&str> = table
        .columns()
        .iter()
        .filter(|c| c.metric == metric)
        .map(|c| c.series.as_str())
        .collect();

    for (k, name) in series.iter().enumerate() {
        let Some(errors) = table.column_values(name, metric) else {
            continue;
        };
        let color = config.series_color(k);

        curves.push(Curve {
            label: name.to_string(),
            points: steps.iter().copied().zip(errors.iter().copied()).collect(),
            color,
            style: CurveStyle::Measured,
        });

        if let Some(order) = orders.get(k).copied().flatten() {
            let slope = align_slope(&errors, &theoretical_slope(steps, order));
            curves.push(Curve {
                label: format!("Order {order} reference slope"),
                points: steps.iter().copied().zip(slope).collect(),
                color,
                style: CurveStyle::Theoretical,
            });
        }
    }

    plot_curves(&curves, output_path, config)
}

/// Plot `Error` against `Time` for every series of a tolerance-sweep table
pub fn plot_performance(
    table: &ErrorTable,
    output_path: impl AsRef<Path>,
    config: &PlotConfig,
) -> Result<()> {
    let mut series: Vec<&str> = Vec::new();
    for column in table.columns() {
        if !series.contains(&column.series.as_str()) {
            series.push(&column.series);
        }
    }

    let curves: Vec<Curve> = series
        .iter()
        .enumerate()
        .filter_map(|(k, name)| {
            let times = table.column_values(name, "Time")?;
            let errors = table.column_values(name, "Error")?;
            Some(Curve {
                label: name.to_string(),
                points: times.into_iter().zip(errors).collect(),
                color: config.series_color(k),
                style: CurveStyle::Measured,
            })
        })
        .collect();

    plot_curves(&curves, output_path, config)
}

/// Render curves on log-log axes, choosing the backend from the file extension
pub fn plot_curves(curves: &[Curve], output_path: impl AsRef<Path>, config: &PlotConfig) -> Result<()> {
    let output_path = output_path.as_ref();
    let plot_error = |reason: String| AnalysisError::Plot {
        path: output_path.to_path_buf(),
        reason,
    };

    let x_range = log_range(curves, |p| p.0).ok_or_else(|| plot_error("no drawable points".into()))?;
    let y_range = log_range(curves, |p| p.1).ok_or_else(|| plot_error("no drawable points".into()))?;

    let ext = output_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    let rendered = match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_curves_impl(backend, curves, config, x_range, y_range)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_curves_impl(backend, curves, config, x_range, y_range)
        }
    };

    rendered.map_err(|e| plot_error(e.to_string()))?;
    log::info!("wrote {}", output_path.display());
    Ok(())
}

// =================================================================================================
// Private Plot Implementation
// =================================================================================================

fn plot_curves_impl<DB: DrawingBackend>(
    backend: DB,
    curves: &[Curve],
    config: &PlotConfig,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (x_range.0..x_range.1).log_scale(),
            (y_range.0..y_range.1).log_scale(),
        )?;

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&|x| format!("{:.1e}", x))
        .y_label_formatter(&|y| format!("{:.1e}", y))
        .draw()?;

    for curve in curves {
        let color = curve.color;
        let segments = drawable_segments(&curve.points);

        let style = match curve.style {
            CurveStyle::Measured => ShapeStyle::from(&color).stroke_width(config.line_width),
            CurveStyle::Theoretical => ShapeStyle::from(&color.mix(0.5)).stroke_width(1),
        };

        // Legend entry goes on the first segment only
        for (i, segment) in segments.iter().enumerate() {
            let drawn = chart.draw_series(LineSeries::new(segment.iter().copied(), style))?;
            if i == 0 {
                drawn
                    .label(curve.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }
        }

        if curve.style == CurveStyle::Measured {
            let radius = config.marker_size;
            chart.draw_series(
                segments
                    .iter()
                    .flatten()
                    .map(|&p| Circle::new(p, radius, color.filled())),
            )?;
        }
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
