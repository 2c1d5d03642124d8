//! Heat maps of the reference `u` and `v` fields
//!
//! Both fields are drawn side by side on the `[-1, 1]²` domain, row 0 at the top.
//! Large grids are subsampled to at most [`MAX_CELLS_PER_SIDE`] cells per side;
//! a 1024² reference would otherwise mean a million rectangles per panel.

use std::error::Error;
use std::path::Path;

use ndarray::Array2;
use plotters::prelude::*;

use super::config::PlotConfig;
use crate::error::{AnalysisError, Result};
use crate::reference::GridReference;

pub const MAX_CELLS_PER_SIDE: usize = 256;

/// Blue (low) to red (high) through the hue circle
fn heat_color(value: f64, lo: f64, hi: f64) -> HSLColor {
    let t = if hi > lo { ((value - lo) / (hi - lo)).clamp(0.0, 1.0) } else { 0.5 };
    HSLColor(0.66 * (1.0 - t), 0.85, 0.5)
}

/// Min and max over the finite entries; `None` when there are none
fn finite_bounds(field: &Array2<f64>) -> Option<(f64, f64)> {
    field
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Plot the two reference fields to `output_path` (`.png` or `.svg`)
pub fn plot_reference_fields(
    reference: &GridReference,
    output_path: impl AsRef<Path>,
    config: &PlotConfig,
) -> Result<()> {
    let output_path = output_path.as_ref();
    let (u, v) = reference.fields();

    let ext = output_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    let rendered = match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_fields_impl(backend, &[("u", &u), ("v", &v)], config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_fields_impl(backend, &[("u", &u), ("v", &v)], config)
        }
    };

    rendered.map_err(|e| AnalysisError::Plot {
        path: output_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::info!("wrote {}", output_path.display());
    Ok(())
}

fn plot_fields_impl<DB: DrawingBackend>(
    backend: DB,
    fields: &[(&str, &Array2<f64>)],
    config: &PlotConfig,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;
    let root = root.titled(&config.title, ("sans-serif", 30).into_font())?;
    let panels = root.split_evenly((1, fields.len()));

    for (panel, (name, field)) in panels.iter().zip(fields) {
        let mut chart = ChartBuilder::on(panel)
            .caption(*name, ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(-1.0..1.0, -1.0..1.0)?;

        chart.configure_mesh().disable_mesh().draw()?;

        let (lo, hi) = finite_bounds(field).unwrap_or((0.0, 1.0));
        let n = field.nrows();
        let stride = n.div_ceil(MAX_CELLS_PER_SIDE).max(1);
        let cells = n.div_ceil(stride);
        let width = 2.0 / cells as f64;

        chart.draw_series((0..cells).flat_map(|bi| {
            (0..cells).map(move |bj| {
                let value = field[(bi * stride, bj * stride)];
                let x0 = -1.0 + bj as f64 * width;
                let y0 = 1.0 - bi as f64 * width;
                Rectangle::new(
                    [(x0, y0), (x0 + width, y0 - width)],
                    heat_color(value, lo, hi).filled(),
                )
            })
        }))?;
    }

    root.present()?;
    Ok(())
}
