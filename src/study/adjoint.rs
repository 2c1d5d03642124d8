//! Adjoint-sensitivity order sweep
//!
//! The adjoint driver writes one log per convergence order. Its result lines carry
//! the marker token and the triple `(‖y‖, ‖dg/dy₀‖, ‖dg/dp‖)`; the N-th result line
//! belongs to the N-th step size. Every triple is compared entrywise with the
//! reference triple of its order.
//!
//! One table per order:
//!
//! ```text
//! # h, Order 3 y, Order 3 dgdy_0, Order 3 dgdp
//! ```
//!
//! and, when plotting, one convergence plot per component with all orders on it.
//!
//! # Step sizes
//!
//! Resolved in this order:
//!
//! 1. the file given in [`StudyConfig::step_sizes`] (must exist);
//! 2. `<data_dir>/step_sizes.txt`, if present;
//! 3. the built-in `2^-1 … 2^-6`.

use std::io;

use nalgebra::{DMatrix, DVector};

use crate::error::{AnalysisError, Result};
use crate::input::load_column;
use crate::metrics::ErrorMetric;
use crate::output::export::{export_table_csv, ErrorTable};
use crate::output::visualization::{plot_convergence, PlotConfig};
use crate::reference::{AdjointReference, ReferenceSolution, ADJOINT_COMPONENTS};
use crate::sweep::{naming, order_series_name, Collector, RecordGrid, StepPlan};

use super::{adjoint_reference, StudyConfig, StudyKind, StudyReport};

/// Run the adjoint study over the default orders and the resolved step sizes
pub fn run_adjoint(config: &StudyConfig, reference: &ReferenceSolution) -> Result<StudyReport> {
    run_adjoint_with(config, reference, &adjoint_plan(config)?)
}

/// Default orders with the step sizes resolved from the configuration
pub fn adjoint_plan(config: &StudyConfig) -> Result<StepPlan> {
    let plan = StepPlan::adjoint_default();

    if let Some(path) = &config.step_sizes {
        let steps = load_column(path)?
            .ok_or_else(|| AnalysisError::io(path, io::Error::from(io::ErrorKind::NotFound)))?;
        return plan.with_steps(steps);
    }

    let path = naming::step_sizes_path(&config.data_dir);
    match load_column(&path)? {
        Some(steps) => {
            log::info!("using {} step sizes from {}", steps.len(), path.display());
            plan.with_steps(steps)
        }
        None => Ok(plan),
    }
}

/// Run the adjoint study over an explicit sweep
///
/// # Errors
///
/// Besides loading failures, `WrongReference` for a grid reference and
/// `MalformedReference` when the reference has no entry for one of the swept orders.
pub fn run_adjoint_with(
    config: &StudyConfig,
    reference: &ReferenceSolution,
    plan: &StepPlan,
) -> Result<StudyReport> {
    let expected = adjoint_reference(StudyKind::Adjoint, reference)?;
    let grid = Collector::new(&config.data_dir).collect_marker_logs(plan, &config.marker)?;
    let components = component_errors(&grid, plan, expected, reference.metric(), config)?;

    let mut report = StudyReport::new(StudyKind::Adjoint, grid.warnings().to_vec());

    for (j, &order) in plan.orders().iter().enumerate() {
        let metrics = ADJOINT_COMPONENTS
            .iter()
            .zip(&components)
            .map(|(&name, matrix)| (name, matrix.columns(j, 1).into_owned()))
            .collect();
        let table = ErrorTable::metric_major(
            "h",
            plan.steps().to_vec(),
            true,
            &[order_series_name(order)],
            metrics,
        )?;

        let path = naming::adjoint_table_path(&config.data_dir, order);
        export_table_csv(&table, &path, Some(&config.csv))?;
        report.push_table(path, table);
    }

    if config.plot {
        let table = ErrorTable::metric_major(
            "h",
            plan.steps().to_vec(),
            true,
            grid.series(),
            ADJOINT_COMPONENTS.iter().copied().zip(components).collect(),
        )?;
        plot_components(&table, plan, config, &mut report)?;
    }

    Ok(report)
}

/// One `steps × orders` error matrix per component
fn component_errors(
    grid: &RecordGrid,
    plan: &StepPlan,
    reference: &AdjointReference,
    metric: ErrorMetric,
    config: &StudyConfig,
) -> Result<Vec<DMatrix<f64>>> {
    let mut components =
        vec![DMatrix::from_element(grid.n_rows(), grid.n_series(), f64::NAN); ADJOINT_COMPONENTS.len()];

    for (j, &order) in plan.orders().iter().enumerate() {
        let expected = reference.get(order).ok_or_else(|| AnalysisError::MalformedReference {
            path: naming::adjoint_reference_path(&config.data_dir),
            reason: format!("no entry for order {order}"),
        })?;
        let expected = DVector::from_column_slice(expected.as_slice());

        for i in 0..grid.n_rows() {
            let Some(values) = grid.record(i, j).slot.values() else {
                continue;
            };

            let errors = metric.evaluate(&expected, values)?;
            for (c, matrix) in components.iter_mut().enumerate() {
                matrix[(i, j)] = errors[c];
            }
        }
    }

    Ok(components)
}

fn plot_components(
    table: &ErrorTable,
    plan: &StepPlan,
    config: &StudyConfig,
    report: &mut StudyReport,
) -> Result<()> {
    let orders: Vec<Option<u32>> = plan.orders().iter().map(|&o| Some(o)).collect();

    for component in ADJOINT_COMPONENTS {
        let path = naming::adjoint_plot_path(&config.data_dir, component);
        let plot_config = config.plot_config(
            PlotConfig::convergence(format!("Convergence of {component}"))
                .with_ylabel("Absolute Relative Error"),
        );
        plot_convergence(table, component, &orders, &path, &plot_config)?;
        report.push_plot(path);
    }
    Ok(())
}
