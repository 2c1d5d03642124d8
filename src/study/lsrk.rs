//! LSRK tolerance sweep
//!
//! Every method is run at every tolerance. Each solution file holds the run's wall
//! time at index 0 followed by the state, so one record gives both columns of the
//! table:
//!
//! ```text
//! # LSRK Time, ERK Time, DIRK Time, LSRK Error, ERK Error, DIRK Error
//! ```
//!
//! The plot is error against runtime, one curve per method.

use crate::error::{AnalysisError, Result};
use crate::output::export::{export_table_csv, ErrorTable};
use crate::output::visualization::{plot_performance, PlotConfig};
use crate::reference::{GridReference, ReferenceSolution};
use crate::sweep::{naming, Collector, TolerancePlan};

use super::{grid_reference, plot_reference, StudyConfig, StudyKind, StudyReport};

/// Run the LSRK study over the default methods and tolerances
pub fn run_lsrk(config: &StudyConfig, reference: &ReferenceSolution) -> Result<StudyReport> {
    run_lsrk_with(config, reference, &TolerancePlan::lsrk_default())
}

/// Run the LSRK study over an explicit sweep
pub fn run_lsrk_with(
    config: &StudyConfig,
    reference: &ReferenceSolution,
    plan: &TolerancePlan,
) -> Result<StudyReport> {
    let grid_ref = grid_reference(StudyKind::Lsrk, reference)?;
    let metric = reference.metric();

    let grid = Collector::new(&config.data_dir).collect_tolerance_sweep(plan)?;

    let times = grid.to_matrix(|_, values| {
        values.iter().next().copied().ok_or(AnalysisError::EmptyVector)
    })?;
    let errors = grid.to_matrix(|_, values| Ok(metric.evaluate(grid_ref.as_vector(), values)?[0]))?;

    let table = ErrorTable::metric_major(
        "Tolerance",
        plan.tolerances().iter().map(|t| t.value()).collect(),
        false,
        grid.series(),
        vec![("Time", times), ("Error", errors)],
    )?;

    let mut report = StudyReport::new(StudyKind::Lsrk, grid.warnings().to_vec());

    let table_path = naming::lsrk_table_path(&config.data_dir);
    export_table_csv(&table, &table_path, Some(&config.csv))?;

    if config.plot {
        plot_lsrk(&table, grid_ref, config, &mut report)?;
    }

    report.push_table(table_path, table);
    Ok(report)
}

fn plot_lsrk(
    table: &ErrorTable,
    reference: &GridReference,
    config: &StudyConfig,
    report: &mut StudyReport,
) -> Result<()> {
    let path = naming::lsrk_plot_path(&config.data_dir);
    plot_performance(table, &path, &config.plot_config(PlotConfig::performance("LSRK Performance")))?;
    report.push_plot(path);

    plot_reference(reference, config, report)
}
