//! Operator-splitting order sweep
//!
//! One result file per (order, step size), measured against the grid reference.
//! The table leads with the step size:
//!
//! ```text
//! # h, Order 1 Error, Order 2 Error, Order 3 Error, Order 4 Error, Order 6 Error
//! ```

use crate::error::Result;
use crate::output::export::{export_table_csv, ErrorTable};
use crate::output::visualization::{plot_convergence, PlotConfig};
use crate::reference::{GridReference, ReferenceSolution};
use crate::sweep::{naming, Collector, StepPlan};

use super::{grid_reference, plot_reference, StudyConfig, StudyKind, StudyReport};

/// Run the splitting study over the default orders and step sizes
pub fn run_splitting(config: &StudyConfig, reference: &ReferenceSolution) -> Result<StudyReport> {
    run_splitting_with(config, reference, &StepPlan::splitting_default())
}

/// Run the splitting study over an explicit sweep
pub fn run_splitting_with(
    config: &StudyConfig,
    reference: &ReferenceSolution,
    plan: &StepPlan,
) -> Result<StudyReport> {
    let grid_ref = grid_reference(StudyKind::Splitting, reference)?;
    let metric = reference.metric();

    let grid = Collector::new(&config.data_dir).collect_step_sweep(plan)?;
    let errors = grid.to_matrix(|_, values| Ok(metric.evaluate(grid_ref.as_vector(), values)?[0]))?;

    let table = ErrorTable::metric_major(
        "h",
        plan.steps().to_vec(),
        true,
        grid.series(),
        vec![("Error", errors)],
    )?;

    let mut report = StudyReport::new(StudyKind::Splitting, grid.warnings().to_vec());

    let table_path = naming::splitting_table_path(&config.data_dir);
    export_table_csv(&table, &table_path, Some(&config.csv))?;

    if config.plot {
        plot_splitting(&table, plan, grid_ref, config, &mut report)?;
    }

    report.push_table(table_path, table);
    Ok(report)
}

fn plot_splitting(
    table: &ErrorTable,
    plan: &StepPlan,
    reference: &GridReference,
    config: &StudyConfig,
    report: &mut StudyReport,
) -> Result<()> {
    let orders: Vec<Option<u32>> = plan.orders().iter().map(|&o| Some(o)).collect();
    let path = naming::splitting_plot_path(&config.data_dir);
    let plot_config = config.plot_config(PlotConfig::convergence("Splitting Method Convergence"));

    plot_convergence(table, "Error", &orders, &path, &plot_config)?;
    report.push_plot(path);

    plot_reference(reference, config, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::load_reference;
    use crate::sweep::SweepWarning;
    use approx::assert_relative_eq;
    use std::fs;

    #[test]
    fn test_step_axis_leads_the_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ref_1.txt"), "9.0 3.0 4.0\n").unwrap();
        fs::write(dir.path().join("splitting_2_1.txt"), "1.0 3.0 4.0\n").unwrap();
        fs::write(dir.path().join("splitting_2_.50000000000000000000.txt"), "1.0 3.3 4.4\n").unwrap();

        let plan = StepPlan::new(vec![2, 3], vec![1.0, 0.5]).unwrap();
        let config = StudyConfig::new(dir.path()).with_grid_pts_1d(1);
        let reference = load_reference(StudyKind::Splitting, &config).unwrap();
        let report = run_splitting_with(&config, &reference, &plan).unwrap();

        let table = report.table(&dir.path().join("splitting.csv")).unwrap();
        assert_eq!(table.headers(), vec!["h", "Order 2 Error", "Order 3 Error"]);
        assert_eq!(table.axis_values(), &[1.0, 0.5]);
        assert_eq!(table.cell(0, "Order 2", "Error"), Some(0.0));
        assert_relative_eq!(table.cell(1, "Order 2", "Error").unwrap(), 0.1, epsilon = 1e-12);

        // order 3 has no result files at all
        assert!(table.cell(0, "Order 3", "Error").unwrap().is_nan());
        assert_eq!(report.warnings().len(), 2);
        assert!(report
            .warnings()
            .iter()
            .all(|w| matches!(w, SweepWarning::MissingFile { .. })));
    }

    #[test]
    fn test_csv_written_with_header() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ref_1.txt"), "9.0 3.0 4.0\n").unwrap();
        fs::write(dir.path().join("splitting_1_1.txt"), "1.0 3.0 4.0\n").unwrap();

        let plan = StepPlan::new(vec![1], vec![1.0]).unwrap();
        let config = StudyConfig::new(dir.path()).with_grid_pts_1d(1);
        let reference = load_reference(StudyKind::Splitting, &config).unwrap();
        run_splitting_with(&config, &reference, &plan).unwrap();

        let text = fs::read_to_string(dir.path().join("splitting.csv")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# h, Order 1 Error");
        assert_eq!(lines.len(), 2);
    }
}
