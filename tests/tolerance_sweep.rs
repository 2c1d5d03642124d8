//! Tolerance sweep with partial failure
//!
//! Two methods at two tolerances, one result file missing: the study must still
//! produce a complete table with NaN in the missing cells and exactly one warning.

use approx::assert_relative_eq;

use conv_rs::metrics::DIVERGENCE_CEILING;
use conv_rs::study::{load_reference, run_lsrk_with, StudyConfig, StudyKind, StudyReport};
use conv_rs::sweep::{SweepWarning, TolerancePlan};

mod common;
use common::{grid_samples, read_csv, DataDir};

const SIDE: usize = 3;

/// Load the grid reference, then run the sweep against it
fn run_sweep(config: &StudyConfig, plan: &TolerancePlan) -> conv_rs::Result<StudyReport> {
    let reference = load_reference(StudyKind::Lsrk, config)?;
    run_lsrk_with(config, &reference, plan)
}

fn scaled(samples: &[f64], factor: f64) -> Vec<f64> {
    samples.iter().map(|s| s * factor).collect()
}

/// Reference plus results for (A, 1e-2), (B, 1e-2), (A, 1e-3); (B, 1e-3) missing
fn partial_sweep() -> DataDir {
    let data = DataDir::new();
    let samples = grid_samples(SIDE);

    data.write_grid("ref_3.txt", 120.0, &samples);
    data.write_grid("A_1e-2.txt", 1.5, &scaled(&samples, 1.01));
    data.write_grid("B_1e-2.txt", 2.5, &scaled(&samples, 1.02));
    data.write_grid("A_1e-3.txt", 3.5, &scaled(&samples, 1.001));
    data
}

#[test]
fn test_missing_record_gives_nan_and_one_warning() {
    let data = partial_sweep();
    let plan = TolerancePlan::from_strings(&["A", "B"], &["1e-2", "1e-3"]).unwrap();
    let config = data.config().with_grid_pts_1d(SIDE);

    let report = run_sweep(&config, &plan).unwrap();

    assert_eq!(
        report.warnings(),
        &[SweepWarning::MissingFile { path: data.join("B_1e-3.txt") }]
    );
    assert_eq!(
        report.warnings()[0].to_string(),
        format!("Warning: unable to load {}", data.join("B_1e-3.txt").display())
    );

    let table = report.table(&data.join("lsrk.csv")).unwrap();
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.n_columns(), 4);

    // the missing cell and only the missing cell is NaN
    assert!(table.cell(1, "B", "Time").unwrap().is_nan());
    assert!(table.cell(1, "B", "Error").unwrap().is_nan());
    assert_eq!(table.cell(1, "A", "Time"), Some(3.5));
    assert_relative_eq!(table.cell(0, "A", "Error").unwrap(), 0.01, max_relative = 1e-9);
    assert_relative_eq!(table.cell(0, "B", "Error").unwrap(), 0.02, max_relative = 1e-9);
    assert_relative_eq!(table.cell(1, "A", "Error").unwrap(), 0.001, max_relative = 1e-9);
}

#[test]
fn test_exported_csv_layout() {
    let data = partial_sweep();
    let plan = TolerancePlan::from_strings(&["A", "B"], &["1e-2", "1e-3"]).unwrap();
    run_sweep(&data.config().with_grid_pts_1d(SIDE), &plan).unwrap();

    let (header, rows) = read_csv(&data.join("lsrk.csv"));
    assert_eq!(header, "# A Time, B Time, A Error, B Error");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.len() == 4));

    assert_eq!(rows[0][0], 1.5);
    assert_eq!(rows[0][1], 2.5);
    assert!(rows[1][1].is_nan());
    assert!(rows[1][3].is_nan());
    assert!(!rows[1][2].is_nan());
}

#[test]
fn test_diverged_run_is_capped() {
    let data = DataDir::new();
    let samples = grid_samples(SIDE);
    data.write_grid("ref_3.txt", 1.0, &samples);
    data.write_grid("A_1e-2.txt", 1.0, &scaled(&samples, 2.0 + DIVERGENCE_CEILING));

    let plan = TolerancePlan::from_strings(&["A"], &["1e-2"]).unwrap();
    let report = run_sweep(&data.config().with_grid_pts_1d(SIDE), &plan).unwrap();

    let table = &report.tables()[0].table;
    assert!(table.cell(0, "A", "Error").unwrap().is_nan());
    assert_eq!(table.cell(0, "A", "Time"), Some(1.0));
}

#[test]
fn test_missing_reference_stops_the_run() {
    let data = partial_sweep();
    let plan = TolerancePlan::from_strings(&["A", "B"], &["1e-2", "1e-3"]).unwrap();

    let result = run_sweep(&data.config().with_grid_pts_1d(4), &plan);
    assert!(result.unwrap_err().is_reference_failure());
    assert!(!data.exists("lsrk.csv"));
}

#[test]
fn test_malformed_result_stops_the_run() {
    let data = partial_sweep();
    data.write("B_1e-3.txt", "1.0\n2.0 abc\n");
    let plan = TolerancePlan::from_strings(&["A", "B"], &["1e-2", "1e-3"]).unwrap();

    assert!(run_sweep(&data.config().with_grid_pts_1d(SIDE), &plan).is_err());
}
