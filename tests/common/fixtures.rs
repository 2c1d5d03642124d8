//! On-disk data directories for integration tests
//!
//! Files are written in the layout the solver drivers use: one value list per
//! result file, wall time first.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use conv_rs::study::StudyConfig;

/// Temporary data directory, removed on drop
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("create temp dir") }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Study configuration pointing at this directory
    pub fn config(&self) -> StudyConfig {
        StudyConfig::new(self.path())
    }

    pub fn write(&self, name: &str, body: &str) {
        fs::write(self.join(name), body).expect("write fixture");
    }

    /// Write values one per line
    pub fn write_values(&self, name: &str, values: &[f64]) {
        let body: String = values.iter().map(|v| format!("{v:e}\n")).collect();
        self.write(name, &body);
    }

    /// Write a grid reference or result: wall time, then the samples
    pub fn write_grid(&self, name: &str, wall_time: f64, samples: &[f64]) {
        let mut values = vec![wall_time];
        values.extend_from_slice(samples);
        self.write_values(name, &values);
    }

    pub fn exists(&self, name: &str) -> bool {
        self.join(name).exists()
    }
}

/// `2·side²` smooth, nonzero field samples
pub fn grid_samples(side: usize) -> Vec<f64> {
    (0..2 * side * side).map(|i| 1.0 + 0.25 * (i as f64).sin()).collect()
}

/// Header line and data cells of an exported table
pub fn read_csv(path: &Path) -> (String, Vec<Vec<f64>>) {
    let text = fs::read_to_string(path).expect("read csv");
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next().expect("header line").to_string();
    let rows = lines
        .map(|line| {
            line.split(',')
                .map(|cell| cell.trim().parse::<f64>().expect("numeric cell"))
                .collect()
        })
        .collect();

    (header, rows)
}
