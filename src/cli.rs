//! Command-line options of the `conv-rs` binary

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::input::{MarkerFormat, ADJOINT_TUPLE_WIDTH, DEFAULT_MARKER};
use crate::metrics::DIVERGENCE_CEILING;
use crate::output::export::{CsvConfig, CsvMetadata};
use crate::study::{StudyConfig, StudyKind, DEFAULT_GRID_PTS_1D};
use crate::sweep::naming;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    #[value(name = "LSRK")]
    Lsrk,
    #[value(name = "Splitting")]
    Splitting,
    #[value(name = "Adjoint")]
    Adjoint,
}

impl From<Method> for StudyKind {
    fn from(method: Method) -> Self {
        match method {
            Method::Lsrk => StudyKind::Lsrk,
            Method::Splitting => StudyKind::Splitting,
            Method::Adjoint => StudyKind::Adjoint,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Convergence and error analysis of solver benchmark output", long_about = None)]
pub struct Args {
    /// Render plots next to the CSV tables
    #[arg(long)]
    pub plot: bool,

    /// Grid side of the PDE reference solution
    #[arg(long = "grid_pts_1d", default_value_t = DEFAULT_GRID_PTS_1D)]
    pub grid_pts_1d: usize,

    /// Study to run
    #[arg(long, value_enum, ignore_case = true, default_value = "LSRK")]
    pub method: Method,

    /// Directory holding reference, results and outputs
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Step-size file for the adjoint study (one value per line)
    #[arg(long)]
    pub step_sizes: Option<PathBuf>,

    /// Marker token of result lines in adjoint logs
    #[arg(long, default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// Write a comment block describing the run above each table header
    #[arg(long)]
    pub metadata: bool,
}

impl Args {
    pub fn study_kind(&self) -> StudyKind {
        self.method.into()
    }

    pub fn study_config(&self) -> StudyConfig {
        let mut config = StudyConfig::new(&self.data_dir)
            .with_plot(self.plot)
            .with_grid_pts_1d(self.grid_pts_1d)
            .with_marker(MarkerFormat::new(self.marker.as_str(), ADJOINT_TUPLE_WIDTH))
            .with_csv_config(self.csv_config());
        if let Some(path) = &self.step_sizes {
            config = config.with_step_sizes(path);
        }
        config
    }

    fn csv_config(&self) -> CsvConfig {
        if !self.metadata {
            return CsvConfig::default();
        }

        let kind = self.study_kind();
        let metadata = match kind {
            StudyKind::Lsrk | StudyKind::Splitting => {
                let mut metadata = CsvMetadata::for_study(&kind.to_string(), self.grid_pts_1d);
                let reference = naming::reference_path(&self.data_dir, self.grid_pts_1d);
                metadata.reference = Some(reference.display().to_string());
                metadata.ceiling = Some(DIVERGENCE_CEILING);
                metadata
            }
            StudyKind::Adjoint => {
                let mut metadata = CsvMetadata {
                    study: Some(kind.to_string()),
                    reference: Some(naming::adjoint_reference_path(&self.data_dir).display().to_string()),
                    ..Default::default()
                };
                metadata.add_custom("Marker".to_string(), self.marker.clone());
                metadata
            }
        };
        CsvConfig::default().with_metadata(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["conv-rs"]).unwrap();
        assert!(!args.plot);
        assert_eq!(args.grid_pts_1d, 1024);
        assert_eq!(args.method, Method::Lsrk);
        assert_eq!(args.data_dir, PathBuf::from("data"));
        assert_eq!(args.marker, "ASA");
        assert!(!args.study_config().csv.include_metadata);
    }

    #[test]
    fn test_metadata_describes_the_run() {
        let args = Args::try_parse_from(["conv-rs", "--metadata", "--grid_pts_1d", "128"]).unwrap();
        let csv = args.study_config().csv;
        let metadata = csv.metadata.unwrap();

        assert!(csv.include_metadata);
        assert_eq!(metadata.study.as_deref(), Some("LSRK"));
        assert_eq!(metadata.grid_pts_1d, Some(128));
        assert_eq!(metadata.ceiling, Some(DIVERGENCE_CEILING));

        let args = Args::try_parse_from(["conv-rs", "--metadata", "--method", "adjoint"]).unwrap();
        let metadata = args.study_config().csv.metadata.unwrap();
        assert_eq!(metadata.grid_pts_1d, None);
        assert_eq!(metadata.custom, vec![("Marker".to_string(), "ASA".to_string())]);
    }

    #[test]
    fn test_method_is_case_insensitive() {
        for spelling in ["splitting", "SPLITTING", "Splitting"] {
            let args = Args::try_parse_from(["conv-rs", "--method", spelling]).unwrap();
            assert_eq!(args.study_kind(), StudyKind::Splitting);
        }
        let args = Args::try_parse_from(["conv-rs", "--method", "lsrk"]).unwrap();
        assert_eq!(args.method, Method::Lsrk);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        assert!(Args::try_parse_from(["conv-rs", "--method", "Euler"]).is_err());
    }

    #[test]
    fn test_underscore_grid_option() {
        let args = Args::try_parse_from(["conv-rs", "--grid_pts_1d", "256", "--plot"]).unwrap();
        let config = args.study_config();
        assert_eq!(config.grid_pts_1d, 256);
        assert!(config.plot);
    }

    #[test]
    fn test_adjoint_options_reach_config() {
        let args = Args::try_parse_from([
            "conv-rs",
            "--method",
            "adjoint",
            "--data-dir",
            "runs",
            "--step-sizes",
            "runs/h.txt",
            "--marker",
            "SENS",
        ])
        .unwrap();
        let config = args.study_config();

        assert_eq!(config.data_dir, PathBuf::from("runs"));
        assert_eq!(config.step_sizes, Some(PathBuf::from("runs/h.txt")));
        assert_eq!(config.marker, MarkerFormat::new("SENS", ADJOINT_TUPLE_WIDTH));
    }
}
