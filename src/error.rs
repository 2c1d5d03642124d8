//! Error types for the analysis pipeline
//!
//! Every fallible operation in the crate returns [`Result<T>`], an alias over
//! [`AnalysisError`]. The variants follow the failure taxonomy of the run:
//!
//! ```text
//! AnalysisError
//! ├── ReferenceMissing / MalformedReference   fatal: no baseline
//! ├── WrongReference                           baseline of the other shape
//! ├── Io / Parse / TupleWidth / MissingColon   malformed input file
//! ├── LengthMismatch / EmptyVector             record shape does not match reference
//! ├── InvalidSweep                             sweep axes rejected before collection
//! └── Export / Plot                            output stage failures
//! ```
//!
//! A *missing* result file is not in this list: the collector leaves the cell absent
//! and reports a [`crate::sweep::SweepWarning`].

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("reference solution not found at {}", path.display())]
    ReferenceMissing { path: PathBuf },

    #[error("malformed reference {}: {reason}", path.display())]
    MalformedReference { path: PathBuf, reason: String },

    #[error("the {study} study needs a {expected} reference")]
    WrongReference { study: String, expected: &'static str },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: cannot parse '{token}' as a number", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}:{line}: expected {expected} values, found {found}", path.display())]
    TupleWidth {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}:{line}: marker line has no ':' separator", path.display())]
    MissingColon { path: PathBuf, line: usize },

    #[error("length mismatch: reference has {reference} entries, sample has {sample}")]
    LengthMismatch { reference: usize, sample: usize },

    #[error("cannot compute an error metric on an empty vector")]
    EmptyVector,

    #[error("invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("export to {} failed: {reason}", path.display())]
    Export { path: PathBuf, reason: String },

    #[error("plot {} failed: {reason}", path.display())]
    Plot { path: PathBuf, reason: String },
}

impl AnalysisError {
    /// Wrap an I/O error with the path that produced it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// True for the failures that mean no baseline is available
    pub fn is_reference_failure(&self) -> bool {
        matches!(
            self,
            Self::ReferenceMissing { .. } | Self::MalformedReference { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_failures_are_flagged() {
        let missing = AnalysisError::ReferenceMissing { path: "data/ref_8.txt".into() };
        let parse = AnalysisError::Parse { path: "a.txt".into(), line: 3, token: "x".into() };

        assert!(missing.is_reference_failure());
        assert!(!parse.is_reference_failure());
    }

    #[test]
    fn test_messages_name_the_file() {
        let err = AnalysisError::TupleWidth {
            path: "data/asa_order_3.log".into(),
            line: 7,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "data/asa_order_3.log:7: expected 3 values, found 2"
        );
    }
}
