//! Gray-Scott reference solution on a square grid
//!
//! The reference file is the output of a high-accuracy run:
//!
//! ```text
//! index:   0          1     2     3     4    ...   2n²-1   2n²
//! value:   wall time  u₀    v₀    u₁    v₁   ...   u_last  v_last
//! ```
//!
//! The two fields are interleaved point by point. Reshaping is row-major, so
//! `u[(i, j)]` is sample `1 + 2·(i·n + j)` and `v[(i, j)]` the one right after it.

use std::path::{Path, PathBuf};

use nalgebra::DVector;
use ndarray::Array2;

use crate::error::{AnalysisError, Result};
use crate::input::load_vector;

/// Reference trajectory end state for one grid resolution
#[derive(Debug, Clone, PartialEq)]
pub struct GridReference {
    side: usize,
    values: DVector<f64>,
}

impl GridReference {
    /// Validate a raw vector against the expected grid side length
    ///
    /// # Errors
    ///
    /// `MalformedReference` if the vector is empty, if the field sample count is odd,
    /// or if it does not equal `2 · side²`.
    pub fn from_vector(values: DVector<f64>, side: usize, path: &Path) -> Result<Self> {
        let malformed = |reason: String| AnalysisError::MalformedReference {
            path: path.to_path_buf(),
            reason,
        };

        if values.is_empty() {
            return Err(malformed("file holds no values".to_string()));
        }
        if side == 0 {
            return Err(malformed("grid side length must be positive".to_string()));
        }

        let samples = values.len() - 1;
        if samples % 2 != 0 {
            return Err(malformed(format!(
                "{samples} field samples cannot be split into two interleaved fields"
            )));
        }
        let expected = 2 * side * side;
        if samples != expected {
            return Err(malformed(format!(
                "{samples} field samples, expected {expected} for a {side}x{side} grid"
            )));
        }

        Ok(Self { side, values })
    }

    /// Load `path`; a missing file is fatal here, unlike sweep records
    pub fn load(path: &Path, side: usize) -> Result<Self> {
        let values = load_vector(path)
            .map_err(|err| match err {
                AnalysisError::Parse { .. } => AnalysisError::MalformedReference {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                },
                other => other,
            })?
            .ok_or_else(|| AnalysisError::ReferenceMissing { path: PathBuf::from(path) })?;
        let reference = Self::from_vector(values, side, path)?;
        log::debug!(
            "Reference solution generated in {}s ({}x{} grid)",
            reference.wall_time(),
            side,
            side
        );
        Ok(reference)
    }

    /// Generation wall time in seconds (element 0)
    pub fn wall_time(&self) -> f64 {
        self.values[0]
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// The full vector, wall time included, as compared by the L2 metric
    pub fn as_vector(&self) -> &DVector<f64> {
        &self.values
    }

    /// Split the interleaved samples into the `u` and `v` grids
    pub fn fields(&self) -> (Array2<f64>, Array2<f64>) {
        let n = self.side;
        let u = Array2::from_shape_fn((n, n), |(i, j)| self.values[1 + 2 * (i * n + j)]);
        let v = Array2::from_shape_fn((n, n), |(i, j)| self.values[2 + 2 * (i * n + j)]);
        (u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn two_by_two() -> GridReference {
        // wall time 3.5, then (u, v) pairs: u = 1..4, v = 10..40
        let values = DVector::from_vec(vec![3.5, 1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0]);
        GridReference::from_vector(values, 2, Path::new("ref_2.txt")).unwrap()
    }

    #[test]
    fn test_fields_are_deinterleaved_row_major() {
        let reference = two_by_two();
        let (u, v) = reference.fields();

        assert_eq!(u.shape(), &[2, 2]);
        assert_eq!(u[(0, 0)], 1.0);
        assert_eq!(u[(0, 1)], 2.0);
        assert_eq!(u[(1, 0)], 3.0);
        assert_eq!(v[(1, 1)], 40.0);
        assert_eq!(reference.wall_time(), 3.5);
    }

    #[test]
    fn test_odd_sample_count_is_malformed() {
        let values = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let err = GridReference::from_vector(values, 1, Path::new("ref_1.txt")).unwrap_err();
        assert!(err.is_reference_failure());
    }

    #[test]
    fn test_wrong_resolution_is_malformed() {
        let values = DVector::from_vec(vec![0.0; 9]);
        let err = GridReference::from_vector(values, 4, Path::new("ref_4.txt")).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedReference { .. }));
    }

    #[test]
    fn test_missing_reference_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = GridReference::load(&dir.path().join("ref_2.txt"), 2).unwrap_err();
        assert!(matches!(err, AnalysisError::ReferenceMissing { .. }));
    }

    #[test]
    fn test_unparsable_file_is_a_reference_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ref_1.txt");
        std::fs::write(&file, "1.0\n2.0 abc\n").unwrap();

        let err = GridReference::load(&file, 1).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedReference { .. }));
        assert!(err.is_reference_failure());
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        for value in [0.75, 1.0, 2.0] {
            writeln!(file, "{value}").unwrap();
        }

        let reference = GridReference::load(file.path(), 1).unwrap();
        assert_eq!(reference.wall_time(), 0.75);
        assert_eq!(reference.as_vector().len(), 3);
    }
}
