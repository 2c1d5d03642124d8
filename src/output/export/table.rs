//! Error table assembled from sweep matrices
//!
//! # Column convention
//!
//! Columns are **metric-major**: all series for the first metric, then all series
//! for the second metric, and so on. For the LSRK study with metrics `Time` and
//! `Error`:
//!
//! ```text
//! LSRK Time, ERK Time, DIRK Time, LSRK Error, ERK Error, DIRK Error
//! ```
//!
//! When the axis column is enabled it comes first and carries the numeric value of
//! the primary axis (the step size `h` for the order sweeps).
//!
//! Cells are plain `f64`; NaN marks an absent record or a capped error and is kept
//! all the way to the exported file.

use nalgebra::DMatrix;

use crate::error::{AnalysisError, Result};

/// One (series, metric) column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub series: String,
    pub metric: String,
}

impl Column {
    pub fn header(&self) -> String {
        format!("{} {}", self.series, self.metric)
    }
}

/// Rows × (series × metric) table of one sweep
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorTable {
    axis_label: String,
    axis_values: Vec<f64>,
    include_axis: bool,
    columns: Vec<Column>,
    cells: DMatrix<f64>,
}

impl ErrorTable {
    /// Assemble a table from one `rows × series` matrix per metric
    ///
    /// # Arguments
    ///
    /// * `axis_label`   — name of the leading axis column (`"h"`, `"Tolerance"`)
    /// * `axis_values`  — primary-axis values, one per row, in sweep order
    /// * `include_axis` — write the axis values as the first column
    /// * `series`       — series names, in sweep order
    /// * `metrics`      — `(metric name, matrix)` pairs, in column order
    ///
    /// # Errors
    ///
    /// `InvalidSweep` when there are no rows, no series, no metrics, or when a matrix
    /// does not have shape `axis_values.len() × series.len()`.
    pub fn metric_major(
        axis_label: &str,
        axis_values: Vec<f64>,
        include_axis: bool,
        series: &[String],
        metrics: Vec<(&str, DMatrix<f64>)>,
    ) -> Result<Self> {
        let n_rows = axis_values.len();
        let n_series = series.len();
        if n_rows == 0 || n_series == 0 || metrics.is_empty() {
            return Err(AnalysisError::InvalidSweep(
                "a table needs at least one row, one series and one metric".to_string(),
            ));
        }

        for (name, matrix) in &metrics {
            if matrix.shape() != (n_rows, n_series) {
                return Err(AnalysisError::InvalidSweep(format!(
                    "metric '{name}' matrix is {}x{}, expected {n_rows}x{n_series}",
                    matrix.nrows(),
                    matrix.ncols()
                )));
            }
        }

        let mut columns = Vec::with_capacity(metrics.len() * n_series);
        let mut cells = DMatrix::from_element(n_rows, metrics.len() * n_series, f64::NAN);
        for (m, (name, matrix)) in metrics.iter().enumerate() {
            for (j, series_name) in series.iter().enumerate() {
                let target = m * n_series + j;
                cells.set_column(target, &matrix.column(j));
                columns.push(Column { series: series_name.clone(), metric: name.to_string() });
            }
        }

        Ok(Self {
            axis_label: axis_label.to_string(),
            axis_values,
            include_axis,
            columns,
            cells,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Exported column count, axis column included when enabled
    pub fn n_columns(&self) -> usize {
        self.columns.len() + usize::from(self.include_axis)
    }

    pub fn axis_label(&self) -> &str {
        &self.axis_label
    }

    pub fn axis_values(&self) -> &[f64] {
        &self.axis_values
    }

    pub fn includes_axis(&self) -> bool {
        self.include_axis
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in export order
    pub fn headers(&self) -> Vec<String> {
        let axis = self.include_axis.then(|| self.axis_label.clone());
        axis.into_iter()
            .chain(self.columns.iter().map(Column::header))
            .collect()
    }

    /// Values of row `i` in export order
    pub fn row(&self, i: usize) -> Vec<f64> {
        let axis = self.include_axis.then(|| self.axis_values[i]);
        axis.into_iter().chain(self.cells.row(i).iter().copied()).collect()
    }

    /// The values of one (series, metric) column, top to bottom
    pub fn column_values(&self, series: &str, metric: &str) -> Option<Vec<f64>> {
        let index = self
            .columns
            .iter()
            .position(|c| c.series == series && c.metric == metric)?;
        Some(self.cells.column(index).iter().copied().collect())
    }

    pub fn cell(&self, row: usize, series: &str, metric: &str) -> Option<f64> {
        self.column_values(series, metric).and_then(|c| c.get(row).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample_table(include_axis: bool) -> ErrorTable {
        let times = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let errors = DMatrix::from_row_slice(2, 2, &[0.1, 0.2, 0.3, f64::NAN]);
        ErrorTable::metric_major(
            "Tolerance",
            vec![1e-2, 1e-3],
            include_axis,
            &series(&["A", "B"]),
            vec![("Time", times), ("Error", errors)],
        )
        .unwrap()
    }

    #[test]
    fn test_metric_major_ordering() {
        let table = sample_table(false);
        assert_eq!(table.headers(), vec!["A Time", "B Time", "A Error", "B Error"]);
        assert_eq!(table.row(0), vec![1.0, 2.0, 0.1, 0.2]);
    }

    #[test]
    fn test_dimensions_with_and_without_axis() {
        let plain = sample_table(false);
        assert_eq!(plain.n_rows(), 2);
        assert_eq!(plain.n_columns(), 4);

        let with_axis = sample_table(true);
        assert_eq!(with_axis.n_columns(), 5);
        assert_eq!(with_axis.headers()[0], "Tolerance");
        assert_eq!(with_axis.row(1)[0], 1e-3);
        assert_eq!(with_axis.row(1).len(), 5);
    }

    #[test]
    fn test_cell_lookup() {
        let table = sample_table(false);
        assert_eq!(table.cell(1, "A", "Error"), Some(0.3));
        assert!(table.cell(1, "B", "Error").unwrap().is_nan());
        assert_eq!(table.cell(0, "C", "Error"), None);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let wrong = DMatrix::from_element(3, 2, 0.0);
        let result = ErrorTable::metric_major(
            "h",
            vec![0.5, 0.25],
            true,
            &series(&["Order 1", "Order 2"]),
            vec![("Error", wrong)],
        );
        assert!(result.is_err());
    }
}
