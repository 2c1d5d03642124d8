//! Result collector
//!
//! Walks a sweep plan in order and loads one record per combination. The policy for
//! missing data is the core of this module:
//!
//! - a result file that does not exist leaves the cell [`RecordSlot::Absent`], adds a
//!   [`SweepWarning`], and collection moves on;
//! - a result file that exists but cannot be parsed stops collection with an error.
//!
//! ```text
//!                  series 0        series 1        series 2
//!   row 0 (1e-2)   Present([..])   Present([..])   Absent        ← LSRK_1e-2 missing
//!   row 1 (1e-3)   Present([..])   Present([..])   Present([..])
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use nalgebra::{DMatrix, DVector};

use crate::error::Result;
use crate::input::{load_vector, MarkerFormat};
use crate::sweep::axes::{order_series_name, StepPlan, Tolerance, TolerancePlan};
use crate::sweep::naming;

// =================================================================================================
// Records
// =================================================================================================

/// Parameters of one sweep combination
#[derive(Debug, Clone, PartialEq)]
pub enum SweepPoint {
    Tolerance { method: String, tolerance: Tolerance },
    Step { order: u32, step: f64 },
}

/// Loaded data of one combination, or its absence
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSlot {
    Present(DVector<f64>),
    Absent,
}

impl RecordSlot {
    pub fn values(&self) -> Option<&DVector<f64>> {
        match self {
            RecordSlot::Present(values) => Some(values),
            RecordSlot::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RecordSlot::Absent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub point: SweepPoint,
    /// File the record was (or would have been) read from
    pub source: PathBuf,
    pub slot: RecordSlot,
}

/// Non-fatal problems met during collection
#[derive(Debug, Clone, PartialEq)]
pub enum SweepWarning {
    /// The result file does not exist
    MissingFile { path: PathBuf },
    /// A log holds fewer result lines than declared step sizes
    ShortLog { path: PathBuf, found: usize, expected: usize },
    /// A log holds more result lines than declared step sizes
    SurplusLines { path: PathBuf, found: usize, expected: usize },
}

impl fmt::Display for SweepWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepWarning::MissingFile { path } => {
                write!(f, "Warning: unable to load {}", path.display())
            }
            SweepWarning::ShortLog { path, found, expected } => write!(
                f,
                "Warning: {} holds {found} result lines for {expected} step sizes",
                path.display()
            ),
            SweepWarning::SurplusLines { path, found, expected } => write!(
                f,
                "Warning: {} holds {found} result lines, ignoring all after the first {expected}",
                path.display()
            ),
        }
    }
}

// =================================================================================================
// Record grid
// =================================================================================================

/// Records of a whole sweep, row-major: `records[row][series]`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGrid {
    series: Vec<String>,
    records: Vec<Vec<ResultRecord>>,
    warnings: Vec<SweepWarning>,
}

impl RecordGrid {
    pub fn n_rows(&self) -> usize {
        self.records.len()
    }

    pub fn n_series(&self) -> usize {
        self.series.len()
    }

    pub fn series(&self) -> &[String] {
        &self.series
    }

    pub fn record(&self, row: usize, series: usize) -> &ResultRecord {
        &self.records[row][series]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[ResultRecord]> {
        self.records.iter().map(Vec::as_slice)
    }

    pub fn warnings(&self) -> &[SweepWarning] {
        &self.warnings
    }

    pub fn absent_count(&self) -> usize {
        self.records.iter().flatten().filter(|r| r.slot.is_absent()).count()
    }

    /// Build a `rows × series` matrix from present records, NaN elsewhere
    pub fn to_matrix<F>(&self, mut cell: F) -> Result<DMatrix<f64>>
    where
        F: FnMut(&ResultRecord, &DVector<f64>) -> Result<f64>,
    {
        let mut matrix = DMatrix::from_element(self.n_rows(), self.n_series(), f64::NAN);
        for (i, row) in self.records.iter().enumerate() {
            for (j, record) in row.iter().enumerate() {
                if let Some(values) = record.slot.values() {
                    matrix[(i, j)] = cell(record, values)?;
                }
            }
        }
        Ok(matrix)
    }
}

// =================================================================================================
// Collector
// =================================================================================================

/// Loads sweep records from a data directory
#[derive(Debug, Clone)]
pub struct Collector {
    data_dir: PathBuf,
}

impl Collector {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn load_slot(path: &Path, warnings: &mut Vec<SweepWarning>) -> Result<RecordSlot> {
        match load_vector(path)? {
            Some(values) => Ok(RecordSlot::Present(values)),
            None => {
                log::debug!("unable to load {}", path.display());
                warnings.push(SweepWarning::MissingFile { path: path.to_path_buf() });
                Ok(RecordSlot::Absent)
            }
        }
    }

    /// One solution file per (tolerance, method)
    pub fn collect_tolerance_sweep(&self, plan: &TolerancePlan) -> Result<RecordGrid> {
        let mut warnings = Vec::new();
        let mut records = Vec::with_capacity(plan.tolerances().len());

        for tolerance in plan.tolerances() {
            let mut row = Vec::with_capacity(plan.methods().len());
            for method in plan.methods() {
                let source = naming::method_result_path(&self.data_dir, method, tolerance.label());
                let slot = Self::load_slot(&source, &mut warnings)?;
                row.push(ResultRecord {
                    point: SweepPoint::Tolerance {
                        method: method.clone(),
                        tolerance: tolerance.clone(),
                    },
                    source,
                    slot,
                });
            }
            records.push(row);
        }

        Ok(RecordGrid { series: plan.methods().to_vec(), records, warnings })
    }

    /// One solution file per (step, order)
    pub fn collect_step_sweep(&self, plan: &StepPlan) -> Result<RecordGrid> {
        let mut warnings = Vec::new();
        let mut records = Vec::with_capacity(plan.steps().len());

        for &step in plan.steps() {
            let mut row = Vec::with_capacity(plan.orders().len());
            for &order in plan.orders() {
                let source = naming::splitting_result_path(&self.data_dir, order, step);
                let slot = Self::load_slot(&source, &mut warnings)?;
                row.push(ResultRecord { point: SweepPoint::Step { order, step }, source, slot });
            }
            records.push(row);
        }

        Ok(RecordGrid {
            series: plan.orders().iter().map(|&o| order_series_name(o)).collect(),
            records,
            warnings,
        })
    }

    /// One log per order; the N-th result line belongs to the N-th step size
    pub fn collect_marker_logs(&self, plan: &StepPlan, format: &MarkerFormat) -> Result<RecordGrid> {
        let mut warnings = Vec::new();
        let n_steps = plan.steps().len();
        let mut columns = Vec::with_capacity(plan.orders().len());

        for &order in plan.orders() {
            let source = naming::adjoint_log_path(&self.data_dir, order);
            let tuples = match format.load(&source)? {
                Some(tuples) => {
                    let found = tuples.len();
                    if found != n_steps {
                        let warning = if found < n_steps {
                            SweepWarning::ShortLog { path: source.clone(), found, expected: n_steps }
                        } else {
                            SweepWarning::SurplusLines { path: source.clone(), found, expected: n_steps }
                        };
                        log::debug!("{warning}");
                        warnings.push(warning);
                    }
                    tuples
                }
                None => {
                    log::debug!("unable to load {}", source.display());
                    warnings.push(SweepWarning::MissingFile { path: source.clone() });
                    Vec::new()
                }
            };

            let mut tuples = tuples.into_iter();
            let column: Vec<ResultRecord> = plan
                .steps()
                .iter()
                .map(|&step| ResultRecord {
                    point: SweepPoint::Step { order, step },
                    source: source.clone(),
                    slot: match tuples.next() {
                        Some(tuple) => RecordSlot::Present(DVector::from_vec(tuple)),
                        None => RecordSlot::Absent,
                    },
                })
                .collect();
            columns.push(column);
        }

        // column-major → row-major
        let mut columns: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();
        let records = (0..n_steps)
            .map(|_| columns.iter_mut().filter_map(Iterator::next).collect())
            .collect();

        Ok(RecordGrid {
            series: plan.orders().iter().map(|&o| order_series_name(o)).collect(),
            records,
            warnings,
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
