//! Error metric engine
//!
//! Two relative-error measures, selected by the reference shape
//! (see [`crate::reference::ReferenceSolution::metric`]).
//!
//! ## Aggregate relative L2 error
//!
//! $$e = \frac{\lVert R_{1:} - S_{1:} \rVert_2}{\lVert R_{1:} \rVert_2}$$
//!
//! Element 0 of both vectors is the wall time of the run that produced them and is
//! left out. Values above [`DIVERGENCE_CEILING`] are reported as NaN: a run that far
//! off has diverged, and keeping the number would flatten every other curve on a
//! log-log plot.
//!
//! ## Entrywise relative error
//!
//! $$e_i = \frac{\lvert S_i - R_i \rvert}{\lvert R_i \rvert}$$
//!
//! No ceiling. A zero reference component yields `inf` (or NaN when the sample is
//! also zero) and that value is kept as is.

use nalgebra::{DVector, Vector3};

use crate::error::{AnalysisError, Result};

/// Relative L2 errors above this are reported as NaN
pub const DIVERGENCE_CEILING: f64 = 10.0;

/// Metric applied to every record of a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorMetric {
    /// Relative L2 error of everything after element 0, optionally capped
    RelativeL2 { ceiling: Option<f64> },
    /// Per-component relative error
    Entrywise,
}

impl ErrorMetric {
    /// L2 metric with the standard divergence ceiling
    pub fn capped_l2() -> Self {
        ErrorMetric::RelativeL2 { ceiling: Some(DIVERGENCE_CEILING) }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorMetric::RelativeL2 { .. } => "Relative l2 Error",
            ErrorMetric::Entrywise => "Absolute Relative Error",
        }
    }

    /// Evaluate the metric; L2 yields a single value, entrywise one per component
    pub fn evaluate(&self, reference: &DVector<f64>, sample: &DVector<f64>) -> Result<DVector<f64>> {
        match self {
            ErrorMetric::RelativeL2 { ceiling } => {
                let error = relative_l2_error(reference, sample)?;
                let error = match ceiling {
                    Some(limit) => apply_ceiling(error, *limit),
                    None => error,
                };
                Ok(DVector::from_element(1, error))
            }
            ErrorMetric::Entrywise => {
                check_lengths(reference, sample)?;
                Ok(entrywise(reference, sample))
            }
        }
    }
}

// =================================================================================================
// Relative L2
// =================================================================================================

fn check_lengths(reference: &DVector<f64>, sample: &DVector<f64>) -> Result<()> {
    if reference.len() != sample.len() {
        return Err(AnalysisError::LengthMismatch {
            reference: reference.len(),
            sample: sample.len(),
        });
    }
    if reference.is_empty() {
        return Err(AnalysisError::EmptyVector);
    }
    Ok(())
}

/// Relative L2 error ignoring the leading (timing) element
///
/// # Errors
///
/// `LengthMismatch` when the vectors differ in length, `EmptyVector` when both are
/// empty. A reference whose tail is all zeros gives NaN or `inf`, not an error.
pub fn relative_l2_error(reference: &DVector<f64>, sample: &DVector<f64>) -> Result<f64> {
    check_lengths(reference, sample)?;

    let tail = reference.len() - 1;
    let reference_tail = reference.rows(1, tail);
    let sample_tail = sample.rows(1, tail);

    Ok((reference_tail - sample_tail).norm() / reference_tail.norm())
}

/// Replace errors above `ceiling` with NaN
pub fn apply_ceiling(error: f64, ceiling: f64) -> f64 {
    if error > ceiling { f64::NAN } else { error }
}

/// [`relative_l2_error`] with the [`DIVERGENCE_CEILING`] applied
pub fn capped_relative_l2_error(reference: &DVector<f64>, sample: &DVector<f64>) -> Result<f64> {
    relative_l2_error(reference, sample).map(|error| apply_ceiling(error, DIVERGENCE_CEILING))
}

// =================================================================================================
// Entrywise
// =================================================================================================

fn entrywise(reference: &DVector<f64>, sample: &DVector<f64>) -> DVector<f64> {
    (sample - reference).abs().component_div(&reference.abs())
}

/// Entrywise relative error of an adjoint triple
pub fn entrywise_relative_error(reference: &Vector3<f64>, sample: &Vector3<f64>) -> Vector3<f64> {
    (sample - reference).abs().component_div(&reference.abs())
}

// =================================================================================================
// Tests
// =================================================================================================
