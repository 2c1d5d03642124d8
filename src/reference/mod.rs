//! Reference loader
//!
//! A run has exactly one baseline, loaded before any result is collected. Its shape
//! decides the metric:
//!
//! | Reference | Layout | Metric |
//! |-----------|--------|--------|
//! | [`GridReference`] | wall time + interleaved `u`/`v` grid samples | relative L2 (capped) |
//! | [`AdjointReference`] | order → (‖y‖, ‖dg/dy₀‖, ‖dg/dp‖) | entrywise relative |
//!
//! Failing to load either is fatal: without a baseline no error can be measured.

pub mod adjoint;
pub mod grid;

pub use adjoint::{AdjointReference, ADJOINT_COMPONENTS};
pub use grid::GridReference;

use crate::metrics::ErrorMetric;

/// Ground truth against which every record of a run is measured
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceSolution {
    Grid(GridReference),
    Adjoint(AdjointReference),
}

impl ReferenceSolution {
    /// Metric implied by the reference shape
    pub fn metric(&self) -> ErrorMetric {
        match self {
            ReferenceSolution::Grid(_) => ErrorMetric::capped_l2(),
            ReferenceSolution::Adjoint(_) => ErrorMetric::Entrywise,
        }
    }

    pub fn as_grid(&self) -> Option<&GridReference> {
        match self {
            ReferenceSolution::Grid(grid) => Some(grid),
            ReferenceSolution::Adjoint(_) => None,
        }
    }

    pub fn as_adjoint(&self) -> Option<&AdjointReference> {
        match self {
            ReferenceSolution::Adjoint(adjoint) => Some(adjoint),
            ReferenceSolution::Grid(_) => None,
        }
    }
}

impl From<GridReference> for ReferenceSolution {
    fn from(reference: GridReference) -> Self {
        ReferenceSolution::Grid(reference)
    }
}

impl From<AdjointReference> for ReferenceSolution {
    fn from(reference: AdjointReference) -> Self {
        ReferenceSolution::Adjoint(reference)
    }
}
