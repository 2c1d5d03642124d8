//! Sweep axes
//!
//! A sweep is the cross product of two ordered axes. The primary axis gives the
//! table rows, the secondary axis the series (one curve per value):
//!
//! | Plan | Rows | Series |
//! |------|------|--------|
//! | [`TolerancePlan`] | tolerances | method names |
//! | [`StepPlan`] | step sizes | convergence orders |
//!
//! Both are plain ordered vectors, validated once at construction, so the position
//! of a value in its axis is its index in every matrix built from the sweep.

use std::fmt;
use std::str::FromStr;

use crate::error::{AnalysisError, Result};
use crate::sweep::naming::tolerance_label;

// =================================================================================================
// Tolerance
// =================================================================================================

/// Integrator tolerance with its normalized file-name label
#[derive(Debug, Clone, PartialEq)]
pub struct Tolerance {
    value: f64,
    label: String,
}

impl Tolerance {
    pub fn new(value: f64) -> Result<Self> {
        if !(value.is_finite() && value > 0.0) {
            return Err(AnalysisError::InvalidSweep(format!(
                "tolerance {value} must be finite and positive"
            )));
        }
        Ok(Self { value, label: tolerance_label(value) })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl FromStr for Tolerance {
    type Err = AnalysisError;

    /// `"1E-03"`, `"0.001"` and `"1e-3"` all give the label `"1e-3"`
    fn from_str(text: &str) -> Result<Self> {
        let value = text.trim().parse::<f64>().map_err(|_| {
            AnalysisError::InvalidSweep(format!("'{text}' is not a tolerance"))
        })?;
        Self::new(value)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// `2^lo, 2^(lo+1), …, 2^hi`; descending when `lo > hi`
pub fn powers_of_two(lo: i32, hi: i32) -> Vec<f64> {
    if lo <= hi {
        (lo..=hi).map(|e| 2f64.powi(e)).collect()
    } else {
        (hi..=lo).rev().map(|e| 2f64.powi(e)).collect()
    }
}

fn ensure_unique<T: PartialEq + fmt::Debug>(values: &[T], what: &str) -> Result<()> {
    for (i, value) in values.iter().enumerate() {
        if values[..i].contains(value) {
            return Err(AnalysisError::InvalidSweep(format!("{what} {value:?} listed twice")));
        }
    }
    Ok(())
}

// =================================================================================================
// Tolerance plan
// =================================================================================================

/// Method × tolerance sweep of the adaptive integrators
#[derive(Debug, Clone, PartialEq)]
pub struct TolerancePlan {
    methods: Vec<String>,
    tolerances: Vec<Tolerance>,
}

impl TolerancePlan {
    pub fn new(methods: Vec<String>, tolerances: Vec<Tolerance>) -> Result<Self> {
        if methods.is_empty() || tolerances.is_empty() {
            return Err(AnalysisError::InvalidSweep(
                "a tolerance sweep needs at least one method and one tolerance".to_string(),
            ));
        }
        ensure_unique(&methods, "method")?;
        let labels: Vec<&str> = tolerances.iter().map(Tolerance::label).collect();
        ensure_unique(&labels, "tolerance")?;

        Ok(Self { methods, tolerances })
    }

    /// Parse tolerance strings, keeping their order
    pub fn from_strings(methods: &[&str], tolerances: &[&str]) -> Result<Self> {
        let tolerances = tolerances
            .iter()
            .map(|t| t.parse::<Tolerance>())
            .collect::<Result<Vec<_>>>()?;
        Self::new(methods.iter().map(|m| m.to_string()).collect(), tolerances)
    }

    /// LSRK, ERK and DIRK over tolerances `1e-2` down to `1e-9`
    pub fn lsrk_default() -> Self {
        let tolerances = (2..10)
            .map(|i| {
                let value = 10f64.powi(-i);
                Tolerance { value, label: format!("1e-{i}") }
            })
            .collect();
        Self {
            methods: ["LSRK", "ERK", "DIRK"].iter().map(|m| m.to_string()).collect(),
            tolerances,
        }
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn tolerances(&self) -> &[Tolerance] {
        &self.tolerances
    }
}

// =================================================================================================
// Step plan
// =================================================================================================

/// Order × step-size sweep of the fixed-step methods
#[derive(Debug, Clone, PartialEq)]
pub struct StepPlan {
    orders: Vec<u32>,
    steps: Vec<f64>,
}

impl StepPlan {
    pub fn new(orders: Vec<u32>, steps: Vec<f64>) -> Result<Self> {
        if orders.is_empty() || steps.is_empty() {
            return Err(AnalysisError::InvalidSweep(
                "a step sweep needs at least one order and one step size".to_string(),
            ));
        }
        if let Some(order) = orders.iter().find(|&&o| o == 0) {
            return Err(AnalysisError::InvalidSweep(format!("order {order} must be at least 1")));
        }
        if let Some(step) = steps.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(AnalysisError::InvalidSweep(format!(
                "step size {step} must be finite and positive"
            )));
        }
        ensure_unique(&orders, "order")?;

        Ok(Self { orders, steps })
    }

    /// Splitting orders 1, 2, 3, 4, 6 over steps `2^-7 … 2^0`
    pub fn splitting_default() -> Self {
        Self { orders: vec![1, 2, 3, 4, 6], steps: powers_of_two(-7, 0) }
    }

    /// Adjoint orders 3, 4, 5 over steps `2^-1 … 2^-6`
    pub fn adjoint_default() -> Self {
        Self { orders: vec![3, 4, 5], steps: powers_of_two(-1, -6) }
    }

    /// Same orders, new step sizes
    pub fn with_steps(&self, steps: Vec<f64>) -> Result<Self> {
        Self::new(self.orders.clone(), steps)
    }

    pub fn orders(&self) -> &[u32] {
        &self.orders
    }

    pub fn steps(&self) -> &[f64] {
        &self.steps
    }
}

/// Series name of a convergence order
pub fn order_series_name(order: u32) -> String {
    format!("Order {order}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_parsing_normalizes() {
        assert_eq!("1E-03".parse::<Tolerance>().unwrap().label(), "1e-3");
        assert_eq!("0.01".parse::<Tolerance>().unwrap().label(), "1e-2");
        assert!("abc".parse::<Tolerance>().is_err());
        assert!("-1e-3".parse::<Tolerance>().is_err());
    }

    #[test]
    fn test_powers_of_two_keep_direction() {
        assert_eq!(powers_of_two(-2, 0), vec![0.25, 0.5, 1.0]);
        assert_eq!(powers_of_two(-1, -3), vec![0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_lsrk_default_plan() {
        let plan = TolerancePlan::lsrk_default();
        assert_eq!(plan.methods(), &["LSRK", "ERK", "DIRK"]);
        assert_eq!(plan.tolerances().len(), 8);
        assert_eq!(plan.tolerances()[0].label(), "1e-2");
        assert_eq!(plan.tolerances()[7].label(), "1e-9");
    }

    #[test]
    fn test_default_step_plans() {
        let splitting = StepPlan::splitting_default();
        assert_eq!(splitting.steps().len(), 8);
        assert_eq!(splitting.steps()[0], 2f64.powi(-7));
        assert_eq!(splitting.steps()[7], 1.0);

        let adjoint = StepPlan::adjoint_default();
        assert_eq!(adjoint.orders(), &[3, 4, 5]);
        assert_eq!(adjoint.steps(), &[0.5, 0.25, 0.125, 0.0625, 0.03125, 0.015625]);
    }

    #[test]
    fn test_invalid_plans_are_rejected() {
        assert!(StepPlan::new(vec![], vec![0.5]).is_err());
        assert!(StepPlan::new(vec![0], vec![0.5]).is_err());
        assert!(StepPlan::new(vec![2], vec![0.0]).is_err());
        assert!(StepPlan::new(vec![2, 2], vec![0.5]).is_err());
        assert!(TolerancePlan::from_strings(&["A", "A"], &["1e-2"]).is_err());
        assert!(TolerancePlan::from_strings(&["A"], &["1e-2", "0.01"]).is_err());
    }
}
