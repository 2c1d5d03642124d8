//! Theoretical convergence slopes and their alignment to measured errors
//!
//! A method of order `p` should show errors following `(h / h₀)^p`. Drawn as is,
//! that line starts at 1 and sits far from the data; only its exponent matters. The
//! alignment multiplies it by the geometric mean of `error / slope` over the sweep,
//! which moves the line onto the data without changing its slope:
//!
//! $$s = \exp\Big(\frac{1}{n}\sum_i \log\frac{e_i + \varepsilon}{r_i + \varepsilon}\Big)$$
//!
//! `ε` keeps the logarithm defined for zero errors. Points whose error is NaN or
//! infinite (absent or capped records) do not take part in the mean.

/// Guard added to both sides of the ratio under the logarithm
pub const SLOPE_EPSILON: f64 = 1e-15;

/// `(h / h₀)^order` for every step size `h`, with `h₀` the first one
pub fn theoretical_slope(steps: &[f64], order: u32) -> Vec<f64> {
    let Some(&first) = steps.first() else {
        return Vec::new();
    };
    let exponent = order as i32;
    steps.iter().map(|&h| (h / first).powi(exponent)).collect()
}

/// Geometric-mean scale factor taking `slope` onto `errors`
///
/// Returns 1.0 when no pair gives a finite log ratio.
pub fn alignment_scale(errors: &[f64], slope: &[f64]) -> f64 {
    let logs: Vec<f64> = errors
        .iter()
        .zip(slope)
        .map(|(&e, &r)| ((e + SLOPE_EPSILON) / (r + SLOPE_EPSILON)).ln())
        .filter(|l| l.is_finite())
        .collect();

    if logs.is_empty() {
        return 1.0;
    }
    (logs.iter().sum::<f64>() / logs.len() as f64).exp()
}

/// `slope` scaled by [`alignment_scale`]
pub fn align_slope(errors: &[f64], slope: &[f64]) -> Vec<f64> {
    let scale = alignment_scale(errors, slope);
    slope.iter().map(|r| r * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_theoretical_slope_starts_at_one() {
        let slope = theoretical_slope(&[0.5, 0.25, 0.125], 2);
        assert_eq!(slope, vec![1.0, 0.25, 0.0625]);
        assert!(theoretical_slope(&[], 3).is_empty());
    }

    #[test]
    fn test_alignment_recovers_exact_offset() {
        let slope = theoretical_slope(&[0.5, 0.25, 0.125, 0.0625], 3);
        let errors: Vec<f64> = slope.iter().map(|r| 4.2e-3 * r).collect();

        assert_relative_eq!(alignment_scale(&errors, &slope), 4.2e-3, max_relative = 1e-9);
        for (a, e) in align_slope(&errors, &slope).iter().zip(&errors) {
            assert_relative_eq!(*a, *e, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_alignment_preserves_exponent() {
        let slope = theoretical_slope(&[1.0, 0.5, 0.25], 4);
        let aligned = align_slope(&[3.0, 1.0, 0.01], &slope);

        assert_relative_eq!(aligned[0] / aligned[1], 16.0, max_relative = 1e-12);
        assert_relative_eq!(aligned[1] / aligned[2], 16.0, max_relative = 1e-12);
    }

    #[test]
    fn test_nan_errors_are_skipped() {
        let slope = vec![1.0, 0.5, 0.25];
        let errors = vec![f64::NAN, 0.1, 0.05];
        assert_relative_eq!(alignment_scale(&errors, &slope), 0.2, max_relative = 1e-9);
    }

    #[test]
    fn test_no_usable_points_leaves_slope_unscaled() {
        let slope = vec![1.0, 0.5];
        assert_eq!(align_slope(&[f64::NAN, f64::NAN], &slope), slope);
    }

    #[test]
    fn test_zero_error_stays_finite() {
        let scale = alignment_scale(&[0.0, 0.0], &[1.0, 1.0]);
        assert!(scale.is_finite());
        assert!(scale > 0.0);
    }
}
