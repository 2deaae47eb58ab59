#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimpsonError {
    #[error("simpson integration requires at least one sample")]
    Empty,
    #[error("simpson input length mismatch: x={x}, y={y}")]
    LengthMismatch { x: usize, y: usize },
}

/// Composite Simpson's rule for samples `y` on an arbitrary (possibly
/// non-uniform) abscissa `x`.
///
/// An odd sample count uses the irregular-spacing Simpson formula on every
/// interval pair. An even count integrates the first `n - 1` samples that
/// way and closes the last interval with Cartwright's correction, which is
/// also what `scipy.integrate.simpson` does. Two samples fall back to the
/// trapezoid and a single sample spans no interval, so it integrates to 0.
///
/// Non-finite samples are not rejected: NaN or infinity propagates into the
/// returned integral.
pub fn integrate_simpson(x: &[f64], y: &[f64]) -> Result<f64, SimpsonError> {
    if x.len() != y.len() {
        return Err(SimpsonError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let integral = match x.len() {
        0 => return Err(SimpsonError::Empty),
        1 => 0.0,
        2 => 0.5 * (x[1] - x[0]) * (y[0] + y[1]),
        count if count % 2 == 1 => simpson_pairs(x, y, count - 1),
        count => simpson_pairs(x, y, count - 2) + cartwright_last_interval(x, y),
    };
    Ok(integral)
}

/// Sum of Simpson panels over samples `0..=last`, where `last` is even.
fn simpson_pairs(x: &[f64], y: &[f64], last: usize) -> f64 {
    let mut total = 0.0;
    let mut start = 0;
    while start + 2 <= last {
        let h0 = x[start + 1] - x[start];
        let h1 = x[start + 2] - x[start + 1];
        let hsum = h0 + h1;
        let hprod = h0 * h1;
        let h0_over_h1 = if h1 != 0.0 { h0 / h1 } else { 0.0 };
        let h1_over_h0 = if h0_over_h1 != 0.0 {
            1.0 / h0_over_h1
        } else {
            0.0
        };
        let middle_weight = if hprod != 0.0 {
            hsum * hsum / hprod
        } else {
            0.0
        };

        total += hsum / 6.0
            * (y[start] * (2.0 - h1_over_h0)
                + y[start + 1] * middle_weight
                + y[start + 2] * (2.0 - h0_over_h1));
        start += 2;
    }
    total
}

fn cartwright_last_interval(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    let h0 = x[n - 2] - x[n - 3];
    let h1 = x[n - 1] - x[n - 2];

    let alpha = safe_divide(2.0 * h1 * h1 + 3.0 * h0 * h1, 6.0 * (h1 + h0));
    let beta = safe_divide(h1 * h1 + 3.0 * h0 * h1, 6.0 * h0);
    let eta = safe_divide(h1 * h1 * h1, 6.0 * h0 * (h0 + h1));

    alpha * y[n - 1] + beta * y[n - 2] - eta * y[n - 3]
}

fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{SimpsonError, integrate_simpson};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1.0e-12 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn constant_integrand_over_uniform_grid() {
        let integral = integrate_simpson(&[0.0, 1.0, 2.0], &[2.0, 2.0, 2.0]).expect("integral");
        assert_close(integral, 4.0);
    }

    #[test]
    fn quadratic_is_exact_on_irregular_odd_grid() {
        let x = [0.0, 0.3, 1.0, 1.2, 2.0];
        let y: Vec<f64> = x.iter().map(|value| value * value).collect();
        let integral = integrate_simpson(&x, &y).expect("integral");
        assert_close(integral, 8.0 / 3.0);
    }

    #[test]
    fn even_sample_count_uses_last_interval_correction() {
        let x = [0.0, 0.5, 1.5, 2.0, 3.0, 3.5];
        let y: Vec<f64> = x.iter().map(|value| value * value).collect();
        let integral = integrate_simpson(&x, &y).expect("integral");
        assert_close(integral, 3.5_f64.powi(3) / 3.0);
    }

    #[test]
    fn two_samples_use_trapezoid() {
        let integral = integrate_simpson(&[1.0, 3.0], &[1.0, 5.0]).expect("integral");
        assert_close(integral, 6.0);
    }

    #[test]
    fn linear_integrand_on_even_uniform_grid() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let integral = integrate_simpson(&x, &x).expect("integral");
        assert_close(integral, 4.5);
    }

    #[test]
    fn single_sample_spans_no_interval() {
        assert_eq!(integrate_simpson(&[2.0], &[7.0]), Ok(0.0));
    }

    #[test]
    fn rejects_empty_and_mismatched_inputs() {
        assert_eq!(integrate_simpson(&[], &[]), Err(SimpsonError::Empty));
        assert_eq!(
            integrate_simpson(&[0.0, 1.0], &[1.0]),
            Err(SimpsonError::LengthMismatch { x: 2, y: 1 })
        );
    }

    #[test]
    fn nan_sample_propagates_into_the_integral() {
        let integral =
            integrate_simpson(&[0.0, 1.0, 2.0], &[1.0, f64::NAN, 1.0]).expect("no error");
        assert!(integral.is_nan());

        let integral =
            integrate_simpson(&[0.0, 1.0], &[1.0, f64::INFINITY]).expect("no error");
        assert_eq!(integral, f64::INFINITY);
    }
}
