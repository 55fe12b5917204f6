//! Sample statistics over trial outcomes.
//!
//! - **Mean**: Kahan compensated summation.
//! - **Standard deviation**: Welford's online algorithm with Bessel's
//!   correction (denominator `n - 1`). A single sample has no spread
//!   estimate, so it yields NaN and the NaN carries into the interval.

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;

fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut c = 0.0;
    for &x in data {
        let y = x - c;
        let t = sum + y;
        c = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    kahan_sum(data) / data.len() as f64
}

/// Sample standard deviation. NaN when `data.len() < 2`.
///
/// # Examples
/// ```
/// use percolation::stats::std_dev;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((std_dev(&v) - 2.138089935299395).abs() < 1e-12);
/// assert!(std_dev(&[0.5]).is_nan());
/// ```
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return f64::NAN;
    }
    let mut count = 0usize;
    let mut running_mean = 0.0;
    let mut m2 = 0.0;
    for &x in data {
        count += 1;
        let delta = x - running_mean;
        running_mean += delta / count as f64;
        m2 += delta * (x - running_mean);
    }
    (m2 / (count - 1) as f64).sqrt()
}

/// `mean ∓ Z_95 * sd / sqrt(n)`.
pub fn confidence_interval_95(mean: f64, sd: f64, n: usize) -> (f64, f64) {
    let half = Z_95 * sd / (n as f64).sqrt();
    (mean - half, mean + half)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn std_dev_matches_two_pass(data in proptest::collection::vec(0.0_f64..1.0, 2..200)) {
            let m = data.iter().sum::<f64>() / data.len() as f64;
            let ss: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
            let expected = (ss / (data.len() - 1) as f64).sqrt();
            prop_assert!((std_dev(&data) - expected).abs() < 1e-9);
        }

        #[test]
        fn interval_brackets_mean(
            data in proptest::collection::vec(0.0_f64..1.0, 2..100),
        ) {
            let m = mean(&data);
            let sd = std_dev(&data);
            let (lo, hi) = confidence_interval_95(m, sd, data.len());
            if sd > 0.0 {
                prop_assert!(lo < m && m < hi);
            } else {
                prop_assert!(lo == m && m == hi);
            }
        }
    }
}
