//! Per-column moments over the non-missing values of a column.

/// Drop missing cells.
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return f64::NAN;
    }
    let m = mean(xs);
    let ss: f64 = xs.iter().map(|x| (x - m).powi(2)).sum();
    (ss / (xs.len() - 1) as f64).sqrt()
}

/// Linear-interpolated quantile of already sorted values.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Sums of squared, cubed and fourth-power deviations from the mean.
fn central_sums(xs: &[f64]) -> (f64, f64, f64) {
    let m = mean(xs);
    xs.iter().fold((0.0, 0.0, 0.0), |(s2, s3, s4), x| {
        let d = x - m;
        let d2 = d * d;
        (s2 + d2, s3 + d2 * d, s4 + d2 * d2)
    })
}

/// Adjusted Fisher-Pearson skewness (G1). Needs at least three values.
pub fn skewness(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 3 {
        return f64::NAN;
    }
    let (s2, s3, _) = central_sums(xs);
    if s2 == 0.0 {
        return 0.0;
    }
    let nf = n as f64;
    nf * (nf - 1.0).sqrt() / (nf - 2.0) * s3 / s2.powf(1.5)
}

/// Adjusted excess kurtosis (G2). Needs at least four values.
pub fn excess_kurtosis(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 4 {
        return f64::NAN;
    }
    let (s2, _, s4) = central_sums(xs);
    if s2 == 0.0 {
        return 0.0;
    }
    let nf = n as f64;
    let scale = (nf + 1.0) * nf * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0));
    let adj = 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0));
    scale * s4 / (s2 * s2) - adj
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn std_uses_sample_denominator() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&xs) - 5.0).abs() < EPS);
        // population std is 2, sample std is sqrt(32/7)
        assert!((sample_std(&xs) - (32.0f64 / 7.0).sqrt()).abs() < EPS);
        assert!(sample_std(&[1.0]).is_nan());
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile_sorted(&xs, 0.25) - 1.75).abs() < EPS);
        assert!((quantile_sorted(&xs, 0.5) - 2.5).abs() < EPS);
        assert!((quantile_sorted(&xs, 0.75) - 3.25).abs() < EPS);
        assert_eq!(quantile_sorted(&xs, 1.0), 4.0);
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn symmetric_sample_has_zero_skew() {
        assert!(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).abs() < EPS);
        assert!(skewness(&[1.0, 2.0]).is_nan());
    }

    #[test]
    fn right_tail_skews_positive() {
        assert!(skewness(&[1.0, 1.0, 1.0, 2.0, 10.0]) > 0.0);
    }

    #[test]
    fn kurtosis_of_uniform_steps() {
        assert!((excess_kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]) + 1.2).abs() < EPS);
        assert!(excess_kurtosis(&[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn constant_column_has_zero_moments() {
        let xs = [3.0; 6];
        assert_eq!(skewness(&xs), 0.0);
        assert_eq!(excess_kurtosis(&xs), 0.0);
    }
}
