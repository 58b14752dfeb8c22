//! Quantile (equal-count) breaks.

/// Quantile of an ascending slice at probability `p`.
///
/// With `idx = n * p`: a fractional index takes the order statistic at
/// `ceil(idx) - 1`; an integral index averages the two middle order
/// statistics when `n` is even and takes `sorted[idx]` when `n` is odd.
/// `p <= 0` and `p >= 1` return the extremes. Empty input has no quantile.
#[must_use]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    let first = *sorted.first()?;
    let last = sorted[n - 1];

    if p <= 0.0 {
        return Some(first);
    }
    if p >= 1.0 {
        return Some(last);
    }

    let idx = n as f64 * p;
    if idx.fract() != 0.0 {
        let rank = (idx.ceil() as usize).clamp(1, n);
        return Some(sorted[rank - 1]);
    }

    let idx = idx as usize;
    if n % 2 == 0 {
        Some((sorted[idx - 1] + sorted[idx]) / 2.0)
    } else {
        Some(sorted[idx.min(n - 1)])
    }
}

/// `intervals + 1` boundaries at probabilities `k / intervals`.
///
/// Empty input or zero intervals yields no boundaries.
#[must_use]
pub fn quantile(sorted: &[f64], intervals: usize) -> Vec<f64> {
    if sorted.is_empty() || intervals == 0 {
        return Vec::new();
    }

    (0..=intervals)
        .filter_map(|k| quantile_sorted(sorted, k as f64 / intervals as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quantile_fixture() {
        let values: Vec<f64> = (0..50).map(f64::from).collect();
        assert_eq!(quantile(&values, 5), vec![0.0, 9.5, 19.5, 29.5, 39.5, 49.0]);
    }

    #[test]
    fn test_quantile_sorted_median() {
        assert_relative_eq!(quantile_sorted(&[1.0, 2.0, 3.0, 4.0], 0.5).unwrap(), 2.5);
        assert_relative_eq!(quantile_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.5).unwrap(), 3.0);
    }

    #[test]
    fn test_quantile_sorted_fractional_index() {
        // idx = 5 * 0.3 = 1.5 -> ceil - 1 = 1
        assert_relative_eq!(quantile_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.3).unwrap(), 2.0);
    }

    #[test]
    fn test_quantile_sorted_extremes() {
        let values = [3.0, 7.0, 9.0];
        assert_relative_eq!(quantile_sorted(&values, 0.0).unwrap(), 3.0);
        assert_relative_eq!(quantile_sorted(&values, 1.0).unwrap(), 9.0);
    }

    #[test]
    fn test_quantile_empty() {
        assert!(quantile_sorted(&[], 0.5).is_none());
        assert!(quantile(&[], 5).is_empty());
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile(&[4.0], 3), vec![4.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_quantile_more_intervals_than_values() {
        let breaks = quantile(&[1.0, 2.0], 4);
        assert_eq!(breaks.len(), 5);
        assert!(breaks.windows(2).all(|w| w[0] <= w[1]));
    }
}
