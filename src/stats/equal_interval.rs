//! Equal-width breaks over the observed range.

/// `[min, min + w, ..., min + w * (intervals - 1), max]` with
/// `w = (max - min) / intervals`.
///
/// Fewer than two values are returned unchanged, which leaves no complete
/// boundary pair. The interval count is not clamped.
#[must_use]
pub fn equal_interval(sorted: &[f64], intervals: usize) -> Vec<f64> {
    if sorted.len() < 2 || intervals == 0 {
        return sorted.to_vec();
    }

    let min = sorted.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sorted.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / intervals as f64;

    let mut breaks = Vec::with_capacity(intervals.saturating_add(1));
    breaks.push(min);
    breaks.extend((1..intervals).map(|i| min + width * i as f64));
    breaks.push(max);
    breaks
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_interval_fixture() {
        let values: Vec<f64> = (0..50).map(f64::from).collect();
        let breaks = equal_interval(&values, 5);
        let expected = [0.0, 9.8, 19.6, 29.4, 39.2, 49.0];
        assert_eq!(breaks.len(), expected.len());
        for (b, e) in breaks.iter().zip(expected) {
            assert_relative_eq!(*b, e, epsilon = 1e-9);
        }
        assert_eq!(breaks[5], 49.0);
    }

    #[test]
    fn test_equal_interval_constant_values() {
        assert_eq!(equal_interval(&[3.0, 3.0, 3.0], 2), vec![3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_equal_interval_short_input() {
        assert!(equal_interval(&[], 4).is_empty());
        assert_eq!(equal_interval(&[7.0], 4), vec![7.0]);
    }

    #[test]
    fn test_equal_interval_huge_count_on_short_input() {
        assert_eq!(equal_interval(&[7.0], usize::MAX), vec![7.0]);
    }

    #[test]
    fn test_equal_interval_not_clamped() {
        assert_eq!(equal_interval(&[0.0, 1.0], 4), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
