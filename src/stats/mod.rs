//! Statistical classification methods.
//!
//! Pure functions over a value sequence. The range methods take values
//! sorted ascending and return class boundaries; the unique method takes
//! raw values and returns the distinct ones.
//!
//! # Methods
//!
//! - **Quantile**: equal-count classes from order statistics
//! - **Jenks**: natural breaks minimizing within-class variance
//! - **Equal interval**: equal-width classes over the observed range
//! - **Unique interval**: one class per distinct value

mod equal_interval;
mod jenks;
mod quantile;
mod unique;

pub use equal_interval::equal_interval;
pub use jenks::jenks;
pub use quantile::{quantile, quantile_sorted};
pub use unique::{distinct_count, unique_interval};

use crate::params::Method;

/// Interval count a range method actually runs with.
///
/// Jenks needs at least as many distinct values as classes, so its request
/// is clamped down; quantile and equal interval keep the requested count.
#[must_use]
pub fn effective_intervals(method: Method, sorted: &[f64], requested: usize) -> usize {
    match method {
        Method::Jenks => requested.min(distinct_count(sorted)),
        Method::Quantile | Method::EqualInterval => requested,
        Method::UniqueInterval => distinct_count(sorted),
    }
}

/// Boundaries for a range method, or `None` for the unique method.
#[must_use]
pub fn range_boundaries(method: Method, sorted: &[f64], intervals: usize) -> Option<Vec<f64>> {
    match method {
        Method::Quantile => Some(quantile(sorted, intervals)),
        Method::Jenks => Some(jenks(sorted, intervals)),
        Method::EqualInterval => Some(equal_interval(sorted, intervals)),
        Method::UniqueInterval => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jenks_clamps_to_distinct_values() {
        let values = [1.0, 1.0, 2.0, 2.0, 3.0];
        assert_eq!(effective_intervals(Method::Jenks, &values, 5), 3);
        assert_eq!(effective_intervals(Method::Jenks, &values, 2), 2);
    }

    #[test]
    fn test_quantile_and_equal_interval_not_clamped() {
        let values = [1.0, 1.0, 2.0];
        assert_eq!(effective_intervals(Method::Quantile, &values, 5), 5);
        assert_eq!(effective_intervals(Method::EqualInterval, &values, 5), 5);
    }

    #[test]
    fn test_range_boundaries_dispatch() {
        let values: Vec<f64> = (0..50).map(f64::from).collect();
        assert_eq!(range_boundaries(Method::Jenks, &values, 5).map(|b| b.len()), Some(6));
        assert!(range_boundaries(Method::UniqueInterval, &values, 5).is_none());
    }
}
