//! Jenks natural breaks.
//!
//! Fisher's exact dynamic programming over sorted data: for every prefix
//! length and class count, keep the partition minimizing the summed
//! within-class squared deviation, remembering where the last class starts.
//!
//! # References
//!
//! - Jenks, G. F. (1977). *Optimal Data Classification for Choropleth Maps*.
//!   University of Kansas, Occasional Paper No. 2.
//! - Fisher, W. D. (1958). "On Grouping for Maximum Homogeneity."
//!   *Journal of the American Statistical Association*, 53(284), 789-798.

/// Lower-class-limit matrix; `limits[l][j]` is the 1-based start of the
/// last of `j` classes covering the first `l` values.
fn lower_class_limits(sorted: &[f64], classes: usize) -> Vec<Vec<usize>> {
    let n = sorted.len();
    let mut limits = vec![vec![0_usize; classes + 1]; n + 1];
    let mut variances = vec![vec![0.0_f64; classes + 1]; n + 1];

    for j in 1..=classes {
        limits[1][j] = 1;
        variances[1][j] = 0.0;
        for row in variances.iter_mut().skip(2) {
            row[j] = f64::INFINITY;
        }
    }

    for l in 2..=n {
        let mut sum = 0.0;
        let mut sum_squares = 0.0;
        let mut variance = 0.0;

        for m in 1..=l {
            let lower = l - m + 1;
            let value = sorted[lower - 1];
            let w = m as f64;

            sum += value;
            sum_squares += value * value;
            variance = sum_squares - (sum * sum) / w;

            let previous = lower - 1;
            if previous != 0 {
                for j in 2..=classes {
                    let candidate = variance + variances[previous][j - 1];
                    // `>=` lets the widest last class win ties.
                    if variances[l][j] >= candidate {
                        limits[l][j] = lower;
                        variances[l][j] = candidate;
                    }
                }
            }
        }

        limits[l][1] = 1;
        variances[l][1] = variance;
    }

    limits
}

/// `classes + 1` breaks over ascending data: the minimum, the first value of
/// every class after the first, and the maximum.
///
/// Zero classes, or more classes than values, yields no breaks.
#[must_use]
pub fn jenks(sorted: &[f64], classes: usize) -> Vec<f64> {
    let n = sorted.len();
    if classes == 0 || classes > n {
        return Vec::new();
    }

    let limits = lower_class_limits(sorted, classes);

    let mut breaks = vec![0.0; classes + 1];
    breaks[classes] = sorted[n - 1];

    let mut k = n;
    for count in (1..=classes).rev() {
        // Degenerate tie paths can leave an unset limit; pin them to the minimum.
        let start = limits[k][count].max(1);
        breaks[count - 1] = sorted[start - 1];
        k = start - 1;
    }

    breaks
}
