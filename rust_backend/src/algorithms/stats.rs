//! Small numeric helpers shared by the service layer.

use serde::Serialize;

/// Count, mean, min and max of a value set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Compute summary statistics for a set of values.
///
/// An empty input yields zeroed statistics rather than an error.
pub fn compute_summary(values: &[f64]) -> SummaryStats {
    if values.is_empty() {
        return SummaryStats {
            count: 0,
            mean: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;

    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }

    SummaryStats {
        count,
        mean,
        min,
        max,
    }
}

/// Arithmetic mean, 0.0 for an empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to one decimal place. NaN and infinities pass through unchanged.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Pearson correlation coefficient of two equally long sequences.
///
/// Pairs where either value is non-finite are skipped. Returns `None` when
/// fewer than two usable pairs remain or when either sequence has zero
/// variance (the coefficient is undefined there).
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}
