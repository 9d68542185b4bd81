//! B-spline / NURBS evaluation used for spline length approximation.

use crate::geometry::Point2;
use crate::{Error, Result};

/// Number of samples taken along a spline when approximating its length.
pub const SPLINE_SAMPLES: usize = 51;

/// Default degree when a record does not specify one.
pub const DEFAULT_SPLINE_DEGREE: usize = 3;

/// Clamps a requested degree to what the control polygon supports.
pub fn effective_degree(requested: usize, control_count: usize) -> usize {
    requested.clamp(1, control_count.saturating_sub(1).max(1))
}

/// Builds a clamped uniform knot vector for `n` control points of the given degree.
pub fn clamped_uniform_knots(n: usize, degree: usize) -> Vec<f64> {
    let interior = n.saturating_sub(degree + 1);
    let mut knots = Vec::with_capacity(n + degree + 1);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));
    for i in 1..=interior {
        knots.push(i as f64 / (interior + 1) as f64);
    }
    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    knots
}

/// Validates a user supplied knot vector.
pub fn validate_knots(knots: &[f64], n: usize, degree: usize) -> Result<()> {
    if knots.len() != n + degree + 1 {
        return Err(Error::ParseError(format!(
            "spline with {} control points of degree {} needs {} knots, got {}",
            n,
            degree,
            n + degree + 1,
            knots.len()
        )));
    }
    if knots.iter().any(|k| !k.is_finite()) {
        return Err(Error::ParseError("spline knot is not finite".into()));
    }
    if knots.windows(2).any(|w| w[1] < w[0]) {
        return Err(Error::ParseError("spline knots must be non-decreasing".into()));
    }
    if knots[n] <= knots[degree] {
        return Err(Error::ParseError("spline knot vector has an empty domain".into()));
    }
    Ok(())
}

/// Evaluates a (rational) B-spline at parameter `t` with de Boor's algorithm.
///
/// `weights` is either empty (non-rational) or has one entry per control point.
/// The caller guarantees `control.len() > degree` and a valid knot vector.
pub fn evaluate(control: &[Point2], degree: usize, knots: &[f64], weights: &[f64], t: f64) -> Point2 {
    let n = control.len();
    let p = degree;
    let lo = knots[p];
    let hi = knots[n];
    let t = t.clamp(lo, hi);

    // Knot span k with knots[k] <= t < knots[k + 1], k in [p, n - 1].
    let mut k = p;
    while k < n - 1 && knots[k + 1] <= t {
        k += 1;
    }

    let weight = |i: usize| if weights.is_empty() { 1.0 } else { weights[i] };

    // Homogeneous coordinates (w*x, w*y, w).
    let mut d: Vec<[f64; 3]> = (0..=p)
        .map(|j| {
            let i = j + k - p;
            let w = weight(i);
            [control[i].x * w, control[i].y * w, w]
        })
        .collect();

    for r in 1..=p {
        for j in (r..=p).rev() {
            let i = j + k - p;
            let denom = knots[j + 1 + k - r] - knots[i];
            let alpha = if denom.abs() < f64::EPSILON {
                0.0
            } else {
                (t - knots[i]) / denom
            };
            for c in 0..3 {
                d[j][c] = (1.0 - alpha) * d[j - 1][c] + alpha * d[j][c];
            }
        }
    }

    let [x, y, w] = d[p];
    if w.abs() < f64::EPSILON {
        Point2::new(x, y)
    } else {
        Point2::new(x / w, y / w)
    }
}

/// Samples the spline at [`SPLINE_SAMPLES`] evenly spaced parameters.
pub fn sample(control: &[Point2], degree: usize, knots: &[f64], weights: &[f64]) -> Vec<Point2> {
    if control.len() < 2 {
        return control.to_vec();
    }
    let n = control.len();
    if degree == 0 || degree >= n || validate_knots(knots, n, degree).is_err() {
        let degree = effective_degree(degree, n);
        let knots = clamped_uniform_knots(n, degree);
        return sample(control, degree, &knots, weights);
    }
    let weights: &[f64] = if weights.len() == n { weights } else { &[] };
    let lo = knots[degree];
    let hi = knots[n];
    let steps = (SPLINE_SAMPLES - 1) as f64;
    (0..SPLINE_SAMPLES)
        .map(|i| evaluate(control, degree, knots, weights, lo + (hi - lo) * i as f64 / steps))
        .collect()
}
