//! Resampling of an unevenly time-stamped RRi sequence onto a uniform grid.
//!
//! The interpolator operates on raw arrays: inputs carry the same semantics
//! as the validator's but are checked here, at call time, independently of
//! any series.

use crate::validation::SeriesError;

/// Interpolation method used to evaluate the series on the uniform grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Linear,
    CubicSpline,
}

/// Uniform time grid from `time[0]` at `1/sf` steps.
///
/// The grid has `floor((time[last] - time[0]) * sf) + 1` points, so the last
/// original timestamp is included when the span is a whole number of steps.
pub fn time_grid(time: &[f64], sf: f64) -> Vec<f64> {
    if time.is_empty() {
        return Vec::new();
    }
    let start = time[0];
    let end = time[time.len() - 1];
    let points = ((end - start) * sf).floor() as usize + 1;
    (0..points).map(|i| start + i as f64 / sf).collect()
}

/// Piecewise-linear resampling of `(time, rri)` onto the uniform grid.
pub fn linear(rri: &[f64], time: &[f64], sf: f64) -> Result<Vec<f64>, SeriesError> {
    check_inputs(rri, time, sf)?;
    let grid = time_grid(time, sf);
    let mut out = Vec::with_capacity(grid.len());
    let mut seg = 0;
    for &t in &grid {
        while seg + 2 < time.len() && t > time[seg + 1] {
            seg += 1;
        }
        let h = time[seg + 1] - time[seg];
        out.push(rri[seg] + (rri[seg + 1] - rri[seg]) * (t - time[seg]) / h);
    }
    Ok(out)
}

/// Cubic-spline resampling of `(time, rri)` onto the uniform grid.
///
/// Uses the not-a-knot boundary condition. Two samples degrade to linear
/// interpolation and three to the interpolating parabola.
pub fn cubic_spline(rri: &[f64], time: &[f64], sf: f64) -> Result<Vec<f64>, SeriesError> {
    check_inputs(rri, time, sf)?;
    let n = time.len();
    if n == 2 {
        return linear(rri, time, sf);
    }
    let grid = time_grid(time, sf);
    if n == 3 {
        return Ok(grid.iter().map(|&t| parabola(time, rri, t)).collect());
    }
    let m = second_derivatives(time, rri);
    let mut out = Vec::with_capacity(grid.len());
    let mut seg = 0;
    for &t in &grid {
        while seg + 2 < n && t > time[seg + 1] {
            seg += 1;
        }
        let h = time[seg + 1] - time[seg];
        let a = (time[seg + 1] - t) / h;
        let b = (t - time[seg]) / h;
        let value = a * rri[seg]
            + b * rri[seg + 1]
            + ((a * a * a - a) * m[seg] + (b * b * b - b) * m[seg + 1]) * h * h / 6.0;
        out.push(value);
    }
    Ok(out)
}

/// Resample with the chosen [`Method`].
pub fn resample(
    rri: &[f64],
    time: &[f64],
    sf: f64,
    method: Method,
) -> Result<Vec<f64>, SeriesError> {
    match method {
        Method::Linear => linear(rri, time, sf),
        Method::CubicSpline => cubic_spline(rri, time, sf),
    }
}

fn check_inputs(rri: &[f64], time: &[f64], sf: f64) -> Result<(), SeriesError> {
    if rri.len() != time.len() {
        return Err(SeriesError::LengthMismatch {
            rri_len: rri.len(),
            time_len: time.len(),
        });
    }
    if rri.len() < 2 {
        return Err(SeriesError::TooFewPoints {
            got: rri.len(),
            min: 2,
        });
    }
    if !sf.is_finite() || sf <= 0.0 {
        return Err(SeriesError::InvalidSamplingFrequency(sf));
    }
    if time.windows(2).any(|w| w[1] - w[0] <= 0.0) {
        return Err(SeriesError::NonMonotonicTime);
    }
    Ok(())
}

fn parabola(x: &[f64], y: &[f64], t: f64) -> f64 {
    y[0] * ((t - x[1]) * (t - x[2])) / ((x[0] - x[1]) * (x[0] - x[2]))
        + y[1] * ((t - x[0]) * (t - x[2])) / ((x[1] - x[0]) * (x[1] - x[2]))
        + y[2] * ((t - x[0]) * (t - x[1])) / ((x[2] - x[0]) * (x[2] - x[1]))
}

/// Second derivatives of the not-a-knot cubic spline at every knot.
///
/// The two boundary rows encode third-derivative continuity at the second and
/// second-to-last knots; eliminating the end moments leaves a tridiagonal
/// system over the interior knots, solved with the Thomas algorithm.
/// Requires at least 4 points.
fn second_derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let rhs = |i: usize| 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);

    // Interior unknowns m[1..=n-2].
    let k = n - 2;
    let mut sub = vec![0.0; k];
    let mut diag = vec![0.0; k];
    let mut sup = vec![0.0; k];
    let mut d = vec![0.0; k];

    diag[0] = 2.0 * (h[0] + h[1]) + h[0] * (h[0] + h[1]) / h[1];
    sup[0] = h[1] - h[0] * h[0] / h[1];
    d[0] = rhs(1);
    for i in 2..n - 2 {
        let j = i - 1;
        sub[j] = h[i - 1];
        diag[j] = 2.0 * (h[i - 1] + h[i]);
        sup[j] = h[i];
        d[j] = rhs(i);
    }
    sub[k - 1] = h[n - 3] - h[n - 2] * h[n - 2] / h[n - 3];
    diag[k - 1] = 2.0 * (h[n - 3] + h[n - 2]) + h[n - 2] * (h[n - 3] + h[n - 2]) / h[n - 3];
    d[k - 1] = rhs(n - 2);

    // Thomas forward sweep + back substitution.
    for j in 1..k {
        let w = sub[j] / diag[j - 1];
        diag[j] -= w * sup[j - 1];
        d[j] -= w * d[j - 1];
    }
    let mut interior = vec![0.0; k];
    interior[k - 1] = d[k - 1] / diag[k - 1];
    for j in (0..k - 1).rev() {
        interior[j] = (d[j] - sup[j] * interior[j + 1]) / diag[j];
    }

    let mut m = vec![0.0; n];
    m[1..(k + 1)].copy_from_slice(&interior);
    m[0] = ((h[0] + h[1]) * m[1] - h[0] * m[2]) / h[1];
    m[n - 1] = ((h[n - 3] + h[n - 2]) * m[n - 2] - h[n - 2] * m[n - 3]) / h[n - 3];
    m
}
