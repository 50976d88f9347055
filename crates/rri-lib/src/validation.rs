use thiserror::Error;

/// Failures raised while validating series inputs or resampling parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("rri series can only have positive values")]
    NonPositiveValue,
    #[error("rri and time series must have the same length (rri: {rri_len}, time: {time_len})")]
    LengthMismatch { rri_len: usize, time_len: usize },
    #[error("time series cannot have 0 values after first position")]
    ZeroAfterStart,
    #[error("time series must be monotonically increasing")]
    NonMonotonicTime,
    #[error("time series cannot have negative values")]
    NegativeTime,
    #[error("interpolation needs at least {min} samples, got {got}")]
    TooFewPoints { got: usize, min: usize },
    #[error("sampling frequency must be a positive number of Hz, got {0}")]
    InvalidSamplingFrequency(f64),
}

/// Normalize a raw RRi sequence to positive milliseconds.
///
/// Every value must be strictly positive. The series median decides the unit:
/// a median below 10 is taken as seconds and the whole sequence is scaled by
/// 1000. The heuristic runs on every call, so re-validating an already
/// normalized series applies it again.
pub fn validate_rri(rri: Vec<f64>) -> Result<Vec<f64>, SeriesError> {
    let mut rri = rri;
    if rri.iter().any(|&v| v <= 0.0) {
        return Err(SeriesError::NonPositiveValue);
    }
    if median(&rri) < 10.0 {
        log::debug!("rri median below 10, scaling series from seconds to milliseconds");
        for v in rri.iter_mut() {
            *v *= 1000.0;
        }
    }
    Ok(rri)
}

/// Check a caller-supplied time axis against already-validated RRi values.
///
/// Checks run in a fixed order so the first failing condition is the one
/// reported: length, zeros after the first position, strict monotonicity,
/// negative values.
pub fn validate_time(rri: &[f64], time: Vec<f64>) -> Result<Vec<f64>, SeriesError> {
    if rri.len() != time.len() {
        return Err(SeriesError::LengthMismatch {
            rri_len: rri.len(),
            time_len: time.len(),
        });
    }
    if time.iter().skip(1).any(|&t| t == 0.0) {
        return Err(SeriesError::ZeroAfterStart);
    }
    if time.windows(2).any(|w| w[1] - w[0] <= 0.0) {
        return Err(SeriesError::NonMonotonicTime);
    }
    if time.iter().any(|&t| t < 0.0) {
        return Err(SeriesError::NegativeTime);
    }
    Ok(time)
}

/// Default time axis: cumulative RRi (ms) as seconds, shifted to start at 0.
pub fn create_time(rri: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    let mut time: Vec<f64> = rri
        .iter()
        .map(|&v| {
            acc += v;
            acc / 1000.0
        })
        .collect();
    if !time.is_empty() {
        let first = time[0];
        for t in time.iter_mut() {
            *t -= first;
        }
    }
    time
}

/// Median with the numpy convention: mean of the two middle elements for an
/// even count, NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
