use serde::Serialize;

use crate::describe::{describe_series, RRiDescription};
use crate::validation::{create_time, median, validate_rri, validate_time, SeriesError};

/// Validated series of inter-beat intervals with its time axis.
///
/// Values are strictly positive milliseconds; the time axis is strictly
/// increasing seconds of the same length. Both arrays are normalized at
/// construction and owned by the series. Every transform returns a fresh
/// series; [`RRiSeries::reset_time_in_place`] is the single operation that
/// mutates an existing one.
#[derive(Debug, Clone, Serialize)]
pub struct RRiSeries {
    rri: Vec<f64>,
    time: Vec<f64>,
}

impl RRiSeries {
    /// Build a series from raw values, deriving the default time axis from
    /// the cumulative intervals.
    pub fn new(rri: Vec<f64>) -> Result<Self, SeriesError> {
        let rri = validate_rri(rri)?;
        let time = create_time(&rri);
        Ok(Self { rri, time })
    }

    /// Build a series from raw values and a caller-supplied time axis.
    pub fn with_time(rri: Vec<f64>, time: Vec<f64>) -> Result<Self, SeriesError> {
        let rri = validate_rri(rri)?;
        let time = validate_time(&rri, time)?;
        Ok(Self { rri, time })
    }

    pub fn len(&self) -> usize {
        self.rri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rri.is_empty()
    }

    /// Value at `index`, or `None` when the index is out of range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.rri.get(index).copied()
    }

    pub fn rri(&self) -> &[f64] {
        &self.rri
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Heart rate in beats per minute, `60 / (ms / 1000)` per element.
    ///
    /// Heart rate is not an RRi quantity: the result is a plain sequence with
    /// no time axis and none of the series invariants.
    pub fn to_hr(&self) -> Vec<f64> {
        self.rri.iter().map(|&v| 60.0 / (v / 1000.0)).collect()
    }

    /// New series keeping only samples with `start <= t <= end` (inclusive).
    ///
    /// The subset goes back through validation, so the seconds-detection
    /// heuristic can rescale a pathological subset whose median drops
    /// below 10.
    pub fn time_range(&self, start: f64, end: f64) -> Self {
        let mut rri = Vec::new();
        let mut time = Vec::new();
        for (&t, &v) in self.time.iter().zip(&self.rri) {
            if t >= start && t <= end {
                time.push(t);
                rri.push(v);
            }
        }
        Self::with_time(rri, time).expect("filtered samples keep the series invariants")
    }

    /// New series with the time axis shifted to start at 0; the original is
    /// untouched.
    pub fn reset_time(&self) -> Self {
        let first = match self.time.first() {
            Some(&first) => first,
            None => return self.clone(),
        };
        let shifted = self.time.iter().map(|&t| t - first).collect();
        Self::with_time(self.rri.clone(), shifted).expect("shifted time axis stays valid")
    }

    /// Shift this series' own time axis to start at 0.
    pub fn reset_time_in_place(&mut self) {
        if let Some(&first) = self.time.first() {
            for t in self.time.iter_mut() {
                *t -= first;
            }
        }
    }

    pub fn mean(&self) -> f64 {
        mean(&self.rri)
    }

    /// Population variance over the values.
    pub fn var(&self) -> f64 {
        var(&self.rri)
    }

    /// Population standard deviation over the values.
    pub fn std(&self) -> f64 {
        var(&self.rri).sqrt()
    }

    pub fn median(&self) -> f64 {
        median(&self.rri)
    }

    pub fn max(&self) -> f64 {
        max(&self.rri)
    }

    pub fn min(&self) -> f64 {
        min(&self.rri)
    }

    /// `max - min` of the values.
    pub fn amplitude(&self) -> f64 {
        self.max() - self.min()
    }

    /// Root mean square of the values.
    pub fn rms(&self) -> f64 {
        mean(&self.rri.iter().map(|&v| v * v).collect::<Vec<_>>()).sqrt()
    }

    /// Fixed statistics table over the RRi and heart-rate domains.
    pub fn describe(&self) -> RRiDescription {
        describe_series(self)
    }

    fn transform(&self, f: impl Fn(f64) -> f64) -> Result<Self, SeriesError> {
        Self::with_time(self.rri.iter().map(|&v| f(v)).collect(), self.time.clone())
    }

    /// New series with `val` added to every value; the time axis is carried
    /// over unchanged. The transformed values are validated again, so a
    /// result that leaves the positive range is an error.
    pub fn add(&self, val: f64) -> Result<Self, SeriesError> {
        self.transform(|v| v + val)
    }

    pub fn subtract(&self, val: f64) -> Result<Self, SeriesError> {
        self.transform(|v| v - val)
    }

    pub fn multiply(&self, val: f64) -> Result<Self, SeriesError> {
        self.transform(|v| v * val)
    }

    /// Division follows IEEE semantics; the transformed values still go
    /// through validation.
    pub fn divide(&self, val: f64) -> Result<Self, SeriesError> {
        self.transform(|v| v / val)
    }

    pub fn power(&self, val: f64) -> Result<Self, SeriesError> {
        self.transform(|v| v.powf(val))
    }

    /// Elementwise absolute value. Values of a valid series are already
    /// positive, so this cannot fail.
    pub fn abs(&self) -> Self {
        self.transform(f64::abs)
            .expect("absolute value keeps values positive")
    }

    fn compare(&self, pred: impl Fn(f64) -> bool) -> Vec<bool> {
        self.rri.iter().map(|&v| pred(v)).collect()
    }

    /// Elementwise `== val`. Comparisons are predicates over the values, not
    /// transforms: they return a boolean sequence, never a new series.
    pub fn equals(&self, val: f64) -> Vec<bool> {
        self.compare(|v| v == val)
    }

    pub fn not_equals(&self, val: f64) -> Vec<bool> {
        self.compare(|v| v != val)
    }

    pub fn greater_than(&self, val: f64) -> Vec<bool> {
        self.compare(|v| v > val)
    }

    pub fn greater_or_equal(&self, val: f64) -> Vec<bool> {
        self.compare(|v| v >= val)
    }

    pub fn less_than(&self, val: f64) -> Vec<bool> {
        self.compare(|v| v < val)
    }

    pub fn less_or_equal(&self, val: f64) -> Vec<bool> {
        self.compare(|v| v <= val)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn var(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, f64::max)
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, f64::min)
}
