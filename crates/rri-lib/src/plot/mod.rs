//! Backend-agnostic figure model for series rendering.
//!
//! The core only describes what to draw; rendering lives behind
//! [`PlotBackend`], implemented by the consumer (the CLI draws with
//! plotters).

use serde::{Deserialize, Serialize};

use crate::series::RRiSeries;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axis {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub width: f32,
    pub dash: Option<[f32; 2]>,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Color(pub u32);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub style: Style,
}

/// One equal-width histogram bin over `[start, end)`; the last bin closes
/// the range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramSeries {
    pub name: String,
    pub bins: Vec<HistogramBin>,
    pub style: Style,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Series {
    Line(LineSeries),
    Histogram(HistogramSeries),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn new(title: impl Into<Option<String>>) -> Self {
        Self {
            title: title.into(),
            x: Axis { label: None },
            y: Axis { label: None },
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }
}

pub trait PlotBackend {
    fn draw(&mut self, fig: &Figure) -> anyhow::Result<()>;
}

pub fn decimate_points(points: &[[f64; 2]], max_points: usize) -> Vec<[f64; 2]> {
    if points.len() <= max_points {
        return points.to_vec();
    }
    let bucket_size = points.len() as f64 / max_points as f64;
    let mut result = Vec::with_capacity(max_points);
    for i in 0..max_points {
        let start = (i as f64 * bucket_size).floor() as usize;
        if start >= points.len() {
            break;
        }
        result.push(points[start]);
    }
    result
}

/// Line figure of the series over its time axis.
pub fn figure_from_series(series: &RRiSeries) -> Figure {
    figure_from_series_limit(series, 1024)
}

pub fn figure_from_series_limit(series: &RRiSeries, max_points: usize) -> Figure {
    let points: Vec<[f64; 2]> = series
        .time()
        .iter()
        .zip(series.rri())
        .map(|(&t, &v)| [t, v])
        .collect();
    let decimated = decimate_points(&points, max_points);
    let mut fig = Figure::new(Some("RRi series".into()));
    fig.x.label = Some("Time (s)".into());
    fig.y.label = Some("RRi (ms)".into());
    fig.add_series(Series::Line(LineSeries {
        name: "RRi".into(),
        points: decimated,
        style: Style {
            width: 2.0,
            dash: None,
            color: Color(0xFF0077),
        },
    }));
    fig
}

/// Histogram figure over a value distribution (RRi or heart rate).
pub fn histogram_figure(values: &[f64], bins: usize, label: &str) -> Figure {
    let mut fig = Figure::new(Some(format!("{} distribution", label)));
    fig.x.label = Some(label.into());
    fig.y.label = Some("Frequency".into());
    fig.add_series(Series::Histogram(HistogramSeries {
        name: label.into(),
        bins: bin_values(values, bins),
        style: Style {
            width: 1.0,
            dash: None,
            color: Color(0x3377BB),
        },
    }));
    fig
}

fn bin_values(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if max > min {
        (max - min) / bins as f64
    } else {
        1.0
    };
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for &v in values {
        let mut idx = ((v - min) / width) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        out[idx].count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_carries_time_and_axis_labels() {
        let series = RRiSeries::new(vec![800.0, 810.0, 790.0]).unwrap();
        let fig = figure_from_series(&series);
        assert_eq!(fig.x.label.as_deref(), Some("Time (s)"));
        assert_eq!(fig.y.label.as_deref(), Some("RRi (ms)"));
        match &fig.series[0] {
            Series::Line(line) => {
                assert_eq!(line.points.len(), 3);
                assert_eq!(line.points[0], [0.0, 800.0]);
            }
            other => panic!("expected line series, got {:?}", other),
        }
    }

    #[test]
    fn decimation_caps_point_count() {
        let points: Vec<[f64; 2]> = (0..5000).map(|i| [i as f64, 0.0]).collect();
        assert_eq!(decimate_points(&points, 1024).len(), 1024);
        assert_eq!(decimate_points(&points, 10_000).len(), 5000);
    }

    #[test]
    fn histogram_counts_every_sample() {
        let values = [800.0, 810.0, 790.0, 815.0, 805.0];
        let fig = histogram_figure(&values, 4, "RRi (ms)");
        match &fig.series[0] {
            Series::Histogram(hist) => {
                assert_eq!(hist.bins.len(), 4);
                let total: usize = hist.bins.iter().map(|b| b.count).sum();
                assert_eq!(total, values.len());
            }
            other => panic!("expected histogram series, got {:?}", other),
        }
    }

    #[test]
    fn flat_distribution_gets_unit_width_bin() {
        let fig = histogram_figure(&[1000.0, 1000.0], 4, "RRi (ms)");
        match &fig.series[0] {
            Series::Histogram(hist) => {
                assert_eq!(hist.bins.iter().map(|b| b.count).sum::<usize>(), 2);
            }
            other => panic!("expected histogram series, got {:?}", other),
        }
    }
}
