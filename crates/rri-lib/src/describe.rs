use std::fmt;

use serde::Serialize;

use crate::series::RRiSeries;
use crate::validation::median;

/// One labeled row of the description table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DescriptionRow {
    pub label: &'static str,
    pub rri: f64,
    pub hr: f64,
}

/// Fixed-order statistics report over the RRi and heart-rate domains.
///
/// Rows come in the order `min, max, mean, var, std, median, amplitude` and
/// the `Display` implementation renders the fixed-width table. Treat it as a
/// report: it is rebuilt from scratch on every `describe()` call.
#[derive(Debug, Clone, Serialize)]
pub struct RRiDescription {
    rows: Vec<DescriptionRow>,
}

impl RRiDescription {
    /// Row for `label`, or `None` for an unknown statistic name.
    pub fn get(&self, label: &str) -> Option<&DescriptionRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    pub fn rows(&self) -> &[DescriptionRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &DescriptionRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for RRiDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = "-".repeat(40);
        writeln!(f, "{dash}")?;
        writeln!(f, "{:<10}{:>12}{:>12}", "", "rri", "hr")?;
        writeln!(f, "{dash}")?;
        for row in &self.rows {
            writeln!(f, "{:<10}{:>12.2}{:>12.2}", row.label, row.rri, row.hr)?;
        }
        Ok(())
    }
}

/// Build the dual-domain statistics table for a series.
///
/// The table is computed over a series rebuilt from the raw values, so a
/// caller-supplied time axis is replaced by the default cumulative one and
/// the unit heuristic gets another look at the values.
pub(crate) fn describe_series(series: &RRiSeries) -> RRiDescription {
    let rebuilt =
        RRiSeries::new(series.rri().to_vec()).expect("validated values stay valid");
    let hr = rebuilt.to_hr();
    let rows = vec![
        DescriptionRow {
            label: "min",
            rri: rebuilt.min(),
            hr: min(&hr),
        },
        DescriptionRow {
            label: "max",
            rri: rebuilt.max(),
            hr: max(&hr),
        },
        DescriptionRow {
            label: "mean",
            rri: rebuilt.mean(),
            hr: mean(&hr),
        },
        DescriptionRow {
            label: "var",
            rri: rebuilt.var(),
            hr: var(&hr),
        },
        DescriptionRow {
            label: "std",
            rri: rebuilt.std(),
            hr: var(&hr).sqrt(),
        },
        DescriptionRow {
            label: "median",
            rri: rebuilt.median(),
            hr: median(&hr),
        },
        DescriptionRow {
            label: "amplitude",
            rri: rebuilt.amplitude(),
            hr: max(&hr) - min(&hr),
        },
    ];
    RRiDescription { rows }
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
