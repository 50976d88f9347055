use anyhow::{Context, Result};
use std::path::Path;

/// Parse the `[HRData]` section of a Polar HRM export.
///
/// In RR-interval mode each data row starts with one interval in
/// milliseconds; extra columns (speed, cadence, ...) are ignored.
pub fn parse_polar_hrm(text: &str) -> Result<Vec<f64>> {
    let mut in_data = false;
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("[HRData]") {
            in_data = true;
            continue;
        }
        if !in_data || trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            break;
        }
        let first = trimmed
            .split_whitespace()
            .next()
            .unwrap_or_default();
        let val: f64 = first
            .parse()
            .with_context(|| format!("line {} is not an interval: {}", idx + 1, trimmed))?;
        out.push(val);
    }
    if !in_data {
        anyhow::bail!("no [HRData] section found");
    }
    if out.is_empty() {
        anyhow::bail!("[HRData] section has no samples");
    }
    Ok(out)
}

/// Read a Polar HRM export from disk.
pub fn read_polar_hrm(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_polar_hrm(&text)
}
