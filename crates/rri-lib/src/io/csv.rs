use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

/// Load one named column of a headered CSV file as an RRi sequence.
///
/// Column lookup is case-insensitive. Empty cells are skipped; anything else
/// that fails to parse as a number is an error.
pub fn read_rri_column(path: &Path, column: &str) -> Result<Vec<f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let index = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(column))
        .with_context(|| format!("missing column '{}'", column))?;
    let mut out = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading row {}", row + 2))?;
        let cell = record
            .get(index)
            .map(str::trim)
            .unwrap_or_default();
        if cell.is_empty() {
            continue;
        }
        let val: f64 = cell
            .parse()
            .with_context(|| format!("row {}: '{}' is not a number", row + 2, cell))?;
        out.push(val);
    }
    if out.is_empty() {
        anyhow::bail!("column '{}' has no numeric samples", column);
    }
    Ok(out)
}
