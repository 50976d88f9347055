use assert_cmd::cargo::cargo_bin_cmd;
use serde::Deserialize;
use std::{error::Error, fs, io::Write, path::PathBuf};

#[derive(Deserialize)]
struct SeriesJson {
    rri: Vec<f64>,
    time: Vec<f64>,
}

#[derive(Deserialize)]
struct ResampledJson {
    time: Vec<f64>,
    rri: Vec<f64>,
}

#[test]
fn describe_renders_expected_table() -> Result<(), Box<dyn Error>> {
    let input = sample_path("test_data/real_rri.txt");

    let mut cmd = cargo_bin_cmd!("rri");
    cmd.args(["describe", "--input", &input]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let rendered = String::from_utf8(output)?;

    assert!(rendered.contains("----------------------------------------"));
    assert!(rendered.contains("                   rri          hr"));
    assert!(rendered.contains("mean            822.29       73.10"));
    assert!(rendered.contains("std              35.06        3.14"));
    assert!(rendered.contains("amplitude       131.20       11.67"));
    Ok(())
}

#[test]
fn to_hr_converts_milliseconds_to_bpm() -> Result<(), Box<dyn Error>> {
    let input = write_series(&["1000", "500", "1000"])?;

    let mut cmd = cargo_bin_cmd!("rri");
    cmd.args(["to-hr", "--input", input.path().to_str().unwrap()]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let hr: Vec<f64> = serde_json::from_slice(&output)?;

    assert_eq!(hr, vec![60.0, 120.0, 60.0]);
    Ok(())
}

#[test]
fn resample_produces_uniform_grid() -> Result<(), Box<dyn Error>> {
    let input = write_series(&["800", "810", "790", "815"])?;

    let mut cmd = cargo_bin_cmd!("rri");
    cmd.args([
        "resample",
        "--input",
        input.path().to_str().unwrap(),
        "--sf",
        "4",
        "--method",
        "linear",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let resampled: ResampledJson = serde_json::from_slice(&output)?;

    // Default axis spans (810 + 790 + 815) ms, so the 4 Hz grid has
    // floor(2.415 * 4) + 1 = 10 points.
    assert_eq!(resampled.time.len(), 10);
    assert_eq!(resampled.rri.len(), 10);
    assert!((resampled.time[1] - resampled.time[0] - 0.25).abs() < 1e-9);
    assert!((resampled.rri[0] - 800.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn time_range_slices_inclusively() -> Result<(), Box<dyn Error>> {
    let input = write_series(&["1000", "1000", "1000", "1000"])?;

    let mut cmd = cargo_bin_cmd!("rri");
    cmd.args([
        "time-range",
        "--input",
        input.path().to_str().unwrap(),
        "--start",
        "1",
        "--end",
        "2",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let series: SeriesJson = serde_json::from_slice(&output)?;

    assert_eq!(series.time, vec![1.0, 2.0]);
    assert_eq!(series.rri, vec![1000.0, 1000.0]);
    Ok(())
}

#[test]
fn describe_reads_csv_column() -> Result<(), Box<dyn Error>> {
    let csv = sample_path("test_data/sample_rri.csv");

    let mut cmd = cargo_bin_cmd!("rri");
    cmd.args(["describe", "--csv", &csv, "--column", "rri"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let rendered = String::from_utf8(output)?;

    assert!(rendered.contains("min"));
    assert!(rendered.contains("amplitude"));
    Ok(())
}

#[test]
fn to_hr_reads_polar_hrm() -> Result<(), Box<dyn Error>> {
    let hrm = sample_path("test_data/sample.hrm");

    let mut cmd = cargo_bin_cmd!("rri");
    cmd.args(["to-hr", "--hrm", &hrm]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let hr: Vec<f64> = serde_json::from_slice(&output)?;

    assert_eq!(hr.len(), 10);
    assert!((hr[0] - 60000.0 / 785.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn invalid_series_fails_with_validation_error() -> Result<(), Box<dyn Error>> {
    let input = write_series(&["800", "-5", "810"])?;

    let mut cmd = cargo_bin_cmd!("rri");
    cmd.args(["describe", "--input", input.path().to_str().unwrap()]);
    cmd.assert().failure();
    Ok(())
}

#[test]
fn plot_writes_png() -> Result<(), Box<dyn Error>> {
    let input = sample_path("test_data/real_rri.txt");
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("series.png");

    let mut cmd = cargo_bin_cmd!("rri");
    cmd.args(["plot", "--input", &input, "--out", out.to_str().unwrap()]);
    cmd.assert().success();

    assert!(fs::metadata(&out)?.len() > 0);
    Ok(())
}

#[test]
fn hist_writes_png_for_both_domains() -> Result<(), Box<dyn Error>> {
    let input = sample_path("test_data/real_rri.txt");
    let dir = tempfile::tempdir()?;

    let rri_png = dir.path().join("rri.png");
    let mut cmd = cargo_bin_cmd!("rri");
    cmd.args(["hist", "--input", &input, "--out", rri_png.to_str().unwrap()]);
    cmd.assert().success();
    assert!(fs::metadata(&rri_png)?.len() > 0);

    let hr_png = dir.path().join("hr.png");
    let mut cmd = cargo_bin_cmd!("rri");
    cmd.args([
        "hist",
        "--input",
        &input,
        "--out",
        hr_png.to_str().unwrap(),
        "--hr",
    ]);
    cmd.assert().success();
    assert!(fs::metadata(&hr_png)?.len() > 0);
    Ok(())
}

fn write_series(lines: &[&str]) -> Result<tempfile::NamedTempFile, Box<dyn Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    Ok(file)
}

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .expect("crates dir")
        .parent()
        .expect("workspace root")
        .to_path_buf()
}

fn sample_path(relative: &str) -> String {
    workspace_root()
        .join(relative)
        .to_string_lossy()
        .to_string()
}
