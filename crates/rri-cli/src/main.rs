use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use plotters::prelude::*;
use rri_lib::{
    interp::{self, Method},
    io::{csv as csv_io, hrm as hrm_io, text as text_io},
    plot::{figure_from_series, histogram_figure, Figure, PlotBackend, Series},
    RRiSeries,
};
use serde::Serialize;
use std::{
    io::{self, Read},
    path::PathBuf,
};

#[derive(Parser)]
#[command(name = "rri", version, about = "RRi series toolkit: validation, statistics, resampling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Newline-delimited RRi values; stdin when no source is given
    #[arg(long)]
    input: Option<PathBuf>,
    /// CSV file holding the RRi values in a named column
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Column to read from --csv
    #[arg(long, default_value = "rri")]
    column: String,
    /// Polar HRM export ([HRData] section)
    #[arg(long)]
    hrm: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ResampleMethod {
    Linear,
    #[value(name = "cubic-spline")]
    CubicSpline,
}

impl From<ResampleMethod> for Method {
    fn from(method: ResampleMethod) -> Self {
        match method {
            ResampleMethod::Linear => Method::Linear,
            ResampleMethod::CubicSpline => Method::CubicSpline,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the descriptive statistics table (RRi and HR domains)
    Describe {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Convert the series to heart rate (bpm) and print JSON
    ToHr {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Resample onto a uniform grid at --sf Hz
    Resample {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, default_value_t = 4.0)]
        sf: f64,
        #[arg(long, default_value = "cubic-spline")]
        method: ResampleMethod,
    },
    /// Keep only samples with start <= t <= end and print the series as JSON
    TimeRange {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        start: f64,
        #[arg(long)]
        end: f64,
    },
    /// Render the series as a PNG line chart
    Plot {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Render a histogram PNG of the RRi (or HR) distribution
    Hist {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        out: PathBuf,
        /// Histogram of heart rate instead of RRi
        #[arg(long)]
        hr: bool,
        #[arg(long, default_value_t = 32)]
        bins: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Describe { input } => cmd_describe(&input)?,
        Commands::ToHr { input } => cmd_to_hr(&input)?,
        Commands::Resample { input, sf, method } => cmd_resample(&input, sf, method.into())?,
        Commands::TimeRange { input, start, end } => cmd_time_range(&input, start, end)?,
        Commands::Plot { input, out } => cmd_plot(&input, out)?,
        Commands::Hist {
            input,
            out,
            hr,
            bins,
        } => cmd_hist(&input, out, hr, bins)?,
    }
    Ok(())
}

fn read_samples(args: &InputArgs) -> Result<Vec<f64>> {
    if let Some(path) = &args.csv {
        csv_io::read_rri_column(path, &args.column)
    } else if let Some(path) = &args.hrm {
        hrm_io::read_polar_hrm(path)
    } else if let Some(path) = &args.input {
        text_io::read_rri_series(path)
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        text_io::parse_rri_series(&buf)
    }
}

fn series_from_input(args: &InputArgs) -> Result<RRiSeries> {
    let rri = read_samples(args)?;
    Ok(RRiSeries::new(rri)?)
}

fn cmd_describe(args: &InputArgs) -> Result<()> {
    let series = series_from_input(args)?;
    print!("{}", series.describe());
    Ok(())
}

fn cmd_to_hr(args: &InputArgs) -> Result<()> {
    let series = series_from_input(args)?;
    println!("{}", serde_json::to_string(&series.to_hr())?);
    Ok(())
}

#[derive(Serialize)]
struct Resampled {
    time: Vec<f64>,
    rri: Vec<f64>,
}

fn cmd_resample(args: &InputArgs, sf: f64, method: Method) -> Result<()> {
    let series = series_from_input(args)?;
    let resampled = Resampled {
        time: interp::time_grid(series.time(), sf),
        rri: interp::resample(series.rri(), series.time(), sf, method)?,
    };
    println!("{}", serde_json::to_string(&resampled)?);
    Ok(())
}

fn cmd_time_range(args: &InputArgs, start: f64, end: f64) -> Result<()> {
    let series = series_from_input(args)?;
    println!("{}", serde_json::to_string(&series.time_range(start, end))?);
    Ok(())
}

fn cmd_plot(args: &InputArgs, out: PathBuf) -> Result<()> {
    let series = series_from_input(args)?;
    let fig = figure_from_series(&series);
    PngBackend::new(out).draw(&fig)
}

fn cmd_hist(args: &InputArgs, out: PathBuf, hr: bool, bins: usize) -> Result<()> {
    let series = series_from_input(args)?;
    let fig = if hr {
        histogram_figure(&series.to_hr(), bins, "HR (bpm)")
    } else {
        histogram_figure(series.rri(), bins, "RRi (ms)")
    };
    PngBackend::new(out).draw(&fig)
}

struct PngBackend {
    out: PathBuf,
    size: (u32, u32),
}

impl PngBackend {
    fn new(out: PathBuf) -> Self {
        Self {
            out,
            size: (800, 480),
        }
    }
}

impl PlotBackend for PngBackend {
    fn draw(&mut self, fig: &Figure) -> Result<()> {
        let root = BitMapBackend::new(&self.out, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let (x_range, y_range) = figure_bounds(fig);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                fig.title.clone().unwrap_or_else(|| "Plot".into()),
                ("sans-serif", 24),
            )
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(x_range, y_range)?;
        chart
            .configure_mesh()
            .x_desc(fig.x.label.clone().unwrap_or_default())
            .y_desc(fig.y.label.clone().unwrap_or_default())
            .draw()?;
        for series in &fig.series {
            match series {
                Series::Line(line) => {
                    chart.draw_series(LineSeries::new(
                        line.points.iter().map(|p| (p[0], p[1])),
                        &rgb(line.style.color),
                    ))?;
                }
                Series::Histogram(hist) => {
                    let color = rgb(hist.style.color);
                    chart.draw_series(hist.bins.iter().map(|bin| {
                        Rectangle::new(
                            [(bin.start, 0.0), (bin.end, bin.count as f64)],
                            color.filled(),
                        )
                    }))?;
                }
            }
        }
        root.present()?;
        Ok(())
    }
}

fn figure_bounds(fig: &Figure) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for series in &fig.series {
        match series {
            Series::Line(line) => {
                for p in &line.points {
                    x_min = x_min.min(p[0]);
                    x_max = x_max.max(p[0]);
                    y_min = y_min.min(p[1]);
                    y_max = y_max.max(p[1]);
                }
            }
            Series::Histogram(hist) => {
                for bin in &hist.bins {
                    x_min = x_min.min(bin.start);
                    x_max = x_max.max(bin.end);
                    y_min = y_min.min(0.0);
                    y_max = y_max.max(bin.count as f64);
                }
            }
        }
    }
    if !x_min.is_finite() || !x_max.is_finite() {
        (x_min, x_max) = (0.0, 1.0);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        (y_min, y_max) = (0.0, 1.0);
    }
    if x_min == x_max {
        x_max = x_min + 1.0;
    }
    if y_min == y_max {
        y_max = y_min + 1.0;
    }
    (x_min..x_max, y_min..y_max)
}

fn rgb(color: rri_lib::plot::Color) -> RGBColor {
    RGBColor(
        ((color.0 >> 16) & 0xFF) as u8,
        ((color.0 >> 8) & 0xFF) as u8,
        (color.0 & 0xFF) as u8,
    )
}
