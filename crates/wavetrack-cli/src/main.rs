//! wavetrack CLI — track waves over a directory of foreground-mask frames.

use clap::{Args, Parser, Subcommand};
use image::imageops::FilterType;
use image::GrayImage;
use imageproc::contours::find_contours;
use std::path::{Path, PathBuf};
use std::time::Instant;

use wavetrack::{PixelPoint, TrackerConfig, WaveTracker};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

const STATUS_EVERY: usize = 100;

#[derive(Parser)]
#[command(name = "wavetrack")]
#[command(about = "Track and recognize waves in a sequence of binary foreground masks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track waves over every mask image in a directory (sorted by file name).
    Track(CliTrackArgs),

    /// Print the default configuration as JSON.
    PrintConfig,
}

#[derive(Debug, Clone, Args)]
struct CliTrackArgs {
    /// Directory holding one mask image per frame.
    #[arg(long)]
    frames: PathBuf,

    /// Path to write the tracking report (JSON).
    #[arg(long)]
    out: PathBuf,

    /// JSON config file; fields left out keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pixels strictly above this gray level count as foreground.
    #[arg(long, default_value_t = 0)]
    threshold: u8,

    /// Resize frames to the analysis size instead of rejecting them.
    #[arg(long)]
    resize: bool,

    #[command(flatten)]
    overrides: CliOverrides,
}

#[derive(Debug, Clone, Args, Default)]
struct CliOverrides {
    /// Analysis frame width (pixels).
    #[arg(long)]
    width: Option<u32>,
    /// Analysis frame height (pixels).
    #[arg(long)]
    height: Option<u32>,
    /// Minimum candidate contour area (pixels²).
    #[arg(long)]
    min_area: Option<f64>,
    /// Inclusive lower bound on candidate inertia ratio.
    #[arg(long)]
    min_inertia_ratio: Option<f64>,
    /// Exclusive upper bound on candidate inertia ratio.
    #[arg(long)]
    max_inertia_ratio: Option<f64>,
    /// Peak mass (pixels) required for recognition.
    #[arg(long)]
    mass_threshold: Option<usize>,
    /// Peak displacement from the birth axis (pixels) required for recognition.
    #[arg(long)]
    displacement_threshold: Option<f64>,
    /// Half-height of the search band (pixels).
    #[arg(long)]
    buffer_px: Option<i32>,
    /// Wave axis angle (degrees).
    #[arg(long, allow_hyphen_values = true)]
    axis_angle: Option<f64>,
    /// Centroid/displacement history length.
    #[arg(long)]
    history_len: Option<usize>,
}

impl CliOverrides {
    fn apply(&self, cfg: &mut TrackerConfig) {
        if let Some(v) = self.width {
            cfg.frame_size.width = v;
        }
        if let Some(v) = self.height {
            cfg.frame_size.height = v;
        }
        if let Some(v) = self.min_area {
            cfg.candidate.min_area = v;
        }
        if let Some(v) = self.min_inertia_ratio {
            cfg.candidate.min_inertia_ratio = v;
        }
        if let Some(v) = self.max_inertia_ratio {
            cfg.candidate.max_inertia_ratio = v;
        }
        if let Some(v) = self.mass_threshold {
            cfg.recognition.mass_threshold = v;
        }
        if let Some(v) = self.displacement_threshold {
            cfg.recognition.displacement_threshold = v;
        }
        if let Some(v) = self.buffer_px {
            cfg.search.buffer_px = v;
        }
        if let Some(v) = self.axis_angle {
            cfg.search.axis_angle_deg = v;
        }
        if let Some(v) = self.history_len {
            cfg.history_len = v;
        }
    }
}

fn build_config(args: &CliTrackArgs) -> CliResult<TrackerConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            tracing::info!("Loading config: {}", path.display());
            TrackerConfig::from_json_file(path)?
        }
        None => TrackerConfig::default(),
    };
    args.overrides.apply(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track(args) => run_track(&args),
        Commands::PrintConfig => run_print_config(),
    }
}

fn run_print_config() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&TrackerConfig::default())?);
    Ok(())
}

/// Image files in `dir`, sorted by file name.
fn list_frames(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && image::ImageFormat::from_path(&path).is_ok() {
            frames.push(path);
        }
    }
    frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(frames)
}

fn load_mask(path: &Path, cfg: &TrackerConfig, threshold: u8, resize: bool) -> CliResult<GrayImage> {
    let mut gray = image::open(path)?.to_luma8();
    let (w, h) = (cfg.frame_size.width, cfg.frame_size.height);
    if resize && gray.dimensions() != (w, h) {
        gray = image::imageops::resize(&gray, w, h, FilterType::Nearest);
    }
    for p in gray.pixels_mut() {
        p[0] = if p[0] > threshold { 255 } else { 0 };
    }
    Ok(gray)
}

fn raw_contours(mask: &GrayImage) -> Vec<Vec<PixelPoint>> {
    find_contours::<i32>(mask)
        .into_iter()
        .map(|c| c.points)
        .collect()
}

fn run_track(args: &CliTrackArgs) -> CliResult<()> {
    let cfg = build_config(args)?;
    let frames = list_frames(&args.frames)?;
    if frames.is_empty() {
        return Err(format!("no image frames found in {}", args.frames.display()).into());
    }
    let total = frames.len();
    let mut tracker = WaveTracker::new(cfg.clone(), total)?;

    tracing::info!("Starting analysis of {} frames.", total);
    let start = Instant::now();

    for (i, path) in frames.iter().enumerate() {
        let frame_number = i + 1;
        let mask = load_mask(path, &cfg, args.threshold, args.resize)?;
        let contours = raw_contours(&mask);
        tracker
            .process_frame(&mask, &contours, frame_number)
            .map_err(|e| format!("{}: {}", path.display(), e))?;

        if frame_number % STATUS_EVERY == 0 {
            let secs = start.elapsed().as_secs_f64();
            tracing::info!(
                "{} frames complete. ({:.3} frames/sec; {:.3} sec/frame)",
                frame_number,
                frame_number as f64 / secs,
                secs / frame_number as f64
            );
        }
    }
    tracing::info!("End of sequence reached successfully.");

    let elapsed = start.elapsed();
    let report = tracker.finish();
    tracing::info!("Program took {} milliseconds.", elapsed.as_millis());
    tracing::info!(
        "Program speed: {:.3} frames per second.",
        total as f64 / elapsed.as_secs_f64()
    );
    tracing::info!(
        "{} wave(s) found, {} discarded.",
        report.recognized.len(),
        report.discarded
    );

    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Report written to {}", args.out.display());
    Ok(())
}
