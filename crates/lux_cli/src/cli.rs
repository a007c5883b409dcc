use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lux_renderer::DEFAULT_QUEUE_CAPACITY;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render spheres under a sky gradient to a plain-text PPM image
#[derive(Debug, Parser)]
#[command(name = "lux", version)]
pub struct Args {
    /// Output image path, relative to the current directory
    #[arg(default_value = "image.ppm")]
    pub output: PathBuf,

    /// Image height in pixels; width follows from the aspect ratio
    #[arg(long, default_value_t = 1080)]
    pub height: u32,

    /// Width / height ratio
    #[arg(long, default_value_t = 16.0 / 9.0)]
    pub aspect_ratio: f64,

    /// Jittered samples averaged per pixel
    #[arg(long, short = 's', default_value_t = 10)]
    pub samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 10)]
    pub max_depth: u32,

    /// Render worker threads (defaults to available parallelism)
    #[arg(long, short = 'j')]
    pub workers: Option<usize>,

    /// Capacity of the scanline work and result queues
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Base random seed; the same seed reproduces the same image
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// JSON scene description; the built-in two-sphere scene if omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Logging level (RUST_LOG still applies per module)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
