use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use tracer_renderer::DeviceSelection;

/// Log verbosity accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "tracer")]
#[command(about = "Monte Carlo path tracer for sphere scenes")]
pub struct Args {
    /// Scene driver file
    pub scene: PathBuf,

    /// Path samples per pixel
    pub samples_per_pixel: u32,

    /// Override the image width from the scene file
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the image height from the scene file
    #[arg(long)]
    pub height: Option<u32>,

    /// Render on the calling thread only
    #[arg(long, conflicts_with = "threads")]
    pub host: bool,

    /// Number of render worker threads
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Output PNG path (defaults to <scene name>.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn device_selection(&self) -> DeviceSelection {
        match (self.host, self.threads) {
            (true, _) => DeviceSelection::HostOnly,
            (false, Some(threads)) => DeviceSelection::Threads(threads),
            (false, None) => DeviceSelection::BestAvailable,
        }
    }

    /// Final resolution, with command line overrides applied.
    pub fn resolution(&self, scene_resolution: (u32, u32)) -> (u32, u32) {
        (
            self.width.unwrap_or(scene_resolution.0),
            self.height.unwrap_or(scene_resolution.1),
        )
    }

    pub fn output_path(&self, scene_name: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{scene_name}.png")))
    }
}
