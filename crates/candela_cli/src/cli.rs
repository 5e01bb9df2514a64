use candela_renderer::RenderConfig;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable on the command line
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

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Small diffuse sphere resting on a large ground sphere
    TwoSpheres,
    /// Diffuse, hollow glass and metal spheres side by side
    Materials,
    /// Field of random small spheres around three large ones
    Cover,
}

#[derive(Debug, Parser)]
#[command(name = "candela")]
#[command(about = "Render sphere scenes with a CPU path tracer")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Image width divided by height
    #[arg(long, default_value_t = 16.0 / 9.0)]
    pub aspect_ratio: f32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 100)]
    pub samples: u32,

    /// Maximum number of ray bounces
    #[arg(long, default_value_t = 50)]
    pub max_depth: u32,

    /// Worker threads (defaults to the available parallelism)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Seed for a reproducible render
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneKind::Cover)]
    pub scene: SceneKind,

    /// Output PNG path
    #[arg(short, long, default_value = "image.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Don't print scanline progress to stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Image height derived from the width and aspect ratio.
    pub fn image_height(&self) -> u32 {
        (self.width as f32 / self.aspect_ratio) as u32
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            image_width: self.width,
            image_height: self.image_height(),
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            threads: self.threads,
            seed: self.seed,
        }
    }
}
