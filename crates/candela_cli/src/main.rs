use anyhow::{Context, Result};
use candela_renderer::{render, NoProgress, ProgressReporter, StderrProgress};
use clap::Parser;
use log::info;

mod cli;
mod scenes;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let config = args.render_config();
    config.validate().context("Invalid render settings")?;

    let start = std::time::Instant::now();
    let scene = scenes::build(args.scene, args.seed);
    info!(
        "Scene {:?} built with {} spheres in {:?}",
        args.scene,
        scene.world.len(),
        start.elapsed()
    );

    let camera = scene
        .camera
        .with_aspect_ratio(config.aspect_ratio())
        .build();

    let progress: &dyn ProgressReporter = if args.quiet {
        &NoProgress
    } else {
        &StderrProgress
    };

    let image = render(&camera, &scene.world, &config, progress).context("Render failed")?;

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
