mod cli;

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use lux_renderer::{default_scene, render, Camera, PpmSink, RenderConfig, SceneDescription};

use cli::Args;

fn run(args: &Args) -> Result<()> {
    let description = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => default_scene(),
    };
    let world = description.build().context("invalid scene")?;
    log::info!("Scene has {} objects", world.len());

    let mut camera = Camera::new()
        .with_aspect_ratio(args.aspect_ratio)
        .with_image_height(args.height)
        .with_quality(args.samples, args.max_depth);
    camera.initialize();

    let mut config = RenderConfig {
        queue_capacity: args.queue_capacity,
        seed: args.seed,
        ..RenderConfig::default()
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut sink = PpmSink::new(BufWriter::new(file));

    render(&camera, &world, &config, &mut sink)
        .with_context(|| format!("failed to render {}", args.output.display()))?;

    log::info!("Saved to {}", args.output.display());
    Ok(())
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting lux {}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run(&args) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
