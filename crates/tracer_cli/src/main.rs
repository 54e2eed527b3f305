use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use tracer_core::load_scene_file;
use tracer_renderer::{Image, Renderer};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let scene_file = load_scene_file(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    let (width, height) = args.resolution(scene_file.resolution);

    let renderer = Renderer::new(args.device_selection())
        .context("Failed to initialize render device")?;
    info!(
        "Using {} ({} workers)",
        renderer.device_name(),
        renderer.context().worker_count()
    );

    let image = renderer
        .render(
            &scene_file.scene,
            &scene_file.camera,
            args.samples_per_pixel,
            width,
            height,
        )
        .context("Render failed")?;

    let output = args.output_path(&scene_file.name);
    save_png(&image, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Saved {}", output.display());

    Ok(())
}

fn save_png(frame: &Image, path: &Path) -> Result<()> {
    image::save_buffer_with_format(
        path,
        frame.as_bytes(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}
