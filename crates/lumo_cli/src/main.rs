use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;

mod cli;
mod scenes;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    cli::init_logger(args.debug_level.clone().into());

    log::info!(
        "rendering {:?} at {}x{}",
        args.scene,
        args.width,
        args.height
    );
    let start = Instant::now();

    let mut image =
        scenes::render(args.scene, args.width, args.height, args.samples, args.bounces)?;

    log::info!("rendered in {:.2}s", start.elapsed().as_secs_f64());

    if let Some(radius) = args.blur {
        anyhow::ensure!(radius > 0, "blur radius must be positive");
        image = lumo_core::gaussian_blur(&image, radius, radius as f64 * 0.5);
        log::info!("applied gaussian blur, radius {}", radius);
    }

    lumo_core::ppm::save(&image, &args.output, args.format.into())
        .with_context(|| format!("failed to write {}", args.output))?;
    log::info!("wrote {}", args.output);

    Ok(())
}
