//! Headless frame driver for the Darkmoon ray caster.
//!
//! Plays the part of a window's redraw timer: renders the scene once per
//! tick, reports FPS and ray count, and saves the last frame as PNG.
//!
//! Run with: cargo run --release -- [config.json]

mod config;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use darkmoon_core::EnvironmentMap;
use darkmoon_renderer::{Frame, FrameRenderer, RenderSettings};

use crate::config::ViewerConfig;

/// Run every tick of `config` and return the last frame.
fn run(config: &ViewerConfig) -> Result<Frame> {
    let start = Instant::now();
    let environment = Arc::new(match &config.environment {
        Some(path) => EnvironmentMap::load_or_fallback(path),
        None => EnvironmentMap::gradient(),
    });
    log::info!(
        "Environment {} ({}x{}) ready in {:?}",
        environment.source(),
        environment.width(),
        environment.height(),
        start.elapsed()
    );

    let mut snapshot = config.scene.to_snapshot(environment)?;
    let mut renderer = FrameRenderer::new(RenderSettings {
        parallel: config.parallel,
        ..Default::default()
    });

    let mut last_time = Instant::now();
    for tick in 0..config.frames {
        if let Some(period) = config.toggle_mode_every {
            if tick > 0 && tick % period == 0 {
                let mode = snapshot.mode.toggled();
                snapshot = snapshot.with_mode(mode);
                log::info!("Switched to {:?} mode", snapshot.mode);
            }
        }

        let frame = renderer.render(&snapshot, config.width, config.height);

        let now = Instant::now();
        let elapsed = now.duration_since(last_time).as_secs_f64();
        last_time = now;
        let fps = if elapsed > 0.0 { 1.0 / elapsed } else { 0.0 };
        log::info!("Frame {}: FPS: {:.2} | Rays: {}", tick, fps, frame.ray_count);
    }

    let stats = renderer.stats();
    log::info!(
        "{} frames rendered, {} served from cache",
        stats.frames_rendered,
        stats.cache_hits
    );

    Ok(renderer.render(&snapshot, config.width, config.height).clone())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Darkmoon viewer");

    let config = match std::env::args().nth(1) {
        Some(path) => ViewerConfig::load(Path::new(&path))?,
        None => ViewerConfig::default(),
    };

    let frame = run(&config)?;

    frame
        .buffer
        .to_image()
        .save(&config.output)
        .with_context(|| format!("Failed to save {}", config.output.display()))?;
    log::info!("Saved {}", config.output.display());

    Ok(())
}
