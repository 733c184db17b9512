#![deny(clippy::all, clippy::pedantic)]
//! Headless driver for the virtual screen renderer.
//!
//! Stands in for the interactive shell: loads a scene document, applies any
//! command-line overrides through the controller, renders one frame of the
//! virtual screen, and writes it out as a PNG.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::Vec3;

use scene::{RenderMode, Scene, ScenePatch};
use screen::ScreenController;
use trace::FrameContext;

#[derive(Parser)]
#[command(
    name = "runtime_main",
    about = "Render the sphere scene's virtual screen to a PNG"
)]
struct Args {
    /// Scene document (JSON). A built-in demo scene is used when omitted.
    scene: Option<PathBuf>,

    /// Output file. A timestamped name in the working directory when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render mode override: simple, raytracing, pathtracing, pbr or
    /// raymarching.
    #[arg(short, long)]
    mode: Option<String>,

    /// Output resolution override, e.g. 320x240.
    #[arg(short, long)]
    resolution: Option<String>,

    /// Also save the (possibly clamped) effective scene document here.
    #[arg(long)]
    save_scene: Option<PathBuf>,
}

fn parse_resolution(spec: &str) -> Result<[u32; 2]> {
    let Some((w, h)) = spec.split_once('x') else {
        bail!("resolution must look like 320x240, got {spec:?}");
    };
    Ok([
        w.parse().with_context(|| format!("bad width {w:?}"))?,
        h.parse().with_context(|| format!("bad height {h:?}"))?,
    ])
}

/// Scene used when no document is given: cone and cuboid on, camera aimed at
/// the reference cube so the image has something to show.
fn demo_scene() -> Scene {
    let mut scene = Scene::default();
    for patch in [
        ScenePatch::ScreenEnabled(true),
        ScenePatch::ScreenMode(RenderMode::RayTrace),
        ScenePatch::ScreenResolution([320, 240]),
        ScenePatch::ConeEnabled(true),
        ScenePatch::CuboidEnabled(true),
        ScenePatch::VectorEnabled(true),
        ScenePatch::VectorDirection(Vec3::new(1.0, 0.0, 1.0)),
    ] {
        scene.apply(patch);
    }
    scene
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut scene = match &args.scene {
        Some(path) => Scene::load_json(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => demo_scene(),
    };

    let mut controller = ScreenController::new(&scene);
    controller.apply(&mut scene, ScenePatch::ScreenEnabled(true));
    if let Some(mode) = &args.mode {
        controller.apply(
            &mut scene,
            ScenePatch::ScreenMode(RenderMode::from_str_lossy(mode)),
        );
    }
    if let Some(spec) = &args.resolution {
        controller.apply(
            &mut scene,
            ScenePatch::ScreenResolution(parse_resolution(spec)?),
        );
    }

    let ctx = FrameContext::default();
    let started = Instant::now();
    controller.render_now(&scene, &ctx);
    let [width, height] = scene.screen.resolution;
    tracing::info!(
        "rendered {}x{} ({}) in {:.1} ms",
        width,
        height,
        scene.screen.mode.as_str(),
        started.elapsed().as_secs_f64() * 1e3
    );

    let written = match &args.output {
        Some(path) => {
            controller.framebuffer().save_png(path)?;
            path.clone()
        }
        None => controller.capture(Path::new("."))?,
    };
    tracing::info!("wrote {}", written.display());

    if let Some(path) = &args.save_scene {
        scene
            .save_json(path)
            .with_context(|| format!("failed to save scene {}", path.display()))?;
        tracing::info!("saved scene document to {}", path.display());
    }

    Ok(())
}
