//! # Screen Controller
//!
//! Owns the virtual camera, the framebuffer, the dirty flag, and the
//! update-rate throttle. All scene mutation from the host goes through
//! [`ScreenController::apply`], which is where dirty propagation and the
//! vector-change notification happen.

use std::path::{Path, PathBuf};
use std::time::Instant;

use glam::Vec3;

use scene::{RenderMode, Rgba, Scene, ScenePatch};
use trace::{FrameContext, TraceOptions, TraceWorld, Tracer};

use crate::camera::VirtualCamera;
use crate::error::ScreenError;
use crate::framebuffer::{Framebuffer, Rgb8};

/// Callback fired when the directional vector or its roll changes, so the
/// host can keep its own indicator in sync.
pub type VectorListener = Box<dyn FnMut(Vec3, f32)>;

pub struct ScreenController {
    camera: VirtualCamera,
    framebuffer: Framebuffer,
    dirty: bool,
    dragging: bool,
    last_render: Option<Instant>,
    on_vector_change: Option<VectorListener>,
    rng: fastrand::Rng,
}

impl ScreenController {
    #[must_use]
    pub fn new(scene: &Scene) -> Self {
        let [width, height] = scene.screen.resolution;
        Self {
            camera: VirtualCamera::new(scene),
            framebuffer: Framebuffer::new(width, height),
            dirty: true,
            dragging: false,
            last_render: None,
            on_vector_change: None,
            rng: fastrand::Rng::with_seed(0x5eed),
        }
    }

    /// Route one mutation through the scene's clamping boundary, then update
    /// controller state: mark dirty when the image is affected, invalidate
    /// the camera basis and notify the host when the vector moved.
    ///
    /// Returns whether the patch invalidated the screen image.
    pub fn apply(&mut self, scene: &mut Scene, patch: ScenePatch) -> bool {
        // Re-entering the current mode is a no-op by contract.
        if let ScenePatch::ScreenMode(mode) = patch {
            if scene.screen.mode == mode {
                return false;
            }
        }

        let invalidated = scene.apply(patch);

        if patch.moves_camera_basis() {
            self.camera.invalidate_basis();
            if let Some(listener) = &mut self.on_vector_change {
                listener(scene.vector.direction, scene.vector.roll_deg);
            }
        }
        if matches!(patch, ScenePatch::ScreenMode(_)) {
            self.camera.invalidate_basis();
        }
        if invalidated {
            self.dirty = true;
        }
        invalidated
    }

    /// Switch render mode. Idempotent: re-setting the current mode changes
    /// nothing, switching marks the screen dirty and refreshes the basis.
    pub fn set_mode(&mut self, scene: &mut Scene, mode: RenderMode) {
        self.apply(scene, ScenePatch::ScreenMode(mode));
    }

    /// Register the host's vector-change notification hook.
    pub fn set_vector_listener(&mut self, listener: VectorListener) {
        self.on_vector_change = Some(listener);
    }

    /// While dragging, the throttle is bypassed so the screen follows every
    /// frame.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Re-orient the directional vector from a mouse drag. Horizontal
    /// deltas yaw around world up, vertical deltas pitch, with pitch held
    /// shy of the poles so the basis fallback never engages mid-drag.
    pub fn drag_vector(&mut self, scene: &mut Scene, dx: f32, dy: f32) {
        const DEGREES_PER_UNIT: f32 = 0.5;

        let dir = scene.vector.direction;
        let yaw = dir.z.atan2(dir.x).to_degrees() + dx * DEGREES_PER_UNIT;
        let pitch = (dir.y.clamp(-1.0, 1.0).asin().to_degrees() - dy * DEGREES_PER_UNIT)
            .clamp(-89.0, 89.0);

        let (yaw_r, pitch_r) = (yaw.to_radians(), pitch.to_radians());
        let reoriented = Vec3::new(
            pitch_r.cos() * yaw_r.cos(),
            pitch_r.sin(),
            pitch_r.cos() * yaw_r.sin(),
        );
        self.apply(scene, ScenePatch::VectorDirection(reoriented));
    }

    /// Force a re-render on the next frame. Used by hosts after swapping the
    /// scene wholesale (document load, "new scene"), which bypasses the
    /// patch boundary.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.camera.invalidate_basis();
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub const fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Latest rendered pixels, row-major RGB bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    /// Re-render only when needed: the screen must be enabled, and either
    /// the dirty flag is set, the user is dragging, or the configured update
    /// interval has elapsed since the last render.
    ///
    /// Returns whether a frame was rendered.
    pub fn maybe_render(&mut self, scene: &Scene, ctx: &FrameContext) -> bool {
        if !scene.screen.enabled {
            return false;
        }
        let elapsed_enough = self.last_render.map_or(true, |at| {
            at.elapsed().as_secs_f32() >= scene.screen.update_rate
        });
        if self.dirty || self.dragging || elapsed_enough {
            self.render_now(scene, ctx);
            true
        } else {
            false
        }
    }

    /// Render one frame unconditionally and clear the dirty flag.
    ///
    /// The whole pixel loop runs to completion here, synchronously; there is
    /// no partial frame to observe.
    pub fn render_now(&mut self, scene: &Scene, ctx: &FrameContext) {
        let started = Instant::now();
        let [width, height] = scene.screen.resolution;
        self.framebuffer.resize(width, height);
        self.camera.sync(scene);

        let mode = scene.screen.mode;
        if mode.is_ray_based() {
            let world = TraceWorld::from_scene(scene, ctx);
            let options = TraceOptions::for_mode(mode, scene.screen.max_bounces);
            let tracer = Tracer::new(&world, options);
            let samples = if mode == RenderMode::PathTrace {
                scene.screen.samples
            } else {
                1
            };

            for y in 0..height {
                for x in 0..width {
                    let color = self.sample_pixel(&tracer, x, y, [width, height], samples);
                    self.framebuffer.put(x, y, Rgb8::from(color.to_rgb8()));
                }
            }
        } else {
            // Simple mode: the host rasterizes the quad itself; the buffer
            // just holds the background.
            self.framebuffer
                .fill(Rgb8::from(trace::tracer::BACKGROUND.to_rgb8()));
        }

        self.dirty = false;
        self.last_render = Some(started);
        tracing::debug!(
            mode = mode.as_str(),
            width,
            height,
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "virtual screen frame"
        );
    }

    fn sample_pixel(
        &mut self,
        tracer: &Tracer<'_>,
        x: u32,
        y: u32,
        resolution: [u32; 2],
        samples: u32,
    ) -> Rgba {
        let mut accumulated = Rgba::new(0.0, 0.0, 0.0, 1.0);
        for sample in 0..samples {
            // First sample stays on the pixel center so one-sample modes
            // are deterministic.
            let jitter = if sample == 0 {
                (0.0, 0.0)
            } else {
                (self.rng.f32() - 0.5, self.rng.f32() - 0.5)
            };
            let ray = self.camera.primary_ray(x, y, resolution, jitter);
            accumulated = accumulated.added(tracer.trace(&ray));
        }
        accumulated.scaled(1.0 / samples as f32)
    }

    /// Save the latest frame under `dir` with a timestamped file name.
    ///
    /// # Errors
    /// Returns [`ScreenError`] when the image cannot be written.
    pub fn capture(&self, dir: &Path) -> Result<PathBuf, ScreenError> {
        let name = format!("screen-{}.png", chrono::Local::now().format("%Y%m%d-%H%M%S"));
        let path = dir.join(name);
        self.framebuffer.save_png(&path)?;
        tracing::info!("captured virtual screen to {}", path.display());
        Ok(path)
    }
}
