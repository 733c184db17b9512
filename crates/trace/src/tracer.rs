//! # Shading and Recursive Tracing
//!
//! Single fixed light, Phong-style shading, and bounded mirror recursion.
//! One [`Tracer`] borrows a frame's world and answers color queries for the
//! rays the screen controller generates.

use glam::Vec3;

use scene::{RenderMode, Rgba};

use crate::intersect::closest_hit;
use crate::march::march;
use crate::ray::{Hit, Ray, Surface};
use crate::world::TraceWorld;

/// Color returned when a ray escapes the scene.
pub const BACKGROUND: Rgba = Rgba::new(0.12, 0.12, 0.14, 1.0);

const AMBIENT: f32 = 0.25;
const DIFFUSE: f32 = 0.75;
const SPECULAR_STRENGTH: f32 = 0.5;
const SPECULAR_EXPONENT: i32 = 32;
/// Weight of the recursively traced mirror color when blending.
const REFLECT_WEIGHT: f32 = 0.3;
/// Offset along the normal applied to reflection origins.
const REFLECT_BIAS: f32 = 1e-3;

/// Fixed scene light direction (toward the light).
fn light_dir() -> Vec3 {
    Vec3::new(0.5, 0.8, 0.3).normalize()
}

/// The six fixed face colors of the reference cube, keyed by world axis.
/// Deliberately world-axis keyed even for a rotated cube.
const FACE_COLORS: [(Vec3, Rgba); 6] = [
    (Vec3::X, Rgba::new(1.0, 0.0, 0.0, 1.0)),
    (Vec3::NEG_X, Rgba::new(0.0, 1.0, 0.0, 1.0)),
    (Vec3::Y, Rgba::new(0.0, 0.0, 1.0, 1.0)),
    (Vec3::NEG_Y, Rgba::new(1.0, 1.0, 0.0, 1.0)),
    (Vec3::Z, Rgba::new(1.0, 0.0, 1.0, 1.0)),
    (Vec3::NEG_Z, Rgba::new(0.0, 1.0, 1.0, 1.0)),
];

/// Pick the face color whose world axis best matches the normal.
#[must_use]
pub fn face_color(normal: Vec3) -> Rgba {
    let mut best = FACE_COLORS[0].1;
    let mut best_dot = f32::NEG_INFINITY;
    for (axis, color) in FACE_COLORS {
        let d = normal.dot(axis);
        if d > best_dot {
            best_dot = d;
            best = color;
        }
    }
    best
}

/// Mirror `d` about the unit normal `n`.
#[must_use]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Which hit-finding backend a mode uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Analytic,
    Sdf,
}

/// Per-frame tracing parameters derived from the screen's render mode.
#[derive(Debug, Clone, Copy)]
pub struct TraceOptions {
    pub backend: Backend,
    pub reflective: bool,
    pub specular: bool,
    pub max_bounces: u32,
}

impl TraceOptions {
    /// Map a render mode onto backend and shading switches.
    ///
    /// `Simple` has no ray path at all; callers should not build options for
    /// it, but mapping it to a non-reflective analytic trace keeps this
    /// total.
    #[must_use]
    pub fn for_mode(mode: RenderMode, max_bounces: u32) -> Self {
        let backend = if mode == RenderMode::RayMarch {
            Backend::Sdf
        } else {
            Backend::Analytic
        };
        Self {
            backend,
            reflective: mode.is_reflective(),
            // The marching backend carries the specular highlight.
            specular: backend == Backend::Sdf,
            max_bounces,
        }
    }
}

/// Borrowing tracer for one frame.
pub struct Tracer<'a> {
    world: &'a TraceWorld,
    options: TraceOptions,
}

impl<'a> Tracer<'a> {
    #[must_use]
    pub const fn new(world: &'a TraceWorld, options: TraceOptions) -> Self {
        Self { world, options }
    }

    /// Color for one primary ray.
    #[must_use]
    pub fn trace(&self, ray: &Ray) -> Rgba {
        self.cast(ray, 0)
    }

    fn find_hit(&self, ray: &Ray) -> Option<Hit> {
        match self.options.backend {
            Backend::Analytic => closest_hit(ray, &self.world.primitives),
            Backend::Sdf => march(ray, &self.world.primitives),
        }
    }

    fn cast(&self, ray: &Ray, depth: u32) -> Rgba {
        match self.find_hit(ray) {
            None => BACKGROUND,
            Some(hit) => self.shade(ray, &hit, depth),
        }
    }

    fn shade(&self, ray: &Ray, hit: &Hit, depth: u32) -> Rgba {
        let base = match hit.surface {
            Surface::Uniform(color) => color,
            Surface::FaceColored => face_color(hit.normal),
        };

        let n_dot_l = hit.normal.dot(light_dir()).max(0.0);
        let mut color = base.scaled(AMBIENT + DIFFUSE * n_dot_l);

        if self.options.specular {
            let view = -ray.dir.normalize_or_zero();
            let bounce = reflect(-light_dir(), hit.normal);
            let highlight = bounce.dot(view).max(0.0).powi(SPECULAR_EXPONENT);
            let white = Rgba::new(1.0, 1.0, 1.0, 1.0);
            color = color.added(white.scaled(SPECULAR_STRENGTH * highlight));
        }

        if self.options.reflective && depth < self.options.max_bounces {
            let mirrored = Ray::new(
                hit.point + hit.normal * REFLECT_BIAS,
                reflect(ray.dir, hit.normal),
            );
            let bounced = self.cast(&mirrored, depth + 1);
            color = color.mixed(bounced, REFLECT_WEIGHT);
        }

        color
    }
}
