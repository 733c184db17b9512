//! # Sphere-Tracing Ray Marcher
//!
//! Advances along the ray by the scene's signed distance at each step, so it
//! can never overshoot the nearest surface. Normals come from a six-sample
//! central-difference gradient of the scene distance.

use glam::Vec3;

use crate::intersect::Primitive;
use crate::ray::{Hit, Ray};
use crate::sdf::scene_distance;

/// Iteration cap for one ray.
pub const MAX_STEPS: u32 = 128;
/// Distance below which the marcher reports a surface hit.
pub const SURFACE_EPS: f32 = 1e-4;
/// Travel distance past which the ray is a miss.
pub const MAX_TRAVEL: f32 = 100.0;
/// Step used for the central-difference normal estimate.
const NORMAL_EPS: f32 = 1e-3;

/// March a ray through the scene distance field.
///
/// Returns the first point where the field drops below [`SURFACE_EPS`],
/// tagged with the surface of the primitive that produced the minimum, or
/// `None` once the ray has travelled [`MAX_TRAVEL`] or the step budget runs
/// out.
#[must_use]
pub fn march(ray: &Ray, primitives: &[Primitive]) -> Option<Hit> {
    let mut travelled = 0.0_f32;
    for _ in 0..MAX_STEPS {
        let point = ray.at(travelled);
        let (d, index) = scene_distance(primitives, point)?;
        if d < SURFACE_EPS {
            return Some(Hit {
                t: travelled,
                point,
                normal: estimate_normal(primitives, point),
                surface: primitives[index].surface,
            });
        }
        travelled += d;
        if travelled > MAX_TRAVEL {
            return None;
        }
    }
    None
}

/// Central-difference gradient of the scene distance, normalized.
///
/// Falls back to world up when the gradient degenerates (e.g. exactly at a
/// symmetric interior point).
#[must_use]
pub fn estimate_normal(primitives: &[Primitive], p: Vec3) -> Vec3 {
    let d = |q: Vec3| scene_distance(primitives, q).map_or(0.0, |(dist, _)| dist);
    let gradient = Vec3::new(
        d(p + Vec3::X * NORMAL_EPS) - d(p - Vec3::X * NORMAL_EPS),
        d(p + Vec3::Y * NORMAL_EPS) - d(p - Vec3::Y * NORMAL_EPS),
        d(p + Vec3::Z * NORMAL_EPS) - d(p - Vec3::Z * NORMAL_EPS),
    );
    gradient.try_normalize().unwrap_or(Vec3::Y)
}
