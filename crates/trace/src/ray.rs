//! Ray and hit value types.

use glam::Vec3;
use scene::Rgba;

/// Hits closer than this are treated as self-intersection at the origin.
pub const SELF_HIT_EPS: f32 = 1e-4;

/// A half-line in world space. `dir` is expected to be unit length; the
/// camera layer normalizes before handing rays in.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[must_use]
    pub const fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// Point at parametric distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// How a primitive resolves its base color when shaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// One flat color for the whole primitive.
    Uniform(Rgba),
    /// The reference cube: one of six fixed colors chosen by the world axis
    /// closest to the surface normal.
    FaceColored,
}

/// Result of a successful intersection or march.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
    pub surface: Surface,
}
