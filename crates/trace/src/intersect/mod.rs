//! # Analytic Intersection Engine
//!
//! Closed-form ray/primitive intersection for spheres, boxes (axis-aligned
//! and rotated), and cones. Each test is a pure function of the ray and the
//! primitive parameters; [`closest_hit`] resolves the nearest positive hit
//! across a primitive list, with ties going to the first-registered
//! primitive.

mod cone;
mod slab;
mod sphere;

pub use cone::hit_cone;
pub use slab::{hit_aabb, hit_box};
pub use sphere::hit_sphere;

use glam::{Mat3, Vec3};

use crate::ray::{Hit, Ray, Surface};

/// Rotation matrix for Euler angles in degrees, applied in X, then Y, then Z
/// order. The inverse is the transpose.
#[must_use]
pub fn rotation_xyz(degrees: Vec3) -> Mat3 {
    let r = degrees * std::f32::consts::PI / 180.0;
    Mat3::from_rotation_z(r.z) * Mat3::from_rotation_y(r.y) * Mat3::from_rotation_x(r.x)
}

/// Geometry of one traceable primitive.
///
/// `Pyramid` has no closed-form test here; it is only reachable through the
/// signed-distance backend.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    Aabb {
        center: Vec3,
        half_extents: Vec3,
    },
    /// Oriented box; `rotation` columns are the box's local axes.
    Box {
        center: Vec3,
        half_extents: Vec3,
        rotation: Mat3,
    },
    /// Cone with apex at `apex` opening along unit `axis`. Hits are valid
    /// only where the axial projection falls inside `axial_range`
    /// (`f32::INFINITY` end for an untruncated infinite cone).
    Cone {
        apex: Vec3,
        axis: Vec3,
        half_angle_deg: f32,
        axial_range: (f32, f32),
    },
    /// Rectangular cone along `basis`'s forward column; SDF backend only.
    Pyramid {
        apex: Vec3,
        basis: Mat3,
        half_angle_h_deg: f32,
        half_angle_v_deg: f32,
        axial_range: (f32, f32),
    },
}

impl Shape {
    /// Oriented box from Euler angles in degrees (X, then Y, then Z).
    #[must_use]
    pub fn rotated_box(center: Vec3, half_extents: Vec3, rotation_deg: Vec3) -> Self {
        Self::Box {
            center,
            half_extents,
            rotation: rotation_xyz(rotation_deg),
        }
    }
}

/// A shape tagged with its shading surface.
#[derive(Debug, Clone, Copy)]
pub struct Primitive {
    pub shape: Shape,
    pub surface: Surface,
}

/// Closed-form intersection against one shape.
///
/// Returns `(t, point, normal)` for the nearest acceptable hit, or `None`
/// for a miss (and always `None` for [`Shape::Pyramid`], which has no
/// analytic test).
#[must_use]
pub fn hit_shape(ray: &Ray, shape: &Shape) -> Option<(f32, Vec3, Vec3)> {
    match *shape {
        Shape::Sphere { center, radius } => hit_sphere(ray, center, radius),
        Shape::Aabb {
            center,
            half_extents,
        } => hit_aabb(ray, center, half_extents),
        Shape::Box {
            center,
            half_extents,
            rotation,
        } => hit_box(ray, center, half_extents, &rotation),
        Shape::Cone {
            apex,
            axis,
            half_angle_deg,
            axial_range,
        } => hit_cone(ray, apex, axis, half_angle_deg, axial_range),
        Shape::Pyramid { .. } => None,
    }
}

/// Nearest positive hit across all primitives.
///
/// Strict `<` comparison keeps the first-registered primitive on an exact
/// tie.
#[must_use]
pub fn closest_hit(ray: &Ray, primitives: &[Primitive]) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for prim in primitives {
        if let Some((t, point, normal)) = hit_shape(ray, &prim.shape) {
            if best.map_or(true, |b| t < b.t) {
                best = Some(Hit {
                    t,
                    point,
                    normal,
                    surface: prim.surface,
                });
            }
        }
    }
    best
}
