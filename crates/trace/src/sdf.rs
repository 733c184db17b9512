//! # Signed-Distance Scene
//!
//! Per-primitive signed distance functions (negative inside, zero on the
//! surface) and the tagged scene minimum the ray marcher steps through.
//! Truncated shapes are built as intersections (`max`) of the base distance
//! with cap half-spaces, which keeps every function a safe Lipschitz-1 bound
//! for sphere tracing.

use glam::{Mat3, Vec2, Vec3};

use crate::intersect::{Primitive, Shape};

/// Exact distance to a sphere surface.
#[must_use]
pub fn sd_sphere(p: Vec3, center: Vec3, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Exact distance to an axis-aligned box.
#[must_use]
pub fn sd_aabb(p: Vec3, center: Vec3, half_extents: Vec3) -> f32 {
    let q = (p - center).abs() - half_extents;
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
}

/// Distance to an oriented box: the query point is carried into the box's
/// local frame with the transpose rotation.
#[must_use]
pub fn sd_box(p: Vec3, center: Vec3, half_extents: Vec3, rotation: &Mat3) -> f32 {
    let local = rotation.transpose() * (p - center);
    sd_aabb(local, Vec3::ZERO, half_extents)
}

/// Distance to a cone with apex at `apex` opening along unit `axis`,
/// truncated to `axial_range` along the axis.
#[must_use]
pub fn sd_cone(
    p: Vec3,
    apex: Vec3,
    axis: Vec3,
    half_angle_deg: f32,
    axial_range: (f32, f32),
) -> f32 {
    let (sin_a, cos_a) = half_angle_deg.to_radians().sin_cos();
    let m = p - apex;
    let h = m.dot(axis);
    let r = (m - axis * h).length();

    // 2D problem in (radial, axial): the cone edge is the line through the
    // origin with direction (sin, cos).
    let q = Vec2::new(r, h);
    let edge = Vec2::new(sin_a, cos_a);
    let along = q.dot(edge);
    let body = if along < 0.0 {
        // Closest feature is the apex itself.
        q.length()
    } else {
        // Signed: positive outside the surface, negative inside.
        r * cos_a - h * sin_a
    };

    body.max(axial_range.0 - h).max(h - axial_range.1)
}

/// Distance bound for a rectangular pyramid: intersection of the four side
/// planes through the apex with the axial caps. Exact inside, conservative
/// near the edges.
#[must_use]
pub fn sd_pyramid(
    p: Vec3,
    apex: Vec3,
    basis: &Mat3,
    half_angle_h_deg: f32,
    half_angle_v_deg: f32,
    axial_range: (f32, f32),
) -> f32 {
    let local = basis.transpose() * (p - apex);

    let (sin_h, cos_h) = half_angle_h_deg.to_radians().sin_cos();
    let (sin_v, cos_v) = half_angle_v_deg.to_radians().sin_cos();

    // Outward normals of the four side planes in the local frame (axis = +Z).
    let sides = (local.x * cos_h - local.z * sin_h)
        .max(-local.x * cos_h - local.z * sin_h)
        .max(local.y * cos_v - local.z * sin_v)
        .max(-local.y * cos_v - local.z * sin_v);

    sides
        .max(axial_range.0 - local.z)
        .max(local.z - axial_range.1)
}

/// Distance to one primitive's shape.
#[must_use]
pub fn shape_distance(shape: &Shape, p: Vec3) -> f32 {
    match *shape {
        Shape::Sphere { center, radius } => sd_sphere(p, center, radius),
        Shape::Aabb {
            center,
            half_extents,
        } => sd_aabb(p, center, half_extents),
        Shape::Box {
            center,
            half_extents,
            rotation,
        } => sd_box(p, center, half_extents, &rotation),
        Shape::Cone {
            apex,
            axis,
            half_angle_deg,
            axial_range,
        } => sd_cone(p, apex, axis, half_angle_deg, axial_range),
        Shape::Pyramid {
            apex,
            basis,
            half_angle_h_deg,
            half_angle_v_deg,
            axial_range,
        } => sd_pyramid(p, apex, &basis, half_angle_h_deg, half_angle_v_deg, axial_range),
    }
}

/// Scene distance: the minimum over all primitives, tagged with the index of
/// the primitive that produced it (the material). `None` for an empty scene.
#[must_use]
pub fn scene_distance(primitives: &[Primitive], p: Vec3) -> Option<(f32, usize)> {
    let mut best: Option<(f32, usize)> = None;
    for (index, prim) in primitives.iter().enumerate() {
        let d = shape_distance(&prim.shape, p);
        if best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, index));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_distance_signs() {
        assert!((sd_sphere(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO, 1.0) - 2.0).abs() < 1e-6);
        assert!(sd_sphere(Vec3::ZERO, Vec3::ZERO, 1.0) < 0.0);
        assert!(sd_sphere(Vec3::X, Vec3::ZERO, 1.0).abs() < 1e-6);
    }

    #[test]
    fn box_distance_matches_face_and_corner() {
        let half = Vec3::splat(1.0);
        assert!((sd_aabb(Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO, half) - 1.0).abs() < 1e-6);
        let corner = sd_aabb(Vec3::new(2.0, 2.0, 2.0), Vec3::ZERO, half);
        assert!((corner - 3.0_f32.sqrt()).abs() < 1e-6);
        assert!(sd_aabb(Vec3::ZERO, Vec3::ZERO, half) < 0.0);
    }

    #[test]
    fn cone_distance_signs() {
        let range = (0.0, f32::INFINITY);
        // On the axis, inside.
        assert!(sd_cone(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, Vec3::Z, 45.0, range) < 0.0);
        // Perpendicular to the axis at the apex plane, outside.
        assert!(sd_cone(Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO, Vec3::Z, 45.0, range) > 0.0);
        // Behind the apex the closest feature is the apex.
        let behind = sd_cone(Vec3::new(0.0, 0.0, -3.0), Vec3::ZERO, Vec3::Z, 45.0, range);
        assert!((behind - 3.0).abs() < 1e-5);
    }

    #[test]
    fn truncation_caps_cut_the_cone() {
        // Inside the infinite cone but short of the near cut.
        let d = sd_cone(Vec3::new(0.0, 0.0, 0.5), Vec3::ZERO, Vec3::Z, 45.0, (1.0, 3.0));
        assert!(d > 0.0);
        let d = sd_cone(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, Vec3::Z, 45.0, (1.0, 3.0));
        assert!(d < 0.0);
    }

    #[test]
    fn pyramid_interior_is_negative() {
        let basis = Mat3::IDENTITY;
        let d = sd_pyramid(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, &basis, 30.0, 25.0, (0.0, 3.0));
        assert!(d < 0.0);
        let d = sd_pyramid(Vec3::new(5.0, 0.0, 2.0), Vec3::ZERO, &basis, 30.0, 25.0, (0.0, 3.0));
        assert!(d > 0.0);
    }
}
