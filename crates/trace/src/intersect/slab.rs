//! Ray-box intersection: slab method, plus the rotated-box wrapper.

use glam::{Mat3, Vec3};

use crate::ray::{Ray, SELF_HIT_EPS};

/// Direction components smaller than this are clamped (sign preserved) so
/// the per-axis division never produces NaN.
const DIR_EPS: f32 = 1e-8;

fn safe_recip(d: f32) -> f32 {
    let d = if d.abs() < DIR_EPS {
        DIR_EPS.copysign(d)
    } else {
        d
    };
    1.0 / d
}

/// Slab-method intersection against an axis-aligned box.
///
/// The normal is the unit axis along which the hit point's normalized offset
/// from the box center is largest, signed by that offset.
#[must_use]
pub fn hit_aabb(ray: &Ray, center: Vec3, half_extents: Vec3) -> Option<(f32, Vec3, Vec3)> {
    let min = center - half_extents;
    let max = center + half_extents;

    let mut t_entry = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let inv = safe_recip(ray.dir[axis]);
        let t0 = (min[axis] - ray.origin[axis]) * inv;
        let t1 = (max[axis] - ray.origin[axis]) * inv;
        let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        t_entry = t_entry.max(near);
        t_exit = t_exit.min(far);
    }

    if t_entry > t_exit || t_exit < 0.0 {
        return None;
    }

    // Entry point when outside, exit point when the origin is inside.
    let t = if t_entry > SELF_HIT_EPS { t_entry } else { t_exit };
    if t <= SELF_HIT_EPS {
        return None;
    }

    let point = ray.at(t);
    let offset = (point - center) / half_extents;
    let abs = offset.abs();
    let normal = if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::X * offset.x.signum()
    } else if abs.y >= abs.z {
        Vec3::Y * offset.y.signum()
    } else {
        Vec3::Z * offset.z.signum()
    };

    Some((t, point, normal))
}

/// Intersection against an oriented box.
///
/// The ray is carried into the box's local frame with the inverse
/// (transpose) rotation, tested against the axis-aligned slab, and the hit
/// point and normal are rotated back out.
#[must_use]
pub fn hit_box(
    ray: &Ray,
    center: Vec3,
    half_extents: Vec3,
    rotation: &Mat3,
) -> Option<(f32, Vec3, Vec3)> {
    let inverse = rotation.transpose();
    let local_ray = Ray::new(
        inverse * (ray.origin - center),
        inverse * ray.dir,
    );

    let (t, local_point, local_normal) = hit_aabb(&local_ray, Vec3::ZERO, half_extents)?;
    Some((t, *rotation * local_point + center, *rotation * local_normal))
}
