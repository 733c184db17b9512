//! Ray-cone intersection.

use glam::Vec3;

use crate::ray::{Ray, SELF_HIT_EPS};

/// Quadratic coefficient below this is treated as a ray parallel to the
/// cone surface.
const PARALLEL_EPS: f32 = 1e-8;

/// Intersect a ray with a cone whose apex sits at `apex`, opening along the
/// unit `axis` with the given half-angle.
///
/// The quadratic uses cos² of the half-angle as the separating constant and
/// is solved for the smallest positive root; roots on the mirror ("shadow")
/// cone behind the apex are rejected, as are roots whose axial projection
/// falls outside `axial_range`.
#[must_use]
pub fn hit_cone(
    ray: &Ray,
    apex: Vec3,
    axis: Vec3,
    half_angle_deg: f32,
    axial_range: (f32, f32),
) -> Option<(f32, Vec3, Vec3)> {
    let cos2 = half_angle_deg.to_radians().cos().powi(2);
    let oc = ray.origin - apex;

    let dv = ray.dir.dot(axis);
    let ov = oc.dot(axis);

    let a = dv * dv - cos2 * ray.dir.length_squared();
    let b = 2.0 * (dv * ov - cos2 * ray.dir.dot(oc));
    let c = ov * ov - cos2 * oc.length_squared();

    let mut candidates = [f32::NEG_INFINITY; 2];
    if a.abs() < PARALLEL_EPS {
        // Ray parallel to the cone surface: the quadratic degenerates to a
        // single linear root.
        if b.abs() < PARALLEL_EPS {
            return None;
        }
        candidates[0] = -c / b;
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let (t0, t1) = ((-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a));
        candidates = [t0.min(t1), t0.max(t1)];
    }

    for t in candidates {
        if t <= SELF_HIT_EPS {
            continue;
        }
        let point = ray.at(t);
        let axial = (point - apex).dot(axis);
        // Rejects the shadow cone (axial < 0) along with truncated spans.
        if axial < axial_range.0 || axial > axial_range.1 {
            continue;
        }
        let m = point - apex;
        // Outward surface gradient of (m.axis)^2 - cos^2 * |m|^2.
        let normal = (m * cos2 - axis * m.dot(axis)).try_normalize();
        return normal.map(|n| (t, point, n));
    }
    None
}
