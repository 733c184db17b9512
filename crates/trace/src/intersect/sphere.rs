//! Ray-sphere intersection.

use glam::Vec3;

use crate::ray::{Ray, SELF_HIT_EPS};

/// Solve the quadratic for a ray against a sphere.
///
/// Returns the smallest root greater than [`SELF_HIT_EPS`], so a ray
/// starting on (or just inside) the surface does not re-hit its own origin.
/// The normal always points out of the sphere.
#[must_use]
pub fn hit_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<(f32, Vec3, Vec3)> {
    let oc = ray.origin - center;
    let a = ray.dir.length_squared();
    let b = 2.0 * oc.dot(ray.dir);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t_near = (-b - sqrt_d) / (2.0 * a);
    let t_far = (-b + sqrt_d) / (2.0 * a);

    let t = if t_near > SELF_HIT_EPS {
        t_near
    } else if t_far > SELF_HIT_EPS {
        t_far
    } else {
        return None;
    };

    let point = ray.at(t);
    let normal = (point - center) / radius;
    Some((t, point, normal))
}
