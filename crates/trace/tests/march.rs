use glam::Vec3;
use scene::Rgba;
use trace::march::{march, SURFACE_EPS};
use trace::{closest_hit, Primitive, Ray, Shape, Surface};

fn sphere_world(center: Vec3, radius: f32) -> Vec<Primitive> {
    vec![Primitive {
        shape: Shape::Sphere { center, radius },
        surface: Surface::Uniform(Rgba::new(0.5, 0.5, 0.5, 1.0)),
    }]
}

#[test]
fn march_matches_analytic_sphere_distance() {
    let prims = sphere_world(Vec3::new(0.5, -0.25, -4.0), 1.25);
    let ray = Ray::new(
        Vec3::new(0.0, 0.0, 2.0),
        Vec3::new(0.1, -0.05, -1.0).normalize(),
    );

    let analytic = closest_hit(&ray, &prims).unwrap();
    let marched = march(&ray, &prims).unwrap();

    // The marcher stops once the field drops below its surface epsilon, so
    // it may land a hair short of the analytic distance.
    assert!((marched.t - analytic.t).abs() < 20.0 * SURFACE_EPS);
}

#[test]
fn marched_normal_tracks_analytic_normal() {
    let prims = sphere_world(Vec3::new(0.0, 0.0, -5.0), 1.0);
    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.15, 0.1, -1.0).normalize());

    let analytic = closest_hit(&ray, &prims).unwrap();
    let marched = march(&ray, &prims).unwrap();

    let angle = marched.normal.dot(analytic.normal).clamp(-1.0, 1.0).acos();
    assert!(angle < 0.01, "normal off by {angle} rad");
}

#[test]
fn ray_past_everything_is_a_miss() {
    let prims = sphere_world(Vec3::new(0.0, 0.0, -5.0), 1.0);
    let ray = Ray::new(Vec3::ZERO, Vec3::Y);
    assert!(march(&ray, &prims).is_none());
}

#[test]
fn empty_scene_is_a_miss() {
    let ray = Ray::new(Vec3::ZERO, Vec3::Z);
    assert!(march(&ray, &[]).is_none());
}

#[test]
fn march_tags_the_nearest_primitive() {
    let mut prims = sphere_world(Vec3::new(0.0, 0.0, -3.0), 1.0);
    prims.push(Primitive {
        shape: Shape::Aabb {
            center: Vec3::new(0.0, 0.0, -10.0),
            half_extents: Vec3::splat(1.0),
        },
        surface: Surface::FaceColored,
    });
    let hit = march(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), &prims).unwrap();
    assert_eq!(hit.surface, Surface::Uniform(Rgba::new(0.5, 0.5, 0.5, 1.0)));
}
