//! The virtual camera: basis derivation and per-pixel ray generation.

use glam::{Mat3, Vec3};

use scene::{Projection, Scene};
use trace::{orientation_basis, Ray};

/// Second camera living at the sphere center, aimed along the directional
/// vector.
///
/// The basis is cached and tracks the vector live: any direction or roll
/// change invalidates it, and [`VirtualCamera::sync`] rebuilds it before the
/// next frame. The field of view is the cone half-angle doubled, applied to
/// both image axes independently of the interactive viewport camera.
#[derive(Debug, Clone)]
pub struct VirtualCamera {
    position: Vec3,
    direction: Vec3,
    roll_deg: f32,
    projection: Projection,
    half_angle_deg: f32,
    ortho_half_width: f32,
    ortho_half_height: f32,
    basis: Mat3,
    basis_stale: bool,
}

impl VirtualCamera {
    #[must_use]
    pub fn new(scene: &Scene) -> Self {
        let mut camera = Self {
            position: scene.sphere.position,
            direction: scene.vector.direction,
            roll_deg: scene.vector.roll_deg,
            projection: scene.screen.projection,
            half_angle_deg: scene.cone.half_angle_deg,
            ortho_half_width: scene.screen.width * 0.5,
            ortho_half_height: scene.screen.height * 0.5,
            basis: Mat3::IDENTITY,
            basis_stale: true,
        };
        camera.sync(scene);
        camera
    }

    /// Mark the cached basis stale; the next [`VirtualCamera::sync`]
    /// recomputes it.
    pub fn invalidate_basis(&mut self) {
        self.basis_stale = true;
    }

    /// Pull current values from the scene and rebuild the basis if the
    /// direction or roll moved (or it was explicitly invalidated).
    pub fn sync(&mut self, scene: &Scene) {
        self.position = scene.sphere.position;
        self.projection = scene.screen.projection;
        self.half_angle_deg = scene.cone.half_angle_deg;
        self.ortho_half_width = scene.screen.width * 0.5;
        self.ortho_half_height = scene.screen.height * 0.5;

        let direction = scene.vector.direction;
        let roll = scene.vector.roll_deg;
        let moved = (direction - self.direction).length_squared() > 0.0
            || (roll - self.roll_deg).abs() > 0.0;
        if self.basis_stale || moved {
            self.direction = direction;
            self.roll_deg = roll;
            self.basis = orientation_basis(direction, roll);
            self.basis_stale = false;
        }
    }

    #[must_use]
    pub const fn basis(&self) -> Mat3 {
        self.basis
    }

    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Primary ray for the pixel at `(px, py)` in an image of `resolution`
    /// columns x rows. `jitter` shifts the sample inside the pixel footprint
    /// (zero hits the pixel center).
    ///
    /// Pixel centers map to normalized device coordinates in [-1, 1], with
    /// +v up. Perspective rays fan out of the camera position; orthographic
    /// rays share the forward direction and offset their origin across the
    /// screen plane.
    #[must_use]
    pub fn primary_ray(&self, px: u32, py: u32, resolution: [u32; 2], jitter: (f32, f32)) -> Ray {
        let u = ((px as f32 + 0.5 + jitter.0) / resolution[0] as f32) * 2.0 - 1.0;
        let v = 1.0 - ((py as f32 + 0.5 + jitter.1) / resolution[1] as f32) * 2.0;

        let right = self.basis.x_axis;
        let up = self.basis.y_axis;
        let forward = self.basis.z_axis;

        match self.projection {
            Projection::Perspective => {
                let half = self.half_angle_deg.to_radians().tan();
                let dir = (forward + right * (u * half) + up * (v * half)).normalize();
                Ray::new(self.position, dir)
            }
            Projection::Orthographic => {
                let origin = self.position
                    + right * (u * self.ortho_half_width)
                    + up * (v * self.ortho_half_height);
                Ray::new(origin, forward)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene::ScenePatch;

    fn scene_looking_along_z() -> Scene {
        let mut scene = Scene::default();
        scene.apply(ScenePatch::VectorDirection(Vec3::Z));
        scene.apply(ScenePatch::ConeHalfAngle(45.0));
        scene
    }

    #[test]
    fn center_pixel_looks_forward() {
        let scene = scene_looking_along_z();
        let camera = VirtualCamera::new(&scene);
        // Odd resolution puts a pixel center exactly on the axis.
        let ray = camera.primary_ray(10, 10, [21, 21], (0.0, 0.0));
        assert!((ray.dir - Vec3::Z).length() < 1e-5);
        assert!((ray.origin - scene.sphere.position).length() < 1e-6);
    }

    #[test]
    fn fov_comes_from_the_cone_half_angle() {
        let scene = scene_looking_along_z();
        let camera = VirtualCamera::new(&scene);
        // At u = 1 the lateral component equals tan(45 deg) = 1.
        let ray = camera.primary_ray(0, 10, [21, 21], (-0.5, 0.0));
        let lateral = ray.dir.dot(camera.basis().x_axis).abs();
        let axial = ray.dir.dot(camera.basis().z_axis);
        assert!((lateral / axial - 1.0).abs() < 1e-4);
    }

    #[test]
    fn orthographic_rays_share_direction_and_spread_origins() {
        let mut scene = scene_looking_along_z();
        scene.apply(ScenePatch::ScreenProjection(Projection::Orthographic));
        let camera = VirtualCamera::new(&scene);

        let a = camera.primary_ray(0, 5, [11, 11], (0.0, 0.0));
        let b = camera.primary_ray(10, 5, [11, 11], (0.0, 0.0));
        assert!((a.dir - b.dir).length() < 1e-6);
        assert!((a.origin - b.origin).length() > 1e-3);
    }

    #[test]
    fn basis_tracks_direction_changes() {
        let mut scene = scene_looking_along_z();
        let mut camera = VirtualCamera::new(&scene);
        let before = camera.basis();

        scene.apply(ScenePatch::VectorDirection(Vec3::X));
        camera.sync(&scene);
        let after = camera.basis();
        assert!((after.z_axis - Vec3::X).length() < 1e-6);
        assert!((before.z_axis - after.z_axis).length() > 0.5);
    }
}
