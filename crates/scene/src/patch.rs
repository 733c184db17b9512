//! Single mutation boundary for the scene aggregate.
//!
//! Every UI-facing setter is a [`ScenePatch`] variant; [`Scene::apply`] is
//! the one place where values are clamped into their valid ranges, meshes are
//! regenerated, and screen invalidation is decided. Call sites never mutate
//! scene fields directly.

use glam::Vec3;

use crate::types::{Projection, RenderMode, Rgba, Scene};

/// Valid range for sphere tessellation resolutions.
pub const RESOLUTION_RANGE: (u32, u32) = (4, 64);
/// Valid range for cone/pyramid half-angles in degrees.
pub const HALF_ANGLE_RANGE: (f32, f32) = (5.0, 89.0);
/// Valid range for the near-plane distance in sphere-radius units.
pub const NEAR_PLANE_RANGE: (f32, f32) = (0.0, 3.0);
/// Lower bound for the screen update rate in seconds.
pub const MIN_UPDATE_RATE: f32 = 0.1;

/// One field mutation. Covers every setter in the external interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenePatch {
    SphereRadius(f32),
    SpherePosition(Vec3),
    SphereRotation(Vec3),
    SphereScale(Vec3),
    SphereColor(Rgba),
    SphereTransparency(f32),
    SphereWireframe(bool),
    SphereLighting(bool),
    SphereResolution(u32),
    SphereWireframeResolution(u32),

    VectorEnabled(bool),
    /// Renormalized on apply; zero-length input is ignored.
    VectorDirection(Vec3),
    VectorLength(f32),
    VectorColor(Rgba),
    VectorThickness(f32),
    /// Wrapped into [0, 360).
    VectorRoll(f32),
    OrientationEnabled(bool),
    OrientationLength(f32),
    OrientationColor(Rgba),
    OrientationThickness(f32),

    ConeEnabled(bool),
    ConeInfinite(bool),
    ConeLength(f32),
    ConeHalfAngle(f32),
    ConeColor(Rgba),

    PyramidEnabled(bool),
    PyramidInfinite(bool),
    PyramidLength(f32),
    PyramidHalfAngleH(f32),
    PyramidHalfAngleV(f32),
    PyramidColor(Rgba),

    CuboidEnabled(bool),
    CuboidInfinite(bool),
    CuboidDimensions(Vec3),
    CuboidColor(Rgba),

    NearPlaneEnabled(bool),
    NearPlaneDistance(f32),

    ScreenEnabled(bool),
    ScreenMode(RenderMode),
    ScreenProjection(Projection),
    ScreenPosition(Vec3),
    ScreenRotation(Vec3),
    ScreenWidth(f32),
    ScreenHeight(f32),
    ScreenResolution([u32; 2]),
    ScreenSamples(u32),
    ScreenMaxBounces(u32),
    ScreenUpdateRate(f32),
}

impl ScenePatch {
    /// Whether applying this patch changes the virtual screen's image.
    ///
    /// Quad placement (screen position/rotation) and purely rasterizer-side
    /// appearance (wireframe flag, mesh resolutions, line thickness) do not.
    #[must_use]
    pub const fn invalidates_screen(&self) -> bool {
        !matches!(
            self,
            Self::SphereRotation(_)
                | Self::SphereScale(_)
                | Self::SphereColor(_)
                | Self::SphereTransparency(_)
                | Self::SphereWireframe(_)
                | Self::SphereLighting(_)
                | Self::SphereResolution(_)
                | Self::SphereWireframeResolution(_)
                | Self::VectorColor(_)
                | Self::VectorThickness(_)
                | Self::VectorLength(_)
                | Self::OrientationEnabled(_)
                | Self::OrientationLength(_)
                | Self::OrientationColor(_)
                | Self::OrientationThickness(_)
                | Self::ScreenPosition(_)
                | Self::ScreenRotation(_)
        )
    }

    /// Whether this patch moves the virtual camera basis (direction or roll).
    #[must_use]
    pub const fn moves_camera_basis(&self) -> bool {
        matches!(self, Self::VectorDirection(_) | Self::VectorRoll(_))
    }
}

impl Scene {
    /// Apply one mutation, clamping out-of-range values at this boundary.
    ///
    /// Returns `true` when the change invalidates the virtual screen image
    /// (the caller marks its dirty flag from this). Degenerate input that
    /// cannot be clamped (a zero-length direction) is dropped and reported as
    /// a no-op.
    #[allow(clippy::too_many_lines)]
    pub fn apply(&mut self, patch: ScenePatch) -> bool {
        use ScenePatch as P;

        match patch {
            P::SphereRadius(r) => {
                self.sphere.radius = r.max(1e-3);
                self.sphere.regenerate_meshes();
            }
            P::SpherePosition(p) => self.sphere.position = p,
            P::SphereRotation(r) => self.sphere.rotation = r,
            P::SphereScale(s) => self.sphere.scale = s,
            P::SphereColor(c) => self.sphere.color = c,
            P::SphereTransparency(t) => self.sphere.transparency = t.clamp(0.0, 1.0),
            P::SphereWireframe(w) => self.sphere.wireframe = w,
            P::SphereLighting(l) => self.sphere.lighting = l,
            P::SphereResolution(r) => {
                self.sphere.resolution = r.clamp(RESOLUTION_RANGE.0, RESOLUTION_RANGE.1);
                self.sphere.regenerate_meshes();
            }
            P::SphereWireframeResolution(r) => {
                self.sphere.wireframe_resolution = r.clamp(RESOLUTION_RANGE.0, RESOLUTION_RANGE.1);
                self.sphere.regenerate_meshes();
            }

            P::VectorEnabled(e) => self.vector.enabled = e,
            P::VectorDirection(d) => match d.try_normalize() {
                Some(unit) => self.vector.direction = unit,
                None => return false,
            },
            P::VectorLength(l) => self.vector.length = l.max(0.1),
            P::VectorColor(c) => self.vector.color = c,
            P::VectorThickness(t) => self.vector.thickness = t.max(1.0),
            P::VectorRoll(r) => self.vector.roll_deg = r.rem_euclid(360.0),
            P::OrientationEnabled(e) => self.vector.orientation.enabled = e,
            P::OrientationLength(l) => self.vector.orientation.length = l.max(0.1),
            P::OrientationColor(c) => self.vector.orientation.color = c,
            P::OrientationThickness(t) => self.vector.orientation.thickness = t.max(1.0),

            P::ConeEnabled(e) => self.cone.enabled = e,
            P::ConeInfinite(i) => self.cone.infinite = i,
            P::ConeLength(l) => self.cone.length = l.max(0.5),
            P::ConeHalfAngle(a) => {
                self.cone.half_angle_deg = a.clamp(HALF_ANGLE_RANGE.0, HALF_ANGLE_RANGE.1);
            }
            P::ConeColor(c) => self.cone.color = c,

            P::PyramidEnabled(e) => self.pyramid.enabled = e,
            P::PyramidInfinite(i) => self.pyramid.infinite = i,
            P::PyramidLength(l) => self.pyramid.length = l.max(0.5),
            P::PyramidHalfAngleH(a) => {
                self.pyramid.half_angle_h_deg = a.clamp(HALF_ANGLE_RANGE.0, HALF_ANGLE_RANGE.1);
            }
            P::PyramidHalfAngleV(a) => {
                self.pyramid.half_angle_v_deg = a.clamp(HALF_ANGLE_RANGE.0, HALF_ANGLE_RANGE.1);
            }
            P::PyramidColor(c) => self.pyramid.color = c,

            P::CuboidEnabled(e) => self.cuboid.enabled = e,
            P::CuboidInfinite(i) => self.cuboid.infinite = i,
            P::CuboidDimensions(d) => self.cuboid.dimensions = d.max(Vec3::splat(1e-3)),
            P::CuboidColor(c) => self.cuboid.color = c,

            P::NearPlaneEnabled(e) => self.near_plane.enabled = e,
            P::NearPlaneDistance(d) => {
                self.near_plane.distance = d.clamp(NEAR_PLANE_RANGE.0, NEAR_PLANE_RANGE.1);
            }

            P::ScreenEnabled(e) => self.screen.enabled = e,
            P::ScreenMode(m) => self.screen.mode = m,
            P::ScreenProjection(p) => self.screen.projection = p,
            P::ScreenPosition(p) => self.screen.position = p,
            P::ScreenRotation(r) => self.screen.rotation = r,
            P::ScreenWidth(w) => self.screen.width = w.max(1e-2),
            P::ScreenHeight(h) => self.screen.height = h.max(1e-2),
            P::ScreenResolution([w, h]) => {
                self.screen.resolution = [w.max(1), h.max(1)];
            }
            P::ScreenSamples(s) => self.screen.samples = s.max(1),
            P::ScreenMaxBounces(b) => self.screen.max_bounces = b,
            P::ScreenUpdateRate(r) => self.screen.update_rate = r.max(MIN_UPDATE_RATE),
        }

        patch.invalidates_screen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_angle_is_clamped() {
        let mut scene = Scene::default();
        scene.apply(ScenePatch::ConeHalfAngle(120.0));
        assert!((scene.cone.half_angle_deg - HALF_ANGLE_RANGE.1).abs() < f32::EPSILON);
        scene.apply(ScenePatch::ConeHalfAngle(-4.0));
        assert!((scene.cone.half_angle_deg - HALF_ANGLE_RANGE.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_direction_is_rejected() {
        let mut scene = Scene::default();
        let before = scene.vector.direction;
        let dirty = scene.apply(ScenePatch::VectorDirection(Vec3::ZERO));
        assert!(!dirty);
        assert_eq!(scene.vector.direction, before);
    }

    #[test]
    fn direction_is_renormalized() {
        let mut scene = Scene::default();
        scene.apply(ScenePatch::VectorDirection(Vec3::new(0.0, 3.0, 0.0)));
        assert!((scene.vector.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(scene.vector.direction, Vec3::Y);
    }

    #[test]
    fn roll_wraps_into_one_turn() {
        let mut scene = Scene::default();
        scene.apply(ScenePatch::VectorRoll(725.0));
        assert!((scene.vector.roll_deg - 5.0).abs() < 1e-4);
        scene.apply(ScenePatch::VectorRoll(-90.0));
        assert!((scene.vector.roll_deg - 270.0).abs() < 1e-4);
    }

    #[test]
    fn resolution_change_rebuilds_mesh() {
        let mut scene = Scene::default();
        let before = scene.sphere.mesh.vertices.len();
        scene.apply(ScenePatch::SphereResolution(8));
        assert_ne!(scene.sphere.mesh.vertices.len(), before);
        assert_eq!(scene.sphere.mesh.vertices.len(), 9 * 9);
    }

    #[test]
    fn update_rate_has_a_floor() {
        let mut scene = Scene::default();
        scene.apply(ScenePatch::ScreenUpdateRate(0.0));
        assert!((scene.screen.update_rate - MIN_UPDATE_RATE).abs() < f32::EPSILON);
    }

    #[test]
    fn quad_placement_does_not_invalidate() {
        let mut scene = Scene::default();
        assert!(!scene.apply(ScenePatch::ScreenPosition(Vec3::new(1.0, 2.0, 3.0))));
        assert!(scene.apply(ScenePatch::ScreenResolution([64, 64])));
        assert!(scene.apply(ScenePatch::ConeHalfAngle(40.0)));
    }
}
