//! Core value types for the scene aggregate.
//!
//! Fields are public; invariants (normalized direction, clamped angles and
//! resolutions) are maintained by [`crate::patch`], which is the only
//! mutation path the rest of the workspace uses.

use glam::Vec3;
use serde_json::Value;

use crate::mesh::SphereMesh;

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Scale the color channels, leaving alpha untouched.
    #[must_use]
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k, self.a)
    }

    /// Channel-wise blend: `self * (1 - t) + other * t`.
    #[must_use]
    pub fn mixed(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Channel-wise addition, alpha kept from `self`.
    #[must_use]
    pub fn added(self, other: Self) -> Self {
        Self::new(self.r + other.r, self.g + other.g, self.b + other.b, self.a)
    }

    /// Quantize to 8-bit RGB, clamping each channel.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

/// The central sphere: transform, appearance, and tessellated meshes.
///
/// The display mesh and the wireframe mesh have independent resolutions and
/// are regenerated whenever the radius or a resolution changes.
#[derive(Debug, Clone)]
pub struct SphereModel {
    pub radius: f32,
    pub position: Vec3,
    /// Pitch, yaw, roll in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub color: Rgba,
    pub transparency: f32,
    pub wireframe: bool,
    pub lighting: bool,
    pub resolution: u32,
    pub wireframe_resolution: u32,
    pub mesh: SphereMesh,
    pub wire_mesh: SphereMesh,
}

impl SphereModel {
    /// Rebuild both meshes from the current radius and resolutions.
    pub fn regenerate_meshes(&mut self) {
        self.mesh = SphereMesh::generate(self.radius, self.resolution);
        self.wire_mesh = SphereMesh::generate(self.radius, self.wireframe_resolution);
    }
}

impl Default for SphereModel {
    fn default() -> Self {
        let mut sphere = Self {
            radius: 1.0,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            color: Rgba::new(0.2, 0.5, 1.0, 0.7),
            transparency: 0.7,
            wireframe: false,
            lighting: true,
            resolution: 32,
            wireframe_resolution: 16,
            mesh: SphereMesh::default(),
            wire_mesh: SphereMesh::default(),
        };
        sphere.regenerate_meshes();
        sphere
    }
}

/// Secondary orientation marker derived from the vector direction plus roll.
#[derive(Debug, Clone, Copy)]
pub struct OrientationMarker {
    pub enabled: bool,
    pub length: f32,
    pub color: Rgba,
    pub thickness: f32,
}

impl Default for OrientationMarker {
    fn default() -> Self {
        Self {
            enabled: false,
            length: 1.0,
            color: Rgba::new(0.0, 1.0, 0.0, 1.0),
            thickness: 2.0,
        }
    }
}

/// The directional vector anchored at the sphere center.
///
/// `direction` is always unit length; zero-length assignments are rejected at
/// the patch boundary. `roll_deg` wraps into `[0, 360)`.
#[derive(Debug, Clone, Copy)]
pub struct DirectionArrow {
    pub enabled: bool,
    pub direction: Vec3,
    /// Length in sphere-radius units, independent of sphere scale.
    pub length: f32,
    pub color: Rgba,
    pub thickness: f32,
    pub roll_deg: f32,
    pub orientation: OrientationMarker,
}

impl Default for DirectionArrow {
    fn default() -> Self {
        Self {
            enabled: false,
            direction: Vec3::X,
            length: 2.0,
            color: Rgba::new(1.0, 0.0, 0.0, 1.0),
            thickness: 3.0,
            roll_deg: 0.0,
            orientation: OrientationMarker::default(),
        }
    }
}

/// Cone along the vector axis, apex at the sphere center.
#[derive(Debug, Clone, Copy)]
pub struct ConeShape {
    pub enabled: bool,
    pub infinite: bool,
    pub length: f32,
    /// Half-angle in degrees, kept inside (5, 89).
    pub half_angle_deg: f32,
    pub color: Rgba,
}

impl Default for ConeShape {
    fn default() -> Self {
        Self {
            enabled: false,
            infinite: false,
            length: 3.0,
            half_angle_deg: 30.0,
            color: Rgba::new(1.0, 1.0, 0.0, 0.3),
        }
    }
}

/// Four-sided pyramid along the vector axis, apex at the sphere center.
#[derive(Debug, Clone, Copy)]
pub struct PyramidShape {
    pub enabled: bool,
    pub infinite: bool,
    pub length: f32,
    pub half_angle_h_deg: f32,
    pub half_angle_v_deg: f32,
    pub color: Rgba,
}

impl Default for PyramidShape {
    fn default() -> Self {
        Self {
            enabled: false,
            infinite: false,
            length: 3.0,
            half_angle_h_deg: 25.0,
            half_angle_v_deg: 20.0,
            color: Rgba::new(0.0, 1.0, 1.0, 0.3),
        }
    }
}

/// Box along the vector axis, starting at the sphere center.
///
/// `dimensions` is (width, height, length): width and height span the plane
/// perpendicular to the axis, length runs along it.
#[derive(Debug, Clone, Copy)]
pub struct CuboidShape {
    pub enabled: bool,
    pub infinite: bool,
    pub dimensions: Vec3,
    pub color: Rgba,
}

impl Default for CuboidShape {
    fn default() -> Self {
        Self {
            enabled: false,
            infinite: false,
            dimensions: Vec3::new(1.0, 1.0, 3.0),
            color: Rgba::new(1.0, 0.5, 0.0, 0.3),
        }
    }
}

/// Truncation plane perpendicular to the vector axis.
///
/// When enabled with distance > 0, the derived shapes start at `distance`
/// along the axis instead of at the sphere center.
#[derive(Debug, Clone, Copy)]
pub struct NearPlane {
    pub enabled: bool,
    /// Distance along the axis in sphere-radius units, kept inside [0, 3].
    pub distance: f32,
}

impl Default for NearPlane {
    fn default() -> Self {
        Self {
            enabled: false,
            distance: 0.5,
        }
    }
}

/// How the virtual screen image is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The host rasterizes the quad directly; no software image is computed.
    Simple,
    RayTrace,
    PathTrace,
    PhysicallyBased,
    RayMarch,
}

impl RenderMode {
    /// Modes whose image is produced by casting rays on the CPU.
    #[must_use]
    pub const fn is_ray_based(self) -> bool {
        !matches!(self, Self::Simple)
    }

    /// Modes that spawn mirror-reflection rays on a hit.
    #[must_use]
    pub const fn is_reflective(self) -> bool {
        matches!(self, Self::PathTrace | Self::PhysicallyBased)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::RayTrace => "raytracing",
            Self::PathTrace => "pathtracing",
            Self::PhysicallyBased => "pbr",
            Self::RayMarch => "raymarching",
        }
    }

    /// Parse the serialized name; unknown names fall back to `Simple`.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "raytracing" => Self::RayTrace,
            "pathtracing" => Self::PathTrace,
            "pbr" => Self::PhysicallyBased,
            "raymarching" => Self::RayMarch,
            _ => Self::Simple,
        }
    }
}

/// Virtual camera projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    Orthographic,
}

impl Projection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perspective => "perspective",
            Self::Orthographic => "orthographic",
        }
    }

    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        if s == "orthographic" {
            Self::Orthographic
        } else {
            Self::Perspective
        }
    }
}

/// The in-scene screen quad and its virtual camera settings.
#[derive(Debug, Clone, Copy)]
pub struct ScreenConfig {
    pub enabled: bool,
    pub mode: RenderMode,
    pub projection: Projection,
    pub position: Vec3,
    /// Pitch, yaw, roll in degrees.
    pub rotation: Vec3,
    pub width: f32,
    pub height: f32,
    /// Output image resolution (columns, rows); both > 0.
    pub resolution: [u32; 2],
    /// Rays averaged per pixel; >= 1.
    pub samples: u32,
    pub max_bounces: u32,
    /// Minimum seconds between un-forced re-renders; >= 0.1.
    pub update_rate: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: RenderMode::Simple,
            projection: Projection::Perspective,
            position: Vec3::new(0.0, 2.5, 0.0),
            rotation: Vec3::ZERO,
            width: 2.0,
            height: 1.5,
            resolution: [160, 120],
            samples: 1,
            max_bounces: 2,
            update_rate: 0.5,
        }
    }
}

/// Overlay settings with no algorithmic contract: carried opaquely so a saved
/// document round-trips byte-for-byte at the section level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cosmetics {
    pub grids: Value,
    pub sphere_intersection: Value,
    pub normal_rays: Value,
    pub intersection_normals: Value,
    pub truncation_normals: Value,
}

/// The whole mutable aggregate. Replaced wholesale on load or "new scene",
/// mutated field-wise through [`Scene::apply`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub sphere: SphereModel,
    pub vector: DirectionArrow,
    pub cone: ConeShape,
    pub pyramid: PyramidShape,
    pub cuboid: CuboidShape,
    pub near_plane: NearPlane,
    pub screen: ScreenConfig,
    pub cosmetics: Cosmetics,
}
