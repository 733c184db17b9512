//! # Frame World Assembly
//!
//! Builds the flat primitive list for one frame from the scene model plus a
//! [`FrameContext`] snapshot of externally-owned state. The renderer never
//! reaches back into the owning view; everything it may read is in these two
//! values.

use glam::{Mat3, Vec3};

use scene::Scene;

use crate::intersect::{Primitive, Shape};
use crate::ray::Surface;

/// Stand-in length for shapes flagged infinite, comfortably past the
/// marcher's travel cap.
const INFINITE_LENGTH: f32 = 1.0e3;

/// Pose and size of the externally-owned reference cube.
#[derive(Debug, Clone, Copy)]
pub struct CubePose {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub rotation_deg: Vec3,
}

impl Default for CubePose {
    fn default() -> Self {
        Self {
            center: Vec3::new(2.0, 0.0, 2.0),
            half_extents: Vec3::splat(0.3),
            rotation_deg: Vec3::ZERO,
        }
    }
}

/// Immutable per-frame snapshot of state owned by the host view: the
/// interactive camera pose and the reference cube, if one is placed.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub camera_position: Vec3,
    /// Pitch, yaw, roll in degrees.
    pub camera_rotation_deg: Vec3,
    pub cube: Option<CubePose>,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            camera_position: Vec3::new(0.0, 0.0, 5.0),
            camera_rotation_deg: Vec3::ZERO,
            cube: Some(CubePose::default()),
        }
    }
}

/// Orthonormal basis for the directional vector: columns are
/// (right, up, forward).
///
/// Forward is the renormalized direction; right is `forward x world-up`
/// (falling back to world X when they are parallel); roll spins right and up
/// inside their shared plane.
#[must_use]
pub fn orientation_basis(direction: Vec3, roll_deg: f32) -> Mat3 {
    let forward = direction.try_normalize().unwrap_or(Vec3::X);
    let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
    let up = right.cross(forward).normalize();

    let (sin_r, cos_r) = roll_deg.to_radians().sin_cos();
    let rolled_right = right * cos_r - up * sin_r;
    let rolled_up = up * cos_r + right * sin_r;

    Mat3::from_cols(rolled_right, rolled_up, forward)
}

/// Everything the tracer needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct TraceWorld {
    pub primitives: Vec<Primitive>,
}

impl TraceWorld {
    /// Assemble the traceable primitives: the enabled derived shapes along
    /// the vector axis (truncated by the near plane when it is active) plus
    /// the context's reference cube.
    ///
    /// A shape whose truncation starts at or past its own length emits no
    /// geometry at all. Registration order fixes the tie-break order for
    /// analytic intersection: cone, pyramid, cuboid, then the cube.
    #[must_use]
    pub fn from_scene(scene: &Scene, ctx: &FrameContext) -> Self {
        let unit = scene.sphere.radius;
        let origin = scene.sphere.position;
        let basis = orientation_basis(scene.vector.direction, scene.vector.roll_deg);
        let forward = basis.z_axis;

        let near = if scene.near_plane.enabled {
            scene.near_plane.distance * unit
        } else {
            0.0
        };

        let mut primitives = Vec::new();

        if scene.cone.enabled {
            let far = if scene.cone.infinite {
                f32::INFINITY
            } else {
                scene.cone.length * unit
            };
            if near < far {
                primitives.push(Primitive {
                    shape: Shape::Cone {
                        apex: origin,
                        axis: forward,
                        half_angle_deg: scene.cone.half_angle_deg,
                        axial_range: (near, far),
                    },
                    surface: Surface::Uniform(scene.cone.color),
                });
            }
        }

        if scene.pyramid.enabled {
            let far = if scene.pyramid.infinite {
                f32::INFINITY
            } else {
                scene.pyramid.length * unit
            };
            if near < far {
                primitives.push(Primitive {
                    shape: Shape::Pyramid {
                        apex: origin,
                        basis,
                        half_angle_h_deg: scene.pyramid.half_angle_h_deg,
                        half_angle_v_deg: scene.pyramid.half_angle_v_deg,
                        axial_range: (near, far),
                    },
                    surface: Surface::Uniform(scene.pyramid.color),
                });
            }
        }

        if scene.cuboid.enabled {
            let far = if scene.cuboid.infinite {
                INFINITE_LENGTH
            } else {
                scene.cuboid.dimensions.z * unit
            };
            if near < far {
                let half_span = (far - near) * 0.5;
                primitives.push(Primitive {
                    shape: Shape::Box {
                        center: origin + forward * (near + half_span),
                        half_extents: Vec3::new(
                            scene.cuboid.dimensions.x * unit * 0.5,
                            scene.cuboid.dimensions.y * unit * 0.5,
                            half_span,
                        ),
                        rotation: basis,
                    },
                    surface: Surface::Uniform(scene.cuboid.color),
                });
            }
        }

        if let Some(cube) = ctx.cube {
            primitives.push(Primitive {
                shape: Shape::rotated_box(cube.center, cube.half_extents, cube.rotation_deg),
                surface: Surface::FaceColored,
            });
        }

        Self { primitives }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
