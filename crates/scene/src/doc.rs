//! Flat JSON document mapping for the scene aggregate.
//!
//! Every section and field is individually defaulted, so a partial document
//! loads with defaults filled in rather than failing. Restoring goes through
//! [`Scene::apply`] so document values pass the same clamping boundary as
//! live setters. Cosmetic overlay sections round-trip verbatim.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SceneError;
use crate::patch::ScenePatch;
use crate::types::{Projection, RenderMode, Rgba, Scene};

fn vec3(v: [f32; 3]) -> glam::Vec3 {
    glam::Vec3::from_array(v)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereDoc {
    pub radius: f32,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub color: [f32; 4],
    pub transparency: f32,
    pub wireframe_mode: bool,
    pub lighting_enabled: bool,
    pub resolution: u32,
    pub wireframe_resolution: u32,
}

impl Default for SphereDoc {
    fn default() -> Self {
        let s = crate::types::SphereModel::default();
        Self {
            radius: s.radius,
            position: s.position.to_array(),
            rotation: s.rotation.to_array(),
            scale: s.scale.to_array(),
            color: s.color.to_array(),
            transparency: s.transparency,
            wireframe_mode: s.wireframe,
            lighting_enabled: s.lighting,
            resolution: s.resolution,
            wireframe_resolution: s.wireframe_resolution,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorDoc {
    pub enabled: bool,
    pub direction: [f32; 3],
    pub length: f32,
    pub color: [f32; 4],
    pub thickness: f32,
    pub roll: f32,
    pub orientation_enabled: bool,
    pub orientation_length: f32,
    pub orientation_color: [f32; 4],
    pub orientation_thickness: f32,
}

impl Default for VectorDoc {
    fn default() -> Self {
        let v = crate::types::DirectionArrow::default();
        Self {
            enabled: v.enabled,
            direction: v.direction.to_array(),
            length: v.length,
            color: v.color.to_array(),
            thickness: v.thickness,
            roll: v.roll_deg,
            orientation_enabled: v.orientation.enabled,
            orientation_length: v.orientation.length,
            orientation_color: v.orientation.color.to_array(),
            orientation_thickness: v.orientation.thickness,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeDoc {
    pub enabled: bool,
    pub infinite: bool,
    pub length: f32,
    pub angle: f32,
    pub color: [f32; 4],
}

impl Default for ConeDoc {
    fn default() -> Self {
        let c = crate::types::ConeShape::default();
        Self {
            enabled: c.enabled,
            infinite: c.infinite,
            length: c.length,
            angle: c.half_angle_deg,
            color: c.color.to_array(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidDoc {
    pub enabled: bool,
    pub infinite: bool,
    pub length: f32,
    pub angle_horizontal: f32,
    pub angle_vertical: f32,
    pub color: [f32; 4],
}

impl Default for PyramidDoc {
    fn default() -> Self {
        let p = crate::types::PyramidShape::default();
        Self {
            enabled: p.enabled,
            infinite: p.infinite,
            length: p.length,
            angle_horizontal: p.half_angle_h_deg,
            angle_vertical: p.half_angle_v_deg,
            color: p.color.to_array(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CuboidDoc {
    pub enabled: bool,
    pub infinite: bool,
    pub dimensions: [f32; 3],
    pub color: [f32; 4],
}

impl Default for CuboidDoc {
    fn default() -> Self {
        let c = crate::types::CuboidShape::default();
        Self {
            enabled: c.enabled,
            infinite: c.infinite,
            dimensions: c.dimensions.to_array(),
            color: c.color.to_array(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NearPlaneDoc {
    pub enabled: bool,
    pub distance: f32,
}

impl Default for NearPlaneDoc {
    fn default() -> Self {
        let n = crate::types::NearPlane::default();
        Self {
            enabled: n.enabled,
            distance: n.distance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenDoc {
    pub enabled: bool,
    pub render_mode: String,
    pub projection: String,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub width: f32,
    pub height: f32,
    pub resolution: [u32; 2],
    pub update_rate: f32,
    pub samples: u32,
    pub max_bounces: u32,
}

impl Default for ScreenDoc {
    fn default() -> Self {
        let s = crate::types::ScreenConfig::default();
        Self {
            enabled: s.enabled,
            render_mode: s.mode.as_str().to_owned(),
            projection: s.projection.as_str().to_owned(),
            position: s.position.to_array(),
            rotation: s.rotation.to_array(),
            width: s.width,
            height: s.height,
            resolution: s.resolution,
            update_rate: s.update_rate,
            samples: s.samples,
            max_bounces: s.max_bounces,
        }
    }
}

/// Top-level scene document. Section order matches the saved layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDoc {
    pub sphere: SphereDoc,
    pub vector: VectorDoc,
    pub cone: ConeDoc,
    pub pyramid: PyramidDoc,
    pub cuboid: CuboidDoc,
    pub near_plane: NearPlaneDoc,
    pub screen: ScreenDoc,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub grids: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub sphere_intersection: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub normal_rays: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub intersection_normals: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub truncation_normals: Value,
}

impl Scene {
    /// Flatten the aggregate into its document form.
    #[must_use]
    pub fn to_document(&self) -> SceneDoc {
        SceneDoc {
            sphere: SphereDoc {
                radius: self.sphere.radius,
                position: self.sphere.position.to_array(),
                rotation: self.sphere.rotation.to_array(),
                scale: self.sphere.scale.to_array(),
                color: self.sphere.color.to_array(),
                transparency: self.sphere.transparency,
                wireframe_mode: self.sphere.wireframe,
                lighting_enabled: self.sphere.lighting,
                resolution: self.sphere.resolution,
                wireframe_resolution: self.sphere.wireframe_resolution,
            },
            vector: VectorDoc {
                enabled: self.vector.enabled,
                direction: self.vector.direction.to_array(),
                length: self.vector.length,
                color: self.vector.color.to_array(),
                thickness: self.vector.thickness,
                roll: self.vector.roll_deg,
                orientation_enabled: self.vector.orientation.enabled,
                orientation_length: self.vector.orientation.length,
                orientation_color: self.vector.orientation.color.to_array(),
                orientation_thickness: self.vector.orientation.thickness,
            },
            cone: ConeDoc {
                enabled: self.cone.enabled,
                infinite: self.cone.infinite,
                length: self.cone.length,
                angle: self.cone.half_angle_deg,
                color: self.cone.color.to_array(),
            },
            pyramid: PyramidDoc {
                enabled: self.pyramid.enabled,
                infinite: self.pyramid.infinite,
                length: self.pyramid.length,
                angle_horizontal: self.pyramid.half_angle_h_deg,
                angle_vertical: self.pyramid.half_angle_v_deg,
                color: self.pyramid.color.to_array(),
            },
            cuboid: CuboidDoc {
                enabled: self.cuboid.enabled,
                infinite: self.cuboid.infinite,
                dimensions: self.cuboid.dimensions.to_array(),
                color: self.cuboid.color.to_array(),
            },
            near_plane: NearPlaneDoc {
                enabled: self.near_plane.enabled,
                distance: self.near_plane.distance,
            },
            screen: ScreenDoc {
                enabled: self.screen.enabled,
                render_mode: self.screen.mode.as_str().to_owned(),
                projection: self.screen.projection.as_str().to_owned(),
                position: self.screen.position.to_array(),
                rotation: self.screen.rotation.to_array(),
                width: self.screen.width,
                height: self.screen.height,
                resolution: self.screen.resolution,
                update_rate: self.screen.update_rate,
                samples: self.screen.samples,
                max_bounces: self.screen.max_bounces,
            },
            grids: self.cosmetics.grids.clone(),
            sphere_intersection: self.cosmetics.sphere_intersection.clone(),
            normal_rays: self.cosmetics.normal_rays.clone(),
            intersection_normals: self.cosmetics.intersection_normals.clone(),
            truncation_normals: self.cosmetics.truncation_normals.clone(),
        }
    }

    /// Rebuild the aggregate from a document.
    ///
    /// Every value is routed through [`Scene::apply`], so the document passes
    /// the same clamping as live setters, the sphere meshes come back in sync
    /// with the restored resolutions, and a degenerate direction falls back
    /// to the default instead of poisoning the vector.
    #[must_use]
    pub fn from_document(doc: &SceneDoc) -> Self {
        use ScenePatch as P;

        let mut scene = Scene::default();
        let patches = [
            P::SphereRadius(doc.sphere.radius),
            P::SpherePosition(vec3(doc.sphere.position)),
            P::SphereRotation(vec3(doc.sphere.rotation)),
            P::SphereScale(vec3(doc.sphere.scale)),
            P::SphereColor(Rgba::from_array(doc.sphere.color)),
            P::SphereTransparency(doc.sphere.transparency),
            P::SphereWireframe(doc.sphere.wireframe_mode),
            P::SphereLighting(doc.sphere.lighting_enabled),
            P::SphereResolution(doc.sphere.resolution),
            P::SphereWireframeResolution(doc.sphere.wireframe_resolution),
            P::VectorEnabled(doc.vector.enabled),
            P::VectorDirection(vec3(doc.vector.direction)),
            P::VectorLength(doc.vector.length),
            P::VectorColor(Rgba::from_array(doc.vector.color)),
            P::VectorThickness(doc.vector.thickness),
            P::VectorRoll(doc.vector.roll),
            P::OrientationEnabled(doc.vector.orientation_enabled),
            P::OrientationLength(doc.vector.orientation_length),
            P::OrientationColor(Rgba::from_array(doc.vector.orientation_color)),
            P::OrientationThickness(doc.vector.orientation_thickness),
            P::ConeEnabled(doc.cone.enabled),
            P::ConeInfinite(doc.cone.infinite),
            P::ConeLength(doc.cone.length),
            P::ConeHalfAngle(doc.cone.angle),
            P::ConeColor(Rgba::from_array(doc.cone.color)),
            P::PyramidEnabled(doc.pyramid.enabled),
            P::PyramidInfinite(doc.pyramid.infinite),
            P::PyramidLength(doc.pyramid.length),
            P::PyramidHalfAngleH(doc.pyramid.angle_horizontal),
            P::PyramidHalfAngleV(doc.pyramid.angle_vertical),
            P::PyramidColor(Rgba::from_array(doc.pyramid.color)),
            P::CuboidEnabled(doc.cuboid.enabled),
            P::CuboidInfinite(doc.cuboid.infinite),
            P::CuboidDimensions(vec3(doc.cuboid.dimensions)),
            P::CuboidColor(Rgba::from_array(doc.cuboid.color)),
            P::NearPlaneEnabled(doc.near_plane.enabled),
            P::NearPlaneDistance(doc.near_plane.distance),
            P::ScreenEnabled(doc.screen.enabled),
            P::ScreenMode(RenderMode::from_str_lossy(&doc.screen.render_mode)),
            P::ScreenProjection(Projection::from_str_lossy(&doc.screen.projection)),
            P::ScreenPosition(vec3(doc.screen.position)),
            P::ScreenRotation(vec3(doc.screen.rotation)),
            P::ScreenWidth(doc.screen.width),
            P::ScreenHeight(doc.screen.height),
            P::ScreenResolution(doc.screen.resolution),
            P::ScreenSamples(doc.screen.samples),
            P::ScreenMaxBounces(doc.screen.max_bounces),
            P::ScreenUpdateRate(doc.screen.update_rate),
        ];
        for patch in patches {
            scene.apply(patch);
        }

        scene.cosmetics.grids = doc.grids.clone();
        scene.cosmetics.sphere_intersection = doc.sphere_intersection.clone();
        scene.cosmetics.normal_rays = doc.normal_rays.clone();
        scene.cosmetics.intersection_normals = doc.intersection_normals.clone();
        scene.cosmetics.truncation_normals = doc.truncation_normals.clone();
        scene
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`SceneError::Parse`] if serialization fails (it does not for
    /// any value this model can hold).
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Parse a scene from JSON text. Missing sections and fields fall back
    /// to defaults; unparseable text is logged and returned as one error.
    ///
    /// # Errors
    /// Returns [`SceneError::Parse`] when the text is not valid JSON.
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        let doc: SceneDoc = serde_json::from_str(text).map_err(|e| {
            tracing::error!("scene document parse failed: {e}");
            SceneError::from(e)
        })?;
        Ok(Self::from_document(&doc))
    }

    /// Load a scene document from disk.
    ///
    /// # Errors
    /// Returns [`SceneError::Io`] when the file cannot be read and
    /// [`SceneError::Parse`] when its contents are not valid JSON.
    pub fn load_json(path: &Path) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!("scene document read failed: {} ({e})", path.display());
            SceneError::from(e)
        })?;
        Self::from_json(&text)
    }

    /// Save the scene document to disk.
    ///
    /// # Errors
    /// Returns [`SceneError::Io`] when the file cannot be written.
    pub fn save_json(&self, path: &Path) -> Result<(), SceneError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
