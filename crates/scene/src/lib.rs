#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
//! # Scene Model
//!
//! Owns the parametric state of the sphere visualization: the sphere itself,
//! the directional vector, the derived shapes (cone, pyramid, cuboid), the
//! near plane, and the virtual screen configuration.
//!
//! All mutation funnels through [`Scene::apply`] with a [`ScenePatch`], which
//! clamps every value into its valid range and reports whether the change
//! invalidates the virtual screen image. Loading and saving goes through the
//! [`doc`] module, which maps the model onto a flat JSON document and
//! tolerates missing sections by falling back to defaults.

pub mod doc;
pub mod error;
pub mod mesh;
pub mod patch;
pub mod types;

pub use doc::SceneDoc;
pub use error::SceneError;
pub use mesh::{MeshVertex, SphereMesh};
pub use patch::ScenePatch;
pub use types::{
    ConeShape, Cosmetics, CuboidShape, DirectionArrow, NearPlane, OrientationMarker, Projection,
    PyramidShape, RenderMode, Rgba, Scene, ScreenConfig, SphereModel,
};
