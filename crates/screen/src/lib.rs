#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]
//! # Virtual Screen
//!
//! The software-rendered second camera and the controller that drives it.
//! The camera derives its basis from the scene's directional vector, fans a
//! ray out of every output pixel, and the controller assembles the resulting
//! colors into an RGB framebuffer that the host rasterizer displays on the
//! in-scene quad.

pub mod camera;
pub mod controller;
pub mod error;
pub mod framebuffer;

pub use camera::VirtualCamera;
pub use controller::{ScreenController, VectorListener};
pub use error::ScreenError;
pub use framebuffer::{Framebuffer, Rgb8};
