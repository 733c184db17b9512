#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]
//! # Ray Core
//!
//! The algorithmic heart of the virtual screen: closed-form ray/primitive
//! intersection, a signed-distance scene with sphere-tracing ray marching,
//! and the recursive shading model that assembles both into pixel colors.
//!
//! Everything here is pure computation over value types. The world to trace
//! is assembled per frame from the scene model plus a [`FrameContext`]
//! snapshot of externally-owned state; nothing reaches back into the caller.

pub mod intersect;
pub mod march;
pub mod ray;
pub mod sdf;
pub mod tracer;
pub mod world;

pub use intersect::{closest_hit, rotation_xyz, Primitive, Shape};
pub use march::march;
pub use ray::{Hit, Ray, Surface};
pub use tracer::{Backend, TraceOptions, Tracer};
pub use world::{orientation_basis, FrameContext, TraceWorld};
