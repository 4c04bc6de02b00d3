//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! drives a [`RenderState`](crate::render::RenderState) once per frame.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
