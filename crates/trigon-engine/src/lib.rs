//! Trigon engine crate.
//!
//! A small immediate-mode render loop: compile shader pairs, upload static
//! meshes once, then redraw them every frame under a frame-time budget.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod error;

pub mod logging;
pub mod coords;
pub mod mesh;
pub mod paint;
pub mod render;
pub mod shader;

#[cfg(test)]
mod testing;

pub use error::InitError;
