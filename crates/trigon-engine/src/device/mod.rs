//! GPU device + surface management.
//!
//! [`GpuApi`] is the narrow, GL-shaped seam the render loop talks to.
//! [`Gpu`] implements it on wgpu against a window surface.

mod api;
mod gpu;
mod init;
mod surface;

pub use api::{FrameBegin, GpuApi, MeshHandle, ProgramHandle, StageHandle, UniformValue};
pub use gpu::Gpu;
pub use init::GpuInit;
