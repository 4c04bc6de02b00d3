//! Shader front end.
//!
//! Stages are WGSL text. Compilation parses and validates a stage with naga;
//! linking checks the vertex-to-fragment interface and collects uniforms.
//! Backends call these helpers so every `GpuApi` implementation reports the
//! same diagnostics.

mod compile;
mod link;
mod program;
mod stage;

pub use compile::{compile_stage, compile_stage_with, CompiledStage};
pub use link::{link_stages, ProgramInterface, UniformLocation, UniformSlot, VertexInput};
pub use program::{ProgramDesc, ShaderProgram};
pub use stage::{cap_log, ShaderStage, INFO_LOG_CAPACITY};
