use naga::valid::Capabilities;

use crate::coords::Viewport;
use crate::mesh::{DrawRange, MeshData};
use crate::paint::Color;
use crate::shader::{ShaderStage, UniformLocation, VertexInput};

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(u32);

        impl $name {
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

handle!(
    /// Compiled shader stage owned by a [`GpuApi`] implementation.
    StageHandle
);
handle!(
    /// Linked program owned by a [`GpuApi`] implementation.
    ProgramHandle
);
handle!(
    /// Vertex buffer, optional index buffer and attribute layout, bound together.
    MeshHandle
);

/// Value written to a uniform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

impl UniformValue {
    /// Native-endian bytes as laid out in a uniform buffer.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Float(v) => bytemuck::bytes_of(v),
            Self::Vec2(v) => bytemuck::bytes_of(v),
            Self::Vec3(v) => bytemuck::bytes_of(v),
            Self::Vec4(v) => bytemuck::bytes_of(v),
        }
    }
}

/// Result of starting a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameBegin {
    /// Commands may be recorded; finish with [`GpuApi::end_frame`].
    Ready,
    /// Nothing can be presented this time (minimized, surface reconfigured, timeout).
    Skip,
    /// The surface cannot recover.
    Fatal,
}

/// Graphics API seam used by the render loop.
///
/// Object semantics follow the classic GL model: stages are compiled, linked
/// into a program and may be released right after; uniform values are
/// program state and persist until overwritten; draws use the values current
/// at the time of the call.
pub trait GpuApi {
    /// Shader capabilities the device enables; stages are validated against these.
    fn shader_capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Compiles one stage. On failure returns the compiler log and allocates nothing.
    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<StageHandle, String>;

    fn release_stage(&mut self, stage: StageHandle);

    /// Links two compiled stages. On failure returns the linker log and allocates nothing.
    fn link_program(
        &mut self,
        vertex: StageHandle,
        fragment: StageHandle,
    ) -> Result<ProgramHandle, String>;

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Per-vertex inputs the program consumes.
    fn vertex_inputs(&self, program: ProgramHandle) -> Vec<VertexInput>;

    fn release_program(&mut self, program: ProgramHandle);

    /// Uploads vertex and index data and binds the mesh's attribute layout.
    fn create_mesh(&mut self, mesh: &MeshData) -> MeshHandle;

    fn release_mesh(&mut self, mesh: MeshHandle);

    fn set_viewport(&mut self, viewport: Viewport);

    /// Starts a frame whose color buffer is cleared to `clear`.
    fn begin_frame(&mut self, clear: Color) -> FrameBegin;

    fn set_uniform(&mut self, program: ProgramHandle, location: UniformLocation, value: UniformValue);

    fn draw(&mut self, program: ProgramHandle, mesh: MeshHandle, range: DrawRange);

    /// Submits and presents the frame started by `begin_frame`.
    fn end_frame(&mut self);
}
