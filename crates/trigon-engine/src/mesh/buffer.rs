use crate::device::{GpuApi, MeshHandle};
use crate::shader::VertexInput;

use super::{DrawRange, MeshData, VertexLayout};

/// GPU-resident mesh: vertex buffer, optional index buffer and the attribute
/// layout bound with them.
#[derive(Debug)]
pub struct MeshBuffer {
    label: String,
    handle: MeshHandle,
    layout: VertexLayout,
    range: DrawRange,
}

impl MeshBuffer {
    /// Uploads `data` and binds its layout.
    pub fn upload<G>(gpu: &mut G, data: &MeshData) -> Self
    where
        G: GpuApi + ?Sized,
    {
        let handle = gpu.create_mesh(data);
        log::debug!(
            "mesh `{}` uploaded: {} vertices, {:?}",
            data.label(),
            data.vertex_count(),
            data.mode()
        );

        Self {
            label: data.label().to_string(),
            handle,
            layout: data.layout().clone(),
            range: data.draw_range(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn handle(&self) -> MeshHandle {
        self.handle
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn draw_range(&self) -> DrawRange {
        self.range
    }

    /// First program input the layout cannot feed, if any.
    pub fn missing_input(&self, inputs: &[VertexInput]) -> Option<VertexInput> {
        inputs.iter().copied().find(|&input| !self.layout.provides(input))
    }

    pub(crate) fn release<G>(self, gpu: &mut G)
    where
        G: GpuApi + ?Sized,
    {
        gpu.release_mesh(self.handle);
    }
}
