use super::{MeshError, VertexLayout};

/// How a mesh is submitted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawMode {
    /// Consecutive vertices form triangles.
    Arrays,
    /// The index sequence forms triangles.
    Indexed,
}

/// Element range of one draw command. Always a triangle list.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawRange {
    Vertices { first: u32, count: u32 },
    Indexed { first: u32, count: u32 },
}

impl DrawRange {
    pub fn mode(self) -> DrawMode {
        match self {
            Self::Vertices { .. } => DrawMode::Arrays,
            Self::Indexed { .. } => DrawMode::Indexed,
        }
    }

    /// Vertices (or indices) consumed.
    pub fn count(self) -> u32 {
        match self {
            Self::Vertices { count, .. } | Self::Indexed { count, .. } => count,
        }
    }

    pub fn triangle_count(self) -> u32 {
        self.count() / 3
    }
}

/// CPU-side mesh: interleaved `f32` vertices, optional `u32` indices and the layout.
///
/// Validated on construction; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    label: String,
    vertices: Vec<f32>,
    indices: Option<Vec<u32>>,
    layout: VertexLayout,
}

impl MeshData {
    /// Non-indexed mesh; every three vertices form a triangle.
    pub fn new(
        label: impl Into<String>,
        vertices: Vec<f32>,
        layout: VertexLayout,
    ) -> Result<Self, MeshError> {
        let vertex_count = vertex_count(&vertices, &layout)?;
        if vertex_count % 3 != 0 {
            return Err(MeshError::NotTriangles { count: vertex_count });
        }

        Ok(Self {
            label: label.into(),
            vertices,
            indices: None,
            layout,
        })
    }

    /// Indexed mesh; every three indices form a triangle.
    pub fn indexed(
        label: impl Into<String>,
        vertices: Vec<f32>,
        indices: Vec<u32>,
        layout: VertexLayout,
    ) -> Result<Self, MeshError> {
        let vertex_count = vertex_count(&vertices, &layout)?;
        if indices.is_empty() || indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangles { count: indices.len() });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange { index, vertex_count });
        }

        Ok(Self {
            label: label.into(),
            vertices,
            indices: Some(indices),
            layout,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.floats_per_vertex()
    }

    pub fn mode(&self) -> DrawMode {
        if self.indices.is_some() {
            DrawMode::Indexed
        } else {
            DrawMode::Arrays
        }
    }

    /// Range covering the whole mesh.
    pub fn draw_range(&self) -> DrawRange {
        match &self.indices {
            Some(indices) => DrawRange::Indexed {
                first: 0,
                count: indices.len() as u32,
            },
            None => DrawRange::Vertices {
                first: 0,
                count: self.vertex_count() as u32,
            },
        }
    }
}

fn vertex_count(vertices: &[f32], layout: &VertexLayout) -> Result<usize, MeshError> {
    if vertices.is_empty() {
        return Err(MeshError::EmptyVertices);
    }
    let floats_per_vertex = layout.floats_per_vertex();
    if vertices.len() % floats_per_vertex != 0 {
        return Err(MeshError::PartialVertex {
            floats: vertices.len(),
            floats_per_vertex,
        });
    }
    Ok(vertices.len() / floats_per_vertex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        MeshData::indexed(
            "quad",
            vec![
                0.5, 0.5, 0.0, //
                0.5, -0.5, 0.0, //
                -0.5, -0.5, 0.0, //
                -0.5, 0.5, 0.0,
            ],
            vec![0, 1, 3, 1, 2, 3],
            VertexLayout::position(),
        )
        .unwrap()
    }

    #[test]
    fn quad_is_two_indexed_triangles() {
        let mesh = quad();
        assert_eq!(mesh.mode(), DrawMode::Indexed);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.draw_range(), DrawRange::Indexed { first: 0, count: 6 });
        assert_eq!(mesh.draw_range().triangle_count(), 2);
    }

    #[test]
    fn colored_triangle_is_one_vertex_range() {
        let mesh = MeshData::new(
            "triangle",
            vec![
                -0.5, -0.5, 0.0, 1.0, 0.0, 0.0, //
                0.5, -0.5, 0.0, 0.0, 1.0, 0.0, //
                0.0, 0.5, 0.0, 0.0, 0.0, 1.0,
            ],
            VertexLayout::position_color(),
        )
        .unwrap();
        assert_eq!(mesh.mode(), DrawMode::Arrays);
        assert_eq!(mesh.draw_range(), DrawRange::Vertices { first: 0, count: 3 });
        assert_eq!(mesh.indices(), None);
    }

    #[test]
    fn empty_vertices_rejected() {
        let err = MeshData::new("empty", Vec::new(), VertexLayout::position()).unwrap_err();
        assert_eq!(err, MeshError::EmptyVertices);
    }

    #[test]
    fn partial_vertex_rejected() {
        let err = MeshData::new("partial", vec![0.0; 10], VertexLayout::position()).unwrap_err();
        assert_eq!(err, MeshError::PartialVertex { floats: 10, floats_per_vertex: 3 });
    }

    #[test]
    fn non_triangle_vertex_count_rejected() {
        let err = MeshData::new("line", vec![0.0; 6], VertexLayout::position()).unwrap_err();
        assert_eq!(err, MeshError::NotTriangles { count: 2 });
    }

    #[test]
    fn out_of_range_index_rejected() {
        let err = MeshData::indexed("bad", vec![0.0; 9], vec![0, 1, 3], VertexLayout::position())
            .unwrap_err();
        assert_eq!(err, MeshError::IndexOutOfRange { index: 3, vertex_count: 3 });
    }

    #[test]
    fn partial_index_triangle_rejected() {
        let err = MeshData::indexed("bad", vec![0.0; 9], vec![0, 1], VertexLayout::position())
            .unwrap_err();
        assert_eq!(err, MeshError::NotTriangles { count: 2 });
    }
}
