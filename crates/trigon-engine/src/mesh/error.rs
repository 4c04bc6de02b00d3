use std::fmt;

/// Invalid vertex layout or mesh data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Stride is zero or not a multiple of 4 bytes.
    InvalidStride { stride: u32 },
    /// Attribute arity outside `1..=4`.
    InvalidComponents { location: u32, components: u8 },
    /// Attribute is misaligned or extends past the stride.
    AttributeOutOfBounds { location: u32 },
    /// Two attributes share a shader location.
    DuplicateLocation { location: u32 },
    /// No vertex data.
    EmptyVertices,
    /// Vertex data does not hold a whole number of vertices.
    PartialVertex { floats: usize, floats_per_vertex: usize },
    /// Vertex or index count is not a multiple of three.
    NotTriangles { count: usize },
    /// An index refers past the last vertex.
    IndexOutOfRange { index: u32, vertex_count: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStride { stride } => {
                write!(f, "vertex stride {stride} must be a non-zero multiple of 4")
            }
            Self::InvalidComponents { location, components } => write!(
                f,
                "attribute at location {location} has {components} components; expected 1 to 4"
            ),
            Self::AttributeOutOfBounds { location } => {
                write!(f, "attribute at location {location} does not fit the vertex stride")
            }
            Self::DuplicateLocation { location } => {
                write!(f, "location {location} is used by more than one attribute")
            }
            Self::EmptyVertices => f.write_str("mesh has no vertices"),
            Self::PartialVertex { floats, floats_per_vertex } => write!(
                f,
                "{floats} floats is not a whole number of {floats_per_vertex}-float vertices"
            ),
            Self::NotTriangles { count } => {
                write!(f, "{count} elements do not form whole triangles")
            }
            Self::IndexOutOfRange { index, vertex_count } => {
                write!(f, "index {index} out of range for {vertex_count} vertices")
            }
        }
    }
}

impl std::error::Error for MeshError {}
