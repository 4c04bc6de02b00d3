//! Static mesh data and its GPU-side counterpart.

mod buffer;
mod data;
mod error;
mod layout;

pub use buffer::MeshBuffer;
pub use data::{DrawMode, DrawRange, MeshData};
pub use error::MeshError;
pub use layout::{VertexAttribute, VertexLayout};
