use crate::shader::VertexInput;

use super::MeshError;

const FLOAT_SIZE: u32 = std::mem::size_of::<f32>() as u32;

/// One `f32` attribute within an interleaved vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    /// Shader location the attribute feeds.
    pub location: u32,
    /// Number of `f32` components (1 to 4).
    pub components: u8,
    /// Byte offset within the vertex.
    pub offset: u32,
}

/// Interleaved vertex layout: stride plus per-attribute offset and arity.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    stride: u32,
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Validates an explicit layout.
    pub fn new(stride: u32, attributes: Vec<VertexAttribute>) -> Result<Self, MeshError> {
        if stride == 0 || stride % FLOAT_SIZE != 0 {
            return Err(MeshError::InvalidStride { stride });
        }

        for (i, attr) in attributes.iter().enumerate() {
            if !(1..=4).contains(&attr.components) {
                return Err(MeshError::InvalidComponents {
                    location: attr.location,
                    components: attr.components,
                });
            }
            let end = attr.offset + attr.components as u32 * FLOAT_SIZE;
            if attr.offset % FLOAT_SIZE != 0 || end > stride {
                return Err(MeshError::AttributeOutOfBounds { location: attr.location });
            }
            if attributes[..i].iter().any(|a| a.location == attr.location) {
                return Err(MeshError::DuplicateLocation { location: attr.location });
            }
        }

        Ok(Self { stride, attributes })
    }

    /// Packs `(location, components)` pairs back to back in the given order.
    pub fn interleaved(attributes: &[(u32, u8)]) -> Result<Self, MeshError> {
        let mut offset = 0;
        let mut packed = Vec::with_capacity(attributes.len());
        for &(location, components) in attributes {
            packed.push(VertexAttribute { location, components, offset });
            offset += components as u32 * FLOAT_SIZE;
        }
        Self::new(offset, packed)
    }

    /// `vec3` position at location 0.
    pub fn position() -> Self {
        Self {
            stride: 3 * FLOAT_SIZE,
            attributes: vec![VertexAttribute { location: 0, components: 3, offset: 0 }],
        }
    }

    /// `vec3` position at location 0 followed by a `vec3` color at location 1.
    pub fn position_color() -> Self {
        Self {
            stride: 6 * FLOAT_SIZE,
            attributes: vec![
                VertexAttribute { location: 0, components: 3, offset: 0 },
                VertexAttribute { location: 1, components: 3, offset: 3 * FLOAT_SIZE },
            ],
        }
    }

    /// Bytes between consecutive vertices.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn floats_per_vertex(&self) -> usize {
        (self.stride / FLOAT_SIZE) as usize
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn attribute(&self, location: u32) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.location == location)
    }

    /// Whether the layout feeds `input` with a matching arity.
    pub fn provides(&self, input: VertexInput) -> bool {
        self.attribute(input.location)
            .is_some_and(|a| a.components == input.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_computes_offsets_and_stride() {
        let layout = VertexLayout::interleaved(&[(0, 3), (1, 3)]).unwrap();
        assert_eq!(layout, VertexLayout::position_color());
        assert_eq!(layout.stride(), 24);
        assert_eq!(layout.attribute(1).unwrap().offset, 12);
        assert_eq!(layout.floats_per_vertex(), 6);
    }

    #[test]
    fn duplicate_location_is_rejected() {
        let err = VertexLayout::interleaved(&[(0, 3), (0, 2)]).unwrap_err();
        assert_eq!(err, MeshError::DuplicateLocation { location: 0 });
    }

    #[test]
    fn invalid_arity_is_rejected() {
        let err = VertexLayout::interleaved(&[(0, 5)]).unwrap_err();
        assert_eq!(err, MeshError::InvalidComponents { location: 0, components: 5 });
    }

    #[test]
    fn attribute_past_stride_is_rejected() {
        let attrs = vec![VertexAttribute { location: 0, components: 3, offset: 4 }];
        let err = VertexLayout::new(12, attrs).unwrap_err();
        assert_eq!(err, MeshError::AttributeOutOfBounds { location: 0 });
    }

    #[test]
    fn zero_stride_is_rejected() {
        assert_eq!(
            VertexLayout::new(0, Vec::new()).unwrap_err(),
            MeshError::InvalidStride { stride: 0 }
        );
    }

    #[test]
    fn provides_checks_location_and_arity() {
        let layout = VertexLayout::position_color();
        assert!(layout.provides(VertexInput { location: 1, components: 3 }));
        assert!(!layout.provides(VertexInput { location: 1, components: 4 }));
        assert!(!layout.provides(VertexInput { location: 2, components: 3 }));
    }
}
