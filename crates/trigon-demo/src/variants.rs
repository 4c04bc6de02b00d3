//! The tutorial programs, expressed as scene descriptions.

use trigon_engine::mesh::{MeshData, MeshError, VertexLayout};
use trigon_engine::paint::Color;
use trigon_engine::render::{DrawItem, SceneDesc, SweepConfig};
use trigon_engine::shader::ProgramDesc;

const SWEEP_VERT: &str = include_str!("../shaders/sweep.vert.wgsl");
const COLORED_VERT: &str = include_str!("../shaders/colored.vert.wgsl");
const POSITION_VERT: &str = include_str!("../shaders/position.vert.wgsl");
const VERTEX_COLOR_FRAG: &str = include_str!("../shaders/vertex_color.frag.wgsl");
const ORANGE_FRAG: &str = include_str!("../shaders/orange.frag.wgsl");
const YELLOW_FRAG: &str = include_str!("../shaders/yellow.frag.wgsl");

/// Interleaved position + color, one corner per primary.
#[rustfmt::skip]
const COLORED_TRIANGLE: [f32; 18] = [
    -0.5, -0.5, 0.0,   1.0, 0.0, 0.0, // left
     0.5, -0.5, 0.0,   0.0, 1.0, 0.0, // right
     0.0,  0.5, 0.0,   0.0, 0.0, 1.0, // top
];

#[rustfmt::skip]
const TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

#[rustfmt::skip]
const LEFT_TRIANGLE: [f32; 9] = [
    -0.9, -0.5, 0.0,
     0.0, -0.5, 0.0,
    -0.45, 0.5, 0.0,
];

#[rustfmt::skip]
const RIGHT_TRIANGLE: [f32; 9] = [
     0.0, -0.5, 0.0,
     0.9, -0.5, 0.0,
     0.45, 0.5, 0.0,
];

#[rustfmt::skip]
const QUAD: [f32; 12] = [
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5,  0.5, 0.0, // top left
];

const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Variant {
    /// Colored triangle sweeping left to right with wraparound.
    #[default]
    Sweep,
    /// One orange triangle.
    Triangle,
    /// One triangle with per-vertex colors.
    Colored,
    /// Two triangles in one vertex buffer.
    TwoTriangles,
    /// Two triangles with separate buffers and programs.
    TwoPrograms,
    /// Indexed rectangle made of two triangles.
    Quad,
}

impl Variant {
    pub fn scene(self, sweep: SweepConfig) -> Result<SceneDesc, MeshError> {
        let mut scene = SceneDesc::new(Color::TEAL).with_sweep(sweep);

        match self {
            Variant::Sweep => {
                let p = scene.add_program(
                    ProgramDesc::new("sweep", SWEEP_VERT, VERTEX_COLOR_FRAG).with_uniform("offset"),
                );
                let m = scene.add_mesh(MeshData::new(
                    "colored triangle",
                    COLORED_TRIANGLE.to_vec(),
                    VertexLayout::position_color(),
                )?);
                scene.add_draw(DrawItem::sweeping(p, m, "offset"));
            }

            Variant::Triangle => {
                let p = scene.add_program(orange());
                let m = scene.add_mesh(MeshData::new(
                    "triangle",
                    TRIANGLE.to_vec(),
                    VertexLayout::position(),
                )?);
                scene.add_draw(DrawItem::fixed(p, m));
            }

            Variant::Colored => {
                let p = scene.add_program(ProgramDesc::new("colored", COLORED_VERT, VERTEX_COLOR_FRAG));
                let m = scene.add_mesh(MeshData::new(
                    "colored triangle",
                    COLORED_TRIANGLE.to_vec(),
                    VertexLayout::position_color(),
                )?);
                scene.add_draw(DrawItem::fixed(p, m));
            }

            Variant::TwoTriangles => {
                let p = scene.add_program(orange());
                let vertices = [LEFT_TRIANGLE, RIGHT_TRIANGLE].concat();
                let m = scene.add_mesh(MeshData::new("two triangles", vertices, VertexLayout::position())?);
                scene.add_draw(DrawItem::fixed(p, m));
            }

            Variant::TwoPrograms => {
                let first = scene.add_program(orange());
                let second = scene.add_program(ProgramDesc::new("yellow", POSITION_VERT, YELLOW_FRAG));
                let left = scene.add_mesh(MeshData::new(
                    "left triangle",
                    LEFT_TRIANGLE.to_vec(),
                    VertexLayout::position(),
                )?);
                let right = scene.add_mesh(MeshData::new(
                    "right triangle",
                    RIGHT_TRIANGLE.to_vec(),
                    VertexLayout::position(),
                )?);
                scene.add_draw(DrawItem::fixed(first, left));
                scene.add_draw(DrawItem::fixed(second, right));
            }

            Variant::Quad => {
                let p = scene.add_program(orange());
                let m = scene.add_mesh(MeshData::indexed(
                    "quad",
                    QUAD.to_vec(),
                    QUAD_INDICES.to_vec(),
                    VertexLayout::position(),
                )?);
                scene.add_draw(DrawItem::fixed(p, m));
            }
        }

        Ok(scene)
    }
}

fn orange() -> ProgramDesc {
    ProgramDesc::new("orange", POSITION_VERT, ORANGE_FRAG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;
    use trigon_engine::mesh::DrawRange;
    use trigon_engine::render::Motion;
    use trigon_engine::shader::{compile_stage, link_stages, ShaderStage};

    #[test]
    fn every_variant_builds_a_valid_scene() {
        for variant in Variant::value_variants() {
            let scene = variant.scene(SweepConfig::default()).unwrap();
            assert!(!scene.draws.is_empty(), "{variant:?}");
            scene.validate().unwrap();
        }
    }

    #[test]
    fn every_program_compiles_and_links() {
        for variant in Variant::value_variants() {
            let scene = variant.scene(SweepConfig::default()).unwrap();
            for desc in &scene.programs {
                let vs = compile_stage(ShaderStage::Vertex, &desc.vertex_source)
                    .unwrap_or_else(|log| panic!("{}: {log}", desc.label));
                let fs = compile_stage(ShaderStage::Fragment, &desc.fragment_source)
                    .unwrap_or_else(|log| panic!("{}: {log}", desc.label));
                let interface = link_stages(&vs, &fs).unwrap_or_else(|log| panic!("{}: {log}", desc.label));

                for name in &desc.uniforms {
                    assert!(interface.uniform(name).is_some(), "{}: {name}", desc.label);
                }
            }
        }
    }

    #[test]
    fn meshes_feed_their_programs() {
        for variant in Variant::value_variants() {
            let scene = variant.scene(SweepConfig::default()).unwrap();
            for item in &scene.draws {
                let desc = &scene.programs[item.program];
                let vs = compile_stage(ShaderStage::Vertex, &desc.vertex_source).unwrap();
                let fs = compile_stage(ShaderStage::Fragment, &desc.fragment_source).unwrap();
                let interface = link_stages(&vs, &fs).unwrap();
                let layout = scene.meshes[item.mesh].layout();
                for input in &interface.vertex_inputs {
                    assert!(layout.provides(*input), "{variant:?}: {input:?}");
                }
            }
        }
    }

    #[test]
    fn sweep_is_the_only_animated_variant() {
        for variant in Variant::value_variants() {
            let scene = variant.scene(SweepConfig::default()).unwrap();
            let animated = scene.draws.iter().any(|d| matches!(d.motion, Motion::Sweep { .. }));
            assert_eq!(animated, *variant == Variant::Sweep, "{variant:?}");
        }
    }

    #[test]
    fn quad_is_two_indexed_triangles() {
        let scene = Variant::Quad.scene(SweepConfig::default()).unwrap();
        let range = scene.meshes[0].draw_range();
        assert_eq!(range, DrawRange::Indexed { first: 0, count: 6 });
        assert_eq!(range.triangle_count(), 2);
    }

    #[test]
    fn two_triangles_share_one_buffer() {
        let scene = Variant::TwoTriangles.scene(SweepConfig::default()).unwrap();
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.meshes[0].vertex_count(), 6);
    }
}
