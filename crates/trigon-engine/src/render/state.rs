use std::collections::HashSet;

use crate::coords::Viewport;
use crate::device::{FrameBegin, GpuApi};
use crate::error::InitError;
use crate::mesh::MeshBuffer;
use crate::paint::Color;
use crate::shader::ShaderProgram;

use super::{frame_uniforms, DrawItem, FrameState, SceneDesc, SweepConfig};

/// What happened to one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Presented { draw_calls: u32 },
    /// Nothing was presented; the animation still advanced.
    Skipped,
    /// The surface cannot be recovered; the loop should stop.
    Fatal,
}

#[derive(Debug)]
struct ItemState {
    item: DrawItem,
    /// False when the mesh layout cannot feed the program.
    enabled: bool,
}

/// GPU resources of a scene plus the animation state carried across frames.
///
/// Owns every program and mesh it creates; [`RenderState::shutdown`] releases
/// them. Dropping the state without calling it leaks nothing on the Rust
/// side but leaves the handles alive in the GPU context until that is dropped.
#[derive(Debug)]
pub struct RenderState {
    clear_color: Color,
    sweep: SweepConfig,
    programs: Vec<ShaderProgram>,
    meshes: Vec<MeshBuffer>,
    items: Vec<ItemState>,
    offset: f32,
    frame_index: u64,
    diagnostics: Vec<InitError>,
    /// Programs already reported as unusable while drawing.
    warned_unlinked: HashSet<usize>,
}

impl RenderState {
    /// Builds programs and meshes for `scene`.
    ///
    /// Only an inconsistent scene is an error, and it is detected before any
    /// GPU object is created. Compile, link and layout problems are recorded
    /// in [`diagnostics`](Self::diagnostics) and disable the affected draws.
    pub fn initialize<G>(gpu: &mut G, scene: &SceneDesc) -> Result<Self, InitError>
    where
        G: GpuApi + ?Sized,
    {
        scene.validate()?;

        let mut diagnostics = Vec::new();

        let mut programs = Vec::with_capacity(scene.programs.len());
        for desc in &scene.programs {
            let program = match ShaderProgram::build(gpu, desc) {
                Ok(program) => program,
                Err(err) => {
                    log::error!("{err}");
                    diagnostics.push(err);
                    ShaderProgram::unlinked(desc)
                }
            };
            programs.push(program);
        }

        let meshes: Vec<MeshBuffer> = scene
            .meshes
            .iter()
            .map(|data| MeshBuffer::upload(gpu, data))
            .collect();

        let mut items = Vec::with_capacity(scene.draws.len());
        for item in &scene.draws {
            let program = &programs[item.program];
            let mesh = &meshes[item.mesh];

            let mut enabled = true;
            if program.is_linked()
                && let Some(input) = mesh.missing_input(program.vertex_inputs())
            {
                let err = InitError::IncompatibleLayout {
                    program: program.label().to_string(),
                    mesh: mesh.label().to_string(),
                    location: input.location,
                };
                log::error!("{err}");
                diagnostics.push(err);
                enabled = false;
            }

            items.push(ItemState {
                item: item.clone(),
                enabled,
            });
        }

        log::info!(
            "scene ready: {} programs, {} meshes, {} draw items, {} diagnostics",
            programs.len(),
            meshes.len(),
            items.len(),
            diagnostics.len()
        );

        Ok(Self {
            clear_color: scene.clear_color,
            sweep: scene.sweep,
            programs,
            meshes,
            items,
            offset: 0.0,
            frame_index: 0,
            diagnostics,
            warned_unlinked: HashSet::new(),
        })
    }

    /// Recoverable problems found while initializing.
    pub fn diagnostics(&self) -> &[InitError] {
        &self.diagnostics
    }

    /// Current sweep offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Frames rendered or skipped so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn programs(&self) -> &[ShaderProgram] {
        &self.programs
    }

    pub fn meshes(&self) -> &[MeshBuffer] {
        &self.meshes
    }

    /// Whether draw item `index` can be drawn at all.
    pub fn item_enabled(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|i| i.enabled)
    }

    /// Advances the animation by `dt` seconds and draws one frame.
    pub fn render_frame<G>(&mut self, gpu: &mut G, dt: f32) -> FrameOutcome
    where
        G: GpuApi + ?Sized,
    {
        self.offset = self.sweep.advance(self.offset, dt);
        let frame = FrameState {
            dt,
            offset: self.offset,
            frame_index: self.frame_index,
        };
        self.frame_index += 1;

        match gpu.begin_frame(self.clear_color) {
            FrameBegin::Ready => {}
            FrameBegin::Skip => return FrameOutcome::Skipped,
            FrameBegin::Fatal => return FrameOutcome::Fatal,
        }

        let mut draw_calls = 0;
        for state in self.items.iter().filter(|s| s.enabled) {
            let program = &self.programs[state.item.program];
            let Some(handle) = program.handle() else {
                if self.warned_unlinked.insert(state.item.program) {
                    log::warn!("program `{}` is not linked; its draws are skipped", program.label());
                }
                continue;
            };
            let mesh = &self.meshes[state.item.mesh];

            for uniforms in frame_uniforms(&frame, &state.item, &self.sweep) {
                for (name, value) in uniforms {
                    if let Some(location) = program.uniform(&name) {
                        gpu.set_uniform(handle, location, value);
                    }
                }
                gpu.draw(handle, mesh.handle(), mesh.draw_range());
                draw_calls += 1;
            }
        }

        gpu.end_frame();

        log::trace!(
            "frame {} presented: {draw_calls} draws, offset {:.3}",
            frame.frame_index,
            frame.offset
        );
        FrameOutcome::Presented { draw_calls }
    }

    /// Passes the new framebuffer size straight to the viewport.
    pub fn resize<G>(&mut self, gpu: &mut G, width: u32, height: u32)
    where
        G: GpuApi + ?Sized,
    {
        log::debug!("viewport {width}x{height}");
        gpu.set_viewport(Viewport::new(width, height));
    }

    /// Releases meshes, then programs.
    pub fn shutdown<G>(self, gpu: &mut G)
    where
        G: GpuApi + ?Sized,
    {
        let (meshes, programs) = (self.meshes.len(), self.programs.len());
        for mesh in self.meshes {
            mesh.release(gpu);
        }
        for program in self.programs {
            program.release(gpu);
        }
        log::debug!("released {meshes} meshes and {programs} programs");
    }
}
