use crate::error::InitError;
use crate::mesh::MeshData;
use crate::paint::Color;
use crate::shader::ProgramDesc;

use super::{DrawItem, Motion, SweepConfig};

/// Everything [`RenderState`](super::RenderState) needs to build a scene:
/// programs, meshes and the order they are drawn in.
#[derive(Debug, Clone)]
pub struct SceneDesc {
    pub clear_color: Color,
    pub programs: Vec<ProgramDesc>,
    pub meshes: Vec<MeshData>,
    pub draws: Vec<DrawItem>,
    pub sweep: SweepConfig,
}

impl Default for SceneDesc {
    fn default() -> Self {
        Self {
            clear_color: Color::TEAL,
            programs: Vec::new(),
            meshes: Vec::new(),
            draws: Vec::new(),
            sweep: SweepConfig::default(),
        }
    }
}

impl SceneDesc {
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color,
            ..Self::default()
        }
    }

    /// Adds a program and returns its index.
    pub fn add_program(&mut self, program: ProgramDesc) -> usize {
        self.programs.push(program);
        self.programs.len() - 1
    }

    /// Adds a mesh and returns its index.
    pub fn add_mesh(&mut self, mesh: MeshData) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    pub fn add_draw(&mut self, item: DrawItem) {
        self.draws.push(item);
    }

    pub fn with_sweep(mut self, sweep: SweepConfig) -> Self {
        self.sweep = sweep;
        self
    }

    /// Checks that draw items reference existing programs and meshes, and
    /// that every swept uniform is requested by its program.
    pub fn validate(&self) -> Result<(), InitError> {
        if !self.clear_color.is_finite() {
            return Err(InitError::InvalidScene(format!(
                "clear color {:?} is not finite",
                self.clear_color
            )));
        }

        for (i, item) in self.draws.iter().enumerate() {
            let Some(program) = self.programs.get(item.program) else {
                return Err(InitError::InvalidScene(format!(
                    "draw {i} references program {} but the scene has {}",
                    item.program,
                    self.programs.len()
                )));
            };
            if item.mesh >= self.meshes.len() {
                return Err(InitError::InvalidScene(format!(
                    "draw {i} references mesh {} but the scene has {}",
                    item.mesh,
                    self.meshes.len()
                )));
            }
            if let Motion::Sweep { uniform } = &item.motion
                && !program.uniforms.contains(uniform)
            {
                return Err(InitError::InvalidScene(format!(
                    "draw {i} sweeps `{uniform}` which program `{}` does not request",
                    program.label
                )));
            }
        }
        Ok(())
    }
}
