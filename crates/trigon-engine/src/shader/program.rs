use std::collections::HashMap;

use crate::device::{GpuApi, ProgramHandle};
use crate::error::InitError;

use super::{cap_log, ShaderStage, UniformLocation, VertexInput};

/// Source description of one shader program.
#[derive(Debug, Clone)]
pub struct ProgramDesc {
    pub label: String,
    pub vertex_source: String,
    pub fragment_source: String,
    /// Uniforms whose locations are resolved once after link.
    pub uniforms: Vec<String>,
}

impl ProgramDesc {
    pub fn new(
        label: impl Into<String>,
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            vertex_source: vertex_source.into(),
            fragment_source: fragment_source.into(),
            uniforms: Vec::new(),
        }
    }

    pub fn with_uniform(mut self, name: impl Into<String>) -> Self {
        self.uniforms.push(name.into());
        self
    }
}

/// A vertex + fragment pair linked into one executable unit.
///
/// A program without a handle failed to compile or link; it is kept so the
/// scene layout stays intact, but nothing is drawn with it.
#[derive(Debug)]
pub struct ShaderProgram {
    label: String,
    vertex_source: String,
    fragment_source: String,
    handle: Option<ProgramHandle>,
    uniforms: HashMap<String, UniformLocation>,
    vertex_inputs: Vec<VertexInput>,
}

impl ShaderProgram {
    /// Compiles both stages, links them and resolves the requested uniforms.
    ///
    /// Stage objects are released as soon as the link step is done, whether
    /// it succeeded or not.
    pub fn build<G>(gpu: &mut G, desc: &ProgramDesc) -> Result<Self, InitError>
    where
        G: GpuApi + ?Sized,
    {
        let vertex = gpu
            .compile_stage(ShaderStage::Vertex, &desc.vertex_source)
            .map_err(|log| compile_error(desc, ShaderStage::Vertex, log))?;

        let fragment = match gpu.compile_stage(ShaderStage::Fragment, &desc.fragment_source) {
            Ok(fragment) => fragment,
            Err(log) => {
                gpu.release_stage(vertex);
                return Err(compile_error(desc, ShaderStage::Fragment, log));
            }
        };

        let linked = gpu.link_program(vertex, fragment);
        gpu.release_stage(vertex);
        gpu.release_stage(fragment);

        let handle = linked.map_err(|log| InitError::ProgramLink {
            program: desc.label.clone(),
            log: cap_log(log),
        })?;

        let mut uniforms = HashMap::with_capacity(desc.uniforms.len());
        for name in &desc.uniforms {
            match gpu.uniform_location(handle, name) {
                Some(location) => {
                    uniforms.insert(name.clone(), location);
                }
                None => log::warn!(
                    "program `{}`: uniform `{name}` not found; values for it are dropped",
                    desc.label
                ),
            }
        }

        let vertex_inputs = gpu.vertex_inputs(handle);

        log::debug!(
            "program `{}` linked: {} vertex inputs, {} uniforms resolved",
            desc.label,
            vertex_inputs.len(),
            uniforms.len()
        );

        Ok(Self {
            label: desc.label.clone(),
            vertex_source: desc.vertex_source.clone(),
            fragment_source: desc.fragment_source.clone(),
            handle: Some(handle),
            uniforms,
            vertex_inputs,
        })
    }

    /// Placeholder for a program that failed to build.
    pub fn unlinked(desc: &ProgramDesc) -> Self {
        Self {
            label: desc.label.clone(),
            vertex_source: desc.vertex_source.clone(),
            fragment_source: desc.fragment_source.clone(),
            handle: None,
            uniforms: HashMap::new(),
            vertex_inputs: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    pub fn is_linked(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<ProgramHandle> {
        self.handle
    }

    /// Cached location of `name`, if it was requested and found.
    pub fn uniform(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms.get(name).copied()
    }

    pub fn vertex_inputs(&self) -> &[VertexInput] {
        &self.vertex_inputs
    }

    pub(crate) fn release<G>(self, gpu: &mut G)
    where
        G: GpuApi + ?Sized,
    {
        if let Some(handle) = self.handle {
            gpu.release_program(handle);
        }
    }
}

fn compile_error(desc: &ProgramDesc, stage: ShaderStage, log: String) -> InitError {
    InitError::ShaderCompile {
        program: desc.label.clone(),
        stage,
        log: cap_log(log),
    }
}
