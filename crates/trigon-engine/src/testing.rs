//! In-memory [`GpuApi`] used by unit tests.
//!
//! Compiles and links through the same naga helpers as the wgpu backend, so
//! diagnostics match, but records commands instead of submitting them.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::coords::Viewport;
use crate::device::{FrameBegin, GpuApi, MeshHandle, ProgramHandle, StageHandle, UniformValue};
use crate::mesh::{DrawRange, MeshData};
use crate::paint::Color;
use crate::shader::{self, CompiledStage, ProgramInterface, ShaderStage, UniformLocation, VertexInput};

#[derive(Debug, Clone)]
pub(crate) enum GpuEvent {
    Clear(Color),
    Uniform {
        program: ProgramHandle,
        location: UniformLocation,
        value: UniformValue,
    },
    Draw(RecordedDraw),
    Present,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedDraw {
    pub program: ProgramHandle,
    pub mesh: MeshHandle,
    pub range: DrawRange,
    /// Uniform values current at the time of the draw.
    pub uniforms: BTreeMap<UniformLocation, UniformValue>,
}

impl RecordedDraw {
    pub fn uniform(&self, location: UniformLocation) -> Option<UniformValue> {
        self.uniforms.get(&location).copied()
    }
}

struct RecordedProgram {
    interface: ProgramInterface,
    values: BTreeMap<UniformLocation, UniformValue>,
}

#[derive(Default)]
pub(crate) struct RecordingGpu {
    next_id: u32,
    stages: HashMap<StageHandle, CompiledStage>,
    programs: HashMap<ProgramHandle, RecordedProgram>,
    meshes: HashMap<MeshHandle, String>,
    viewport: Option<Viewport>,
    events: Vec<GpuEvent>,
    scripted_begins: VecDeque<FrameBegin>,
    in_frame: bool,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_stages(&self) -> usize {
        self.stages.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn live_resources(&self) -> usize {
        self.live_stages() + self.live_programs() + self.live_meshes()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn events(&self) -> &[GpuEvent] {
        &self.events
    }

    pub fn draws(&self) -> Vec<&RecordedDraw> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GpuEvent::Draw(draw) => Some(draw),
                _ => None,
            })
            .collect()
    }

    pub fn presents(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GpuEvent::Present))
            .count()
    }

    /// Makes the next `begin_frame` return `result` instead of `Ready`.
    pub fn script_begin(&mut self, result: FrameBegin) {
        self.scripted_begins.push_back(result);
    }

    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GpuApi for RecordingGpu {
    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<StageHandle, String> {
        let compiled = shader::compile_stage_with(stage, source, self.shader_capabilities())?;
        let handle = StageHandle::from_raw(self.allocate_id());
        self.stages.insert(handle, compiled);
        Ok(handle)
    }

    fn release_stage(&mut self, stage: StageHandle) {
        assert!(self.stages.remove(&stage).is_some(), "double release of {stage:?}");
    }

    fn link_program(
        &mut self,
        vertex: StageHandle,
        fragment: StageHandle,
    ) -> Result<ProgramHandle, String> {
        let (Some(vs), Some(fs)) = (self.stages.get(&vertex), self.stages.get(&fragment)) else {
            return Err("unknown shader stage handle".to_string());
        };
        let interface = shader::link_stages(vs, fs)?;
        let handle = ProgramHandle::from_raw(self.allocate_id());
        self.programs.insert(
            handle,
            RecordedProgram {
                interface,
                values: BTreeMap::new(),
            },
        );
        Ok(handle)
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        self.programs
            .get(&program)?
            .interface
            .uniform(name)
            .map(|slot| slot.location())
    }

    fn vertex_inputs(&self, program: ProgramHandle) -> Vec<VertexInput> {
        self.programs
            .get(&program)
            .map(|p| p.interface.vertex_inputs.clone())
            .unwrap_or_default()
    }

    fn release_program(&mut self, program: ProgramHandle) {
        assert!(self.programs.remove(&program).is_some(), "double release of {program:?}");
    }

    fn create_mesh(&mut self, mesh: &MeshData) -> MeshHandle {
        let handle = MeshHandle::from_raw(self.allocate_id());
        self.meshes.insert(handle, mesh.label().to_string());
        handle
    }

    fn release_mesh(&mut self, mesh: MeshHandle) {
        assert!(self.meshes.remove(&mesh).is_some(), "double release of {mesh:?}");
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn begin_frame(&mut self, clear: Color) -> FrameBegin {
        assert!(!self.in_frame, "begin_frame while a frame is open");
        let result = self.scripted_begins.pop_front().unwrap_or(FrameBegin::Ready);
        if result == FrameBegin::Ready {
            self.in_frame = true;
            self.events.push(GpuEvent::Clear(clear));
        }
        result
    }

    fn set_uniform(&mut self, program: ProgramHandle, location: UniformLocation, value: UniformValue) {
        let p = self.programs.get_mut(&program).expect("set_uniform on a released program");
        assert!(
            p.interface.slot_index(location).is_some(),
            "no uniform at {location:?}"
        );
        p.values.insert(location, value);
        self.events.push(GpuEvent::Uniform {
            program,
            location,
            value,
        });
    }

    fn draw(&mut self, program: ProgramHandle, mesh: MeshHandle, range: DrawRange) {
        assert!(self.in_frame, "draw outside of a frame");
        assert!(self.meshes.contains_key(&mesh), "draw with a released mesh");
        let p = self.programs.get(&program).expect("draw with a released program");
        self.events.push(GpuEvent::Draw(RecordedDraw {
            program,
            mesh,
            range,
            uniforms: p.values.clone(),
        }));
    }

    fn end_frame(&mut self) {
        assert!(self.in_frame, "end_frame without begin_frame");
        self.in_frame = false;
        self.events.push(GpuEvent::Present);
    }
}

/// WGSL sources shared by tests.
pub(crate) mod shaders {
    /// Position + color inputs, shifted by an `offset` uniform.
    pub const COLOR_VERTEX: &str = r#"
        @group(0) @binding(0) var<uniform> offset: vec2<f32>;

        struct VertexOut {
            @builtin(position) clip: vec4<f32>,
            @location(0) color: vec3<f32>,
        };

        @vertex
        fn vs_main(@location(0) pos: vec3<f32>, @location(1) color: vec3<f32>) -> VertexOut {
            var out: VertexOut;
            out.clip = vec4<f32>(pos.x + offset.x, pos.y + offset.y, pos.z, 1.0);
            out.color = color;
            return out;
        }
    "#;

    pub const COLOR_FRAGMENT: &str = r#"
        @fragment
        fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
            return vec4<f32>(color, 1.0);
        }
    "#;

    pub const FLAT_VERTEX: &str = r#"
        @vertex
        fn vs_main(@location(0) pos: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(pos, 1.0);
        }
    "#;

    pub const ORANGE_FRAGMENT: &str = r#"
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.5, 0.2, 1.0);
        }
    "#;

    pub const MALFORMED: &str = "@vertex fn vs_main( -> {";

    /// Valid WGSL that needs half-float support.
    pub const HALF_VERTEX: &str = r#"
        enable f16;

        @vertex
        fn vs_main(@location(0) pos: vec3<f32>) -> @builtin(position) vec4<f32> {
            let h: f16 = 1.0h;
            return vec4<f32>(pos, f32(h));
        }
    "#;
}
