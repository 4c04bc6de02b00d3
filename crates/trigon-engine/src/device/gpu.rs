use std::collections::{HashMap, HashSet};
use std::num::NonZeroU64;

use anyhow::{Context, Result};
use naga::valid::Capabilities;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::Viewport;
use crate::mesh::{DrawRange, MeshData};
use crate::paint::Color;
use crate::shader::{self, CompiledStage, ProgramInterface, ShaderStage, UniformLocation, VertexInput};

use super::{surface, FrameBegin, GpuApi, GpuInit, MeshHandle, ProgramHandle, StageHandle, UniformValue};

/// Smallest uniform arena allocation, in bytes.
const MIN_ARENA_SIZE: u64 = 16 * 1024;

/// wgpu-backed [`GpuApi`] bound to one window surface.
///
/// Draws are recorded between `begin_frame` and `end_frame` and replayed in
/// a single render pass. Uniform values are snapshotted per draw into a
/// shared arena and addressed with dynamic offsets, so a uniform written
/// between two draws affects only the second one.
pub struct Gpu<'w> {
    /// Surface bound to the window; the window must outlive the `Gpu`.
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    capabilities: Capabilities,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
    viewport: Viewport,

    next_id: u32,
    stages: HashMap<StageHandle, StageEntry>,
    programs: HashMap<ProgramHandle, ProgramEntry>,
    meshes: HashMap<MeshHandle, MeshEntry>,
    pipelines: HashMap<(ProgramHandle, MeshHandle), wgpu::RenderPipeline>,
    /// Pairs whose pipeline was rejected by the device; their draws are dropped.
    failed_pipelines: HashSet<(ProgramHandle, MeshHandle)>,

    arena: UniformArena,
    frame: Option<FrameRecording>,
}

struct StageEntry {
    compiled: CompiledStage,
    source: String,
}

struct ProgramEntry {
    interface: ProgramInterface,
    vertex_module: wgpu::ShaderModule,
    vertex_entry: String,
    fragment_module: wgpu::ShaderModule,
    fragment_entry: String,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    pipeline_layout: wgpu::PipelineLayout,
    /// Bind group over the arena, tagged with the arena generation it was built for.
    bind_group: Option<(u64, wgpu::BindGroup)>,
    /// Current bytes of each uniform slot, in `interface.uniforms` order.
    values: Vec<Vec<u8>>,
}

struct MeshEntry {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    stride: u64,
    attributes: Vec<wgpu::VertexAttribute>,
}

#[derive(Default)]
struct UniformArena {
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
    generation: u64,
}

struct RecordedDraw {
    program: ProgramHandle,
    mesh: MeshHandle,
    range: DrawRange,
    uniforms: Vec<Vec<u8>>,
}

/// A frame between `begin_frame` and `end_frame`.
///
/// Holding the surface texture blocks acquisition of the next one, so a
/// recording must be finished promptly.
struct FrameRecording {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    clear: Color,
    draws: Vec<RecordedDraw>,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("using adapter `{}` ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("trigon device"),
                required_features: wgpu::Features::empty(),
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, init.prefer_srgb)
            .context("no supported surface formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        let capabilities = shader_capabilities_for(device.features());

        surface.configure(&device, &config);
        log::debug!("surface configured: {format:?} {}x{}", size.width, size.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            capabilities,
            size,
            viewport: Viewport::new(size.width, size.height),
            next_id: 0,
            stages: HashMap::new(),
            programs: HashMap::new(),
            meshes: HashMap::new(),
            pipelines: HashMap::new(),
            failed_pipelines: HashSet::new(),
            arena: UniformArena::default(),
            frame: None,
        })
    }

    /// Reconfigures the surface after a resize.
    ///
    /// The viewport is separate; see [`GpuApi::set_viewport`].
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    fn allocate_id(&mut self) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }

    fn ensure_pipeline(&mut self, program: ProgramHandle, mesh: MeshHandle) {
        let key = (program, mesh);
        if self.pipelines.contains_key(&key) || self.failed_pipelines.contains(&key) {
            return;
        }
        let (Some(p), Some(m)) = (self.programs.get(&program), self.meshes.get(&mesh)) else {
            return;
        };

        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trigon pipeline"),
            layout: Some(&p.pipeline_layout),

            vertex: wgpu::VertexState {
                module: &p.vertex_module,
                entry_point: Some(p.vertex_entry.as_str()),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: m.stride,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &m.attributes,
                }],
            },

            fragment: Some(wgpu::FragmentState {
                module: &p.fragment_module,
                entry_point: Some(p.fragment_entry.as_str()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            log::warn!("pipeline for {program:?} with {mesh:?} rejected; its draws are skipped: {err}");
            self.failed_pipelines.insert(key);
            return;
        }

        self.pipelines.insert(key, pipeline);
    }

    fn ensure_arena(&mut self, required: u64) {
        if required <= self.arena.capacity && self.arena.buffer.is_some() {
            return;
        }

        let capacity = required.next_power_of_two().max(MIN_ARENA_SIZE);
        self.arena.buffer = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trigon uniform arena"),
            size: capacity,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.arena.capacity = capacity;
        self.arena.generation += 1;
        log::debug!("uniform arena grown to {capacity} bytes");
    }

    fn ensure_bind_group(&mut self, program: ProgramHandle) {
        let Some(buffer) = self.arena.buffer.as_ref() else { return };
        let generation = self.arena.generation;
        let Some(entry) = self.programs.get_mut(&program) else { return };
        let Some(layout) = entry.bind_group_layout.as_ref() else { return };

        if matches!(&entry.bind_group, Some((built_for, _)) if *built_for == generation) {
            return;
        }

        let entries: Vec<wgpu::BindGroupEntry<'_>> = entry
            .interface
            .uniforms
            .iter()
            .map(|slot| wgpu::BindGroupEntry {
                binding: slot.binding,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    size: NonZeroU64::new(slot.size as u64),
                }),
            })
            .collect();

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trigon uniforms"),
            layout,
            entries: &entries,
        });

        entry.bind_group = Some((generation, bind_group));
    }
}

impl GpuApi for Gpu<'_> {
    fn shader_capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn compile_stage(&mut self, stage: ShaderStage, source: &str) -> Result<StageHandle, String> {
        let compiled = shader::compile_stage_with(stage, source, self.capabilities)?;
        let handle = StageHandle::from_raw(self.allocate_id());
        self.stages.insert(
            handle,
            StageEntry {
                compiled,
                source: source.to_string(),
            },
        );
        Ok(handle)
    }

    fn release_stage(&mut self, stage: StageHandle) {
        self.stages.remove(&stage);
    }

    fn link_program(
        &mut self,
        vertex: StageHandle,
        fragment: StageHandle,
    ) -> Result<ProgramHandle, String> {
        let (Some(vs), Some(fs)) = (self.stages.get(&vertex), self.stages.get(&fragment)) else {
            return Err("unknown shader stage handle".to_string());
        };

        let interface = shader::link_stages(&vs.compiled, &fs.compiled)?;

        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let vertex_module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trigon vertex stage"),
            source: wgpu::ShaderSource::Wgsl(vs.source.as_str().into()),
        });
        let fragment_module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trigon fragment stage"),
            source: wgpu::ShaderSource::Wgsl(fs.source.as_str().into()),
        });
        let vertex_entry = vs.compiled.entry_name().to_string();
        let fragment_entry = fs.compiled.entry_name().to_string();

        let bind_group_layout = if interface.uniforms.is_empty() {
            None
        } else {
            let entries: Vec<wgpu::BindGroupLayoutEntry> = interface
                .uniforms
                .iter()
                .map(|slot| wgpu::BindGroupLayoutEntry {
                    binding: slot.binding,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(slot.size as u64),
                    },
                    count: None,
                })
                .collect();

            Some(self.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("trigon uniforms bgl"),
                entries: &entries,
            }))
        };

        let layouts: Vec<&wgpu::BindGroupLayout> = bind_group_layout.iter().collect();
        let pipeline_layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trigon pipeline layout"),
            bind_group_layouts: &layouts,
            immediate_size: 0,
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(err.to_string());
        }

        let values = interface
            .uniforms
            .iter()
            .map(|slot| vec![0u8; slot.size as usize])
            .collect();

        let handle = ProgramHandle::from_raw(self.allocate_id());
        self.programs.insert(
            handle,
            ProgramEntry {
                interface,
                vertex_module,
                vertex_entry,
                fragment_module,
                fragment_entry,
                bind_group_layout,
                pipeline_layout,
                bind_group: None,
                values,
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
        self.programs.remove(&program);
        self.pipelines.retain(|(p, _), _| *p != program);
        self.failed_pipelines.retain(|(p, _)| *p != program);
    }

    fn create_mesh(&mut self, mesh: &MeshData) -> MeshHandle {
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(mesh.label()),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = mesh.indices().map(|indices| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(mesh.label()),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let attributes = mesh
            .layout()
            .attributes()
            .iter()
            .map(|a| wgpu::VertexAttribute {
                format: vertex_format(a.components),
                offset: a.offset as u64,
                shader_location: a.location,
            })
            .collect();

        let handle = MeshHandle::from_raw(self.allocate_id());
        self.meshes.insert(
            handle,
            MeshEntry {
                vertex_buffer,
                index_buffer,
                stride: mesh.layout().stride() as u64,
                attributes,
            },
        );
        handle
    }

    fn release_mesh(&mut self, mesh: MeshHandle) {
        self.meshes.remove(&mesh);
        self.pipelines.retain(|(_, m), _| *m != mesh);
        self.failed_pipelines.retain(|(_, m)| *m != mesh);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn begin_frame(&mut self, clear: Color) -> FrameBegin {
        if self.frame.take().is_some() {
            log::warn!("begin_frame while a frame was open; previous frame dropped");
        }

        if self.size.width == 0 || self.size.height == 0 {
            return FrameBegin::Skip;
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => {
                return surface::recover_from_surface_error(
                    &self.surface,
                    &self.device,
                    &self.config,
                    self.size,
                    err,
                );
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.frame = Some(FrameRecording {
            surface_texture,
            view,
            clear,
            draws: Vec::new(),
        });

        FrameBegin::Ready
    }

    fn set_uniform(&mut self, program: ProgramHandle, location: UniformLocation, value: UniformValue) {
        let Some(entry) = self.programs.get_mut(&program) else {
            log::warn!("set_uniform on unknown program {program:?}");
            return;
        };
        let Some(index) = entry.interface.slot_index(location) else {
            log::warn!("set_uniform: no uniform at {location:?}");
            return;
        };

        let bytes = value.as_bytes();
        let slot = &mut entry.values[index];
        if bytes.len() != slot.len() {
            log::warn!(
                "uniform `{}` holds {} bytes; {value:?} ignored",
                entry.interface.uniforms[index].name,
                slot.len()
            );
            return;
        }
        slot.copy_from_slice(bytes);
    }

    fn draw(&mut self, program: ProgramHandle, mesh: MeshHandle, range: DrawRange) {
        let Some(frame) = self.frame.as_mut() else {
            log::warn!("draw outside of a frame ignored");
            return;
        };
        let Some(entry) = self.programs.get(&program) else { return };
        if !self.meshes.contains_key(&mesh) {
            return;
        }

        frame.draws.push(RecordedDraw {
            program,
            mesh,
            range,
            uniforms: entry.values.clone(),
        });
    }

    fn end_frame(&mut self) {
        let Some(frame) = self.frame.take() else {
            log::warn!("end_frame without begin_frame");
            return;
        };

        for draw in &frame.draws {
            self.ensure_pipeline(draw.program, draw.mesh);
        }

        let align = self.device.limits().min_uniform_buffer_offset_alignment as u64;
        let (staging, offsets) = pack_uniforms(&frame.draws, align);

        if !staging.is_empty() {
            self.ensure_arena(staging.len() as u64);
            if let Some(buffer) = self.arena.buffer.as_ref() {
                self.queue.write_buffer(buffer, 0, &staging);
            }
            for draw in &frame.draws {
                self.ensure_bind_group(draw.program);
            }
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trigon frame encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trigon frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(frame.clear.into()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let viewport = self.viewport.clamped_to(self.config.width, self.config.height);
            if !viewport.is_empty() {
                rpass.set_viewport(
                    0.0,
                    0.0,
                    viewport.width as f32,
                    viewport.height as f32,
                    0.0,
                    1.0,
                );

                for (draw, draw_offsets) in frame.draws.iter().zip(&offsets) {
                    let (Some(pipeline), Some(program), Some(mesh)) = (
                        self.pipelines.get(&(draw.program, draw.mesh)),
                        self.programs.get(&draw.program),
                        self.meshes.get(&draw.mesh),
                    ) else {
                        continue;
                    };

                    rpass.set_pipeline(pipeline);
                    if program.bind_group_layout.is_some() {
                        let Some((_, bind_group)) = program.bind_group.as_ref() else { continue };
                        rpass.set_bind_group(0, bind_group, draw_offsets);
                    }
                    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));

                    match draw.range {
                        DrawRange::Vertices { first, count } => {
                            rpass.draw(first..first + count, 0..1);
                        }
                        DrawRange::Indexed { first, count } => {
                            let Some(index_buffer) = mesh.index_buffer.as_ref() else { continue };
                            rpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                            rpass.draw_indexed(first..first + count, 0, 0..1);
                        }
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.surface_texture.present();
    }
}

fn vertex_format(components: u8) -> wgpu::VertexFormat {
    // Layouts are validated to 1..=4 components.
    match components {
        1 => wgpu::VertexFormat::Float32,
        2 => wgpu::VertexFormat::Float32x2,
        3 => wgpu::VertexFormat::Float32x3,
        _ => wgpu::VertexFormat::Float32x4,
    }
}

fn align_up(value: u64, align: u64) -> u64 {
    value.div_ceil(align) * align
}

/// Packs every draw's uniform snapshot into one staging buffer.
///
/// Each slot starts at a multiple of `align`. Returns the bytes and, per draw,
/// the dynamic offsets of its slots in the order the draw lists them.
fn pack_uniforms(draws: &[RecordedDraw], align: u64) -> (Vec<u8>, Vec<Vec<wgpu::DynamicOffset>>) {
    let mut staging: Vec<u8> = Vec::new();
    let mut offsets = Vec::with_capacity(draws.len());
    for draw in draws {
        let mut draw_offsets = Vec::with_capacity(draw.uniforms.len());
        for bytes in &draw.uniforms {
            draw_offsets.push(staging.len() as wgpu::DynamicOffset);
            staging.extend_from_slice(bytes);
            staging.resize(align_up(staging.len() as u64, align) as usize, 0);
        }
        offsets.push(draw_offsets);
    }
    (staging, offsets)
}

/// naga capabilities enabled by a device with `features`.
fn shader_capabilities_for(features: wgpu::Features) -> Capabilities {
    let mut caps = Capabilities::default();
    caps.set(Capabilities::FLOAT64, features.contains(wgpu::Features::SHADER_F64));
    caps.set(Capabilities::SHADER_FLOAT16, features.contains(wgpu::Features::SHADER_F16));
    caps.set(
        Capabilities::PRIMITIVE_INDEX,
        features.contains(wgpu::Features::SHADER_PRIMITIVE_INDEX),
    );
    caps.set(Capabilities::CLIP_DISTANCE, features.contains(wgpu::Features::CLIP_DISTANCES));
    caps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_multiple() {
        assert_eq!(align_up(0, 256), 0);
        assert_eq!(align_up(8, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 256), 512);
    }

    fn snapshot(values: &[UniformValue]) -> RecordedDraw {
        RecordedDraw {
            program: ProgramHandle::from_raw(1),
            mesh: MeshHandle::from_raw(2),
            range: DrawRange::Vertices { first: 0, count: 3 },
            uniforms: values.iter().map(|v| v.as_bytes().to_vec()).collect(),
        }
    }

    #[test]
    fn main_and_ghost_draws_get_their_own_offsets() {
        let main = UniformValue::Vec2([0.6, 0.0]);
        let ghost = UniformValue::Vec2([-1.4, 0.0]);
        let (bytes, offsets) = pack_uniforms(&[snapshot(&[main]), snapshot(&[ghost])], 256);

        assert_eq!(offsets, vec![vec![0], vec![256]]);
        assert_eq!(bytes.len(), 512);
        assert_eq!(&bytes[0..8], main.as_bytes());
        assert_eq!(&bytes[256..264], ghost.as_bytes());
        assert!(bytes[8..256].iter().all(|b| *b == 0));
    }

    #[test]
    fn slots_are_packed_in_listed_order() {
        let first = UniformValue::Float(1.0);
        let second = UniformValue::Vec4([0.1, 0.2, 0.3, 0.4]);
        let (bytes, offsets) = pack_uniforms(&[snapshot(&[first, second])], 64);

        assert_eq!(offsets, vec![vec![0, 64]]);
        assert_eq!(&bytes[0..4], first.as_bytes());
        assert_eq!(&bytes[64..80], second.as_bytes());
    }

    #[test]
    fn draws_without_uniforms_pack_nothing() {
        let (bytes, offsets) = pack_uniforms(&[snapshot(&[]), snapshot(&[])], 256);
        assert!(bytes.is_empty());
        assert_eq!(offsets, vec![Vec::<wgpu::DynamicOffset>::new(); 2]);
    }

    #[test]
    fn capabilities_follow_device_features() {
        assert_eq!(shader_capabilities_for(wgpu::Features::empty()), Capabilities::default());

        let caps = shader_capabilities_for(wgpu::Features::SHADER_F16);
        assert!(caps.contains(Capabilities::SHADER_FLOAT16));
        assert!(!caps.contains(Capabilities::FLOAT64));
    }

    #[test]
    fn vertex_format_by_arity() {
        assert_eq!(vertex_format(1), wgpu::VertexFormat::Float32);
        assert_eq!(vertex_format(3), wgpu::VertexFormat::Float32x3);
        assert_eq!(vertex_format(4), wgpu::VertexFormat::Float32x4);
    }
}
