use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit};
use crate::error::InitError;
use crate::input::{translate_key_event, InputState, Key};
use crate::render::{FrameOutcome, RenderState, SceneDesc};
use crate::time::{FrameClock, FramePacer};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: PhysicalSize<u32>,
    /// Frame rate the pacer sleeps towards. `None` runs unthrottled.
    pub target_fps: Option<f64>,
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
    /// Key that closes the window.
    pub exit_key: Key,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            initial_size: PhysicalSize::new(800, 600),
            target_fps: Some(60.0),
            max_frames: None,
            exit_key: Key::Escape,
        }
    }
}

impl RuntimeConfig {
    fn pacer(&self) -> FramePacer {
        self.target_fps
            .map(FramePacer::from_fps)
            .unwrap_or_else(FramePacer::unlimited)
    }

    /// Whether the loop has run its frame budget.
    fn frames_exhausted(&self, frames: u64) -> bool {
        self.max_frames.is_some_and(|max| frames >= max)
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds `scene` and runs the frame loop until the
    /// window is closed, the exit key is pressed or the frame budget is spent.
    ///
    /// Window and GPU bring-up failures, an inconsistent scene and an
    /// unrecoverable surface are returned as errors.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, scene: SceneDesc) -> Result<()> {
        let event_loop =
            EventLoop::new().map_err(|e| InitError::WindowCreation(e.to_string()))?;
        let mut state = AppState::new(config, gpu_init, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        // `exiting` normally tears down; this covers loops that stop without it.
        state.teardown();

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,
    input: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    scene: SceneDesc,
    pacer: FramePacer,

    entry: Option<WindowEntry>,
    render: Option<RenderState>,

    frames: u64,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, scene: SceneDesc) -> Self {
        let pacer = config.pacer();
        Self {
            config,
            gpu_init,
            scene,
            pacer,
            entry: None,
            render: None,
            frames: 0,
            exit_requested: false,
            fatal: None,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn fail(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.request_exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| InitError::WindowCreation(e.to_string()))?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            clock: FrameClock::new(),
            input: InputState::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .map_err(|e| anyhow::Error::from(InitError::GpuLoader(format!("{e:#}"))))
            },
        }
        .try_build()
    }

    /// Creates the window, the GPU context and the scene resources.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut entry = self.create_window_entry(event_loop)?;

        let scene = &self.scene;
        let render = entry.with_mut(|fields| -> Result<RenderState> {
            let mut render = RenderState::initialize(&mut *fields.gpu, scene)?;
            let size = fields.window.inner_size();
            render.resize(&mut *fields.gpu, size.width, size.height);
            Ok(render)
        })?;

        if !render.diagnostics().is_empty() {
            log::warn!(
                "{} shader/layout problems; affected draws are disabled",
                render.diagnostics().len()
            );
        }

        // Startup time must not show up as the first frame's dt.
        entry.with_clock_mut(|clock| clock.reset());
        entry.with_window(|w| w.request_redraw());

        self.entry = Some(entry);
        self.render = Some(render);
        Ok(())
    }

    fn redraw(&mut self) {
        let (Some(entry), Some(render)) = (self.entry.as_mut(), self.render.as_mut()) else {
            return;
        };

        let frame_start = Instant::now();
        let outcome = entry.with_mut(|fields| {
            let time = fields.clock.tick();
            render.render_frame(fields.gpu, time.dt)
        });

        if outcome == FrameOutcome::Fatal {
            self.fail(anyhow!("surface lost and could not be recovered"));
            return;
        }

        self.frames += 1;
        if self.config.frames_exhausted(self.frames) {
            log::info!("frame limit of {} reached", self.frames);
            self.request_exit();
            return;
        }

        self.pacer.finish_frame(frame_start);
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let (Some(entry), Some(render)) = (self.entry.as_mut(), self.render.as_mut()) else {
            return;
        };

        entry.with_gpu_mut(|gpu| {
            gpu.resize(new_size);
            render.resize(gpu, new_size.width, new_size.height);
        });
        entry.with_window(|w| w.request_redraw());
    }

    /// Releases scene resources while the GPU context is still alive, then
    /// drops the window.
    fn teardown(&mut self) {
        if let (Some(render), Some(entry)) = (self.render.take(), self.entry.as_mut()) {
            entry.with_gpu_mut(|gpu| render.shutdown(gpu));
        }
        self.render = None;
        self.entry = None;
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(e);
            self.teardown();
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            self.teardown();
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the pacer throttles inside the frame.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            self.teardown();
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.request_exit(),

            WindowEvent::Focused(focused) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_input_mut(|input| input.set_focused(*focused));
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key_event = translate_key_event(event);
                let pressed = self
                    .entry
                    .as_mut()
                    .is_some_and(|entry| entry.with_input_mut(|input| input.apply_key(key_event)));

                if pressed && key_event.key == self.config.exit_key {
                    log::info!("exit key pressed");
                    self.request_exit();
                }
            }

            WindowEvent::Resized(new_size) => self.resize(*new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(new_size) = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size())) {
                    self.resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }

        if self.exit_requested {
            self.teardown();
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}
