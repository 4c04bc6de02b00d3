use anyhow::Context;
use clap::Parser;
use winit::dpi::PhysicalSize;

use trigon_engine::device::GpuInit;
use trigon_engine::logging::{init_logging, LoggingConfig};
use trigon_engine::render::SweepConfig;
use trigon_engine::window::{Runtime, RuntimeConfig};

mod variants;

use variants::Variant;

/// Runs one of the LearnOpenGL "hello triangle" programs.
#[derive(Parser, Debug)]
#[command(name = "trigon-demo", about = "LearnOpenGL-style triangle demos", version)]
struct Args {
    /// Which tutorial program to run.
    #[arg(long, default_value = "sweep", value_enum)]
    variant: Variant,

    /// Target frame rate; 0 disables the limiter.
    #[arg(long, default_value = "60", value_parser = parse_fps)]
    fps: f64,

    /// Sweep speed in clip-space units per second. Negative sweeps leftwards.
    #[arg(long, default_value = "0.5", allow_negative_numbers = true)]
    speed: f32,

    /// Initial window width in pixels.
    #[arg(long, default_value = "800")]
    width: u32,

    /// Initial window height in pixels.
    #[arg(long, default_value = "600")]
    height: u32,

    /// Exit after rendering N frames.
    #[arg(long)]
    max_frames: Option<u64>,

    /// Present without waiting for vertical sync.
    #[arg(long)]
    no_vsync: bool,

    /// Log filter, e.g. `debug` or `trigon_engine=trace`. Falls back to RUST_LOG.
    #[arg(long)]
    log: Option<String>,
}

/// Slowest limited rate accepted on the command line.
const MIN_FPS: f64 = 0.01;

fn parse_fps(arg: &str) -> Result<f64, String> {
    let fps: f64 = arg.parse().map_err(|e| format!("`{arg}` is not a number: {e}"))?;
    if fps == 0.0 || (fps.is_finite() && fps >= MIN_FPS) {
        Ok(fps)
    } else {
        Err(format!("expected 0 or a finite rate of at least {MIN_FPS}"))
    }
}

impl Args {
    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            initial_size: PhysicalSize::new(self.width, self.height),
            target_fps: Some(self.fps),
            max_frames: self.max_frames,
            ..RuntimeConfig::default()
        }
    }

    fn gpu_init(&self) -> GpuInit {
        GpuInit {
            present_mode: if self.no_vsync {
                wgpu::PresentMode::AutoNoVsync
            } else {
                wgpu::PresentMode::Fifo
            },
            ..GpuInit::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let scene = args
        .variant
        .scene(SweepConfig::with_speed(args.speed))
        .with_context(|| format!("failed to build the {:?} scene", args.variant))?;

    log::info!(
        "running {:?} at {}x{}, {} fps",
        args.variant,
        args.width,
        args.height,
        args.fps
    );

    Runtime::run(args.runtime_config(), args.gpu_init(), scene)
}
