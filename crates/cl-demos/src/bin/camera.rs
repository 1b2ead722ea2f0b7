//! Full-screen quad viewed through a keyboard-driven 2D camera.
//!
//! W/A/S/D pan, E/Q zoom, Escape quits.

use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use cl_demos::assets::{RootArgs, CAMERA_SHADER};
use cl_demos::controls::CameraControls;
use cl_engine::camera::Camera2D;
use cl_engine::core::{App, AppControl, FrameCtx};
use cl_engine::device::GpuInit;
use cl_engine::input::Key;
use cl_engine::logging::{init_logging, LoggingConfig};
use cl_engine::render::{QuadRenderer, ShaderSource};
use cl_engine::window::{Runtime, RuntimeConfig};

const CLEAR: wgpu::Color = wgpu::Color { r: 0.5, g: 0.5, b: 0.5, a: 1.0 };

/// Frames between camera status lines at debug level.
const STATUS_EVERY: u64 = 600;

#[derive(Parser)]
#[command(version, about = "2D camera demo")]
struct Cli {
    #[command(flatten)]
    root: RootArgs,

    #[arg(long, default_value = "Project")]
    title: String,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Camera pan speed in world units per second.
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Present without waiting for vblank.
    #[arg(long)]
    no_vsync: bool,
}

struct CameraDemo {
    camera: Camera2D,
    controls: CameraControls,
    quad: QuadRenderer,
}

impl App for CameraDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        if ctx.input_frame.key_pressed(Key::Escape) {
            ctx.runtime.exit();
            return Ok(AppControl::Continue);
        }

        // Input first, then matrices, so this frame renders this frame's moves.
        self.controls.apply(&mut self.camera, ctx.input, ctx.time.dt);

        let (w, h) = ctx.window.framebuffer_size();
        self.camera.compute_proj(w, h);
        self.camera.compute_view();

        if ctx.time.frame_index % STATUS_EVERY == 0 {
            log::debug!(
                "frame {}: camera at {:?}, zoom {:.2}, viewport {w}x{h}",
                ctx.time.frame_index,
                self.camera.position(),
                self.camera.zoom()
            );
        }

        let camera = &self.camera;
        let quad = &mut self.quad;
        ctx.render(CLEAR, |rctx, target| quad.render(rctx, target, camera))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let cli = Cli::parse();
    let root = cli.root.asset_root();

    // Validated here so a broken shader file fails before the window opens.
    let shader = ShaderSource::load(root.resolve(CAMERA_SHADER))?;

    let app = CameraDemo {
        camera: Camera2D::new().with_speed(cli.speed),
        controls: CameraControls::default(),
        quad: QuadRenderer::new(shader)?,
    };

    let config = RuntimeConfig {
        title: cli.title,
        initial_size: LogicalSize::new(cli.width, cli.height),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default().with_vsync(!cli.no_vsync), app)
}
