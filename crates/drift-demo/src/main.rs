//! Headless Temporal Drift session.
//!
//! Loads `config.ron` (and `timeline.ron` when present), applies CLI
//! overrides, then scrolls a scripted visitor through the page and logs what
//! the scene would render.
//! Run with `cargo run -p drift-demo -- --frames 900 --log-level debug`.

mod session;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use drift_animation::{AnimationMode, DriftEngine, RenderCapability};
use drift_config::{CliArgs, Config};
use drift_timeline::{Timeline, animation_duration};
use tracing::{error, info, warn};

use crate::session::{LoggingSurface, ScrollScript};

const DOCUMENT_HEIGHT: f32 = 9000.0;
const VIEWPORT_HEIGHT: f32 = 1000.0;
const VIEWPORT_WIDTH: f32 = 1600.0;
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "drift-demo", about = "Scripted headless scroll session")]
struct DemoArgs {
    #[command(flatten)]
    cli: CliArgs,

    /// Frames to simulate (defaults to the full scripted tour).
    #[arg(long)]
    frames: Option<u32>,

    /// Renderer string to report, e.g. "llvmpipe" to exercise the low-power path.
    #[arg(long, default_value = "headless")]
    renderer: String,

    /// Maximum texture size to report.
    #[arg(long, default_value_t = 16384)]
    max_texture_size: u32,

    /// Pretend no 3D context could be created.
    #[arg(long)]
    no_gpu: bool,

    /// Log a frame summary every N frames.
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn main() -> ExitCode {
    let args = DemoArgs::parse();

    let config_dir = args
        .cli
        .config
        .clone()
        .or_else(|| drift_config::default_config_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args.cli);

    let log_dir = config_dir.join("logs");
    if let Err(e) = drift_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let timeline = Timeline::load_or_default(&config_dir).unwrap_or_else(|e| {
        warn!("Ignoring invalid timeline: {e}");
        Timeline::default()
    });

    let capability = if args.no_gpu {
        RenderCapability::unsupported()
    } else {
        RenderCapability::detect(2, args.max_texture_size, 1024, &args.renderer)
    };
    let mode = AnimationMode::select(&capability, config.motion.reduced_motion);
    info!(?mode, renderer = %capability.renderer, full = capability.can_run_full_experience(), "render capability");
    if mode == AnimationMode::Static {
        info!("3D unavailable, the static page would be shown");
        return ExitCode::SUCCESS;
    }

    let reduced_motion = mode == AnimationMode::ReducedMotion;
    let overlay_fade = animation_duration(timeline.motion.duration.normal, reduced_motion);
    let script = ScrollScript::tour(&timeline.motion.easing, DOCUMENT_HEIGHT, VIEWPORT_HEIGHT);

    let mut engine = match DriftEngine::new(&config, Arc::new(timeline), &capability) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to start engine: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut surface = LoggingSurface::new(args.report_every, overlay_fade);

    let frames = args.frames.unwrap_or_else(|| script.frame_count());
    engine.mount(script.metrics_at(0));
    for frame in 0..frames {
        let elapsed = frame as f32 * FRAME_DT;
        engine.on_scroll(script.metrics_at(frame));

        // The visitor's pointer circles the middle of the viewport.
        let x = VIEWPORT_WIDTH * 0.5 + (elapsed * 0.7).cos() * VIEWPORT_WIDTH * 0.3;
        let y = VIEWPORT_HEIGHT * 0.5 + (elapsed * 0.7).sin() * VIEWPORT_HEIGHT * 0.3;
        engine.on_cursor(x, y, VIEWPORT_WIDTH, VIEWPORT_HEIGHT);

        engine.render(elapsed, FRAME_DT, &mut surface);
    }
    surface.summary();

    ExitCode::SUCCESS
}
