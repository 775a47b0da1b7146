//! Subcommand handlers for run, map and config actions.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::args::{ConfigAction, MapArgs, RunArgs};
use crate::config::{default_path, Config, OutputFormat};
use crate::detect::{LandmarkSource, ScriptedLandmarkSource};
use crate::error::Result;
use crate::frame::{CaptureSession, FrameSource, LatestFrameSlot, SyntheticCamera};
use crate::geometry::{map_landmark_group_with_inset, scale_bounding_box, MappedRegion};
use crate::overlay::OverlayCompositor;
use crate::render_loop::{JsonSink, LogSink, LoopStats, RenderLoop, RenderSink};

/// Lay command-line flags over the loaded configuration.
pub fn apply_run_overrides(config: &mut Config, run: &RunArgs) {
    if let Some(frames) = run.frames {
        config.render.max_frames = Some(frames);
    }
    if let Some(fps) = run.fps {
        config.camera.fps = fps;
    }
    if let Some(viewport) = run.viewport {
        config.viewport.width = viewport.width;
        config.viewport.height = viewport.height;
    }
    if let Some(correction) = run.correction {
        config.camera.orientation = correction.into();
    }
    if let Some(output) = run.output {
        config.render.output = output.into();
    }
    if run.extra_landmarks {
        config.overlay.extra_landmarks = true;
    }
    if run.hide_missing {
        config.overlay.hide_missing_sprites = true;
    }
    if run.no_debug {
        config.overlay.debug_drawing = false;
    }
}

/// Load the script named by `run` and drive the pipeline until the frame
/// limit is reached or `stop` is raised.
pub fn run(config: &Config, run: &RunArgs, stop: Arc<AtomicBool>) -> Result<LoopStats> {
    let detector = ScriptedLandmarkSource::from_path(&run.script)?;
    run_pipeline(config, Box::new(SyntheticCamera::new()), Box::new(detector), stop)
}

/// Wire capture, render loop and sink together and run them.
///
/// A capture-setup failure is fatal: the loop is torn down and the error
/// returned.
///
/// # Arguments
/// * `config` - Effective configuration, CLI overrides already applied
/// * `camera` - Frame source handed to the capture session
/// * `detector` - Landmark source driven by the render loop
/// * `stop` - Raised by the Ctrl+C handler to end the run early
///
/// # Errors
/// * `Error::Capture` - the session rejected its settings or the source failed to open
/// * `Error::Loop` - a pipeline thread could not be spawned or panicked
pub fn run_pipeline(
    config: &Config,
    camera: Box<dyn FrameSource>,
    detector: Box<dyn LandmarkSource>,
    stop: Arc<AtomicBool>,
) -> Result<LoopStats> {
    let slot = Arc::new(LatestFrameSlot::new());
    let sink: Box<dyn RenderSink> = match config.render.output {
        OutputFormat::Log => Box::new(LogSink),
        OutputFormat::Json => Box::new(JsonSink::new(std::io::stdout())),
    };
    let compositor = OverlayCompositor::new(config.viewport(), config.compositor_options());
    // Start the consumer first so no early frame is lost
    let render_loop = RenderLoop::start(
        Arc::clone(&slot),
        detector,
        compositor,
        sink,
        config.loop_options(),
    )?;

    let mut capture = match CaptureSession::open(config.camera_settings(), camera) {
        Ok(capture) => capture,
        Err(e) => {
            log::error!("Capture setup failed: {}", e);
            render_loop.stop()?;
            return Err(e.into());
        }
    };
    if let Err(e) = capture.start(Arc::clone(&slot)) {
        log::error!("Capture setup failed: {}", e);
        render_loop.stop()?;
        return Err(e.into());
    }

    while !stop.load(Ordering::SeqCst) && !render_loop.is_finished() {
        thread::sleep(Duration::from_millis(20));
    }

    // Stop the producer before closing the slot under it
    capture.stop();
    let stats = render_loop.stats();
    render_loop.stop()?;
    Ok(stats)
}

/// Map the points of `args` and print the padded region.
pub fn map_group(args: &MapArgs) -> Option<MappedRegion> {
    let pixel_box = scale_bounding_box(args.face_box, args.viewport);
    let inset = args.inset.unwrap_or(crate::geometry::DEFAULT_INSET);
    let region = map_landmark_group_with_inset(&args.points, pixel_box, inset);

    println!(
        "Face box: x={} y={} width={} height={}",
        pixel_box.x, pixel_box.y, pixel_box.width, pixel_box.height
    );
    match region {
        Some(r) => println!(
            "Region:   x={} y={} width={} height={}",
            r.rect.x, r.rect.y, r.rect.width, r.rect.height
        ),
        None => println!("Region:   none (no points)"),
    }
    region
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<()> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_path);
    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(config_path.as_path()))?;
            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found, defaults)", config_path.display());
            }
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init => {
            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'landmark-overlay config show' to view current settings.");
                return Ok(());
            }
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| crate::config::ConfigError::IoError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            let text = Config::default().to_toml()?;
            std::fs::write(&config_path, format!("# landmark-overlay configuration\n\n{}", text))
                .map_err(|e| crate::config::ConfigError::IoError {
                    path: config_path.clone(),
                    source: e,
                })?;
            println!("Created config file: {}", config_path.display());
        }
        ConfigAction::Path => println!("{}", config_path.display()),
    }
    Ok(())
}
