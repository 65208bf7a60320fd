//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ResizeStep};

/// Starfield command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "starfield", about = "Headless receding starfield renderer")]
pub struct CliArgs {
    /// Viewport width.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Number of frames to render.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Frame pacing in frames per second (0 = unpaced).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Seed for reproducible star placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report a reduced-motion preference.
    #[arg(long)]
    pub reduced_motion: bool,

    /// Pretend no drawing surface is available.
    #[arg(long)]
    pub no_surface: bool,

    /// Resize the viewport mid-run, as `FRAME:WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_resize_step)]
    pub resize: Option<ResizeStep>,

    /// Write the final frame to this PNG file.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse `FRAME:WIDTHxHEIGHT`, e.g. `120:500x900`. Frame and size must be
/// non-zero.
pub fn parse_resize_step(s: &str) -> Result<ResizeStep, String> {
    let (frame, size) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:WIDTHxHEIGHT, got {s:?}"))?;
    let (width, height) = size
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {size:?}"))?;

    let at_frame: u64 = frame
        .trim()
        .parse()
        .map_err(|e| format!("invalid frame {frame:?}: {e}"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|e| format!("invalid width {width:?}: {e}"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|e| format!("invalid height {height:?}: {e}"))?;

    if at_frame == 0 {
        return Err("resize frame must be at least 1".to_string());
    }
    if width == 0 || height == 0 {
        return Err(format!("resize target must be non-empty, got {width}x{height}"));
    }

    Ok(ResizeStep {
        at_frame,
        width,
        height,
    })
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.viewport.width = w;
        }
        if let Some(h) = args.height {
            self.viewport.height = h;
        }
        if let Some(frames) = args.frames {
            self.run.frames = frames;
        }
        if let Some(fps) = args.fps {
            self.run.target_fps = fps;
        }
        if args.seed.is_some() {
            self.run.seed = args.seed;
        }
        if args.reduced_motion {
            self.motion.reduced_motion = true;
        }
        if args.no_surface {
            self.motion.surface_available = false;
        }
        if args.resize.is_some() {
            self.run.resize = args.resize;
        }
        if let Some(ref path) = args.output {
            self.run.snapshot_path = Some(path.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
