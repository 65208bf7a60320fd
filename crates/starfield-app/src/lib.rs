//! Headless host for the starfield: configuration-driven frame loop that
//! renders into a software surface and exports the final frame.

pub mod frame_host;
pub mod frame_loop;
pub mod platform;

use std::path::PathBuf;

use starfield_config::{CliArgs, Config, ConfigError, ConfigOrigin};
use starfield_raster::RasterError;
use starfield_sim::Rgba;
use tracing::info;

pub use frame_host::FrameHost;
pub use frame_loop::{FrameLoop, FramePacer, RunReport};
pub use platform::{PlatformDirs, PlatformError};

/// Errors that end the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: RasterError,
    },
}

/// Configuration resolved at startup.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub dirs: PlatformDirs,
    /// Reported once logging is up.
    pub origin: ConfigOrigin,
}

/// Resolve directories and load `config.ron` with CLI overrides applied and
/// validated.
pub fn load_config(args: &CliArgs) -> Result<LoadedConfig, AppError> {
    let dirs = match &args.config {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let (mut config, origin) = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok(LoadedConfig {
        config,
        dirs,
        origin,
    })
}

/// Run the frame loop and write the snapshot if one is configured.
pub fn run(config: &Config) -> Result<RunReport, AppError> {
    let report = FrameLoop::from_config(config).run();

    if let (Some(path), Some(frame)) = (&config.run.snapshot_path, &report.last_frame) {
        frame
            .composite_over(Rgba::BLACK, config.run.layer_opacity)
            .save_png(path)
            .map_err(|source| AppError::Snapshot {
                path: path.clone(),
                source,
            })?;
    }

    info!(
        outcome = ?report.outcome,
        frames = report.frames_rendered,
        "Starfield run complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_uses_override_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let args = CliArgs {
            config: Some(tmp.path().to_path_buf()),
            width: Some(640),
            ..Default::default()
        };

        let loaded = load_config(&args).unwrap();
        assert_eq!(loaded.config.viewport.width, 640);
        assert!(matches!(loaded.origin, ConfigOrigin::Created(_)));
        assert!(
            loaded
                .dirs
                .config_dir
                .join(starfield_config::CONFIG_FILE_NAME)
                .exists()
        );

        let again = load_config(&args).unwrap();
        assert!(matches!(again.origin, ConfigOrigin::Loaded(_)));
    }

    #[test]
    fn test_load_config_rejects_resize_past_last_frame() {
        let tmp = tempfile::tempdir().unwrap();
        let args = CliArgs {
            config: Some(tmp.path().to_path_buf()),
            frames: Some(5),
            resize: Some(starfield_config::ResizeStep {
                at_frame: 6,
                width: 500,
                height: 900,
            }),
            ..Default::default()
        };

        let err = load_config(&args).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_run_writes_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("frame.png");
        let mut config = Config::default();
        config.viewport.width = 160;
        config.viewport.height = 90;
        config.run.frames = 5;
        config.run.target_fps = 0;
        config.run.seed = Some(9);
        config.run.snapshot_path = Some(path.clone());

        let report = run(&config).unwrap();
        assert!(report.outcome.is_started());
        assert!(path.exists());
    }

    #[test]
    fn test_run_without_surface_skips_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("frame.png");
        let mut config = Config::default();
        config.motion.surface_available = false;
        config.run.snapshot_path = Some(path.clone());

        let report = run(&config).unwrap();
        assert!(!report.outcome.is_started());
        assert!(!path.exists());
    }
}
