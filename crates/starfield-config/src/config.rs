//! Configuration structs with defaults and RON persistence.
//!
//! Everything here configures the *host* the starfield runs in. The
//! simulator's own constants (breakpoint, star counts, speed) are fixed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulated viewport.
    pub viewport: ViewportConfig,
    /// Capability and accessibility flags reported by the host.
    pub motion: MotionConfig,
    /// Frame loop settings.
    pub run: RunConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport the host reports to the simulator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Host capabilities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Report a reduced-motion preference, which keeps the starfield off.
    pub reduced_motion: bool,
    /// Whether the host can hand out a drawing surface.
    pub surface_available: bool,
}

/// A viewport change injected partway through a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResizeStep {
    /// Frame index after which the resize is delivered.
    pub at_frame: u64,
    /// New width in pixels.
    pub width: u32,
    /// New height in pixels.
    pub height: u32,
}

/// Frame loop settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Number of frame callbacks to deliver before tearing down.
    pub frames: u64,
    /// Pace frames to this rate (0 = as fast as possible).
    pub target_fps: u32,
    /// Fixed seed for reproducible runs. Random when `None`.
    pub seed: Option<u64>,
    /// Optional scripted resize.
    pub resize: Option<ResizeStep>,
    /// Write the last frame here as PNG.
    pub snapshot_path: Option<PathBuf>,
    /// Layer opacity used when compositing the snapshot over black.
    pub layer_opacity: f32,
}

/// Debug/development settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g. "info", "debug,starfield_sim=trace").
    pub log_level: String,
    /// Also write JSON logs to the log directory in debug builds.
    pub log_to_file: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            surface_available: true,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            target_fps: 60,
            seed: None,
            resize: None,
            snapshot_path: None,
            layer_opacity: 0.6,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

/// Where [`Config::load_or_create`] got its config from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    Loaded(PathBuf),
    /// No file existed; defaults were written here.
    Created(PathBuf),
}

impl ConfigOrigin {
    pub fn path(&self) -> &Path {
        match self {
            Self::Loaded(path) | Self::Created(path) => path,
        }
    }
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(path) => write!(f, "Loaded config from {}", path.display()),
            Self::Created(path) => write!(f, "Created default config at {}", path.display()),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from `config_dir`, writing a default file if none exists.
    ///
    /// Usually runs before logging is installed, so the origin is returned
    /// for the caller to report.
    pub fn load_or_create(config_dir: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            Ok((config, ConfigOrigin::Loaded(config_path)))
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            Ok((config, ConfigOrigin::Created(config_path)))
        }
    }

    /// Save as `config.ron` inside `config_dir`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })
    }

    /// Re-read `config.ron`; `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;
        if &new_config != self {
            tracing::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject settings the host cannot honor: empty viewports and resize
    /// steps that would never be delivered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if let Some(step) = self.run.resize {
            if step.width == 0 || step.height == 0 {
                return Err(ConfigError::Invalid(format!(
                    "resize target must be non-empty, got {}x{}",
                    step.width, step.height
                )));
            }
            if step.at_frame == 0 || step.at_frame > self.run.frames {
                return Err(ConfigError::Invalid(format!(
                    "resize at frame {} falls outside frames 1..={}",
                    step.at_frame, self.run.frames
                )));
            }
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("frames: 600"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(viewport: (width: 375))").unwrap();
        assert_eq!(config.viewport.width, 375);
        assert_eq!(config.viewport.height, 720);
        assert_eq!(config.run, RunConfig::default());
    }

    #[test]
    fn test_unknown_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(warp_drive: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_resize_step_parses() {
        let ron_str = "(run: (resize: Some((at_frame: 30, width: 500, height: 900))))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(
            config.run.resize,
            Some(ResizeStep {
                at_frame: 30,
                width: 500,
                height: 900
            })
        );
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.viewport.width = 1920;
        config.motion.reduced_motion = true;
        config.run.seed = Some(7);
        config.run.snapshot_path = Some(PathBuf::from("out/frame.png"));

        config.save(dir.path()).unwrap();
        let (loaded, origin) = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
        assert_eq!(origin, ConfigOrigin::Loaded(dir.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let (config, origin) = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(matches!(origin, ConfigOrigin::Created(_)));
        assert!(origin.path().exists());
        assert!(origin.to_string().starts_with("Created default config at"));
    }

    #[test]
    fn test_load_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "(viewport: oops").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_viewport() {
        let mut config = Config::default();
        config.viewport.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_undeliverable_resize() {
        let mut config = Config::default();
        config.run.frames = 10;

        for at_frame in [0, 11] {
            config.run.resize = Some(ResizeStep {
                at_frame,
                width: 500,
                height: 900,
            });
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "at_frame {at_frame} should be rejected"
            );
        }

        config.run.resize = Some(ResizeStep {
            at_frame: 10,
            width: 0,
            height: 900,
        });
        assert!(config.validate().is_err());

        config.run.resize = Some(ResizeStep {
            at_frame: 10,
            width: 500,
            height: 900,
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.run.frames = 10;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.run.frames), Some(10));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }
}
