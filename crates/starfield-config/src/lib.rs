//! Configuration for the starfield host.
//!
//! Settings persist to disk as RON, accept CLI overrides via clap, and
//! tolerate missing or unknown fields.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, parse_resize_step};
pub use config::{
    CONFIG_FILE_NAME, Config, ConfigOrigin, DebugConfig, MotionConfig, ResizeStep, RunConfig,
    ViewportConfig,
};
pub use error::ConfigError;
